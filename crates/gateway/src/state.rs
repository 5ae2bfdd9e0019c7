use std::sync::Arc;

use flowtable_oauth::{AuthCodeFlow, OAuthConfig, OAuthFlow};

/// Read-only state shared by every request.
pub struct GatewayState {
    pub auth: Arc<dyn AuthCodeFlow>,
}

pub type AppState = Arc<GatewayState>;

impl GatewayState {
    pub fn new(auth: Arc<dyn AuthCodeFlow>) -> Self {
        Self { auth }
    }

    /// State backed by a real HTTP [`OAuthFlow`].
    pub fn from_oauth_config(config: OAuthConfig) -> flowtable_oauth::Result<Self> {
        Ok(Self::new(Arc::new(OAuthFlow::new(config)?)))
    }
}
