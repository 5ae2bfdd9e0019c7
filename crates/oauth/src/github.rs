//! GitHub provider endpoints and defaults.

use secrecy::Secret;

use crate::types::OAuthConfig;

pub const AUTH_URL: &str = "https://github.com/login/oauth/authorize";
pub const TOKEN_URL: &str = "https://github.com/login/oauth/access_token";
pub const DEFAULT_SCOPES: &[&str] = &["user:email", "read:user"];

/// Build an [`OAuthConfig`] pointing at GitHub with the default scopes.
pub fn config(client_id: &str, client_secret: Secret<String>, redirect_uri: &str) -> OAuthConfig {
    OAuthConfig {
        client_id: client_id.to_string(),
        client_secret,
        auth_url: AUTH_URL.to_string(),
        token_url: TOKEN_URL.to_string(),
        redirect_uri: redirect_uri.to_string(),
        scopes: DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
    }
}
