pub mod error;
pub mod flow;
pub mod github;
pub mod types;

pub use error::{OAuthError, Result};
pub use flow::{AuthCodeFlow, OAuthFlow};
pub use types::{LOGIN_STATE, OAuthConfig, OAuthToken};
