use thiserror::Error;

#[derive(Debug, Error)]
pub enum OAuthError {
    #[error("invalid {field} url: {source}")]
    InvalidUrl {
        field: &'static str,
        #[source]
        source: url::ParseError,
    },

    #[error("token request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("token endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The provider answered but refused the code (bad, expired or already used).
    #[error("provider rejected authorization code: {error} ({description})")]
    Provider { error: String, description: String },

    #[error("invalid token response: {0}")]
    InvalidResponse(String),
}

pub type Result<T> = std::result::Result<T, OAuthError>;
