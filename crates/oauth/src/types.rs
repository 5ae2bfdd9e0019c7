use {
    chrono::{DateTime, Utc},
    secrecy::Secret,
    serde::{Serialize, Serializer},
};

/// Value sent as the OAuth `state` parameter and expected back on the callback.
///
/// This is a fixed string, so it does not protect against cross-site request
/// forgery: anyone who knows it can complete a callback. Replacing it needs a
/// per-login random value bound to a browser session.
pub const LOGIN_STATE: &str = "state";

/// OAuth 2.0 provider configuration.
#[derive(Debug, Clone)]
pub struct OAuthConfig {
    pub client_id: String,
    pub client_secret: Secret<String>,
    pub auth_url: String,
    pub token_url: String,
    pub redirect_uri: String,
    pub scopes: Vec<String>,
}

/// Rendered for tokens that never expire, as Go's zero `time.Time`.
pub const NO_EXPIRY: &str = "0001-01-01T00:00:00Z";

/// Token returned by the provider's token endpoint.
///
/// Serializes with the field set of Go's `oauth2.Token`: `expiry` is always
/// present and `scope` is kept out of the rendered JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OAuthToken {
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    /// Absolute expiry, computed from `expires_in` at exchange time.
    #[serde(serialize_with = "serialize_expiry")]
    pub expiry: Option<DateTime<Utc>>,
    #[serde(skip)]
    pub scope: Option<String>,
}

fn serialize_expiry<S: Serializer>(
    expiry: &Option<DateTime<Utc>>,
    ser: S,
) -> Result<S::Ok, S::Error> {
    match expiry {
        Some(at) => at.serialize(ser),
        None => ser.serialize_str(NO_EXPIRY),
    }
}

#[derive(Serialize)]
struct TokenEnvelope<'a> {
    #[serde(rename = "OAuth2Token")]
    token: &'a OAuthToken,
}

impl OAuthToken {
    /// Render as `{"OAuth2Token": {...}}` with four-space indentation.
    pub fn to_indented_json(&self) -> serde_json::Result<Vec<u8>> {
        let mut out = Vec::new();
        let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
        let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
        TokenEnvelope { token: self }.serialize(&mut ser)?;
        Ok(out)
    }
}
