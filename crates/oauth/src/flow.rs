use {
    async_trait::async_trait,
    chrono::{TimeDelta, Utc},
    reqwest::{Client, header::ACCEPT},
    secrecy::ExposeSecret,
    serde::Deserialize,
    tracing::debug,
    url::Url,
};

use crate::{
    error::{OAuthError, Result},
    types::{OAuthConfig, OAuthToken},
};

/// Longest slice of an error body kept in [`OAuthError::Status`].
const MAX_ERROR_BODY: usize = 512;

/// The two steps of the authorization-code flow.
#[async_trait]
pub trait AuthCodeFlow: Send + Sync {
    /// Provider URL the browser is redirected to.
    fn authorization_url(&self, state: &str) -> Url;

    /// Trade an authorization code for a token. One request, no retry.
    async fn exchange(&self, code: &str) -> Result<OAuthToken>;
}

/// Authorization-code flow against a real provider over HTTP.
pub struct OAuthFlow {
    config: OAuthConfig,
    auth_url: Url,
    token_url: Url,
    client: Client,
}

impl OAuthFlow {
    pub fn new(config: OAuthConfig) -> Result<Self> {
        Self::with_client(config, Client::new())
    }

    pub fn with_client(config: OAuthConfig, client: Client) -> Result<Self> {
        let auth_url = Url::parse(&config.auth_url).map_err(|source| OAuthError::InvalidUrl {
            field: "authorization",
            source,
        })?;
        let token_url = Url::parse(&config.token_url).map_err(|source| OAuthError::InvalidUrl {
            field: "token",
            source,
        })?;
        Ok(Self {
            config,
            auth_url,
            token_url,
            client,
        })
    }
}

#[async_trait]
impl AuthCodeFlow for OAuthFlow {
    fn authorization_url(&self, state: &str) -> Url {
        let mut url = self.auth_url.clone();
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("client_id", &self.config.client_id);
            if !self.config.redirect_uri.is_empty() {
                query.append_pair("redirect_uri", &self.config.redirect_uri);
            }
            query.append_pair("response_type", "code");
            if !self.config.scopes.is_empty() {
                query.append_pair("scope", &self.config.scopes.join(" "));
            }
            query.append_pair("state", state);
        }
        url
    }

    async fn exchange(&self, code: &str) -> Result<OAuthToken> {
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", self.config.redirect_uri.as_str()),
            ("client_id", self.config.client_id.as_str()),
            (
                "client_secret",
                self.config.client_secret.expose_secret().as_str(),
            ),
        ];

        debug!(token_url = %self.token_url, "exchanging authorization code");

        let resp = self
            .client
            .post(self.token_url.clone())
            .header(ACCEPT, "application/json")
            .form(&form)
            .send()
            .await?;

        let status = resp.status();
        let body = resp.text().await?;
        if !status.is_success() {
            return Err(OAuthError::Status {
                status,
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        parse_token_response(&body)
    }
}

/// Raw token endpoint payload. GitHub reports a rejected code with a 200
/// status and an `error` field, so both shapes share one struct.
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: Option<String>,
    token_type: Option<String>,
    refresh_token: Option<String>,
    expires_in: Option<i64>,
    scope: Option<String>,
    error: Option<String>,
    error_description: Option<String>,
}

fn parse_token_response(body: &str) -> Result<OAuthToken> {
    let raw: TokenResponse =
        serde_json::from_str(body).map_err(|e| OAuthError::InvalidResponse(e.to_string()))?;

    if let Some(error) = raw.error {
        return Err(OAuthError::Provider {
            error,
            description: raw.error_description.unwrap_or_default(),
        });
    }

    let access_token = raw
        .access_token
        .filter(|t| !t.is_empty())
        .ok_or_else(|| OAuthError::InvalidResponse("missing access_token".into()))?;

    let expiry = raw
        .expires_in
        .filter(|secs| *secs > 0)
        .and_then(TimeDelta::try_seconds)
        .and_then(|ttl| Utc::now().checked_add_signed(ttl));

    Ok(OAuthToken {
        access_token,
        token_type: raw.token_type,
        refresh_token: raw.refresh_token.filter(|t| !t.is_empty()),
        expiry,
        scope: raw.scope,
    })
}
