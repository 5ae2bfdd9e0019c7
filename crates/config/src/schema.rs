use {
    flowtable_oauth::{OAuthConfig, github},
    secrecy::Secret,
    serde::Deserialize,
};

pub const DEFAULT_BIND: &str = "0.0.0.0";
pub const DEFAULT_PORT: u16 = 8088;
pub const DEFAULT_REDIRECT_URL: &str = "http://localhost:8088/auth/callback/github";

/// Root configuration.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct FlowtableConfig {
    pub server: ServerConfig,
    pub github: GithubConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: DEFAULT_BIND.into(),
            port: DEFAULT_PORT,
        }
    }
}

/// GitHub OAuth app settings.
///
/// `client_id` and `client_secret` are never read from the file; see
/// [`crate::loader::apply_env_credentials`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GithubConfig {
    #[serde(skip)]
    pub client_id: String,
    #[serde(skip, default = "empty_secret")]
    pub client_secret: Secret<String>,
    pub redirect_url: String,
    pub scopes: Vec<String>,
    pub auth_url: String,
    pub token_url: String,
}

fn empty_secret() -> Secret<String> {
    Secret::new(String::new())
}

impl Default for GithubConfig {
    fn default() -> Self {
        Self {
            client_id: String::new(),
            client_secret: empty_secret(),
            redirect_url: DEFAULT_REDIRECT_URL.into(),
            scopes: github::DEFAULT_SCOPES.iter().map(|s| s.to_string()).collect(),
            auth_url: github::AUTH_URL.into(),
            token_url: github::TOKEN_URL.into(),
        }
    }
}

impl FlowtableConfig {
    /// OAuth client settings for the GitHub login flow.
    pub fn github_oauth(&self) -> OAuthConfig {
        OAuthConfig {
            client_id: self.github.client_id.clone(),
            client_secret: self.github.client_secret.clone(),
            auth_url: self.github.auth_url.clone(),
            token_url: self.github.token_url.clone(),
            redirect_uri: self.github.redirect_url.clone(),
            scopes: self.github.scopes.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use {super::*, secrecy::ExposeSecret};

    #[test]
    fn test_defaults() {
        let cfg = FlowtableConfig::default();
        assert_eq!(cfg.server.bind, "0.0.0.0");
        assert_eq!(cfg.server.port, 8088);
        assert_eq!(
            cfg.github.redirect_url,
            "http://localhost:8088/auth/callback/github"
        );
        assert_eq!(cfg.github.scopes, vec!["user:email", "read:user"]);
        assert_eq!(cfg.github.auth_url, github::AUTH_URL);
        assert_eq!(cfg.github.token_url, github::TOKEN_URL);
    }

    #[test]
    fn test_github_oauth_carries_credentials() {
        let mut cfg = FlowtableConfig::default();
        cfg.github.client_id = "abc".into();
        cfg.github.client_secret = Secret::new("xyz".into());
        let oauth = cfg.github_oauth();
        assert_eq!(oauth.client_id, "abc");
        assert_eq!(oauth.client_secret.expose_secret(), "xyz");
        assert_eq!(oauth.redirect_uri, DEFAULT_REDIRECT_URL);
    }
}
