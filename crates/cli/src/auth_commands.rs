use std::path::{Path, PathBuf};

use {
    anyhow::{Context, Result},
    clap::Subcommand,
    flowtable_oauth::{AuthCodeFlow, LOGIN_STATE, OAuthFlow},
};

#[derive(Subcommand)]
pub enum AuthAction {
    /// Print the GitHub authorization URL the login route redirects to.
    Url {
        #[arg(long, env = "FLOWTABLE_CONFIG")]
        config: Option<PathBuf>,
    },
    /// Exchange an authorization code and print the token.
    Exchange {
        /// Code GitHub appended to the callback URL.
        #[arg(long)]
        code: String,
        #[arg(long, env = "FLOWTABLE_CONFIG")]
        config: Option<PathBuf>,
    },
}

pub async fn handle_auth(action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Url { config } => {
            println!("{}", authorization_url(config.as_deref())?);
            Ok(())
        },
        AuthAction::Exchange { code, config } => exchange(&code, config.as_deref()).await,
    }
}

fn github_flow(config_path: Option<&Path>) -> Result<OAuthFlow> {
    let config = flowtable_config::load_config(config_path)?;
    Ok(OAuthFlow::new(config.github_oauth())?)
}

fn authorization_url(config_path: Option<&Path>) -> Result<String> {
    Ok(github_flow(config_path)?
        .authorization_url(LOGIN_STATE)
        .to_string())
}

async fn exchange(code: &str, config_path: Option<&Path>) -> Result<()> {
    let flow = github_flow(config_path)?;
    let token = flow
        .exchange(code)
        .await
        .context("no token found")?;
    let body = token.to_indented_json()?;
    println!("{}", String::from_utf8_lossy(&body));
    Ok(())
}

#[cfg(test)]
mod tests {
    use {super::*, std::io::Write};

    #[test]
    fn test_authorization_url_uses_config_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[github]\nredirect_url = \"https://flowtable.cn/auth/callback/github\""
        )
        .unwrap();

        let url = authorization_url(Some(file.path())).unwrap();
        assert!(url.starts_with("https://github.com/login/oauth/authorize?"));
        assert!(url.contains("state=state"));
        assert!(url.contains("redirect_uri=https%3A%2F%2Fflowtable.cn%2Fauth%2Fcallback%2Fgithub"));
    }

    fn config_with_token_url(server: &mockito::Server) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[github]\ntoken_url = \"{}/login/oauth/access_token\"",
            server.url()
        )
        .unwrap();
        file
    }

    #[tokio::test]
    async fn test_exchange_against_token_endpoint() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/login/oauth/access_token")
            .match_body(mockito::Matcher::UrlEncoded("code".into(), "good".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"access_token":"gho_abc","token_type":"bearer"}"#)
            .create_async()
            .await;
        let file = config_with_token_url(&server);

        exchange("good", Some(file.path())).await.unwrap();
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_exchange_rejected_code() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/login/oauth/access_token")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"{"error":"bad_verification_code"}"#)
            .create_async()
            .await;
        let file = config_with_token_url(&server);

        let err = exchange("used", Some(file.path())).await.unwrap_err();
        assert_eq!(err.to_string(), "no token found");
        assert!(format!("{err:#}").contains("bad_verification_code"));
    }
}
