use std::path::{Path, PathBuf};

use {
    anyhow::{Context, Result},
    directories::ProjectDirs,
    secrecy::{ExposeSecret, Secret},
    tracing::{debug, info, warn},
};

use crate::schema::FlowtableConfig;

pub const CONFIG_FILE: &str = "flowtable.toml";
pub const CLIENT_ID_ENV: &str = "GITHUB_CLIENT_ID";
pub const CLIENT_SECRET_ENV: &str = "GITHUB_CLIENT_SECRET";

/// Find a config file: `./flowtable.toml` first, then the user config dir.
pub fn discover_config_path() -> Option<PathBuf> {
    let user_dir = ProjectDirs::from("cn", "flowtable", "flowtable")
        .map(|dirs| dirs.config_dir().to_path_buf());
    discover_config_path_in(Path::new("."), user_dir.as_deref())
}

/// Look for [`CONFIG_FILE`] in `base`, then in `user_dir`.
pub fn discover_config_path_in(base: &Path, user_dir: Option<&Path>) -> Option<PathBuf> {
    [Some(base), user_dir]
        .into_iter()
        .flatten()
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|path| path.is_file())
}

/// Load configuration from `path` (or a discovered file, or defaults) and
/// overlay GitHub credentials from the process environment.
pub fn load_config(path: Option<&Path>) -> Result<FlowtableConfig> {
    let mut config = match path {
        Some(path) => parse_file(path)?,
        None => match discover_config_path() {
            Some(found) => parse_file(&found)?,
            None => {
                debug!("no config file found, using defaults");
                FlowtableConfig::default()
            },
        },
    };
    apply_env_credentials(&mut config, |key| std::env::var(key).ok());
    Ok(config)
}

pub fn parse_file(path: &Path) -> Result<FlowtableConfig> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let config = parse_str(&raw)
        .with_context(|| format!("failed to parse config file {}", path.display()))?;
    info!(path = %path.display(), "loaded config file");
    Ok(config)
}

pub fn parse_str(raw: &str) -> Result<FlowtableConfig> {
    Ok(toml::from_str(raw)?)
}

/// Fill `client_id`/`client_secret` from `lookup`. Missing values become
/// empty strings; the server still starts, GitHub will just refuse the login.
pub fn apply_env_credentials(
    config: &mut FlowtableConfig,
    lookup: impl Fn(&str) -> Option<String>,
) {
    config.github.client_id = lookup(CLIENT_ID_ENV).unwrap_or_default();
    config.github.client_secret = Secret::new(lookup(CLIENT_SECRET_ENV).unwrap_or_default());

    if config.github.client_id.is_empty() || config.github.client_secret.expose_secret().is_empty()
    {
        warn!("GITHUB_CLIENT_ID or GITHUB_CLIENT_SECRET is empty; GitHub login will not work");
    }
}
