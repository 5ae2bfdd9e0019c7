mod auth_commands;

use std::{path::PathBuf, sync::Arc};

use {
    clap::{Parser, Subcommand},
    flowtable_gateway::GatewayState,
    tracing::{error, info},
    tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt},
};

#[derive(Parser)]
#[command(name = "flowtable", about = "FlowTable server")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log level (trace, debug, info, warn, error).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    /// Output logs as JSON instead of human-readable.
    #[arg(long, global = true, default_value_t = false)]
    json_logs: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server.
    Serve {
        /// Address to bind (defaults to the config file, then 0.0.0.0).
        #[arg(long)]
        bind: Option<String>,
        /// Port to listen on (defaults to the config file, then 8088).
        #[arg(long)]
        port: Option<u16>,
        /// Config file (defaults to ./flowtable.toml or the user config dir).
        #[arg(long, env = "FLOWTABLE_CONFIG")]
        config: Option<PathBuf>,
    },
    /// GitHub OAuth helpers.
    Auth {
        #[command(subcommand)]
        action: auth_commands::AuthAction,
    },
}

fn init_telemetry(cli: &Cli) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    if cli.json_logs {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_target(true).with_thread_ids(false))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_thread_ids(false)
                    .with_ansi(true),
            )
            .init();
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_telemetry(&cli);

    info!(version = env!("CARGO_PKG_VERSION"), "flowtable starting");

    let result = match cli.command {
        Commands::Serve { bind, port, config } => serve(bind, port, config).await,
        Commands::Auth { action } => auth_commands::handle_auth(action).await,
    };
    if let Err(e) = &result {
        error!(error = %format!("{e:#}"), "flowtable exited with an error");
    }
    result
}

async fn serve(
    bind: Option<String>,
    port: Option<u16>,
    config_path: Option<PathBuf>,
) -> anyhow::Result<()> {
    let config = flowtable_config::load_config(config_path.as_deref())?;
    let bind = bind.unwrap_or_else(|| config.server.bind.clone());
    let port = port.unwrap_or(config.server.port);

    let state = GatewayState::from_oauth_config(config.github_oauth())?;
    flowtable_gateway::start_gateway(&bind, port, Arc::new(state)).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::try_parse_from(["flowtable", "serve", "--port", "9000"]).unwrap();
        match cli.command {
            Commands::Serve { bind, port, .. } => {
                assert_eq!(bind, None);
                assert_eq!(port, Some(9000));
            },
            Commands::Auth { .. } => panic!("expected serve"),
        }
        assert_eq!(cli.log_level, "info");
        assert!(!cli.json_logs);
    }

    #[test]
    fn test_parse_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["flowtable", "serve", "--json-logs", "--log-level", "debug"])
            .unwrap();
        assert!(cli.json_logs);
        assert_eq!(cli.log_level, "debug");
    }

    #[test]
    fn test_subcommand_required() {
        assert!(Cli::try_parse_from(["flowtable"]).is_err());
    }
}
