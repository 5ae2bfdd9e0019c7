//! Configuration for the FlowTable server.
//!
//! Server and provider settings come from an optional `flowtable.toml`.
//! GitHub credentials only ever come from the environment.

pub mod loader;
pub mod schema;

pub use {
    loader::{discover_config_path, discover_config_path_in, load_config},
    schema::{FlowtableConfig, GithubConfig, ServerConfig},
};
