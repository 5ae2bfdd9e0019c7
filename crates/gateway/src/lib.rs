//! HTTP gateway: the hello endpoint, the generated API description and the
//! GitHub OAuth login/callback routes.

pub mod api_docs;
pub mod auth_routes;
pub mod routes;
pub mod server;
pub mod state;

pub use {
    server::{build_app, serve, start_gateway},
    state::{AppState, GatewayState},
};
