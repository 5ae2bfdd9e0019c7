use std::sync::Arc;

use {
    anyhow::Context,
    axum::{Router, routing::get},
    tokio::net::TcpListener,
    tower_http::trace::TraceLayer,
    tracing::{info, warn},
};

use crate::{
    api_docs::{self, API_DOCS_PATH, DocumentedRouter},
    auth_routes, routes,
    state::AppState,
};

/// Build the full router. `/api.json` describes every route registered
/// before it.
pub fn build_app(state: AppState) -> Router {
    let documented = auth_routes::register(routes::register(DocumentedRouter::new()));
    let (router, docs) = documented.finish();
    let document = Arc::new(api_docs::swagger_document(&docs));

    router
        .route(
            API_DOCS_PATH,
            get(move || api_docs::serve(Arc::clone(&document))),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Bind `bind:port` and serve until Ctrl-C. A bind failure is returned, not retried.
pub async fn start_gateway(bind: &str, port: u16, state: AppState) -> anyhow::Result<()> {
    let listener = TcpListener::bind((bind, port))
        .await
        .with_context(|| format!("failed to bind {bind}:{port}"))?;
    info!(bind, port, "start listening on http://localhost:{port}");
    serve(listener, state).await
}

/// Serve on an already bound listener.
pub async fn serve(listener: TcpListener, state: AppState) -> anyhow::Result<()> {
    axum::serve(listener, build_app(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("gateway server failed")?;
    info!("gateway stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("shutdown signal received"),
        Err(e) => {
            warn!(error = %e, "failed to listen for shutdown signal");
            std::future::pending::<()>().await;
        },
    }
}
