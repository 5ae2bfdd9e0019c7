use {
    axum::{Json, http::StatusCode, routing::get},
    serde_json::{Value, json},
};

use crate::{
    api_docs::{DocumentedRouter, RouteDoc},
    state::AppState,
};

pub fn register(router: DocumentedRouter<AppState>) -> DocumentedRouter<AppState> {
    router
        .route(
            RouteDoc::get("/hello", "hello", "hello page", "api")
                .response(StatusCode::OK, "OK"),
            get(hello),
        )
        .route(
            RouteDoc::get("/api/hello", "apiHello", "hello page", "api")
                .response(StatusCode::OK, "OK"),
            get(hello),
        )
}

async fn hello() -> Json<Value> {
    Json(json!({ "hello": "world" }))
}
