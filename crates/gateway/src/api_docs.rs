//! Swagger 2.0 description built from the routes as they are registered.

use std::sync::Arc;

use {
    axum::{
        Json, Router,
        http::{Method, StatusCode},
        routing::MethodRouter,
    },
    serde_json::{Map, Value, json},
};

/// Path the generated document is served on.
pub const API_DOCS_PATH: &str = "/api.json";

/// Documentation attached to one registered route.
#[derive(Debug, Clone)]
pub struct RouteDoc {
    pub method: Method,
    pub path: &'static str,
    pub operation_id: &'static str,
    pub summary: &'static str,
    pub tag: &'static str,
    pub responses: Vec<(StatusCode, &'static str)>,
}

impl RouteDoc {
    pub fn get(
        path: &'static str,
        operation_id: &'static str,
        summary: &'static str,
        tag: &'static str,
    ) -> Self {
        Self {
            method: Method::GET,
            path,
            operation_id,
            summary,
            tag,
            responses: Vec::new(),
        }
    }

    #[must_use]
    pub fn response(mut self, status: StatusCode, description: &'static str) -> Self {
        self.responses.push((status, description));
        self
    }
}

/// An axum [`Router`] that records a [`RouteDoc`] for every route added.
pub struct DocumentedRouter<S> {
    router: Router<S>,
    docs: Vec<RouteDoc>,
}

impl<S> Default for DocumentedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<S> DocumentedRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            docs: Vec::new(),
        }
    }

    #[must_use]
    pub fn route(mut self, doc: RouteDoc, handler: MethodRouter<S>) -> Self {
        self.router = self.router.route(doc.path, handler);
        self.docs.push(doc);
        self
    }

    pub fn finish(self) -> (Router<S>, Vec<RouteDoc>) {
        (self.router, self.docs)
    }
}

/// Render the Swagger 2.0 document for `routes`.
pub fn swagger_document(routes: &[RouteDoc]) -> Value {
    let mut paths = Map::new();
    for route in routes {
        let responses: Map<String, Value> = route
            .responses
            .iter()
            .map(|(status, description)| {
                (
                    status.as_u16().to_string(),
                    json!({ "description": description }),
                )
            })
            .collect();

        let method = route.method.as_str().to_ascii_lowercase();
        let entry = paths
            .entry(route.path)
            .or_insert_with(|| Value::Object(Map::new()));
        entry[method.as_str()] = json!({
            "tags": [route.tag],
            "summary": route.summary,
            "operationId": route.operation_id,
            "produces": ["application/json"],
            "responses": responses,
        });
    }

    json!({
        "swagger": "2.0",
        "info": {
            "title": "FlowTable",
            "description": "hyper table with workflow,access control,expansion",
            "contact": {
                "name": "Leon",
                "email": "leondevlifelog@gmail.com",
                "url": "https://flowtable.cn",
            },
            "license": {
                "name": "Apache License 2.0",
                "url": "https://www.apache.org/licenses/LICENSE-2.0.txt",
            },
            "version": "0.0.1",
        },
        "paths": paths,
        "tags": [
            { "name": "example", "description": "example description" },
        ],
    })
}

pub async fn serve(document: Arc<Value>) -> Json<Value> {
    Json(document.as_ref().clone())
}
