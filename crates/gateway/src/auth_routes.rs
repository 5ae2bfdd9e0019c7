//! GitHub OAuth2 login redirect and callback.

use {
    axum::{
        extract::{RawQuery, State},
        http::{StatusCode, header::CONTENT_TYPE},
        response::{IntoResponse, Redirect, Response},
        routing::get,
    },
    flowtable_oauth::LOGIN_STATE,
    tracing::{debug, info, warn},
    url::form_urlencoded,
};

use crate::{
    api_docs::{DocumentedRouter, RouteDoc},
    state::AppState,
};

pub const LOGIN_PATH: &str = "/auth/login/github";
pub const CALLBACK_PATH: &str = "/auth/callback/github";

pub fn register(router: DocumentedRouter<AppState>) -> DocumentedRouter<AppState> {
    router
        .route(
            RouteDoc::get(LOGIN_PATH, "githubLogin", "redirect to GitHub authorization", "auth")
                .response(StatusCode::TEMPORARY_REDIRECT, "redirect to GitHub"),
            get(login),
        )
        .route(
            RouteDoc::get(
                CALLBACK_PATH,
                "githubCallback",
                "exchange the authorization code for a token",
                "auth",
            )
            .response(StatusCode::OK, "token")
            .response(StatusCode::BAD_REQUEST, "state did not match")
            .response(StatusCode::UNAUTHORIZED, "code exchange failed"),
            get(callback),
        )
}

/// Query string GitHub appends to the redirect URL. Absent values are
/// empty; a repeated key keeps its first value.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct CallbackParams {
    pub state: String,
    pub code: String,
}

impl CallbackParams {
    pub fn from_query(query: Option<&str>) -> Self {
        let (mut state, mut code) = (None, None);
        for (key, value) in form_urlencoded::parse(query.unwrap_or_default().as_bytes()) {
            match &*key {
                "state" if state.is_none() => state = Some(value.into_owned()),
                "code" if code.is_none() => code = Some(value.into_owned()),
                _ => {},
            }
        }
        Self {
            state: state.unwrap_or_default(),
            code: code.unwrap_or_default(),
        }
    }
}

async fn login(State(state): State<AppState>) -> Redirect {
    let url = state.auth.authorization_url(LOGIN_STATE);
    debug!("redirecting to provider authorization page");
    Redirect::temporary(url.as_str())
}

async fn callback(State(state): State<AppState>, RawQuery(query): RawQuery) -> Response {
    let params = CallbackParams::from_query(query.as_deref());
    if params.state != LOGIN_STATE {
        warn!("oauth callback state did not match");
        return (StatusCode::BAD_REQUEST, "state did not match").into_response();
    }

    let token = match state.auth.exchange(&params.code).await {
        Ok(token) => token,
        Err(e) => {
            warn!(error = %e, "no token found");
            return StatusCode::UNAUTHORIZED.into_response();
        },
    };
    info!("github authorization code exchanged");

    // TODO: look up or register the account, then redirect to the console home.
    match token.to_indented_json() {
        Ok(body) => ([(CONTENT_TYPE, "application/json")], body).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_callback_params_first_value_wins() {
        let params = CallbackParams::from_query(Some("state=state&code=good&code=other&state=x"));
        assert_eq!(params.state, "state");
        assert_eq!(params.code, "good");
    }

    #[test]
    fn test_callback_params_missing_and_encoded() {
        assert_eq!(CallbackParams::from_query(None), CallbackParams::default());
        let params = CallbackParams::from_query(Some("code=a%2Bb&extra=1"));
        assert_eq!(params.state, "");
        assert_eq!(params.code, "a+b");
    }
}
