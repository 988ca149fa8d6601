// File: src/routes.rs
// Purpose: HTTP routes for the login form

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use login_validation_core::{Authenticator, RuleSet};
use std::collections::HashMap;
use std::sync::Arc;
use tower_http::{services::ServeDir, trace::TraceLayer};
use tracing::debug;

use crate::page::login_page;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub authenticator: Arc<Authenticator>,
}

impl AppState {
    pub fn new(rules: RuleSet) -> Self {
        Self {
            authenticator: Arc::new(Authenticator::new(rules)),
        }
    }
}

pub fn app_router(state: AppState, pkg_dir: &str) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/login", post(login_handler))
        .route("/rules", get(rules_handler))
        .nest_service("/pkg", ServeDir::new(pkg_dir))
        .fallback(not_found_handler)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

async fn index_handler(State(state): State<AppState>) -> Html<String> {
    Html(login_page(state.authenticator.rules()).into_string())
}

async fn login_handler(State(state): State<AppState>, body: Bytes) -> String {
    let fields = parse_form(&body);
    let email = fields.get("email").map(String::as_str).unwrap_or_default();
    let password = fields.get("password").map(String::as_str).unwrap_or_default();

    state.authenticator.authenticate(email, password).to_string()
}

async fn rules_handler(State(state): State<AppState>) -> Json<RuleSet> {
    Json(state.authenticator.rules().clone())
}

async fn not_found_handler() -> Response {
    (StatusCode::NOT_FOUND, "Not found").into_response()
}

/// Lenient `application/x-www-form-urlencoded` parsing: undecodable pairs
/// are dropped, missing keys read as empty, the first occurrence wins.
fn parse_form(body: &[u8]) -> HashMap<String, String> {
    let form_str = String::from_utf8_lossy(body);
    let decode = |s: &str| {
        let s = s.replace('+', " ");
        urlencoding::decode(&s).map(|d| d.into_owned()).ok()
    };

    let mut fields = HashMap::new();
    for pair in form_str.split('&').filter(|p| !p.is_empty()) {
        let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
        match (decode(key), decode(value)) {
            (Some(key), Some(value)) => {
                fields.entry(key).or_insert(value);
            }
            _ => debug!(pair, "dropping undecodable form pair"),
        }
    }
    fields
}
