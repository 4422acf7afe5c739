//! Stub of the public superhero API.
//!
//! Serves the two read endpoints the client uses from an embedded fixture
//! set, with the provider's quirks: misses and bad tokens are reported
//! in-band with a 200, while an unknown id is a 404 with an empty object.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::net::TcpListener;
use tracing::debug;

/// Token accepted by [`app`].
pub const DEFAULT_TOKEN: &str = "test-token";

const FIXTURES: &str = include_str!("../fixtures/heroes.json");

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Image {
    pub url: String,
}

/// A hero record in wire shape. Only the fields the server matches on are
/// typed; the remaining blocks are passed through untouched.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Hero {
    pub id: String,
    pub name: String,
    pub image: Image,
    #[serde(flatten)]
    pub blocks: Map<String, Value>,
}

#[derive(Clone)]
pub struct AppState {
    token: Arc<str>,
    heroes: Arc<Vec<Hero>>,
}

pub fn fixture_heroes() -> Vec<Hero> {
    serde_json::from_str(FIXTURES).expect("embedded hero fixtures are valid")
}

pub fn app() -> Router {
    app_with(DEFAULT_TOKEN, fixture_heroes())
}

pub fn app_with(token: &str, heroes: Vec<Hero>) -> Router {
    let state = AppState {
        token: Arc::from(token),
        heroes: Arc::new(heroes),
    };
    Router::new()
        .route("/{token}/search/{query}", get(search))
        .route("/{token}/{id}", get(lookup))
        .with_state(state)
}

pub async fn run(listener: TcpListener, token: &str) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(token, fixture_heroes())).await
}

fn in_band_error(message: &str) -> Json<Value> {
    Json(json!({ "response": "error", "error": message }))
}

async fn search(State(state): State<AppState>, Path((token, query)): Path<(String, String)>) -> Json<Value> {
    if token != *state.token {
        return in_band_error("access denied");
    }
    let needle = query.to_lowercase();
    let results: Vec<&Hero> = state
        .heroes
        .iter()
        .filter(|h| h.name.to_lowercase().contains(&needle))
        .collect();
    debug!(%query, hits = results.len(), "search");

    if results.is_empty() {
        return in_band_error("character with given name not found");
    }
    Json(json!({
        "response": "success",
        "results-for": query,
        "results": results,
    }))
}

async fn lookup(
    State(state): State<AppState>,
    Path((token, id)): Path<(String, String)>,
) -> (StatusCode, Json<Value>) {
    if token != *state.token {
        return (StatusCode::OK, in_band_error("access denied"));
    }
    let Some(hero) = state.heroes.iter().find(|h| h.id == id) else {
        debug!(%id, "lookup miss");
        return (StatusCode::NOT_FOUND, Json(json!({})));
    };
    let mut body = match serde_json::to_value(hero) {
        Ok(Value::Object(map)) => map,
        _ => return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({}))),
    };
    body.insert("response".to_string(), Value::from("success"));
    (StatusCode::OK, Json(Value::Object(body)))
}
