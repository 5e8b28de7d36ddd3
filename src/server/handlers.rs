use axum::{
    extract::State,
    http::{header, StatusCode},
    response::{Html, IntoResponse, Json, Response},
};

use crate::app::{initialize, MapContext};
use crate::html_template::Asset;
use crate::legend::Legend;
use crate::settings::Settings;

use super::state::AppState;

fn embedded(name: &str, content_type: &'static str) -> Response {
    match Asset::get(name) {
        Some(file) => (
            [(header::CONTENT_TYPE, content_type)],
            file.data.into_owned(),
        )
            .into_response(),
        None => {
            tracing::error!("Embedded asset {} is missing", name);
            StatusCode::NOT_FOUND.into_response()
        }
    }
}

pub async fn index_html() -> Response {
    embedded("index.html", "text/html; charset=utf-8")
}

pub async fn style_css() -> Response {
    embedded("style.css", "text/css")
}

pub async fn script_js() -> Response {
    embedded("script.js", "application/javascript")
}

/// Fetches both feeds for this page view and returns the composed map.
/// Feed failures are reported inside the context, never as an HTTP error.
pub async fn get_map(State(state): State<AppState>) -> Json<MapContext> {
    let ctx = initialize(state.feeds.as_ref(), &state.settings).await;
    Json(ctx)
}

// Static legend fragment, no feed access
pub async fn get_legend() -> Html<String> {
    Html(Legend::new().html)
}

pub async fn get_settings(State(state): State<AppState>) -> Json<Settings> {
    Json((*state.settings).clone())
}

pub async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}
