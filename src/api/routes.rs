/*
 * Responsibility
 * - URL 構造を定義 (/health, /contents)
 * - middleware はここでは付けない (app.rs で Router 全体に適用)
 */
use axum::{Router, routing::get};

use crate::api::handlers::{
    contents::{get_content, search_contents},
    health::health,
};
use crate::state::AppState;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        // The frontend requests `/contents/` with a trailing slash.
        .route("/contents", get(search_contents))
        .route("/contents/", get(search_contents))
        .route("/contents/{content_id}", get(get_content))
}
