//! HTTP API routes

mod catalog_routes;
mod game_routes;

use axum::{
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::infrastructure::state::AppState;

/// Create all API routes
pub fn create_routes() -> Router<Arc<AppState>> {
    Router::new()
        // Catalog routes
        .route("/api/catalog/classes", get(catalog_routes::list_classes))
        .route("/api/catalog/paths", get(catalog_routes::list_paths))
        // Game routes
        .route("/api/screen", get(game_routes::get_screen))
        .route("/api/class", post(game_routes::select_class))
        .route("/api/path", post(game_routes::select_path))
        .route("/api/quest/submit", post(game_routes::submit_code))
        .route("/api/quest/next", post(game_routes::next_quest))
        .route("/api/quest-log", get(game_routes::quest_log))
        .route("/api/level-up/adjust", post(game_routes::adjust_attribute))
        .route("/api/level-up/confirm", post(game_routes::confirm_allocation))
}
