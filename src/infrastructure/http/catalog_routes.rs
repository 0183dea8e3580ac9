//! Static catalog routes

use axum::Json;

use crate::application::dto::{class_cards, path_cards, ClassCard, PathCard};

pub async fn list_classes() -> Json<Vec<ClassCard>> {
    Json(class_cards())
}

pub async fn list_paths() -> Json<Vec<PathCard>> {
    Json(path_cards())
}
