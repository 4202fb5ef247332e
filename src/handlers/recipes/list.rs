use axum::Json;

use crate::store::{store, Recipe};

/// GET /api/recipes - full collection in stored order
pub async fn list() -> Json<Vec<Recipe>> {
    Json(store().list().await)
}
