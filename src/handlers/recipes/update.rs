use axum::extract::{Multipart, Path};
use axum::Json;

use crate::error::ApiError;
use crate::store::{store, Recipe, RecipeUpdate};
use crate::uploads;

use super::utils::{parse_tags, read_form};

/// PUT /api/recipes/:id - overwrite title/tags and optionally replace the
/// image. `id` and `createdAt` are never touched.
pub async fn update(Path(id): Path<String>, multipart: Multipart) -> Result<Json<Recipe>, ApiError> {
    let form = read_form(multipart).await?;

    // Unknown id wins over a missing title, matching the API contract
    let existing = store()
        .get(&id)
        .await
        .ok_or_else(|| ApiError::not_found("Recipe not found"))?;

    let Some(title) = form.title.filter(|t| !t.trim().is_empty()) else {
        return Err(ApiError::bad_request("Title is required"));
    };

    let image = match form.image {
        Some(image) => {
            // Old file removal is best-effort; the update proceeds either way
            uploads::delete(&existing.image).await;
            let path = uploads::save(&image.filename, &image.bytes).await.map_err(|e| {
                tracing::error!("failed to store replacement image: {}", e);
                ApiError::internal_server_error("Internal server error")
            })?;
            Some(path)
        }
        None => None,
    };

    let changes = RecipeUpdate {
        title,
        tags: parse_tags(form.tags.as_deref()),
        image,
    };
    let updated = store().update(&id, changes).await?;

    tracing::info!(id = %updated.id, "recipe updated");
    Ok(Json(updated))
}
