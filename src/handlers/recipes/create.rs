use axum::extract::Multipart;
use axum::Json;

use crate::error::ApiError;
use crate::store::{store, Recipe};
use crate::uploads;

use super::utils::{parse_tags, read_form};

/// POST /api/recipes - create a recipe from a multipart submission
/// (`title` text, optional `tags` text, `image` file)
pub async fn create(multipart: Multipart) -> Result<Json<Recipe>, ApiError> {
    let form = read_form(multipart).await?;

    let title = form.title.filter(|t| !t.trim().is_empty());
    let (Some(title), Some(image)) = (title, form.image) else {
        return Err(ApiError::bad_request("Title and image are required"));
    };

    let image_path = uploads::save(&image.filename, &image.bytes).await.map_err(|e| {
        tracing::error!("failed to store uploaded image: {}", e);
        ApiError::internal_server_error("Internal server error")
    })?;

    let recipe = Recipe::new(title, image_path, parse_tags(form.tags.as_deref()));
    store().insert(recipe.clone()).await?;

    tracing::info!(id = %recipe.id, "recipe created");
    Ok(Json(recipe))
}
