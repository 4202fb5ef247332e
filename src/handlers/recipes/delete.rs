use axum::extract::Path;
use axum::http::StatusCode;

use crate::error::ApiError;
use crate::store::store;
use crate::uploads;

/// DELETE /api/recipes/:id - remove the record and its image file
pub async fn delete(Path(id): Path<String>) -> Result<StatusCode, ApiError> {
    let removed = store().remove(&id).await?;

    uploads::delete(&removed.image).await;

    tracing::info!(id = %removed.id, "recipe deleted");
    Ok(StatusCode::NO_CONTENT)
}
