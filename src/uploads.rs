//! Image file lifecycle for the uploads directory.

use std::path::Path;

use uuid::Uuid;

use crate::config::config;

/// Public path prefix recipes reference their image under.
pub const PUBLIC_PREFIX: &str = "/uploads/";

/// Persist uploaded bytes under a fresh unique filename, keeping the
/// original extension. Returns the public `/uploads/<name>` path.
pub async fn save(original_filename: &str, bytes: &[u8]) -> std::io::Result<String> {
    let name = match Path::new(original_filename).extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{}.{}", Uuid::new_v4(), ext),
        None => Uuid::new_v4().to_string(),
    };

    let target = config().storage.upload_dir.join(&name);
    tokio::fs::write(&target, bytes).await?;

    Ok(format!("{}{}", PUBLIC_PREFIX, name))
}

/// Best-effort removal of the file a `/uploads/...` path points at. Failures
/// are logged and swallowed; they never change the outcome of the request
/// that triggered the cleanup.
pub async fn delete(image_path: &str) {
    // Only the basename is honored, so stored paths cannot escape the dir
    let Some(name) = Path::new(image_path).file_name() else {
        return;
    };
    let target = config().storage.upload_dir.join(name);

    if let Err(e) = tokio::fs::remove_file(&target).await {
        tracing::warn!("failed to delete image {}: {}", target.display(), e);
    }
}
