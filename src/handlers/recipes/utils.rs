use axum::body::Bytes;
use axum::extract::multipart::{Multipart, MultipartError};
use axum::http::StatusCode;

use crate::error::ApiError;

/// Fields drained out of a recipe multipart submission. Everything is
/// optional here; each handler decides what it requires.
#[derive(Debug, Default)]
pub struct RecipeForm {
    pub title: Option<String>,
    pub tags: Option<String>,
    pub image: Option<UploadedImage>,
}

#[derive(Debug)]
pub struct UploadedImage {
    pub filename: String,
    pub bytes: Bytes,
}

/// Drain a multipart body into a [`RecipeForm`]. Unknown fields are ignored.
pub async fn read_form(mut multipart: Multipart) -> Result<RecipeForm, ApiError> {
    let mut form = RecipeForm::default();

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        match field.name() {
            Some("title") => form.title = Some(field.text().await.map_err(multipart_error)?),
            Some("tags") => form.tags = Some(field.text().await.map_err(multipart_error)?),
            Some("image") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(multipart_error)?;
                form.image = Some(UploadedImage { filename, bytes });
            }
            _ => {}
        }
    }

    Ok(form)
}

fn multipart_error(err: MultipartError) -> ApiError {
    // The body layer enforces the upload ceiling; surface its 413 as-is
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::PayloadTooLarge("Uploaded file is too large".to_string());
    }
    ApiError::bad_request(format!("Invalid multipart body: {}", err.body_text()))
}

/// Normalize the `tags` form field into a list of tag strings.
///
/// A JSON array is honored first, with non-string elements stringified;
/// anything else is treated as a comma-separated list with whitespace
/// trimmed and empty pieces dropped. An absent field means no tags.
pub fn parse_tags(raw: Option<&str>) -> Vec<String> {
    let Some(raw) = raw else {
        return Vec::new();
    };

    if let Ok(serde_json::Value::Array(items)) = serde_json::from_str::<serde_json::Value>(raw) {
        return items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::String(s) => s,
                other => other.to_string(),
            })
            .collect();
    }

    raw.split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(String::from)
        .collect()
}
