use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted recipe record.
///
/// `id` and `created_at` are assigned once at creation and never change;
/// `image` is a public path under `/uploads/`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recipe {
    pub id: String,
    pub title: String,
    pub image: String,
    pub tags: Vec<String>,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

impl Recipe {
    pub fn new(title: String, image: String, tags: Vec<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title,
            image,
            tags,
            created_at: Utc::now(),
        }
    }
}
