//! File-backed recipe repository.
//!
//! The store owns the in-memory collection and a single persistence
//! operation: every mutation rewrites the complete JSON array, pretty
//! printed, to the data file. A mutex serializes each read-modify-write
//! cycle so concurrent requests cannot lose updates against each other.

use std::path::{Path, PathBuf};

use once_cell::sync::Lazy;
use thiserror::Error;
use tokio::sync::Mutex;

pub mod recipe;

pub use recipe::Recipe;

use crate::config::config;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("recipe not found")]
    NotFound,

    #[error("failed to serialize collection: {0}")]
    Serialize(#[from] serde_json::Error),

    #[error("failed to write collection: {0}")]
    Io(#[from] std::io::Error),
}

pub struct RecipeStore {
    data_file: PathBuf,
    recipes: Mutex<Vec<Recipe>>,
}

/// Fields applied to an existing recipe on update. `image` is `None` when the
/// caller supplied no replacement file, in which case the stored path stays.
#[derive(Debug)]
pub struct RecipeUpdate {
    pub title: String,
    pub tags: Vec<String>,
    pub image: Option<String>,
}

impl RecipeStore {
    /// Open the store against a data file, loading whatever collection it
    /// holds. A missing or unparseable file yields an empty collection
    /// rather than an error.
    pub fn open(data_file: impl Into<PathBuf>) -> Self {
        let data_file = data_file.into();
        let recipes = Self::load_collection(&data_file);
        Self {
            data_file,
            recipes: Mutex::new(recipes),
        }
    }

    fn load_collection(path: &Path) -> Vec<Recipe> {
        match std::fs::read_to_string(path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(recipes) => recipes,
                Err(e) => {
                    tracing::warn!("data file {} is not a valid collection, starting empty: {}", path.display(), e);
                    Vec::new()
                }
            },
            Err(e) => {
                tracing::warn!("could not read data file {}, starting empty: {}", path.display(), e);
                Vec::new()
            }
        }
    }

    async fn persist(&self, recipes: &[Recipe]) -> Result<(), StoreError> {
        let body = serde_json::to_vec_pretty(recipes)?;
        tokio::fs::write(&self.data_file, body).await?;
        Ok(())
    }

    /// Full collection in stored (insertion) order.
    pub async fn list(&self) -> Vec<Recipe> {
        self.recipes.lock().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<Recipe> {
        self.recipes.lock().await.iter().find(|r| r.id == id).cloned()
    }

    /// Append a new recipe and persist the collection.
    pub async fn insert(&self, recipe: Recipe) -> Result<(), StoreError> {
        let mut recipes = self.recipes.lock().await;
        recipes.push(recipe);
        self.persist(&recipes).await
    }

    /// Overwrite `title`, `tags` and (when supplied) `image` of the recipe
    /// with the given id, keeping its position, `id` and `created_at`.
    pub async fn update(&self, id: &str, changes: RecipeUpdate) -> Result<Recipe, StoreError> {
        let mut recipes = self.recipes.lock().await;
        let recipe = recipes
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;

        recipe.title = changes.title;
        recipe.tags = changes.tags;
        if let Some(image) = changes.image {
            recipe.image = image;
        }
        let updated = recipe.clone();

        self.persist(&recipes).await?;
        Ok(updated)
    }

    /// Remove the recipe with the given id, persist, and hand the removed
    /// record back so the caller can clean up its image file.
    pub async fn remove(&self, id: &str) -> Result<Recipe, StoreError> {
        let mut recipes = self.recipes.lock().await;
        let index = recipes
            .iter()
            .position(|r| r.id == id)
            .ok_or(StoreError::NotFound)?;

        let removed = recipes.remove(index);
        self.persist(&recipes).await?;
        Ok(removed)
    }
}

// Process-wide store over the configured data file
pub static STORE: Lazy<RecipeStore> = Lazy::new(|| RecipeStore::open(&config().storage.data_file));

pub fn store() -> &'static RecipeStore {
    &STORE
}
