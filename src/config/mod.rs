use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub api: ApiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// JSON file holding the full recipe collection.
    pub data_file: PathBuf,
    /// Directory where uploaded image files land.
    pub upload_dir: PathBuf,
    /// Built frontend assets served on unmatched routes.
    pub frontend_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub max_upload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::defaults().with_env_overrides()
    }

    fn defaults() -> Self {
        Self {
            server: ServerConfig { port: 3000 },
            storage: StorageConfig {
                data_file: PathBuf::from("data/recipes.json"),
                upload_dir: PathBuf::from("public/uploads"),
                frontend_dir: PathBuf::from("dist"),
            },
            api: ApiConfig {
                max_upload_bytes: 5 * 1024 * 1024, // 5MB
            },
        }
    }

    fn with_env_overrides(mut self) -> Self {
        // RECIPE_API_PORT wins over the generic PORT used by most hosts
        if let Some(port) = env::var("RECIPE_API_PORT")
            .ok()
            .or_else(|| env::var("PORT").ok())
            .and_then(|s| s.parse::<u16>().ok())
        {
            self.server.port = port;
        }

        if let Ok(v) = env::var("RECIPE_DATA_FILE") {
            self.storage.data_file = PathBuf::from(v);
        }
        if let Ok(v) = env::var("RECIPE_UPLOAD_DIR") {
            self.storage.upload_dir = PathBuf::from(v);
        }
        if let Ok(v) = env::var("RECIPE_FRONTEND_DIR") {
            self.storage.frontend_dir = PathBuf::from(v);
        }

        self
    }

    /// Create the uploads directory and the data file's parent, and seed an
    /// empty collection file when none exists yet.
    pub fn bootstrap_storage(&self) -> std::io::Result<()> {
        std::fs::create_dir_all(&self.storage.upload_dir)?;
        if let Some(parent) = self.storage.data_file.parent() {
            std::fs::create_dir_all(parent)?;
        }
        if !self.storage.data_file.exists() {
            std::fs::write(&self.storage.data_file, "[]")?;
        }
        Ok(())
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::defaults();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.api.max_upload_bytes, 5 * 1024 * 1024);
        assert_eq!(config.storage.data_file, PathBuf::from("data/recipes.json"));
        assert_eq!(config.storage.upload_dir, PathBuf::from("public/uploads"));
    }

    #[test]
    fn test_bootstrap_storage_seeds_empty_collection() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = AppConfig::defaults();
        config.storage.data_file = dir.path().join("data/recipes.json");
        config.storage.upload_dir = dir.path().join("uploads");

        config.bootstrap_storage().unwrap();

        assert!(config.storage.upload_dir.is_dir());
        assert_eq!(std::fs::read_to_string(&config.storage.data_file).unwrap(), "[]");

        // A second bootstrap must not clobber existing data
        std::fs::write(&config.storage.data_file, "[{}]").unwrap();
        config.bootstrap_storage().unwrap();
        assert_eq!(std::fs::read_to_string(&config.storage.data_file).unwrap(), "[{}]");
    }
}
