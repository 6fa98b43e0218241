use std::path::{Path, PathBuf};

use catalog_common::{FolderMap, ImageLocator};

use crate::error::AppError;

const DEFAULT_IMAGE_URL_PREFIX: &str = "/Images";

/// Server configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Path to the generated catalog JSON.
    pub catalog_path: String,
    /// URL prefix prepended to resolved image paths (e.g. "/Images").
    pub image_url_prefix: String,
    pub folders: FolderMap,
    /// Serve MCP over TCP on this address instead of stdio.
    pub tcp_listen_addr: Option<String>,
}

impl Config {
    /// Required:
    /// - `CATALOG_PATH`: generated catalog file
    ///
    /// Optional:
    /// - `CATALOG_IMAGE_URL_PREFIX` (default: "/Images")
    /// - `CATALOG_CATEGORY_FOLDERS`: overrides such as `Couches=Sofas`
    /// - `MCP_TCP_LISTEN_ADDR`
    pub fn from_env() -> Result<Self, AppError> {
        let catalog_path = std::env::var("CATALOG_PATH").map_err(|_| {
            AppError::Config("CATALOG_PATH environment variable is required".to_string())
        })?;
        if !Path::new(&catalog_path).is_file() {
            return Err(AppError::Config(format!(
                "catalog file not found: {catalog_path}"
            )));
        }

        let folders = match std::env::var("CATALOG_CATEGORY_FOLDERS") {
            Ok(spec) => FolderMap::with_overrides(&spec)?,
            Err(_) => FolderMap::default(),
        };

        Ok(Self {
            catalog_path,
            image_url_prefix: std::env::var("CATALOG_IMAGE_URL_PREFIX")
                .unwrap_or_else(|_| DEFAULT_IMAGE_URL_PREFIX.to_string()),
            folders,
            tcp_listen_addr: std::env::var("MCP_TCP_LISTEN_ADDR").ok(),
        })
    }

    pub fn catalog_path(&self) -> PathBuf {
        Path::new(&self.catalog_path).to_path_buf()
    }

    pub fn image_locator(&self) -> ImageLocator {
        ImageLocator::new(&self.image_url_prefix, self.folders.clone())
    }
}
