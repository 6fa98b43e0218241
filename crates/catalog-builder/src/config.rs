use std::path::{Path, PathBuf};

use catalog_common::FolderMap;

use crate::error::AppError;

/// What to do when a category's root folder cannot be listed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MissingCategoryPolicy {
    /// Abort the build; the previous catalog file is left untouched.
    Fail,
    /// Log a warning and emit the category with no products.
    Skip,
}

/// How fabric filenames that are not plain integers are treated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FabricNamePolicy {
    /// Reject the build.
    Strict,
    /// Accept with a warning, ordered after all numeric names.
    Lenient,
}

/// Builder configuration loaded explicitly from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding one folder per category.
    pub images_root: PathBuf,
    /// Destination of the generated catalog JSON.
    pub output_path: PathBuf,
    pub folders: FolderMap,
    pub missing_category: MissingCategoryPolicy,
    pub fabric_names: FabricNamePolicy,
}

impl Config {
    /// Required:
    /// - `CATALOG_IMAGES_ROOT`: directory containing the category folders
    /// - `CATALOG_OUTPUT_PATH`: path of the JSON file to (re)write
    ///
    /// Optional:
    /// - `CATALOG_CATEGORY_FOLDERS`: overrides such as `Couches=Sofas,Beds=Beds`
    /// - `CATALOG_MISSING_CATEGORY`: `fail` (default) or `skip`
    /// - `CATALOG_FABRIC_NAMES`: `strict` (default) or `lenient`
    pub fn from_env() -> Result<Self, AppError> {
        let images_root = std::env::var("CATALOG_IMAGES_ROOT").map_err(|_| {
            AppError::Config("CATALOG_IMAGES_ROOT environment variable is required".to_string())
        })?;
        let output_path = std::env::var("CATALOG_OUTPUT_PATH").map_err(|_| {
            AppError::Config("CATALOG_OUTPUT_PATH environment variable is required".to_string())
        })?;

        let images_root = PathBuf::from(images_root);
        if !images_root.is_dir() {
            return Err(AppError::Config(format!(
                "images root is not a directory: {}",
                images_root.display()
            )));
        }

        let folders = match std::env::var("CATALOG_CATEGORY_FOLDERS") {
            Ok(spec) => FolderMap::with_overrides(&spec)?,
            Err(_) => FolderMap::default(),
        };

        let missing_category = match std::env::var("CATALOG_MISSING_CATEGORY").ok() {
            Some(raw) => parse_missing_category(&raw)?,
            None => MissingCategoryPolicy::Fail,
        };
        let fabric_names = match std::env::var("CATALOG_FABRIC_NAMES").ok() {
            Some(raw) => parse_fabric_names(&raw)?,
            None => FabricNamePolicy::Strict,
        };

        Ok(Self {
            images_root,
            output_path: PathBuf::from(output_path),
            folders,
            missing_category,
            fabric_names,
        })
    }

    pub fn category_root(&self, category: catalog_common::Category) -> PathBuf {
        Path::new(&self.images_root).join(self.folders.folder(category))
    }
}

fn parse_missing_category(raw: &str) -> Result<MissingCategoryPolicy, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "fail" => Ok(MissingCategoryPolicy::Fail),
        "skip" => Ok(MissingCategoryPolicy::Skip),
        other => Err(AppError::Config(format!(
            "CATALOG_MISSING_CATEGORY must be 'fail' or 'skip', got '{other}'"
        ))),
    }
}

fn parse_fabric_names(raw: &str) -> Result<FabricNamePolicy, AppError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "strict" => Ok(FabricNamePolicy::Strict),
        "lenient" => Ok(FabricNamePolicy::Lenient),
        other => Err(AppError::Config(format!(
            "CATALOG_FABRIC_NAMES must be 'strict' or 'lenient', got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policies_parse_case_insensitively() {
        assert_eq!(parse_missing_category("Skip").unwrap(), MissingCategoryPolicy::Skip);
        assert_eq!(parse_missing_category(" fail ").unwrap(), MissingCategoryPolicy::Fail);
        assert_eq!(parse_fabric_names("LENIENT").unwrap(), FabricNamePolicy::Lenient);
        assert!(parse_missing_category("ignore").is_err());
        assert!(parse_fabric_names("").is_err());
    }
}
