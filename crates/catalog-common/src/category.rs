//! Product categories, their storage folders, and image path resolution.
//!
//! A category's logical name is not always its folder name on disk (Couches
//! live under `Sofas`). Both the builder and the server resolve folders through
//! a [`FolderMap`] so the indirection stays configuration.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::CatalogError;
use crate::model::Product;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
pub enum Category {
    Beds,
    Couches,
    Tables,
    Fabrics,
}

/// How a category's products are laid out under its folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Layout {
    /// One subdirectory per product, holding that product's images.
    Directory,
    /// One image file per product, directly inside the category folder.
    FlatFiles,
}

impl Category {
    pub const ALL: [Category; 4] = [
        Category::Beds,
        Category::Couches,
        Category::Tables,
        Category::Fabrics,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Beds => "Beds",
            Category::Couches => "Couches",
            Category::Tables => "Tables",
            Category::Fabrics => "Fabrics",
        }
    }

    pub fn display_name(self) -> &'static str {
        self.as_str()
    }

    /// Prefix of product ids in this category, e.g. `bed` in `bed-003`.
    pub fn id_prefix(self) -> &'static str {
        match self {
            Category::Beds => "bed",
            Category::Couches => "couch",
            Category::Tables => "table",
            Category::Fabrics => "fabric",
        }
    }

    pub fn layout(self) -> Layout {
        match self {
            Category::Fabrics => Layout::FlatFiles,
            _ => Layout::Directory,
        }
    }

    /// Folder name used when no override is configured.
    pub fn default_folder(self) -> &'static str {
        match self {
            Category::Couches => "Sofas",
            other => other.as_str(),
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(name))
            .ok_or_else(|| CatalogError::UnknownCategory(name.to_string()))
    }
}

/// Category → physical folder mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FolderMap {
    folders: HashMap<Category, String>,
}

impl Default for FolderMap {
    fn default() -> Self {
        let folders = Category::ALL
            .into_iter()
            .map(|c| (c, c.default_folder().to_string()))
            .collect();
        Self { folders }
    }
}

impl FolderMap {
    /// Apply overrides of the form `Couches=Sofas,Beds=Beds` on top of the
    /// defaults. An empty string leaves the defaults untouched.
    pub fn with_overrides(spec: &str) -> Result<Self, CatalogError> {
        let mut map = Self::default();
        for pair in spec.split(',').map(str::trim).filter(|s| !s.is_empty()) {
            let (category, folder) = pair.split_once('=').ok_or_else(|| {
                CatalogError::FolderMapping(format!("expected Category=folder, got '{pair}'"))
            })?;
            let category: Category = category.parse()?;
            let folder = folder.trim().trim_matches('/');
            if folder.is_empty() {
                return Err(CatalogError::FolderMapping(format!(
                    "empty folder for category {category}"
                )));
            }
            map.folders.insert(category, folder.to_string());
        }
        Ok(map)
    }

    pub fn folder(&self, category: Category) -> &str {
        self.folders
            .get(&category)
            .map(String::as_str)
            .unwrap_or_else(|| category.default_folder())
    }
}

/// Resolves image filenames to display paths.
#[derive(Debug, Clone)]
pub struct ImageLocator {
    url_prefix: String,
    folders: FolderMap,
}

impl ImageLocator {
    pub fn new(url_prefix: &str, folders: FolderMap) -> Self {
        Self {
            url_prefix: url_prefix.trim_end_matches('/').to_string(),
            folders,
        }
    }

    pub fn folders(&self) -> &FolderMap {
        &self.folders
    }

    /// `{prefix}/{folder}/{slug}/{file}` for directory categories and
    /// `{prefix}/{folder}/{file}` for flat-file categories.
    pub fn image_path(&self, category: Category, slug: &str, file: &str) -> String {
        let folder = self.folders.folder(category);
        match category.layout() {
            Layout::Directory => format!("{}/{folder}/{slug}/{file}", self.url_prefix),
            Layout::FlatFiles => format!("{}/{folder}/{file}", self.url_prefix),
        }
    }

    pub fn image_paths(&self, product: &Product) -> Vec<String> {
        product
            .images
            .iter()
            .map(|file| self.image_path(product.category, &product.slug, file))
            .collect()
    }

    pub fn primary_image_path(&self, product: &Product) -> Option<String> {
        product
            .primary_image()
            .map(|file| self.image_path(product.category, &product.slug, file))
    }
}
