/// Error types shared by the catalog crates.
///
/// These cover loading and validating a catalog snapshot and parsing the shared
/// configuration pieces (categories, folder mapping). Binary-specific errors are
/// defined in each crate and wrap `CatalogError` via `#[from]`.

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("catalog json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid catalog: {0}")]
    Invalid(String),

    #[error("unknown category: {0}")]
    UnknownCategory(String),

    #[error("invalid category folder mapping: {0}")]
    FolderMapping(String),
}
