use catalog_common::{CatalogError, Category};

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("config error: {0}")]
    Config(String),

    #[error("cannot list {category} root {path}: {source}")]
    CategoryRoot {
        category: Category,
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("fabric image '{file}' does not have a numeric name")]
    NonNumericFabric { file: String },

    #[error("failed to write catalog to {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Common(#[from] CatalogError),
}
