pub mod category;
pub mod error;
pub mod locale;
pub mod mcp_api;
pub mod model;
pub mod query;

pub use category::{Category, FolderMap, ImageLocator, Layout};
pub use error::CatalogError;
pub use locale::{Direction, Locale, LocalizedText};
pub use model::{format_price, Dimensions, Material, Product};
pub use query::Catalog;
