use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::category::{Category, ImageLocator};
use crate::locale::LocalizedText;
use crate::model::{Dimensions, Material, Product};

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProductParams {
    /// Product ID such as "bed-003" or "fabric-012".
    pub product_id: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetProductBySlugParams {
    /// Product slug, e.g. the source folder name "Product4".
    pub slug: String,
    /// Category name (Beds, Couches, Tables, Fabrics). Recommended, since slugs
    /// are only unique within a category.
    pub category: Option<String>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ListCategoryParams {
    /// Category name: Beds, Couches, Tables or Fabrics.
    pub category: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct SearchProductsParams {
    /// Text to look for in the English (case-insensitive) or Hebrew product name.
    pub query: String,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FeaturedProductsParams {
    /// Maximum number of products to return (default: 4, max: 50).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct RelatedProductsParams {
    /// ID of the product currently being viewed.
    pub product_id: String,
    /// Maximum number of products to return (default: 4, max: 50).
    pub limit: Option<u32>,
}

#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct FavoriteProductsParams {
    /// Product IDs held by the caller's favorites store.
    pub product_ids: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProductDetail {
    pub id: String,
    pub slug: String,
    pub category: Category,
    pub name: LocalizedText,
    pub short_description: LocalizedText,
    pub full_description: LocalizedText,
    pub dimensions: Dimensions,
    pub materials: Vec<Material>,
    pub price: u32,
    /// Price formatted for display, e.g. "7,200".
    pub price_display: String,
    pub images: Vec<String>,
    /// Display paths for `images`, in the same order.
    pub image_paths: Vec<String>,
    /// ISO-8601 generation timestamp.
    pub created_at: String,
}

impl ProductDetail {
    pub fn from_product(product: &Product, locator: &ImageLocator) -> Self {
        Self {
            id: product.id.clone(),
            slug: product.slug.clone(),
            category: product.category,
            name: product.name.clone(),
            short_description: product.short_description.clone(),
            full_description: product.full_description.clone(),
            dimensions: product.dimensions,
            materials: product.materials.clone(),
            price: product.price,
            price_display: crate::model::format_price(product.price),
            images: product.images.clone(),
            image_paths: locator.image_paths(product),
            created_at: product
                .created_at
                .to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProductLookupResponse {
    /// `null` when no product matches.
    pub product: Option<ProductDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProductListResponse {
    pub products: Vec<ProductDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryInfo {
    pub key: Category,
    pub display_name: String,
    /// Folder the category's images are stored under.
    pub folder: String,
    pub product_count: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoryListResponse {
    pub category: CategoryInfo,
    pub products: Vec<ProductDetail>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CategoriesResponse {
    pub categories: Vec<CategoryInfo>,
}
