/// MCP server over the product catalog.
///
/// Every tool is a read-only query against one snapshot loaded at startup.
/// Lookups that find nothing return `null` or an empty list; only malformed
/// input (blank ids, unknown category names) is reported as a tool error.
use std::collections::HashSet;
use std::sync::Arc;

use rmcp::{
    Json, ServerHandler,
    handler::server::router::tool::ToolRouter,
    handler::server::wrapper::Parameters,
    model::*,
    tool, tool_handler, tool_router,
};
use tracing::debug;

use catalog_common::mcp_api::{
    CategoriesResponse, CategoryInfo, CategoryListResponse, FavoriteProductsParams,
    FeaturedProductsParams, GetProductBySlugParams, GetProductParams, ListCategoryParams,
    ProductDetail, ProductListResponse, ProductLookupResponse, RelatedProductsParams,
    SearchProductsParams,
};
use catalog_common::query::{DEFAULT_FEATURED_LIMIT, DEFAULT_RELATED_LIMIT};
use catalog_common::{Catalog, Category, ImageLocator, Product};

const MAX_LIMIT: usize = 50;

#[derive(Clone)]
pub struct CatalogServer {
    catalog: Arc<Catalog>,
    locator: Arc<ImageLocator>,
    tool_router: ToolRouter<CatalogServer>,
}

impl CatalogServer {
    pub fn new(catalog: Arc<Catalog>, locator: ImageLocator) -> Self {
        Self {
            catalog,
            locator: Arc::new(locator),
            tool_router: Self::tool_router(),
        }
    }

    fn detail(&self, product: &Product) -> ProductDetail {
        ProductDetail::from_product(product, &self.locator)
    }

    fn details(&self, products: Vec<&Product>) -> Vec<ProductDetail> {
        products.into_iter().map(|p| self.detail(p)).collect()
    }

    fn category_info(&self, category: Category) -> CategoryInfo {
        CategoryInfo {
            key: category,
            display_name: category.display_name().to_string(),
            folder: self.locator.folders().folder(category).to_string(),
            product_count: self.catalog.by_category(category).len(),
        }
    }
}

#[tool_router]
impl CatalogServer {
    #[tool(description = "List every product in catalog order.")]
    async fn list_products(&self) -> Result<Json<ProductListResponse>, String> {
        Ok(Json(ProductListResponse {
            products: self.details(self.catalog.all().iter().collect()),
        }))
    }

    #[tool(description = "Get a product by ID (e.g. 'bed-003'). Returns null when no product has that ID.")]
    async fn get_product(
        &self,
        Parameters(params): Parameters<GetProductParams>,
    ) -> Result<Json<ProductLookupResponse>, String> {
        let product_id = params.product_id.trim();
        if product_id.is_empty() {
            return Err("product_id must not be empty".to_string());
        }

        Ok(Json(ProductLookupResponse {
            product: self.catalog.by_id(product_id).map(|p| self.detail(p)),
        }))
    }

    #[tool(description = "Get a product by slug, optionally scoped to a category. Returns null when nothing matches.")]
    async fn get_product_by_slug(
        &self,
        Parameters(params): Parameters<GetProductBySlugParams>,
    ) -> Result<Json<ProductLookupResponse>, String> {
        let slug = params.slug.trim();
        if slug.is_empty() {
            return Err("slug must not be empty".to_string());
        }
        let category = params.category.as_deref().map(parse_category).transpose()?;

        Ok(Json(ProductLookupResponse {
            product: self.catalog.by_slug(slug, category).map(|p| self.detail(p)),
        }))
    }

    #[tool(description = "List all products in a category (Beds, Couches, Tables, Fabrics).")]
    async fn list_category(
        &self,
        Parameters(params): Parameters<ListCategoryParams>,
    ) -> Result<Json<CategoryListResponse>, String> {
        let category = parse_category(&params.category)?;

        Ok(Json(CategoryListResponse {
            category: self.category_info(category),
            products: self.details(self.catalog.by_category(category)),
        }))
    }

    #[tool(description = "List the categories with their image folders and product counts.")]
    async fn list_categories(&self) -> Result<Json<CategoriesResponse>, String> {
        Ok(Json(CategoriesResponse {
            categories: Category::ALL
                .into_iter()
                .map(|c| self.category_info(c))
                .collect(),
        }))
    }

    #[tool(description = "Search products by name. Matches the English name case-insensitively or the Hebrew name as typed. A blank query returns no products.")]
    async fn search_products(
        &self,
        Parameters(params): Parameters<SearchProductsParams>,
    ) -> Result<Json<ProductListResponse>, String> {
        let hits = self.catalog.search(&params.query);
        debug!(query = %params.query, hits = hits.len(), "search");
        Ok(Json(ProductListResponse {
            products: self.details(hits),
        }))
    }

    #[tool(description = "Newest products first (default 4, max 50).")]
    async fn featured_products(
        &self,
        Parameters(params): Parameters<FeaturedProductsParams>,
    ) -> Result<Json<ProductListResponse>, String> {
        let limit = clamp_limit(params.limit, DEFAULT_FEATURED_LIMIT);
        Ok(Json(ProductListResponse {
            products: self.details(self.catalog.featured(limit)),
        }))
    }

    #[tool(description = "Other products from the same category as the given product (default 4, max 50). Empty for an unknown product ID.")]
    async fn related_products(
        &self,
        Parameters(params): Parameters<RelatedProductsParams>,
    ) -> Result<Json<ProductListResponse>, String> {
        let product_id = params.product_id.trim();
        if product_id.is_empty() {
            return Err("product_id must not be empty".to_string());
        }
        let limit = clamp_limit(params.limit, DEFAULT_RELATED_LIMIT);

        Ok(Json(ProductListResponse {
            products: self.details(self.catalog.related(product_id, limit)),
        }))
    }

    #[tool(description = "Resolve a list of favorite product IDs to products, in catalog order. Unknown IDs are ignored.")]
    async fn favorite_products(
        &self,
        Parameters(params): Parameters<FavoriteProductsParams>,
    ) -> Result<Json<ProductListResponse>, String> {
        let ids: HashSet<String> = params
            .product_ids
            .into_iter()
            .map(|id| id.trim().to_string())
            .collect();

        Ok(Json(ProductListResponse {
            products: self.details(self.catalog.favorites(&ids)),
        }))
    }
}

fn parse_category(raw: &str) -> Result<Category, String> {
    raw.parse::<Category>().map_err(|_| {
        let available: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
        format!(
            "unknown category: '{}'. Available categories: {}",
            raw.trim(),
            available.join(", ")
        )
    })
}

fn clamp_limit(limit: Option<u32>, default: usize) -> usize {
    limit.map_or(default, |l| l as usize).min(MAX_LIMIT)
}

#[tool_handler]
impl ServerHandler for CatalogServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2025_06_18,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "catalog-server".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Furniture catalog MCP server. Read-only access to the generated product \
                 catalog (Beds, Couches, Tables, Fabrics) with English and Hebrew names. Use \
                 list_category for category pages, get_product_by_slug plus related_products \
                 for detail pages, favorite_products to resolve a saved ID list, \
                 search_products for name search and featured_products for the newest items."
                    .to_string(),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_common::{Dimensions, FolderMap, LocalizedText};
    use chrono::{TimeZone, Utc};

    fn product(category: Category, seq: u32, slug: &str, en: &str, he: &str) -> Product {
        Product {
            id: format!("{}-{seq:03}", category.id_prefix()),
            slug: slug.to_string(),
            category,
            name: LocalizedText::new(en, he),
            short_description: LocalizedText::new("short", "קצר"),
            full_description: LocalizedText::new("full", "מלא"),
            dimensions: Dimensions {
                width: 220,
                height: 85,
                depth: 95,
            },
            materials: vec!["Premium fabric".into()],
            price: 8000 + 150 * seq,
            images: vec!["1.jpg".to_string(), "2.jpg".to_string()],
            created_at: Utc.with_ymd_and_hms(2025, 1, seq, 0, 0, 0).unwrap(),
        }
    }

    fn server() -> CatalogServer {
        let catalog = Catalog::from_products(vec![
            product(Category::Couches, 1, "Product1", "Premium Sofa 1", "ספה יוקרתית 1"),
            product(Category::Couches, 2, "Product2", "Premium Sofa 2", "ספה יוקרתית 2"),
            product(Category::Beds, 1, "alpha", "Luxury Bed 1", "מיטה יוקרתית 1"),
        ])
        .expect("valid catalog");
        CatalogServer::new(Arc::new(catalog), ImageLocator::new("/Images", FolderMap::default()))
    }

    #[test]
    fn tools_publish_output_schemas() {
        let tools = CatalogServer::tool_router().list_all();
        for name in [
            "list_products",
            "get_product",
            "get_product_by_slug",
            "list_category",
            "list_categories",
            "search_products",
            "featured_products",
            "related_products",
            "favorite_products",
        ] {
            let tool = tools
                .iter()
                .find(|t| t.name == name)
                .unwrap_or_else(|| panic!("missing tool: {name}"));
            assert!(
                tool.output_schema.is_some(),
                "tool {name} should publish output_schema"
            );
        }
    }

    #[test]
    fn category_names_are_validated() {
        assert_eq!(parse_category("couches"), Ok(Category::Couches));
        let err = parse_category("Chairs").unwrap_err();
        assert!(err.contains("Beds, Couches, Tables, Fabrics"));
    }

    #[test]
    fn limits_default_and_cap() {
        assert_eq!(clamp_limit(None, 4), 4);
        assert_eq!(clamp_limit(Some(0), 4), 0);
        assert_eq!(clamp_limit(Some(500), 4), MAX_LIMIT);
    }

    #[tokio::test]
    async fn missing_product_is_null_not_error() {
        let server = server();
        let Json(found) = server
            .get_product(Parameters(GetProductParams {
                product_id: "couch-002".to_string(),
            }))
            .await
            .unwrap();
        let detail = found.product.expect("product present");
        assert_eq!(detail.image_paths[0], "/Images/Sofas/Product2/1.jpg");
        assert_eq!(detail.price_display, "8,300");

        let Json(missing) = server
            .get_product(Parameters(GetProductParams {
                product_id: "couch-404".to_string(),
            }))
            .await
            .unwrap();
        assert!(missing.product.is_none());
    }

    #[tokio::test]
    async fn detail_page_queries() {
        let server = server();
        let Json(found) = server
            .get_product_by_slug(Parameters(GetProductBySlugParams {
                slug: "Product1".to_string(),
                category: Some("Couches".to_string()),
            }))
            .await
            .unwrap();
        assert_eq!(found.product.unwrap().id, "couch-001");

        let Json(related) = server
            .related_products(Parameters(RelatedProductsParams {
                product_id: "couch-001".to_string(),
                limit: None,
            }))
            .await
            .unwrap();
        let ids: Vec<&str> = related.products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["couch-002"]);
    }

    #[tokio::test]
    async fn blank_search_returns_nothing() {
        let server = server();
        let Json(result) = server
            .search_products(Parameters(SearchProductsParams {
                query: "  ".to_string(),
            }))
            .await
            .unwrap();
        assert!(result.products.is_empty());
    }

    #[tokio::test]
    async fn categories_report_folders_and_counts() {
        let server = server();
        let Json(result) = server.list_categories().await.unwrap();
        let couches = result
            .categories
            .iter()
            .find(|c| c.key == Category::Couches)
            .unwrap();
        assert_eq!(couches.folder, "Sofas");
        assert_eq!(couches.product_count, 2);
    }
}
