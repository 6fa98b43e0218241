//! Read-only query service over a loaded catalog snapshot.
//!
//! A [`Catalog`] is built once, validated, and never mutated afterwards. Every
//! lookup returns borrowed products; "not found" is an empty result.

use std::collections::{HashMap, HashSet};
use std::path::Path;

use tracing::debug;

use crate::category::Category;
use crate::error::CatalogError;
use crate::model::{is_image_file, Product};

/// Number of products the storefront shows as featured when no limit is given.
pub const DEFAULT_FEATURED_LIMIT: usize = 4;
/// Number of related products shown on a detail page when no limit is given.
pub const DEFAULT_RELATED_LIMIT: usize = 4;

#[derive(Debug)]
pub struct Catalog {
    products: Vec<Product>,
    by_id: HashMap<String, usize>,
}

impl Catalog {
    /// Load and validate the generated catalog file.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let content = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let catalog = Self::from_json(&content)?;
        debug!(path = %path.display(), products = catalog.len(), "catalog loaded");
        Ok(catalog)
    }

    pub fn from_json(content: &str) -> Result<Self, CatalogError> {
        let products: Vec<Product> = serde_json::from_str(content)?;
        Self::from_products(products)
    }

    pub fn from_products(products: Vec<Product>) -> Result<Self, CatalogError> {
        let by_id = build_index(&products)?;
        Ok(Self { products, by_id })
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products in catalog order.
    pub fn all(&self) -> &[Product] {
        &self.products
    }

    pub fn by_id(&self, id: &str) -> Option<&Product> {
        self.by_id.get(id).map(|&idx| &self.products[idx])
    }

    /// Look up a product by slug. Slugs are only unique within a category, so
    /// without a category the first match in catalog order wins.
    pub fn by_slug(&self, slug: &str, category: Option<Category>) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.slug == slug && category.map_or(true, |c| p.category == c))
    }

    pub fn by_category(&self, category: Category) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| p.category == category)
            .collect()
    }

    /// Case-insensitive match on the English name, or a plain substring match on
    /// the Hebrew name. A blank query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&Product> {
        if query.trim().is_empty() {
            return Vec::new();
        }
        let lower = query.to_lowercase();
        self.products
            .iter()
            .filter(|p| p.name.en.to_lowercase().contains(&lower) || p.name.he.contains(query))
            .collect()
    }

    /// Newest products first. Products with equal timestamps keep catalog order.
    pub fn featured(&self, limit: usize) -> Vec<&Product> {
        let mut products: Vec<&Product> = self.products.iter().collect();
        products.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        products.truncate(limit);
        products
    }

    /// Other products from the same category as `product_id`, in catalog order.
    pub fn related(&self, product_id: &str, limit: usize) -> Vec<&Product> {
        let Some(current) = self.by_id(product_id) else {
            return Vec::new();
        };
        self.products
            .iter()
            .filter(|p| p.category == current.category && p.id != current.id)
            .take(limit)
            .collect()
    }

    /// Products whose ids are in `ids`, in catalog order. Unknown ids are ignored.
    pub fn favorites(&self, ids: &HashSet<String>) -> Vec<&Product> {
        self.products
            .iter()
            .filter(|p| ids.contains(&p.id))
            .collect()
    }

    /// Product count for every category, including empty ones.
    pub fn category_counts(&self) -> Vec<(Category, usize)> {
        Category::ALL
            .into_iter()
            .map(|c| (c, self.products.iter().filter(|p| p.category == c).count()))
            .collect()
    }
}

fn build_index(products: &[Product]) -> Result<HashMap<String, usize>, CatalogError> {
    let mut by_id = HashMap::with_capacity(products.len());
    let mut slugs: HashSet<(Category, &str)> = HashSet::with_capacity(products.len());

    for (idx, product) in products.iter().enumerate() {
        validate_id(product)?;
        if product.images.is_empty() {
            return Err(CatalogError::Invalid(format!(
                "product {} has no images",
                product.id
            )));
        }
        if let Some(bad) = product.images.iter().find(|img| !is_image_file(img)) {
            return Err(CatalogError::Invalid(format!(
                "product {} references non-image file '{bad}'",
                product.id
            )));
        }
        let dims = product.dimensions;
        if dims.width == 0 || dims.height == 0 || dims.depth == 0 {
            return Err(CatalogError::Invalid(format!(
                "product {} has a zero dimension",
                product.id
            )));
        }
        if product.price == 0 {
            return Err(CatalogError::Invalid(format!(
                "product {} has no price",
                product.id
            )));
        }
        if !slugs.insert((product.category, product.slug.as_str())) {
            return Err(CatalogError::Invalid(format!(
                "duplicate slug '{}' in category {}",
                product.slug, product.category
            )));
        }
        if by_id.insert(product.id.clone(), idx).is_some() {
            return Err(CatalogError::Invalid(format!(
                "duplicate product id {}",
                product.id
            )));
        }
    }
    Ok(by_id)
}

fn validate_id(product: &Product) -> Result<(), CatalogError> {
    let prefix = product.category.id_prefix();
    let valid = product
        .id
        .strip_prefix(prefix)
        .and_then(|rest| rest.strip_prefix('-'))
        .is_some_and(|seq| seq.len() >= 3 && seq.chars().all(|c| c.is_ascii_digit()));
    if valid {
        Ok(())
    } else {
        Err(CatalogError::Invalid(format!(
            "product id '{}' does not match {prefix}-NNN for category {}",
            product.id, product.category
        )))
    }
}
