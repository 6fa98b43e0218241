//! Fixed per-category product templates.
//!
//! Generated products are not authored: names carry the per-category sequence
//! number, and price grows linearly with it.

use chrono::{DateTime, Utc};

use catalog_common::{Category, Dimensions, LocalizedText, Material, Product};

pub struct CategoryTemplate {
    pub name_en: &'static str,
    pub name_he: &'static str,
    pub short_en: &'static str,
    pub short_he: &'static str,
    pub full_en: &'static str,
    pub full_he: &'static str,
    pub dimensions: Dimensions,
    pub materials: [&'static str; 3],
    pub base_price: u32,
    pub price_step: u32,
}

const BEDS: CategoryTemplate = CategoryTemplate {
    name_en: "Luxury Bed",
    name_he: "מיטה יוקרתית",
    short_en: "Premium quality bed with elegant design.",
    short_he: "מיטה באיכות יוקרתית עם עיצוב אלגנטי.",
    full_en: "This luxury bed combines comfort and style in perfect harmony. Crafted with premium materials and attention to detail.",
    full_he: "מיטה יוקרתית זו משלבת נוחות וסטייל בהרמוניה מושלמת. מעוצבת מחומרים יוקרתיים ותשומת לב לפרטים.",
    dimensions: Dimensions {
        width: 200,
        height: 120,
        depth: 220,
    },
    materials: ["Premium fabric", "Solid wood frame", "High-density foam"],
    base_price: 7000,
    price_step: 200,
};

const COUCHES: CategoryTemplate = CategoryTemplate {
    name_en: "Premium Sofa",
    name_he: "ספה יוקרתית",
    short_en: "Elegant sofa with premium comfort.",
    short_he: "ספה אלגנטית עם נוחות יוקרתית.",
    full_en: "This premium sofa offers exceptional comfort and style. Perfect for any living space.",
    full_he: "ספה יוקרתית זו מציעה נוחות וסטייל יוצאי דופן. מושלמת לכל מרחב מגורים.",
    dimensions: Dimensions {
        width: 220,
        height: 85,
        depth: 95,
    },
    materials: ["Premium fabric", "High-resilience foam", "Solid wood frame"],
    base_price: 8000,
    price_step: 150,
};

const TABLES: CategoryTemplate = CategoryTemplate {
    name_en: "Elegant Table",
    name_he: "שולחן אלגנטי",
    short_en: "Beautiful table with elegant design.",
    short_he: "שולחן יפה עם עיצוב אלגנטי.",
    full_en: "This elegant table combines functionality with style. Perfect addition to any room.",
    full_he: "שולחן אלגנטי זה משלב פונקציונליות עם סטייל. תוספת מושלמת לכל חדר.",
    dimensions: Dimensions {
        width: 150,
        height: 75,
        depth: 80,
    },
    materials: ["Premium wood", "Protective finish", "Metal hardware"],
    base_price: 3500,
    price_step: 300,
};

const FABRICS: CategoryTemplate = CategoryTemplate {
    name_en: "Premium Fabric",
    name_he: "בד יוקרתי",
    short_en: "Luxurious fabric perfect for upholstery.",
    short_he: "בד יוקרתי מושלם לריפוד.",
    full_en: "High-quality fabric with excellent durability and comfort.",
    full_he: "בד באיכות גבוהה עם עמידות ונוחות מעולים.",
    dimensions: Dimensions {
        width: 140,
        height: 1,
        depth: 140,
    },
    materials: ["Premium fabric", "Stain-resistant", "High quality"],
    base_price: 300,
    price_step: 20,
};

pub fn template(category: Category) -> &'static CategoryTemplate {
    match category {
        Category::Beds => &BEDS,
        Category::Couches => &COUCHES,
        Category::Tables => &TABLES,
        Category::Fabrics => &FABRICS,
    }
}

impl CategoryTemplate {
    pub fn price(&self, seq: u32) -> u32 {
        self.base_price + self.price_step * seq
    }

    /// Build the product with sequence number `seq` (1-based) in `category`.
    pub fn product(
        &self,
        category: Category,
        seq: u32,
        slug: String,
        images: Vec<String>,
        created_at: DateTime<Utc>,
    ) -> Product {
        Product {
            id: format!("{}-{seq:03}", category.id_prefix()),
            slug,
            category,
            name: LocalizedText::new(
                format!("{} {seq}", self.name_en),
                format!("{} {seq}", self.name_he),
            ),
            short_description: LocalizedText::new(self.short_en, self.short_he),
            full_description: LocalizedText::new(self.full_en, self.full_he),
            dimensions: self.dimensions,
            materials: self.materials.iter().map(|&m| Material::from(m)).collect(),
            price: self.price(seq),
            images,
            created_at,
        }
    }
}
