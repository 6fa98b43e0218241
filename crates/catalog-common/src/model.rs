use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::category::Category;
use crate::locale::{Locale, LocalizedText};

/// Image extensions accepted for product images (case-sensitive).
pub const IMAGE_EXTENSIONS: [&str; 2] = [".jpg", ".png"];

/// A catalog product as stored in the generated JSON artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// `{prefix}-{NNN}`, e.g. "bed-003", "fabric-012"
    pub id: String,
    /// Source folder name, or `fabric-{n}` for flat-file fabrics
    pub slug: String,
    pub category: Category,
    pub name: LocalizedText,
    pub short_description: LocalizedText,
    pub full_description: LocalizedText,
    pub dimensions: Dimensions,
    pub materials: Vec<Material>,
    /// Whole shekels
    pub price: u32,
    /// Image filenames, sorted; the first one is the primary image
    pub images: Vec<String>,
    #[serde(with = "iso_millis")]
    pub created_at: DateTime<Utc>,
}

impl Product {
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }
}

/// Product dimensions in whole centimeters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Dimensions {
    pub width: u32,
    pub height: u32,
    pub depth: u32,
}

/// One entry of a product's material list.
///
/// Older catalogs store plain strings, newer ones store `{en, he}` pairs. Both
/// shapes are accepted per element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum Material {
    Plain(String),
    Localized(LocalizedText),
}

impl Material {
    pub fn text(&self, locale: Locale) -> &str {
        match self {
            Material::Plain(text) => text,
            Material::Localized(text) => text.get(locale),
        }
    }
}

impl From<&str> for Material {
    fn from(text: &str) -> Self {
        Material::Plain(text.to_string())
    }
}

/// Format a price with `,` thousands grouping and no decimals.
pub fn format_price(price: u32) -> String {
    let digits = price.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

pub fn is_image_file(name: &str) -> bool {
    IMAGE_EXTENSIONS.iter().any(|ext| name.ends_with(ext))
}

/// `createdAt` is written as UTC with millisecond precision and a `Z` suffix;
/// any RFC 3339 timestamp is accepted on read.
mod iso_millis {
    use chrono::{DateTime, SecondsFormat, Utc};
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_rfc3339_opts(SecondsFormat::Millis, true))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        let raw = String::deserialize(deserializer)?;
        DateTime::parse_from_rfc3339(&raw)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(serde::de::Error::custom)
    }
}
