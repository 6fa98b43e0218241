/// Directory scanning for the catalog builder.
///
/// Layout under the images root:
/// - Directory categories: `{folder}/{slug}/{image}`; one product per subdirectory
/// - Flat-file categories: `{folder}/{n}.jpg`; one product per file
///
/// Only the category root listing can fail the scan. An unreadable product
/// folder counts as having no images and the product is dropped.
use std::cmp::Ordering;
use std::path::Path;

use regex::Regex;
use tracing::{debug, warn};

use catalog_common::model::is_image_file;
use catalog_common::Category;

use crate::config::FabricNamePolicy;
use crate::error::AppError;

const FABRIC_EXTENSION: &str = ".jpg";

/// One product discovered on disk, before sequence numbers are assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductSource {
    pub slug: String,
    pub images: Vec<String>,
}

/// Order in which a category's products are numbered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortRule {
    /// Plain string order of the folder name.
    Lexicographic,
    /// The integer following `Product` in the folder name, 0 when absent.
    ProductNumber,
}

pub fn sort_rule(category: Category) -> SortRule {
    match category {
        Category::Beds => SortRule::Lexicographic,
        _ => SortRule::ProductNumber,
    }
}

/// Scan a directory-per-product category. Folders without images are skipped.
pub fn scan_directory_category(
    category: Category,
    root: &Path,
) -> Result<Vec<ProductSource>, AppError> {
    let entries = std::fs::read_dir(root).map_err(|source| AppError::CategoryRoot {
        category,
        path: root.display().to_string(),
        source,
    })?;

    let mut sources = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AppError::CategoryRoot {
            category,
            path: root.display().to_string(),
            source,
        })?;
        let path = entry.path();
        if !path.is_dir() {
            continue;
        }
        let Some(slug) = entry.file_name().to_str().map(str::to_string) else {
            warn!(path = %path.display(), "skipping folder with non UTF-8 name");
            continue;
        };

        let images = list_images(&path);
        if images.is_empty() {
            debug!(%category, slug, "no images found, product skipped");
            continue;
        }
        sources.push(ProductSource { slug, images });
    }

    sort_sources(&mut sources, sort_rule(category));
    Ok(sources)
}

/// Image files directly inside `dir`, sorted. Listing errors yield no images.
pub fn list_images(dir: &Path) -> Vec<String> {
    let entries = match std::fs::read_dir(dir) {
        Ok(entries) => entries,
        Err(e) => {
            debug!(error = %e, path = %dir.display(), "cannot list product folder");
            return Vec::new();
        }
    };

    let mut images: Vec<String> = entries
        .filter_map(Result::ok)
        .filter(|entry| entry.path().is_file())
        .filter_map(|entry| entry.file_name().to_str().map(str::to_string))
        .filter(|name| is_image_file(name))
        .collect();
    images.sort();
    images
}

pub fn sort_sources(sources: &mut [ProductSource], rule: SortRule) {
    // Name order first so equal numeric keys stay deterministic.
    sources.sort_by(|a, b| a.slug.cmp(&b.slug));
    if rule == SortRule::ProductNumber {
        let number_re = Regex::new(r"^\s*([+-]?\d+)").expect("valid regex");
        sources.sort_by_key(|s| product_number(&number_re, &s.slug));
    }
}

/// The integer after the first `Product` in `name` (leading digits only), or 0.
fn product_number(number_re: &Regex, name: &str) -> i64 {
    let rest = name.replacen("Product", "", 1);
    number_re
        .captures(&rest)
        .and_then(|caps| caps[1].parse::<i64>().ok())
        .unwrap_or(0)
}

/// Scan the flat-file fabric folder: every `.jpg` directly inside is a product,
/// ordered by the number in its filename.
pub fn scan_flat_category(
    category: Category,
    root: &Path,
    policy: FabricNamePolicy,
) -> Result<Vec<ProductSource>, AppError> {
    let entries = std::fs::read_dir(root).map_err(|source| AppError::CategoryRoot {
        category,
        path: root.display().to_string(),
        source,
    })?;

    let mut files: Vec<(Option<String>, String)> = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|source| AppError::CategoryRoot {
            category,
            path: root.display().to_string(),
            source,
        })?;
        if !entry.path().is_file() {
            continue;
        }
        let Some(name) = entry.file_name().to_str().map(str::to_string) else {
            warn!(path = %entry.path().display(), "skipping fabric image with non UTF-8 name");
            continue;
        };
        if !name.ends_with(FABRIC_EXTENSION) {
            continue;
        }

        let number = numeric_stem(&name);
        if number.is_none() {
            match policy {
                FabricNamePolicy::Strict => return Err(AppError::NonNumericFabric { file: name }),
                FabricNamePolicy::Lenient => {
                    warn!(file = %name, "fabric image name is not numeric, ordering it last");
                }
            }
        }
        files.push((number, name));
    }

    files.sort_by(compare_fabrics);

    Ok(files
        .into_iter()
        .enumerate()
        .map(|(idx, (_, name))| ProductSource {
            slug: format!("fabric-{}", idx + 1),
            images: vec![name],
        })
        .collect())
}

/// The digits of an all-digit stem with leading zeros removed, so that values
/// of any length compare by length and then lexicographically.
fn numeric_stem(name: &str) -> Option<String> {
    let stem = name.strip_suffix(FABRIC_EXTENSION)?;
    if stem.is_empty() || !stem.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let digits = stem.trim_start_matches('0');
    Some(if digits.is_empty() { "0" } else { digits }.to_string())
}

fn compare_fabrics(a: &(Option<String>, String), b: &(Option<String>, String)) -> Ordering {
    match (&a.0, &b.0) {
        (Some(x), Some(y)) => x
            .len()
            .cmp(&y.len())
            .then_with(|| x.cmp(y))
            .then_with(|| a.1.cmp(&b.1)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.1.cmp(&b.1),
    }
}
