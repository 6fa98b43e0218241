/// Catalog generation: scan every category, number its products, and write the
/// JSON artifact.
///
/// A run either writes a complete catalog or leaves the previous file in place.
use std::fs::{File, Permissions};
use std::io::{self, ErrorKind, Write};
use std::path::Path;

use chrono::{DateTime, Utc};
use tracing::{info, warn};

use catalog_common::{Catalog, Category, Layout, Product};

use crate::config::{Config, MissingCategoryPolicy};
use crate::error::AppError;
use crate::scanner::{self, ProductSource};
use crate::templates;

/// Per-category product counts of one build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSummary {
    pub counts: Vec<(Category, usize)>,
    pub total: usize,
}

impl BuildSummary {
    pub fn count(&self, category: Category) -> usize {
        self.counts
            .iter()
            .find(|(c, _)| *c == category)
            .map_or(0, |(_, n)| *n)
    }
}

/// Generate the full product list. All products share `generated_at`.
pub fn build_catalog(config: &Config, generated_at: DateTime<Utc>) -> Result<Vec<Product>, AppError> {
    let mut products = Vec::new();

    for category in Category::ALL {
        let root = config.category_root(category);
        let sources = match scan_category(config, category, &root) {
            Ok(sources) => sources,
            Err(AppError::CategoryRoot { source, path, .. })
                if config.missing_category == MissingCategoryPolicy::Skip =>
            {
                warn!(%category, path, error = %source, "category root unavailable, skipping");
                Vec::new()
            }
            Err(e) => return Err(e),
        };

        let template = templates::template(category);
        products.extend(sources.into_iter().zip(1u32..).map(|(source, seq)| {
            template.product(category, seq, source.slug, source.images, generated_at)
        }));
    }

    Ok(products)
}

fn scan_category(config: &Config, category: Category, root: &Path) -> Result<Vec<ProductSource>, AppError> {
    match category.layout() {
        Layout::Directory => scanner::scan_directory_category(category, root),
        Layout::FlatFiles => scanner::scan_flat_category(category, root, config.fabric_names),
    }
}

/// Write `products` as pretty-printed JSON, replacing `path` atomically.
///
/// The new file keeps the permissions of the artifact it replaces; a first
/// write is world-readable (0644 on Unix).
pub fn write_catalog(products: &[Product], path: &Path) -> Result<(), AppError> {
    let write_err = |source: io::Error| AppError::Write {
        path: path.display().to_string(),
        source,
    };

    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent).map_err(write_err)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent).map_err(write_err)?;
    serde_json::to_writer_pretty(&mut tmp, products)
        .map_err(|e| write_err(io::Error::from(e)))?;
    tmp.flush().map_err(write_err)?;
    let permissions = artifact_permissions(path, tmp.as_file()).map_err(write_err)?;
    tmp.as_file().set_permissions(permissions).map_err(write_err)?;
    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}

fn artifact_permissions(path: &Path, tmp: &File) -> io::Result<Permissions> {
    match std::fs::metadata(path) {
        Ok(meta) => Ok(meta.permissions()),
        Err(e) if e.kind() == ErrorKind::NotFound => fresh_permissions(tmp),
        Err(e) => Err(e),
    }
}

#[cfg(unix)]
fn fresh_permissions(_tmp: &File) -> io::Result<Permissions> {
    use std::os::unix::fs::PermissionsExt;
    Ok(Permissions::from_mode(0o644))
}

#[cfg(not(unix))]
fn fresh_permissions(tmp: &File) -> io::Result<Permissions> {
    Ok(tmp.metadata()?.permissions())
}

/// Build, validate, and write the catalog described by `config`.
pub fn run(config: &Config, generated_at: DateTime<Utc>) -> Result<BuildSummary, AppError> {
    let products = build_catalog(config, generated_at)?;
    // Refuse to write anything the query side would reject on load.
    let catalog = Catalog::from_products(products)?;
    write_catalog(catalog.all(), &config.output_path)?;

    let summary = BuildSummary {
        counts: catalog.category_counts(),
        total: catalog.len(),
    };
    info!(
        total = summary.total,
        beds = summary.count(Category::Beds),
        couches = summary.count(Category::Couches),
        tables = summary.count(Category::Tables),
        fabrics = summary.count(Category::Fabrics),
        output = %config.output_path.display(),
        "catalog generated"
    );
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::fs;
    use std::path::PathBuf;

    use catalog_common::FolderMap;
    use chrono::TimeZone;
    use tempfile::TempDir;

    use crate::config::FabricNamePolicy;

    fn at(hour: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, hour, 0, 0).unwrap()
    }

    fn touch(dir: &Path, files: &[&str]) {
        fs::create_dir_all(dir).unwrap();
        for file in files {
            fs::write(dir.join(file), b"img").unwrap();
        }
    }

    /// Beds: alpha (2 jpg), beta (none), gamma (1 png); Couches under `Sofas`;
    /// Tables with one product; Fabrics 3, 1, 10.
    fn fixture_tree() -> TempDir {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path();
        touch(&root.join("Beds/alpha"), &["2.jpg", "1.jpg"]);
        touch(&root.join("Beds/beta"), &[]);
        touch(&root.join("Beds/gamma"), &["1.png"]);
        touch(&root.join("Sofas/Product10"), &["1.jpg"]);
        touch(&root.join("Sofas/Product2"), &["1.jpg", "2.jpg"]);
        touch(&root.join("Tables/Product1"), &["1.jpg"]);
        touch(&root.join("Fabrics"), &["3.jpg", "1.jpg", "10.jpg"]);
        tmp
    }

    fn config(root: &Path) -> Config {
        Config {
            images_root: root.to_path_buf(),
            output_path: root.join("out/products.json"),
            folders: FolderMap::default(),
            missing_category: MissingCategoryPolicy::Fail,
            fabric_names: FabricNamePolicy::Strict,
        }
    }

    fn ids_of(products: &[Product], category: Category) -> Vec<(String, String)> {
        products
            .iter()
            .filter(|p| p.category == category)
            .map(|p| (p.id.clone(), p.slug.clone()))
            .collect()
    }

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(a, b)| (a.to_string(), b.to_string()))
            .collect()
    }

    #[test]
    fn beds_scenario_skips_imageless_folder() {
        let tmp = fixture_tree();
        let products = build_catalog(&config(tmp.path()), at(0)).unwrap();

        assert_eq!(
            ids_of(&products, Category::Beds),
            pairs(&[("bed-001", "alpha"), ("bed-002", "gamma")])
        );
        let alpha = &products[0];
        assert_eq!(alpha.images, ["1.jpg", "2.jpg"]);
        assert_eq!(alpha.price, 7200);
        assert_eq!(alpha.name.en, "Luxury Bed 1");
    }

    #[test]
    fn fabrics_scenario_is_numeric() {
        let tmp = fixture_tree();
        let products = build_catalog(&config(tmp.path()), at(0)).unwrap();

        let fabrics: Vec<(&str, &str)> = products
            .iter()
            .filter(|p| p.category == Category::Fabrics)
            .map(|p| (p.id.as_str(), p.images[0].as_str()))
            .collect();
        assert_eq!(
            fabrics,
            [
                ("fabric-001", "1.jpg"),
                ("fabric-002", "3.jpg"),
                ("fabric-003", "10.jpg")
            ]
        );
        assert_eq!(
            ids_of(&products, Category::Fabrics)[2],
            ("fabric-003".to_string(), "fabric-3".to_string())
        );
    }

    #[test]
    fn couches_use_mapped_folder_and_numeric_order() {
        let tmp = fixture_tree();
        let products = build_catalog(&config(tmp.path()), at(0)).unwrap();
        assert_eq!(
            ids_of(&products, Category::Couches),
            pairs(&[("couch-001", "Product2"), ("couch-002", "Product10")])
        );
    }

    #[test]
    fn catalog_invariants_hold() {
        let tmp = fixture_tree();
        let products = build_catalog(&config(tmp.path()), at(0)).unwrap();

        assert!(products.iter().all(|p| !p.images.is_empty()));
        let ids: HashSet<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), products.len());

        for category in Category::ALL {
            let seqs: Vec<String> = products
                .iter()
                .filter(|p| p.category == category)
                .map(|p| p.id.rsplit('-').next().unwrap().to_string())
                .collect();
            let expected: Vec<String> = (1..=seqs.len()).map(|n| format!("{n:03}")).collect();
            assert_eq!(seqs, expected, "dense ids for {category}");
        }

        // category groups appear in display order
        let order: Vec<Category> = products.iter().map(|p| p.category).collect();
        let mut sorted = order.clone();
        sorted.sort();
        assert_eq!(order, sorted);
    }

    #[test]
    fn regeneration_differs_only_in_timestamp() {
        let tmp = fixture_tree();
        let cfg = config(tmp.path());
        let first = build_catalog(&cfg, at(1)).unwrap();
        let second = build_catalog(&cfg, at(2)).unwrap();

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_ne!(a.created_at, b.created_at);
            let mut b = b.clone();
            b.created_at = a.created_at;
            assert_eq!(*a, b);
        }
        assert_eq!(first, build_catalog(&cfg, at(1)).unwrap());
    }

    #[test]
    fn run_writes_loadable_artifact() {
        let tmp = fixture_tree();
        let cfg = config(tmp.path());
        let summary = run(&cfg, at(3)).unwrap();

        assert_eq!(summary.total, 8);
        assert_eq!(summary.count(Category::Beds), 2);
        assert_eq!(summary.count(Category::Couches), 2);
        assert_eq!(summary.count(Category::Tables), 1);
        assert_eq!(summary.count(Category::Fabrics), 3);

        let raw = fs::read_to_string(&cfg.output_path).unwrap();
        assert!(raw.starts_with("[\n  {"));
        assert!(raw.contains("\"createdAt\": \"2025-06-01T03:00:00.000Z\""));

        let catalog = Catalog::load(&cfg.output_path).unwrap();
        assert_eq!(catalog.len(), 8);
        assert_eq!(catalog.by_slug("gamma", Some(Category::Beds)).unwrap().id, "bed-002");
    }

    #[test]
    fn missing_root_fails_and_keeps_previous_artifact() {
        let tmp = fixture_tree();
        let cfg = config(tmp.path());
        run(&cfg, at(0)).unwrap();
        let before = fs::read(&cfg.output_path).unwrap();

        fs::remove_dir_all(tmp.path().join("Tables")).unwrap();
        let err = run(&cfg, at(5)).unwrap_err();
        assert!(matches!(
            err,
            AppError::CategoryRoot {
                category: Category::Tables,
                ..
            }
        ));
        assert_eq!(fs::read(&cfg.output_path).unwrap(), before);
    }

    #[test]
    fn missing_root_can_be_skipped() {
        let tmp = fixture_tree();
        fs::remove_dir_all(tmp.path().join("Sofas")).unwrap();
        let mut cfg = config(tmp.path());
        cfg.missing_category = MissingCategoryPolicy::Skip;

        let products = build_catalog(&cfg, at(0)).unwrap();
        assert!(ids_of(&products, Category::Couches).is_empty());
        assert_eq!(ids_of(&products, Category::Tables).len(), 1);
    }

    #[test]
    fn folder_overrides_redirect_scan() {
        let tmp = fixture_tree();
        fs::rename(tmp.path().join("Sofas"), tmp.path().join("Couches")).unwrap();
        let mut cfg = config(tmp.path());
        cfg.folders = FolderMap::with_overrides("Couches=Couches").unwrap();

        let products = build_catalog(&cfg, at(0)).unwrap();
        assert_eq!(ids_of(&products, Category::Couches).len(), 2);
    }

    #[test]
    fn write_creates_parent_directories() {
        let tmp = TempDir::new().unwrap();
        let path: PathBuf = tmp.path().join("nested/data/products.json");
        write_catalog(&[], &path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "[]");
    }

    #[cfg(unix)]
    #[test]
    fn rewrite_keeps_artifact_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let mode = |p: &Path| fs::metadata(p).unwrap().permissions().mode() & 0o777;

        let fresh = tmp.path().join("fresh/products.json");
        write_catalog(&[], &fresh).unwrap();
        assert_eq!(mode(&fresh), 0o644);

        let path = tmp.path().join("products.json");
        fs::write(&path, b"[]").unwrap();
        fs::set_permissions(&path, fs::Permissions::from_mode(0o640)).unwrap();
        write_catalog(&[], &path).unwrap();
        assert_eq!(mode(&path), 0o640);

        fs::set_permissions(&path, fs::Permissions::from_mode(0o644)).unwrap();
        write_catalog(&[], &path).unwrap();
        assert_eq!(mode(&path), 0o644);
    }
}
