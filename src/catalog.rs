//! Product catalog loading

use std::path::Path;

use serde_json::Value;
use tracing::error;
use tracing::info;
use tracing::warn;

use crate::models::ProductRecord;
use crate::Result;
use crate::ShopRagError;

/// Load the catalog, degrading to an empty list on any file-level failure.
///
/// Entries that are not objects or have no string `title` are skipped.
pub fn load_catalog<P: AsRef<Path>>(path: P) -> Vec<ProductRecord> {
    let path = path.as_ref();
    match try_load_catalog(path) {
        Ok(products) => products,
        Err(e) => {
            error!("Error loading catalog {}: {}", path.display(), e);
            Vec::new()
        }
    }
}

/// Load the catalog, reporting unreadable files and non-array JSON.
pub fn try_load_catalog<P: AsRef<Path>>(path: P) -> Result<Vec<ProductRecord>> {
    let path = path.as_ref();
    let content = std::fs::read_to_string(path)?;
    let products = parse_catalog(&content)?;
    info!("Loaded {} products from {}", products.len(), path.display());
    Ok(products)
}

/// Parse a JSON array of product objects
pub fn parse_catalog(content: &str) -> Result<Vec<ProductRecord>> {
    let Value::Array(entries) = serde_json::from_str::<Value>(content)? else {
        return Err(ShopRagError::Custom(
            "catalog must be a JSON array of products".to_string(),
        ));
    };

    let total = entries.len();
    let products: Vec<ProductRecord> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(position, entry)| match serde_json::from_value(entry) {
            Ok(product) => Some(product),
            Err(e) => {
                warn!("Skipping catalog entry {}: {}", position, e);
                None
            }
        })
        .collect();

    if products.len() < total {
        warn!(
            "Skipped {} of {} catalog entries",
            total - products.len(),
            total
        );
    }
    Ok(products)
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn test_parse_catalog() {
        let products = parse_catalog(
            r#"[
                {"title": "Giỏ Quà Tết Cao Cấp 2025", "content": "quà tết", "price": "649,000₫"},
                {"title": "Bánh Mì"}
            ]"#,
        )
        .unwrap();

        assert_eq!(products.len(), 2);
        assert_eq!(products[0].field_str("price"), Some("649,000₫"));
        assert_eq!(products[1].content, "");
    }

    #[test]
    fn test_parse_catalog_skips_malformed_entries() {
        crate::logging::init_simple_logging();
        let products = parse_catalog(
            r#"[
                {"title": "Trà Xanh"},
                {"content": "no title"},
                {"title": 42},
                "not an object",
                {"title": "Cà Phê", "content": "rang xay"}
            ]"#,
        )
        .unwrap();

        let titles: Vec<&str> = products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Trà Xanh", "Cà Phê"]);
    }

    #[test]
    fn test_parse_catalog_rejects_non_array() {
        assert!(matches!(
            parse_catalog(r#"{"title": "Trà"}"#),
            Err(ShopRagError::Custom(_))
        ));
        assert!(matches!(parse_catalog("not json"), Err(ShopRagError::Json(_))));
    }

    #[test]
    fn test_load_catalog_missing_file_is_empty() {
        crate::logging::init_simple_logging();
        assert!(load_catalog("/nonexistent/shoprag/data.json").is_empty());
        assert!(matches!(
            try_load_catalog("/nonexistent/shoprag/data.json"),
            Err(ShopRagError::Io(_))
        ));
    }

    #[test]
    fn test_load_catalog_corrupt_file_is_empty() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[{{\"title\": ").unwrap();
        assert!(load_catalog(file.path()).is_empty());
    }

    #[test]
    fn test_load_catalog_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"title": "Nước Mắm Phú Quốc", "url": "/nuoc-mam"}}]"#).unwrap();

        let products = load_catalog(file.path());
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].field_str("url"), Some("/nuoc-mam"));
    }
}
