//! Catalog search handlers

use tracing::debug;

use super::resolve_top_k;
use crate::catalog::load_catalog;
use crate::cli::output::*;
use crate::search::HybridProductIndex;
use crate::AppConfig;
use crate::Result;

/// Handle product search
pub async fn handle_search(
    config: &AppConfig,
    query: String,
    top_k: Option<i64>,
    explain: bool,
    json: bool,
) -> Result<()> {
    let top_k = resolve_top_k(config, top_k)?;
    let index = build_index(config).await?;

    if index.is_empty() {
        print_warning(&format!(
            "Catalog at {} is empty or unreadable",
            config.catalog_path().display()
        ));
    }

    let results = index.search(&query, top_k)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
        return Ok(());
    }

    print_search_header(&query, top_k);
    print_search_results(&results);

    if explain {
        println!();
        print_info("Score breakdown (all products):");
        print_score_breakdown(index.products(), &index.explain(&query));
    }

    Ok(())
}

/// Handle product listing
pub async fn handle_list_products(config: &AppConfig, limit: usize) -> Result<()> {
    let path = config.catalog_path().to_path_buf();
    let products = tokio::task::spawn_blocking(move || load_catalog(path))
        .await
        .map_err(|e| crate::ShopRagError::Custom(e.to_string()))?;

    if products.is_empty() {
        print_warning("No products found");
        return Ok(());
    }

    print_product_list(&products, limit);
    Ok(())
}

/// Load the configured catalog and index it off the async runtime
pub(crate) async fn build_index(config: &AppConfig) -> Result<HybridProductIndex> {
    let path = config.catalog_path().to_path_buf();
    let index =
        tokio::task::spawn_blocking(move || HybridProductIndex::build(load_catalog(path)))
            .await
            .map_err(|e| crate::ShopRagError::Custom(format!("Index build failed: {e}")))?;
    debug!("Indexed {} products", index.len());
    Ok(index)
}
