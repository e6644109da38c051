//! CLI output formatting utilities
//!
//! This module provides consistent output formatting for the `ShopRAG` CLI

use crate::config::AppConfig;
use crate::models::ProductRecord;
use crate::models::ScoreBreakdown;
use crate::models::ScoredResult;

/// Safely truncate a string at character boundary (not byte boundary)
///
/// This prevents panics when truncating strings with multi-byte UTF-8
/// characters such as Vietnamese diacritics.
#[must_use]
pub fn truncate_str(s: &str, max_chars: usize) -> String {
    if s.chars().count() > max_chars {
        let truncated: String = s.chars().take(max_chars).collect();
        format!("{truncated}...")
    } else {
        s.to_string()
    }
}

/// Print search header
pub fn print_search_header(query: &str, top_k: usize) {
    println!("🔍 Searching products for: \"{query}\" (top {top_k})");
    println!();
}

/// Print ranked search results
pub fn print_search_results(results: &[ScoredResult]) {
    if results.is_empty() {
        print_warning("No products scored above the threshold");
        return;
    }

    println!("Found {} products:", results.len());
    for (idx, result) in results.iter().enumerate() {
        println!();
        println!("  {}. {} (score: {:.4})", idx + 1, result.record.title, result.score);
        if let Some(price) = result.record.field_str("price") {
            println!("     💰 Price: {price}");
        }
        if let Some(url) = result.record.field_str("url") {
            println!("     🔗 URL: {url}");
        }
        if !result.record.content.is_empty() {
            println!("     📄 {}", truncate_str(&result.record.content, 100));
        }
    }
}

/// Print score components, highest blended score first
pub fn print_score_breakdown(products: &[ProductRecord], breakdown: &[ScoreBreakdown]) {
    let mut rows: Vec<&ScoreBreakdown> = breakdown.iter().collect();
    rows.sort_by(|a, b| b.score.total_cmp(&a.score));

    println!("{:>8} {:>8} {:>8}  Title", "score", "lexical", "fuzzy");
    for row in rows {
        println!(
            "{:>8.4} {:>8.4} {:>8.4}  {}",
            row.score,
            row.lexical,
            row.fuzzy,
            truncate_str(&products[row.index].title, 60)
        );
    }
}

/// Print product list
pub fn print_product_list(products: &[ProductRecord], limit: usize) {
    println!("📋 Catalog has {} products (showing {}):", products.len(), products.len().min(limit));
    for product in products.iter().take(limit) {
        println!(
            "  - {} | Price: {}",
            product.title,
            product.field_str("price").unwrap_or("N/A")
        );
    }
}

/// Print configuration information
pub fn print_config(config: &AppConfig) {
    println!("📋 ShopRAG Configuration:");
    println!();

    println!("📝 Logging:");
    println!("  Level: {}", config.logging.level);
    println!("  Backtrace: {}", config.logging.backtrace);
    println!("  File output: {}", config.logging.file_output);
    println!("  Log directory: {}", config.logging.log_dir.display());
    println!();

    println!("🛒 Catalog:");
    println!("  Path: {}", config.catalog_path().display());
    println!();

    println!("📜 Policy:");
    println!("  Path: {}", config.policy_path().display());
    println!("  Chunk size: {}", config.policy.chunk_size);
    println!("  Chunk overlap: {}", config.policy.chunk_overlap);
    println!("  Min words: {}", config.policy.min_words);
    println!("  Top k: {}", config.policy.top_k);
    println!();

    println!("🔍 Search:");
    println!("  Default top k: {}", config.default_top_k());
    println!("  Max context chars: {}", config.search.max_context_chars);
    println!();

    println!("🌐 Server:");
    println!("  Bind address: {}", config.bind_address());
    println!("  CORS: {}", config.server.cors);
    println!();

    println!("🤖 LLM:");
    println!("  Model: {}", config.llm.model);
    println!("  Temperature: {}", config.llm.temperature);
}

pub fn print_info(msg: &str) {
    println!("ℹ️  {msg}");
}

pub fn print_success(msg: &str) {
    println!("✅ {msg}");
}

pub fn print_warning(msg: &str) {
    println!("⚠️  {msg}");
}

pub fn print_error(msg: &str) {
    eprintln!("❌ {msg}");
}
