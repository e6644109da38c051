//! Query routing and retrieval context handlers

use super::resolve_top_k;
use crate::cli::output::*;
use crate::rag::route_query;
use crate::rag::RetrievalQuery;
use crate::rag::RetrievalService;
use crate::AppConfig;
use crate::Result;

/// Handle route command
pub async fn handle_route(message: String) -> Result<()> {
    let route = route_query(&message);
    print_info(&format!("\"{message}\" -> {route} retriever"));
    Ok(())
}

/// Handle context command
pub async fn handle_context(
    config: &AppConfig,
    message: String,
    top_k: Option<i64>,
    cart_items: Vec<String>,
    show_prompt: bool,
) -> Result<()> {
    let top_k = resolve_top_k(config, top_k)?;
    let service = RetrievalService::new(config);
    let retrieval = service
        .retrieve(&RetrievalQuery {
            message,
            cart_items,
            top_k,
        })
        .await?;

    print_info(&format!("Route: {}", retrieval.route));
    print_info(&format!(
        "Retrieved {} products, {} policy chunks",
        retrieval.products.len(),
        retrieval.policy.len()
    ));
    println!();

    if show_prompt {
        println!("{}", retrieval.prompt);
    } else if retrieval.context.is_empty() {
        print_warning("No context found for this message");
    } else {
        println!("{}", retrieval.context);
    }

    Ok(())
}
