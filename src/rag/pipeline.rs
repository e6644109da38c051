//! Retrieval pipeline: Route -> Retrieve -> Assemble prompt

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;
use serde::Serialize;
use tracing::debug;
use tracing::info;

use crate::catalog::load_catalog;
use crate::catalog::try_load_catalog;
use crate::config::AppConfig;
use crate::errors::Result;
use crate::models::ScoredResult;
use crate::rag::policy::PolicyChunk;
use crate::rag::policy::PolicyIndex;
use crate::rag::prompts::build_policy_prompt;
use crate::rag::prompts::build_sales_prompt;
use crate::rag::router::route_query;
use crate::rag::router::QueryRoute;
use crate::rag::ContextAssembler;
use crate::search::HybridProductIndex;
use crate::search::SharedIndex;

/// A chat message to retrieve context for
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetrievalQuery {
    pub message: String,
    #[serde(default)]
    pub cart_items: Vec<String>,
    pub top_k: usize,
}

/// Everything the chat layer needs to call the language model
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Retrieval {
    pub route: QueryRoute,
    pub products: Vec<ScoredResult>,
    pub policy: Vec<PolicyChunk>,
    pub context: String,
    pub prompt: String,
}

/// Retrieval service owned by the request-handling layer.
///
/// Cheap to clone; clones share the same index snapshot holder.
#[derive(Clone)]
pub struct RetrievalService {
    products: SharedIndex,
    policy: Arc<PolicyIndex>,
    context_assembler: Arc<ContextAssembler>,
}

impl RetrievalService {
    /// Load the catalog and policy document named in `config` and index them
    #[must_use]
    pub fn new(config: &AppConfig) -> Self {
        let index = HybridProductIndex::build(load_catalog(config.catalog_path()));
        let policy = PolicyIndex::load(config.policy_path(), &config.policy);
        Self::from_parts(
            index,
            policy,
            ContextAssembler::new(config.search.max_context_chars),
        )
    }

    /// Create from already built indexes
    #[must_use]
    pub fn from_parts(
        index: HybridProductIndex,
        policy: PolicyIndex,
        context_assembler: ContextAssembler,
    ) -> Self {
        Self {
            products: SharedIndex::new(index),
            policy: Arc::new(policy),
            context_assembler: Arc::new(context_assembler),
        }
    }

    /// Snapshot holder for the product index
    pub fn products(&self) -> &SharedIndex {
        &self.products
    }

    pub fn policy(&self) -> &PolicyIndex {
        &self.policy
    }

    /// Route `query.message` and gather context for it
    pub async fn retrieve(&self, query: &RetrievalQuery) -> Result<Retrieval> {
        let route = route_query(&query.message);
        info!("Processing {} query: {}", route, query.message);

        let retrieval = match route {
            QueryRoute::Product => {
                let index = self.products.snapshot().await;
                let products = index.search(&query.message, query.top_k)?;
                let context = self.context_assembler.assemble(&products);
                let prompt = build_sales_prompt(&context, &query.cart_items, &query.message);
                Retrieval {
                    route,
                    products,
                    policy: Vec::new(),
                    context,
                    prompt,
                }
            }
            QueryRoute::Policy => {
                let policy = self.policy.retrieve(&query.message);
                let context = self.context_assembler.assemble_policy(&policy);
                let prompt = build_policy_prompt(&context, &query.message);
                Retrieval {
                    route,
                    products: Vec::new(),
                    policy,
                    context,
                    prompt,
                }
            }
        };

        debug!(
            "Retrieved {} products, {} policy chunks, {} context chars",
            retrieval.products.len(),
            retrieval.policy.len(),
            retrieval.context.chars().count()
        );
        Ok(retrieval)
    }

    /// Rebuild the product index from `path` and swap it in.
    ///
    /// The live index is left untouched if the catalog cannot be read.
    pub async fn reload_catalog<P: AsRef<Path>>(&self, path: P) -> Result<usize> {
        let products = try_load_catalog(path)?;
        let index = tokio::task::spawn_blocking(move || HybridProductIndex::build(products))
            .await
            .map_err(|e| crate::ShopRagError::Custom(format!("Index rebuild failed: {e}")))?;
        let count = index.len();
        self.products.replace(index).await;
        Ok(count)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;
    use crate::config::PolicyConfig;
    use crate::logging::init_simple_logging;
    use crate::models::ProductRecord;

    fn service() -> RetrievalService {
        init_simple_logging();
        let index = HybridProductIndex::build(vec![
            ProductRecord::new("Giỏ Quà Tết Cao Cấp 2025", "quà tết cao cấp")
                .with_field("price", "649,000₫"),
            ProductRecord::new("Bánh Mì Hoa Cúc", "bánh mì mềm thơm"),
        ]);
        let policy = PolicyIndex::build(
            "Chính sách đổi trả: khách hàng được đổi trả sản phẩm trong vòng 7 ngày kể từ khi nhận hàng.",
            &PolicyConfig::default(),
        );
        RetrievalService::from_parts(index, policy, ContextAssembler::default())
    }

    fn query(message: &str) -> RetrievalQuery {
        RetrievalQuery {
            message: message.to_string(),
            cart_items: Vec::new(),
            top_k: 10,
        }
    }

    #[tokio::test]
    async fn test_product_route() {
        let retrieval = service().retrieve(&query("giỏ quà tết cao cấp")).await.unwrap();

        assert_eq!(retrieval.route, QueryRoute::Product);
        assert_eq!(retrieval.products[0].record.title, "Giỏ Quà Tết Cao Cấp 2025");
        assert!(retrieval.context.contains("Price: 649,000₫"));
        assert!(retrieval.prompt.contains(&retrieval.context));
        assert!(retrieval.policy.is_empty());
    }

    #[tokio::test]
    async fn test_policy_route() {
        let retrieval = service()
            .retrieve(&query("chính sách đổi trả như thế nào"))
            .await
            .unwrap();

        assert_eq!(retrieval.route, QueryRoute::Policy);
        assert!(retrieval.products.is_empty());
        assert_eq!(retrieval.policy.len(), 1);
        assert!(retrieval.context.contains("7 ngày"));
    }

    #[tokio::test]
    async fn test_invalid_top_k_is_reported() {
        let mut q = query("bánh mì");
        q.top_k = 0;
        let err = service().retrieve(&q).await.unwrap_err();
        assert!(err.is_client_error());
    }

    #[tokio::test]
    async fn test_reload_catalog_swaps_index() {
        let service = service();
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"title": "Trà Xanh Thái Nguyên", "content": "trà xanh"}}]"#).unwrap();

        let count = service.reload_catalog(file.path()).await.unwrap();
        assert_eq!(count, 1);

        let retrieval = service.retrieve(&query("trà xanh")).await.unwrap();
        assert_eq!(retrieval.products.len(), 1);
        assert_eq!(retrieval.products[0].record.title, "Trà Xanh Thái Nguyên");
    }

    #[tokio::test]
    async fn test_failed_reload_keeps_index() {
        let service = service();
        assert!(service.reload_catalog("/nonexistent/shoprag/data.json").await.is_err());
        assert_eq!(service.products().snapshot().await.len(), 2);
    }
}
