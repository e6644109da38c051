//! Swappable index snapshot for catalog refreshes

use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use super::HybridProductIndex;

/// Holder for the current index.
///
/// Readers take an `Arc` snapshot and query it without holding the lock;
/// a rebuild constructs a new index off to the side and swaps the pointer,
/// so a query never observes a half-built index.
#[derive(Debug, Clone, Default)]
pub struct SharedIndex {
    current: Arc<RwLock<Arc<HybridProductIndex>>>,
}

impl SharedIndex {
    pub fn new(index: HybridProductIndex) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(index))),
        }
    }

    /// Current index, stable for as long as the caller holds it
    pub async fn snapshot(&self) -> Arc<HybridProductIndex> {
        self.current.read().await.clone()
    }

    /// Install `index` and return the one it replaced
    pub async fn replace(&self, index: HybridProductIndex) -> Arc<HybridProductIndex> {
        let next = Arc::new(index);
        let mut current = self.current.write().await;
        info!(
            "Swapping product index: {} -> {} products",
            current.len(),
            next.len()
        );
        std::mem::replace(&mut *current, next)
    }
}
