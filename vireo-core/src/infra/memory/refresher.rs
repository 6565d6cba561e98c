use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;
use tracing::info;
use vireo_model::{MediaNode, NodeId};

use crate::error::{MediaError, Result};
use crate::infra::memory::InMemoryCatalog;
use crate::ports::{MetadataRefresher, RefreshOptions};

/// Refresher that stamps `last_refreshed_at` on the catalog node.
///
/// No provider is contacted. Every request is recorded, and the refresher
/// can be switched into a failing mode to exercise error paths.
#[derive(Debug, Clone)]
pub struct CatalogRefresher {
    catalog: Arc<InMemoryCatalog>,
    calls: Arc<Mutex<Vec<(NodeId, RefreshOptions)>>>,
    failing: Arc<AtomicBool>,
}

impl CatalogRefresher {
    pub fn new(catalog: Arc<InMemoryCatalog>) -> Self {
        Self {
            catalog,
            calls: Arc::default(),
            failing: Arc::default(),
        }
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Requests received so far, oldest first.
    pub async fn calls(&self) -> Vec<(NodeId, RefreshOptions)> {
        self.calls.lock().await.clone()
    }
}

#[async_trait]
impl MetadataRefresher for CatalogRefresher {
    async fn refresh(
        &self,
        node: &MediaNode,
        options: RefreshOptions,
    ) -> Result<()> {
        self.calls.lock().await.push((node.id, options));

        if self.failing.load(Ordering::SeqCst) {
            return Err(MediaError::Internal(format!(
                "metadata providers unavailable for {}",
                node.name
            )));
        }

        self.catalog.mark_refreshed(node.id, Utc::now())?;
        info!(
            item_id = %node.id,
            metadata_mode = %options.metadata_mode,
            force_save = options.force_save,
            "metadata refreshed"
        );
        Ok(())
    }
}
