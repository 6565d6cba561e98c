use std::fmt::{self, Display, Formatter};

use async_trait::async_trait;
use vireo_model::MediaNode;

use crate::error::Result;

/// How much of a node the metadata pipeline should re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefreshMode {
    /// Only fill in what is missing
    Default,
    /// Re-fetch everything from the providers
    FullRefresh,
}

impl Display for RefreshMode {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            RefreshMode::Default => write!(f, "default"),
            RefreshMode::FullRefresh => write!(f, "full_refresh"),
        }
    }
}

/// Options for a single refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshOptions {
    pub metadata_mode: RefreshMode,
    pub image_mode: RefreshMode,
    /// Persist the node even when nothing changed.
    pub force_save: bool,
}

impl RefreshOptions {
    pub fn full(force_save: bool) -> Self {
        Self {
            metadata_mode: RefreshMode::FullRefresh,
            image_mode: RefreshMode::FullRefresh,
            force_save,
        }
    }
}

/// Entry point into the metadata/image refresh pipeline.
#[async_trait]
pub trait MetadataRefresher: Send + Sync {
    /// Resolves once the refresh has finished.
    async fn refresh(
        &self,
        node: &MediaNode,
        options: RefreshOptions,
    ) -> Result<()>;
}
