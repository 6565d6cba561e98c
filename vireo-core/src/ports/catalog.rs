use async_trait::async_trait;
use vireo_model::{
    GroupedCandidate, LatestQueryParams, MediaNode, NodeId, User,
};

use crate::error::Result;

/// Hierarchical media catalog.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn get_root_folder(&self) -> Result<MediaNode>;

    async fn get_by_id(&self, id: NodeId) -> Result<Option<MediaNode>>;

    /// Intro videos to play before `node` for `user`, in play order.
    async fn get_intros(
        &self,
        node: &MediaNode,
        user: &User,
    ) -> Result<Vec<MediaNode>>;

    /// Extras attached to `node`; every returned node carries an extra type.
    async fn get_extras(&self, node: &MediaNode) -> Result<Vec<MediaNode>>;

    /// Recently added items matching `params`, most recent first, already
    /// grouped and limited.
    async fn query_latest(
        &self,
        params: &LatestQueryParams,
    ) -> Result<Vec<GroupedCandidate>>;
}
