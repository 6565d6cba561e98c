use async_trait::async_trait;
use vireo_model::{ItemView, MediaNode, User, ViewOptions};

use crate::error::Result;

/// Builds the outward-facing view of a node for a user.
#[async_trait]
pub trait Projector: Send + Sync {
    /// `ancestor` is the node an extra or trailer was reached through.
    async fn to_view(
        &self,
        node: &MediaNode,
        options: &ViewOptions,
        user: &User,
        ancestor: Option<&MediaNode>,
    ) -> Result<ItemView>;
}
