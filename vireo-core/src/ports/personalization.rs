use async_trait::async_trait;
use vireo_model::{NodeId, PersonalizationRecord, SaveReason, UserId};

use crate::error::Result;

/// Durable store for per-(user, node) personalization records.
#[async_trait]
pub trait PersonalizationStorage: Send + Sync {
    /// Returns the default record when nothing has been saved yet.
    async fn get(
        &self,
        user_id: UserId,
        node_id: NodeId,
    ) -> Result<PersonalizationRecord>;

    /// Overwrites the whole record.
    async fn save(
        &self,
        user_id: UserId,
        node_id: NodeId,
        record: &PersonalizationRecord,
        reason: SaveReason,
    ) -> Result<()>;
}
