use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::trace;
use vireo_model::{NodeId, PersonalizationRecord, SaveReason, UserId};

use crate::error::Result;
use crate::ports::PersonalizationStorage;

type RecordKey = (UserId, NodeId);

#[derive(Debug, Default)]
struct StorageState {
    records: HashMap<RecordKey, PersonalizationRecord>,
    reasons: HashMap<RecordKey, SaveReason>,
}

/// Personalization records kept in a map keyed by (user, node).
///
/// The reason of the last save is kept per key so callers can check which
/// writer touched a record.
#[derive(Clone, Debug, Default)]
pub struct InMemoryPersonalizationStorage {
    state: Arc<RwLock<StorageState>>,
}

impl InMemoryPersonalizationStorage {
    /// Pre-populated storage; every seeded record is tagged `Import`.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = (UserId, NodeId, PersonalizationRecord)>,
    {
        let mut state = StorageState::default();
        for (user_id, node_id, record) in records {
            state.records.insert((user_id, node_id), record);
            state.reasons.insert((user_id, node_id), SaveReason::Import);
        }
        Self {
            state: Arc::new(RwLock::new(state)),
        }
    }

    pub async fn last_reason(
        &self,
        user_id: UserId,
        node_id: NodeId,
    ) -> Option<SaveReason> {
        self.state
            .read()
            .await
            .reasons
            .get(&(user_id, node_id))
            .copied()
    }

    /// Whether anything was ever saved for the pair.
    pub async fn contains(&self, user_id: UserId, node_id: NodeId) -> bool {
        self.state
            .read()
            .await
            .records
            .contains_key(&(user_id, node_id))
    }

    pub async fn record_count(&self) -> usize {
        self.state.read().await.records.len()
    }
}

#[async_trait]
impl PersonalizationStorage for InMemoryPersonalizationStorage {
    async fn get(
        &self,
        user_id: UserId,
        node_id: NodeId,
    ) -> Result<PersonalizationRecord> {
        Ok(self
            .state
            .read()
            .await
            .records
            .get(&(user_id, node_id))
            .cloned()
            .unwrap_or_default())
    }

    async fn save(
        &self,
        user_id: UserId,
        node_id: NodeId,
        record: &PersonalizationRecord,
        reason: SaveReason,
    ) -> Result<()> {
        let mut state = self.state.write().await;
        state.records.insert((user_id, node_id), record.clone());
        state.reasons.insert((user_id, node_id), reason);
        trace!(%user_id, %node_id, %reason, "stored personalization record");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn save_overwrites_and_tracks_reason() {
        let storage = InMemoryPersonalizationStorage::default();
        let user = UserId::new();
        let node = NodeId::new();

        assert!(!storage.contains(user, node).await);
        assert_eq!(
            storage.get(user, node).await.unwrap(),
            PersonalizationRecord::default()
        );

        let record = PersonalizationRecord {
            is_favorite: true,
            ..PersonalizationRecord::default()
        };
        storage
            .save(user, node, &record, SaveReason::UpdateUserRating)
            .await
            .unwrap();

        assert_eq!(storage.get(user, node).await.unwrap(), record);
        assert_eq!(
            storage.last_reason(user, node).await,
            Some(SaveReason::UpdateUserRating)
        );
    }

    #[tokio::test]
    async fn seeded_records_are_tagged_as_imports() {
        let user = UserId::new();
        let node = NodeId::new();
        let storage = InMemoryPersonalizationStorage::from_records([(
            user,
            node,
            PersonalizationRecord {
                played: true,
                play_count: 1,
                ..PersonalizationRecord::default()
            },
        )]);

        assert_eq!(storage.record_count().await, 1);
        assert_eq!(
            storage.last_reason(user, node).await,
            Some(SaveReason::Import)
        );
        assert!(storage.get(user, node).await.unwrap().played);
    }
}
