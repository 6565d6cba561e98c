use std::{any::type_name_of_val, fmt, sync::Arc};

use tracing::debug;
use vireo_model::{
    MediaNode, PersonalizationRecord, PersonalizationRecordView, SaveReason,
    User,
};

use crate::error::Result;
use crate::ports::PersonalizationStorage;

/// Read-modify-write access to favorite flags and ratings.
///
/// Callers must have authorized the (user, node) pair already; nothing here
/// checks visibility. Writes are unconditional, so concurrent updates to the
/// same record resolve as last writer wins.
#[derive(Clone)]
pub struct PersonalizationService {
    storage: Arc<dyn PersonalizationStorage>,
}

impl fmt::Debug for PersonalizationService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PersonalizationService")
            .field("storage", &type_name_of_val(self.storage.as_ref()))
            .finish()
    }
}

impl PersonalizationService {
    pub fn new(storage: Arc<dyn PersonalizationStorage>) -> Self {
        Self { storage }
    }

    pub async fn get_or_create(
        &self,
        user: &User,
        node: &MediaNode,
    ) -> Result<PersonalizationRecord> {
        self.storage.get(user.id, node.id).await
    }

    pub async fn user_data(
        &self,
        user: &User,
        node: &MediaNode,
    ) -> Result<PersonalizationRecordView> {
        Ok(self.get_or_create(user, node).await?.to_view(node.id))
    }

    pub async fn set_favorite(
        &self,
        user: &User,
        node: &MediaNode,
        is_favorite: bool,
    ) -> Result<PersonalizationRecordView> {
        self.update(user, node, |record| record.is_favorite = is_favorite)
            .await
    }

    /// `None` clears any previous like/dislike.
    pub async fn set_rating(
        &self,
        user: &User,
        node: &MediaNode,
        likes: Option<bool>,
    ) -> Result<PersonalizationRecordView> {
        self.update(user, node, |record| record.likes = likes).await
    }

    async fn update<F>(
        &self,
        user: &User,
        node: &MediaNode,
        mutate: F,
    ) -> Result<PersonalizationRecordView>
    where
        F: FnOnce(&mut PersonalizationRecord) + Send,
    {
        let mut record = self.get_or_create(user, node).await?;
        mutate(&mut record);

        self.storage
            .save(user.id, node.id, &record, SaveReason::UpdateUserRating)
            .await?;

        debug!(
            user_id = %user.id,
            item_id = %node.id,
            is_favorite = record.is_favorite,
            likes = ?record.likes,
            "personalization record saved"
        );

        Ok(record.to_view(node.id))
    }
}
