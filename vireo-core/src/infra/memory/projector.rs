use std::{any::type_name_of_val, fmt, sync::Arc};

use async_trait::async_trait;
use vireo_model::{ItemField, ItemView, MediaNode, User, ViewOptions};

use crate::error::Result;
use crate::ports::{PersonalizationStorage, Projector};

/// Builds [`ItemView`]s straight from the node, reading user data from the
/// personalization storage when the caller asks for it.
#[derive(Clone)]
pub struct DefaultProjector {
    personalization: Arc<dyn PersonalizationStorage>,
}

impl fmt::Debug for DefaultProjector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DefaultProjector")
            .field(
                "personalization",
                &type_name_of_val(self.personalization.as_ref()),
            )
            .finish()
    }
}

impl DefaultProjector {
    pub fn new(personalization: Arc<dyn PersonalizationStorage>) -> Self {
        Self { personalization }
    }
}

#[async_trait]
impl Projector for DefaultProjector {
    async fn to_view(
        &self,
        node: &MediaNode,
        options: &ViewOptions,
        user: &User,
        ancestor: Option<&MediaNode>,
    ) -> Result<ItemView> {
        let user_data = if options.enable_user_data {
            let record = self.personalization.get(user.id, node.id).await?;
            Some(record.to_view(node.id))
        } else {
            None
        };

        Ok(ItemView {
            id: node.id,
            name: node.name.clone(),
            kind: node.kind,
            is_folder: node.kind.is_folder(),
            overview: options
                .contains_field(ItemField::Overview)
                .then(|| node.overview.clone())
                .flatten(),
            parent_id: options
                .contains_field(ItemField::ParentId)
                .then_some(node.parent_id)
                .flatten(),
            ancestor_id: ancestor.map(|ancestor| ancestor.id),
            extra_type: node.extra_type,
            date_created: options
                .contains_field(ItemField::DateCreated)
                .then_some(node.created_at),
            has_primary_image: options
                .images_enabled()
                .then_some(node.has_primary_image),
            child_count: None,
            user_data,
        })
    }
}
