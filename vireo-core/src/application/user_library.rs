//! Per-user library lookups: the entry point transports call into.
//!
//! Every single-item operation runs the same prefix: resolve the user,
//! resolve the node (nil id means the root folder), check visibility. Only
//! then does the operation-specific work happen. `get_item` is the one path
//! that may repair stale metadata before answering.

use chrono::Utc;
use tracing::{debug, instrument};
use vireo_model::{
    ExtraType, ItemView, LatestItemsQuery, MediaNode, NodeId,
    PersonalizationRecordView, QueryResult, User, UserId, ViewOptions,
};

use crate::application::unit_of_work::AppUnitOfWork;
use crate::domain::{
    LatestItemsAggregator, OnDemandRefreshPolicy, PersonalizationService,
    RefreshPolicyConfig, VisibilityGate,
};
use crate::error::{MediaError, Result};

/// Orchestrates lookups, personalization updates and latest-items views for
/// a requesting user.
#[derive(Debug, Clone)]
pub struct UserLibraryService {
    ports: AppUnitOfWork,
    gate: VisibilityGate,
    refresh: OnDemandRefreshPolicy,
    personalization: PersonalizationService,
    latest: LatestItemsAggregator,
}

impl UserLibraryService {
    pub fn new(ports: AppUnitOfWork, refresh_config: RefreshPolicyConfig) -> Self {
        let gate = VisibilityGate::new(ports.visibility.clone());
        let refresh =
            OnDemandRefreshPolicy::new(ports.refresher.clone(), refresh_config);
        let personalization =
            PersonalizationService::new(ports.personalization.clone());
        let latest = LatestItemsAggregator::new(
            ports.catalog.clone(),
            ports.projector.clone(),
        );

        Self {
            ports,
            gate,
            refresh,
            personalization,
            latest,
        }
    }

    pub fn ports(&self) -> &AppUnitOfWork {
        &self.ports
    }

    pub fn visibility(&self) -> &VisibilityGate {
        &self.gate
    }

    /// Fetch one item, repairing stale metadata first when needed.
    #[instrument(skip(self, options), fields(user_id = %user_id, item_id = %item_id))]
    pub async fn get_item(
        &self,
        user_id: UserId,
        item_id: NodeId,
        options: &ViewOptions,
    ) -> Result<ItemView> {
        let (user, node) = self.resolve_authorized(user_id, item_id).await?;

        let node = if self.refresh.refresh_if_stale(&node, Utc::now()).await? {
            // Re-read so the response carries the refreshed metadata.
            self.ports.catalog.get_by_id(node.id).await?.unwrap_or(node)
        } else {
            node
        };

        self.ports
            .projector
            .to_view(&node, options, &user, None)
            .await
    }

    #[instrument(skip(self, options), fields(user_id = %user_id))]
    pub async fn get_root_folder(
        &self,
        user_id: UserId,
        options: &ViewOptions,
    ) -> Result<ItemView> {
        let (user, root) =
            self.resolve_authorized(user_id, NodeId::nil()).await?;
        self.ports
            .projector
            .to_view(&root, options, &user, None)
            .await
    }

    #[instrument(skip(self, options), fields(user_id = %user_id, item_id = %item_id))]
    pub async fn get_intros(
        &self,
        user_id: UserId,
        item_id: NodeId,
        options: &ViewOptions,
    ) -> Result<QueryResult<ItemView>> {
        let (user, node) = self.resolve_authorized(user_id, item_id).await?;
        let intros = self.ports.catalog.get_intros(&node, &user).await?;

        let views = self.project_all(&intros, options, &user, None).await?;
        Ok(QueryResult::new(views))
    }

    #[instrument(skip(self), fields(user_id = %user_id, item_id = %item_id))]
    pub async fn set_favorite(
        &self,
        user_id: UserId,
        item_id: NodeId,
        is_favorite: bool,
    ) -> Result<PersonalizationRecordView> {
        let (user, node) = self.resolve_authorized(user_id, item_id).await?;
        self.personalization
            .set_favorite(&user, &node, is_favorite)
            .await
    }

    pub async fn mark_favorite(
        &self,
        user_id: UserId,
        item_id: NodeId,
    ) -> Result<PersonalizationRecordView> {
        self.set_favorite(user_id, item_id, true).await
    }

    pub async fn unmark_favorite(
        &self,
        user_id: UserId,
        item_id: NodeId,
    ) -> Result<PersonalizationRecordView> {
        self.set_favorite(user_id, item_id, false).await
    }

    #[instrument(skip(self), fields(user_id = %user_id, item_id = %item_id))]
    pub async fn set_rating(
        &self,
        user_id: UserId,
        item_id: NodeId,
        likes: bool,
    ) -> Result<PersonalizationRecordView> {
        let (user, node) = self.resolve_authorized(user_id, item_id).await?;
        self.personalization
            .set_rating(&user, &node, Some(likes))
            .await
    }

    /// Clears any like/dislike; the record then reads as never rated.
    #[instrument(skip(self), fields(user_id = %user_id, item_id = %item_id))]
    pub async fn delete_rating(
        &self,
        user_id: UserId,
        item_id: NodeId,
    ) -> Result<PersonalizationRecordView> {
        let (user, node) = self.resolve_authorized(user_id, item_id).await?;
        self.personalization.set_rating(&user, &node, None).await
    }

    /// Trailers stored with the item. Kinds that cannot own trailers yield
    /// an empty list.
    #[instrument(skip(self, options), fields(user_id = %user_id, item_id = %item_id))]
    pub async fn get_local_trailers(
        &self,
        user_id: UserId,
        item_id: NodeId,
        options: &ViewOptions,
    ) -> Result<Vec<ItemView>> {
        let (user, node) = self.resolve_authorized(user_id, item_id).await?;
        if !node.kind.supports_local_trailers() {
            debug!(kind = %node.kind, "kind has no local trailers");
            return Ok(Vec::new());
        }

        let trailers: Vec<MediaNode> = self
            .ports
            .catalog
            .get_extras(&node)
            .await?
            .into_iter()
            .filter(|extra| extra.extra_type == Some(ExtraType::Trailer))
            .collect();

        self.project_all(&trailers, options, &user, Some(&node))
            .await
    }

    #[instrument(skip(self, options), fields(user_id = %user_id, item_id = %item_id))]
    pub async fn get_special_features(
        &self,
        user_id: UserId,
        item_id: NodeId,
        options: &ViewOptions,
    ) -> Result<Vec<ItemView>> {
        let (user, node) = self.resolve_authorized(user_id, item_id).await?;

        let features: Vec<MediaNode> = self
            .ports
            .catalog
            .get_extras(&node)
            .await?
            .into_iter()
            .filter(|extra| {
                extra
                    .extra_type
                    .is_some_and(|extra_type| extra_type.is_special_feature())
            })
            .collect();

        self.project_all(&features, options, &user, Some(&node))
            .await
    }

    /// Recently added items for the user, with multi-item groups collapsed.
    #[instrument(skip(self, query, options), fields(user_id = %user_id, parent_id = ?query.parent_id))]
    pub async fn get_latest_media(
        &self,
        user_id: UserId,
        query: &LatestItemsQuery,
        options: &ViewOptions,
    ) -> Result<Vec<ItemView>> {
        if query.limit == 0 {
            return Err(MediaError::InvalidRequest(
                "limit must be greater than zero".into(),
            ));
        }

        let user = self.resolve_user(user_id).await?;
        if let Some(parent_id) = query.parent_id {
            let scope = self.resolve_node(parent_id).await?;
            self.gate.authorize(&user, &scope)?;
        }

        self.latest.get_latest(&user, query, options).await
    }

    async fn resolve_user(&self, user_id: UserId) -> Result<User> {
        self.ports
            .users
            .get_by_id(user_id)
            .await?
            .ok_or_else(|| MediaError::NotFound(format!("user {user_id}")))
    }

    async fn resolve_node(&self, item_id: NodeId) -> Result<MediaNode> {
        if item_id.is_nil() {
            return self.ports.catalog.get_root_folder().await;
        }

        self.ports
            .catalog
            .get_by_id(item_id)
            .await?
            .ok_or_else(|| MediaError::NotFound(format!("item {item_id}")))
    }

    async fn resolve_authorized(
        &self,
        user_id: UserId,
        item_id: NodeId,
    ) -> Result<(User, MediaNode)> {
        let user = self.resolve_user(user_id).await?;
        let node = self.resolve_node(item_id).await?;
        self.gate.authorize(&user, &node)?;
        Ok((user, node))
    }

    async fn project_all(
        &self,
        nodes: &[MediaNode],
        options: &ViewOptions,
        user: &User,
        ancestor: Option<&MediaNode>,
    ) -> Result<Vec<ItemView>> {
        let mut views = Vec::with_capacity(nodes.len());
        for node in nodes {
            views.push(
                self.ports
                    .projector
                    .to_view(node, options, user, ancestor)
                    .await?,
            );
        }
        Ok(views)
    }
}
