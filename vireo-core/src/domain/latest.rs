//! "Latest items" aggregation.
//!
//! The catalog returns recently added items already clustered by their
//! grouping container (series for episodes, album for tracks). This module
//! decides which node stands for each cluster and how many children it
//! collapses, then projects the result.

use std::{any::type_name_of_val, fmt, sync::Arc};

use tracing::debug;
use vireo_model::{
    GroupedCandidate, ItemView, LatestItemsQuery, LatestQueryParams,
    MediaNode, User, ViewOptions,
};

use crate::error::Result;
use crate::ports::{Catalog, Projector};

/// Played-state filter actually sent to the catalog.
///
/// An explicit caller value always wins. Without one, users who hide played
/// items get "unplayed only".
pub fn effective_played_filter(
    user: &User,
    requested: Option<bool>,
) -> Option<bool> {
    match requested {
        Some(explicit) => Some(explicit),
        None if user.preferences.hide_played_in_latest => Some(false),
        None => None,
    }
}

/// Representative node for a cluster plus the number of collapsed children.
///
/// The container is only used when it actually collapses something, or when
/// it is a music album: a folder holding one new item shows the item itself.
pub fn select_representative(candidate: &GroupedCandidate) -> (&MediaNode, u32) {
    match candidate.container() {
        Some(container)
            if candidate.len() > 1 || container.kind.is_music_album() =>
        {
            let child_count =
                u32::try_from(candidate.len()).unwrap_or(u32::MAX);
            (container, child_count)
        }
        _ => (candidate.first_member(), 0),
    }
}

/// Builds the latest-items view for a user.
#[derive(Clone)]
pub struct LatestItemsAggregator {
    catalog: Arc<dyn Catalog>,
    projector: Arc<dyn Projector>,
}

impl fmt::Debug for LatestItemsAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LatestItemsAggregator")
            .field("catalog", &type_name_of_val(self.catalog.as_ref()))
            .field("projector", &type_name_of_val(self.projector.as_ref()))
            .finish()
    }
}

impl LatestItemsAggregator {
    pub fn new(catalog: Arc<dyn Catalog>, projector: Arc<dyn Projector>) -> Self {
        Self { catalog, projector }
    }

    pub fn params_for(
        user: &User,
        query: &LatestItemsQuery,
    ) -> LatestQueryParams {
        LatestQueryParams {
            user_id: user.id,
            parent_id: query.parent_id,
            include_kinds: query.include_kinds.clone(),
            is_played: effective_played_filter(user, query.is_played),
            is_folder: query.is_folder,
            limit: query.limit,
            group_items: query.group_items,
        }
    }

    pub async fn get_latest(
        &self,
        user: &User,
        query: &LatestItemsQuery,
        options: &ViewOptions,
    ) -> Result<Vec<ItemView>> {
        let params = Self::params_for(user, query);
        let candidates = self.catalog.query_latest(&params).await?;

        debug!(
            user_id = %user.id,
            parent_id = ?params.parent_id,
            is_played = ?params.is_played,
            candidates = candidates.len(),
            "latest items candidates loaded"
        );

        let mut views = Vec::with_capacity(candidates.len());
        for candidate in &candidates {
            let (representative, child_count) =
                select_representative(candidate);
            let mut view = self
                .projector
                .to_view(representative, options, user, None)
                .await?;
            view.child_count = Some(child_count);
            views.push(view);
        }

        Ok(views)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vireo_model::{NodeKind, UserId, UserPreferences};

    fn tracks(count: usize) -> Vec<MediaNode> {
        (0..count)
            .map(|index| {
                MediaNode::new(format!("Track {index}"), NodeKind::Audio)
            })
            .collect()
    }

    #[test]
    fn album_with_many_tracks_collapses_to_album() {
        let album = MediaNode::new("X", NodeKind::MusicAlbum);
        let candidate =
            GroupedCandidate::new(Some(album.clone()), tracks(5)).unwrap();

        let (representative, child_count) = select_representative(&candidate);
        assert_eq!(representative, &album);
        assert_eq!(child_count, 5);
    }

    #[test]
    fn album_with_single_track_still_uses_album() {
        let album = MediaNode::new("X", NodeKind::MusicAlbum);
        let candidate =
            GroupedCandidate::new(Some(album.clone()), tracks(1)).unwrap();

        let (representative, child_count) = select_representative(&candidate);
        assert_eq!(representative, &album);
        assert_eq!(child_count, 1);
    }

    #[test]
    fn folder_with_single_item_shows_the_item() {
        let folder = MediaNode::new("Y", NodeKind::Folder);
        let movie = MediaNode::new("Heat", NodeKind::Movie);
        let candidate =
            GroupedCandidate::new(Some(folder), vec![movie.clone()]).unwrap();

        let (representative, child_count) = select_representative(&candidate);
        assert_eq!(representative, &movie);
        assert_eq!(child_count, 0);
    }

    #[test]
    fn series_with_several_episodes_collapses_to_series() {
        let series = MediaNode::new("Show", NodeKind::Series);
        let episodes = vec![
            MediaNode::new("E1", NodeKind::Episode),
            MediaNode::new("E2", NodeKind::Episode),
        ];
        let candidate =
            GroupedCandidate::new(Some(series.clone()), episodes).unwrap();

        assert_eq!(select_representative(&candidate), (&series, 2));
    }

    #[test]
    fn ungrouped_single_member_is_its_own_representative() {
        let movie = MediaNode::new("Heat", NodeKind::Movie);
        let candidate = GroupedCandidate::single(movie.clone());

        assert_eq!(select_representative(&candidate), (&movie, 0));
    }

    #[test]
    fn hide_played_preference_defaults_to_unplayed_only() {
        let user = User::new(UserId::new(), "alice").with_preferences(
            UserPreferences {
                hide_played_in_latest: true,
            },
        );
        assert_eq!(effective_played_filter(&user, None), Some(false));
        assert_eq!(effective_played_filter(&user, Some(true)), Some(true));

        let user = User::new(UserId::new(), "bob");
        assert_eq!(effective_played_filter(&user, None), None);
        assert_eq!(effective_played_filter(&user, Some(false)), Some(false));
    }

    #[test]
    fn params_carry_query_fields_through() {
        let user = User::new(UserId::new(), "alice");
        let scope = vireo_model::NodeId::new();
        let query = LatestItemsQuery::default()
            .in_scope(scope)
            .with_kinds([NodeKind::Episode])
            .with_limit(7)
            .with_grouping(false);

        let params = LatestItemsAggregator::params_for(&user, &query);
        assert_eq!(params.user_id, user.id);
        assert_eq!(params.parent_id, Some(scope));
        assert!(params.include_kinds.contains(&NodeKind::Episode));
        assert_eq!(params.limit, 7);
        assert!(!params.group_items);
    }
}
