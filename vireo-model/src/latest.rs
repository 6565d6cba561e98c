//! Request and intermediate types for the "latest items" view.

use std::collections::BTreeSet;

use crate::error::ModelError;
use crate::ids::{NodeId, UserId};
use crate::node::{MediaNode, NodeKind};

pub const DEFAULT_LATEST_LIMIT: usize = 20;

/// Caller-facing request for the latest items in a scope.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LatestItemsQuery {
    /// Restrict to descendants of this node; `None` means the whole library.
    pub parent_id: Option<NodeId>,
    /// Empty set means every kind.
    pub include_kinds: BTreeSet<NodeKind>,
    /// `None` leaves the played state up to the user's preferences.
    pub is_played: Option<bool>,
    pub is_folder: Option<bool>,
    pub limit: usize,
    pub group_items: bool,
}

impl Default for LatestItemsQuery {
    fn default() -> Self {
        Self {
            parent_id: None,
            include_kinds: BTreeSet::new(),
            is_played: None,
            is_folder: None,
            limit: DEFAULT_LATEST_LIMIT,
            group_items: true,
        }
    }
}

impl LatestItemsQuery {
    pub fn in_scope(mut self, parent_id: NodeId) -> Self {
        self.parent_id = Some(parent_id);
        self
    }

    pub fn with_kinds<I>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = NodeKind>,
    {
        self.include_kinds = kinds.into_iter().collect();
        self
    }

    pub fn with_played(mut self, is_played: Option<bool>) -> Self {
        self.is_played = is_played;
        self
    }

    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_grouping(mut self, group_items: bool) -> Self {
        self.group_items = group_items;
        self
    }
}

/// Parameters handed to the catalog once the effective filters are known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LatestQueryParams {
    pub user_id: UserId,
    pub parent_id: Option<NodeId>,
    pub include_kinds: BTreeSet<NodeKind>,
    pub is_played: Option<bool>,
    pub is_folder: Option<bool>,
    pub limit: usize,
    pub group_items: bool,
}

/// A catalog-produced cluster of sibling nodes that may collapse into a
/// single entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupedCandidate {
    container: Option<MediaNode>,
    members: Vec<MediaNode>,
}

impl GroupedCandidate {
    /// Returns an error when `members` is empty.
    pub fn new(
        container: Option<MediaNode>,
        members: Vec<MediaNode>,
    ) -> Result<Self, ModelError> {
        if members.is_empty() {
            return Err(ModelError::EmptyGroup);
        }
        Ok(Self { container, members })
    }

    pub fn single(member: MediaNode) -> Self {
        Self {
            container: None,
            members: vec![member],
        }
    }

    pub fn container(&self) -> Option<&MediaNode> {
        self.container.as_ref()
    }

    pub fn members(&self) -> &[MediaNode] {
        &self.members
    }

    pub fn first_member(&self) -> &MediaNode {
        // Constructors reject empty member lists.
        &self.members[0]
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }
}
