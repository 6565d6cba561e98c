use std::collections::{BTreeSet, HashMap};
use std::sync::{Arc, PoisonError, RwLock};

use serde::{Deserialize, Serialize};
use tracing::trace;
use vireo_model::{MediaNode, NodeId, NodeKind, User, UserId};

use crate::infra::memory::InMemoryCatalog;
use crate::ports::VisibilityPolicy;

/// Libraries a user may browse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibraryGrant {
    /// Grants every library, present and future
    pub all_libraries: bool,
    pub libraries: BTreeSet<NodeId>,
}

impl LibraryGrant {
    pub fn all() -> Self {
        Self {
            all_libraries: true,
            libraries: BTreeSet::new(),
        }
    }

    pub fn libraries<I>(ids: I) -> Self
    where
        I: IntoIterator<Item = NodeId>,
    {
        Self {
            all_libraries: false,
            libraries: ids.into_iter().collect(),
        }
    }
}

/// Shared table of library grants, keyed by user.
#[derive(Debug, Clone, Default)]
pub struct LibraryGrants {
    inner: Arc<RwLock<HashMap<UserId, LibraryGrant>>>,
}

impl LibraryGrants {
    /// Replaces any earlier grant for the user.
    pub fn grant(&self, user_id: UserId, grant: LibraryGrant) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(user_id, grant);
    }

    pub fn revoke(&self, user_id: UserId) {
        self.inner
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&user_id);
    }

    /// Whether the user may browse a node with the given lineage (the node
    /// id followed by its ancestors).
    pub fn permits<I>(&self, user_id: UserId, lineage: I) -> bool
    where
        I: IntoIterator<Item = NodeId>,
    {
        let grants = self.inner.read().unwrap_or_else(PoisonError::into_inner);
        match grants.get(&user_id) {
            Some(grant) if grant.all_libraries => true,
            Some(grant) => {
                lineage.into_iter().any(|id| grant.libraries.contains(&id))
            }
            None => false,
        }
    }
}

/// Visibility decided by library grants.
///
/// A node is visible when it, or one of its ancestors, is a granted library.
/// People are shared across libraries and always visible. Users without a
/// grant see nothing but the root folder.
#[derive(Debug, Clone)]
pub struct LibraryGrantPolicy {
    catalog: Arc<InMemoryCatalog>,
    grants: LibraryGrants,
}

impl LibraryGrantPolicy {
    pub fn new(catalog: Arc<InMemoryCatalog>, grants: LibraryGrants) -> Self {
        Self { catalog, grants }
    }

    pub fn grants(&self) -> &LibraryGrants {
        &self.grants
    }
}

impl VisibilityPolicy for LibraryGrantPolicy {
    fn is_visible(&self, user: &User, node: &MediaNode) -> bool {
        if node.kind == NodeKind::Person {
            return true;
        }

        let visible = self.grants.permits(user.id, self.catalog.lineage(node));
        if !visible {
            trace!(user_id = %user.id, item_id = %node.id, "no grant covers item");
        }
        visible
    }
}
