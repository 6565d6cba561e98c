use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use std::{any::type_name_of_val, fmt};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;
use vireo_model::{
    GroupedCandidate, LatestQueryParams, MediaNode, NodeId, NodeKind, User,
};

use crate::error::{MediaError, Result};
use crate::infra::memory::LibraryGrants;
use crate::ports::{Catalog, PersonalizationStorage};

#[derive(Debug)]
struct CatalogState {
    root_id: NodeId,
    nodes: HashMap<NodeId, MediaNode>,
    intros: HashMap<NodeId, Vec<NodeId>>,
    extras: HashMap<NodeId, Vec<NodeId>>,
}

impl CatalogState {
    /// Parent chain of `node`, nearest first. Stops on unknown parents and on
    /// cycles.
    fn ancestors<'a>(&'a self, node: &'a MediaNode) -> Vec<&'a MediaNode> {
        let mut chain = Vec::new();
        let mut cursor = node.parent_id;
        while let Some(parent_id) = cursor {
            let Some(parent) = self.nodes.get(&parent_id) else {
                break;
            };
            if parent.id == node.id || chain.len() > self.nodes.len() {
                break;
            }
            chain.push(parent);
            cursor = parent.parent_id;
        }
        chain
    }

    fn lineage(&self, node: &MediaNode) -> Vec<NodeId> {
        std::iter::once(node.id)
            .chain(self.ancestors(node).iter().map(|parent| parent.id))
            .collect()
    }

    fn is_within(&self, node: &MediaNode, scope: NodeId) -> bool {
        scope == self.root_id
            || node.id == scope
            || self.ancestors(node).iter().any(|parent| parent.id == scope)
    }

    /// Node that collapses `node` in latest rows: episodes fold into their
    /// series, tracks into their album, anything else into a plain folder
    /// parent.
    fn grouping_container(&self, node: &MediaNode) -> Option<MediaNode> {
        let parent = node.parent_id.and_then(|id| self.nodes.get(&id))?;
        match node.kind {
            NodeKind::Episode => self
                .ancestors(node)
                .into_iter()
                .find(|ancestor| ancestor.kind == NodeKind::Series)
                .cloned(),
            NodeKind::Audio if parent.kind.is_music_album() => {
                Some(parent.clone())
            }
            _ if parent.kind == NodeKind::Folder => Some(parent.clone()),
            _ => None,
        }
    }

    fn is_intro(&self, node_id: NodeId) -> bool {
        self.intros.values().any(|ids| ids.contains(&node_id))
    }

    fn resolve_all(&self, ids: Option<&Vec<NodeId>>) -> Vec<MediaNode> {
        ids.into_iter()
            .flatten()
            .filter_map(|id| self.nodes.get(id).cloned())
            .collect()
    }
}

/// Catalog held entirely in memory.
///
/// The tree is kept behind a synchronous lock that is never held across an
/// await, so the visibility policy can walk ancestry without going async.
#[derive(Clone)]
pub struct InMemoryCatalog {
    state: Arc<RwLock<CatalogState>>,
    played_state: Option<Arc<dyn PersonalizationStorage>>,
    access: Option<LibraryGrants>,
}

impl fmt::Debug for InMemoryCatalog {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        f.debug_struct("InMemoryCatalog")
            .field("root_id", &state.root_id)
            .field("nodes", &state.nodes.len())
            .field(
                "played_state",
                &self
                    .played_state
                    .as_ref()
                    .map(|storage| type_name_of_val(storage.as_ref())),
            )
            .field("access_filtered", &self.access.is_some())
            .finish()
    }
}

impl InMemoryCatalog {
    /// Creates a catalog whose only node is `root`.
    pub fn new(root: MediaNode) -> Result<Self> {
        if !root.kind.is_root_folder() {
            return Err(MediaError::Catalog(format!(
                "root node {} has kind {}, expected RootFolder",
                root.id, root.kind
            )));
        }

        let state = CatalogState {
            root_id: root.id,
            nodes: HashMap::from([(root.id, root)]),
            intros: HashMap::new(),
            extras: HashMap::new(),
        };
        Ok(Self {
            state: Arc::new(RwLock::new(state)),
            played_state: None,
            access: None,
        })
    }

    /// Storage consulted when a latest query filters on played state.
    pub fn with_played_state(
        mut self,
        storage: Arc<dyn PersonalizationStorage>,
    ) -> Self {
        self.played_state = Some(storage);
        self
    }

    /// Restricts latest rows to libraries granted to the requesting user.
    pub fn with_access(mut self, grants: LibraryGrants) -> Self {
        self.access = Some(grants);
        self
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn root_id(&self) -> NodeId {
        self.read().root_id
    }

    /// Adds or replaces a node.
    pub fn insert(&self, node: MediaNode) {
        self.write().nodes.insert(node.id, node);
    }

    /// Registers `intro` as played before `item_id`, after any intros already
    /// linked.
    pub fn add_intro(&self, item_id: NodeId, intro: MediaNode) {
        let mut state = self.write();
        state.intros.entry(item_id).or_default().push(intro.id);
        state.nodes.insert(intro.id, intro);
    }

    /// Attaches an extra to its owner. The extra's parent is set to the owner
    /// when missing.
    pub fn add_extra(&self, owner_id: NodeId, mut extra: MediaNode) -> Result<()> {
        if extra.extra_type.is_none() {
            return Err(MediaError::Catalog(format!(
                "extra {} carries no extra type",
                extra.id
            )));
        }
        extra.parent_id.get_or_insert(owner_id);

        let mut state = self.write();
        state.extras.entry(owner_id).or_default().push(extra.id);
        state.nodes.insert(extra.id, extra);
        Ok(())
    }

    pub fn node(&self, id: NodeId) -> Option<MediaNode> {
        self.read().nodes.get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.read().nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().nodes.is_empty()
    }

    /// Ids of `node` and all of its known ancestors, nearest first.
    pub fn lineage(&self, node: &MediaNode) -> Vec<NodeId> {
        self.read().lineage(node)
    }

    /// Stamps a refresh on a stored node.
    pub fn mark_refreshed(&self, id: NodeId, at: DateTime<Utc>) -> Result<()> {
        let mut state = self.write();
        let node = state.nodes.get_mut(&id).ok_or_else(|| {
            MediaError::Catalog(format!("cannot refresh unknown node {id}"))
        })?;
        node.last_refreshed_at = at;
        Ok(())
    }

    /// Recency-ordered nodes eligible for latest rows, each paired with its
    /// grouping container.
    fn latest_pool(
        &self,
        params: &LatestQueryParams,
    ) -> Vec<(MediaNode, Option<MediaNode>)> {
        let state = self.read();
        let mut pool: Vec<&MediaNode> = state
            .nodes
            .values()
            .filter(|node| {
                !matches!(
                    node.kind,
                    NodeKind::RootFolder
                        | NodeKind::CollectionFolder
                        | NodeKind::Person
                ) && !node.is_extra()
                    && !state.is_intro(node.id)
            })
            .filter(|node| {
                params.include_kinds.is_empty()
                    || params.include_kinds.contains(&node.kind)
            })
            // Folders only appear when the caller asks for them.
            .filter(|node| {
                node.kind.is_folder() == params.is_folder.unwrap_or(false)
            })
            .filter(|node| {
                params
                    .parent_id
                    .is_none_or(|scope| state.is_within(node, scope))
            })
            .filter(|node| {
                self.access.as_ref().is_none_or(|grants| {
                    grants.permits(params.user_id, state.lineage(node))
                })
            })
            .collect();

        pool.sort_by(|a, b| {
            b.created_at.cmp(&a.created_at).then_with(|| a.id.cmp(&b.id))
        });

        pool.into_iter()
            .map(|node| {
                let container = params
                    .group_items
                    .then(|| state.grouping_container(node))
                    .flatten();
                (node.clone(), container)
            })
            .collect()
    }
}

#[async_trait]
impl Catalog for InMemoryCatalog {
    async fn get_root_folder(&self) -> Result<MediaNode> {
        let state = self.read();
        state.nodes.get(&state.root_id).cloned().ok_or_else(|| {
            MediaError::Catalog("root folder missing from catalog".into())
        })
    }

    async fn get_by_id(&self, id: NodeId) -> Result<Option<MediaNode>> {
        Ok(self.node(id))
    }

    async fn get_intros(
        &self,
        node: &MediaNode,
        _user: &User,
    ) -> Result<Vec<MediaNode>> {
        let state = self.read();
        Ok(state.resolve_all(state.intros.get(&node.id)))
    }

    async fn get_extras(&self, node: &MediaNode) -> Result<Vec<MediaNode>> {
        let state = self.read();
        Ok(state.resolve_all(state.extras.get(&node.id)))
    }

    async fn query_latest(
        &self,
        params: &LatestQueryParams,
    ) -> Result<Vec<GroupedCandidate>> {
        let pool = self.latest_pool(params);
        let scanned = pool.len();

        let mut groups: Vec<(Option<MediaNode>, Vec<MediaNode>)> = Vec::new();
        let mut group_index: HashMap<NodeId, usize> = HashMap::new();

        for (node, container) in pool {
            if groups.len() >= params.limit {
                break;
            }

            if let Some(wanted) = params.is_played {
                let storage = self.played_state.as_ref().ok_or_else(|| {
                    MediaError::Catalog(
                        "played-state filter needs personalization storage"
                            .into(),
                    )
                })?;
                let record = storage.get(params.user_id, node.id).await?;
                if record.played != wanted {
                    continue;
                }
            }

            match container {
                Some(container) => match group_index.get(&container.id) {
                    Some(&index) => groups[index].1.push(node),
                    None => {
                        group_index.insert(container.id, groups.len());
                        groups.push((Some(container), vec![node]));
                    }
                },
                None => groups.push((None, vec![node])),
            }
        }

        debug!(
            user_id = %params.user_id,
            scanned,
            groups = groups.len(),
            "latest query evaluated"
        );

        groups
            .into_iter()
            .map(|(container, members)| {
                GroupedCandidate::new(container, members).map_err(Into::into)
            })
            .collect()
    }
}
