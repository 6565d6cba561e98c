//! Library snapshots: a serde document describing users, the node tree,
//! intros, extras, grants and stored personalization, loaded into the
//! in-memory adapters.
//!
//! Both JSON and TOML are accepted; the format is picked from the file
//! extension.

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;
use vireo_model::{MediaNode, NodeId, PersonalizationRecord, User, UserId};

use crate::error::MediaError;
use crate::infra::memory::{
    InMemoryPersonalizationStorage, InMemoryUserDirectory, LibraryGrant,
    MemoryLibrary,
};

#[derive(Debug, Error)]
pub enum SnapshotError {
    #[error("failed to read snapshot {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse JSON snapshot")]
    Json(#[from] serde_json::Error),
    #[error("failed to parse TOML snapshot")]
    Toml(#[from] toml::de::Error),
    #[error("unsupported snapshot format for {path}; expected .json or .toml")]
    UnsupportedFormat { path: PathBuf },
    #[error("snapshot contains no RootFolder node")]
    MissingRoot,
    #[error("snapshot contains more than one RootFolder node")]
    MultipleRoots,
    #[error("node {0} appears more than once")]
    DuplicateNode(NodeId),
    #[error("{context} references unknown node {id}")]
    UnknownNode { context: &'static str, id: NodeId },
    #[error("{context} references unknown user {id}")]
    UnknownUser { context: &'static str, id: UserId },
    #[error(transparent)]
    Library(#[from] MediaError),
}

/// Intros played before an item, in play order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntroLink {
    pub item_id: NodeId,
    pub intro_ids: Vec<NodeId>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGrant {
    pub user_id: UserId,
    #[serde(flatten)]
    pub grant: LibraryGrant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredRecord {
    pub user_id: UserId,
    pub item_id: NodeId,
    #[serde(flatten)]
    pub record: PersonalizationRecord,
}

/// Serialized library state.
///
/// Nodes carrying an extra type are attached as extras of their parent.
/// Nodes referenced from `intros` are registered as intros rather than
/// regular items.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LibrarySnapshot {
    pub users: Vec<User>,
    pub nodes: Vec<MediaNode>,
    pub intros: Vec<IntroLink>,
    pub grants: Vec<UserGrant>,
    pub personalization: Vec<StoredRecord>,
}

impl LibrarySnapshot {
    pub fn from_json_str(raw: &str) -> Result<Self, SnapshotError> {
        Ok(serde_json::from_str(raw)?)
    }

    pub fn from_toml_str(raw: &str) -> Result<Self, SnapshotError> {
        Ok(toml::from_str(raw)?)
    }

    pub fn from_path(path: &Path) -> Result<Self, SnapshotError> {
        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase);
        let parse: fn(&str) -> Result<Self, SnapshotError> =
            match extension.as_deref() {
                Some("json") => Self::from_json_str,
                Some("toml") => Self::from_toml_str,
                _ => {
                    return Err(SnapshotError::UnsupportedFormat {
                        path: path.to_path_buf(),
                    });
                }
            };

        let contents =
            fs::read_to_string(path).map_err(|source| SnapshotError::Io {
                path: path.to_path_buf(),
                source,
            })?;
        parse(&contents)
    }

    /// Checks references and the single-root rule without building anything.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        self.root()?;

        let mut node_ids = HashSet::with_capacity(self.nodes.len());
        for node in &self.nodes {
            if !node_ids.insert(node.id) {
                return Err(SnapshotError::DuplicateNode(node.id));
            }
        }
        let user_ids: HashSet<UserId> =
            self.users.iter().map(|user| user.id).collect();

        let require_node = |context, id| {
            if node_ids.contains(&id) {
                Ok(())
            } else {
                Err(SnapshotError::UnknownNode { context, id })
            }
        };
        let require_user = |context, id| {
            if user_ids.contains(&id) {
                Ok(())
            } else {
                Err(SnapshotError::UnknownUser { context, id })
            }
        };

        for node in self.nodes.iter().filter(|node| node.is_extra()) {
            match node.parent_id {
                Some(owner) => require_node("extra", owner)?,
                None => {
                    return Err(SnapshotError::UnknownNode {
                        context: "extra without parent",
                        id: node.id,
                    });
                }
            }
        }
        for link in &self.intros {
            require_node("intro link", link.item_id)?;
            for intro_id in &link.intro_ids {
                require_node("intro", *intro_id)?;
            }
        }
        for grant in &self.grants {
            require_user("grant", grant.user_id)?;
            for library in &grant.grant.libraries {
                require_node("grant", *library)?;
            }
        }
        for stored in &self.personalization {
            require_user("personalization record", stored.user_id)?;
            require_node("personalization record", stored.item_id)?;
        }

        Ok(())
    }

    fn root(&self) -> Result<&MediaNode, SnapshotError> {
        let mut roots =
            self.nodes.iter().filter(|node| node.kind.is_root_folder());
        let root = roots.next().ok_or(SnapshotError::MissingRoot)?;
        if roots.next().is_some() {
            return Err(SnapshotError::MultipleRoots);
        }
        Ok(root)
    }

    /// Validates the snapshot and loads it into a fresh set of adapters.
    pub fn into_library(self) -> Result<MemoryLibrary, SnapshotError> {
        self.validate()?;
        let root = self.root()?.clone();

        let users = InMemoryUserDirectory::from_users(self.users);
        let personalization = InMemoryPersonalizationStorage::from_records(
            self.personalization
                .into_iter()
                .map(|stored| (stored.user_id, stored.item_id, stored.record)),
        );
        let library = MemoryLibrary::assemble(users, root.clone(), personalization)?;

        let intro_ids: HashSet<NodeId> = self
            .intros
            .iter()
            .flat_map(|link| link.intro_ids.iter().copied())
            .collect();

        let mut node_count = 0usize;
        let mut extra_count = 0usize;
        for node in &self.nodes {
            if node.id == root.id || intro_ids.contains(&node.id) {
                continue;
            }
            match (node.extra_type, node.parent_id) {
                (Some(_), Some(owner)) => {
                    library.catalog.add_extra(owner, node.clone())?;
                    extra_count += 1;
                }
                _ => {
                    library.catalog.insert(node.clone());
                    node_count += 1;
                }
            }
        }

        for link in &self.intros {
            for intro_id in &link.intro_ids {
                if let Some(intro) =
                    self.nodes.iter().find(|node| node.id == *intro_id)
                {
                    library.catalog.add_intro(link.item_id, intro.clone());
                }
            }
        }

        for grant in self.grants {
            library.grants.grant(grant.user_id, grant.grant);
        }

        info!(
            root_id = %root.id,
            nodes = node_count,
            extras = extra_count,
            intro_links = self.intros.len(),
            "library snapshot loaded"
        );

        Ok(library)
    }
}
