//! In-memory implementations of every collaborator port.
//!
//! Used by the server when it runs off a library snapshot, and by tests.

pub mod catalog;
pub mod personalization;
pub mod projector;
pub mod refresher;
pub mod users;
pub mod visibility;

use std::sync::Arc;

use vireo_model::MediaNode;

pub use catalog::InMemoryCatalog;
pub use personalization::InMemoryPersonalizationStorage;
pub use projector::DefaultProjector;
pub use refresher::CatalogRefresher;
pub use users::InMemoryUserDirectory;
pub use visibility::{LibraryGrant, LibraryGrantPolicy, LibraryGrants};

use crate::application::{AppUnitOfWork, AppUnitOfWorkBuilder};
use crate::error::Result;

/// A fully wired set of in-memory adapters sharing one catalog.
///
/// The concrete handles stay reachable so callers can seed data and inspect
/// side effects after handing the ports to the service.
#[derive(Debug, Clone)]
pub struct MemoryLibrary {
    pub users: Arc<InMemoryUserDirectory>,
    pub catalog: Arc<InMemoryCatalog>,
    pub personalization: Arc<InMemoryPersonalizationStorage>,
    pub refresher: Arc<CatalogRefresher>,
    pub projector: Arc<DefaultProjector>,
    pub visibility: Arc<LibraryGrantPolicy>,
    pub grants: LibraryGrants,
}

impl MemoryLibrary {
    /// Empty library containing only `root`.
    pub fn new(root: MediaNode) -> Result<Self> {
        Self::assemble(
            InMemoryUserDirectory::default(),
            root,
            InMemoryPersonalizationStorage::default(),
        )
    }

    pub(crate) fn assemble(
        users: InMemoryUserDirectory,
        root: MediaNode,
        personalization: InMemoryPersonalizationStorage,
    ) -> Result<Self> {
        let personalization = Arc::new(personalization);
        let grants = LibraryGrants::default();
        let catalog = Arc::new(
            InMemoryCatalog::new(root)?
                .with_played_state(personalization.clone())
                .with_access(grants.clone()),
        );

        Ok(Self {
            users: Arc::new(users),
            refresher: Arc::new(CatalogRefresher::new(catalog.clone())),
            projector: Arc::new(DefaultProjector::new(personalization.clone())),
            visibility: Arc::new(LibraryGrantPolicy::new(
                catalog.clone(),
                grants.clone(),
            )),
            catalog,
            personalization,
            grants,
        })
    }

    pub fn unit_of_work(&self) -> Result<AppUnitOfWork> {
        AppUnitOfWorkBuilder::new()
            .with_users(self.users.clone())
            .with_catalog(self.catalog.clone())
            .with_refresher(self.refresher.clone())
            .with_personalization(self.personalization.clone())
            .with_projector(self.projector.clone())
            .with_visibility(self.visibility.clone())
            .build()
    }
}
