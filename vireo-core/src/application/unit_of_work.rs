use std::any::type_name_of_val;
use std::fmt;
use std::sync::Arc;

use crate::error::{MediaError, Result};
use crate::ports::{
    Catalog, MetadataRefresher, PersonalizationStorage, Projector,
    UserDirectory, VisibilityPolicy,
};

/// Aggregates every collaborator port the library layer talks to.
///
/// Application services borrow their dependencies from here so that wiring
/// and test setup happen in one place.
#[derive(Clone)]
pub struct AppUnitOfWork {
    pub users: Arc<dyn UserDirectory>,
    pub catalog: Arc<dyn Catalog>,
    pub refresher: Arc<dyn MetadataRefresher>,
    pub personalization: Arc<dyn PersonalizationStorage>,
    pub projector: Arc<dyn Projector>,
    pub visibility: Arc<dyn VisibilityPolicy>,
}

impl fmt::Debug for AppUnitOfWork {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWork")
            .field("users", &type_name_of_val(self.users.as_ref()))
            .field("catalog", &type_name_of_val(self.catalog.as_ref()))
            .field("refresher", &type_name_of_val(self.refresher.as_ref()))
            .field(
                "personalization",
                &type_name_of_val(self.personalization.as_ref()),
            )
            .field("projector", &type_name_of_val(self.projector.as_ref()))
            .field("visibility", &type_name_of_val(self.visibility.as_ref()))
            .finish()
    }
}

#[derive(Default)]
pub struct AppUnitOfWorkBuilder {
    users: Option<Arc<dyn UserDirectory>>,
    catalog: Option<Arc<dyn Catalog>>,
    refresher: Option<Arc<dyn MetadataRefresher>>,
    personalization: Option<Arc<dyn PersonalizationStorage>>,
    projector: Option<Arc<dyn Projector>>,
    visibility: Option<Arc<dyn VisibilityPolicy>>,
}

impl fmt::Debug for AppUnitOfWorkBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppUnitOfWorkBuilder")
            .field("users", &self.users.is_some())
            .field("catalog", &self.catalog.is_some())
            .field("refresher", &self.refresher.is_some())
            .field("personalization", &self.personalization.is_some())
            .field("projector", &self.projector.is_some())
            .field("visibility", &self.visibility.is_some())
            .finish()
    }
}

impl AppUnitOfWorkBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(mut self, port: Arc<dyn UserDirectory>) -> Self {
        self.users = Some(port);
        self
    }

    pub fn with_catalog(mut self, port: Arc<dyn Catalog>) -> Self {
        self.catalog = Some(port);
        self
    }

    pub fn with_refresher(mut self, port: Arc<dyn MetadataRefresher>) -> Self {
        self.refresher = Some(port);
        self
    }

    pub fn with_personalization(
        mut self,
        port: Arc<dyn PersonalizationStorage>,
    ) -> Self {
        self.personalization = Some(port);
        self
    }

    pub fn with_projector(mut self, port: Arc<dyn Projector>) -> Self {
        self.projector = Some(port);
        self
    }

    pub fn with_visibility(mut self, port: Arc<dyn VisibilityPolicy>) -> Self {
        self.visibility = Some(port);
        self
    }

    pub fn build(self) -> Result<AppUnitOfWork> {
        fn require<T: ?Sized>(
            port: Option<Arc<T>>,
            name: &str,
        ) -> Result<Arc<T>> {
            port.ok_or_else(|| {
                MediaError::Internal(format!(
                    "AppUnitOfWorkBuilder missing `{name}` port"
                ))
            })
        }

        Ok(AppUnitOfWork {
            users: require(self.users, "users")?,
            catalog: require(self.catalog, "catalog")?,
            refresher: require(self.refresher, "refresher")?,
            personalization: require(self.personalization, "personalization")?,
            projector: require(self.projector, "projector")?,
            visibility: require(self.visibility, "visibility")?,
        })
    }
}
