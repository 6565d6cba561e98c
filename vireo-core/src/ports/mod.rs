//! Collaborator ports (interfaces) consumed by the library layer.
//!
//! The core never talks to storage, the catalog or the metadata pipeline
//! directly; it goes through these traits. In-memory implementations live
//! under `infra::memory`.

pub mod catalog;
pub mod personalization;
pub mod projection;
pub mod refresh;
pub mod users;
pub mod visibility;

pub use catalog::Catalog;
pub use personalization::PersonalizationStorage;
pub use projection::Projector;
pub use refresh::{MetadataRefresher, RefreshMode, RefreshOptions};
pub use users::UserDirectory;
pub use visibility::VisibilityPolicy;
