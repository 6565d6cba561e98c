//! Core data model definitions shared across Vireo crates.
#![allow(missing_docs)]

pub mod error;
pub mod ids;
pub mod latest;
pub mod node;
pub mod personalization;
pub mod user;
pub mod view;

// Intentionally curated re-exports for downstream consumers.
pub use error::{ModelError, Result as ModelResult};
pub use ids::{NodeId, UserId};
pub use latest::{
    DEFAULT_LATEST_LIMIT, GroupedCandidate, LatestItemsQuery,
    LatestQueryParams,
};
pub use node::{ExtraType, MediaNode, NodeKind};
pub use personalization::{
    PersonalizationRecord, PersonalizationRecordView, SaveReason,
};
pub use user::{User, UserPreferences};
pub use view::{ItemField, ItemView, QueryResult, ViewOptions};
