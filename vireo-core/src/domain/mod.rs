//! Domain layer: the decision logic of the library layer.

pub mod latest;
pub mod personalization;
pub mod refresh;
pub mod visibility;

pub use latest::{
    LatestItemsAggregator, effective_played_filter, select_representative,
};
pub use personalization::PersonalizationService;
pub use refresh::{OnDemandRefreshPolicy, RefreshPolicyConfig};
pub use visibility::VisibilityGate;
