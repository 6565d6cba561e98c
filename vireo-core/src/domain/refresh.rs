//! On-demand metadata repair for stub entries hit during lookup.
//!
//! People are usually created as bare references from other items (cast
//! lists, credits) and only get real metadata once somebody opens them.
//! When a lookup lands on such a stub the refresh runs inline, and the
//! response is built from the refreshed node.

use std::{any::type_name_of_val, fmt, sync::Arc};

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, error, info};
use vireo_model::MediaNode;

use crate::error::{MediaError, Result};
use crate::ports::{MetadataRefresher, RefreshOptions};

const DEFAULT_FULL_REFRESH_DAYS: i64 = 3;

/// Tuning for [`OnDemandRefreshPolicy`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshPolicyConfig {
    /// Minimum age of the last refresh before a stale node is force-saved.
    pub full_refresh_interval: Duration,
}

impl Default for RefreshPolicyConfig {
    fn default() -> Self {
        Self {
            full_refresh_interval: Duration::days(DEFAULT_FULL_REFRESH_DAYS),
        }
    }
}

impl RefreshPolicyConfig {
    pub fn from_std(interval: std::time::Duration) -> Result<Self> {
        let full_refresh_interval =
            Duration::from_std(interval).map_err(|err| {
                MediaError::InvalidRequest(format!(
                    "full refresh interval out of range: {err}"
                ))
            })?;
        Ok(Self {
            full_refresh_interval,
        })
    }
}

/// Decides whether a looked-up node needs its metadata repaired and runs
/// the repair through the [`MetadataRefresher`].
#[derive(Clone)]
pub struct OnDemandRefreshPolicy {
    refresher: Arc<dyn MetadataRefresher>,
    config: RefreshPolicyConfig,
}

impl fmt::Debug for OnDemandRefreshPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OnDemandRefreshPolicy")
            .field("refresher", &type_name_of_val(self.refresher.as_ref()))
            .field("config", &self.config)
            .finish()
    }
}

impl OnDemandRefreshPolicy {
    pub fn new(
        refresher: Arc<dyn MetadataRefresher>,
        config: RefreshPolicyConfig,
    ) -> Self {
        Self { refresher, config }
    }

    pub fn config(&self) -> &RefreshPolicyConfig {
        &self.config
    }

    /// Returns the refresh to run for `node` at `now`, or `None` when the
    /// node is not eligible or already has its metadata.
    pub fn plan(
        &self,
        node: &MediaNode,
        now: DateTime<Utc>,
    ) -> Option<RefreshOptions> {
        if !node.kind.refreshes_on_demand() {
            return None;
        }

        let has_metadata = node.has_overview() && node.has_primary_image;
        if has_metadata {
            return None;
        }

        let since_last_refresh = now - node.last_refreshed_at;
        let perform_full_refresh =
            since_last_refresh >= self.config.full_refresh_interval;

        Some(RefreshOptions::full(perform_full_refresh))
    }

    /// Runs the planned refresh, if any, and waits for it to finish.
    ///
    /// Returns whether a refresh ran. Refresher failures surface as
    /// [`MediaError::RefreshFailed`].
    pub async fn refresh_if_stale(
        &self,
        node: &MediaNode,
        now: DateTime<Utc>,
    ) -> Result<bool> {
        let Some(options) = self.plan(node, now) else {
            debug!(item_id = %node.id, "no on-demand refresh needed");
            return Ok(false);
        };

        info!(
            item_id = %node.id,
            name = %node.name,
            force_save = options.force_save,
            "refreshing stale item before lookup"
        );

        self.refresher
            .refresh(node, options)
            .await
            .map_err(|err| {
                error!(item_id = %node.id, error = %err, "on-demand refresh failed");
                match err {
                    MediaError::RefreshFailed(message) => {
                        MediaError::RefreshFailed(message)
                    }
                    other => MediaError::RefreshFailed(other.to_string()),
                }
            })?;

        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::RefreshMode;
    use async_trait::async_trait;
    use tokio::sync::Mutex;
    use vireo_model::NodeKind;

    #[derive(Default)]
    struct RecordingRefresher {
        calls: Mutex<Vec<RefreshOptions>>,
    }

    #[async_trait]
    impl MetadataRefresher for RecordingRefresher {
        async fn refresh(
            &self,
            _node: &MediaNode,
            options: RefreshOptions,
        ) -> Result<()> {
            self.calls.lock().await.push(options);
            Ok(())
        }
    }

    struct FailingRefresher;

    #[async_trait]
    impl MetadataRefresher for FailingRefresher {
        async fn refresh(
            &self,
            _node: &MediaNode,
            _options: RefreshOptions,
        ) -> Result<()> {
            Err(MediaError::Internal("provider timed out".into()))
        }
    }

    fn policy() -> OnDemandRefreshPolicy {
        OnDemandRefreshPolicy::new(
            Arc::new(RecordingRefresher::default()),
            RefreshPolicyConfig::default(),
        )
    }

    fn stub_person(last_refreshed_at: DateTime<Utc>) -> MediaNode {
        MediaNode::new("Stub Person", NodeKind::Person)
            .with_overview("")
            .with_primary_image(false)
            .with_last_refreshed_at(last_refreshed_at)
    }

    #[test]
    fn stale_person_refreshed_long_ago_is_force_saved() {
        let now = Utc::now();
        let node = stub_person(now - Duration::days(10));

        let options = policy().plan(&node, now).expect("refresh planned");
        assert!(options.force_save);
        assert_eq!(options.metadata_mode, RefreshMode::FullRefresh);
        assert_eq!(options.image_mode, RefreshMode::FullRefresh);
    }

    #[test]
    fn stale_person_refreshed_recently_is_not_force_saved() {
        let now = Utc::now();
        let node = stub_person(now - Duration::hours(1));

        let options = policy().plan(&node, now).expect("refresh planned");
        assert!(!options.force_save);
    }

    #[test]
    fn full_refresh_threshold_is_inclusive() {
        let now = Utc::now();
        let node = stub_person(now - Duration::days(3));

        let options = policy().plan(&node, now).expect("refresh planned");
        assert!(options.force_save);
    }

    #[test]
    fn person_with_overview_and_image_is_left_alone() {
        let now = Utc::now();
        let node = stub_person(now - Duration::days(365))
            .with_overview("Character actor.")
            .with_primary_image(true);

        assert_eq!(policy().plan(&node, now), None);
    }

    #[test]
    fn overview_without_image_still_counts_as_stale() {
        let now = Utc::now();
        let node = stub_person(now).with_overview("Character actor.");

        assert!(policy().plan(&node, now).is_some());
    }

    #[test]
    fn non_person_kinds_are_never_refreshed() {
        let now = Utc::now();
        let node = MediaNode::new("Heat", NodeKind::Movie)
            .with_last_refreshed_at(now - Duration::days(30));

        assert_eq!(policy().plan(&node, now), None);
    }

    #[tokio::test]
    async fn refresh_if_stale_awaits_the_refresher() {
        let refresher = Arc::new(RecordingRefresher::default());
        let policy = OnDemandRefreshPolicy::new(
            refresher.clone(),
            RefreshPolicyConfig::default(),
        );
        let now = Utc::now();

        let ran = policy
            .refresh_if_stale(&stub_person(now - Duration::days(10)), now)
            .await
            .unwrap();

        assert!(ran);
        assert_eq!(
            refresher.calls.lock().await.as_slice(),
            &[RefreshOptions::full(true)]
        );
    }

    #[tokio::test]
    async fn refresher_failure_is_reported_as_refresh_failed() {
        let policy = OnDemandRefreshPolicy::new(
            Arc::new(FailingRefresher),
            RefreshPolicyConfig::default(),
        );
        let now = Utc::now();

        let err = policy
            .refresh_if_stale(&stub_person(now), now)
            .await
            .unwrap_err();
        assert!(matches!(err, MediaError::RefreshFailed(message) if message.contains("provider timed out")));
    }

    #[test]
    fn config_converts_from_std_duration() {
        let config = RefreshPolicyConfig::from_std(
            std::time::Duration::from_secs(60 * 60 * 24),
        )
        .unwrap();
        assert_eq!(config.full_refresh_interval, Duration::days(1));
    }
}
