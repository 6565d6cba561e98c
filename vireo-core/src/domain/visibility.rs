//! Visibility gate applied to every single-item lookup.

use std::{any::type_name_of_val, fmt, sync::Arc};

use tracing::warn;
use vireo_model::{MediaNode, User};

use crate::error::{MediaError, Result};
use crate::ports::VisibilityPolicy;

/// Binary access decision over (user, node).
///
/// The root folder is visible to everyone; every other node is decided by
/// the injected [`VisibilityPolicy`].
#[derive(Clone)]
pub struct VisibilityGate {
    policy: Arc<dyn VisibilityPolicy>,
}

impl fmt::Debug for VisibilityGate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VisibilityGate")
            .field("policy", &type_name_of_val(self.policy.as_ref()))
            .finish()
    }
}

impl VisibilityGate {
    pub fn new(policy: Arc<dyn VisibilityPolicy>) -> Self {
        Self { policy }
    }

    pub fn is_visible(&self, user: &User, node: &MediaNode) -> bool {
        node.kind.is_root_folder() || self.policy.is_visible(user, node)
    }

    /// Fails with [`MediaError::Unauthorized`] when `user` cannot see `node`.
    pub fn authorize(&self, user: &User, node: &MediaNode) -> Result<()> {
        if self.is_visible(user, node) {
            return Ok(());
        }

        warn!(
            user_id = %user.id,
            item_id = %node.id,
            kind = %node.kind,
            "item not visible to user"
        );
        Err(MediaError::Unauthorized(format!(
            "{} is not permitted to access item {}.",
            user.display_name, node.name
        )))
    }
}
