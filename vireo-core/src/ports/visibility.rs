use vireo_model::{MediaNode, User};

/// Access policy for non-root nodes (library grants, parental controls).
pub trait VisibilityPolicy: Send + Sync {
    fn is_visible(&self, user: &User, node: &MediaNode) -> bool;
}
