use async_trait::async_trait;
use vireo_model::{User, UserId};

use crate::error::Result;

/// Read access to user accounts.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>>;
}
