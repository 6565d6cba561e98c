use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;
use vireo_model::{User, UserId};

use crate::error::Result;
use crate::ports::UserDirectory;

#[derive(Clone, Debug, Default)]
pub struct InMemoryUserDirectory {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl InMemoryUserDirectory {
    pub fn from_users<I>(users: I) -> Self
    where
        I: IntoIterator<Item = User>,
    {
        let users = users.into_iter().map(|user| (user.id, user)).collect();
        Self {
            users: Arc::new(RwLock::new(users)),
        }
    }

    /// Adds or replaces a user.
    pub async fn insert(&self, user: User) {
        self.users.write().await.insert(user.id, user);
    }

    pub async fn len(&self) -> usize {
        self.users.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.users.read().await.is_empty()
    }
}

#[async_trait]
impl UserDirectory for InMemoryUserDirectory {
    async fn get_by_id(&self, id: UserId) -> Result<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn lookup_by_id() {
        let alice = User::new(UserId::new(), "alice");
        let directory = InMemoryUserDirectory::from_users([alice.clone()]);

        assert_eq!(directory.get_by_id(alice.id).await.unwrap(), Some(alice));
        assert_eq!(directory.get_by_id(UserId::new()).await.unwrap(), None);

        directory.insert(User::new(UserId::new(), "bob")).await;
        assert_eq!(directory.len().await, 2);
    }
}
