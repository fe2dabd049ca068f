use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::RwLock;

use crate::models::User;
use crate::services::identity::lookup::{IdentityLookup, LookupResult};

/// In-process identity store keyed by token.
///
/// Used by tests and local wiring. Clones share the same map, so a grant
/// changed through one handle is seen by the gate on the next request.
#[derive(Clone, Debug, Default)]
pub struct InMemoryIdentityLookup {
    users: Arc<RwLock<HashMap<String, User>>>,
}

impl InMemoryIdentityLookup {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let map = users.into_iter().map(|u| (u.token.clone(), u)).collect();
        Self {
            users: Arc::new(RwLock::new(map)),
        }
    }

    /// Insert or replace the user owning `user.token`.
    pub async fn insert(&self, user: User) -> Option<User> {
        self.users.write().await.insert(user.token.clone(), user)
    }

    pub async fn remove(&self, token: &str) -> Option<User> {
        self.users.write().await.remove(token)
    }
}

#[async_trait]
impl IdentityLookup for InMemoryIdentityLookup {
    fn backend_name(&self) -> &'static str {
        "memory"
    }

    async fn find_by_token(&self, token: &str) -> LookupResult<Option<User>> {
        Ok(self.users.read().await.get(token).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::UserFlags;

    #[tokio::test]
    async fn finds_exact_token_only() {
        let store = InMemoryIdentityLookup::with_users([User::new("abc", UserFlags::READ)]);

        assert!(store.find_by_token("abc").await.unwrap().is_some());
        assert!(store.find_by_token("ABC").await.unwrap().is_none());
        assert!(store.find_by_token("abc ").await.unwrap().is_none());
        assert!(store.find_by_token("").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn clones_share_state() {
        let store = InMemoryIdentityLookup::new();
        let handle = store.clone();

        handle.insert(User::new("t1", UserFlags::WRITE)).await;
        let found = store.find_by_token("t1").await.unwrap().unwrap();
        assert_eq!(found.flags, UserFlags::WRITE);

        handle.insert(User::new("t1", UserFlags::READ)).await;
        let found = store.find_by_token("t1").await.unwrap().unwrap();
        assert_eq!(found.flags, UserFlags::READ);

        handle.remove("t1").await;
        assert!(store.find_by_token("t1").await.unwrap().is_none());
    }
}
