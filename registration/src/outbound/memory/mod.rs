//! In-memory [`UserRepository`] adapter.
//!
//! Users live in a `HashMap` behind a single mutex together with the id
//! sequence, so assigning an identifier and inserting the row happen under
//! the same lock. Contents are lost when the process exits.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use tracing::debug;

use crate::domain::ports::{UserPersistenceError, UserRepository};
use crate::domain::{User, UserId, UserProfile};

#[derive(Debug)]
struct Store {
    users: HashMap<UserId, User>,
    next_id: u64,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            users: HashMap::new(),
            next_id: 1,
        }
    }
}

/// Process-local user storage with sequential identifiers starting at 1.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    store: Mutex<Store>,
}

impl InMemoryUserRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Store>, UserPersistenceError> {
        self.store
            .lock()
            .map_err(|_| UserPersistenceError::connection("user store lock poisoned"))
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn insert(&self, profile: UserProfile) -> Result<User, UserPersistenceError> {
        let mut store = self.lock()?;
        let id = UserId::new(store.next_id)
            .map_err(|err| UserPersistenceError::query(err.to_string()))?;
        store.next_id = store
            .next_id
            .checked_add(1)
            .ok_or_else(|| UserPersistenceError::query("user id sequence exhausted"))?;

        let user = User::new(id, profile);
        store.users.insert(id, user.clone());
        debug!(user_id = %id, "user inserted");
        Ok(user)
    }

    async fn update(&self, user: &User) -> Result<bool, UserPersistenceError> {
        let mut store = self.lock()?;
        let Some(slot) = store.users.get_mut(&user.id()) else {
            return Ok(false);
        };
        *slot = user.clone();
        Ok(true)
    }

    async fn find_by_id(&self, id: UserId) -> Result<Option<User>, UserPersistenceError> {
        Ok(self.lock()?.users.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    //! Identifier assignment and overwrite behaviour.

    use super::*;
    use crate::domain::{Address, UserDraft};
    use chrono::NaiveDate;
    use rstest::{fixture, rstest};
    use std::sync::Arc;

    #[fixture]
    fn profile() -> UserProfile {
        let draft = UserDraft {
            first_name: Some("Ada".to_owned()),
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1),
            phone_numbers: Some(vec!["0123456789".to_owned()]),
            ..UserDraft::default()
        };
        let (_, profile) = draft.into_profile().expect("complete draft");
        profile
    }

    #[rstest]
    #[tokio::test]
    async fn identifiers_are_sequential_from_one(profile: UserProfile) {
        let repository = InMemoryUserRepository::new();
        let first = repository.insert(profile.clone()).await.expect("insert");
        let second = repository.insert(profile).await.expect("insert");

        assert_eq!(first.id().get(), 1);
        assert_eq!(second.id().get(), 2);
    }

    #[rstest]
    #[tokio::test]
    async fn find_returns_stored_user(profile: UserProfile) {
        let repository = InMemoryUserRepository::new();
        let user = repository.insert(profile).await.expect("insert");

        let found = repository.find_by_id(user.id()).await.expect("find");
        assert_eq!(found, Some(user));
    }

    #[rstest]
    #[tokio::test]
    async fn find_misses_unknown_id() {
        let repository = InMemoryUserRepository::new();
        let id = UserId::new(42).expect("positive id");
        assert_eq!(repository.find_by_id(id).await.expect("find"), None);
    }

    #[rstest]
    #[tokio::test]
    async fn update_overwrites_existing_user(profile: UserProfile) {
        let repository = InMemoryUserRepository::new();
        let mut user = repository.insert(profile).await.expect("insert");
        user.profile_mut().set_addresses(vec![Address::default()]);

        assert!(repository.update(&user).await.expect("update"));
        let found = repository
            .find_by_id(user.id())
            .await
            .expect("find")
            .expect("user stored");
        assert_eq!(found.profile().addresses().map(<[Address]>::len), Some(1));
    }

    #[rstest]
    #[tokio::test]
    async fn update_reports_unknown_id(profile: UserProfile) {
        let repository = InMemoryUserRepository::new();
        let ghost = User::new(UserId::new(9).expect("positive id"), profile);

        assert!(!repository.update(&ghost).await.expect("update"));
        assert_eq!(repository.find_by_id(ghost.id()).await.expect("find"), None);
    }

    #[rstest]
    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn concurrent_inserts_never_share_an_id(profile: UserProfile) {
        let repository = Arc::new(InMemoryUserRepository::new());
        let handles: Vec<_> = (0..32)
            .map(|_| {
                let repository = Arc::clone(&repository);
                let profile = profile.clone();
                tokio::spawn(async move { repository.insert(profile).await })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.expect("join").expect("insert").id().get());
        }
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 32);
    }
}
