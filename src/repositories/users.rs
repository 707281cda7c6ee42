use std::collections::HashMap;
use std::sync::RwLock;

use crate::db::models::User;
use crate::error::{Error, Result};

/// Read access to the host's user records.
pub trait UserRepository: Send + Sync {
    fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>>;
}

/// Loads a user that must exist, e.g. the owner of an attempt.
pub(crate) fn fetch_existing(users: &dyn UserRepository, id: i64) -> Result<User> {
    match users.find_by_id(id) {
        Ok(Some(user)) => Ok(user),
        Ok(None) => {
            tracing::warn!(user_id = id, "User record not found");
            Err(Error::UserNotFound(id))
        }
        Err(err) => Err(Error::host(err, "Failed to load user")),
    }
}

/// Process-local user store for hosts without a database and for tests.
#[derive(Debug, Default)]
pub struct InMemoryUsers {
    users: RwLock<HashMap<i64, User>>,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        let mut guard = self.users.write().unwrap_or_else(|poisoned| poisoned.into_inner());
        guard.insert(user.id, user);
    }
}

impl FromIterator<User> for InMemoryUsers {
    fn from_iter<I: IntoIterator<Item = User>>(iter: I) -> Self {
        let users = iter.into_iter().map(|user| (user.id, user)).collect();
        Self { users: RwLock::new(users) }
    }
}

impl UserRepository for InMemoryUsers {
    fn find_by_id(&self, id: i64) -> anyhow::Result<Option<User>> {
        let guard = self.users.read().map_err(|_| anyhow::anyhow!("user store lock poisoned"))?;
        Ok(guard.get(&id).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct BrokenStore;

    impl UserRepository for BrokenStore {
        fn find_by_id(&self, _id: i64) -> anyhow::Result<Option<User>> {
            Err(anyhow::anyhow!("connection reset"))
        }
    }

    #[test]
    fn fetch_existing_returns_user() {
        let users: InMemoryUsers =
            [User { id: 5, firstname: "Ada".to_string(), ..User::default() }].into_iter().collect();
        let user = fetch_existing(&users, 5).expect("user");
        assert_eq!(user.firstname, "Ada");
    }

    #[test]
    fn fetch_existing_reports_missing_user() {
        let users = InMemoryUsers::new();
        assert!(matches!(fetch_existing(&users, 9), Err(Error::UserNotFound(9))));
    }

    #[test]
    fn fetch_existing_propagates_store_failure() {
        let err = fetch_existing(&BrokenStore, 1).unwrap_err();
        assert!(matches!(err, Error::Host { .. }));
        let source = std::error::Error::source(&err).expect("source");
        assert_eq!(source.to_string(), "connection reset");
    }
}
