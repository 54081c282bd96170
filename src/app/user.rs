//! Accounts and the in-memory credential store

use std::sync::Arc;

use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::http::error::HttpError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub account: String,
    pub password: String,
    pub email: String,
}

impl User {
    pub fn new(
        account: impl Into<String>,
        password: impl Into<String>,
        email: impl Into<String>,
    ) -> Self {
        Self {
            account: account.into(),
            password: password.into(),
            email: email.into(),
        }
    }

    /// Plain string comparison; passwords are held in cleartext.
    pub fn check_password(&self, password: &str) -> bool {
        self.password == password
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("account {0:?} already exists")]
    DuplicateAccount(String),
}

impl From<RepositoryError> for HttpError {
    fn from(err: RepositoryError) -> Self {
        HttpError::Conflict(err.to_string())
    }
}

/// Lookup and persistence of users, unique by account.
pub trait UserRepository: Send + Sync {
    fn find_by_account(&self, account: &str) -> Option<User>;
    fn save(&self, user: User) -> Result<(), RepositoryError>;
}

/// Volatile user store backed by a concurrent map.
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<DashMap<String, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::new();
        for user in users {
            repo.users.entry(user.account.clone()).or_insert(user);
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn find_by_account(&self, account: &str) -> Option<User> {
        self.users.get(account).map(|u| u.value().clone())
    }

    fn save(&self, user: User) -> Result<(), RepositoryError> {
        match self.users.entry(user.account.clone()) {
            Entry::Occupied(_) => Err(RepositoryError::DuplicateAccount(user.account)),
            Entry::Vacant(slot) => {
                slot.insert(user);
                Ok(())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn save_rejects_duplicate_account() {
        let repo = InMemoryUserRepository::with_users([User::new("gugu", "password", "a@b.c")]);
        let err = repo.save(User::new("gugu", "other", "x@y.z")).unwrap_err();
        assert_eq!(err, RepositoryError::DuplicateAccount("gugu".into()));
        assert_eq!(repo.find_by_account("gugu").unwrap().password, "password");
    }

    #[test]
    fn save_then_find() {
        let repo = InMemoryUserRepository::new();
        repo.save(User::new("neo", "pw", "neo@example.com")).unwrap();
        assert!(repo.find_by_account("neo").unwrap().check_password("pw"));
        assert!(repo.find_by_account("trinity").is_none());
    }

    #[test]
    fn duplicate_account_is_a_conflict() {
        let err = HttpError::from(RepositoryError::DuplicateAccount("gugu".into()));
        assert_eq!(err, HttpError::Conflict("account \"gugu\" already exists".into()));
        assert_eq!(err.status(), crate::http::response::StatusCode::BadRequest);
    }
}
