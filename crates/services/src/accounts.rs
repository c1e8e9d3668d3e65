//! # AccountService
//!
//! Username uniqueness and opaque password-hash storage over the
//! `PasswordHasher` port. Cleartext never reaches the store.

use std::sync::Arc;

use domains::error::{DomainError, Result};
use domains::models::{is_valid_key_component, THREAD_KEY_SEPARATOR};
use domains::traits::{PasswordHasher, SnapshotStore};

pub struct AccountService {
    store: Arc<dyn SnapshotStore>,
    hasher: Arc<dyn PasswordHasher>,
}

impl AccountService {
    pub fn new(store: Arc<dyn SnapshotStore>, hasher: Arc<dyn PasswordHasher>) -> Self {
        Self { store, hasher }
    }

    /// Registers a new account. Usernames are compared exactly, with no
    /// case folding or normalization beyond trimming whitespace.
    pub async fn register(&self, username: &str, password: &str) -> Result<()> {
        let username = username.trim();
        if !is_valid_key_component(username) {
            return Err(DomainError::Validation(format!(
                "username must be non-empty and must not contain {THREAD_KEY_SEPARATOR:?}"
            )));
        }
        if password.is_empty() {
            return Err(DomainError::Validation("password must not be empty".into()));
        }

        let mut doc = self.store.load_credentials().await?;
        if doc.contains_key(username) {
            return Err(DomainError::DuplicateUser(username.to_string()));
        }
        let hash = self.hasher.hash(password)?;
        doc.insert(username.to_string(), hash);
        self.store.save_credentials(doc).await?;
        tracing::info!(username, "account registered");
        Ok(())
    }

    /// Checks a login. One generic error covers both an unknown username
    /// and a wrong password, so account existence never leaks.
    pub async fn authenticate(&self, username: &str, password: &str) -> Result<()> {
        let doc = self.store.load_credentials().await?;
        match doc.get(username) {
            Some(stored) if self.hasher.verify(password, stored) => Ok(()),
            _ => Err(DomainError::InvalidCredentials),
        }
    }
}
