//! Account registration and login over the real JSON store, including
//! one end-to-end pass through the argon2 adapter.

use std::sync::Arc;

use auth_adapters::Argon2PasswordHasher;
use domains::error::DomainError;
use domains::traits::SnapshotStore;
use integration_tests::harness;
use services::AccountService;

#[tokio::test]
async fn register_then_login() {
    let h = harness();
    h.accounts.register("alice", "hunter2").await.unwrap();
    h.accounts.authenticate("alice", "hunter2").await.unwrap();

    let err = h.accounts.authenticate("alice", "wrong").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));
}

#[tokio::test]
async fn usernames_are_unique_and_case_sensitive() {
    let h = harness();
    h.accounts.register("alice", "pw").await.unwrap();

    let err = h.accounts.register("alice", "pw2").await.unwrap_err();
    assert!(matches!(err, DomainError::DuplicateUser(_)));

    // Exact-match uniqueness only: a different casing is a new account.
    h.accounts.register("Alice", "pw3").await.unwrap();
    h.accounts.authenticate("Alice", "pw3").await.unwrap();
}

#[tokio::test]
async fn stored_credentials_survive_a_store_reopen() {
    let h = harness();
    h.accounts.register("alice", "hunter2").await.unwrap();

    // A second service over the same directory sees the same document.
    let reopened = AccountService::new(h.store.clone(), Arc::new(integration_tests::PlainHasher));
    reopened.authenticate("alice", "hunter2").await.unwrap();
}

#[tokio::test]
async fn the_argon2_adapter_works_end_to_end() {
    let h = harness();
    let accounts = AccountService::new(h.store.clone(), Arc::new(Argon2PasswordHasher));
    accounts.register("dave", "correct horse").await.unwrap();
    accounts.authenticate("dave", "correct horse").await.unwrap();
    let err = accounts.authenticate("dave", "wrong horse").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidCredentials));

    // The stored value is an argon2 PHC string, not the password.
    let creds = h.store.load_credentials().await.unwrap();
    assert!(creds["dave"].starts_with("$argon2"));
}
