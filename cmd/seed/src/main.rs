//! Seeds demo accounts, listings and comments through the service layer,
//! so a fresh checkout has something to browse. Safe to re-run: existing
//! records are left alone.

use std::sync::Arc;

use anyhow::Context;
use tracing_subscriber::EnvFilter;

use auth_adapters::Argon2PasswordHasher;
use configs::AppConfig;
use domains::error::{DomainError, Result};
use domains::models::ListingDraft;
use domains::traits::SnapshotStore;
use services::{AccountService, CatalogService, ThreadService};
use storage_adapters::JsonSnapshotStore;

fn ignore_duplicate(result: Result<()>) -> Result<()> {
    match result {
        Err(DomainError::DuplicateUser(_)) => Ok(()),
        other => other,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cfg = AppConfig::load().context("load configuration")?;
    let store: Arc<dyn SnapshotStore> = Arc::new(JsonSnapshotStore::new(&cfg.data_dir));
    let catalog = CatalogService::new(store.clone());
    let threads = ThreadService::new(store.clone());
    let accounts = AccountService::new(store.clone(), Arc::new(Argon2PasswordHasher));

    for (user, password) in [
        ("alice", "alice-demo"),
        ("bob", "bob-demo"),
        ("carol", "carol-demo"),
    ] {
        ignore_duplicate(accounts.register(user, password).await)?;
    }

    catalog
        .create_or_get(
            "alice",
            "Calculus 101",
            ListingDraft {
                author: "Stewart".into(),
                price: "1,500円".into(),
                condition: "good".into(),
                note: "a few highlights in chapter 2".into(),
                course: "MATH101".into(),
            },
        )
        .await?;
    catalog
        .create_or_get(
            "alice",
            "Linear Algebra Done Right",
            ListingDraft {
                author: "Axler".into(),
                price: "2200円".into(),
                condition: "like new".into(),
                note: String::new(),
                course: "MATH201".into(),
            },
        )
        .await?;
    // Same title as alice's under a different owner: titles are only
    // unique within one owner's catalog.
    catalog
        .create_or_get(
            "bob",
            "Calculus 101",
            ListingDraft {
                author: "Stewart".into(),
                price: "800円".into(),
                condition: "worn".into(),
                note: "cover is taped".into(),
                course: "MATH101".into(),
            },
        )
        .await?;

    let thread = threads.thread("alice", "Calculus 101").await?;
    if thread.is_empty() {
        threads
            .post_comment("alice", "Calculus 101", "carol", "Is this still available?")
            .await?;
        threads
            .post_comment("alice", "Calculus 101", "bob", "Would you take 1,200?")
            .await?;
    }

    let unread = threads.unread_count("alice").await?;
    println!("seeded; alice now has {unread} unread comment(s)");
    Ok(())
}
