//! # bookstall
//!
//! Command-line front end over the marketplace core. Any real transport
//! (HTTP, RPC) is an external collaborator; this binary drives the same
//! service layer from the shell, with the acting user passed explicitly
//! in place of a session.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use auth_adapters::Argon2PasswordHasher;
use configs::AppConfig;
use domains::models::ListingDraft;
use domains::traits::{BlobStore, SnapshotStore};
use services::{search_catalog, AccountService, CatalogService, SortMode, ThreadService};
use storage_adapters::{JsonSnapshotStore, LocalBlobStore};

#[derive(Parser)]
#[command(name = "bookstall", about = "Secondhand textbook marketplace")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Create an account.
    Register { user: String, password: String },
    /// Check a username/password pair.
    Login { user: String, password: String },
    /// Create a listing (create-if-absent; an existing title is returned
    /// unchanged).
    Post {
        user: String,
        title: String,
        #[arg(long, default_value = "")]
        author: String,
        #[arg(long, default_value = "")]
        price: String,
        #[arg(long, default_value = "")]
        condition: String,
        #[arg(long, default_value = "")]
        note: String,
        #[arg(long, default_value = "")]
        course: String,
    },
    /// Upload image files and attach them to a listing (5 slots max).
    Attach {
        user: String,
        title: String,
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },
    /// Search the public catalog.
    Search {
        #[arg(long, default_value = "")]
        keyword: String,
        /// new, price_asc or price_desc.
        #[arg(long, default_value = "new")]
        sort: String,
    },
    /// Show one listing and its comment thread.
    Show { owner: String, title: String },
    /// Comment on a listing.
    Comment {
        user: String,
        owner: String,
        title: String,
        text: String,
    },
    /// List unread comments on your own listings.
    Notifications { user: String },
    /// Mark a whole thread as read.
    MarkRead {
        user: String,
        owner: String,
        title: String,
    },
    /// Delete a listing, its images and its comment thread.
    Delete { user: String, title: String },
    /// Detach one image from a listing and delete the blob.
    DeleteImage {
        user: String,
        title: String,
        blob_ref: String,
    },
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
    let blobs: Arc<dyn BlobStore> = Arc::new(LocalBlobStore::new(
        &cfg.uploads_dir,
        cfg.upload_url_prefix.clone(),
    ));
    let catalog = CatalogService::new(store.clone());
    let threads = ThreadService::new(store.clone());
    let accounts = AccountService::new(store.clone(), Arc::new(Argon2PasswordHasher));

    match Cli::parse().command {
        Command::Register { user, password } => {
            accounts.register(&user, &password).await?;
            println!("registered {user}");
        }
        Command::Login { user, password } => {
            accounts.authenticate(&user, &password).await?;
            println!("credentials ok for {user}");
        }
        Command::Post {
            user,
            title,
            author,
            price,
            condition,
            note,
            course,
        } => {
            let listing = catalog
                .create_or_get(
                    &user,
                    &title,
                    ListingDraft {
                        author,
                        price,
                        condition,
                        note,
                        course,
                    },
                )
                .await?;
            println!(
                "{user} is selling {:?} ({} image(s) attached)",
                listing.title,
                listing.images.len()
            );
        }
        Command::Attach { user, title, files } => {
            let mut refs = Vec::with_capacity(files.len());
            for path in files {
                let data = tokio::fs::read(&path)
                    .await
                    .with_context(|| format!("read {}", path.display()))?;
                let content_type = mime_guess::from_path(&path).first_or_octet_stream();
                refs.push(blobs.put(data.into(), &content_type).await?);
            }
            let attached = catalog.attach_images(&user, &title, refs).await?;
            println!("attached {attached} image(s)");
        }
        Command::Search { keyword, sort } => {
            let sort: SortMode = sort.parse()?;
            let snapshot = catalog.snapshot().await?;
            for group in search_catalog(&snapshot, &keyword, sort) {
                println!("{}:", group.owner);
                for listing in &group.listings {
                    println!(
                        "  {} - {} [{} image(s)]",
                        listing.title,
                        listing.price,
                        listing.images.len()
                    );
                }
            }
        }
        Command::Show { owner, title } => {
            let Some(listing) = catalog.get(&owner, &title).await? else {
                println!("no such listing");
                return Ok(());
            };
            println!("{} - {} ({})", listing.title, listing.price, listing.condition);
            if !listing.note.is_empty() {
                println!("note: {}", listing.note);
            }
            for blob_ref in &listing.images {
                println!("image: {}", blobs.url(blob_ref));
            }
            for comment in threads.thread(&owner, &title).await? {
                println!("> {}: {}", comment.author, comment.text);
            }
        }
        Command::Comment {
            user,
            owner,
            title,
            text,
        } => {
            threads.post_comment(&owner, &title, &user, &text).await?;
            println!("comment posted");
        }
        Command::Notifications { user } => {
            let unread = threads.list_unread(&user).await?;
            for n in &unread {
                let when = n.time.map(|t| t.to_rfc3339()).unwrap_or_default();
                println!(
                    "[{when}] {} on {:?}: {}",
                    n.comment_author, n.listing_title, n.text
                );
            }
            println!("{} unread comment(s)", unread.len());
        }
        Command::MarkRead { user, owner, title } => {
            let marked = threads.mark_thread_read(&owner, &title, &user).await?;
            println!("marked {marked} comment(s) as read");
        }
        Command::Delete { user, title } => {
            let refs = catalog.delete_listing(&user, &title).await?;
            for blob_ref in &refs {
                blobs.delete(blob_ref).await?;
            }
            println!("deleted listing and {} image(s)", refs.len());
        }
        Command::DeleteImage {
            user,
            title,
            blob_ref,
        } => {
            catalog.delete_image(&user, &title, &blob_ref).await?;
            blobs.delete(&blob_ref).await?;
            println!("image removed");
        }
    }
    Ok(())
}
