//! Comment threads and unread notifications over the real JSON store.

use domains::error::DomainError;
use integration_tests::{draft, harness};

#[tokio::test]
async fn owner_sees_unread_comments_the_author_does_not() {
    let h = harness();
    h.catalog
        .create_or_get("alice", "Calculus 101", draft("Stewart", "1500円"))
        .await
        .unwrap();
    h.threads
        .post_comment("alice", "Calculus 101", "carol", "Is this available?")
        .await
        .unwrap();

    let alice_unread = h.threads.list_unread("alice").await.unwrap();
    assert_eq!(alice_unread.len(), 1);
    assert_eq!(alice_unread[0].comment_author, "carol");
    assert_eq!(alice_unread[0].listing_title, "Calculus 101");

    // Carol authored the comment but owns no thread here.
    assert!(h.threads.list_unread("carol").await.unwrap().is_empty());
    assert_eq!(h.threads.unread_count("alice").await.unwrap(), 1);
    assert_eq!(h.threads.unread_count("carol").await.unwrap(), 0);
}

#[tokio::test]
async fn mark_read_clears_the_thread_and_is_idempotent() {
    let h = harness();
    h.threads
        .post_comment("alice", "Calculus 101", "carol", "first")
        .await
        .unwrap();
    h.threads
        .post_comment("alice", "Calculus 101", "bob", "second")
        .await
        .unwrap();

    assert_eq!(h.threads.unread_count("alice").await.unwrap(), 2);
    assert_eq!(
        h.threads
            .mark_thread_read("alice", "Calculus 101", "alice")
            .await
            .unwrap(),
        2
    );
    assert!(h.threads.list_unread("alice").await.unwrap().is_empty());

    // A second pass changes nothing.
    assert_eq!(
        h.threads
            .mark_thread_read("alice", "Calculus 101", "alice")
            .await
            .unwrap(),
        0
    );
}

#[tokio::test]
async fn partially_read_threads_surface_only_the_new_comments() {
    let h = harness();
    h.threads
        .post_comment("alice", "Calculus 101", "carol", "first")
        .await
        .unwrap();
    h.threads
        .mark_thread_read("alice", "Calculus 101", "alice")
        .await
        .unwrap();

    h.threads
        .post_comment("alice", "Calculus 101", "carol", "second")
        .await
        .unwrap();
    let unread = h.threads.list_unread("alice").await.unwrap();
    assert_eq!(unread.len(), 1);
    assert_eq!(unread[0].text, "second");
}

#[tokio::test]
async fn unread_spans_threads_in_insertion_order() {
    let h = harness();
    h.threads
        .post_comment("alice", "Calculus 101", "carol", "on calculus")
        .await
        .unwrap();
    h.threads
        .post_comment("alice", "Algebra", "bob", "on algebra")
        .await
        .unwrap();
    h.threads
        .post_comment("alice", "Calculus 101", "bob", "more on calculus")
        .await
        .unwrap();
    h.threads
        .post_comment("bob", "Chemistry", "alice", "not alice's thread")
        .await
        .unwrap();

    let unread = h.threads.list_unread("alice").await.unwrap();
    let texts: Vec<&str> = unread.iter().map(|n| n.text.as_str()).collect();
    // Thread order first (Calculus before Algebra), comment order within.
    assert_eq!(texts, ["on calculus", "more on calculus", "on algebra"]);
}

#[tokio::test]
async fn blank_comments_are_rejected() {
    let h = harness();
    let err = h
        .threads
        .post_comment("alice", "Calculus 101", "carol", "  \n ")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::EmptyBody));
    assert!(h.threads.thread("alice", "Calculus 101").await.unwrap().is_empty());
}

#[tokio::test]
async fn comment_bodies_are_stored_trimmed() {
    let h = harness();
    h.threads
        .post_comment("alice", "Calculus 101", "carol", "  hello  ")
        .await
        .unwrap();
    let thread = h.threads.thread("alice", "Calculus 101").await.unwrap();
    assert_eq!(thread[0].text, "hello");
    assert!(thread[0].read_by.is_empty());
}

#[tokio::test]
async fn deleting_a_listing_resets_its_thread() {
    let h = harness();
    h.catalog
        .create_or_get("alice", "Calculus 101", draft("Stewart", "1500円"))
        .await
        .unwrap();
    h.threads
        .post_comment("alice", "Calculus 101", "carol", "old conversation")
        .await
        .unwrap();

    h.catalog.delete_listing("alice", "Calculus 101").await.unwrap();

    // Posting again starts a genuinely fresh thread.
    h.threads
        .post_comment("alice", "Calculus 101", "bob", "new conversation")
        .await
        .unwrap();
    let thread = h.threads.thread("alice", "Calculus 101").await.unwrap();
    assert_eq!(thread.len(), 1);
    assert_eq!(thread[0].text, "new conversation");
}
