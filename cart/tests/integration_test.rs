//! Integration tests for the cart provider
//!
//! These drive the full dispatch path: provider → store → reducer →
//! subscribers → snapshot store.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)] // Test code

use std::sync::Arc;
use std::time::Duration;
use tourcart::{
    CartAction, CartConfig, CartError, CartProvider, CartState, FileSnapshotStore,
    InMemorySnapshotStore, ItemId, SnapshotStore,
};

fn heritage_walk() -> CartAction {
    CartAction::add("t1", "Heritage Walk", 900.0, None)
}

fn food_trail() -> CartAction {
    CartAction::add("t2", "Food Trail", 600.0, None)
}

#[tokio::test]
async fn test_browsing_session_scenarios() {
    let cart = CartProvider::new();

    // 1. First add
    let state = cart.dispatch(heritage_walk()).await.unwrap();
    assert_eq!(state.items().len(), 1);
    assert_eq!(state.items()[0].quantity, 1);
    assert_eq!(state.total(), 900.0);
    assert_eq!(state.item_count(), 1);

    // 2. Same tour again
    let state = cart.dispatch(heritage_walk()).await.unwrap();
    assert_eq!(state.items()[0].quantity, 2);
    assert_eq!(state.total(), 1800.0);
    assert_eq!(state.item_count(), 2);

    // 3. Set quantity
    let state = cart
        .dispatch(CartAction::update_quantity("t1", 5))
        .await
        .unwrap();
    assert_eq!(state.total(), 4500.0);
    assert_eq!(state.item_count(), 5);

    // 4. Remove
    let state = cart.dispatch(CartAction::remove("t1")).await.unwrap();
    assert!(state.is_empty());
    assert_eq!(state.total(), 0.0);
    assert_eq!(state.item_count(), 0);
}

#[tokio::test]
async fn test_clear_after_mixed_adds() {
    let cart = CartProvider::new();
    cart.dispatch(heritage_walk()).await.unwrap();
    cart.dispatch(food_trail()).await.unwrap();

    let state = cart.dispatch(CartAction::clear()).await.unwrap();
    assert_eq!(state, CartState::new());
    assert_eq!(cart.item_count().await, 0);
    assert_eq!(cart.total().await, 0.0);
}

#[tokio::test]
async fn test_update_missing_id_leaves_state_unchanged() {
    let cart = CartProvider::new();
    cart.dispatch(heritage_walk()).await.unwrap();
    let before = cart.state().await;

    let after = cart
        .dispatch(CartAction::update_quantity("missing", 3))
        .await
        .unwrap();
    assert_eq!(after, before);
}

#[tokio::test]
async fn test_clones_share_one_cart() {
    let cart = CartProvider::new();
    let drawer = cart.clone();

    cart.dispatch(heritage_walk()).await.unwrap();
    drawer.dispatch(food_trail()).await.unwrap();

    assert_eq!(cart.item_count().await, 2);
    assert_eq!(drawer.state().await, cart.state().await);
}

#[tokio::test]
async fn test_separate_providers_are_isolated() {
    let first = CartProvider::new();
    let second = CartProvider::new();

    first.dispatch(heritage_walk()).await.unwrap();

    assert_eq!(first.item_count().await, 1);
    assert_eq!(second.item_count().await, 0);
}

#[tokio::test]
async fn test_subscribers_observe_dispatches() {
    let cart = CartProvider::new();
    let mut badge = cart.subscribe();
    let mut actions = cart.subscribe_actions();

    cart.dispatch(heritage_walk()).await.unwrap();

    badge.changed().await.unwrap();
    assert_eq!(badge.borrow_and_update().item_count(), 1);
    assert_eq!(actions.recv().await.unwrap(), heritage_walk());

    cart.dispatch(CartAction::clear()).await.unwrap();
    badge.changed().await.unwrap();
    assert!(badge.borrow().is_empty());
    assert_eq!(actions.recv().await.unwrap(), CartAction::clear());
}

#[tokio::test]
async fn test_concurrent_dispatch_keeps_invariants() {
    let cart = CartProvider::new();

    let handles: Vec<_> = (0..50)
        .map(|i| {
            let cart = cart.clone();
            tokio::spawn(async move {
                let action = if i % 2 == 0 { heritage_walk() } else { food_trail() };
                cart.dispatch(action).await
            })
        })
        .collect();

    for handle in handles {
        handle.await.expect("dispatch task panicked").unwrap();
    }

    let state = cart.state().await;
    assert_eq!(state.item_count(), 50);
    assert_eq!(state.total(), 25.0 * 900.0 + 25.0 * 600.0);
    assert_eq!(state.items().len(), 2);
}

#[tokio::test]
async fn test_views_follow_state() {
    let cart = CartProvider::new();
    cart.dispatch(heritage_walk()).await.unwrap();
    cart.dispatch(heritage_walk()).await.unwrap();
    cart.dispatch(food_trail()).await.unwrap();

    assert_eq!(cart.badge().await.label(), "3");

    let summary = cart.summary().await;
    assert_eq!(summary.total, 2400.0);
    assert_eq!(summary.lines[0].subtotal, 1800.0);

    let state = cart.state().await;
    let decrement = tourcart::consumers::decrement(&state, &ItemId::from("t2")).unwrap();
    let state = cart.dispatch(decrement).await.unwrap();
    assert!(!state.contains(&ItemId::from("t2")));
}

#[tokio::test]
async fn test_snapshot_saved_after_every_dispatch() {
    let snapshots = Arc::new(InMemorySnapshotStore::new());
    let cart = CartProvider::with_snapshots(snapshots.clone()).await.unwrap();

    cart.dispatch(heritage_walk()).await.unwrap();
    cart.dispatch(food_trail()).await.unwrap();

    assert_eq!(snapshots.save_count(), 2);
    let stored = snapshots.load().await.unwrap().unwrap();
    assert_eq!(stored, cart.state().await);
}

#[tokio::test]
async fn test_rehydrates_from_snapshot() {
    let snapshots = Arc::new(InMemorySnapshotStore::new());

    {
        let cart = CartProvider::with_snapshots(snapshots.clone()).await.unwrap();
        cart.dispatch(heritage_walk()).await.unwrap();
        cart.dispatch(heritage_walk()).await.unwrap();
        cart.unmount().await.unwrap();
    }

    let cart = CartProvider::with_snapshots(snapshots).await.unwrap();
    let state = cart.state().await;
    assert_eq!(state.item_count(), 2);
    assert_eq!(state.total(), 1800.0);
}

#[tokio::test]
async fn test_corrupt_snapshot_fails_mount() {
    let snapshots = Arc::new(InMemorySnapshotStore::with_json("[[["));
    let result = CartProvider::with_snapshots(snapshots).await;
    assert!(matches!(result, Err(CartError::Persistence(_))));
}

#[tokio::test]
async fn test_nan_priced_cart_remounts() {
    let snapshots = Arc::new(InMemorySnapshotStore::new());

    let cart = CartProvider::with_snapshots(snapshots.clone()).await.unwrap();
    cart.dispatch(CartAction::add("t1", "Odd", f64::NAN, None)).await.unwrap();
    cart.dispatch(CartAction::add("t2", "Food Trail", 10.0, None)).await.unwrap();
    cart.unmount().await.unwrap();

    let reopened = CartProvider::with_snapshots(snapshots).await.unwrap();
    let state = reopened.state().await;
    assert_eq!(state.item_count(), 2);
    assert!(state.get(&ItemId::from("t1")).unwrap().price.is_nan());
    assert_eq!(state.get(&ItemId::from("t2")).unwrap().price, 10.0);
}

#[tokio::test]
async fn test_clearing_cart_removes_snapshot() {
    let snapshots = Arc::new(InMemorySnapshotStore::new());
    let cart = CartProvider::with_snapshots(snapshots.clone()).await.unwrap();

    cart.dispatch(heritage_walk()).await.unwrap();
    assert!(snapshots.json().is_some());

    cart.dispatch(CartAction::clear()).await.unwrap();
    assert!(snapshots.json().is_none());
    assert_eq!(snapshots.save_count(), 1);

    let reopened = CartProvider::with_snapshots(snapshots).await.unwrap();
    assert!(reopened.state().await.is_empty());
}

#[tokio::test]
async fn test_removing_last_item_deletes_snapshot_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");
    let config = CartConfig::default().with_snapshot_path(&path);

    let cart = CartProvider::from_config(&config).await.unwrap();
    cart.dispatch(food_trail()).await.unwrap();
    assert!(path.exists());

    cart.dispatch(CartAction::remove("t2")).await.unwrap();
    assert!(!path.exists());
}

#[tokio::test]
async fn test_file_snapshot_round_trip_via_config() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("cart.json");
    let config = CartConfig::default().with_snapshot_path(&path);

    let cart = CartProvider::from_config(&config).await.unwrap();
    cart.dispatch(food_trail()).await.unwrap();
    cart.dispatch(CartAction::update_quantity("t2", 3)).await.unwrap();

    let reopened = CartProvider::from_config(&config).await.unwrap();
    assert_eq!(reopened.state().await, cart.state().await);

    let on_disk = FileSnapshotStore::new(&path).load().await.unwrap().unwrap();
    assert_eq!(on_disk.item_count(), 3);
}

#[tokio::test]
async fn test_unmounted_cart_rejects_dispatch() {
    let cart = CartProvider::new();
    cart.unmount().await.unwrap();

    let result = tokio::time::timeout(Duration::from_secs(1), cart.dispatch(heritage_walk()))
        .await
        .unwrap();
    assert!(matches!(result, Err(CartError::Store(_))));
}
