//! The session-scoped owner of the cart.
//!
//! A [`CartProvider`] is created once when the application mounts and handed
//! by clone to every consumer. All clones share one [`CartState`]; the only
//! way to change it is [`CartProvider::dispatch`].

use crate::config::CartConfig;
use crate::consumers::{CartBadge, CheckoutSummary};
use crate::error::CartError;
use crate::persistence::{FileSnapshotStore, SnapshotStore};
use crate::reducer::{CartEnvironment, CartReducer};
use crate::types::{CartAction, CartState};
use std::sync::Arc;
use tokio::sync::{broadcast, watch, Mutex};
use tourcart_runtime::{Store, StoreConfig};

/// Store type backing a cart session
pub type CartStore = Store<CartState, CartAction, CartEnvironment, CartReducer>;

/// Shared handle to a session's cart
///
/// # Example
///
/// ```no_run
/// use tourcart::{CartAction, CartProvider};
///
/// # async fn example() -> Result<(), tourcart::CartError> {
/// let cart = CartProvider::new();
///
/// cart.dispatch(CartAction::add("t1", "Heritage Walk", 900.0, None)).await?;
/// assert_eq!(cart.item_count().await, 1);
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct CartProvider {
    store: CartStore,
    snapshots: Option<Arc<dyn SnapshotStore>>,
    /// Held across dispatch and save so snapshots land in dispatch order.
    persist_lock: Arc<Mutex<()>>,
}

impl CartProvider {
    /// Mount an empty, memory-only cart
    #[must_use]
    pub fn new() -> Self {
        Self::from_parts(CartState::new(), StoreConfig::default(), None)
    }

    /// Mount a cart backed by a snapshot store
    ///
    /// The stored cart, if any, becomes the initial state; otherwise the
    /// cart starts empty. Every later dispatch saves a fresh snapshot, or
    /// clears the stored one when the cart ends up empty.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persistence`] if the stored snapshot cannot be read.
    pub async fn with_snapshots(snapshots: Arc<dyn SnapshotStore>) -> Result<Self, CartError> {
        Self::mount(StoreConfig::default(), Some(snapshots)).await
    }

    /// Mount a cart as described by `config`
    ///
    /// A configured snapshot path selects a [`FileSnapshotStore`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Persistence`] if the snapshot file exists but
    /// cannot be read.
    pub async fn from_config(config: &CartConfig) -> Result<Self, CartError> {
        let snapshots = config
            .snapshot_path
            .as_ref()
            .map(|path| Arc::new(FileSnapshotStore::new(path)) as Arc<dyn SnapshotStore>);
        Self::mount(config.store_config(), snapshots).await
    }

    async fn mount(
        config: StoreConfig,
        snapshots: Option<Arc<dyn SnapshotStore>>,
    ) -> Result<Self, CartError> {
        let initial = match &snapshots {
            Some(store) => store.load().await?.unwrap_or_default(),
            None => CartState::new(),
        };

        tracing::info!(
            items = initial.len(),
            item_count = initial.item_count(),
            persistent = snapshots.is_some(),
            "Cart mounted"
        );

        Ok(Self::from_parts(initial, config, snapshots))
    }

    fn from_parts(
        initial: CartState,
        config: StoreConfig,
        snapshots: Option<Arc<dyn SnapshotStore>>,
    ) -> Self {
        Self {
            store: Store::with_config(initial, CartReducer::new(), CartEnvironment, config),
            snapshots,
            persist_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Apply an action and return the resulting cart
    ///
    /// The reducer runs to completion before this returns, and every
    /// subscriber sees the new state.
    ///
    /// # Errors
    ///
    /// - [`CartError::Store`] if the cart has been unmounted
    /// - [`CartError::Persistence`] if the snapshot could not be saved or
    ///   cleared; the in-memory cart is updated regardless
    #[tracing::instrument(skip(self, action), fields(action = action.kind()))]
    pub async fn dispatch(&self, action: CartAction) -> Result<CartState, CartError> {
        let Some(snapshots) = &self.snapshots else {
            return Ok(self.store.send(action).await?);
        };

        let _guard = self.persist_lock.lock().await;
        let state = self.store.send(action).await?;

        let persisted = if state.is_empty() {
            snapshots.clear().await
        } else {
            snapshots.save(&state).await
        };
        if let Err(error) = persisted {
            tracing::warn!(%error, "Cart snapshot not updated");
            return Err(error.into());
        }

        Ok(state)
    }

    /// Clone of the current cart
    pub async fn state(&self) -> CartState {
        self.store.snapshot().await
    }

    /// Read the current cart through a closure
    pub async fn read<F, T>(&self, f: F) -> T
    where
        F: FnOnce(&CartState) -> T,
    {
        self.store.state(f).await
    }

    /// Total units in the cart
    pub async fn item_count(&self) -> u64 {
        self.read(CartState::item_count).await
    }

    /// Cart total
    pub async fn total(&self) -> f64 {
        self.read(CartState::total).await
    }

    /// Badge view of the cart
    pub async fn badge(&self) -> CartBadge {
        self.read(CartBadge::from_state).await
    }

    /// Checkout view of the cart
    pub async fn summary(&self) -> CheckoutSummary {
        self.read(CheckoutSummary::from_state).await
    }

    /// Subscribe to cart changes
    ///
    /// The receiver is marked changed after every dispatch.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<CartState> {
        self.store.subscribe()
    }

    /// Subscribe to every applied action
    #[must_use]
    pub fn subscribe_actions(&self) -> broadcast::Receiver<CartAction> {
        self.store.subscribe_actions()
    }

    /// Stop accepting actions
    ///
    /// Later dispatches fail with [`CartError::Store`].
    ///
    /// # Errors
    ///
    /// Returns [`CartError::Store`] if pending work does not finish in time.
    pub async fn unmount(&self) -> Result<(), CartError> {
        tracing::info!("Cart unmounting");
        self.store.shutdown_default().await?;
        Ok(())
    }
}

impl Default for CartProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for CartProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartProvider")
            .field("persistent", &self.snapshots.is_some())
            .finish_non_exhaustive()
    }
}
