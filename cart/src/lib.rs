//! # Tourcart
//!
//! A session-scoped shopping cart for tour packages.
//!
//! The cart is a pure state machine driven by four actions
//! (`ADD_ITEM`, `REMOVE_ITEM`, `UPDATE_QUANTITY`, `CLEAR_CART`). A
//! [`CartProvider`] owns the one cart of a session, serializes dispatches,
//! notifies subscribers and, when configured, keeps a snapshot on disk.
//!
//! ## Architecture
//!
//! - [`types`]: `TourItem`, `CartState`, `CartAction`
//! - [`reducer`]: the pure transition function
//! - [`provider`]: session owner built on the `tourcart-runtime` Store
//! - [`persistence`]: snapshot stores, outside the reducer
//! - [`consumers`]: badge and checkout views, line controls
//! - [`config`]: environment-driven configuration
//!
//! ## Example
//!
//! ```no_run
//! use tourcart::{CartAction, CartProvider};
//!
//! # async fn example() -> Result<(), tourcart::CartError> {
//! let cart = CartProvider::new();
//!
//! cart.dispatch(CartAction::add("t1", "Heritage Walk", 900.0, None)).await?;
//! cart.dispatch(CartAction::add("t1", "Heritage Walk", 900.0, None)).await?;
//!
//! let state = cart.state().await;
//! assert_eq!(state.item_count(), 2);
//! assert_eq!(state.total(), 1800.0);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod consumers;
pub mod error;
pub mod persistence;
pub mod provider;
pub mod reducer;
pub mod types;

pub use config::{CartConfig, ConfigError};
pub use consumers::{CartBadge, CartLine, CheckoutSummary};
pub use error::CartError;
pub use persistence::{
    FileSnapshotStore, InMemorySnapshotStore, PersistenceError, SnapshotStore,
};
pub use provider::CartProvider;
pub use reducer::{CartEnvironment, CartReducer};
pub use types::{CartAction, CartState, ItemId, TourItem};
