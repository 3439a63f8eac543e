//! Errors surfaced by [`CartProvider`](crate::CartProvider).

use crate::persistence::PersistenceError;
use thiserror::Error;
use tourcart_runtime::StoreError;

/// Errors that can occur while mounting a cart or dispatching to it
///
/// The reducer itself never fails; these come from the store lifecycle and
/// from snapshot persistence.
#[derive(Error, Debug)]
pub enum CartError {
    /// The underlying store rejected the action
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Loading or saving the cart snapshot failed
    ///
    /// When returned from a dispatch, the in-memory cart has already been
    /// updated; only the durable copy is behind.
    #[error("Cart snapshot failed: {0}")]
    Persistence(#[from] PersistenceError),
}
