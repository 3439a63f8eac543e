//! Snapshot persistence for the cart.
//!
//! The reducer never touches storage. A [`SnapshotStore`] is consulted once
//! when a [`CartProvider`](crate::CartProvider) mounts and written after each
//! dispatch, so a cart can survive a reload. A dispatch that leaves the cart
//! empty clears the snapshot instead of saving one.
//!
//! # Implementations
//!
//! - [`InMemorySnapshotStore`]: keeps the JSON in memory, for tests
//! - [`FileSnapshotStore`]: one JSON file on disk

use crate::types::CartState;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use thiserror::Error;

/// Errors that can occur while loading or saving a snapshot
#[derive(Error, Debug)]
pub enum PersistenceError {
    /// Reading or writing the snapshot failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The snapshot could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Boxed future returned by [`SnapshotStore`] methods
pub type SnapshotFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, PersistenceError>> + Send + 'a>>;

/// Storage for the latest cart snapshot
///
/// Methods return boxed futures so the store can be shared as
/// `Arc<dyn SnapshotStore>`.
pub trait SnapshotStore: Send + Sync {
    /// Load the stored cart, or `None` if nothing has been saved
    fn load(&self) -> SnapshotFuture<'_, Option<CartState>>;

    /// Replace the stored cart
    fn save<'a>(&'a self, state: &'a CartState) -> SnapshotFuture<'a, ()>;

    /// Forget the stored cart
    fn clear(&self) -> SnapshotFuture<'_, ()>;
}

/// In-memory snapshot store
///
/// Holds the serialized JSON so tests exercise the same encoding as the file
/// store.
#[derive(Debug, Default)]
pub struct InMemorySnapshotStore {
    json: Mutex<Option<String>>,
    saves: AtomicUsize,
}

impl InMemorySnapshotStore {
    /// Creates an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store that already holds `json`
    #[must_use]
    pub fn with_json(json: impl Into<String>) -> Self {
        Self {
            json: Mutex::new(Some(json.into())),
            saves: AtomicUsize::new(0),
        }
    }

    /// The stored JSON, if any
    #[must_use]
    pub fn json(&self) -> Option<String> {
        self.json
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner)
            .clone()
    }

    /// Number of successful saves
    #[must_use]
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::Acquire)
    }

    fn replace(&self, json: Option<String>) {
        *self
            .json
            .lock()
            .unwrap_or_else(std::sync::PoisonError::into_inner) = json;
    }
}

impl SnapshotStore for InMemorySnapshotStore {
    fn load(&self) -> SnapshotFuture<'_, Option<CartState>> {
        Box::pin(async move {
            self.json()
                .map(|json| serde_json::from_str(&json))
                .transpose()
                .map_err(PersistenceError::from)
        })
    }

    fn save<'a>(&'a self, state: &'a CartState) -> SnapshotFuture<'a, ()> {
        Box::pin(async move {
            let json = serde_json::to_string(state)?;
            self.replace(Some(json));
            self.saves.fetch_add(1, Ordering::AcqRel);
            Ok(())
        })
    }

    fn clear(&self) -> SnapshotFuture<'_, ()> {
        Box::pin(async move {
            self.replace(None);
            Ok(())
        })
    }
}

/// Snapshot store backed by a single JSON file
///
/// Saves write a sibling `.tmp` file and rename it over the target, so a
/// crash mid-write leaves the previous snapshot intact.
#[derive(Debug, Clone)]
pub struct FileSnapshotStore {
    path: PathBuf,
}

impl FileSnapshotStore {
    /// Creates a store for `path`; the file need not exist yet
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Location of the snapshot file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut temp = self.path.clone().into_os_string();
        temp.push(".tmp");
        PathBuf::from(temp)
    }
}

impl SnapshotStore for FileSnapshotStore {
    fn load(&self) -> SnapshotFuture<'_, Option<CartState>> {
        Box::pin(async move {
            match tokio::fs::read(&self.path).await {
                Ok(bytes) => Ok(Some(serde_json::from_slice(&bytes)?)),
                Err(error) if error.kind() == ErrorKind::NotFound => {
                    tracing::debug!(path = %self.path.display(), "No cart snapshot on disk");
                    Ok(None)
                },
                Err(error) => Err(error.into()),
            }
        })
    }

    fn save<'a>(&'a self, state: &'a CartState) -> SnapshotFuture<'a, ()> {
        Box::pin(async move {
            let bytes = serde_json::to_vec_pretty(state)?;

            if let Some(parent) = self.path.parent() {
                if !parent.as_os_str().is_empty() {
                    tokio::fs::create_dir_all(parent).await?;
                }
            }

            let temp = self.temp_path();
            tokio::fs::write(&temp, bytes).await?;
            tokio::fs::rename(&temp, &self.path).await?;

            tracing::trace!(path = %self.path.display(), "Cart snapshot saved");
            Ok(())
        })
    }

    fn clear(&self) -> SnapshotFuture<'_, ()> {
        Box::pin(async move {
            match tokio::fs::remove_file(&self.path).await {
                Ok(()) => Ok(()),
                Err(error) if error.kind() == ErrorKind::NotFound => Ok(()),
                Err(error) => Err(error.into()),
            }
        })
    }
}
