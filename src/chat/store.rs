//! Persistent history storage: one named slot holding the serialized
//! conversation.

use std::future::Future;
use std::path::PathBuf;
use std::pin::Pin;
use std::sync::{Mutex, PoisonError};

use super::error::StorageError;
use super::types::Message;

/// Boxed future type for store operations.
pub type StoreFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Durable storage for a single conversation.
///
/// The conversation controller is the sole writer and serializes calls, so
/// implementations need no concurrent-writer coordination.
pub trait HistoryStore: Send + Sync {
    /// Load the stored conversation, or an empty one when the slot is
    /// absent.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn get(&self) -> StoreFuture<'_, Result<Vec<Message>, StorageError>>;

    /// Replace the stored conversation.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn set(&self, messages: Vec<Message>) -> StoreFuture<'_, Result<(), StorageError>>;

    /// Empty the slot. Clearing an already empty slot succeeds.
    ///
    /// # Errors
    /// Returns an error if storage access fails.
    fn clear(&self) -> StoreFuture<'_, Result<(), StorageError>>;
}

/// File-backed history store: the slot is one JSON file holding the message
/// array.
pub struct JsonFileHistoryStore {
    path: PathBuf,
}

impl JsonFileHistoryStore {
    /// Create a store writing to the given file.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_os_string();
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl HistoryStore for JsonFileHistoryStore {
    fn get(&self) -> StoreFuture<'_, Result<Vec<Message>, StorageError>> {
        Box::pin(async move {
            let raw = match tokio::fs::read_to_string(&self.path).await {
                Ok(raw) => raw,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
                Err(e) => return Err(StorageError::Io(e)),
            };
            Ok(serde_json::from_str(&raw)?)
        })
    }

    fn set(&self, messages: Vec<Message>) -> StoreFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            let raw = serde_json::to_string(&messages)?;
            // Write-then-rename keeps the slot intact if the write dies.
            let temp = self.temp_path();
            tokio::fs::write(&temp, raw).await?;
            tokio::fs::rename(&temp, &self.path).await?;
            Ok(())
        })
    }

    fn clear(&self) -> StoreFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            match tokio::fs::remove_file(&self.path).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StorageError::Io(e)),
            }
        })
    }
}

/// In-process history store for ephemeral sessions and tests.
#[derive(Default)]
pub struct MemoryHistoryStore {
    slot: Mutex<Vec<Message>>,
}

impl MemoryHistoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-seeded with a conversation.
    #[must_use]
    pub fn with_messages(messages: Vec<Message>) -> Self {
        Self {
            slot: Mutex::new(messages),
        }
    }
}

impl HistoryStore for MemoryHistoryStore {
    fn get(&self) -> StoreFuture<'_, Result<Vec<Message>, StorageError>> {
        Box::pin(async move {
            Ok(self
                .slot
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone())
        })
    }

    fn set(&self, messages: Vec<Message>) -> StoreFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            *self.slot.lock().unwrap_or_else(PoisonError::into_inner) = messages;
            Ok(())
        })
    }

    fn clear(&self) -> StoreFuture<'_, Result<(), StorageError>> {
        Box::pin(async move {
            self.slot
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clear();
            Ok(())
        })
    }
}
