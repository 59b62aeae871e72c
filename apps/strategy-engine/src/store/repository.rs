//! Persistence port for the saved-strategy collection.
//!
//! The contract is deliberately small: the whole collection is one JSON
//! document under one key. Writes replace the document; reads return the
//! last written document, or `None` before the first write.

use std::path::PathBuf;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use tracing::debug;

use super::error::StoreError;
use crate::domain::Strategy;

/// Key-value persistence port for the saved-strategy collection.
#[async_trait]
pub trait StrategyRepository: Send + Sync {
    /// Load the persisted collection. `None` when nothing has been saved.
    async fn load(&self) -> Result<Option<Vec<Strategy>>, StoreError>;

    /// Persist the whole collection, replacing any previous document.
    async fn save(&self, strategies: &[Strategy]) -> Result<(), StoreError>;
}

/// In-memory repository.
///
/// Suitable for testing and development. Stores the serialized document, so
/// round-trips exercise the same serde path as real backends. The fail
/// switch makes persistence-failure paths testable.
#[derive(Debug, Default)]
pub struct InMemoryStrategyRepository {
    document: RwLock<Option<String>>,
    fail_writes: AtomicBool,
}

impl InMemoryStrategyRepository {
    /// Create an empty repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent `save` fail (for test setup).
    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }
}

#[async_trait]
impl StrategyRepository for InMemoryStrategyRepository {
    async fn load(&self) -> Result<Option<Vec<Strategy>>, StoreError> {
        let document = self.document.read().unwrap_or_else(|e| e.into_inner());
        document
            .as_deref()
            .map(|doc| serde_json::from_str(doc).map_err(StoreError::from))
            .transpose()
    }

    async fn save(&self, strategies: &[Strategy]) -> Result<(), StoreError> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(StoreError::Backend {
                message: "write rejected".to_string(),
            });
        }
        let doc = serde_json::to_string(strategies)?;
        let mut document = self.document.write().unwrap_or_else(|e| e.into_inner());
        *document = Some(doc);
        Ok(())
    }
}

/// File-backed repository: the collection as a single JSON document on disk.
#[derive(Debug, Clone)]
pub struct FileStrategyRepository {
    path: PathBuf,
}

impl FileStrategyRepository {
    /// Create a repository backed by the given file path. The file is
    /// created on first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl StrategyRepository for FileStrategyRepository {
    async fn load(&self) -> Result<Option<Vec<Strategy>>, StoreError> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(doc) => {
                let strategies: Vec<Strategy> = serde_json::from_str(&doc)?;
                debug!(path = %self.path.display(), count = strategies.len(), "loaded strategy collection");
                Ok(Some(strategies))
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn save(&self, strategies: &[Strategy]) -> Result<(), StoreError> {
        let doc = serde_json::to_string_pretty(strategies)?;
        tokio::fs::write(&self.path, doc).await?;
        debug!(path = %self.path.display(), count = strategies.len(), "persisted strategy collection");
        Ok(())
    }
}
