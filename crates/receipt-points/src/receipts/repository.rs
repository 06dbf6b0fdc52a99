use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use super::domain::ReceiptId;

/// Storage abstraction so the service can be exercised without a real backend.
pub trait PointsRepository: Send + Sync {
    fn insert(&self, id: ReceiptId, points: u64) -> Result<(), RepositoryError>;
    fn fetch(&self, id: &ReceiptId) -> Result<Option<u64>, RepositoryError>;
}

/// Error enumeration for repository failures.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("record already exists")]
    Conflict,
    #[error("repository unavailable: {0}")]
    Unavailable(String),
}

/// Process-lifetime store guarded by a read/write lock.
#[derive(Debug, Default, Clone)]
pub struct InMemoryPointsRepository {
    records: Arc<RwLock<HashMap<ReceiptId, u64>>>,
}

impl InMemoryPointsRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.records.read().map(|guard| guard.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl PointsRepository for InMemoryPointsRepository {
    fn insert(&self, id: ReceiptId, points: u64) -> Result<(), RepositoryError> {
        let mut guard = self
            .records
            .write()
            .map_err(|_| RepositoryError::Unavailable("points store lock poisoned".to_string()))?;
        if guard.contains_key(&id) {
            return Err(RepositoryError::Conflict);
        }
        guard.insert(id, points);
        Ok(())
    }

    fn fetch(&self, id: &ReceiptId) -> Result<Option<u64>, RepositoryError> {
        let guard = self
            .records
            .read()
            .map_err(|_| RepositoryError::Unavailable("points store lock poisoned".to_string()))?;
        Ok(guard.get(id).copied())
    }
}
