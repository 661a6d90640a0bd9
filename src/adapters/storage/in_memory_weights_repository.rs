//! In-Memory Weights Repository Adapter
//!
//! Stores computation records in memory.
//! Useful for testing and development.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::ProjectId;
use crate::ports::{
    ComputationKey, MatrixComputationRecord, WeightsRepository, WeightsRepositoryError,
};

/// In-memory storage for computation records
#[derive(Debug, Clone)]
pub struct InMemoryWeightsRepository {
    records: Arc<RwLock<HashMap<ComputationKey, MatrixComputationRecord>>>,
}

impl InMemoryWeightsRepository {
    /// Create a new in-memory repository
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Clear all stored data (useful for tests)
    pub async fn clear(&self) {
        self.records.write().await.clear();
    }

    /// Get the number of stored records
    pub async fn record_count(&self) -> usize {
        self.records.read().await.len()
    }
}

impl Default for InMemoryWeightsRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WeightsRepository for InMemoryWeightsRepository {
    async fn upsert(&self, record: &MatrixComputationRecord) -> Result<(), WeightsRepositoryError> {
        let mut records = self.records.write().await;
        records.insert(record.key.clone(), record.clone());
        Ok(())
    }

    async fn get(
        &self,
        key: &ComputationKey,
    ) -> Result<Option<MatrixComputationRecord>, WeightsRepositoryError> {
        let records = self.records.read().await;
        Ok(records.get(key).cloned())
    }

    async fn list_for_project(
        &self,
        project_id: ProjectId,
    ) -> Result<Vec<MatrixComputationRecord>, WeightsRepositoryError> {
        let records = self.records.read().await;
        let mut found: Vec<MatrixComputationRecord> = records
            .values()
            .filter(|r| r.key.project_id == project_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| a.key.cmp(&b.key));
        Ok(found)
    }
}
