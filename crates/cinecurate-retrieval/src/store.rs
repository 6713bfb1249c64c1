//! Vector store contract and a brute-force in-memory store.

use crate::embedder::cosine_similarity;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::RwLock;
use thiserror::Error;

/// Errors that can occur when working with vector stores.
#[derive(Error, Debug)]
pub enum VectorError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Invalid vector dimension: expected {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    #[error("API error: {0}")]
    Api(String),
}

/// Result type for vector operations.
pub type VectorResult<T> = Result<T, VectorError>;

/// A vector record to store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VectorRecord {
    pub id: String,
    pub vector: Vec<f32>,
    pub metadata: HashMap<String, serde_json::Value>,
}

impl VectorRecord {
    pub fn new(id: impl Into<String>, vector: Vec<f32>) -> Self {
        Self {
            id: id.into(),
            vector,
            metadata: HashMap::new(),
        }
    }

    pub fn with_metadata(
        mut self,
        key: impl Into<String>,
        value: impl Into<serde_json::Value>,
    ) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }
}

/// A ranked search hit.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    pub id: String,
    /// Relevance, higher is more similar.
    pub score: f32,
    pub metadata: HashMap<String, serde_json::Value>,
}

/// Storage and similarity search over embeddings.
#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Get the name of this backend.
    fn name(&self) -> &str;

    /// Get the vector dimension.
    fn dimension(&self) -> usize;

    /// Insert or replace records by id.
    async fn upsert(&self, records: Vec<VectorRecord>) -> VectorResult<()>;

    /// Top `k` records by descending score.
    async fn search(&self, vector: &[f32], k: usize) -> VectorResult<Vec<SearchResult>>;

    /// Number of stored records.
    async fn count(&self) -> VectorResult<usize>;

    /// Remove every record.
    async fn clear(&self) -> VectorResult<()>;
}

/// In-memory store scored by cosine similarity.
///
/// Ties are broken by record id so results are reproducible.
pub struct InMemoryStore {
    records: RwLock<HashMap<String, VectorRecord>>,
    dimension: usize,
}

impl InMemoryStore {
    pub fn new(dimension: usize) -> Self {
        Self {
            records: RwLock::new(HashMap::new()),
            dimension,
        }
    }

    fn check_dimension(&self, actual: usize) -> VectorResult<()> {
        if actual != self.dimension {
            return Err(VectorError::DimensionMismatch {
                expected: self.dimension,
                actual,
            });
        }
        Ok(())
    }
}

fn lock_err(e: impl std::fmt::Display) -> VectorError {
    VectorError::Connection(format!("Failed to acquire lock: {}", e))
}

#[async_trait]
impl VectorStore for InMemoryStore {
    fn name(&self) -> &str {
        "in-memory"
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    async fn upsert(&self, records: Vec<VectorRecord>) -> VectorResult<()> {
        for record in &records {
            self.check_dimension(record.vector.len())?;
        }

        let mut store = self.records.write().map_err(lock_err)?;
        for record in records {
            store.insert(record.id.clone(), record);
        }
        Ok(())
    }

    async fn search(&self, vector: &[f32], k: usize) -> VectorResult<Vec<SearchResult>> {
        self.check_dimension(vector.len())?;

        let store = self.records.read().map_err(lock_err)?;
        let mut scored: Vec<(&VectorRecord, f32)> = store
            .values()
            .map(|record| (record, cosine_similarity(vector, &record.vector)))
            .collect();

        scored.sort_by(|a, b| {
            b.1.partial_cmp(&a.1)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| a.0.id.cmp(&b.0.id))
        });

        Ok(scored
            .into_iter()
            .take(k)
            .map(|(record, score)| SearchResult {
                id: record.id.clone(),
                score,
                metadata: record.metadata.clone(),
            })
            .collect())
    }

    async fn count(&self) -> VectorResult<usize> {
        Ok(self.records.read().map_err(lock_err)?.len())
    }

    async fn clear(&self) -> VectorResult<()> {
        self.records.write().map_err(lock_err)?.clear();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_upsert_and_search() {
        let store = InMemoryStore::new(3);
        store
            .upsert(vec![
                VectorRecord::new("a", vec![1.0, 0.0, 0.0]),
                VectorRecord::new("b", vec![0.0, 1.0, 0.0]),
                VectorRecord::new("c", vec![0.7, 0.7, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0, 0.0], 2).await.unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].id, "a");
        assert_eq!(results[1].id, "c");
        assert!((results[0].score - 1.0).abs() < 1e-6);
    }

    #[tokio::test]
    async fn test_ties_break_by_id() {
        let store = InMemoryStore::new(2);
        store
            .upsert(vec![
                VectorRecord::new("row-2", vec![1.0, 0.0]),
                VectorRecord::new("row-1", vec![1.0, 0.0]),
            ])
            .await
            .unwrap();

        let results = store.search(&[1.0, 0.0], 2).await.unwrap();
        assert_eq!(results[0].id, "row-1");
        assert_eq!(results[1].id, "row-2");
    }

    #[tokio::test]
    async fn test_upsert_replaces_and_clear_empties() {
        let store = InMemoryStore::new(2);
        store
            .upsert(vec![VectorRecord::new("a", vec![1.0, 0.0]).with_metadata("v", 1)])
            .await
            .unwrap();
        store
            .upsert(vec![VectorRecord::new("a", vec![0.0, 1.0]).with_metadata("v", 2)])
            .await
            .unwrap();
        assert_eq!(store.count().await.unwrap(), 1);

        let results = store.search(&[0.0, 1.0], 1).await.unwrap();
        assert_eq!(results[0].metadata["v"], serde_json::json!(2));

        store.clear().await.unwrap();
        assert_eq!(store.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_dimension_mismatch() {
        let store = InMemoryStore::new(3);
        let result = store.upsert(vec![VectorRecord::new("a", vec![1.0, 0.0])]).await;
        assert!(matches!(result, Err(VectorError::DimensionMismatch { .. })));

        let result = store.search(&[1.0], 1).await;
        assert!(matches!(result, Err(VectorError::DimensionMismatch { .. })));
    }
}
