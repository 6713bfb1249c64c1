//! Text embedding contract and a hash-based local embedder.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use thiserror::Error;

/// Embedding error types.
#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Dimension mismatch: expected {expected}, got {got}")]
    DimensionMismatch { expected: usize, got: usize },
}

/// Result type for embedding operations.
pub type EmbeddingResult<T> = Result<T, EmbeddingError>;

/// Converts text to dense vectors.
pub trait Embedder: Send + Sync {
    /// Embed a single text string.
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>>;

    /// Embed multiple texts.
    fn embed_batch(&self, texts: &[&str]) -> EmbeddingResult<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed(t)).collect()
    }

    /// Get the embedding dimension.
    fn dimension(&self) -> usize;

    /// Get the model name/identifier.
    fn model_name(&self) -> &str;
}

/// Feature-hashing embedder.
///
/// Each lowercase alphanumeric token is hashed into a few signed buckets and
/// the result is L2 normalized. Texts sharing words land close together, which
/// is enough for titles and names; it carries no semantics beyond overlap.
pub struct SimpleEmbedder {
    dimension: usize,
    num_hashes: u64,
}

impl SimpleEmbedder {
    pub fn new(dimension: usize) -> Self {
        Self {
            dimension: dimension.max(1),
            num_hashes: 4,
        }
    }

    fn tokens(text: &str) -> impl Iterator<Item = String> + '_ {
        text.split(|c: char| !c.is_alphanumeric())
            .filter(|s| s.chars().count() > 1)
            .map(str::to_lowercase)
    }

    fn bucket(&self, token: &str, seed: u64) -> (usize, f32) {
        let mut hasher = DefaultHasher::new();
        seed.hash(&mut hasher);
        token.hash(&mut hasher);
        let hash = hasher.finish();
        let index = (hash % self.dimension as u64) as usize;
        let sign = if (hash >> 63) == 0 { 1.0 } else { -1.0 };
        (index, sign)
    }
}

impl Default for SimpleEmbedder {
    fn default() -> Self {
        Self::new(256)
    }
}

impl Embedder for SimpleEmbedder {
    fn embed(&self, text: &str) -> EmbeddingResult<Vec<f32>> {
        if text.trim().is_empty() {
            return Err(EmbeddingError::InvalidInput("Empty text".to_string()));
        }

        let mut vector = vec![0.0f32; self.dimension];
        for token in Self::tokens(text) {
            for seed in 0..self.num_hashes {
                let (index, sign) = self.bucket(&token, seed);
                vector[index] += sign;
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            vector.iter_mut().for_each(|v| *v /= norm);
        }
        Ok(vector)
    }

    fn dimension(&self) -> usize {
        self.dimension
    }

    fn model_name(&self) -> &str {
        "simple-hash"
    }
}

/// Cosine similarity. Mismatched or zero vectors score 0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_text_same_vector() {
        let embedder = SimpleEmbedder::new(128);
        let v1 = embedder.embed("Ridley Scott directed Alien").unwrap();
        let v2 = embedder.embed("Ridley Scott directed Alien").unwrap();

        assert_eq!(v1.len(), 128);
        assert!((cosine_similarity(&v1, &v2) - 1.0).abs() < 1e-5);
    }

    #[test]
    fn test_overlap_scores_higher() {
        let embedder = SimpleEmbedder::default();
        let query = embedder.embed("movies directed by Michael Mann").unwrap();
        let heat = embedder
            .embed("originalTitle: Heat\ndirector: Michael Mann\ngenres: Action Crime")
            .unwrap();
        let alien = embedder
            .embed("originalTitle: Alien\ndirector: Ridley Scott\ngenres: Horror Sci-Fi")
            .unwrap();

        assert!(cosine_similarity(&query, &heat) > cosine_similarity(&query, &alien));
    }

    #[test]
    fn test_empty_text_rejected() {
        let embedder = SimpleEmbedder::default();
        assert!(matches!(embedder.embed("  "), Err(EmbeddingError::InvalidInput(_))));
    }

    #[test]
    fn test_cosine_edge_cases() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }
}
