//! Request/response types shared by every answer strategy.

use crate::error::{Result, RetrievalError};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Default number of documents retrieved per question.
pub const DEFAULT_K: usize = 3;

/// Best-hit score below which a retrieval is flagged as weak.
pub const DEFAULT_RELEVANCE_THRESHOLD: f32 = 0.7;

/// How a service grounds its answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strategy {
    /// Whole curated table in the prompt.
    Cag,
    /// Top-k similar documents.
    VectorRag,
    /// Generated Cypher against a graph database.
    GraphRag,
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Strategy::Cag => "cag",
            Strategy::VectorRag => "vector-rag",
            Strategy::GraphRag => "graph-rag",
        })
    }
}

/// A single question.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub question: String,
    /// Retrieval depth override; ignored by CAG.
    pub k: Option<usize>,
}

impl QueryRequest {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            k: None,
        }
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = Some(k);
        self
    }

    /// Trimmed question, rejecting blank input.
    pub fn validated_question(&self) -> Result<&str> {
        let question = self.question.trim();
        if question.is_empty() {
            return Err(RetrievalError::InvalidRequest("question is empty".into()));
        }
        Ok(question)
    }
}

/// A piece of grounding text handed to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrievedContext {
    pub content: String,
    /// Similarity, for vector retrieval.
    pub score: Option<f32>,
    pub source: Option<String>,
}

/// The answer plus what it was grounded on.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryResponse {
    pub answer: String,
    pub context: Vec<RetrievedContext>,
    pub warnings: Vec<String>,
    /// Cypher that produced the context, for graph RAG.
    pub generated_query: Option<String>,
}

/// One stateless question/answer call.
#[async_trait]
pub trait QueryService: Send + Sync {
    fn strategy(&self) -> Strategy;

    async fn ask(&self, request: &QueryRequest) -> Result<QueryResponse>;
}
