use crate::document::DocumentError;
use crate::embedder::EmbeddingError;
use crate::graph::GraphError;
use crate::llm::LlmError;
use crate::store::VectorError;
use thiserror::Error;

/// Any failure while answering a question.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Llm(#[from] LlmError),

    #[error(transparent)]
    Embedding(#[from] EmbeddingError),

    #[error(transparent)]
    Vector(#[from] VectorError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

pub type Result<T> = std::result::Result<T, RetrievalError>;
