//! # cinecurate-retrieval
//!
//! Question answering over the curated movie table.
//!
//! Curated CSV rows are loaded as `header: value` documents and served by
//! one of three strategies behind the [`QueryService`] trait:
//!
//! | Service | Grounding |
//! |---------|-----------|
//! | [`CagService`] | every document, joined into the system prompt |
//! | [`VectorRagService`] | the `k` most similar documents |
//! | [`GraphRagService`] | rows from a generated read-only Cypher query |
//!
//! Chat models, embedding models and databases sit behind the
//! [`LlmBackend`], [`Embedder`], [`VectorStore`] and [`GraphBackend`] traits.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use cinecurate_retrieval::prelude::*;
//! use std::sync::Arc;
//!
//! let documents = load_dir("data/curated/rag")?;
//! let index = VectorIndex::new(
//!     Arc::new(SimpleEmbedder::default()),
//!     Arc::new(InMemoryStore::new(256)),
//! );
//! index.index(&documents).await?;
//!
//! let service = VectorRagService::new(index, llm);
//! let response = service.ask(&QueryRequest::new("Who directed Heat?")).await?;
//! ```

pub mod cag;
pub mod document;
pub mod embedder;
pub mod error;
pub mod graph;
pub mod graph_rag;
pub mod llm;
pub mod prompt;
pub mod service;
pub mod store;
pub mod vector_rag;

pub use cag::CagService;
pub use document::{join_contents, load_csv, load_dir, Document, DocumentError};
pub use embedder::{cosine_similarity, Embedder, EmbeddingError, SimpleEmbedder};
pub use error::{Result, RetrievalError};
pub use graph::{ensure_read_only, extract_cypher, GraphBackend, GraphError, GraphRow};
pub use graph_rag::GraphRagService;
pub use llm::{ChatMessage, LlmBackend, LlmConfig, LlmError, MockBackend, Role};
pub use prompt::PromptTemplate;
pub use service::{QueryRequest, QueryResponse, QueryService, RetrievedContext, Strategy};
pub use store::{InMemoryStore, SearchResult, VectorError, VectorRecord, VectorStore};
pub use vector_rag::{Retrieval, VectorIndex, VectorRagService};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{load_dir, Document};
    pub use crate::{CagService, GraphRagService, VectorIndex, VectorRagService};
    pub use crate::{Embedder, GraphBackend, LlmBackend, VectorStore};
    pub use crate::{InMemoryStore, MockBackend, SimpleEmbedder};
    pub use crate::{QueryRequest, QueryResponse, QueryService, Result, RetrievalError};
}
