//! Vector retrieval-augmented generation.

use crate::document::Document;
use crate::embedder::Embedder;
use crate::error::Result;
use crate::llm::LlmBackend;
use crate::prompt::{PromptTemplate, RagPrompt};
use crate::service::{
    QueryRequest, QueryResponse, QueryService, RetrievedContext, Strategy, DEFAULT_K,
    DEFAULT_RELEVANCE_THRESHOLD,
};
use crate::store::{VectorRecord, VectorStore};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

const CONTENT_KEY: &str = "content";
const SOURCE_KEY: &str = "source";

/// Ranked documents for one question plus any relevance warnings.
#[derive(Debug, Clone, Default)]
pub struct Retrieval {
    pub contexts: Vec<RetrievedContext>,
    pub warnings: Vec<String>,
}

impl Retrieval {
    /// Retrieved texts joined by blank lines.
    pub fn joined(&self) -> String {
        self.contexts
            .iter()
            .map(|c| c.content.as_str())
            .collect::<Vec<_>>()
            .join("\n\n")
    }
}

/// Embedder and store pair that indexes documents and searches them.
pub struct VectorIndex {
    embedder: Arc<dyn Embedder>,
    store: Arc<dyn VectorStore>,
}

impl VectorIndex {
    pub fn new(embedder: Arc<dyn Embedder>, store: Arc<dyn VectorStore>) -> Self {
        Self { embedder, store }
    }

    /// Replace the store contents with `documents`, ids `row-<n>`.
    pub async fn index(&self, documents: &[Document]) -> Result<usize> {
        self.store.clear().await?;
        if documents.is_empty() {
            return Ok(0);
        }

        let texts: Vec<&str> = documents.iter().map(|d| d.content.as_str()).collect();
        let vectors = self.embedder.embed_batch(&texts)?;

        let records: Vec<VectorRecord> = documents
            .iter()
            .zip(vectors)
            .enumerate()
            .map(|(n, (document, vector))| {
                VectorRecord::new(format!("row-{}", n), vector)
                    .with_metadata(CONTENT_KEY, document.content.clone())
                    .with_metadata(SOURCE_KEY, document.source.clone())
            })
            .collect();

        let count = records.len();
        self.store.upsert(records).await?;
        info!(
            documents = count,
            store = self.store.name(),
            embedder = self.embedder.model_name(),
            "Indexed documents"
        );
        Ok(count)
    }

    /// Top `k` documents for `question`, flagging empty or weak matches.
    pub async fn retrieve(&self, question: &str, k: usize, threshold: f32) -> Result<Retrieval> {
        let vector = self.embedder.embed(question)?;
        let hits = self.store.search(&vector, k).await?;

        let mut warnings = Vec::new();
        match hits.first() {
            None => {
                warn!("No matching documents");
                warnings.push("Unable to find matching results.".to_string());
            }
            Some(best) if best.score < threshold => {
                warn!(score = best.score, threshold, "Low similarity to stored embeddings");
                warnings.push(format!(
                    "Query has low similarity to stored embeddings ({:.4})",
                    best.score
                ));
            }
            Some(best) => debug!(score = best.score, "Best match"),
        }

        let contexts = hits
            .into_iter()
            .map(|hit| RetrievedContext {
                content: hit
                    .metadata
                    .get(CONTENT_KEY)
                    .and_then(|v| v.as_str())
                    .unwrap_or_default()
                    .to_string(),
                score: Some(hit.score),
                source: hit
                    .metadata
                    .get(SOURCE_KEY)
                    .and_then(|v| v.as_str())
                    .map(str::to_string),
            })
            .collect();

        Ok(Retrieval { contexts, warnings })
    }

    pub async fn indexed_count(&self) -> Result<usize> {
        Ok(self.store.count().await?)
    }
}

/// Answers from the `k` most similar documents.
pub struct VectorRagService {
    index: VectorIndex,
    llm: Arc<dyn LlmBackend>,
    k: usize,
    relevance_threshold: f32,
}

impl VectorRagService {
    pub fn new(index: VectorIndex, llm: Arc<dyn LlmBackend>) -> Self {
        Self {
            index,
            llm,
            k: DEFAULT_K,
            relevance_threshold: DEFAULT_RELEVANCE_THRESHOLD,
        }
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_relevance_threshold(mut self, threshold: f32) -> Self {
        self.relevance_threshold = threshold;
        self
    }

    pub fn index(&self) -> &VectorIndex {
        &self.index
    }
}

#[async_trait]
impl QueryService for VectorRagService {
    fn strategy(&self) -> Strategy {
        Strategy::VectorRag
    }

    async fn ask(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let question = request.validated_question()?;
        let k = request.k.unwrap_or(self.k);
        let retrieval = self
            .index
            .retrieve(question, k, self.relevance_threshold)
            .await?;

        let context = retrieval.joined();
        let prompt = RagPrompt {
            context: &context,
            question,
        };
        let answer = self.llm.chat(&prompt.messages()).await?;

        Ok(QueryResponse {
            answer,
            context: retrieval.contexts,
            warnings: retrieval.warnings,
            generated_query: None,
        })
    }
}
