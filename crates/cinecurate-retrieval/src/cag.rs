//! Cache-augmented generation: the whole curated table goes into the prompt.

use crate::document::{join_contents, load_dir, Document};
use crate::error::Result;
use crate::llm::LlmBackend;
use crate::prompt::{CagPrompt, PromptTemplate};
use crate::service::{QueryRequest, QueryResponse, QueryService, RetrievedContext, Strategy};
use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tracing::{debug, info};

/// Answers every question against the full document context.
pub struct CagService {
    llm: Arc<dyn LlmBackend>,
    context: String,
    documents: usize,
}

impl CagService {
    /// Build the context once from already loaded documents.
    pub fn new(llm: Arc<dyn LlmBackend>, documents: &[Document]) -> Self {
        let context = join_contents(documents);
        info!(
            documents = documents.len(),
            chars = context.len(),
            "Built CAG context"
        );
        Self {
            llm,
            context,
            documents: documents.len(),
        }
    }

    /// Load every curated CSV under `dir` and build the context.
    pub fn from_dir(llm: Arc<dyn LlmBackend>, dir: impl AsRef<Path>) -> Result<Self> {
        let documents = load_dir(dir)?;
        Ok(Self::new(llm, &documents))
    }

    pub fn context(&self) -> &str {
        &self.context
    }

    pub fn document_count(&self) -> usize {
        self.documents
    }
}

#[async_trait]
impl QueryService for CagService {
    fn strategy(&self) -> Strategy {
        Strategy::Cag
    }

    async fn ask(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let question = request.validated_question()?;
        let prompt = CagPrompt {
            context: &self.context,
            question,
        };
        debug!(backend = self.llm.name(), "Sending CAG prompt");
        let answer = self.llm.chat(&prompt.messages()).await?;

        Ok(QueryResponse {
            answer,
            context: vec![RetrievedContext {
                content: self.context.clone(),
                score: None,
                source: None,
            }],
            warnings: Vec::new(),
            generated_query: None,
        })
    }
}
