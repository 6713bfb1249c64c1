//! Graph retrieval-augmented generation over a Cypher database.

use crate::error::Result;
use crate::graph::{ensure_read_only, extract_cypher, render_rows, GraphBackend};
use crate::llm::LlmBackend;
use crate::prompt::{CypherPrompt, GraphAnswerPrompt, PromptTemplate};
use crate::service::{QueryRequest, QueryResponse, QueryService, RetrievedContext, Strategy};
use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Default cap on rows passed to the answer model.
pub const DEFAULT_TOP_K: usize = 10;

/// Generates Cypher with one model and answers from the rows with another.
pub struct GraphRagService {
    cypher_llm: Arc<dyn LlmBackend>,
    qa_llm: Arc<dyn LlmBackend>,
    graph: Arc<dyn GraphBackend>,
    top_k: usize,
}

impl GraphRagService {
    pub fn new(
        cypher_llm: Arc<dyn LlmBackend>,
        qa_llm: Arc<dyn LlmBackend>,
        graph: Arc<dyn GraphBackend>,
    ) -> Self {
        Self {
            cypher_llm,
            qa_llm,
            graph,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: usize) -> Self {
        self.top_k = top_k;
        self
    }

    /// Ask the Cypher model for a query and check it is read-only.
    pub async fn generate_cypher(&self, question: &str) -> Result<String> {
        let schema = self.graph.schema().await?;
        let prompt = CypherPrompt {
            schema: &schema,
            question,
        };
        let response = self.cypher_llm.chat(&prompt.messages()).await?;
        let cypher = extract_cypher(&response)?;
        ensure_read_only(&cypher)?;
        debug!(
            model = %self.cypher_llm.config().model,
            cypher = %cypher,
            "Generated Cypher"
        );
        Ok(cypher)
    }
}

#[async_trait]
impl QueryService for GraphRagService {
    fn strategy(&self) -> Strategy {
        Strategy::GraphRag
    }

    async fn ask(&self, request: &QueryRequest) -> Result<QueryResponse> {
        let question = request.validated_question()?;
        let top_k = request.k.unwrap_or(self.top_k);
        let cypher = self.generate_cypher(question).await?;

        let mut rows = self.graph.query(&cypher).await?;
        info!(graph = self.graph.name(), rows = rows.len(), "Cypher query returned");

        let mut warnings = Vec::new();
        if rows.is_empty() {
            warn!("Cypher query returned no rows");
            warnings.push("Unable to find matching results.".to_string());
        }
        rows.truncate(top_k);

        let rendered = render_rows(&rows);
        let prompt = GraphAnswerPrompt {
            question,
            rows: &rendered,
        };
        debug!(model = %self.qa_llm.config().model, "Sending graph answer prompt");
        let answer = self.qa_llm.chat(&prompt.messages()).await?;

        let context = rows
            .into_iter()
            .map(|row| RetrievedContext {
                content: serde_json::Value::Object(row).to_string(),
                score: None,
                source: None,
            })
            .collect();

        Ok(QueryResponse {
            answer,
            context,
            warnings,
            generated_query: Some(cypher),
        })
    }
}
