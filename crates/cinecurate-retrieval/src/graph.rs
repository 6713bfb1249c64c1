//! Graph database contract and Cypher handling for graph RAG.

use async_trait::async_trait;
use serde_json::{Map, Value};
use thiserror::Error;

/// Errors from the graph side of graph RAG.
#[derive(Error, Debug)]
pub enum GraphError {
    #[error("Connection error: {0}")]
    Connection(String),

    #[error("Query failed: {0}")]
    Query(String),

    #[error("No Cypher query found in response")]
    NoQuery,

    #[error("Refusing to run write clause {clause}: {query}")]
    WriteRejected { clause: String, query: String },
}

pub type GraphResult<T> = Result<T, GraphError>;

/// One result row keyed by the RETURN aliases.
pub type GraphRow = Map<String, Value>;

/// A queryable property graph (a Neo4j-style database).
#[async_trait]
pub trait GraphBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Text description of labels, relationships and properties for prompting.
    async fn schema(&self) -> GraphResult<String>;

    /// Run a read-only Cypher query.
    async fn query(&self, cypher: &str) -> GraphResult<Vec<GraphRow>>;
}

const CLAUSE_STARTS: &[&str] = &[
    "MATCH", "OPTIONAL", "WITH", "UNWIND", "CALL", "WHERE", "RETURN", "ORDER", "SKIP", "LIMIT",
];

const WRITE_CLAUSES: &[&str] = &["CREATE", "MERGE", "DELETE", "DETACH", "SET", "REMOVE", "DROP"];

/// Pull a Cypher query out of an LLM response.
///
/// Takes the first fenced block when there is one, otherwise the lines that
/// begin with a clause keyword, otherwise the trimmed response.
pub fn extract_cypher(response: &str) -> GraphResult<String> {
    let trimmed = response.trim();

    if let Some(start) = trimmed.find("```") {
        let after_fence = &trimmed[start + 3..];
        if let Some(end) = after_fence.find("```") {
            let block = strip_language_tag(&after_fence[..end]).trim();
            if !block.is_empty() {
                return Ok(block.to_string());
            }
        }
    }

    let lines: Vec<&str> = trimmed
        .lines()
        .map(str::trim)
        .filter(|line| {
            let upper = line.to_uppercase();
            CLAUSE_STARTS.iter().any(|kw| upper.starts_with(kw))
        })
        .collect();
    if !lines.is_empty() {
        return Ok(lines.join("\n"));
    }

    let stripped = trimmed
        .trim_start_matches("```cypher")
        .trim_start_matches("```")
        .trim_end_matches("```")
        .trim();
    if stripped.is_empty() {
        Err(GraphError::NoQuery)
    } else {
        Ok(stripped.to_string())
    }
}

/// Drop the info string after an opening fence.
///
/// A leading word counts as a tag when it ends the fence line or is
/// `cypher`; a clause keyword such as `MATCH` is kept.
fn strip_language_tag(block: &str) -> &str {
    let tag_len = block
        .find(|c: char| !c.is_alphanumeric())
        .unwrap_or(block.len());
    let (tag, rest) = block.split_at(tag_len);
    if tag.is_empty() || CLAUSE_STARTS.iter().any(|kw| tag.eq_ignore_ascii_case(kw)) {
        return block;
    }
    if tag.eq_ignore_ascii_case("cypher") || rest.starts_with(['\n', '\r']) {
        rest
    } else {
        block
    }
}

/// Reject queries that would modify the graph.
///
/// Keywords are matched as whole words outside string literals, so a
/// property such as `offset` or a title like `'Set It Up'` passes.
pub fn ensure_read_only(query: &str) -> GraphResult<()> {
    let words = keywords(query);
    for (i, word) in words.iter().enumerate() {
        if WRITE_CLAUSES.contains(&word.as_str()) {
            return Err(GraphError::WriteRejected {
                clause: word.clone(),
                query: query.to_string(),
            });
        }
        if word == "LOAD" && words.get(i + 1).map(String::as_str) == Some("CSV") {
            return Err(GraphError::WriteRejected {
                clause: "LOAD CSV".to_string(),
                query: query.to_string(),
            });
        }
    }
    Ok(())
}

/// Upper-cased identifier words of `query`, skipping quoted text.
///
/// Inside a string literal a backslash escapes the next character, and in
/// any quoted span a doubled quote stands for one quote.
fn keywords(query: &str) -> Vec<String> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut quote: Option<char> = None;
    let mut chars = query.chars().peekable();

    while let Some(c) = chars.next() {
        match quote {
            Some(q) if c == '\\' && q != '`' => {
                chars.next();
            }
            Some(q) if c == q => {
                if chars.peek() == Some(&q) {
                    chars.next();
                } else {
                    quote = None;
                }
            }
            Some(_) => {}
            None if c == '\'' || c == '"' || c == '`' => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
                quote = Some(c);
            }
            None if c.is_alphanumeric() || c == '_' => current.push(c.to_ascii_uppercase()),
            None => {
                if !current.is_empty() {
                    words.push(std::mem::take(&mut current));
                }
            }
        }
    }
    if !current.is_empty() {
        words.push(current);
    }
    words
}

/// Render rows as one JSON object per line for the answer prompt.
pub fn render_rows(rows: &[GraphRow]) -> String {
    rows.iter()
        .map(|row| Value::Object(row.clone()).to_string())
        .collect::<Vec<_>>()
        .join("\n")
}
