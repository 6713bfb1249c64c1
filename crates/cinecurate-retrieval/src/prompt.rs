//! Prompt templates for the three answer strategies.

use crate::llm::ChatMessage;

/// A prompt template for LLM requests.
pub trait PromptTemplate {
    /// Generate the user prompt text.
    fn generate(&self) -> String;

    /// Get the system prompt (if any).
    fn system_prompt(&self) -> Option<String> {
        None
    }

    /// System message (when present) followed by the user message.
    fn messages(&self) -> Vec<ChatMessage> {
        let mut messages = Vec::with_capacity(2);
        if let Some(system) = self.system_prompt() {
            messages.push(ChatMessage::system(system));
        }
        messages.push(ChatMessage::user(self.generate()));
        messages
    }
}

/// Whole-table context in the system message, question as the user turn.
#[derive(Debug, Clone)]
pub struct CagPrompt<'a> {
    pub context: &'a str,
    pub question: &'a str,
}

impl PromptTemplate for CagPrompt<'_> {
    fn system_prompt(&self) -> Option<String> {
        Some(format!(
            "You are the LLM generator in a CAG movie recommendation system. \
             Answer questions based on the provided context. If the answer is not in the context, \
             find the closest answer available from the context. Do not make up information.\n\n\
             Context:\n{}",
            self.context
        ))
    }

    fn generate(&self) -> String {
        self.question.to_string()
    }
}

/// Retrieved documents and question in a single user prompt.
#[derive(Debug, Clone)]
pub struct RagPrompt<'a> {
    pub context: &'a str,
    pub question: &'a str,
}

impl PromptTemplate for RagPrompt<'_> {
    fn generate(&self) -> String {
        format!(
            "You are the LLM generator in a RAG movie recommendation system. \
             Answer questions based on the provided context. If the answer is not in the context, \
             find the closest answer available from the context. Do not make up information.\n\n\
             Context: {}\n\
             Question: {}",
            self.context, self.question
        )
    }
}

/// Asks the Cypher model for a single read-only query.
#[derive(Debug, Clone)]
pub struct CypherPrompt<'a> {
    pub schema: &'a str,
    pub question: &'a str,
}

impl PromptTemplate for CypherPrompt<'_> {
    fn system_prompt(&self) -> Option<String> {
        Some(
            "You translate questions about movies into Cypher for a Neo4j graph database. \
             Use only the node labels, relationship types and properties in the schema. \
             Respond ONLY with a read-only Cypher query, no explanation."
                .to_string(),
        )
    }

    fn generate(&self) -> String {
        format!(
            "Schema:\n{}\n\nQuestion: {}\n\nCypher:",
            self.schema, self.question
        )
    }
}

/// Answer prompt built from database rows.
#[derive(Debug, Clone)]
pub struct GraphAnswerPrompt<'a> {
    pub question: &'a str,
    pub rows: &'a str,
}

impl PromptTemplate for GraphAnswerPrompt<'_> {
    fn generate(&self) -> String {
        format!(
            "You are the QA LLM in a RAG movie recommendation system with access to a Neo4j graph database. \
             Base your answer solely on the database results provided. Do not make up information.\n\n\
             CONTEXT:\n\
             The user asked the question: {}\n\
             The query returned the following results from the database: {}",
            self.question, self.rows
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::Role;

    #[test]
    fn test_cag_prompt_puts_context_in_system_message() {
        let prompt = CagPrompt {
            context: "originalTitle: Heat",
            question: "Who directed Heat?",
        };
        let messages = prompt.messages();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].role, Role::System);
        assert!(messages[0].content.ends_with("Context:\noriginalTitle: Heat"));
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[1].content, "Who directed Heat?");
    }

    #[test]
    fn test_rag_prompt_is_single_user_message() {
        let prompt = RagPrompt {
            context: "a\n\nb",
            question: "q?",
        };
        let messages = prompt.messages();
        assert_eq!(messages.len(), 1);
        assert!(messages[0].content.contains("Context: a\n\nb\nQuestion: q?"));
    }

    #[test]
    fn test_cypher_prompt_includes_schema() {
        let prompt = CypherPrompt {
            schema: "(:Person)-[:ACTED_IN]->(:Movie)",
            question: "Who starred in Heat?",
        };
        let text = prompt.generate();
        assert!(text.contains("(:Person)-[:ACTED_IN]->(:Movie)"));
        assert!(text.ends_with("Question: Who starred in Heat?\n\nCypher:"));
        assert!(prompt.system_prompt().is_some());
    }
}
