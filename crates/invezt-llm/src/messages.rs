//! Message types for LLM communication
//!
//! Messages follow Anthropic's content-block layout; other providers convert
//! to and from it at their boundary.

use serde::{Deserialize, Serialize};

/// Message role in a conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// User message
    User,
    /// Assistant message
    Assistant,
}

/// Content block in a message
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ContentBlock {
    /// Plain text content
    Text {
        /// Text content
        text: String,
    },

    /// Any block we do not interpret (search calls, search results, ...)
    #[serde(other)]
    Other,
}

/// Message content: either simple text or structured blocks
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum MessageContent {
    /// Simple text content
    Text(String),
    /// Structured content blocks
    Blocks(Vec<ContentBlock>),
}

/// A message in the conversation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Message {
    /// Message role
    pub role: Role,

    /// Message content
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<MessageContent>,
}

impl Message {
    /// Create a user message with text
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create an assistant message with text
    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: Some(MessageContent::Text(text.into())),
        }
    }

    /// Create an assistant message with no content at all
    pub fn empty_assistant() -> Self {
        Self {
            role: Role::Assistant,
            content: None,
        }
    }

    /// Text content of the message
    ///
    /// Text blocks are concatenated in order; providers with search grounding
    /// split one answer across several blocks. Returns `None` when the message
    /// carries no text at all.
    pub fn text(&self) -> Option<String> {
        match &self.content {
            Some(MessageContent::Text(s)) => Some(s.clone()),
            Some(MessageContent::Blocks(blocks)) => {
                let mut texts = blocks
                    .iter()
                    .filter_map(|b| match b {
                        ContentBlock::Text { text } => Some(text.as_str()),
                        ContentBlock::Other => None,
                    })
                    .peekable();
                texts.peek()?;
                Some(texts.collect())
            }
            None => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message() {
        let msg = Message::user("Hello");
        assert_eq!(msg.role, Role::User);
        assert_eq!(msg.text().as_deref(), Some("Hello"));
    }

    #[test]
    fn test_empty_assistant() {
        let msg = Message::empty_assistant();
        assert_eq!(msg.role, Role::Assistant);
        assert!(msg.text().is_none());
    }

    #[test]
    fn test_text_joins_blocks_and_skips_others() {
        let msg = Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(vec![
                ContentBlock::Other,
                ContentBlock::Text {
                    text: "{\"a\":".to_string(),
                },
                ContentBlock::Other,
                ContentBlock::Text {
                    text: "1}".to_string(),
                },
            ])),
        };
        assert_eq!(msg.text().as_deref(), Some("{\"a\":1}"));
    }

    #[test]
    fn test_blocks_without_text() {
        let msg = Message {
            role: Role::Assistant,
            content: Some(MessageContent::Blocks(vec![ContentBlock::Other])),
        };
        assert!(msg.text().is_none());
    }

    #[test]
    fn test_unknown_block_types_deserialize() {
        let blocks: Vec<ContentBlock> = serde_json::from_str(
            r#"[
                {"type": "server_tool_use", "id": "srvtoolu_1", "name": "web_search", "input": {"query": "ACME"}},
                {"type": "web_search_tool_result", "tool_use_id": "srvtoolu_1", "content": []},
                {"type": "text", "text": "done", "citations": null}
            ]"#,
        )
        .unwrap();

        assert!(matches!(blocks[0], ContentBlock::Other));
        assert!(matches!(blocks[1], ContentBlock::Other));
        assert!(matches!(&blocks[2], ContentBlock::Text { text } if text == "done"));
    }
}
