//! Wire types for the chat endpoints

use serde::{Deserialize, Serialize};

/// Who produced a message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// The user
    Human,
    /// The assistant
    Ai,
    /// Client-local notices (logged out, session expired). Never sent to the
    /// backend; outgoing history is filtered to human/ai.
    System,
}

/// One entry of the conversation transcript
///
/// History rows from the backend carry extra columns (`id`, `user_id`,
/// `timestamp`); only `role` and `content` are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// A message typed by the user
    pub fn human(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Human,
            content: content.into(),
        }
    }

    /// A message from the assistant
    pub fn ai(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::Ai,
            content: content.into(),
        }
    }

    /// A client-local notice
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }
}

/// Request body for the chat endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    /// The newly typed user message
    pub user_message: String,

    /// Prior transcript, human/ai entries only
    pub chat_history: Vec<Message>,
}

/// Response body of the chat endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    /// The assistant's reply
    pub ai_response: String,

    /// The authoritative transcript after this exchange; replaces whatever
    /// the client holds
    pub updated_chat_history: Vec<Message>,
}
