use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use crate::message::Message;

/// Title given to chats created without one.
pub const DEFAULT_CHAT_TITLE: &str = "New chat";

/// Title shown when the backend returns a chat without one.
pub const FALLBACK_CHAT_TITLE: &str = "Chat";

/// Summary of a chat for listing. Identity is `chat_id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSummary {
    pub chat_id: String,
    pub title: String,
    #[serde(default)]
    pub created_at: String,
}

impl ChatSummary {
    /// Creation instant, or `None` when `created_at` is missing or not RFC 3339.
    pub fn created_instant(&self) -> Option<DateTime<FixedOffset>> {
        DateTime::parse_from_rfc3339(&self.created_at).ok()
    }
}

/// The active chat with its full transcript
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub chat_id: String,
    pub title: String,
    pub created_at: String,
    pub messages: Vec<Message>,
}

impl ChatSession {
    /// The "nothing selected" session.
    pub fn placeholder() -> Self {
        Self {
            chat_id: String::new(),
            title: String::new(),
            created_at: String::new(),
            messages: Vec::new(),
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.chat_id.is_empty()
    }

    pub fn summary(&self) -> ChatSummary {
        ChatSummary {
            chat_id: self.chat_id.clone(),
            title: self.title.clone(),
            created_at: self.created_at.clone(),
        }
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::placeholder()
    }
}
