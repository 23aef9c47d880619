use serde::{Deserialize, Serialize};

/// Author of a transcript entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single transcript entry. Messages have no id; their position is
/// their identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default)]
    pub created_at: String,
}

impl Message {
    /// User message stamped with the current time. Content is kept as typed.
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            created_at: crate::now_timestamp(),
        }
    }

    pub fn assistant(content: impl Into<String>, created_at: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            created_at: created_at.into(),
        }
    }
}

/// Backend reply to a prompt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendReceipt {
    pub answer: String,
    #[serde(default)]
    pub created_at: String,
}

impl SendReceipt {
    pub fn into_message(self) -> Message {
        Message::assistant(self.answer, self.created_at)
    }
}
