use serde::{Deserialize, Serialize};
use crate::message::Role;

/// How a send attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SendResult {
    Reconciled,
    Discarded,
    RolledBack,
}

/// Events emitted by the session store and exchange controller.
/// The presentation layer drains these to know what to redraw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum SessionEvent {
    /// The chat list was (re)loaded from the backend
    SummariesLoaded { count: usize },

    /// The backend created a chat and it was added to the list
    ChatCreated { chat_id: String },

    /// The active session was replaced
    ActiveChanged { chat_id: String, generation: u64 },

    /// A message landed in the active transcript
    MessageAppended { chat_id: String, role: Role },

    /// A prompt went out to the backend
    SendStarted { chat_id: String },

    /// A prompt round trip finished
    SendFinished { chat_id: String, result: SendResult },

    /// An error was surfaced
    Error { message: String },
}
