//! Port traits at the hexagonal architecture boundary.
//!
//! The backend chat service is reached only through [`GatewayPort`].
//! Implementations live in `chat-platform` (browser fetch, in-memory).
//! The core never imports platform code.

use async_trait::async_trait;
use chat_types::{
    Result,
    message::SendReceipt,
    session::{ChatSession, ChatSummary},
};

/// Typed wrapper around the four backend operations. One remote call per
/// method, no retries; every failure is a `GatewayError`.
#[async_trait(?Send)]
pub trait GatewayPort {
    /// `POST /chats`. The backend assigns the id.
    async fn create_chat(&self, title: &str) -> Result<ChatSummary>;

    /// `GET /chats`. A missing list is an empty list.
    async fn list_chats(&self) -> Result<Vec<ChatSummary>>;

    /// `GET /chats/{chatId}` with missing fields filled with defaults.
    async fn get_chat(&self, chat_id: &str) -> Result<ChatSession>;

    /// `POST /chats/{chatId}/messages`
    async fn send_message(&self, chat_id: &str, prompt: &str) -> Result<SendReceipt>;

    /// Name of this backend (for logging/debug)
    fn gateway_name(&self) -> &str;
}
