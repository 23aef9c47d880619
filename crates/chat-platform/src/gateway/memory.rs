//! In-memory chat backend.
//! Follows the REST backend's rules but keeps everything in the page;
//! nothing survives a reload.

use std::cell::{Cell, RefCell};

use async_trait::async_trait;
use chat_core::ports::GatewayPort;
use chat_types::{
    GatewayError, Result,
    message::{Message, Role, SendReceipt},
    session::{ChatSession, ChatSummary, DEFAULT_CHAT_TITLE},
};

/// Produces the assistant answer from the stored history and the new prompt.
pub type Responder = Box<dyn Fn(&[Message], &str) -> Result<String>>;

/// Answers every prompt by repeating it.
pub fn echo_responder() -> Responder {
    Box::new(|_history: &[Message], prompt: &str| Ok(format!("echo: {}", prompt)))
}

pub struct MemoryGateway {
    chats: RefCell<Vec<ChatSession>>,
    responder: Responder,
    offline: Cell<bool>,
}

impl MemoryGateway {
    pub fn new() -> Self {
        Self::with_responder(echo_responder())
    }

    pub fn with_responder(responder: Responder) -> Self {
        Self {
            chats: RefCell::new(Vec::new()),
            responder,
            offline: Cell::new(false),
        }
    }

    /// While offline every call fails as if the network were down.
    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn chat_count(&self) -> usize {
        self.chats.borrow().len()
    }

    fn check_online(&self, operation: &str) -> Result<()> {
        if self.offline.get() {
            return Err(GatewayError::network(operation, "backend unreachable"));
        }
        Ok(())
    }
}

impl Default for MemoryGateway {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait(?Send)]
impl GatewayPort for MemoryGateway {
    async fn create_chat(&self, title: &str) -> Result<ChatSummary> {
        self.check_online("create chat")?;
        let title = match title.trim() {
            "" => DEFAULT_CHAT_TITLE,
            t => t,
        };
        let chat = ChatSession {
            chat_id: format!("chat-{}", uuid::Uuid::new_v4()),
            title: title.to_string(),
            created_at: chat_types::now_timestamp(),
            messages: Vec::new(),
        };
        let summary = chat.summary();
        self.chats.borrow_mut().push(chat);
        Ok(summary)
    }

    async fn list_chats(&self) -> Result<Vec<ChatSummary>> {
        self.check_online("list chats")?;
        let mut summaries: Vec<ChatSummary> =
            self.chats.borrow().iter().map(|c| c.summary()).collect();
        summaries.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(summaries)
    }

    async fn get_chat(&self, chat_id: &str) -> Result<ChatSession> {
        self.check_online("get chat")?;
        self.chats
            .borrow()
            .iter()
            .find(|c| c.chat_id == chat_id)
            .cloned()
            .ok_or_else(|| GatewayError::status("get chat", 404, "chat_not_found"))
    }

    async fn send_message(&self, chat_id: &str, prompt: &str) -> Result<SendReceipt> {
        const OP: &str = "send message";
        self.check_online(OP)?;
        let prompt = prompt.trim();
        if prompt.is_empty() {
            return Err(GatewayError::status(OP, 400, "prompt_required"));
        }

        let mut chats = self.chats.borrow_mut();
        let chat = chats
            .iter_mut()
            .find(|c| c.chat_id == chat_id)
            .ok_or_else(|| GatewayError::status(OP, 404, "chat_not_found"))?;

        let answer = (self.responder)(&chat.messages, prompt)
            .map_err(|e| GatewayError::status(OP, 500, &format!("send_message_failed: {}", e)))?;

        // Both turns share one timestamp
        let created_at = chat_types::now_timestamp();
        chat.messages.push(Message {
            role: Role::User,
            content: prompt.to_string(),
            created_at: created_at.clone(),
        });
        chat.messages.push(Message::assistant(answer.clone(), created_at.clone()));

        Ok(SendReceipt { answer, created_at })
    }

    fn gateway_name(&self) -> &str {
        "memory"
    }
}
