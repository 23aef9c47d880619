//! Session store: the chat list plus the one active transcript.
//!
//! The store is a clone-cheap handle over `Rc<RefCell<..>>`, like the
//! event bus. Every mutation happens inside a short borrow that never
//! spans an `.await`, so gateway calls can be in flight while the
//! presentation keeps reading state.

use std::cell::RefCell;
use std::cmp::Reverse;
use std::rc::Rc;

use chat_types::{
    GatewayError, Result,
    event::SessionEvent,
    message::Message,
    session::{ChatSession, ChatSummary, DEFAULT_CHAT_TITLE},
};

use crate::event_bus::EventBus;
use crate::ports::GatewayPort;

struct StoreState {
    /// Insertion order, newest additions first. At most one entry per id.
    summaries: Vec<ChatSummary>,
    active: ChatSession,
    /// Bumped every time `active` is replaced.
    generation: u64,
    last_error: Option<GatewayError>,
}

#[derive(Clone)]
pub struct SessionStore {
    state: Rc<RefCell<StoreState>>,
    gateway: Rc<dyn GatewayPort>,
    event_bus: EventBus,
}

impl SessionStore {
    pub fn new(gateway: Rc<dyn GatewayPort>, event_bus: EventBus) -> Self {
        Self {
            state: Rc::new(RefCell::new(StoreState {
                summaries: Vec::new(),
                active: ChatSession::placeholder(),
                generation: 0,
                last_error: None,
            })),
            gateway,
            event_bus,
        }
    }

    pub fn gateway(&self) -> Rc<dyn GatewayPort> {
        self.gateway.clone()
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    // ─── Intents ─────────────────────────────────────────────

    /// Load the chat list. On failure the current list is kept and the
    /// error becomes the current error.
    pub async fn initialize(&self) -> Result<()> {
        self.clear_error();
        let listed = match self.gateway.list_chats().await {
            Ok(listed) => listed,
            Err(e) => return Err(self.surface(e)),
        };

        let mut summaries: Vec<ChatSummary> = Vec::with_capacity(listed.len());
        for summary in listed {
            if !summaries.iter().any(|s| s.chat_id == summary.chat_id) {
                summaries.push(summary);
            }
        }
        let count = summaries.len();
        self.state.borrow_mut().summaries = summaries;

        log::info!("Loaded {} chats from {}", count, self.gateway.gateway_name());
        self.event_bus.emit(SessionEvent::SummariesLoaded { count });
        Ok(())
    }

    /// Create a chat on the backend, list it, and make it active.
    ///
    /// If the follow-up select fails the new summary stays listed and the
    /// previously active session is left in place.
    pub async fn create_chat(&self, title: &str) -> Result<ChatSummary> {
        self.clear_error();
        let title = match title.trim() {
            "" => DEFAULT_CHAT_TITLE,
            t => t,
        };

        let summary = match self.gateway.create_chat(title).await {
            Ok(summary) => summary,
            Err(e) => return Err(self.surface(e)),
        };
        log::info!("Created chat {} ({})", summary.chat_id, summary.title);

        self.add_summary(summary.clone());
        self.event_bus.emit(SessionEvent::ChatCreated {
            chat_id: summary.chat_id.clone(),
        });

        self.select_active(&summary.chat_id).await?;
        Ok(summary)
    }

    /// Put a summary at the front of the list. A summary with a known id
    /// replaces the old entry.
    pub fn add_summary(&self, summary: ChatSummary) {
        let mut state = self.state.borrow_mut();
        state.summaries.retain(|s| s.chat_id != summary.chat_id);
        state.summaries.insert(0, summary);
    }

    /// Fetch a chat and replace the active session with it. On failure the
    /// previous active session is untouched.
    pub async fn select_active(&self, chat_id: &str) -> Result<()> {
        self.clear_error();
        let session = match self.gateway.get_chat(chat_id).await {
            Ok(session) => session,
            Err(e) => return Err(self.surface(e)),
        };

        let (chat_id, generation) = {
            let mut state = self.state.borrow_mut();
            state.active = session;
            state.generation += 1;
            (state.active.chat_id.clone(), state.generation)
        };

        log::info!("Active chat is now {} (generation {})", chat_id, generation);
        self.event_bus.emit(SessionEvent::ActiveChanged { chat_id, generation });
        Ok(())
    }

    // ─── Transcript ──────────────────────────────────────────

    /// Append to the active transcript. Returns false when nothing is active.
    pub fn append_to_active(&self, message: Message) -> bool {
        let generation = self.generation();
        self.append_if_current(generation, message)
    }

    /// Append only if the active session is still the one that was active
    /// at `generation`.
    pub fn append_if_current(&self, generation: u64, message: Message) -> bool {
        let (chat_id, role) = {
            let mut state = self.state.borrow_mut();
            if state.generation != generation || state.active.is_placeholder() {
                return false;
            }
            let role = message.role;
            state.active.messages.push(message);
            (state.active.chat_id.clone(), role)
        };
        log::debug!("Appended {} message to {}", role.as_str(), chat_id);
        self.event_bus.emit(SessionEvent::MessageAppended { chat_id, role });
        true
    }

    // ─── Views ───────────────────────────────────────────────

    /// Summaries newest first. Entries whose timestamp is missing or does
    /// not parse go last; ties keep list order.
    pub fn ordered_summaries(&self) -> Vec<ChatSummary> {
        let mut ordered = self.state.borrow().summaries.clone();
        ordered.sort_by_cached_key(|s| Reverse(s.created_instant()));
        ordered
    }

    /// Summaries in list order (most recently added first).
    pub fn summaries(&self) -> Vec<ChatSummary> {
        self.state.borrow().summaries.clone()
    }

    pub fn contains(&self, chat_id: &str) -> bool {
        self.state.borrow().summaries.iter().any(|s| s.chat_id == chat_id)
    }

    pub fn active(&self) -> ChatSession {
        self.state.borrow().active.clone()
    }

    pub fn active_chat_id(&self) -> Option<String> {
        let state = self.state.borrow();
        if state.active.is_placeholder() {
            None
        } else {
            Some(state.active.chat_id.clone())
        }
    }

    pub fn generation(&self) -> u64 {
        self.state.borrow().generation
    }

    // ─── Errors ──────────────────────────────────────────────

    /// The current error. Only the most recent one is kept.
    pub fn last_error(&self) -> Option<GatewayError> {
        self.state.borrow().last_error.clone()
    }

    pub fn clear_error(&self) {
        self.state.borrow_mut().last_error = None;
    }

    pub fn set_error(&self, error: GatewayError) {
        self.surface(error);
    }

    fn surface(&self, error: GatewayError) -> GatewayError {
        log::warn!("{}", error);
        self.state.borrow_mut().last_error = Some(error.clone());
        self.event_bus.emit(SessionEvent::Error {
            message: error.message.clone(),
        });
        error
    }
}
