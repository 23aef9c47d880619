//! Message exchange: one prompt round trip against the session store.
//!
//! Each attempt moves `Idle → Sending → {Reconciled | Discarded | RolledBack}`:
//! 1. Append the user message to the active transcript right away
//! 2. Send the prompt to the backend
//! 3. On success, append the reply if the same session is still active
//! 4. On failure, keep the user message and surface the error
//! 5. Return to `Idle` on every path

use std::cell::RefCell;
use std::rc::Rc;

use chat_types::{
    GatewayError,
    event::{SendResult, SessionEvent},
    message::Message,
};

use crate::store::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendPhase {
    Idle,
    Sending { chat_id: String, generation: u64 },
}

/// Result of one call to [`ExchangeController::send`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SendOutcome {
    /// Blank input or no active chat; nothing happened.
    Skipped,
    /// Another send was still outstanding.
    Rejected,
    /// The reply was appended after the user message.
    Reconciled,
    /// The reply arrived after the user switched chats and was dropped.
    Discarded,
    /// The backend call failed. The user message stays in the transcript.
    RolledBack(GatewayError),
}

impl SendOutcome {
    fn result(&self) -> Option<SendResult> {
        match self {
            SendOutcome::Reconciled => Some(SendResult::Reconciled),
            SendOutcome::Discarded => Some(SendResult::Discarded),
            SendOutcome::RolledBack(_) => Some(SendResult::RolledBack),
            SendOutcome::Skipped | SendOutcome::Rejected => None,
        }
    }
}

/// Drives sends. Clone-cheap; clones share the in-flight gate.
#[derive(Clone)]
pub struct ExchangeController {
    store: SessionStore,
    phase: Rc<RefCell<SendPhase>>,
}

/// Puts the phase back to `Idle` when the send finishes or its future is dropped.
struct PhaseReset(Rc<RefCell<SendPhase>>);

impl Drop for PhaseReset {
    fn drop(&mut self) {
        *self.0.borrow_mut() = SendPhase::Idle;
    }
}

impl ExchangeController {
    pub fn new(store: SessionStore) -> Self {
        Self {
            store,
            phase: Rc::new(RefCell::new(SendPhase::Idle)),
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    pub fn phase(&self) -> SendPhase {
        self.phase.borrow().clone()
    }

    pub fn is_loading(&self) -> bool {
        matches!(*self.phase.borrow(), SendPhase::Sending { .. })
    }

    /// Whether `send(input)` would go out right now.
    pub fn can_send(&self, input: &str) -> bool {
        !input.trim().is_empty() && !self.is_loading() && self.store.active_chat_id().is_some()
    }

    /// Send `input` as a prompt in the active chat.
    ///
    /// The emptiness check trims; the stored message keeps the input as typed.
    pub async fn send(&self, input: &str) -> SendOutcome {
        if input.trim().is_empty() {
            return SendOutcome::Skipped;
        }
        let chat_id = match self.store.active_chat_id() {
            Some(id) => id,
            None => return SendOutcome::Skipped,
        };
        if self.is_loading() {
            log::warn!("Send to {} rejected: a send is already in flight", chat_id);
            return SendOutcome::Rejected;
        }

        let generation = self.store.generation();
        *self.phase.borrow_mut() = SendPhase::Sending {
            chat_id: chat_id.clone(),
            generation,
        };
        let reset = PhaseReset(self.phase.clone());

        let message = Message::user(input);
        let prompt = message.content.clone();
        self.store.append_if_current(generation, message);

        let event_bus = self.store.event_bus();
        event_bus.emit(SessionEvent::SendStarted {
            chat_id: chat_id.clone(),
        });
        log::debug!("Sending prompt to {} ({} bytes)", chat_id, prompt.len());

        let outcome = match self.store.gateway().send_message(&chat_id, &prompt).await {
            Ok(receipt) => {
                if self.store.append_if_current(generation, receipt.into_message()) {
                    SendOutcome::Reconciled
                } else {
                    log::warn!("Reply for {} arrived after the active chat changed; dropped", chat_id);
                    SendOutcome::Discarded
                }
            }
            Err(e) => {
                self.store.set_error(e.clone());
                SendOutcome::RolledBack(e)
            }
        };

        drop(reset);
        if let Some(result) = outcome.result() {
            event_bus.emit(SessionEvent::SendFinished { chat_id, result });
        }
        outcome
    }
}
