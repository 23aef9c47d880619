//! `ChatApp`, the object the page holds. Intents return promises; state is
//! read back through plain accessors after each resolved intent or drained
//! event batch.

use std::rc::Rc;

use gloo_utils::format::JsValueSerdeExt;
use js_sys::Promise;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;

use chat_core::event_bus::EventBus;
use chat_core::exchange::{ExchangeController, SendOutcome};
use chat_core::ports::GatewayPort;
use chat_core::store::SessionStore;
use chat_platform::gateway::{HttpGateway, MemoryGateway};
use chat_types::config::GatewayConfig;

#[wasm_bindgen]
pub struct ChatApp {
    store: SessionStore,
    controller: ExchangeController,
    event_bus: EventBus,
}

#[wasm_bindgen]
impl ChatApp {
    /// Client for the REST backend. `api_base` overrides the build-time
    /// `CHAT_API_BASE`.
    #[wasm_bindgen(constructor)]
    pub fn new(api_base: Option<String>) -> ChatApp {
        let mut config = GatewayConfig::from_env();
        if let Some(base) = api_base {
            config = config.with_api_base(base);
        }
        log::info!(
            "Backend: {} (timeout {}ms)",
            if config.api_base.is_empty() { "same origin" } else { config.api_base.as_str() },
            config.timeout_ms
        );
        Self::with_gateway(Rc::new(HttpGateway::new(config)))
    }

    /// Client backed by an in-page backend that echoes prompts.
    #[wasm_bindgen(js_name = inMemory)]
    pub fn in_memory() -> ChatApp {
        Self::with_gateway(Rc::new(MemoryGateway::new()))
    }

    /// Load the chat list. Resolves to nothing; rejects with the error message.
    pub fn initialize(&self) -> Promise {
        let store = self.store.clone();
        future_to_promise(async move {
            store.initialize().await.map_err(js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Create a chat and make it active. Resolves to the new chat summary.
    #[wasm_bindgen(js_name = createChat)]
    pub fn create_chat(&self, title: String) -> Promise {
        let store = self.store.clone();
        future_to_promise(async move {
            let summary = store.create_chat(&title).await.map_err(js_error)?;
            JsValue::from_serde(&summary).map_err(js_error)
        })
    }

    #[wasm_bindgen(js_name = selectChat)]
    pub fn select_chat(&self, chat_id: String) -> Promise {
        let store = self.store.clone();
        future_to_promise(async move {
            store.select_active(&chat_id).await.map_err(js_error)?;
            Ok(JsValue::UNDEFINED)
        })
    }

    /// Send a prompt in the active chat. Always resolves, to one of
    /// `skipped`, `rejected`, `reconciled`, `discarded` or `rolled_back`;
    /// a failure is readable through `error()`.
    #[wasm_bindgen(js_name = sendMessage)]
    pub fn send_message(&self, input: String) -> Promise {
        let controller = self.controller.clone();
        future_to_promise(async move {
            let outcome = controller.send(&input).await;
            Ok(JsValue::from_str(outcome_label(&outcome)))
        })
    }

    /// Chat summaries, newest first.
    pub fn chats(&self) -> Result<JsValue, JsValue> {
        JsValue::from_serde(&self.store.ordered_summaries()).map_err(js_error)
    }

    #[wasm_bindgen(js_name = activeChat)]
    pub fn active_chat(&self) -> Result<JsValue, JsValue> {
        JsValue::from_serde(&self.store.active()).map_err(js_error)
    }

    pub fn loading(&self) -> bool {
        self.controller.is_loading()
    }

    pub fn error(&self) -> Option<String> {
        self.store.last_error().map(|e| e.message)
    }

    #[wasm_bindgen(js_name = canSend)]
    pub fn can_send(&self, input: &str) -> bool {
        self.controller.can_send(input)
    }

    #[wasm_bindgen(js_name = drainEvents)]
    pub fn drain_events(&self) -> Result<JsValue, JsValue> {
        JsValue::from_serde(&self.event_bus.drain()).map_err(js_error)
    }
}

impl ChatApp {
    pub fn with_gateway(gateway: Rc<dyn GatewayPort>) -> ChatApp {
        let event_bus = EventBus::new();
        let store = SessionStore::new(gateway, event_bus.clone());
        let controller = ExchangeController::new(store.clone());
        ChatApp {
            store,
            controller,
            event_bus,
        }
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }
}

pub fn outcome_label(outcome: &SendOutcome) -> &'static str {
    match outcome {
        SendOutcome::Skipped => "skipped",
        SendOutcome::Rejected => "rejected",
        SendOutcome::Reconciled => "reconciled",
        SendOutcome::Discarded => "discarded",
        SendOutcome::RolledBack(_) => "rolled_back",
    }
}

fn js_error(e: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&e.to_string()).into()
}
