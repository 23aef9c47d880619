//! HTTP gateway for the chat backend.
//!
//! Uses browser `fetch()` via gloo-net for WASM compatibility. Every call
//! is raced against a gloo-timers timeout; a timeout is a `GatewayError`
//! like any other failure.

use std::future::Future;

use async_trait::async_trait;
use futures::future::{select, Either};
use gloo_net::http::Request;
use gloo_timers::future::TimeoutFuture;
use serde_json::json;

use chat_core::ports::GatewayPort;
use chat_types::{
    GatewayError, Result,
    config::GatewayConfig,
    message::SendReceipt,
    session::{ChatSession, ChatSummary},
};

use super::wire;

pub struct HttpGateway {
    config: GatewayConfig,
}

impl HttpGateway {
    pub fn new(config: GatewayConfig) -> Self {
        Self { config }
    }

    pub fn chats_url(&self) -> String {
        self.config.url("/chats")
    }

    pub fn chat_url(&self, chat_id: &str) -> String {
        self.config
            .url(&format!("/chats/{}", urlencoding::encode(chat_id)))
    }

    pub fn messages_url(&self, chat_id: &str) -> String {
        format!("{}/messages", self.chat_url(chat_id))
    }

    /// Send a request and return the body of a 2xx response.
    async fn fetch(&self, operation: &str, request: Request) -> Result<String> {
        let exchange = async {
            let response = request
                .send()
                .await
                .map_err(|e| GatewayError::network(operation, e))?;

            if !response.ok() {
                // The body only adds detail; the status is the error
                let body = response.text().await.unwrap_or_default();
                return Err(wire::status_error(operation, response.status(), &body));
            }
            response
                .text()
                .await
                .map_err(|e| GatewayError::network(operation, e))
        };
        self.with_timeout(operation, exchange).await
    }

    /// Race `fut` against the configured timeout. Losing the race is a
    /// `GatewayError` naming `operation`.
    pub async fn with_timeout<T>(
        &self,
        operation: &str,
        fut: impl Future<Output = Result<T>>,
    ) -> Result<T> {
        let timeout_ms = self.config.timeout_ms;
        let timer = TimeoutFuture::new(u32::try_from(timeout_ms).unwrap_or(u32::MAX));
        futures::pin_mut!(fut);

        match select(fut, timer).await {
            Either::Left((result, _)) => result,
            Either::Right(((), _)) => {
                log::warn!("{} timed out after {}ms", operation, timeout_ms);
                Err(GatewayError::timeout(operation, timeout_ms))
            }
        }
    }

    fn get(&self, operation: &str, url: &str) -> Result<Request> {
        log::debug!("GET {}", url);
        Request::get(url)
            .build()
            .map_err(|e| GatewayError::network(operation, e))
    }

    fn post(&self, operation: &str, url: &str, body: &serde_json::Value) -> Result<Request> {
        log::debug!("POST {}", url);
        Request::post(url)
            .header("Content-Type", "application/json")
            .json(body)
            .map_err(|e| GatewayError::network(operation, e))
    }
}

#[async_trait(?Send)]
impl GatewayPort for HttpGateway {
    async fn create_chat(&self, title: &str) -> Result<ChatSummary> {
        const OP: &str = "create chat";
        let request = self.post(OP, &self.chats_url(), &json!({ "title": title }))?;
        let body = self.fetch(OP, request).await?;
        wire::decode_created(&body, title)
    }

    async fn list_chats(&self) -> Result<Vec<ChatSummary>> {
        const OP: &str = "list chats";
        let request = self.get(OP, &self.chats_url())?;
        let body = self.fetch(OP, request).await?;
        wire::decode_summaries(&body)
    }

    async fn get_chat(&self, chat_id: &str) -> Result<ChatSession> {
        const OP: &str = "get chat";
        let request = self.get(OP, &self.chat_url(chat_id))?;
        let body = self.fetch(OP, request).await?;
        wire::decode_session(&body, chat_id)
    }

    async fn send_message(&self, chat_id: &str, prompt: &str) -> Result<SendReceipt> {
        const OP: &str = "send message";
        let request = self.post(OP, &self.messages_url(chat_id), &json!({ "prompt": prompt }))?;
        let body = self.fetch(OP, request).await?;
        wire::decode_receipt(&body)
    }

    fn gateway_name(&self) -> &str {
        "http"
    }
}
