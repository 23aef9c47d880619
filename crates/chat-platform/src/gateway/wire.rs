//! Backend JSON shapes and lenient decoding into chat-types.
//!
//! Everything the backend may omit or mistype is optional here; the decode
//! helpers fill the gaps so a sparse or malformed response still yields a
//! usable value.

use serde::de::{DeserializeOwned, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use chat_types::{
    GatewayError, Result,
    message::{Message, Role, SendReceipt},
    session::{ChatSession, ChatSummary, FALLBACK_CHAT_TITLE},
};

/// Longest plain-text error body quoted in an error message.
const MAX_DETAIL_CHARS: usize = 200;

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireSummary {
    #[serde(default, deserialize_with = "lenient")]
    chat_id: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    title: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    created_at: Option<String>,
}

#[derive(Deserialize)]
struct WireChatList {
    #[serde(default, deserialize_with = "lenient_list")]
    chats: Vec<WireSummary>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireMessage {
    #[serde(default, deserialize_with = "lenient")]
    role: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    content: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    created_at: Option<String>,
}

#[derive(Deserialize)]
struct WireChat {
    #[serde(default, deserialize_with = "lenient")]
    chat: Option<WireSummary>,
    #[serde(default, deserialize_with = "lenient_list")]
    messages: Vec<WireMessage>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireReceipt {
    #[serde(default, deserialize_with = "lenient")]
    answer: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    created_at: Option<String>,
}

/// `{"error": "...", "detail": "..."}` as returned by the backend on failure
#[derive(Deserialize)]
struct WireError {
    #[serde(default, deserialize_with = "lenient")]
    error: Option<String>,
    #[serde(default, deserialize_with = "lenient")]
    detail: Option<String>,
}

/// A field of the wrong JSON type reads as absent instead of failing the
/// whole response.
fn lenient<'de, D, T>(deserializer: D) -> std::result::Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

/// Entries that do not decode are dropped; a non-array reads as empty.
fn lenient_list<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let items = match Value::deserialize(deserializer)? {
        Value::Array(items) => items,
        _ => Vec::new(),
    };
    Ok(items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect())
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn parse_role(role: Option<&str>) -> Role {
    match role {
        Some("user") => Role::User,
        _ => Role::Assistant,
    }
}

pub(crate) fn decode_created(body: &str, requested_title: &str) -> Result<ChatSummary> {
    let wire: WireSummary =
        serde_json::from_str(body).map_err(|e| GatewayError::decode("create chat", e))?;
    let chat_id = non_blank(wire.chat_id)
        .ok_or_else(|| GatewayError::decode("create chat", "missing chatId"))?;
    Ok(ChatSummary {
        chat_id,
        title: non_blank(wire.title).unwrap_or_else(|| requested_title.to_string()),
        created_at: wire.created_at.unwrap_or_default(),
    })
}

/// Entries without a `chatId` cannot be selected and are skipped.
pub(crate) fn decode_summaries(body: &str) -> Result<Vec<ChatSummary>> {
    let wire: WireChatList =
        serde_json::from_str(body).map_err(|e| GatewayError::decode("list chats", e))?;
    let summaries = wire
        .chats
        .into_iter()
        .filter_map(|s| {
            let chat_id = non_blank(s.chat_id)?;
            Some(ChatSummary {
                chat_id,
                title: non_blank(s.title).unwrap_or_else(|| FALLBACK_CHAT_TITLE.to_string()),
                created_at: s.created_at.unwrap_or_default(),
            })
        })
        .collect();
    Ok(summaries)
}

pub(crate) fn decode_session(body: &str, requested_id: &str) -> Result<ChatSession> {
    let wire: WireChat =
        serde_json::from_str(body).map_err(|e| GatewayError::decode("get chat", e))?;
    let meta = wire.chat.unwrap_or(WireSummary {
        chat_id: None,
        title: None,
        created_at: None,
    });
    let messages = wire
        .messages
        .into_iter()
        .map(|m| Message {
            role: parse_role(m.role.as_deref()),
            content: m.content.unwrap_or_default(),
            created_at: m.created_at.unwrap_or_default(),
        })
        .collect();

    Ok(ChatSession {
        chat_id: non_blank(meta.chat_id).unwrap_or_else(|| requested_id.to_string()),
        title: non_blank(meta.title).unwrap_or_else(|| FALLBACK_CHAT_TITLE.to_string()),
        created_at: meta.created_at.unwrap_or_default(),
        messages,
    })
}

pub(crate) fn decode_receipt(body: &str) -> Result<SendReceipt> {
    let wire: WireReceipt =
        serde_json::from_str(body).map_err(|e| GatewayError::decode("send message", e))?;
    let answer = wire
        .answer
        .ok_or_else(|| GatewayError::decode("send message", "missing answer"))?;
    Ok(SendReceipt {
        answer,
        created_at: wire.created_at.unwrap_or_default(),
    })
}

/// Human-readable summary of a failed response body.
pub(crate) fn error_detail(body: &str) -> String {
    if let Ok(wire) = serde_json::from_str::<WireError>(body) {
        match (non_blank(wire.error), non_blank(wire.detail)) {
            (Some(error), Some(detail)) => return format!("{}: {}", error, detail),
            (Some(error), None) => return error,
            (None, Some(detail)) => return detail,
            (None, None) => {}
        }
    }
    body.trim().chars().take(MAX_DETAIL_CHARS).collect()
}

/// Error for a non-2xx response. `body` is whatever could be read of it.
pub(crate) fn status_error(operation: &str, status: u16, body: &str) -> GatewayError {
    GatewayError::status(operation, status, &error_detail(body))
}
