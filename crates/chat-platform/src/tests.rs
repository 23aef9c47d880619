#[cfg(test)]
mod tests {
    use crate::gateway::wire::*;
    use crate::gateway::{HttpGateway, MemoryGateway};
    use chat_core::ports::GatewayPort;
    use chat_types::config::GatewayConfig;
    use chat_types::message::{Message, Role};
    use chat_types::session::{DEFAULT_CHAT_TITLE, FALLBACK_CHAT_TITLE};
    use chat_types::GatewayError;
    use futures::executor::block_on;

    // ─── URL Tests ───────────────────────────────────────────

    #[test]
    fn test_urls_same_origin() {
        let gateway = HttpGateway::new(GatewayConfig::default());
        assert_eq!(gateway.chats_url(), "/chats");
        assert_eq!(gateway.chat_url("chat-1"), "/chats/chat-1");
        assert_eq!(gateway.messages_url("chat-1"), "/chats/chat-1/messages");
    }

    #[test]
    fn test_urls_with_base() {
        let gateway = HttpGateway::new(GatewayConfig::new("https://api.example.com/prod/"));
        assert_eq!(gateway.chats_url(), "https://api.example.com/prod/chats");
        assert_eq!(
            gateway.messages_url("c1"),
            "https://api.example.com/prod/chats/c1/messages"
        );
    }

    #[test]
    fn test_chat_id_is_percent_encoded() {
        let gateway = HttpGateway::new(GatewayConfig::default());
        assert_eq!(gateway.chat_url("a/b c"), "/chats/a%2Fb%20c");
    }

    // ─── Decode Tests ────────────────────────────────────────

    #[test]
    fn test_decode_created() {
        let body = r#"{"chatId":"chat-1","title":"Trip","createdAt":"2024-01-01T00:00:00+00:00"}"#;
        let summary = decode_created(body, "ignored").unwrap();
        assert_eq!(summary.chat_id, "chat-1");
        assert_eq!(summary.title, "Trip");
        assert_eq!(summary.created_at, "2024-01-01T00:00:00+00:00");
    }

    #[test]
    fn test_decode_created_requires_id() {
        let err = decode_created(r#"{"title":"Trip"}"#, "Trip").unwrap_err();
        assert!(err.message.contains("missing chatId"));
    }

    #[test]
    fn test_decode_created_falls_back_to_requested_title() {
        let summary = decode_created(r#"{"chatId":"c1"}"#, "Requested").unwrap();
        assert_eq!(summary.title, "Requested");
        assert_eq!(summary.created_at, "");
    }

    #[test]
    fn test_decode_summaries() {
        let body = r#"{"chats":[
            {"pk":"CHAT#c1","sk":"META","chatId":"c1","title":"One","createdAt":"T1"},
            {"chatId":"c2","createdAt":"T2"},
            {"title":"no id"}
        ]}"#;
        let summaries = decode_summaries(body).unwrap();
        assert_eq!(summaries.len(), 2);
        assert_eq!(summaries[0].title, "One");
        assert_eq!(summaries[1].title, FALLBACK_CHAT_TITLE);
    }

    #[test]
    fn test_decode_summaries_missing_list() {
        assert!(decode_summaries("{}").unwrap().is_empty());
        assert!(decode_summaries(r#"{"chats":null}"#).unwrap().is_empty());
    }

    #[test]
    fn test_decode_summaries_invalid_json() {
        let err = decode_summaries("<html>").unwrap_err();
        assert!(err.message.starts_with("list chats: invalid response"));
    }

    #[test]
    fn test_decode_summaries_survives_mistyped_fields() {
        let body = r#"{"chats":[
            {"chatId":"a","title":"A","createdAt":"2024-05-01T00:00:00+00:00"},
            {"chatId":"b","title":"B","createdAt":1700000000},
            {"chatId":"c","title":["x"]},
            {"chatId":7},
            "junk"
        ]}"#;
        let summaries = decode_summaries(body).unwrap();
        let ids: Vec<&str> = summaries.iter().map(|s| s.chat_id.as_str()).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(summaries[1].created_at, "");
        assert_eq!(summaries[2].title, FALLBACK_CHAT_TITLE);

        assert!(decode_summaries(r#"{"chats":"none"}"#).unwrap().is_empty());
    }

    #[test]
    fn test_decode_session() {
        let body = r#"{
            "chat": {"chatId":"c1","title":"One","createdAt":"T1"},
            "messages": [
                {"role":"user","content":"hello","createdAt":"T2"},
                {"role":"assistant","content":"hi there","createdAt":"T2"}
            ]
        }"#;
        let session = decode_session(body, "c1").unwrap();
        assert_eq!(session.chat_id, "c1");
        assert_eq!(session.title, "One");
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].role, Role::User);
        assert_eq!(session.messages[1].role, Role::Assistant);
        assert_eq!(session.messages[1].content, "hi there");
    }

    #[test]
    fn test_decode_session_degrades_to_defaults() {
        let session = decode_session(r#"{"chat":null}"#, "c7").unwrap();
        assert_eq!(session.chat_id, "c7");
        assert_eq!(session.title, FALLBACK_CHAT_TITLE);
        assert_eq!(session.created_at, "");
        assert!(session.messages.is_empty());

        let session = decode_session(r#"{"chat":{"title":""},"messages":[{}]}"#, "c8").unwrap();
        assert_eq!(session.chat_id, "c8");
        assert_eq!(session.title, FALLBACK_CHAT_TITLE);
        assert_eq!(session.messages[0].role, Role::Assistant);
        assert_eq!(session.messages[0].content, "");
    }

    #[test]
    fn test_decode_session_survives_mistyped_fields() {
        let body = r#"{
            "chat": "oops",
            "messages": [
                {"role":1,"content":"hi","createdAt":false},
                5,
                {"role":"user","content":{"text":"x"}}
            ]
        }"#;
        let session = decode_session(body, "c9").unwrap();
        assert_eq!(session.chat_id, "c9");
        assert_eq!(session.title, FALLBACK_CHAT_TITLE);
        assert_eq!(session.messages.len(), 2);
        assert_eq!(session.messages[0].role, Role::Assistant);
        assert_eq!(session.messages[0].content, "hi");
        assert_eq!(session.messages[0].created_at, "");
        assert_eq!(session.messages[1].role, Role::User);
        assert_eq!(session.messages[1].content, "");
    }

    #[test]
    fn test_decode_receipt() {
        let receipt =
            decode_receipt(r#"{"prompt":"hello","answer":"hi there","createdAt":"T"}"#).unwrap();
        assert_eq!(receipt.answer, "hi there");
        assert_eq!(receipt.created_at, "T");

        assert!(decode_receipt(r#"{"createdAt":"T"}"#).is_err());
    }

    #[test]
    fn test_error_detail_envelope() {
        assert_eq!(
            error_detail(r#"{"error":"send_message_failed","detail":"Groq API error: 429"}"#),
            "send_message_failed: Groq API error: 429"
        );
        assert_eq!(error_detail(r#"{"error":"chatId_required"}"#), "chatId_required");
        assert_eq!(error_detail("Bad Gateway\n"), "Bad Gateway");
        assert_eq!(error_detail(""), "");
        assert_eq!(error_detail(&"x".repeat(500)).len(), 200);
    }

    #[test]
    fn test_status_error_keeps_status_without_body() {
        let err = status_error("get chat", 502, "");
        assert_eq!(err.message, "get chat: HTTP 502");

        let err = status_error("get chat", 404, r#"{"error":"chat_not_found"}"#);
        assert_eq!(err.message, "get chat: HTTP 404 (chat_not_found)");
    }

    // ─── MemoryGateway Tests ─────────────────────────────────

    #[test]
    fn test_memory_gateway_name() {
        assert_eq!(MemoryGateway::new().gateway_name(), "memory");
    }

    #[test]
    fn test_memory_create_and_get() {
        let gateway = MemoryGateway::new();
        block_on(async {
            let created = gateway.create_chat("  Trip  ").await.unwrap();
            assert!(created.chat_id.starts_with("chat-"));
            assert_eq!(created.title, "Trip");

            let session = gateway.get_chat(&created.chat_id).await.unwrap();
            assert_eq!(session.summary(), created);
            assert!(session.messages.is_empty());
        });
    }

    #[test]
    fn test_memory_create_blank_title() {
        let gateway = MemoryGateway::new();
        let created = block_on(gateway.create_chat("")).unwrap();
        assert_eq!(created.title, DEFAULT_CHAT_TITLE);
    }

    #[test]
    fn test_memory_ids_are_unique() {
        let gateway = MemoryGateway::new();
        block_on(async {
            let a = gateway.create_chat("a").await.unwrap();
            let b = gateway.create_chat("b").await.unwrap();
            assert_ne!(a.chat_id, b.chat_id);
            assert_eq!(gateway.list_chats().await.unwrap().len(), 2);
        });
    }

    #[test]
    fn test_memory_get_unknown() {
        let gateway = MemoryGateway::new();
        let err = block_on(gateway.get_chat("missing")).unwrap_err();
        assert!(err.message.contains("404"));
    }

    #[test]
    fn test_memory_send_stores_both_turns() {
        let gateway = MemoryGateway::new();
        block_on(async {
            let chat = gateway.create_chat("t").await.unwrap();
            let receipt = gateway.send_message(&chat.chat_id, "hello").await.unwrap();
            assert_eq!(receipt.answer, "echo: hello");

            let session = gateway.get_chat(&chat.chat_id).await.unwrap();
            assert_eq!(session.messages.len(), 2);
            assert_eq!(session.messages[0].role, Role::User);
            assert_eq!(session.messages[1].content, "echo: hello");
            assert_eq!(session.messages[0].created_at, receipt.created_at);
        });
    }

    #[test]
    fn test_memory_send_requires_prompt() {
        let gateway = MemoryGateway::new();
        block_on(async {
            let chat = gateway.create_chat("t").await.unwrap();
            let err = gateway.send_message(&chat.chat_id, "  ").await.unwrap_err();
            assert!(err.message.contains("prompt_required"));
        });
    }

    #[test]
    fn test_memory_responder_sees_history() {
        let gateway = MemoryGateway::with_responder(Box::new(|history: &[Message], prompt: &str| {
            Ok(format!("{} earlier, now {}", history.len(), prompt))
        }));
        block_on(async {
            let chat = gateway.create_chat("t").await.unwrap();
            gateway.send_message(&chat.chat_id, "one").await.unwrap();
            let receipt = gateway.send_message(&chat.chat_id, "two").await.unwrap();
            assert_eq!(receipt.answer, "2 earlier, now two");
        });
    }

    #[test]
    fn test_memory_responder_failure() {
        let gateway = MemoryGateway::with_responder(Box::new(|_: &[Message], _: &str| {
            Err(GatewayError::new("rate limited"))
        }));
        block_on(async {
            let chat = gateway.create_chat("t").await.unwrap();
            let err = gateway.send_message(&chat.chat_id, "hi").await.unwrap_err();
            assert!(err.message.contains("HTTP 500"));
            assert!(gateway.get_chat(&chat.chat_id).await.unwrap().messages.is_empty());
        });
    }

    #[test]
    fn test_memory_offline() {
        let gateway = MemoryGateway::new();
        gateway.set_offline(true);
        let err = block_on(gateway.list_chats()).unwrap_err();
        assert!(err.message.contains("network error"));
        gateway.set_offline(false);
        assert!(block_on(gateway.list_chats()).unwrap().is_empty());
    }
}
