use serde::{Deserialize, Serialize};

pub const DEFAULT_TIMEOUT_MS: u64 = 30_000;

/// Where and how the gateway reaches the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// URL prefix for every endpoint. Empty means same-origin.
    pub api_base: String,
    pub timeout_ms: u64,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            api_base: String::new(),
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl GatewayConfig {
    pub fn new(api_base: impl Into<String>) -> Self {
        Self::default().with_api_base(api_base)
    }

    /// Values baked in at build time through `CHAT_API_BASE` and
    /// `CHAT_TIMEOUT_MS`.
    pub fn from_env() -> Self {
        Self::from_values(option_env!("CHAT_API_BASE"), option_env!("CHAT_TIMEOUT_MS"))
    }

    pub fn from_values(api_base: Option<&str>, timeout_ms: Option<&str>) -> Self {
        let timeout_ms = timeout_ms
            .and_then(|v| v.trim().parse::<u64>().ok())
            .filter(|v| *v > 0)
            .unwrap_or(DEFAULT_TIMEOUT_MS);
        Self {
            timeout_ms,
            ..Self::default()
        }
        .with_api_base(api_base.unwrap_or_default())
    }

    pub fn with_api_base(mut self, api_base: impl Into<String>) -> Self {
        self.api_base = api_base.into().trim().trim_end_matches('/').to_string();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Absolute (or same-origin) URL for an endpoint path starting with `/`.
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.api_base, path)
    }
}
