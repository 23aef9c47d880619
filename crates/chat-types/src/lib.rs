pub mod message;
pub mod event;
pub mod config;
pub mod error;
pub mod session;


pub use error::GatewayError;
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Current time in the format the backend uses for `createdAt`.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}
