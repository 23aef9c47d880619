pub mod http;
pub mod memory;
pub(crate) mod wire;

pub use http::HttpGateway;
pub use memory::{MemoryGateway, Responder, echo_responder};
