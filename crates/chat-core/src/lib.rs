//! Client-side chat session state.
//!
//! `SessionStore` owns the chat list and the active transcript,
//! `ExchangeController` runs one prompt round trip against it, and both
//! reach the backend only through [`ports::GatewayPort`].

pub mod event_bus;
pub mod ports;
pub mod store;
pub mod exchange;


pub use event_bus::EventBus;
pub use exchange::{ExchangeController, SendOutcome, SendPhase};
pub use ports::GatewayPort;
pub use store::SessionStore;
