//! Platform adapters for the chat session client.

pub mod gateway;

#[cfg(test)]
mod tests;

pub use gateway::{HttpGateway, MemoryGateway};
