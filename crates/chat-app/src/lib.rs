//! Chat App: WASM entry point.
//!
//! This crate is the composition root (DI wiring layer).
//! It assembles the gateway, session store, and exchange controller and
//! exposes them to the page as [`ChatApp`].

mod app;

use wasm_bindgen::prelude::*;

pub use app::ChatApp;

/// WASM entry point, runs when the module is instantiated
#[wasm_bindgen(start)]
pub fn start() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("Chat client starting...");
}
