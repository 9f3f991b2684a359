//! Quiz client module.
//!
//! Terminal client that plays one quiz round at a time over WebSocket.

mod client;
mod state;
mod ui;

pub use client::run;
pub use state::{ClientApp, ClientState};
