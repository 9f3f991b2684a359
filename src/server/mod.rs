//! Quiz service.
//!
//! Serves quiz rounds and scores answers over HTTP and WebSocket.

mod routes;
mod server;
mod state;
mod ws;

pub use routes::build_app;
pub use server::run;
pub use state::AppState;
