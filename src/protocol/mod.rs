//! Wire types shared by the service and the terminal client.

mod messages;

pub use messages::*;
