//! Runtime configuration for the quiz service.

use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;
use std::time::Duration;

use crate::data::DEFAULT_QUESTIONS_PATH;
use crate::protocol::DEFAULT_PORT;

/// Default upper bound on a single question store load.
pub const DEFAULT_LOAD_TIMEOUT: Duration = Duration::from_millis(2000);

#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Address to bind.
    pub host: IpAddr,
    pub port: u16,
    /// JSON file holding the questions for every language.
    pub questions: PathBuf,
    /// Keep the parsed store and only reload when the file changes.
    pub cache: bool,
    pub load_timeout: Duration,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            port: DEFAULT_PORT,
            questions: PathBuf::from(DEFAULT_QUESTIONS_PATH),
            cache: false,
            load_timeout: DEFAULT_LOAD_TIMEOUT,
        }
    }
}
