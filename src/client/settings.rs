//! Client settings
//!
//! Knobs consumed by the transport layer and the assembly step. Defaults
//! match the upstream client; `validate` fills gaps and rejects settings
//! the client cannot run with.

use std::time::Duration;

use crate::error::{Error, Result};

/// Default request timeout
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);
/// Default room polling interval
const DEFAULT_POLLING_INTERVAL: Duration = Duration::from_secs(1);
/// Default language for room metadata
const DEFAULT_LANGUAGE: &str = "en-US";
/// Minimum accepted socket buffer size
const MIN_SOCKET_BUFFER_SIZE: usize = 500_000;

/// Settings for a live client instance
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Host (streamer) user name to attach to
    pub host_name: String,
    /// Language sent with room requests
    pub client_language: String,
    /// Transport request timeout
    pub timeout: Duration,
    /// Interval between room-info polls
    pub polling_interval: Duration,
    /// Receive buffer size for the transport socket
    pub socket_buffer_size: usize,
    /// Whether the stock message mappings are installed at build time
    pub default_mappings: bool,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            host_name: String::new(),
            client_language: DEFAULT_LANGUAGE.to_string(),
            timeout: DEFAULT_TIMEOUT,
            polling_interval: DEFAULT_POLLING_INTERVAL,
            socket_buffer_size: MIN_SOCKET_BUFFER_SIZE,
            default_mappings: true,
        }
    }
}

impl ClientSettings {
    /// Settings for a given host with everything else at defaults
    pub fn for_host(host_name: impl Into<String>) -> Self {
        Self {
            host_name: host_name.into(),
            ..Default::default()
        }
    }

    /// Normalize and check the settings
    ///
    /// Empty language falls back to the default; an undersized socket buffer
    /// is raised to the minimum. A missing host name is the one hard error.
    pub fn validate(&mut self) -> Result<()> {
        if self.host_name.is_empty() {
            return Err(Error::Config("host name can not be empty".into()));
        }
        if self.client_language.is_empty() {
            self.client_language = DEFAULT_LANGUAGE.to_string();
        }
        if self.socket_buffer_size < MIN_SOCKET_BUFFER_SIZE {
            self.socket_buffer_size = MIN_SOCKET_BUFFER_SIZE;
        }
        Ok(())
    }
}
