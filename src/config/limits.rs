//! Resource limits configuration module.
//!
//! Bounds on how much a single carrier may buffer and how many stream
//! connections may be open at once.

use super::{ConfigResult, Validate};
use crate::error::config::ConfigError;
use serde::{Deserialize, Serialize};

/// Largest payload a UDP datagram can carry.
const MAX_UDP_PAYLOAD: usize = 65_507;

/// Resource limits configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LimitsConfig {
    /// Maximum size in bytes of one unfinished stream payload or one HTTP body
    pub max_message_size: usize,

    /// Receive buffer size in bytes for datagrams
    pub max_datagram_size: usize,

    /// Maximum number of concurrently open stream connections
    pub max_connections: usize,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_message_size: 10 * 1024 * 1024, // 10 MiB
            max_datagram_size: MAX_UDP_PAYLOAD,
            max_connections: 1024,
        }
    }
}

impl Validate for LimitsConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.max_message_size == 0 {
            return Err(ConfigError::ValidationError(
                "max_message_size must be greater than 0".to_string(),
            ));
        }

        if self.max_datagram_size == 0 || self.max_datagram_size > MAX_UDP_PAYLOAD {
            return Err(ConfigError::ValidationError(format!(
                "max_datagram_size must be between 1 and {MAX_UDP_PAYLOAD}"
            )));
        }

        if self.max_connections == 0 {
            return Err(ConfigError::ValidationError(
                "max_connections must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
