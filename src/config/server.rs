//! Server configuration module.
//!
//! This module defines which carrier the binary binds, where, and how many
//! runtime worker threads it uses.

use super::ConfigResult;
use super::Validate;
use crate::error::config::ConfigError;
use crate::transport::CarrierKind;
use serde::{Deserialize, Serialize};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Name of the server (used in logs)
    pub name: String,

    /// Carrier to bind: `stream` (alias `net`), `http` or `datagram` (alias `dgram`)
    pub carrier: String,

    /// Address to bind to
    pub host: IpAddr,

    /// Port to bind to
    pub port: u16,

    /// Number of runtime worker threads; 1 selects a single-threaded runtime
    pub worker_threads: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "raptor-rpc".to_string(),
            carrier: "stream".to_string(),
            host: IpAddr::V4(Ipv4Addr::LOCALHOST),
            port: 7000,
            worker_threads: num_cpus::get(),
        }
    }
}

impl ServerConfig {
    /// The socket address the carrier binds.
    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }

    /// Parses the configured carrier name.
    pub fn carrier_kind(&self) -> ConfigResult<CarrierKind> {
        self.carrier
            .parse()
            .map_err(|e| ConfigError::ValidationError(format!("{e}")))
    }
}

impl Validate for ServerConfig {
    fn validate(&self) -> ConfigResult<()> {
        if self.name.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "Server name cannot be empty".to_string(),
            ));
        }

        self.carrier_kind()?;

        if self.worker_threads == 0 {
            return Err(ConfigError::ValidationError(
                "worker_threads must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}
