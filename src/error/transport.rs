//! Transport error module.
//!
//! This module defines error types that may occur while binding carriers and
//! moving payloads through them.

use std::io;
use std::net::SocketAddr;
use thiserror::Error;

use crate::protocol::jsonrpc;

/// Errors that can occur during transport operations.
#[derive(Error, Debug)]
pub enum TransportError {
    /// The carrier name does not match any supported carrier.
    #[error("Unable to attach carrier: {0}")]
    UnableToAttach(String),

    /// A carrier delivered something it cannot hand to the processor.
    #[error("Unable to handle payload: {0}")]
    UnableToHandle(String),

    /// Binding a listener or socket failed.
    #[error("Failed to bind {addr}: {source}")]
    Bind {
        /// Address that could not be bound
        addr: SocketAddr,
        /// Underlying I/O error
        #[source]
        source: io::Error,
    },

    /// I/O failure on an established carrier.
    #[error("Transport I/O error: {0}")]
    Io(#[from] io::Error),

    /// The processor could not encode a reply.
    #[error("Failed to encode reply: {0}")]
    Encode(#[from] jsonrpc::Error),

    /// The writing half of a connection went away before a reply was sent.
    #[error("Transport closed")]
    Closed,
}

/// Result type for transport operations.
pub type TransportResult<T> = Result<T, TransportError>;
