// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Carriers that bind the request processor to real sockets.
//!
//! Every carrier is one variant of [`CarrierKind`] and implements
//! [`Transport`]. A carrier pulls raw payloads off its socket, tags them with
//! [`Remote`](crate::protocol::jsonrpc::Remote) metadata, hands them to the
//! shared [`RequestProcessor`] and writes the reply back through the same
//! socket. Failures that cannot be answered on the wire go to the processor's
//! error reporter.

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::{error, info};

use crate::config::limits::LimitsConfig;
use crate::error::transport::{TransportError, TransportResult};
use crate::error::ErrorContext;
use crate::protocol::jsonrpc::{RemoteKind, RequestProcessor};

pub mod datagram;
pub mod framing;
pub mod http;
pub mod stream;

pub use datagram::DatagramTransport;
pub use framing::{Frame, JsonFramer};
pub use http::{HttpTransport, ParsedBody};
pub use stream::StreamTransport;

/// Pause after a failed accept or receive before polling the socket again.
pub(crate) const SOCKET_RETRY_DELAY: Duration = Duration::from_millis(100);

/// The closed set of supported carriers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CarrierKind {
    /// TCP byte stream carrying consecutive JSON texts
    Stream,
    /// HTTP request/response pairs
    Http,
    /// UDP datagrams, one payload each
    Datagram,
}

impl CarrierKind {
    /// The remote kind attached to calls arriving on this carrier.
    pub fn remote_kind(&self) -> RemoteKind {
        match self {
            CarrierKind::Stream => RemoteKind::Stream,
            CarrierKind::Http => RemoteKind::Http,
            CarrierKind::Datagram => RemoteKind::Datagram,
        }
    }
}

impl fmt::Display for CarrierKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.remote_kind(), f)
    }
}

impl FromStr for CarrierKind {
    type Err = TransportError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "stream" | "net" | "tcp" => Ok(CarrierKind::Stream),
            "http" => Ok(CarrierKind::Http),
            "datagram" | "dgram" | "udp" => Ok(CarrierKind::Datagram),
            _ => Err(TransportError::UnableToAttach(s.to_string())),
        }
    }
}

/// A bound carrier, ready to serve.
#[async_trait]
pub trait Transport: Send {
    /// Which carrier this is.
    fn kind(&self) -> CarrierKind;

    /// The address the carrier is bound to.
    fn local_addr(&self) -> TransportResult<SocketAddr>;

    /// Serves payloads until the socket fails.
    async fn run(self: Box<Self>, processor: Arc<RequestProcessor>) -> TransportResult<()>;
}

/// Binds a carrier of the given kind.
pub async fn bind(
    kind: CarrierKind,
    addr: SocketAddr,
    limits: &LimitsConfig,
) -> TransportResult<Box<dyn Transport>> {
    let transport: Box<dyn Transport> = match kind {
        CarrierKind::Stream => Box::new(StreamTransport::bind(addr, limits).await?),
        CarrierKind::Http => Box::new(HttpTransport::bind(addr, limits).await?),
        CarrierKind::Datagram => Box::new(DatagramTransport::bind(addr, limits).await?),
    };
    Ok(transport)
}

/// Attaches the named carrier to `processor` and serves it.
///
/// An unknown carrier name fails with [`TransportError::UnableToAttach`]
/// before anything is bound.
pub async fn serve(
    carrier: &str,
    addr: SocketAddr,
    processor: Arc<RequestProcessor>,
    limits: &LimitsConfig,
) -> TransportResult<()> {
    let kind: CarrierKind = carrier.parse()?;
    let transport = bind(kind, addr, limits).await?;
    info!(carrier = %kind, addr = %transport.local_addr()?, "Carrier attached");
    transport.run(processor).await
}

/// Reports a carrier failure that has no caller to answer.
pub(crate) fn report(processor: &RequestProcessor, err: TransportError, component: &str, peer: SocketAddr) {
    processor.report(ErrorContext::new(err, component).with_details(format!("peer {peer}")));
}

/// Logs a socket error and waits before the caller retries.
///
/// Errors such as running out of file descriptors persist across retries;
/// without the pause a serve loop would spin on them.
pub(crate) async fn pause_after(err: &std::io::Error, carrier: CarrierKind) {
    error!(carrier = %carrier, error = %err, "Socket error, retrying in {:?}", SOCKET_RETRY_DELAY);
    tokio::time::sleep(SOCKET_RETRY_DELAY).await;
}
