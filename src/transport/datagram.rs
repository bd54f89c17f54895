// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Datagram carrier: one JSON-RPC payload per UDP datagram.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::net::UdpSocket;
use tracing::{debug, info};

use super::{CarrierKind, Transport};
use crate::config::limits::LimitsConfig;
use crate::error::transport::{TransportError, TransportResult};
use crate::protocol::jsonrpc::{Remote, RequestProcessor};

/// UDP socket bound to the processor.
#[derive(Debug)]
pub struct DatagramTransport {
    socket: Arc<UdpSocket>,
    max_datagram_size: usize,
}

impl DatagramTransport {
    /// Binds the UDP socket.
    pub async fn bind(addr: SocketAddr, limits: &LimitsConfig) -> TransportResult<Self> {
        let socket = UdpSocket::bind(addr)
            .await
            .map_err(|source| TransportError::Bind { addr, source })?;
        Ok(Self {
            socket: Arc::new(socket),
            max_datagram_size: limits.max_datagram_size,
        })
    }
}

#[async_trait]
impl Transport for DatagramTransport {
    fn kind(&self) -> CarrierKind {
        CarrierKind::Datagram
    }

    fn local_addr(&self) -> TransportResult<SocketAddr> {
        Ok(self.socket.local_addr()?)
    }

    async fn run(self: Box<Self>, processor: Arc<RequestProcessor>) -> TransportResult<()> {
        info!(addr = %self.local_addr()?, "Datagram carrier receiving");
        let mut buf = vec![0u8; self.max_datagram_size];

        loop {
            let (len, peer) = match self.socket.recv_from(&mut buf).await {
                Ok(received) => received,
                Err(err) => {
                    super::pause_after(&err, CarrierKind::Datagram).await;
                    continue;
                }
            };

            let payload = buf[..len].to_vec();
            let socket = Arc::clone(&self.socket);
            let processor = Arc::clone(&processor);

            tokio::spawn(async move {
                if let Err(err) = answer(&socket, &processor, &payload, peer).await {
                    super::report(&processor, err, "transport::datagram", peer);
                }
            });
        }
    }
}

/// Processes one datagram and sends the reply, if any, back to its sender.
async fn answer(
    socket: &UdpSocket,
    processor: &RequestProcessor,
    payload: &[u8],
    peer: SocketAddr,
) -> TransportResult<()> {
    let Some(reply) = processor
        .handle_bytes(payload, Remote::datagram(peer.port()))
        .await?
    else {
        return Ok(());
    };

    let sent = socket.send_to(&reply, peer).await?;
    if sent < reply.len() {
        return Err(TransportError::UnableToHandle(format!(
            "reply truncated to {sent} of {} bytes",
            reply.len()
        )));
    }
    debug!(peer = %peer, bytes = sent, "Datagram reply sent");
    Ok(())
}
