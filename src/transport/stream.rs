// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Stream carrier: JSON texts over TCP connections.
//!
//! Each accepted connection is piped through the processor in both
//! directions. Payloads on one connection are processed independently, so a
//! slow handler does not hold up replies to later payloads; replies are
//! written in completion order, each followed by a newline.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use super::framing::{Frame, JsonFramer};
use super::{CarrierKind, Transport};
use crate::config::limits::LimitsConfig;
use crate::error::transport::{TransportError, TransportResult};
use crate::protocol::jsonrpc::{encode, Id, JsonRpcError, Remote, Reply, RequestProcessor, Response};

/// Read buffer size for connections.
const READ_CHUNK: usize = 8 * 1024;

/// Replies queued per connection before the reader waits for the writer.
const REPLY_QUEUE_DEPTH: usize = 64;

/// TCP listener bound to the processor.
#[derive(Debug)]
pub struct StreamTransport {
    listener: TcpListener,
    max_message_size: usize,
    max_connections: usize,
}

impl StreamTransport {
    /// Binds a TCP listener.
    pub async fn bind(addr: SocketAddr, limits: &LimitsConfig) -> TransportResult<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| TransportError::Bind { addr, source })?;
        Ok(Self {
            listener,
            max_message_size: limits.max_message_size,
            max_connections: limits.max_connections,
        })
    }
}

#[async_trait]
impl Transport for StreamTransport {
    fn kind(&self) -> CarrierKind {
        CarrierKind::Stream
    }

    fn local_addr(&self) -> TransportResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    async fn run(self: Box<Self>, processor: Arc<RequestProcessor>) -> TransportResult<()> {
        let active = Arc::new(AtomicUsize::new(0));
        info!(addr = %self.local_addr()?, "Stream carrier accepting connections");

        loop {
            let (socket, peer) = match self.listener.accept().await {
                Ok(accepted) => accepted,
                Err(err) => {
                    super::pause_after(&err, CarrierKind::Stream).await;
                    continue;
                }
            };

            if active.load(Ordering::Relaxed) >= self.max_connections {
                warn!(
                    "Rejecting stream connection from {}: at max capacity ({})",
                    peer, self.max_connections
                );
                continue;
            }

            active.fetch_add(1, Ordering::Relaxed);
            let processor = Arc::clone(&processor);
            let active = Arc::clone(&active);
            let max_message_size = self.max_message_size;

            tokio::spawn(async move {
                debug!("Stream connection from {}", peer);
                let remote = Remote::stream(peer.port());
                if let Err(err) = handle_connection(socket, remote, Arc::clone(&processor), max_message_size).await {
                    super::report(&processor, err, "transport::stream", peer);
                }
                active.fetch_sub(1, Ordering::Relaxed);
            });
        }
    }
}

/// Pipes one connection through the processor until the peer stops sending.
///
/// Every reply is written at most once. The write half is shut down after
/// the last reply.
pub async fn handle_connection<S>(
    socket: S,
    remote: Remote,
    processor: Arc<RequestProcessor>,
    max_message_size: usize,
) -> TransportResult<()>
where
    S: AsyncRead + AsyncWrite + Send + 'static,
{
    let (mut reader, mut writer) = tokio::io::split(socket);
    let (reply_tx, mut reply_rx) = mpsc::channel::<Vec<u8>>(REPLY_QUEUE_DEPTH);

    let writer_task = tokio::spawn(async move {
        while let Some(mut bytes) = reply_rx.recv().await {
            bytes.push(b'\n');
            writer.write_all(&bytes).await?;
        }
        writer.shutdown().await
    });

    let mut framer = JsonFramer::new(max_message_size);
    let mut chunk = vec![0u8; READ_CHUNK];
    let read_result: TransportResult<()> = async {
        loop {
            let n = reader.read(&mut chunk).await?;
            if n == 0 {
                break;
            }
            framer.push(&chunk[..n])?;
            while let Some(frame) = framer.next_frame() {
                spawn_frame(frame, remote, &processor, &reply_tx);
            }
        }
        if let Some(frame) = framer.finish() {
            spawn_frame(frame, remote, &processor, &reply_tx);
        }
        Ok(())
    }
    .await;

    // Pending frames hold their own senders; the writer drains once they finish.
    drop(reply_tx);
    let write_result = writer_task.await.map_err(|_| TransportError::Closed)?;

    read_result?;
    write_result?;
    Ok(())
}

fn spawn_frame(
    frame: Frame,
    remote: Remote,
    processor: &Arc<RequestProcessor>,
    reply_tx: &mpsc::Sender<Vec<u8>>,
) {
    let processor = Arc::clone(processor);
    let reply_tx = reply_tx.clone();

    tokio::spawn(async move {
        let reply = match frame {
            Frame::Value(payload) => processor.handle_object(payload, remote).await,
            Frame::Malformed(err) => {
                debug!(error = %err, "Unparseable stream payload");
                Some(Reply::Single(Response::error(Id::Null, JsonRpcError::parse_error())))
            }
        };
        let Some(reply) = reply else {
            return;
        };

        match encode(&reply) {
            Ok(bytes) => {
                if reply_tx.send(bytes).await.is_err() {
                    debug!("Connection closed before reply was written");
                }
            }
            Err(err) => error!(error = %err, "Failed to encode stream reply"),
        }
    });
}
