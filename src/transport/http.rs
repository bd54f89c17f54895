// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! HTTP carrier: one JSON-RPC payload per request body.
//!
//! Every path and every method is routed to the processor. When a layer in
//! front of the router has already decoded the body it can attach the value
//! as a [`ParsedBody`] request extension and the raw body is not read.

use std::net::SocketAddr;
use std::sync::Arc;

use async_trait::async_trait;
use axum::{
    extract::{connect_info::ConnectInfo, Request, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    Router,
};
use serde_json::Value;
use tokio::net::TcpListener;
use tracing::{debug, info};

use super::{CarrierKind, Transport};
use crate::config::limits::LimitsConfig;
use crate::error::transport::{TransportError, TransportResult};
use crate::error::ErrorContext;
use crate::protocol::jsonrpc::{encode, Remote, RequestProcessor};

const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

/// A request body decoded by an upstream layer.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedBody(pub Value);

#[derive(Debug, Clone)]
struct HttpState {
    processor: Arc<RequestProcessor>,
    max_body: usize,
}

/// Builds a router that answers JSON-RPC on every path.
///
/// Serve it with `into_make_service_with_connect_info::<SocketAddr>()` to
/// have the peer port show up in call metadata.
pub fn router(processor: Arc<RequestProcessor>, max_body: usize) -> Router {
    Router::new()
        .fallback(handle_rpc)
        .with_state(HttpState {
            processor,
            max_body,
        })
}

async fn handle_rpc(State(state): State<HttpState>, mut request: Request) -> Response {
    let peer = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| *addr);
    let remote = Remote::http(peer.map(|addr| addr.port()));

    let encoded = match request.extensions_mut().remove::<ParsedBody>() {
        Some(ParsedBody(payload)) => state
            .processor
            .handle_object(payload, remote)
            .await
            .map(|reply| encode(&reply))
            .transpose(),
        None => {
            let body = match axum::body::to_bytes(request.into_body(), state.max_body).await {
                Ok(body) => body,
                Err(err) => {
                    let err = TransportError::UnableToHandle(format!(
                        "request body unreadable or over {} bytes: {err}",
                        state.max_body
                    ));
                    report(&state.processor, err, peer);
                    return StatusCode::PAYLOAD_TOO_LARGE.into_response();
                }
            };
            state.processor.handle_bytes(&body, remote).await
        }
    };

    match encoded {
        Ok(Some(bytes)) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, HeaderValue::from_static(JSON_CONTENT_TYPE)),
                (header::CONTENT_LENGTH, HeaderValue::from(bytes.len())),
            ],
            bytes,
        )
            .into_response(),
        Ok(None) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => {
            report(&state.processor, TransportError::Encode(err), peer);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

fn report(processor: &RequestProcessor, err: TransportError, peer: Option<SocketAddr>) {
    match peer {
        Some(peer) => super::report(processor, err, "transport::http", peer),
        None => processor.report(ErrorContext::new(err, "transport::http")),
    }
}

/// HTTP listener bound to the processor.
#[derive(Debug)]
pub struct HttpTransport {
    listener: TcpListener,
    max_body: usize,
}

impl HttpTransport {
    /// Binds the HTTP listener.
    pub async fn bind(addr: SocketAddr, limits: &LimitsConfig) -> TransportResult<Self> {
        let listener = TcpListener::bind(addr)
            .await
            .map_err(|source| TransportError::Bind { addr, source })?;
        Ok(Self {
            listener,
            max_body: limits.max_message_size,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    fn kind(&self) -> CarrierKind {
        CarrierKind::Http
    }

    fn local_addr(&self) -> TransportResult<SocketAddr> {
        Ok(self.listener.local_addr()?)
    }

    async fn run(self: Box<Self>, processor: Arc<RequestProcessor>) -> TransportResult<()> {
        info!(addr = %self.local_addr()?, "HTTP carrier accepting requests");
        let app = router(processor, self.max_body);
        axum::serve(
            self.listener,
            app.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .await?;
        debug!("HTTP carrier stopped");
        Ok(())
    }
}
