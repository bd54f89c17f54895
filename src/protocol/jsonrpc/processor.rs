// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! JSON-RPC 2.0 request processor.
//!
//! Turns one inbound payload into at most one outbound payload: decode,
//! validate, dispatch every call to its handler, and encode the responses.
//! Carriers hand payloads in through [`RequestProcessor::handle_buffer`],
//! [`RequestProcessor::handle_object`] or [`RequestProcessor::handle_bytes`].

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::future::{join_all, FutureExt};
use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{ErrorContext, ErrorReporter, TracingErrorReporter};

use super::context::CallContext;
use super::error::{ApplicationError, CallError, JsonRpcError, Result};
use super::registry::{MethodRegistry, MethodResult};
use super::types::{Id, Remote, Reply, Request, Response};
use super::validation::{validate_request, CallUnit, ValidatedRequest};

/// Processor for JSON-RPC 2.0 payloads.
///
/// This struct is responsible for:
/// - Owning the method registry of one engine instance
/// - Validating incoming payloads
/// - Dispatching calls to their handlers, concurrently within a batch
/// - Collecting and encoding responses
///
/// Share it between carriers behind an `Arc`.
pub struct RequestProcessor {
    /// Registered method handlers
    registry: MethodRegistry,

    /// Sink for failures that cannot be answered on the wire
    reporter: Arc<dyn ErrorReporter>,
}

impl Default for RequestProcessor {
    fn default() -> Self {
        Self {
            registry: MethodRegistry::new(),
            reporter: Arc::new(TracingErrorReporter),
        }
    }
}

impl std::fmt::Debug for RequestProcessor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RequestProcessor")
            .field("registry", &self.registry)
            .field("reporter", &self.reporter)
            .finish()
    }
}

impl RequestProcessor {
    /// Creates a processor with an empty registry that reports through tracing.
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the error reporter used for carrier-level failures.
    pub fn with_reporter(mut self, reporter: Arc<dyn ErrorReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// The method registry of this processor.
    pub fn registry(&self) -> &MethodRegistry {
        &self.registry
    }

    /// Registers an async handler function. See [`MethodRegistry::register_method`].
    pub fn register_method<F, Fut>(&self, method: impl Into<String>, handler: F)
    where
        F: Fn(CallContext) -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = MethodResult> + Send + 'static,
    {
        self.registry.register_method(method, handler);
    }

    /// Registers a synchronous handler. See [`MethodRegistry::register_sync_method`].
    pub fn register_sync_method<F>(&self, method: impl Into<String>, handler: F)
    where
        F: Fn(CallContext) -> MethodResult + Send + Sync + 'static,
    {
        self.registry.register_sync_method(method, handler);
    }

    /// Forwards a failure that has no response channel to the owning system.
    pub fn report(&self, context: ErrorContext) {
        self.reporter.report(context);
    }

    /// Handles a raw payload.
    ///
    /// Returns None when nothing is to be sent back, which happens only for
    /// notifications and batches made entirely of notifications.
    pub async fn handle_buffer(&self, buffer: &[u8], remote: Remote) -> Option<Reply> {
        match serde_json::from_slice::<Value>(buffer) {
            Ok(payload) => self.handle_object(payload, remote).await,
            Err(err) => {
                debug!(error = %err, remote = %remote.kind, "Rejecting unparseable payload");
                Some(Reply::Single(Response::error(
                    Id::Null,
                    JsonRpcError::parse_error(),
                )))
            }
        }
    }

    /// Handles a payload that was already decoded upstream.
    pub async fn handle_object(&self, payload: Value, remote: Remote) -> Option<Reply> {
        match validate_request(payload) {
            Err(error) => Some(Reply::Single(Response::error(Id::Null, error))),
            Ok(ValidatedRequest::Single(unit)) => self.handle_unit(unit, remote).await.map(Reply::Single),
            Ok(ValidatedRequest::Batch(units)) => {
                let total = units.len();
                let responses: Vec<Response> =
                    join_all(units.into_iter().map(|unit| self.handle_unit(unit, remote)))
                        .await
                        .into_iter()
                        .flatten()
                        .collect();

                debug!(total, answered = responses.len(), "Processed batch");
                if responses.is_empty() {
                    None
                } else {
                    Some(Reply::Batch(responses))
                }
            }
        }
    }

    /// Decodes, processes and re-encodes a raw payload.
    pub async fn handle_bytes(&self, buffer: &[u8], remote: Remote) -> Result<Option<Vec<u8>>> {
        match self.handle_buffer(buffer, remote).await {
            Some(reply) => Ok(Some(encode(&reply)?)),
            None => Ok(None),
        }
    }

    /// Runs one call unit to completion.
    async fn handle_unit(&self, unit: CallUnit, remote: Remote) -> Option<Response> {
        let request = match unit {
            CallUnit::Call(request) => request,
            CallUnit::Malformed { id, reason } => {
                debug!(id = %id, reason, "Invalid request");
                return Some(Response::error(id, JsonRpcError::invalid_request()));
            }
        };

        let Request {
            method, params, id, ..
        } = request;
        let outcome = self.dispatch(&method, params, remote).await;

        match id {
            Some(id) => Some(match outcome {
                Ok(result) => Response::success(id, result),
                Err(error) => Response::error(id, error),
            }),
            None => {
                if let Err(error) = outcome {
                    debug!(method = %method, code = error.code, message = %error.message, "Notification failed");
                }
                None
            }
        }
    }

    /// Looks up and invokes the handler for `method`.
    async fn dispatch(
        &self,
        method: &str,
        params: Option<Value>,
        remote: Remote,
    ) -> std::result::Result<Value, JsonRpcError> {
        let handler = self.registry.lookup(method).ok_or_else(|| {
            debug!(method, "Method not found");
            JsonRpcError::method_not_found()
        })?;

        debug!(method, remote = %remote.kind, "Dispatching call");
        let ctx = CallContext::new(params, remote);

        let result = AssertUnwindSafe(handler.handle(ctx))
            .catch_unwind()
            .await
            .unwrap_or_else(|panic| {
                warn!(method, "Method handler panicked");
                Err(CallError::from(
                    ApplicationError::new(panic_message(panic.as_ref())).with_kind("Panic"),
                ))
            });

        result.map_err(|err| err.to_jsonrpc_error())
    }
}

/// Encodes a reply into its wire form.
pub fn encode(reply: &Reply) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(reply)?)
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "handler panicked".to_string()
    }
}
