//! Error module for Raptor RPC.
//!
//! This module provides the crate-wide error umbrella and the reporting hook
//! through which carrier-level failures reach the owning system. Failures of
//! individual calls never come through here; they are answered on the wire.

use std::fmt::{Display, Formatter};
use thiserror::Error;
use tracing_error::SpanTrace;

pub mod config;
pub mod transport;

use crate::protocol::jsonrpc;

/// Result type alias used throughout Raptor RPC.
pub type RaptorResult<T> = Result<T, RaptorError>;

/// Core error enum for Raptor RPC.
#[derive(Error, Debug)]
pub enum RaptorError {
    /// Errors occurring during configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Errors raised by the request processor outside of any single call.
    #[error("Protocol error: {0}")]
    Protocol(#[from] jsonrpc::Error),

    /// Errors related to carriers (stream, HTTP, datagram).
    #[error("Transport error: {0}")]
    Transport(#[from] transport::TransportError),

    /// IO errors that may occur during file operations.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Custom error with message for cases where specific error types are not defined.
    #[error("{0}")]
    Custom(String),
}

/// Error reporting structure to provide context and debugging information.
#[derive(Debug)]
pub struct ErrorContext {
    /// The original error that occurred.
    pub error: RaptorError,

    /// The component where the error occurred.
    pub component: String,

    /// Additional context information to help with debugging.
    pub details: Option<String>,

    /// Span trace captured where the context was created.
    pub trace: Option<String>,
}

impl ErrorContext {
    /// Creates a new error context with the given error and component.
    ///
    /// The active span trace is captured when the `ErrorLayer` is installed.
    ///
    /// # Arguments
    ///
    /// * `error` - The error that occurred
    /// * `component` - The component where the error occurred
    pub fn new<E: Into<RaptorError>, S: Into<String>>(error: E, component: S) -> Self {
        let span_trace = SpanTrace::capture().to_string();
        Self {
            error: error.into(),
            component: component.into(),
            details: None,
            trace: (!span_trace.is_empty()).then_some(span_trace),
        }
    }

    /// Adds detail information to the error context.
    ///
    /// # Arguments
    ///
    /// * `details` - Additional context information to help with debugging
    pub fn with_details<S: Into<String>>(mut self, details: S) -> Self {
        self.details = Some(details.into());
        self
    }
}

impl Display for ErrorContext {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "Error in {}: {}", self.component, self.error)?;
        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }
        Ok(())
    }
}

/// Error reporter trait for reporting errors to various sinks.
pub trait ErrorReporter: Send + Sync + std::fmt::Debug {
    /// Report an error with context.
    ///
    /// # Arguments
    ///
    /// * `context` - The error context to report
    fn report(&self, context: ErrorContext);
}

/// A simple error reporter implementation that logs errors using the tracing framework.
#[derive(Default, Debug)]
pub struct TracingErrorReporter;

impl ErrorReporter for TracingErrorReporter {
    fn report(&self, context: ErrorContext) {
        tracing::error!(
            error = %context.error,
            component = %context.component,
            details = context.details.as_deref().unwrap_or("None"),
            trace = context.trace.as_deref().unwrap_or("None"),
            "Error reported"
        );
    }
}
