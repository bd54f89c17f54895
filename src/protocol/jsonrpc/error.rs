// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Error types for the JSON-RPC 2.0 engine.
//!
//! Two families live here. [`JsonRpcError`] is the wire-level error object
//! placed into a response. [`CallError`] is what a method handler raises; the
//! processor converts it into a [`JsonRpcError`] before anything is encoded.
//! [`Error`] covers engine failures that are not tied to a single call.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use super::params::ParamError;

/// Standard JSON-RPC 2.0 error codes used by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCode {
    /// Parse error (-32700)
    /// Invalid JSON was received by the server.
    ParseError = -32700,

    /// Invalid Request (-32600)
    /// The JSON sent is not a valid Request object.
    InvalidRequest = -32600,

    /// Method not found (-32601)
    MethodNotFound = -32601,

    /// Invalid params (-32602)
    InvalidParams = -32602,

    /// Internal error (-32603)
    /// Also used for handler failures that carry no code of their own.
    InternalError = -32603,
}

impl ErrorCode {
    /// Returns the canonical message for the error code.
    pub fn description(&self) -> &'static str {
        match self {
            ErrorCode::ParseError => "Parse error",
            ErrorCode::InvalidRequest => "Invalid Request",
            ErrorCode::MethodNotFound => "Method not found",
            ErrorCode::InvalidParams => "Invalid params",
            ErrorCode::InternalError => "Internal error",
        }
    }

    /// Create an ErrorCode from a raw integer value.
    ///
    /// Returns None for application-defined codes.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            -32700 => Some(ErrorCode::ParseError),
            -32600 => Some(ErrorCode::InvalidRequest),
            -32601 => Some(ErrorCode::MethodNotFound),
            -32602 => Some(ErrorCode::InvalidParams),
            -32603 => Some(ErrorCode::InternalError),
            _ => None,
        }
    }

    /// Returns the integer error code.
    pub fn code(&self) -> i64 {
        *self as i64
    }
}

impl From<ErrorCode> for i64 {
    fn from(code: ErrorCode) -> i64 {
        code as i64
    }
}

/// JSON-RPC error object as placed in a response.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JsonRpcError {
    /// The error code
    pub code: i64,

    /// A short description of the error
    pub message: String,

    /// Additional information about the error (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
}

impl JsonRpcError {
    /// Creates a new JSON-RPC error from a standard code.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self::custom(code.code(), message, None)
    }

    /// Creates a JSON-RPC error with an arbitrary code.
    pub fn custom(code: i64, message: impl Into<String>, data: Option<Value>) -> Self {
        Self {
            code,
            message: message.into(),
            data,
        }
    }

    /// Creates a standard parse error.
    pub fn parse_error() -> Self {
        Self::new(ErrorCode::ParseError, ErrorCode::ParseError.description())
    }

    /// Creates a standard invalid request error.
    pub fn invalid_request() -> Self {
        Self::new(
            ErrorCode::InvalidRequest,
            ErrorCode::InvalidRequest.description(),
        )
    }

    /// Creates a standard method not found error.
    pub fn method_not_found() -> Self {
        Self::new(
            ErrorCode::MethodNotFound,
            ErrorCode::MethodNotFound.description(),
        )
    }
}

/// An error raised by application code inside a method handler.
///
/// Displays as `"<kind>: <message>"`, which is also the message sent on the
/// wire. When `code` is absent the call is answered with
/// [`ErrorCode::InternalError`].
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{kind}: {message}")]
pub struct ApplicationError {
    /// Error kind, `"Error"` unless set otherwise
    pub kind: String,

    /// Human readable error text
    pub message: String,

    /// Application-assigned error code
    pub code: Option<i64>,

    /// Application-supplied error data
    pub data: Option<Value>,
}

impl ApplicationError {
    /// Creates an error of kind `Error` with no code and no data.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            kind: "Error".to_string(),
            message: message.into(),
            code: None,
            data: None,
        }
    }

    /// Overrides the error kind.
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }

    /// Assigns an explicit error code.
    pub fn with_code(mut self, code: i64) -> Self {
        self.code = Some(code);
        self
    }

    /// Attaches structured error data.
    pub fn with_data(mut self, data: Value) -> Self {
        self.data = Some(data);
        self
    }
}

/// Errors a method handler can raise.
///
/// A closed set: the processor maps each variant onto the wire without
/// inspecting arbitrary fields.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CallError {
    /// A declared parameter contract was violated.
    #[error("InvalidParams: {0}")]
    InvalidParams(#[from] ParamError),

    /// Any other failure raised by the handler.
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl CallError {
    /// Converts the error into the JSON-RPC error object sent to the caller.
    pub fn to_jsonrpc_error(&self) -> JsonRpcError {
        match self {
            CallError::InvalidParams(_) => {
                JsonRpcError::new(ErrorCode::InvalidParams, self.to_string())
            }
            CallError::Application(app) => JsonRpcError::custom(
                app.code.unwrap_or(ErrorCode::InternalError.code()),
                app.to_string(),
                app.data.clone(),
            ),
        }
    }
}

impl From<anyhow::Error> for CallError {
    fn from(error: anyhow::Error) -> Self {
        match error.downcast::<ApplicationError>() {
            Ok(app) => CallError::Application(app),
            Err(error) => CallError::Application(ApplicationError::new(format!("{error:#}"))),
        }
    }
}

impl From<serde_json::Error> for CallError {
    fn from(error: serde_json::Error) -> Self {
        CallError::Application(ApplicationError::new(error.to_string()).with_kind("JsonError"))
    }
}

/// Error type for engine operations that are not tied to a single call.
#[derive(Debug, Error)]
pub enum Error {
    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Specialized Result type for engine operations.
pub type Result<T> = std::result::Result<T, Error>;
