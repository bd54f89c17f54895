// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Types for the JSON-RPC 2.0 protocol.
//!
//! This module defines the core data structures for JSON-RPC 2.0 requests, responses, and
//! related types according to the [specification](https://www.jsonrpc.org/specification),
//! plus the remote metadata carriers attach to each call.

use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use std::fmt;

use super::error::JsonRpcError;

/// The fixed protocol version literal.
pub const JSONRPC_VERSION: &str = "2.0";

/// JSON-RPC request identifier.
///
/// Can be a string, number, or null as per the JSON-RPC 2.0 specification.
/// Integers that fit in `i64` decode to [`Id::Number`]; any other JSON number
/// is kept as decoded and echoed back unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Id {
    /// String identifier
    String(String),

    /// Numeric identifier
    Number(i64),

    /// Numeric identifier outside the `i64` range, or with a fraction or exponent
    WideNumber(Number),

    /// Null identifier
    Null,
}

impl Id {
    /// Reads an id from a decoded `id` member.
    ///
    /// Returns None when the value is not a well-formed id (objects, arrays,
    /// booleans).
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::String(s) => Some(Id::String(s.clone())),
            Value::Number(n) => Some(match n.as_i64() {
                Some(n) => Id::Number(n),
                None => Id::WideNumber(n.clone()),
            }),
            Value::Null => Some(Id::Null),
            _ => None,
        }
    }
}

impl fmt::Display for Id {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Id::String(s) => write!(f, "{}", s),
            Id::Number(n) => write!(f, "{}", n),
            Id::WideNumber(n) => write!(f, "{}", n),
            Id::Null => write!(f, "null"),
        }
    }
}

impl From<i64> for Id {
    fn from(n: i64) -> Self {
        Id::Number(n)
    }
}

impl From<&str> for Id {
    fn from(s: &str) -> Self {
        Id::String(s.to_string())
    }
}

/// A decoded JSON-RPC 2.0 call.
///
/// A call without an id is a notification: it is executed but never answered.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Request {
    /// JSON-RPC protocol version, always "2.0"
    pub jsonrpc: String,

    /// Name of the method to be invoked
    pub method: String,

    /// Method parameters, can be positional (array) or named (object)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Value>,

    /// Request identifier, if None then the request is a notification
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Id>,
}

impl Request {
    /// Creates a new JSON-RPC 2.0 request.
    pub fn new(method: impl Into<String>, params: Option<Value>, id: Option<Id>) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            method: method.into(),
            params,
            id,
        }
    }

    /// Creates a new JSON-RPC notification (no id).
    pub fn notification(method: impl Into<String>, params: Option<Value>) -> Self {
        Self::new(method, params, None)
    }

    /// Returns true if this request is a notification (no id).
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }
}

/// The populated half of a response: a result or an error, never both.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    /// The method returned successfully.
    Result(Value),

    /// The call failed.
    Error(JsonRpcError),
}

/// A JSON-RPC 2.0 response object.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Response {
    /// JSON-RPC protocol version, always "2.0"
    pub jsonrpc: String,

    /// Result or error
    #[serde(flatten)]
    pub outcome: Outcome,

    /// Same identifier as the request this is responding to
    pub id: Id,
}

impl Response {
    /// Creates a new successful JSON-RPC 2.0 response.
    pub fn success(id: Id, result: Value) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            outcome: Outcome::Result(result),
            id,
        }
    }

    /// Creates a new error JSON-RPC 2.0 response.
    pub fn error(id: Id, error: JsonRpcError) -> Self {
        Self {
            jsonrpc: JSONRPC_VERSION.to_string(),
            outcome: Outcome::Error(error),
            id,
        }
    }

    /// Returns the result, if this is a success response.
    pub fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    /// Returns the error, if this is an error response.
    pub fn error_object(&self) -> Option<&JsonRpcError> {
        match &self.outcome {
            Outcome::Error(error) => Some(error),
            Outcome::Result(_) => None,
        }
    }

    /// Returns true if this response contains a successful result.
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, Outcome::Result(_))
    }

    /// Returns true if this response contains an error.
    pub fn is_error(&self) -> bool {
        matches!(self.outcome, Outcome::Error(_))
    }
}

/// What a processed payload produces: one response or a batch of them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Reply {
    /// Reply to a lone call, never wrapped in an array
    Single(Response),

    /// Replies to the answerable members of a batch
    Batch(Vec<Response>),
}

impl Reply {
    /// Iterates over every response in the reply.
    pub fn responses(&self) -> impl Iterator<Item = &Response> {
        match self {
            Reply::Single(response) => std::slice::from_ref(response).iter(),
            Reply::Batch(responses) => responses.iter(),
        }
    }
}

/// The carrier a call arrived on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum RemoteKind {
    /// Persistent byte stream (TCP)
    Stream,
    /// HTTP request/response pair
    Http,
    /// Discrete datagram (UDP)
    Datagram,
    /// Delivered directly, not through a carrier
    #[default]
    Unknown,
}

impl fmt::Display for RemoteKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            RemoteKind::Stream => "stream",
            RemoteKind::Http => "http",
            RemoteKind::Datagram => "datagram",
            RemoteKind::Unknown => "unknown",
        };
        f.write_str(name)
    }
}

/// Remote metadata attached to every call's context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub struct Remote {
    /// Carrier kind
    #[serde(rename = "type")]
    pub kind: RemoteKind,

    /// Remote port, when the carrier knows it
    pub port: Option<u16>,
}

impl Remote {
    /// Metadata for calls not delivered through a carrier.
    pub fn unknown() -> Self {
        Self::default()
    }

    /// Metadata for a call read from a stream connection.
    pub fn stream(port: u16) -> Self {
        Self {
            kind: RemoteKind::Stream,
            port: Some(port),
        }
    }

    /// Metadata for a call delivered over HTTP.
    pub fn http(port: Option<u16>) -> Self {
        Self {
            kind: RemoteKind::Http,
            port,
        }
    }

    /// Metadata for a call delivered in a datagram.
    pub fn datagram(port: u16) -> Self {
        Self {
            kind: RemoteKind::Datagram,
            port: Some(port),
        }
    }
}
