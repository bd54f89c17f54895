// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Request validation for the JSON-RPC 2.0 engine.
//!
//! Validation runs on an already decoded JSON value. The top level is
//! classified as a single call or a batch; every call unit is then checked on
//! its own, so one malformed member of a batch never spoils its siblings.

use serde_json::{Map, Value};

use super::error::JsonRpcError;
use super::types::{Id, Request, JSONRPC_VERSION};

/// The result of validating a decoded payload.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedRequest {
    /// A lone call unit
    Single(CallUnit),

    /// The units of a non-empty batch, in input order
    Batch(Vec<CallUnit>),
}

impl ValidatedRequest {
    /// Returns true if this is a batch request
    pub fn is_batch(&self) -> bool {
        matches!(self, ValidatedRequest::Batch(_))
    }

    /// Returns true if this is a single request
    pub fn is_single(&self) -> bool {
        matches!(self, ValidatedRequest::Single(_))
    }
}

/// One call attempt after per-call validation.
#[derive(Debug, Clone, PartialEq)]
pub enum CallUnit {
    /// A well-formed call, ready for dispatch
    Call(Request),

    /// A structurally invalid unit, answered with `Invalid Request`
    Malformed {
        /// Id copied from the unit when present and well-formed, else null
        id: Id,
        /// What was wrong with the unit
        reason: &'static str,
    },
}

/// Validates a decoded JSON-RPC 2.0 payload.
///
/// An object is a single call and a non-empty array is a batch. Any other
/// top-level shape, including an empty array, is rejected as a whole with an
/// `Invalid Request` error.
pub fn validate_request(payload: Value) -> Result<ValidatedRequest, JsonRpcError> {
    match payload {
        Value::Array(units) => {
            if units.is_empty() {
                return Err(JsonRpcError::invalid_request());
            }
            Ok(ValidatedRequest::Batch(
                units.into_iter().map(validate_single_request).collect(),
            ))
        }
        unit @ Value::Object(_) => Ok(ValidatedRequest::Single(validate_single_request(unit))),
        _ => Err(JsonRpcError::invalid_request()),
    }
}

/// Validates a single call unit.
///
/// Checks that the unit is an object, that `jsonrpc` is exactly "2.0", that
/// `method` is a string, that `params` is an array or object when present,
/// and that `id` is a string, number or null when present.
pub fn validate_single_request(unit: Value) -> CallUnit {
    let Value::Object(mut obj) = unit else {
        return malformed(Id::Null, "call must be an object");
    };

    let id = match obj.remove("id") {
        None => None,
        Some(raw) => match Id::from_value(&raw) {
            Some(id) => Some(id),
            None => return malformed(Id::Null, "id must be a string, number or null"),
        },
    };
    let reply_id = id.clone().unwrap_or(Id::Null);

    if obj.get("jsonrpc").and_then(Value::as_str) != Some(JSONRPC_VERSION) {
        return malformed(reply_id, "jsonrpc must be \"2.0\"");
    }

    let method = match take_string(&mut obj, "method") {
        Some(method) => method,
        None => return malformed(reply_id, "method must be a string"),
    };

    let params = match obj.remove("params") {
        None => None,
        Some(params @ (Value::Array(_) | Value::Object(_))) => Some(params),
        Some(_) => return malformed(reply_id, "params must be an array or object"),
    };

    CallUnit::Call(Request {
        jsonrpc: JSONRPC_VERSION.to_string(),
        method,
        params,
        id,
    })
}

fn take_string(obj: &mut Map<String, Value>, key: &str) -> Option<String> {
    match obj.remove(key) {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

fn malformed(id: Id, reason: &'static str) -> CallUnit {
    CallUnit::Malformed { id, reason }
}
