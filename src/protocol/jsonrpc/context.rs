// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Execution context handed to method handlers.

use serde_json::Value;

use super::error::CallError;
use super::params::{self, ParamKind};
use super::types::Remote;

/// Everything a handler can see about the call it is serving.
///
/// Each call owns its context; nothing in it is shared with other calls.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallContext {
    params: Option<Value>,
    remote: Remote,
}

impl CallContext {
    /// Creates a context for a call with the given parameter bag.
    pub fn new(params: Option<Value>, remote: Remote) -> Self {
        Self { params, remote }
    }

    /// Raw parameter lookup. Absent parameters return None.
    pub fn param(&self, name: &str) -> Option<&Value> {
        params::lookup(self.params.as_ref(), name)
    }

    /// Returns the parameter if it is present and of the given kind.
    ///
    /// Failures convert into an `InvalidParams` error, so handlers can
    /// propagate them with `?`.
    pub fn require(&self, name: &str, kind: ParamKind) -> Result<&Value, CallError> {
        params::require(self.params.as_ref(), name, kind).map_err(CallError::from)
    }

    /// The whole parameter bag.
    pub fn params(&self) -> Option<&Value> {
        self.params.as_ref()
    }

    /// Metadata about the carrier the call arrived on.
    pub fn remote(&self) -> Remote {
        self.remote
    }
}
