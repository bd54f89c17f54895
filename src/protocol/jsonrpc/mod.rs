// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! JSON-RPC 2.0 engine for Raptor RPC.
//!
//! This module implements the [JSON-RPC 2.0 specification](https://www.jsonrpc.org/specification)
//! independently of any carrier. A payload goes in as bytes or as an already
//! decoded value, together with [`Remote`] metadata describing where it came
//! from, and at most one payload comes out.
//!
//! # Features
//!
//! - Requests, notifications and batches
//! - Standard error codes plus application-defined codes and data
//! - Declarative parameter checks through [`CallContext::require`]
//! - Async and sync handlers behind one [`MethodHandler`] trait
//! - Concurrent dispatch of batch members
//!
//! # Example
//!
//! ```
//! use raptor_rpc::protocol::jsonrpc::{ParamKind, Remote, RequestProcessor};
//! use serde_json::json;
//!
//! # tokio_test::block_on(async {
//! let processor = RequestProcessor::new();
//! processor.register_sync_method("greet", |ctx| {
//!     let name = ctx.require("name", ParamKind::String)?;
//!     Ok(json!(format!("Hello, {}!", name.as_str().unwrap_or_default())))
//! });
//!
//! let request = br#"{"jsonrpc":"2.0","method":"greet","params":{"name":"world"},"id":1}"#;
//! let reply = processor.handle_bytes(request, Remote::unknown()).await.unwrap().unwrap();
//!
//! let reply: serde_json::Value = serde_json::from_slice(&reply).unwrap();
//! assert_eq!(reply["result"], "Hello, world!");
//! assert_eq!(reply["id"], 1);
//! # });
//! ```

pub mod context;
pub mod error;
pub mod methods;
pub mod params;
pub mod processor;
pub mod registry;
pub mod setup;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

// Re-exports
pub use context::CallContext;
pub use error::{ApplicationError, CallError, Error, ErrorCode, JsonRpcError, Result};
pub use params::{ParamError, ParamKind};
pub use processor::{encode, RequestProcessor};
pub use registry::{MethodHandler, MethodHandlerFn, MethodRegistry, MethodResult};
pub use setup::{create_processor, register_standard_methods};
pub use types::{Id, Outcome, Remote, RemoteKind, Reply, Request, Response, JSONRPC_VERSION};
pub use validation::{validate_request, validate_single_request, CallUnit, ValidatedRequest};
