// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Liveness and introspection methods: `ping`, `echo` and `remote`.

use serde_json::{json, Value};

use crate::protocol::jsonrpc::context::CallContext;
use crate::protocol::jsonrpc::processor::RequestProcessor;
use crate::protocol::jsonrpc::registry::MethodResult;

/// Registers `ping`, which answers `"pong"`.
pub fn register_ping_method(processor: &RequestProcessor) {
    processor.register_sync_method("ping", handle_ping);
}

/// Registers `echo`, which answers with its own params.
pub fn register_echo_method(processor: &RequestProcessor) {
    processor.register_sync_method("echo", handle_echo);
}

/// Registers `remote`, which describes the carrier the call arrived on.
pub fn register_remote_method(processor: &RequestProcessor) {
    processor.register_sync_method("remote", handle_remote);
}

fn handle_ping(_ctx: CallContext) -> MethodResult {
    Ok(json!("pong"))
}

fn handle_echo(ctx: CallContext) -> MethodResult {
    Ok(ctx.params().cloned().unwrap_or(Value::Null))
}

fn handle_remote(ctx: CallContext) -> MethodResult {
    Ok(serde_json::to_value(ctx.remote())?)
}
