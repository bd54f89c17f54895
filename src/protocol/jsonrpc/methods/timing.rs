// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! The `sleep` method, which resolves after a delay.
//!
//! Useful for observing that calls in one batch, or on one connection, run
//! concurrently rather than one after another.

use std::time::Duration;

use serde_json::json;

use crate::protocol::jsonrpc::context::CallContext;
use crate::protocol::jsonrpc::error::ApplicationError;
use crate::protocol::jsonrpc::params::ParamKind;
use crate::protocol::jsonrpc::processor::RequestProcessor;
use crate::protocol::jsonrpc::registry::MethodResult;

/// Longest delay `sleep` accepts, in milliseconds.
pub const MAX_SLEEP_MS: u64 = 60_000;

/// Registers `sleep`, which takes `{"ms": integer}` and answers with the
/// number of milliseconds slept.
pub fn register_sleep_method(processor: &RequestProcessor) {
    processor.register_method("sleep", handle_sleep);
}

async fn handle_sleep(ctx: CallContext) -> MethodResult {
    let ms = ctx
        .require("ms", ParamKind::Integer)?
        .as_f64()
        .filter(|ms| (0.0..=MAX_SLEEP_MS as f64).contains(ms))
        .ok_or_else(|| {
            ApplicationError::new(format!("ms must be between 0 and {MAX_SLEEP_MS}"))
                .with_kind("RangeError")
        })? as u64;

    tokio::time::sleep(Duration::from_millis(ms)).await;
    Ok(json!({ "slept_ms": ms }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::jsonrpc::error::CallError;
    use crate::protocol::jsonrpc::types::Remote;

    #[tokio::test]
    async fn test_sleep_resolves_after_delay() {
        let ctx = CallContext::new(Some(json!({"ms": 20})), Remote::unknown());
        let started = tokio::time::Instant::now();
        let result = handle_sleep(ctx).await.unwrap();

        assert_eq!(result, json!({"slept_ms": 20}));
        assert!(started.elapsed() >= Duration::from_millis(20));
    }

    #[tokio::test]
    async fn test_sleep_rejects_negative_delay() {
        let ctx = CallContext::new(Some(json!({"ms": -5})), Remote::unknown());
        let err = handle_sleep(ctx).await.unwrap_err();
        assert!(matches!(err, CallError::Application(ref app) if app.kind == "RangeError"));
        assert_eq!(err.to_jsonrpc_error().code, -32603);
    }

    #[tokio::test]
    async fn test_sleep_requires_integer() {
        let ctx = CallContext::new(Some(json!({"ms": "soon"})), Remote::unknown());
        let err = handle_sleep(ctx).await.unwrap_err();
        assert_eq!(
            err.to_jsonrpc_error().message,
            "InvalidParams: Param ms should be of type integer"
        );
    }
}
