// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Test suites for the JSON-RPC 2.0 engine.

mod integration_tests;

use serde_json::{json, Value};
use tokio::time::Duration;

use crate::protocol::jsonrpc::{
    ApplicationError, CallError, ParamKind, Remote, Reply, RequestProcessor, Response,
};

/// Builds a processor with the methods the suites exercise.
pub(super) fn test_app() -> RequestProcessor {
    let app = RequestProcessor::new();

    app.register_sync_method("ping", |_| Ok(json!("pong")));

    app.register_sync_method("remote", |ctx| Ok(serde_json::to_value(ctx.remote())?));

    app.register_sync_method("require-name", |ctx| {
        ctx.require("name", ParamKind::String)?;
        Ok(ctx.param("name").cloned().unwrap_or(Value::Null))
    });

    app.register_sync_method("require-array", |ctx| {
        ctx.require("names", ParamKind::Array)?;
        Ok(ctx.param("names").cloned().unwrap_or(Value::Null))
    });

    app.register_method("set-timeout", |ctx| async move {
        let ms = ctx.require("ms", ParamKind::Integer)?.as_u64().unwrap_or(0);
        tokio::time::sleep(Duration::from_millis(ms)).await;
        Ok::<_, CallError>(json!("pong"))
    });

    app.register_sync_method("require-return", |ctx| {
        Ok(ctx.require("value", ParamKind::String)?.clone())
    });

    app.register_sync_method("throw", |_| {
        Err(ApplicationError::new("Test")
            .with_code(1337)
            .with_data(json!({"a": 1}))
            .into())
    });

    app
}

/// Sends one call through the byte path and returns its single response.
pub(super) async fn call(app: &RequestProcessor, method: &str, params: Option<Value>, id: i64) -> Response {
    let mut request = json!({"jsonrpc": "2.0", "method": method, "id": id});
    if let Some(params) = params {
        request["params"] = params;
    }
    let payload = serde_json::to_vec(&request).unwrap();

    match app.handle_buffer(&payload, Remote::unknown()).await {
        Some(Reply::Single(response)) => response,
        other => panic!("Expected a single response, got {other:?}"),
    }
}
