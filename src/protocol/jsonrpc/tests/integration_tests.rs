// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Integration tests for the request processor.
//! These tests drive batches, stateful handlers, panics and error reporting
//! through the public processor surface on the async runtime.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Barrier;

use super::test_app;
use crate::error::{ErrorContext, ErrorReporter, RaptorError};
use crate::protocol::jsonrpc::{
    CallContext, CallError, Id, MethodHandler, MethodResult, Remote, Reply, RequestProcessor,
};

// A stateful service exposed as a method handler
struct CounterService {
    counter: AtomicU64,
}

#[async_trait]
impl MethodHandler for CounterService {
    async fn handle(&self, ctx: CallContext) -> MethodResult {
        let step = ctx.param("step").and_then(Value::as_u64).unwrap_or(1);
        Ok(json!(self.counter.fetch_add(step, Ordering::SeqCst) + step))
    }
}

// Collects every reported error for inspection
#[derive(Debug, Default)]
struct RecordingReporter {
    seen: Mutex<Vec<String>>,
}

impl ErrorReporter for RecordingReporter {
    fn report(&self, context: ErrorContext) {
        self.seen.lock().unwrap().push(context.to_string());
    }
}

fn batch_responses(reply: Option<Reply>) -> Vec<crate::protocol::jsonrpc::Response> {
    match reply {
        Some(Reply::Batch(responses)) => responses,
        other => panic!("Expected a batch reply, got {other:?}"),
    }
}

#[tokio::test]
async fn test_batch_answers_every_id_once() {
    let app = test_app();
    let calls = [
        ("ping", json!(123)),
        ("djaksl", Value::Null),
        ("ping", Value::Null),
        ("set-timeout", json!({"ms": 5})),
        ("remote", Value::Null),
        ("require-name", Value::Null),
        ("require-name", json!({"name": 1337})),
        ("require-name", json!({"name": "linus"})),
        ("require-array", json!({"names": ["linus", "steve"]})),
        ("require-return", json!({"value": "ABC"})),
        ("throw", json!({})),
    ];

    let batch: Vec<Value> = calls
        .iter()
        .enumerate()
        .map(|(i, (method, params))| {
            let mut unit = json!({"jsonrpc": "2.0", "method": method, "id": i});
            if !params.is_null() {
                unit["params"] = params.clone();
            }
            unit
        })
        .collect();

    let responses = batch_responses(app.handle_object(json!(batch), Remote::unknown()).await);
    assert_eq!(responses.len(), calls.len());

    let ids: HashSet<Id> = responses.iter().map(|r| r.id.clone()).collect();
    let expected: HashSet<Id> = (0..calls.len() as i64).map(Id::Number).collect();
    assert_eq!(ids, expected);

    let by_id = |id: i64| responses.iter().find(|r| r.id == Id::Number(id)).unwrap();
    assert_eq!(by_id(0).error_object().unwrap().code, -32600);
    assert_eq!(by_id(1).error_object().unwrap().code, -32601);
    assert_eq!(by_id(2).result(), Some(&json!("pong")));
    assert_eq!(by_id(3).result(), Some(&json!("pong")));
    assert_eq!(by_id(10).error_object().unwrap().code, 1337);
}

#[tokio::test]
async fn test_batch_skips_notifications() {
    let app = test_app();
    let batch = json!([
        {"jsonrpc": "2.0", "method": "ping", "id": "a"},
        {"jsonrpc": "2.0", "method": "ping"},
        {"jsonrpc": "2.0", "method": "throw"},
        {"jsonrpc": "2.0", "method": "ping", "id": "b"}
    ]);

    let responses = batch_responses(app.handle_object(batch, Remote::unknown()).await);
    let ids: Vec<Id> = responses.iter().map(|r| r.id.clone()).collect();
    assert_eq!(ids.len(), 2);
    assert!(ids.contains(&Id::from("a")));
    assert!(ids.contains(&Id::from("b")));
}

#[tokio::test]
async fn test_all_notification_batch_is_silent() {
    let app = test_app();
    let batch = json!([
        {"jsonrpc": "2.0", "method": "ping"},
        {"jsonrpc": "2.0", "method": "djaksl"}
    ]);
    assert!(app.handle_object(batch, Remote::unknown()).await.is_none());
}

#[tokio::test]
async fn test_batch_with_malformed_members() {
    let app = test_app();
    let batch = json!([1, {"jsonrpc": "2.0", "method": "ping", "id": 9}]);

    let responses = batch_responses(app.handle_object(batch, Remote::unknown()).await);
    assert_eq!(responses.len(), 2);
    let invalid = responses.iter().find(|r| r.id == Id::Null).unwrap();
    assert_eq!(invalid.error_object().unwrap().code, -32600);
    let ok = responses.iter().find(|r| r.id == Id::Number(9)).unwrap();
    assert_eq!(ok.result(), Some(&json!("pong")));
}

#[tokio::test]
async fn test_batch_members_run_concurrently() {
    let app = RequestProcessor::new();
    let barrier = Arc::new(Barrier::new(2));
    app.register_method("rendezvous", move |_| {
        let barrier = Arc::clone(&barrier);
        async move {
            barrier.wait().await;
            Ok::<_, CallError>(json!(true))
        }
    });

    let batch = json!([
        {"jsonrpc": "2.0", "method": "rendezvous", "id": 1},
        {"jsonrpc": "2.0", "method": "rendezvous", "id": 2}
    ]);

    // Sequential dispatch would never get past the barrier.
    let reply = tokio::time::timeout(
        Duration::from_secs(5),
        app.handle_object(batch, Remote::unknown()),
    )
    .await
    .expect("batch members should not wait for each other");
    assert_eq!(batch_responses(reply).len(), 2);
}

#[tokio::test]
async fn test_stateful_handler() {
    let app = RequestProcessor::new();
    app.registry().register_handler(
        "count",
        Arc::new(CounterService {
            counter: AtomicU64::new(0),
        }),
    );

    let first = super::call(&app, "count", None, 1).await;
    let second = super::call(&app, "count", Some(json!({"step": 5})), 2).await;
    assert_eq!(first.result(), Some(&json!(1)));
    assert_eq!(second.result(), Some(&json!(6)));
}

#[tokio::test]
async fn test_panicking_handler_becomes_internal_error() {
    let app = RequestProcessor::new();
    app.register_sync_method("explode", |_| panic!("boom"));

    let response = super::call(&app, "explode", None, 1).await;
    let error = response.error_object().unwrap();
    assert_eq!(error.code, -32603);
    assert_eq!(error.message, "Panic: boom");

    // The processor keeps serving after a handler panicked.
    app.register_sync_method("ping", |_| Ok(json!("pong")));
    assert!(super::call(&app, "ping", None, 2).await.is_success());
}

#[tokio::test]
async fn test_remote_reaches_handler() {
    let app = test_app();
    let request = json!({"jsonrpc": "2.0", "method": "remote", "id": 1});

    match app.handle_object(request, Remote::stream(8123)).await {
        Some(Reply::Single(response)) => {
            assert_eq!(
                response.result(),
                Some(&json!({"type": "stream", "port": 8123}))
            );
        }
        other => panic!("Expected a single response, got {other:?}"),
    }
}

#[tokio::test]
async fn test_handle_bytes_encodes_reply() {
    let app = test_app();
    let bytes = app
        .handle_bytes(br#"{"jsonrpc":"2.0","method":"ping","id":"x"}"#, Remote::unknown())
        .await
        .unwrap()
        .unwrap();
    let reply: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(reply, json!({"jsonrpc": "2.0", "result": "pong", "id": "x"}));

    let silent = app
        .handle_bytes(br#"{"jsonrpc":"2.0","method":"ping"}"#, Remote::unknown())
        .await
        .unwrap();
    assert!(silent.is_none());
}

#[test]
fn test_injected_reporter_receives_reports() {
    let reporter = Arc::new(RecordingReporter::default());
    let app = RequestProcessor::new().with_reporter(reporter.clone());

    app.report(
        ErrorContext::new(RaptorError::Custom("socket gone".to_string()), "transport::stream")
            .with_details("peer 127.0.0.1:9"),
    );

    let seen = reporter.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert!(seen[0].contains("transport::stream"));
    assert!(seen[0].contains("socket gone"));
}
