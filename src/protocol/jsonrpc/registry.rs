// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Method registry: maps method names to handlers.
//!
//! Registration and lookup both take `&self`, so a registry shared behind an
//! `Arc` can gain methods while calls are in flight.

use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use dashmap::DashMap;
use fnv::FnvBuildHasher;
use serde_json::Value;

use super::context::CallContext;
use super::error::CallError;

/// Type alias for method handler response.
pub type MethodResult = std::result::Result<Value, CallError>;

/// Type alias for a registered handler.
pub type MethodHandlerFn = Arc<dyn MethodHandler>;

/// Trait for method handlers to implement.
#[async_trait]
pub trait MethodHandler: Send + Sync {
    /// Handle a method call.
    ///
    /// # Parameters
    /// * `ctx` - Parameters and remote metadata for this call.
    async fn handle(&self, ctx: CallContext) -> MethodResult;
}

/// Adapts an async closure into a [`MethodHandler`].
struct AsyncHandler<F>(F);

#[async_trait]
impl<F, Fut> MethodHandler for AsyncHandler<F>
where
    F: Fn(CallContext) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MethodResult> + Send + 'static,
{
    async fn handle(&self, ctx: CallContext) -> MethodResult {
        (self.0)(ctx).await
    }
}

/// Adapts a plain closure into a [`MethodHandler`] that is already resolved.
struct SyncHandler<F>(F);

#[async_trait]
impl<F> MethodHandler for SyncHandler<F>
where
    F: Fn(CallContext) -> MethodResult + Send + Sync + 'static,
{
    async fn handle(&self, ctx: CallContext) -> MethodResult {
        (self.0)(ctx)
    }
}

/// Name → handler mapping scoped to one engine instance.
pub struct MethodRegistry {
    methods: DashMap<String, MethodHandlerFn, FnvBuildHasher>,
}

impl Default for MethodRegistry {
    fn default() -> Self {
        Self {
            methods: DashMap::with_hasher(FnvBuildHasher::default()),
        }
    }
}

impl std::fmt::Debug for MethodRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MethodRegistry")
            .field("methods", &self.method_names())
            .finish()
    }
}

impl MethodRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler object, replacing any handler with the same name.
    pub fn register_handler(&self, method: impl Into<String>, handler: MethodHandlerFn) {
        let method = method.into();
        if self.methods.insert(method.clone(), handler).is_some() {
            tracing::debug!(method = %method, "Replaced existing method handler");
        }
    }

    /// Registers an async handler function.
    pub fn register_method<F, Fut>(&self, method: impl Into<String>, handler: F)
    where
        F: Fn(CallContext) -> Fut + Send + Sync + 'static,
        Fut: Future<Output = MethodResult> + Send + 'static,
    {
        self.register_handler(method, Arc::new(AsyncHandler(handler)));
    }

    /// Registers a handler that returns its result directly.
    pub fn register_sync_method<F>(&self, method: impl Into<String>, handler: F)
    where
        F: Fn(CallContext) -> MethodResult + Send + Sync + 'static,
    {
        self.register_handler(method, Arc::new(SyncHandler(handler)));
    }

    /// Looks up a handler. Absence is a normal outcome, not an error.
    pub fn lookup(&self, method: &str) -> Option<MethodHandlerFn> {
        self.methods.get(method).map(|entry| Arc::clone(entry.value()))
    }

    /// Removes a handler, returning true if one was registered.
    pub fn unregister(&self, method: &str) -> bool {
        self.methods.remove(method).is_some()
    }

    /// Returns the registered method names, sorted.
    pub fn method_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.methods.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }

    /// Number of registered methods.
    pub fn len(&self) -> usize {
        self.methods.len()
    }

    /// Returns true if no methods are registered.
    pub fn is_empty(&self) -> bool {
        self.methods.is_empty()
    }
}
