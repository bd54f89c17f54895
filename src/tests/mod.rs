//! Test modules for Raptor RPC.
//!
//! This module contains crate-wide tests that cut across components:
//! - Configuration loading and validation
//! - Error types and reporting
//! - Shared fixtures and utilities
//!
//! Component tests live next to their code; the JSON-RPC engine keeps its
//! suites under `protocol::jsonrpc::tests`.

pub mod config_tests;

// Re-export commonly used testing tools to simplify imports in test modules
pub use test_utils::TestFixture;
