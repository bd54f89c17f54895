// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Built-in method handlers.
//!
//! These are small diagnostics a deployment can register to check that a
//! carrier is wired up end to end.

pub mod diagnostics;
pub mod timing;

// Re-exports
pub use diagnostics::{register_echo_method, register_ping_method, register_remote_method};
pub use timing::register_sleep_method;
