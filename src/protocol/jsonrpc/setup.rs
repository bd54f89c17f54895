// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Setup and initialization utilities for the request processor.
//!
//! This module provides functions to register the built-in methods and build
//! a processor ready to be attached to a carrier.

use crate::protocol::jsonrpc::methods::{
    register_echo_method, register_ping_method, register_remote_method, register_sleep_method,
};
use crate::protocol::jsonrpc::processor::RequestProcessor;

/// Registers all built-in methods with the processor.
pub fn register_standard_methods(processor: &RequestProcessor) {
    register_ping_method(processor);
    register_echo_method(processor);
    register_remote_method(processor);
    register_sleep_method(processor);
}

/// Creates a processor with all built-in methods pre-registered.
pub fn create_processor() -> RequestProcessor {
    let processor = RequestProcessor::new();
    register_standard_methods(&processor);
    processor
}
