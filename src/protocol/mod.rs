//! Protocol module for Raptor RPC.
//!
//! This module implements JSON-RPC 2.0 processing: validation, the method
//! registry, dispatch and the built-in methods.

pub mod jsonrpc;
