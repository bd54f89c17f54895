//! Raptor RPC Library
//!
//! A transport-agnostic JSON-RPC 2.0 engine. Methods are registered once on
//! a [`RequestProcessor`](protocol::jsonrpc::RequestProcessor) and served over
//! any of the built-in carriers: a TCP byte stream, HTTP, or UDP datagrams.
//! The library is designed to be used by the binary crate, but can also
//! be used as a dependency by other projects.
//!
//! # Architecture
//!
//! - `protocol::jsonrpc` validates payloads, dispatches calls and shapes replies
//! - `transport` binds the processor to sockets and tags calls with their origin
//! - `config` and `error` carry settings and failures across both

// Re-export public modules
pub mod config;
pub mod error;
pub mod protocol;
pub mod transport;

// Internal modules that are not part of the public API
#[cfg(test)]
pub(crate) mod tests;

pub use error::{RaptorError, RaptorResult};
pub use protocol::jsonrpc::{create_processor, RequestProcessor};

/// Version information for Raptor RPC.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
