// Copyright (c) 2025 Raptor RPC Authors
//
// Licensed under dual license:
// - MIT License (LICENSE-MIT or https://opensource.org/licenses/MIT)
// - Apache License, Version 2.0 (LICENSE-APACHE or https://www.apache.org/licenses/LICENSE-2.0)

//! Splits a byte stream into consecutive JSON texts.
//!
//! Stream carriers have no framing of their own: a client writes one JSON
//! text after another, optionally separated by whitespace. The framer buffers
//! partial input until a complete value is available.
//!
//! After input that can never become valid JSON the framer skips to the end
//! of the offending line and carries on with whatever follows it, so a bad
//! text never swallows the good ones behind it regardless of how the bytes
//! were split into reads.

use serde_json::Value;

use crate::error::transport::{TransportError, TransportResult};

/// One unit cut from the stream.
#[derive(Debug)]
pub enum Frame {
    /// A complete JSON value
    Value(Value),

    /// Input that can never become valid JSON; its line was discarded
    Malformed(serde_json::Error),
}

/// Incremental JSON text splitter with a bound on buffered bytes.
#[derive(Debug)]
pub struct JsonFramer {
    buffer: Vec<u8>,
    max_buffered: usize,
    // Dropping input until the next newline.
    skipping: bool,
}

impl JsonFramer {
    /// Creates a framer that refuses to hold more than `max_buffered` bytes
    /// of one unfinished value.
    pub fn new(max_buffered: usize) -> Self {
        Self {
            buffer: Vec::new(),
            max_buffered,
            skipping: false,
        }
    }

    /// Appends bytes read from the stream.
    pub fn push(&mut self, mut bytes: &[u8]) -> TransportResult<()> {
        if self.skipping {
            match bytes.iter().position(|&b| b == b'\n') {
                Some(newline) => {
                    self.skipping = false;
                    bytes = &bytes[newline + 1..];
                }
                None => return Ok(()),
            }
        }
        if self.buffer.len() + bytes.len() > self.max_buffered {
            let buffered = self.buffer.len() + bytes.len();
            self.buffer.clear();
            return Err(TransportError::UnableToHandle(format!(
                "payload exceeds {} bytes ({buffered} buffered)",
                self.max_buffered
            )));
        }
        self.buffer.extend_from_slice(bytes);
        Ok(())
    }

    /// Cuts the next complete frame off the front of the buffer.
    ///
    /// Returns None when the buffer holds only whitespace or an unfinished
    /// value.
    pub fn next_frame(&mut self) -> Option<Frame> {
        let (item, consumed) = {
            let mut values = serde_json::Deserializer::from_slice(&self.buffer).into_iter::<Value>();
            let item = values.next();
            (item, values.byte_offset())
        };

        match item {
            None => {
                self.buffer.clear();
                None
            }
            Some(Ok(value)) => {
                self.buffer.drain(..consumed);
                Some(Frame::Value(value))
            }
            Some(Err(err)) if err.is_eof() => None,
            Some(Err(err)) => {
                self.skip_line(error_offset(&self.buffer, err.line(), err.column()));
                Some(Frame::Malformed(err))
            }
        }
    }

    /// Drops the buffer through the first newline at or after the byte before `offset`.
    fn skip_line(&mut self, offset: usize) {
        let from = offset.saturating_sub(1).min(self.buffer.len());
        match self.buffer[from..].iter().position(|&b| b == b'\n') {
            Some(newline) => {
                self.buffer.drain(..from + newline + 1);
            }
            None => {
                self.buffer.clear();
                self.skipping = true;
            }
        }
    }

    /// Called once the stream has ended; leftover input becomes a malformed frame.
    pub fn finish(&mut self) -> Option<Frame> {
        if std::mem::take(&mut self.skipping) {
            self.buffer.clear();
            return None;
        }
        if self.buffer.iter().all(u8::is_ascii_whitespace) {
            self.buffer.clear();
            return None;
        }
        let err = serde_json::from_slice::<Value>(&self.buffer).err();
        self.buffer.clear();
        err.map(Frame::Malformed)
    }

    /// Number of buffered bytes not yet cut into frames.
    pub fn buffered(&self) -> usize {
        self.buffer.len()
    }
}

/// Byte offset just past the 1-based line and column reported by `serde_json`.
fn error_offset(buffer: &[u8], line: usize, column: usize) -> usize {
    let mut start = 0;
    for _ in 1..line {
        match buffer[start..].iter().position(|&b| b == b'\n') {
            Some(newline) => start += newline + 1,
            None => return buffer.len(),
        }
    }
    start + column
}
