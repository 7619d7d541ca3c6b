// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for library nodes: their construction and their failures.
//!
//! Library nodes never fail the graph for bad data: a value that cannot be decoded,
//! encoded or written is logged with one of these and dropped.

use crate::observability::messages::StructuredLog;
use std::fmt::{Debug, Display, Formatter};
use tracing::Span;

/// The factory built a node from configuration.
///
/// # Log Level
/// `debug!` - Construction detail
pub struct NodeCreated<'a> {
    pub node_id: &'a str,
    pub kind: &'a str,
    pub option_count: usize,
}

impl Display for NodeCreated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Created {} node '{}' ({} options)",
            self.kind, self.node_id, self.option_count
        )
    }
}

impl StructuredLog for NodeCreated<'_> {
    fn log(&self) {
        tracing::debug!(
            node_id = self.node_id,
            kind = self.kind,
            option_count = self.option_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "node_created",
            span_name = name,
            node_id = self.node_id,
            kind = self.kind,
        )
    }
}

/// A value could not be parsed as JSON.
///
/// # Log Level
/// `warn!` - The value is dropped
pub struct JsonDecodeFailed<'a> {
    pub input: &'a dyn Debug,
    pub reason: &'a dyn Display,
}

impl Display for JsonDecodeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "dropping undecodable value {:?}: {}", self.input, self.reason)
    }
}

impl StructuredLog for JsonDecodeFailed<'_> {
    fn log(&self) {
        tracing::warn!(
            input = ?self.input,
            reason = %self.reason,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("json_decode_failed", span_name = name, reason = %self.reason)
    }
}

/// A value could not be serialized.
///
/// # Log Level
/// `warn!` - The value is dropped
pub struct JsonEncodeFailed<'a> {
    pub reason: &'a dyn Display,
}

impl Display for JsonEncodeFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "dropping unencodable value: {}", self.reason)
    }
}

impl StructuredLog for JsonEncodeFailed<'_> {
    fn log(&self) {
        tracing::warn!(reason = %self.reason, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!("json_encode_failed", span_name = name, reason = %self.reason)
    }
}

/// Writing to a sink's output failed.
///
/// # Log Level
/// `error!` - Output is being lost
pub struct SinkWriteFailed<'a> {
    pub error: &'a std::io::Error,
}

impl Display for SinkWriteFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "sink write failed: {}", self.error)
    }
}

impl StructuredLog for SinkWriteFailed<'_> {
    fn log(&self) {
        tracing::error!(
            error = %self.error,
            kind = ?self.error.kind(),
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!("sink_write_failed", span_name = name, error = %self.error)
    }
}
