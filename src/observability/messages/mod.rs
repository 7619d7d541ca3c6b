// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Centralized message types for structured logging.
//!
//! Each message type implements `Display` for human-readable output and
//! [`StructuredLog`] to emit itself through `tracing` at its documented level, with
//! its fields recorded individually.
//!
//! # Usage Pattern
//!
//! ```rust
//! use canal::observability::messages::{pipeline::PipelineLoaded, StructuredLog};
//!
//! let msg = PipelineLoaded {
//!     path: "configs/error-digest.yaml",
//!     source_count: 1,
//!     node_count: 4,
//! };
//!
//! msg.log();
//! ```

use tracing::Span;

pub mod graph;
pub mod node;
pub mod pipeline;

/// A log message that knows its own level and fields.
pub trait StructuredLog {
    /// Emit the message as a `tracing` event.
    fn log(&self);

    /// Open a span carrying the message's fields.
    fn span(&self, name: &str) -> Span;
}
