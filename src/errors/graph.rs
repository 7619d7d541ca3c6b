// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors raised by the graph engine.
//!
//! Errors raised while `send` or `terminate` is running are fatal to the graph: it
//! moves to [`GraphPhase::Faulted`] and must be discarded. Handle and phase checks
//! happen before anything runs and leave the graph as it was. Nothing is rolled back;
//! nodes that already processed a value keep its side effects.

use crate::engine::{GraphPhase, NodeHandle, SourceHandle};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GraphError {
    /// The routine returned before it ever pulled from its input.
    #[error("node '{node}' exited without requesting any input")]
    Initialization { node: String },

    /// A source or node emitted a value but nothing is wired downstream of it.
    #[error("'{emitter}' emitted a value but has no downstream edges")]
    SinkEmit { emitter: String },

    /// The node kept running after it was handed the termination signal.
    #[error("node '{node}' did not exit after receiving the termination signal")]
    ZombieNode { node: String },

    /// A value looped back into a node that is still busy emitting.
    #[error("node '{node}' received a value while it was still running (cycle through '{node}')")]
    Reentrant { node: String },

    /// The routine suspended somewhere other than its input or its output.
    #[error("node '{node}' suspended without awaiting its input or output")]
    Stalled { node: String },

    #[error("cannot {operation} while the graph is {phase}")]
    InvalidPhase {
        operation: &'static str,
        phase: GraphPhase,
    },

    #[error("unknown node {0}")]
    UnknownNode(NodeHandle),

    #[error("unknown source {0}")]
    UnknownSource(SourceHandle),
}
