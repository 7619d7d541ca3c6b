// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The graph execution engine.
//!
//! A [`Graph`] owns a set of cooperative node routines, the edges between them and the
//! sources that feed them. Values pushed into a source are propagated synchronously
//! through the graph before [`Graph::send`] returns; [`Graph::terminate`] drains every
//! node and verifies that each one exited.
//!
//! ```text
//! construction (add_source / add_node / add_edge)
//!     -> run (send, send, ...)
//!     -> termination (terminate: signal, drain, verify, clear)
//! ```

mod graph;
mod handle;
mod io;
mod node;
mod pipeline;
mod propagation;
mod termination;

#[cfg(test)]
mod integration_tests;

pub use graph::{Graph, GraphPhase};
pub use handle::{Endpoint, NodeHandle, SourceHandle};
pub use io::{Emit, Input, Output};
pub use node::NodeState;
pub use pipeline::Pipeline;
