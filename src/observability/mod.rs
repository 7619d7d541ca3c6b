// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Observability module for structured logging and tracing.
//!
//! Message types follow a struct-based pattern with a `Display` implementation and a
//! [`StructuredLog`](messages::StructuredLog) implementation that emits the message
//! through `tracing` with its fields attached. Keeping the text in one place avoids
//! format strings scattered through the engine and the node library.
//!
//! # Architecture
//!
//! * `messages::graph` - value flow and node lifecycle inside a graph
//! * `messages::node` - failures inside library nodes (codec errors, write errors)
//! * `messages::pipeline` - pipeline configuration loading and building
//! * [`TracingObserver`] - a [`GraphObserver`](crate::traits::GraphObserver) that
//!   logs every graph event through the `graph` messages
//!
//! The engine itself never logs: a graph only reports to an observer installed with
//! [`Graph::with_observer`](crate::engine::Graph::with_observer).
//!
//! # Usage
//!
//! ```rust
//! use canal::engine::Graph;
//! use canal::observability::TracingObserver;
//!
//! let graph: Graph<serde_json::Value> = Graph::new().with_observer(TracingObserver::new("ingest"));
//! ```

pub mod messages;
mod observer;

pub use observer::TracingObserver;
