// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The contract every node is written against.
//!
//! A routine receives its [`Input`] (a lazy, single-pass sequence of values that ends
//! when the graph terminates) and its [`Output`] (a synchronous sink), and runs until it
//! has no more input. It knows nothing about how it is wired.
//!
//! Any `FnOnce(Input<T>, Output<T>) -> impl Future<Output = ()>` is a routine:
//!
//! ```rust
//! use canal::engine::{Graph, Input, Output};
//! use futures::StreamExt;
//!
//! let mut graph: Graph<String> = Graph::new();
//! let source = graph.add_source().unwrap();
//! let shout = graph
//!     .add_node("shout", |mut input: Input<String>, output: Output<String>| async move {
//!         while let Some(line) = input.next().await {
//!             output.emit(line.to_uppercase()).await;
//!         }
//!     })
//!     .unwrap();
//! let sink = graph
//!     .add_node("sink", canal::nodes::sink_to_callable(|line: String| println!("{line}")))
//!     .unwrap();
//! graph.add_edge(source, shout).unwrap();
//! graph.add_edge(shout, sink).unwrap();
//!
//! graph.send(source, "hello".to_string()).unwrap();
//! graph.terminate().unwrap();
//! ```

use crate::engine::{Input, Output};
use futures::future::LocalBoxFuture;
use std::future::Future;

/// A unit of stream logic that can be registered as a node.
pub trait Routine<T>: 'static {
    /// Build the routine's future. The graph polls it; nothing else may.
    fn start(self, input: Input<T>, output: Output<T>) -> LocalBoxFuture<'static, ()>;
}

impl<T, F, Fut> Routine<T> for F
where
    F: FnOnce(Input<T>, Output<T>) -> Fut + 'static,
    Fut: Future<Output = ()> + 'static,
{
    fn start(self, input: Input<T>, output: Output<T>) -> LocalBoxFuture<'static, ()> {
        Box::pin(self(input, output))
    }
}

/// Type-erased routine, for building heterogeneous nodes at runtime.
pub type BoxedRoutine<T> = Box<dyn FnOnce(Input<T>, Output<T>) -> LocalBoxFuture<'static, ()>>;

pub fn boxed<T: 'static, R: Routine<T>>(routine: R) -> BoxedRoutine<T> {
    Box::new(move |input, output| routine.start(input, output))
}
