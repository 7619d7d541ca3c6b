// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Injectable tracing hook for value flow through a graph.
//!
//! A graph has no observer until one is installed with
//! [`Graph::with_observer`](crate::engine::Graph::with_observer); every method has an
//! empty default so implementors pick the events they care about.

use crate::engine::{NodeHandle, SourceHandle};
use std::fmt;

/// Identity plus diagnostic name of a node, as passed to observers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NodeLabel<'a> {
    pub handle: NodeHandle,
    pub name: &'a str,
}

impl fmt::Display for NodeLabel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.handle)
    }
}

pub trait GraphObserver<T> {
    /// A value entered the graph through a source.
    fn value_pushed(&self, _source: SourceHandle, _value: &T) {}

    /// A value is about to be resumed into a node.
    fn value_delivered(&self, _node: NodeLabel<'_>, _value: &T) {}

    /// A value was addressed to a node that had already exited.
    fn value_dropped(&self, _node: NodeLabel<'_>, _value: &T) {}

    /// The termination signal is about to be delivered to a node.
    fn termination_delivered(&self, _node: NodeLabel<'_>) {}

    /// A node's routine returned.
    fn node_terminated(&self, _node: NodeLabel<'_>) {}

    /// A node did not exit after the termination signal.
    fn node_zombied(&self, _node: NodeLabel<'_>) {}
}
