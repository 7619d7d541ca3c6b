// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::fmt;

/// Opaque identity of a node registered with a [`Graph`](crate::engine::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeHandle(usize);

/// Opaque identity of a source registered with a [`Graph`](crate::engine::Graph).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SourceHandle(usize);

impl NodeHandle {
    pub(crate) fn from_raw(index: usize) -> Self {
        Self(index)
    }

    /// Registration index of the node within its graph.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl SourceHandle {
    pub(crate) fn from_raw(index: usize) -> Self {
        Self(index)
    }

    /// Registration index of the source within its graph.
    pub fn index(&self) -> usize {
        self.0
    }
}

impl fmt::Display for NodeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "node#{}", self.0)
    }
}

impl fmt::Display for SourceHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "source#{}", self.0)
    }
}

/// The upstream end of an edge: sources only emit, nodes both receive and emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    Source(SourceHandle),
    Node(NodeHandle),
}

impl From<SourceHandle> for Endpoint {
    fn from(source: SourceHandle) -> Self {
        Endpoint::Source(source)
    }
}

impl From<&SourceHandle> for Endpoint {
    fn from(source: &SourceHandle) -> Self {
        Endpoint::Source(*source)
    }
}

impl From<NodeHandle> for Endpoint {
    fn from(node: NodeHandle) -> Self {
        Endpoint::Node(node)
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Endpoint::Source(source) => fmt::Display::fmt(source, f),
            Endpoint::Node(node) => fmt::Display::fmt(node, f),
        }
    }
}
