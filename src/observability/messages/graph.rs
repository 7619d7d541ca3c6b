// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for value flow and node lifecycle inside a graph.
//!
//! These are what [`TracingObserver`](crate::observability::TracingObserver) emits:
//! * values entering through a source and reaching nodes
//! * values dropped because their target already exited
//! * termination signal delivery, node exit and zombie detection

use crate::observability::messages::StructuredLog;
use std::fmt::{Debug, Display, Formatter};
use tracing::Span;

/// A value was pushed into a source.
///
/// # Log Level
/// `debug!` - Per-value flow
pub struct ValuePushed<'a> {
    pub graph: &'a str,
    pub source: &'a str,
    pub value: &'a dyn Debug,
}

impl Display for ValuePushed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] {} <- {:?}", self.graph, self.source, self.value)
    }
}

impl StructuredLog for ValuePushed<'_> {
    fn log(&self) {
        tracing::debug!(
            graph = self.graph,
            source = self.source,
            value = ?self.value,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "value_pushed",
            span_name = name,
            graph = self.graph,
            source = self.source,
        )
    }
}

/// A value is being resumed into a node.
///
/// # Log Level
/// `trace!` - Per-value, per-node flow
pub struct ValueDelivered<'a> {
    pub graph: &'a str,
    pub node: &'a str,
    pub value: &'a dyn Debug,
}

impl Display for ValueDelivered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] {:?} -> {}", self.graph, self.value, self.node)
    }
}

impl StructuredLog for ValueDelivered<'_> {
    fn log(&self) {
        tracing::trace!(
            graph = self.graph,
            node = self.node,
            value = ?self.value,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::trace_span!(
            "value_delivered",
            span_name = name,
            graph = self.graph,
            node = self.node,
        )
    }
}

/// A value was addressed to a node whose routine already returned.
///
/// # Log Level
/// `warn!` - Data loss the caller probably did not intend
pub struct ValueDropped<'a> {
    pub graph: &'a str,
    pub node: &'a str,
    pub value: &'a dyn Debug,
}

impl Display for ValueDropped<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}] dropped {:?}: node {} has already exited",
            self.graph, self.value, self.node
        )
    }
}

impl StructuredLog for ValueDropped<'_> {
    fn log(&self) {
        tracing::warn!(
            graph = self.graph,
            node = self.node,
            value = ?self.value,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::warn_span!(
            "value_dropped",
            span_name = name,
            graph = self.graph,
            node = self.node,
        )
    }
}

/// The termination signal is being delivered to a node.
///
/// # Log Level
/// `debug!` - Lifecycle event
pub struct TerminationDelivered<'a> {
    pub graph: &'a str,
    pub node: &'a str,
}

impl Display for TerminationDelivered<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] terminating {}", self.graph, self.node)
    }
}

impl StructuredLog for TerminationDelivered<'_> {
    fn log(&self) {
        tracing::debug!(graph = self.graph, node = self.node, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "termination_delivered",
            span_name = name,
            graph = self.graph,
            node = self.node,
        )
    }
}

/// A node's routine returned.
///
/// # Log Level
/// `debug!` - Lifecycle event
pub struct NodeTerminated<'a> {
    pub graph: &'a str,
    pub node: &'a str,
}

impl Display for NodeTerminated<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "[{}] {} exited", self.graph, self.node)
    }
}

impl StructuredLog for NodeTerminated<'_> {
    fn log(&self) {
        tracing::debug!(graph = self.graph, node = self.node, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::debug_span!(
            "node_terminated",
            span_name = name,
            graph = self.graph,
            node = self.node,
        )
    }
}

/// A node survived the termination signal.
///
/// # Log Level
/// `error!` - The graph cannot be torn down cleanly
pub struct NodeZombied<'a> {
    pub graph: &'a str,
    pub node: &'a str,
}

impl Display for NodeZombied<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "[{}] {} is still running after the termination signal",
            self.graph, self.node
        )
    }
}

impl StructuredLog for NodeZombied<'_> {
    fn log(&self) {
        tracing::error!(graph = self.graph, node = self.node, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "node_zombied",
            span_name = name,
            graph = self.graph,
            node = self.node,
        )
    }
}
