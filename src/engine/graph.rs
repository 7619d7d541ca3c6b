// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Graph construction: the source registry, the node table and the edge table.
//!
//! Propagation lives in `propagation.rs` and teardown in `termination.rs`; both are
//! further `impl` blocks on [`Graph`].

use crate::engine::node::NodeRuntime;
use crate::engine::{Endpoint, NodeHandle, NodeState, SourceHandle};
use crate::errors::GraphError;
use crate::traits::{GraphObserver, NodeLabel, Routine};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Where a graph is in its life.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GraphPhase {
    /// Accepting sources, nodes and edges.
    Building,
    /// At least one value has been pushed; the topology is frozen.
    Running,
    /// `terminate` is in progress.
    Terminating,
    /// Every node exited and all tables were cleared.
    Terminated,
    /// A fatal error left the graph in an inconsistent state.
    Faulted,
}

impl fmt::Display for GraphPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            GraphPhase::Building => "building",
            GraphPhase::Running => "running",
            GraphPhase::Terminating => "terminating",
            GraphPhase::Terminated => "terminated",
            GraphPhase::Faulted => "faulted",
        };
        f.write_str(label)
    }
}

/// A push-based dataflow graph of cooperative nodes.
///
/// Single-threaded: [`send`](Graph::send) runs every node reachable from the source to
/// its next input pull before returning, so the call stack of the driver is the only
/// scheduler. Values are cloned once per fan-out target.
pub struct Graph<T> {
    pub(crate) nodes: BTreeMap<NodeHandle, NodeRuntime<T>>,
    pub(crate) edges: HashMap<Endpoint, Vec<NodeHandle>>,
    pub(crate) sources: Vec<SourceHandle>,
    pub(crate) phase: GraphPhase,
    pub(crate) observer: Option<Box<dyn GraphObserver<T>>>,
    next_node: usize,
    next_source: usize,
}

impl<T: Clone + 'static> Default for Graph<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + 'static> Graph<T> {
    pub fn new() -> Self {
        Self {
            nodes: BTreeMap::new(),
            edges: HashMap::new(),
            sources: Vec::new(),
            phase: GraphPhase::Building,
            observer: None,
            next_node: 0,
            next_source: 0,
        }
    }

    /// Install a tracing hook.
    pub fn with_observer(mut self, observer: impl GraphObserver<T> + 'static) -> Self {
        self.set_observer(observer);
        self
    }

    pub fn set_observer(&mut self, observer: impl GraphObserver<T> + 'static) {
        self.observer = Some(Box::new(observer));
    }

    /// Register a new entry point. Sources are also the roots of the termination walk,
    /// visited in registration order.
    pub fn add_source(&mut self) -> Result<SourceHandle, GraphError> {
        self.expect_phase("add a source", &[GraphPhase::Building])?;
        let source = SourceHandle::from_raw(self.next_source);
        self.next_source += 1;
        self.sources.push(source);
        Ok(source)
    }

    /// Start `routine` and register it once it has asked for its first value.
    ///
    /// Fails with [`GraphError::Initialization`] if the routine returns without ever
    /// pulling from its input. A rejected routine leaves the graph untouched.
    pub fn add_node<R: Routine<T>>(
        &mut self,
        name: impl Into<String>,
        routine: R,
    ) -> Result<NodeHandle, GraphError> {
        self.expect_phase("add a node", &[GraphPhase::Building])?;
        let runtime = NodeRuntime::start(name.into(), routine)?;
        let node = NodeHandle::from_raw(self.next_node);
        self.next_node += 1;
        self.nodes.insert(node, runtime);
        Ok(node)
    }

    /// Wire `from` to `to`. The order of calls for one `from` is its fan-out order.
    pub fn add_edge(&mut self, from: impl Into<Endpoint>, to: NodeHandle) -> Result<(), GraphError> {
        self.expect_phase("add an edge", &[GraphPhase::Building])?;
        let from = from.into();
        match from {
            Endpoint::Source(source) if !self.sources.contains(&source) => {
                return Err(GraphError::UnknownSource(source));
            }
            Endpoint::Node(node) if !self.nodes.contains_key(&node) => {
                return Err(GraphError::UnknownNode(node));
            }
            _ => {}
        }
        if !self.nodes.contains_key(&to) {
            return Err(GraphError::UnknownNode(to));
        }

        self.edges.entry(from).or_default().push(to);
        Ok(())
    }

    /// Push `value` into the graph through `source`.
    ///
    /// Returns once every node reachable from `source` has processed the value and
    /// everything it emitted. Any error other than an unknown handle faults the graph.
    pub fn send(&mut self, source: SourceHandle, value: T) -> Result<(), GraphError> {
        self.expect_phase("send a value", &[GraphPhase::Building, GraphPhase::Running])?;
        if !self.sources.contains(&source) {
            return Err(GraphError::UnknownSource(source));
        }

        self.phase = GraphPhase::Running;
        if let Some(observer) = &self.observer {
            observer.value_pushed(source, &value);
        }
        let result = self.propagate(Endpoint::Source(source), value);
        if result.is_err() {
            self.phase = GraphPhase::Faulted;
        }
        result
    }

    pub(crate) fn expect_phase(
        &self,
        operation: &'static str,
        allowed: &[GraphPhase],
    ) -> Result<(), GraphError> {
        if allowed.contains(&self.phase) {
            Ok(())
        } else {
            Err(GraphError::InvalidPhase {
                operation,
                phase: self.phase,
            })
        }
    }

    pub(crate) fn runtime_mut(&mut self, node: NodeHandle) -> Result<&mut NodeRuntime<T>, GraphError> {
        self.nodes.get_mut(&node).ok_or(GraphError::UnknownNode(node))
    }
}

impl<T> Graph<T> {
    pub fn phase(&self) -> GraphPhase {
        self.phase
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn source_count(&self) -> usize {
        self.sources.len()
    }

    /// Total number of wired edges.
    pub fn edge_count(&self) -> usize {
        self.edges.values().map(Vec::len).sum()
    }

    pub fn node_state(&self, node: NodeHandle) -> Option<NodeState> {
        self.nodes.get(&node).map(NodeRuntime::state)
    }

    pub fn node_name(&self, node: NodeHandle) -> Option<&str> {
        self.nodes.get(&node).map(NodeRuntime::name)
    }

    /// Downstream nodes of `endpoint`, in fan-out order.
    pub fn targets(&self, endpoint: impl Into<Endpoint>) -> &[NodeHandle] {
        self.edges
            .get(&endpoint.into())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub(crate) fn label(&self, node: NodeHandle) -> NodeLabel<'_> {
        NodeLabel {
            handle: node,
            name: self.nodes.get(&node).map(NodeRuntime::name).unwrap_or("?"),
        }
    }

    /// Name used in error messages for anything that can emit.
    pub(crate) fn emitter_name(&self, endpoint: Endpoint) -> String {
        match endpoint {
            Endpoint::Source(source) => source.to_string(),
            Endpoint::Node(node) => self.label(node).name.to_owned(),
        }
    }
}

impl<T> fmt::Debug for Graph<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Graph")
            .field("phase", &self.phase)
            .field("nodes", &self.nodes.values().collect::<Vec<_>>())
            .field("sources", &self.sources)
            .field("edge_count", &self.edge_count())
            .field("observed", &self.observer.is_some())
            .finish()
    }
}
