// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Termination coordinator.
//!
//! `terminate` runs in three steps:
//!
//! 1. **Cascade**: signal every node exactly once, never before any of its signaled
//!    predecessors. Nodes reachable from a source come first, in topological order
//!    seeded by breadth-first discovery from the sources in registration order. Nodes
//!    that no source reaches follow, in the same kind of order seeded by registration.
//!    Nodes on or downstream of a cycle have no such order; they close their group.
//! 2. **Verify**: every node must have reached [`NodeState::Terminated`]. The first one
//!    that did not, in registration order, is reported as a zombie.
//! 3. **Clear**: only on success are the node, edge and source tables emptied.
//!
//! A node may emit while handling the signal (flushing buffered state). Those values are
//! propagated like any other; because parents are signaled before their descendants,
//! flushed values still reach running children.
//!
//! Termination is not transactional. A zombie leaves the graph faulted with its tables
//! intact and every other node already terminated.

use crate::engine::io::Delivery;
use crate::engine::{Endpoint, Graph, GraphPhase, NodeHandle, NodeState};
use crate::errors::GraphError;
use std::collections::{HashMap, HashSet, VecDeque};

impl<T: Clone + 'static> Graph<T> {
    /// Drain every node and check that each one exited, then discard all graph state.
    pub fn terminate(&mut self) -> Result<(), GraphError> {
        self.expect_phase("terminate", &[GraphPhase::Building, GraphPhase::Running])?;
        self.phase = GraphPhase::Terminating;

        match self.cascade().and_then(|()| self.find_zombie()) {
            Ok(()) => {
                self.nodes.clear();
                self.edges.clear();
                self.sources.clear();
                self.phase = GraphPhase::Terminated;
                Ok(())
            }
            Err(error) => {
                self.phase = GraphPhase::Faulted;
                Err(error)
            }
        }
    }

    fn cascade(&mut self) -> Result<(), GraphError> {
        for node in self.signal_order() {
            self.signal(node)?;
        }
        Ok(())
    }

    fn signal_order(&self) -> Vec<NodeHandle> {
        let roots: Vec<Endpoint> = self.sources.iter().map(Endpoint::from).collect();
        let reached = self.discover(roots);
        let mut order = self.topological(&reached);

        let visited: HashSet<NodeHandle> = reached.into_iter().collect();
        let orphans: Vec<NodeHandle> = self
            .nodes
            .keys()
            .filter(|node| !visited.contains(*node))
            .copied()
            .collect();
        order.extend(self.topological(&orphans));
        order
    }

    /// Nodes reachable from `roots`, in breadth-first discovery order.
    fn discover(&self, roots: Vec<Endpoint>) -> Vec<NodeHandle> {
        let mut visited = HashSet::new();
        let mut found = Vec::new();
        let mut pending: VecDeque<Endpoint> = roots.into();
        while let Some(endpoint) = pending.pop_front() {
            for &target in self.targets(endpoint) {
                if visited.insert(target) {
                    found.push(target);
                    pending.push_back(Endpoint::Node(target));
                }
            }
        }
        found
    }

    /// Kahn's algorithm restricted to `group`; edges from outside the group are ignored.
    fn topological(&self, group: &[NodeHandle]) -> Vec<NodeHandle> {
        let mut in_degree: HashMap<NodeHandle, usize> = group.iter().map(|node| (*node, 0)).collect();
        for &node in group {
            for target in self.targets(node) {
                if let Some(count) = in_degree.get_mut(target) {
                    *count += 1;
                }
            }
        }

        let mut ready: VecDeque<NodeHandle> = group
            .iter()
            .filter(|node| in_degree.get(*node) == Some(&0))
            .copied()
            .collect();
        let mut placed = HashSet::new();
        let mut order = Vec::with_capacity(group.len());
        while let Some(node) = ready.pop_front() {
            placed.insert(node);
            order.push(node);
            for target in self.targets(node) {
                if let Some(count) = in_degree.get_mut(target) {
                    *count -= 1;
                    if *count == 0 {
                        ready.push_back(*target);
                    }
                }
            }
        }

        // nodes on or downstream of a cycle never become ready
        order.extend(group.iter().filter(|node| !placed.contains(*node)).copied());
        order
    }

    fn signal(&mut self, node: NodeHandle) -> Result<(), GraphError> {
        if self.node_state(node) != Some(NodeState::Suspended) {
            // exited on its own before termination
            return Ok(());
        }

        if let Some(observer) = &self.observer {
            observer.termination_delivered(self.label(node));
        }
        self.resume_node(node, Delivery::Terminate)?;

        let runtime = self.runtime_mut(node)?;
        if runtime.state() != NodeState::Terminated {
            runtime.mark_zombie();
            if let Some(observer) = &self.observer {
                observer.node_zombied(self.label(node));
            }
        }
        Ok(())
    }

    fn find_zombie(&self) -> Result<(), GraphError> {
        match self
            .nodes
            .values()
            .find(|runtime| runtime.state() != NodeState::Terminated)
        {
            Some(runtime) => Err(GraphError::ZombieNode {
                node: runtime.name().to_owned(),
            }),
            None => Ok(()),
        }
    }
}
