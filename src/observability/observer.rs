// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::SourceHandle;
use crate::observability::messages::graph::{
    NodeTerminated, NodeZombied, TerminationDelivered, ValueDelivered, ValueDropped, ValuePushed,
};
use crate::observability::messages::StructuredLog;
use crate::traits::{GraphObserver, NodeLabel};
use std::fmt::Debug;

/// Logs every graph event through `tracing`, tagged with a graph name.
#[derive(Debug, Clone)]
pub struct TracingObserver {
    graph: String,
}

impl TracingObserver {
    pub fn new(graph: impl Into<String>) -> Self {
        Self { graph: graph.into() }
    }

    pub fn graph(&self) -> &str {
        &self.graph
    }
}

impl<T: Debug> GraphObserver<T> for TracingObserver {
    fn value_pushed(&self, source: SourceHandle, value: &T) {
        ValuePushed {
            graph: &self.graph,
            source: &source.to_string(),
            value,
        }
        .log();
    }

    fn value_delivered(&self, node: NodeLabel<'_>, value: &T) {
        ValueDelivered {
            graph: &self.graph,
            node: &node.to_string(),
            value,
        }
        .log();
    }

    fn value_dropped(&self, node: NodeLabel<'_>, value: &T) {
        ValueDropped {
            graph: &self.graph,
            node: &node.to_string(),
            value,
        }
        .log();
    }

    fn termination_delivered(&self, node: NodeLabel<'_>) {
        TerminationDelivered {
            graph: &self.graph,
            node: &node.to_string(),
        }
        .log();
    }

    fn node_terminated(&self, node: NodeLabel<'_>) {
        NodeTerminated {
            graph: &self.graph,
            node: &node.to_string(),
        }
        .log();
    }

    fn node_zombied(&self, node: NodeLabel<'_>) {
        NodeZombied {
            graph: &self.graph,
            node: &node.to_string(),
        }
        .log();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Graph, Input, Output};
    use futures::StreamExt;

    #[test]
    fn test_observed_graph_behaves_like_an_unobserved_one() {
        let observer = TracingObserver::new("observed");
        assert_eq!(observer.graph(), "observed");

        let mut graph = Graph::new().with_observer(observer);
        let source = graph.add_source().unwrap();
        let node = graph
            .add_node("count", |mut input: Input<u8>, _: Output<u8>| async move {
                while input.next().await.is_some() {}
            })
            .unwrap();
        graph.add_edge(source, node).unwrap();

        graph.send(source, 1).unwrap();
        graph.terminate().unwrap();
    }
}
