// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::{Graph, GraphPhase, Input, NodeState, Output, SourceHandle};
use crate::errors::GraphError;
use crate::nodes::stub::{collector, exits_immediately, ignores_termination, stalls};
use crate::nodes::{sink_to_callable, transform};
use crate::traits::{GraphObserver, NodeLabel};
use futures::StreamExt;
use std::cell::RefCell;
use std::rc::Rc;

type Store<T> = Rc<RefCell<Vec<T>>>;

fn words() -> Vec<String> {
    ["hello", "pizza", "cheese", "2", "blahblahblah"]
        .iter()
        .map(|w| w.to_string())
        .collect()
}

/// source → lengths → collector
fn lengths_graph(store: &Store<String>) -> (Graph<String>, SourceHandle) {
    let mut graph = Graph::new();
    let source = graph.add_source().unwrap();
    let lengths = graph
        .add_node("lengths", transform(|w: String| w.len().to_string()))
        .unwrap();
    let sink = graph.add_node("sink", collector(store)).unwrap();
    graph.add_edge(source, lengths).unwrap();
    graph.add_edge(lengths, sink).unwrap();
    (graph, source)
}

#[test]
fn test_order_is_preserved_end_to_end() {
    let store: Store<String> = Rc::default();
    let (mut graph, source) = lengths_graph(&store);

    for word in words() {
        graph.send(source, word).unwrap();
    }
    graph.terminate().unwrap();

    assert_eq!(*store.borrow(), vec!["5", "5", "6", "1", "12"]);
}

#[test]
fn test_multicast_targets_observe_the_same_sequence() {
    let first: Store<String> = Rc::default();
    let second: Store<String> = Rc::default();
    let mut graph = Graph::new();
    let source = graph.add_source().unwrap();
    let a = graph.add_node("a", collector(&first)).unwrap();
    let b = graph.add_node("b", collector(&second)).unwrap();
    graph.add_edge(source, a).unwrap();
    graph.add_edge(source, b).unwrap();

    for word in words() {
        graph.send(source, word).unwrap();
    }

    assert_eq!(*first.borrow(), words());
    assert_eq!(*second.borrow(), words());
    graph.terminate().unwrap();
}

#[test]
fn test_failed_registration_leaves_graph_usable() {
    let store: Store<String> = Rc::default();
    let (mut graph, source) = lengths_graph(&store);

    let err = graph.add_node("quitter", exits_immediately::<String>()).unwrap_err();
    assert_eq!(err, GraphError::Initialization { node: "quitter".into() });
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.phase(), GraphPhase::Building);

    graph.send(source, "abc".to_string()).unwrap();
    graph.terminate().unwrap();
    assert_eq!(*store.borrow(), vec!["3"]);
}

#[test]
fn test_terminate_clears_every_table() {
    let store: Store<String> = Rc::default();
    let (mut graph, source) = lengths_graph(&store);
    graph.send(source, "x".to_string()).unwrap();

    graph.terminate().unwrap();

    assert_eq!(graph.phase(), GraphPhase::Terminated);
    assert_eq!(graph.node_count(), 0);
    assert_eq!(graph.edge_count(), 0);
    assert_eq!(graph.source_count(), 0);
    assert_eq!(
        graph.send(source, "y".to_string()),
        Err(GraphError::InvalidPhase {
            operation: "send a value",
            phase: GraphPhase::Terminated
        })
    );
}

#[test]
fn test_node_ignoring_termination_is_a_zombie() {
    let store: Store<u8> = Rc::default();
    let mut graph = Graph::new();
    let source = graph.add_source().unwrap();
    let looper = graph.add_node("looper", ignores_termination::<u8>()).unwrap();
    let fine = graph.add_node("fine", collector(&store)).unwrap();
    graph.add_edge(source, looper).unwrap();
    graph.add_edge(source, fine).unwrap();
    graph.send(source, 1).unwrap();

    let err = graph.terminate().unwrap_err();

    assert_eq!(err, GraphError::ZombieNode { node: "looper".into() });
    assert_eq!(graph.phase(), GraphPhase::Faulted);
    assert_eq!(graph.node_state(looper), Some(NodeState::Zombie));
    // not transactional: the healthy node already exited, nothing was cleared
    assert_eq!(graph.node_state(fine), Some(NodeState::Terminated));
    assert_eq!(graph.node_count(), 2);
    assert_eq!(graph.edge_count(), 2);
    assert!(matches!(graph.send(source, 2), Err(GraphError::InvalidPhase { .. })));
}

#[test]
fn test_first_zombie_in_registration_order_is_reported() {
    let mut graph: Graph<u8> = Graph::new();
    let source = graph.add_source().unwrap();
    let late = graph.add_node("late", ignores_termination::<u8>()).unwrap();
    let early = graph.add_node("early", ignores_termination::<u8>()).unwrap();
    // wired so the walk reaches `early` first
    graph.add_edge(source, early).unwrap();
    graph.add_edge(source, late).unwrap();

    assert_eq!(
        graph.terminate(),
        Err(GraphError::ZombieNode { node: "late".into() })
    );
    assert_eq!(graph.node_state(early), Some(NodeState::Zombie));
}

#[test]
fn test_emit_without_edges_is_a_sink_emit_error() {
    let store: Store<u8> = Rc::default();
    let mut graph = Graph::new();
    let source = graph.add_source().unwrap();
    let witness = graph.add_node("witness", collector(&store)).unwrap();
    let leaky = graph.add_node("leaky", transform(|x: u8| x + 1)).unwrap();
    graph.add_edge(source, witness).unwrap();
    graph.add_edge(source, leaky).unwrap();

    let err = graph.send(source, 7).unwrap_err();

    assert_eq!(err, GraphError::SinkEmit { emitter: "leaky".into() });
    assert_eq!(graph.phase(), GraphPhase::Faulted);
    // earlier fan-out targets keep their side effects
    assert_eq!(*store.borrow(), vec![7]);
}

#[test]
fn test_push_into_unwired_source_is_a_sink_emit_error() {
    let mut graph: Graph<u8> = Graph::new();
    let source = graph.add_source().unwrap();
    assert_eq!(
        graph.send(source, 1),
        Err(GraphError::SinkEmit {
            emitter: "source#0".into()
        })
    );
}

#[test]
fn test_foreign_suspension_is_reported_as_stalled() {
    let mut graph: Graph<u8> = Graph::new();
    let source = graph.add_source().unwrap();
    let stuck = graph.add_node("stuck", stalls::<u8>()).unwrap();
    graph.add_edge(source, stuck).unwrap();

    assert_eq!(
        graph.send(source, 1),
        Err(GraphError::Stalled { node: "stuck".into() })
    );
    assert_eq!(graph.phase(), GraphPhase::Faulted);
}

#[test]
fn test_diamond_delivers_once_per_path_in_edge_order() {
    let store: Store<String> = Rc::default();
    let mut graph = Graph::new();
    let source = graph.add_source().unwrap();
    let upper = graph
        .add_node("upper", transform(|s: String| s.to_uppercase()))
        .unwrap();
    let twice = graph
        .add_node("twice", transform(|s: String| format!("{s}{s}")))
        .unwrap();
    let join = graph.add_node("join", collector(&store)).unwrap();
    graph.add_edge(source, upper).unwrap();
    graph.add_edge(source, twice).unwrap();
    graph.add_edge(upper, join).unwrap();
    graph.add_edge(twice, join).unwrap();

    graph.send(source, "ab".to_string()).unwrap();
    graph.send(source, "c".to_string()).unwrap();
    graph.terminate().unwrap();

    assert_eq!(*store.borrow(), vec!["AB", "abab", "C", "cc"]);
}

#[test]
fn test_independent_sources_interleave_in_call_order() {
    let store: Store<i32> = Rc::default();
    let mut graph = Graph::new();
    let odds = graph.add_source().unwrap();
    let evens = graph.add_source().unwrap();
    let sink = graph.add_node("sink", collector(&store)).unwrap();
    graph.add_edge(odds, sink).unwrap();
    graph.add_edge(evens, sink).unwrap();

    graph.send(odds, 1).unwrap();
    graph.send(evens, 2).unwrap();
    graph.send(odds, 3).unwrap();
    graph.terminate().unwrap();

    assert_eq!(*store.borrow(), vec![1, 2, 3]);
}

#[test]
fn test_emission_during_termination_flushes_through_downstream() {
    let store: Store<u32> = Rc::default();
    let mut graph = Graph::new();
    let source = graph.add_source().unwrap();
    let summer = graph
        .add_node("sum", |mut input: Input<u32>, output: Output<u32>| async move {
            let mut total = 0;
            while let Some(value) = input.next().await {
                total += value;
            }
            output.emit(total).await;
        })
        .unwrap();
    let double = graph.add_node("double", transform(|x: u32| x * 2)).unwrap();
    let sink = graph.add_node("sink", collector(&store)).unwrap();
    graph.add_edge(source, summer).unwrap();
    graph.add_edge(summer, double).unwrap();
    graph.add_edge(double, sink).unwrap();

    for n in 1..=4 {
        graph.send(source, n).unwrap();
    }
    assert!(store.borrow().is_empty());
    graph.terminate().unwrap();

    assert_eq!(*store.borrow(), vec![20]);
}

#[derive(Default)]
struct Recorder {
    events: RefCell<Vec<String>>,
}

impl GraphObserver<u8> for Rc<Recorder> {
    fn value_pushed(&self, source: SourceHandle, value: &u8) {
        self.events.borrow_mut().push(format!("push {source} {value}"));
    }

    fn value_delivered(&self, node: NodeLabel<'_>, value: &u8) {
        self.events.borrow_mut().push(format!("deliver {} {value}", node.name));
    }

    fn value_dropped(&self, node: NodeLabel<'_>, value: &u8) {
        self.events.borrow_mut().push(format!("drop {} {value}", node.name));
    }

    fn termination_delivered(&self, node: NodeLabel<'_>) {
        self.events.borrow_mut().push(format!("terminate {}", node.name));
    }

    fn node_terminated(&self, node: NodeLabel<'_>) {
        self.events.borrow_mut().push(format!("exit {}", node.name));
    }

    fn node_zombied(&self, node: NodeLabel<'_>) {
        self.events.borrow_mut().push(format!("zombie {}", node.name));
    }
}

#[test]
fn test_observer_sees_flow_drops_and_shutdown() {
    let recorder = Rc::new(Recorder::default());
    let mut graph = Graph::new().with_observer(recorder.clone());
    let source = graph.add_source().unwrap();
    let once = graph
        .add_node("once", |mut input: Input<u8>, _: Output<u8>| async move {
            input.next().await;
        })
        .unwrap();
    let sink = graph.add_node("sink", sink_to_callable(|_: u8| {})).unwrap();
    graph.add_edge(source, once).unwrap();
    graph.add_edge(source, sink).unwrap();

    graph.send(source, 1).unwrap();
    graph.send(source, 2).unwrap();
    graph.terminate().unwrap();

    assert_eq!(
        *recorder.events.borrow(),
        vec![
            "push source#0 1",
            "deliver once 1",
            "exit once",
            "deliver sink 1",
            "push source#0 2",
            "drop once 2",
            "deliver sink 2",
            "terminate sink",
            "exit sink",
        ]
    );
}

#[test]
fn test_observer_sees_zombie_after_its_termination_signal() {
    let recorder = Rc::new(Recorder::default());
    let mut graph = Graph::new().with_observer(recorder.clone());
    let source = graph.add_source().unwrap();
    let looper = graph.add_node("looper", ignores_termination::<u8>()).unwrap();
    let sink = graph.add_node("sink", sink_to_callable(|_: u8| {})).unwrap();
    graph.add_edge(source, looper).unwrap();
    graph.add_edge(source, sink).unwrap();

    graph.send(source, 3).unwrap();
    assert_eq!(
        graph.terminate(),
        Err(GraphError::ZombieNode { node: "looper".into() })
    );

    assert_eq!(
        *recorder.events.borrow(),
        vec![
            "push source#0 3",
            "deliver looper 3",
            "deliver sink 3",
            "terminate looper",
            "zombie looper",
            "terminate sink",
            "exit sink",
        ]
    );
}
