// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Test-only routines that break the node contract, plus a harness for exercising a
//! single node between a source and a collecting sink.

use crate::engine::{Graph, Input, NodeHandle, Output, SourceHandle};
use crate::traits::Routine;
use futures::StreamExt;
use std::cell::RefCell;
use std::fmt::Debug;
use std::io::{self, Write};
use std::rc::Rc;

/// Returns without ever asking for input.
pub fn exits_immediately<T: 'static>() -> impl Routine<T> {
    |_: Input<T>, _: Output<T>| async {}
}

/// Keeps pulling after end-of-data, so it never exits.
pub fn ignores_termination<T: 'static>() -> impl Routine<T> {
    |mut input: Input<T>, _: Output<T>| async move {
        loop {
            let _ = input.next().await;
        }
    }
}

/// Takes one value, then waits on something the graph will never resolve.
pub fn stalls<T: 'static>() -> impl Routine<T> {
    |mut input: Input<T>, _: Output<T>| async move {
        let _ = input.next().await;
        futures::future::pending::<()>().await;
    }
}

/// Stores every value it receives.
pub fn collector<T: 'static>(store: &Rc<RefCell<Vec<T>>>) -> impl Routine<T> {
    let store = store.clone();
    move |mut input: Input<T>, _: Output<T>| async move {
        while let Some(value) = input.next().await {
            store.borrow_mut().push(value);
        }
    }
}

/// In-memory writer whose contents stay readable after a sink takes ownership of it.
#[derive(Debug, Clone, Default)]
pub struct SharedBuffer(Rc<RefCell<Vec<u8>>>);

impl SharedBuffer {
    pub fn contents(&self) -> String {
        String::from_utf8_lossy(&self.0.borrow()).into_owned()
    }
}

impl Write for SharedBuffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.0.borrow_mut().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// `source → node → collector`, for testing nodes that have both input and output.
pub struct NodeHarness<T> {
    pub graph: Graph<T>,
    pub source: SourceHandle,
    pub node: NodeHandle,
    output: Rc<RefCell<Vec<T>>>,
}

impl<T: Clone + Debug + PartialEq + 'static> NodeHarness<T> {
    pub fn new<R: Routine<T>>(routine: R) -> Self {
        let output = Rc::new(RefCell::new(Vec::new()));
        let mut graph = Graph::new();
        let source = graph.add_source().unwrap();
        let node = graph.add_node("under_test", routine).unwrap();
        let sink = graph.add_node("collector", collector(&output)).unwrap();
        graph.add_edge(source, node).unwrap();
        graph.add_edge(node, sink).unwrap();

        Self {
            graph,
            source,
            node,
            output,
        }
    }

    pub fn feed(&mut self, values: impl IntoIterator<Item = T>) {
        for value in values {
            self.graph.send(self.source, value).unwrap();
        }
    }

    pub fn output(&self) -> Vec<T> {
        self.output.borrow().clone()
    }

    pub fn terminate(&mut self) {
        self.graph.terminate().unwrap();
    }

    /// Feed `input`, check the collected output, then terminate cleanly.
    pub fn simple_test(mut self, input: Vec<T>, expected: Vec<T>) {
        self.feed(input);
        assert_eq!(self.output(), expected);
        self.terminate();
    }
}
