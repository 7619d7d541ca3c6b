// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::{Input, Output};
use crate::observability::messages::node::SinkWriteFailed;
use crate::observability::messages::StructuredLog;
use crate::traits::Routine;
use futures::StreamExt;
use std::fmt::Display;
use std::io::Write;

/// Write `value` followed by `separator` for every value, using `Display`.
///
/// The separator is also written after the last value. Output is flushed when the
/// graph terminates.
pub fn sink_to_file<T, W>(writer: W, separator: impl Into<String>) -> impl Routine<T>
where
    T: Display + 'static,
    W: Write + 'static,
{
    sink_to_writer(writer, separator, |value: &T| value.to_string())
}

/// Like [`sink_to_file`] with a custom rendering of each value.
///
/// Write errors are logged and the value is lost; the node keeps consuming input.
pub fn sink_to_writer<T, W, F>(mut writer: W, separator: impl Into<String>, mut render: F) -> impl Routine<T>
where
    T: 'static,
    W: Write + 'static,
    F: FnMut(&T) -> String + 'static,
{
    let separator = separator.into();
    move |mut input: Input<T>, _: Output<T>| async move {
        while let Some(value) = input.next().await {
            let line = render(&value);
            let written = writer
                .write_all(line.as_bytes())
                .and_then(|()| writer.write_all(separator.as_bytes()));
            if let Err(e) = written {
                SinkWriteFailed { error: &e }.log();
            }
        }
        if let Err(e) = writer.flush() {
            SinkWriteFailed { error: &e }.log();
        }
    }
}

/// Call `f(value)` for every value, for its side effects.
pub fn sink_to_callable<T, F>(mut f: F) -> impl Routine<T>
where
    T: 'static,
    F: FnMut(T) + 'static,
{
    move |mut input: Input<T>, _: Output<T>| async move {
        while let Some(value) = input.next().await {
            f(value);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::Graph;
    use crate::nodes::stub::SharedBuffer;
    use std::cell::RefCell;
    use std::io;
    use std::rc::Rc;

    #[test]
    fn test_sink_to_callable() {
        let values = Rc::new(RefCell::new(Vec::new()));
        let seen = values.clone();
        let mut graph = Graph::new();
        let source = graph.add_source().unwrap();
        let sink = graph
            .add_node("sink", sink_to_callable(move |v: i32| seen.borrow_mut().push(v)))
            .unwrap();
        graph.add_edge(source, sink).unwrap();

        for value in 1..=5 {
            graph.send(source, value).unwrap();
        }
        assert_eq!(*values.borrow(), vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn test_multicast_to_two_files() {
        let lines = SharedBuffer::default();
        let spaces = SharedBuffer::default();
        let mut graph = Graph::new();
        let source = graph.add_source().unwrap();
        let line_sink = graph.add_node("lines", sink_to_file::<&str, _>(lines.clone(), "\n")).unwrap();
        let space_sink = graph.add_node("spaces", sink_to_file::<&str, _>(spaces.clone(), " ")).unwrap();
        graph.add_edge(source, line_sink).unwrap();
        graph.add_edge(source, space_sink).unwrap();

        for value in ["a", "b", "c", "d", "e"] {
            graph.send(source, value).unwrap();
        }

        assert_eq!(lines.contents(), "a\nb\nc\nd\ne\n");
        assert_eq!(spaces.contents(), "a b c d e ");
        graph.terminate().unwrap();
    }

    struct Broken;

    impl Write for Broken {
        fn write(&mut self, _: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_write_failure_does_not_fault_graph() {
        let mut graph = Graph::new();
        let source = graph.add_source().unwrap();
        let sink = graph
            .add_node("broken", sink_to_writer(Broken, "\n", |v: &u8| v.to_string()))
            .unwrap();
        graph.add_edge(source, sink).unwrap();

        graph.send(source, 1).unwrap();
        graph.send(source, 2).unwrap();
        graph.terminate().unwrap();
    }
}
