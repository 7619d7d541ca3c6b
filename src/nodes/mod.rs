// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Node combinator library.
//!
//! Every function here returns a [`Routine`](crate::traits::Routine): a value ready to
//! be registered with [`Graph::add_node`](crate::engine::Graph::add_node). None of
//! them know how they are wired.
//!
//! # Available Nodes
//!
//! ## Filters and maps
//! - [`grep`]: pass values the predicate accepts
//! - [`transform`]: emit `f(value)` for every value
//! - [`uniq`] / [`uniq_by`]: drop consecutive duplicates (by value or by key)
//!
//! ## Grouping
//! - [`aggregate`]: collect values per key until a group closes, then emit the group.
//!   Groups still open at termination are discarded.
//!
//! ## JSON codec
//! - [`json_encode`]: `serde_json::Value` to its text form
//! - [`json_decode`]: text back to `serde_json::Value`
//!
//! ## Sinks
//! - [`sink_to_file`] / [`sink_to_writer`]: write each value plus a separator
//! - [`sink_to_callable`]: hand each value to a closure
//!
//! ## Configuration-driven construction
//! [`NodeFactory`] builds `serde_json::Value` nodes from a
//! [`NodeConfig`](crate::config::NodeConfig):
//! ```text
//! NodeConfig → NodeFactory → BoxedRoutine → Graph::add_node
//! ```
//!
//! # Example
//! ```rust
//! use canal::engine::Graph;
//! use canal::nodes::{sink_to_callable, transform};
//! use std::cell::RefCell;
//! use std::rc::Rc;
//!
//! let lengths = Rc::new(RefCell::new(Vec::new()));
//! let mut graph: Graph<String> = Graph::new();
//! let source = graph.add_source().unwrap();
//! let measure = graph.add_node("measure", transform(|word: String| word.len().to_string())).unwrap();
//! let seen = lengths.clone();
//! let sink = graph
//!     .add_node("sink", sink_to_callable(move |len: String| seen.borrow_mut().push(len)))
//!     .unwrap();
//! graph.add_edge(source, measure).unwrap();
//! graph.add_edge(measure, sink).unwrap();
//!
//! graph.send(source, "pizza".to_string()).unwrap();
//! graph.terminate().unwrap();
//! assert_eq!(*lengths.borrow(), vec!["5"]);
//! ```

mod aggregate;
pub mod factory;
mod json;
mod sink;
#[cfg(test)]
pub mod stub;
mod stream;

pub use aggregate::aggregate;
pub use factory::NodeFactory;
pub use json::{json_decode, json_encode, JsonEncodeOptions};
pub use sink::{sink_to_callable, sink_to_file, sink_to_writer};
pub use stream::{grep, transform, uniq, uniq_by};
