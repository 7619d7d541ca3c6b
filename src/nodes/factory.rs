// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::consts::{DEFAULT_SEPARATOR, NODE_KINDS, SINK_KINDS, STDOUT_PATH};
use crate::config::NodeConfig;
use crate::errors::NodeFactoryError;
use crate::nodes::{
    aggregate, grep, json_decode, json_encode, sink_to_writer, transform, uniq, uniq_by, JsonEncodeOptions,
};
use crate::observability::messages::node::NodeCreated;
use crate::observability::messages::StructuredLog;
use crate::traits::{boxed, BoxedRoutine};
use serde_json::{Map, Value};
use std::fs::File;
use std::io::{self, BufWriter, Write};

/// Factory for creating `serde_json::Value` nodes from configuration
pub struct NodeFactory;

impl NodeFactory {
    /// Create a node routine from configuration
    ///
    /// The `kind` field in the config determines which routine to create:
    /// - "grep" -> [`grep`] on `pointer` with one of `equals`, `not_equals`, `exists`
    /// - "transform" -> [`transform`] applying `select` and/or `wrap`
    /// - "uniq" -> [`uniq`], or [`uniq_by`] when `key` is set
    /// - "aggregate" -> [`aggregate`] on `key`, closing on `close_pointer`/`close_equals` and/or `max_len`
    /// - "json_encode" -> [`json_encode`] with optional `indent`
    /// - "json_decode" -> [`json_decode`]
    /// - "sink_to_file" -> [`sink_to_writer`] on `path` (`-` for stdout) with optional `separator`
    pub fn create(config: &NodeConfig) -> Result<BoxedRoutine<Value>, NodeFactoryError> {
        let routine = Self::build(config)?;
        NodeCreated {
            node_id: &config.id,
            kind: &config.kind,
            option_count: config.options.len(),
        }
        .log();
        Ok(routine)
    }

    fn build(config: &NodeConfig) -> Result<BoxedRoutine<Value>, NodeFactoryError> {
        let options = Options { config };
        match config.kind.as_str() {
            "grep" => Self::create_grep(&options),
            "transform" => Self::create_transform(&options),
            "uniq" => Ok(match options.pointer("key")? {
                Some(key) => boxed(uniq_by(move |value: &Value| value.pointer(&key).cloned())),
                None => boxed(uniq::<Value>()),
            }),
            "aggregate" => Self::create_aggregate(&options),
            "json_encode" => {
                let indent = options.usize("indent")?;
                Ok(boxed(json_encode(JsonEncodeOptions { indent })))
            }
            "json_decode" => Ok(boxed(json_decode())),
            "sink_to_file" => Self::create_sink_to_file(&options),
            _ => Err(NodeFactoryError::UnknownKind {
                node_id: config.id.clone(),
                kind: config.kind.clone(),
            }),
        }
    }

    /// List all node kinds the factory can build
    pub fn available_kinds() -> Vec<&'static str> {
        NODE_KINDS.to_vec()
    }

    /// Check if a node kind is available
    pub fn is_kind_available(kind: &str) -> bool {
        NODE_KINDS.contains(&kind)
    }

    /// Whether nodes of this kind never emit
    pub fn is_sink(kind: &str) -> bool {
        SINK_KINDS.contains(&kind)
    }

    fn create_grep(options: &Options) -> Result<BoxedRoutine<Value>, NodeFactoryError> {
        let pointer = options.pointer("pointer")?.unwrap_or_default();
        let equals = options.json("equals")?;
        let not_equals = options.json("not_equals")?;
        let exists = options.bool("exists")?;

        match (equals, not_equals, exists) {
            (Some(expected), None, None) => Ok(boxed(grep(move |value: &Value| {
                value.pointer(&pointer) == Some(&expected)
            }))),
            (None, Some(rejected), None) => Ok(boxed(grep(move |value: &Value| {
                value.pointer(&pointer) != Some(&rejected)
            }))),
            (None, None, Some(wanted)) => Ok(boxed(grep(move |value: &Value| {
                value.pointer(&pointer).is_some() == wanted
            }))),
            _ => Err(options.invalid(
                "equals",
                "grep needs exactly one of 'equals', 'not_equals' or 'exists'",
            )),
        }
    }

    fn create_transform(options: &Options) -> Result<BoxedRoutine<Value>, NodeFactoryError> {
        let select = options.pointer("select")?;
        let wrap = options.string("wrap")?;
        if select.is_none() && wrap.is_none() {
            return Err(options.invalid("select", "transform needs 'select', 'wrap' or both"));
        }

        Ok(boxed(transform(move |value: Value| {
            let value = match &select {
                Some(pointer) => value.pointer(pointer).cloned().unwrap_or(Value::Null),
                None => value,
            };
            match &wrap {
                Some(field) => {
                    let mut object = Map::new();
                    object.insert(field.clone(), value);
                    Value::Object(object)
                }
                None => value,
            }
        })))
    }

    fn create_aggregate(options: &Options) -> Result<BoxedRoutine<Value>, NodeFactoryError> {
        let key = options.pointer("key")?.ok_or_else(|| options.missing("key"))?;
        let max_len = options.usize("max_len")?;
        let marker = match (options.pointer("close_pointer")?, options.json("close_equals")?) {
            (Some(pointer), Some(expected)) => Some((pointer, expected)),
            (None, None) => None,
            _ => {
                return Err(options.invalid(
                    "close_pointer",
                    "'close_pointer' and 'close_equals' must be set together",
                ))
            }
        };
        if max_len == Some(0) {
            return Err(options.invalid("max_len", "must be at least 1"));
        }
        if marker.is_none() && max_len.is_none() {
            return Err(options.invalid(
                "close_pointer",
                "aggregate needs 'close_pointer'/'close_equals', 'max_len' or both",
            ));
        }

        Ok(boxed(aggregate(
            // serde_json::Value is not Hash; group on its canonical text
            move |value: &Value| value.pointer(&key).map(Value::to_string),
            move |group: &[Value]| {
                let full = max_len.map_or(false, |limit| group.len() >= limit);
                let marked = marker.as_ref().map_or(false, |(pointer, expected)| {
                    group.last().and_then(|last| last.pointer(pointer)) == Some(expected)
                });
                full || marked
            },
        )))
    }

    fn create_sink_to_file(options: &Options) -> Result<BoxedRoutine<Value>, NodeFactoryError> {
        let path = options.string("path")?.ok_or_else(|| options.missing("path"))?;
        let separator = options
            .string("separator")?
            .unwrap_or_else(|| DEFAULT_SEPARATOR.to_string());

        let writer: Box<dyn Write> = if path == STDOUT_PATH {
            Box::new(io::stdout())
        } else {
            let file = File::create(&path).map_err(|source| NodeFactoryError::Open {
                node_id: options.config.id.clone(),
                path: path.clone(),
                source,
            })?;
            Box::new(BufWriter::new(file))
        };

        Ok(boxed(sink_to_writer(writer, separator, render)))
    }
}

/// Strings are written raw, everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

/// Typed access to a node's free-form `options` table.
struct Options<'a> {
    config: &'a NodeConfig,
}

impl Options<'_> {
    fn raw(&self, name: &str) -> Option<&serde_yaml::Value> {
        self.config.options.get(name)
    }

    fn string(&self, name: &'static str) -> Result<Option<String>, NodeFactoryError> {
        match self.raw(name) {
            None => Ok(None),
            Some(serde_yaml::Value::String(s)) => Ok(Some(s.clone())),
            Some(_) => Err(self.invalid(name, "expected a string")),
        }
    }

    /// A JSON pointer; empty selects the whole value.
    fn pointer(&self, name: &'static str) -> Result<Option<String>, NodeFactoryError> {
        match self.string(name)? {
            Some(p) if !p.is_empty() && !p.starts_with('/') => {
                Err(self.invalid(name, "a JSON pointer must be empty or start with '/'"))
            }
            other => Ok(other),
        }
    }

    fn usize(&self, name: &'static str) -> Result<Option<usize>, NodeFactoryError> {
        match self.raw(name) {
            None => Ok(None),
            Some(value) => value
                .as_u64()
                .and_then(|n| usize::try_from(n).ok())
                .map(Some)
                .ok_or_else(|| self.invalid(name, "expected a non-negative integer")),
        }
    }

    fn bool(&self, name: &'static str) -> Result<Option<bool>, NodeFactoryError> {
        match self.raw(name) {
            None => Ok(None),
            Some(value) => value
                .as_bool()
                .map(Some)
                .ok_or_else(|| self.invalid(name, "expected true or false")),
        }
    }

    /// Any YAML value, converted to JSON for comparison with payloads.
    fn json(&self, name: &'static str) -> Result<Option<Value>, NodeFactoryError> {
        self.raw(name)
            .map(|value| serde_json::to_value(value).map_err(|e| self.invalid(name, &e.to_string())))
            .transpose()
    }

    fn missing(&self, option: &'static str) -> NodeFactoryError {
        NodeFactoryError::MissingOption {
            node_id: self.config.id.clone(),
            option,
        }
    }

    fn invalid(&self, option: &'static str, reason: &str) -> NodeFactoryError {
        NodeFactoryError::InvalidOption {
            node_id: self.config.id.clone(),
            option,
            reason: reason.to_string(),
        }
    }
}
