// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! JSON codec nodes over `serde_json::Value` payloads.
//!
//! Encoding turns any value into a `Value::String` holding its text; decoding goes the
//! other way. Values that cannot be converted are logged and dropped so that one bad
//! record does not fault the graph.

use crate::engine::{Input, Output};
use crate::observability::messages::node::{JsonDecodeFailed, JsonEncodeFailed};
use crate::observability::messages::StructuredLog;
use crate::traits::Routine;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::ser::PrettyFormatter;
use serde_json::Value;

/// Formatting options for [`json_encode`].
///
/// Object keys are always written in sorted order: `serde_json::Value` keeps them in a
/// sorted map, so there is no separate key-ordering option. Decoding takes no options.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct JsonEncodeOptions {
    /// Pretty-print with this many spaces per level; compact when `None`.
    pub indent: Option<usize>,
}

impl JsonEncodeOptions {
    pub fn compact() -> Self {
        Self::default()
    }

    pub fn indented(indent: usize) -> Self {
        Self {
            indent: Some(indent),
        }
    }

    pub fn encode(&self, value: &Value) -> Result<String, serde_json::Error> {
        let Some(width) = self.indent else {
            return serde_json::to_string(value);
        };

        let indent = vec![b' '; width];
        let mut buffer = Vec::new();
        let mut serializer =
            serde_json::Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(&indent));
        value.serialize(&mut serializer)?;
        // serde_json only ever writes valid UTF-8
        Ok(String::from_utf8_lossy(&buffer).into_owned())
    }
}

/// Emit each value's JSON text as a `Value::String`.
pub fn json_encode(options: JsonEncodeOptions) -> impl Routine<Value> {
    move |mut input: Input<Value>, output: Output<Value>| async move {
        while let Some(value) = input.next().await {
            match options.encode(&value) {
                Ok(text) => output.emit(Value::String(text)).await,
                Err(e) => JsonEncodeFailed { reason: &e }.log(),
            }
        }
    }
}

/// Parse each `Value::String` as JSON and emit the result.
///
/// Non-string values and malformed text are logged and dropped.
pub fn json_decode() -> impl Routine<Value> {
    |mut input: Input<Value>, output: Output<Value>| async move {
        while let Some(value) = input.next().await {
            let Value::String(text) = &value else {
                JsonDecodeFailed {
                    input: &value,
                    reason: &"expected a JSON string",
                }
                .log();
                continue;
            };

            match serde_json::from_str::<Value>(text) {
                Ok(decoded) => output.emit(decoded).await,
                Err(e) => JsonDecodeFailed {
                    input: &value,
                    reason: &e,
                }
                .log(),
            }
        }
    }
}
