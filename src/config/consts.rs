// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

/// Every node kind the factory can build, in documentation order
pub const NODE_KINDS: &[&str] = &[
    "grep",
    "transform",
    "uniq",
    "aggregate",
    "json_encode",
    "json_decode",
    "sink_to_file",
];
/// Kinds that never emit; they may end a pipeline
pub const SINK_KINDS: &[&str] = &["sink_to_file"];
/// Separator written after each value by `sink_to_file` unless configured
pub const DEFAULT_SEPARATOR: &str = "\n";
/// `sink_to_file` path that selects standard output
pub const STDOUT_PATH: &str = "-";
