// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while validating a pipeline configuration
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// Two entries (sources or nodes) share an id
    #[error("Duplicate id: '{id}'")]
    DuplicateId { id: String },

    /// A node lists an input that is neither a source nor a node
    #[error("Node '{node_id}' reads from '{missing_input}' which does not exist")]
    UnresolvedInput {
        node_id: String,
        missing_input: String,
    },

    /// The node kind is not one the factory can build
    #[error("Node '{node_id}' has unknown kind '{kind}'")]
    UnknownKind { node_id: String, kind: String },

    /// Values would circulate forever
    #[error("Cycle detected: {}", .cycle.join(" -> "))]
    Cycle { cycle: Vec<String> },

    /// A source or emitting node has nothing downstream; it would fail on its first value
    #[error("'{id}' emits values but nothing reads from it")]
    DanglingOutput { id: String },

    /// A node without inputs can never receive a value
    #[error("Node '{node_id}' has no inputs")]
    Unreachable { node_id: String },

    /// The pipeline declares no source to push values into
    #[error("Pipeline declares no sources")]
    NoSources,
}

/// Errors that can occur while loading a pipeline configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read '{}'", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse pipeline configuration")]
    Parse(#[from] serde_yaml::Error),

    #[error("pipeline validation failed:\n{}", render(.0))]
    Invalid(Vec<ValidationError>),
}

fn render(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(|e| format!("  - {e}"))
        .collect::<Vec<_>>()
        .join("\n")
}
