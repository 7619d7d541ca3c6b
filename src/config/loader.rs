// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::ConfigError;
use crate::observability::messages::pipeline::{PipelineLoaded, PipelineValidationFailed};
use crate::observability::messages::StructuredLog;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Configuration for a complete pipeline.
///
/// A pipeline is a graph over `serde_json::Value` payloads: named sources that values
/// are pushed into, and nodes that read from sources or from other nodes.
///
/// # Fields
/// * `sources` - Names of the entry points, in registration order
/// * `trace` - Install a [`TracingObserver`](crate::observability::TracingObserver) on the graph
/// * `nodes` - Node definitions, in registration order
///
/// # Example
/// ```yaml
/// sources: [lines]
/// nodes:
///   - id: decode
///     kind: json_decode
///     inputs: [lines]
///   - id: out
///     kind: sink_to_file
///     inputs: [decode]
///     options: { path: "-" }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PipelineConfig {
    pub sources: Vec<String>,
    #[serde(default)]
    pub trace: bool,
    pub nodes: Vec<NodeConfig>,
}

/// Configuration for a single node in the pipeline.
///
/// # Fields
/// * `id` - Unique identifier, shared namespace with the sources
/// * `kind` - Which library node to build (see [`NODE_KINDS`](crate::config::consts::NODE_KINDS))
/// * `inputs` - Sources or nodes this node reads from; their order is irrelevant, but
///   a node's position in `nodes` decides its place in each input's fan-out
/// * `options` - Kind-specific options
///
/// # Example
/// ```yaml
/// id: errors
/// kind: grep
/// inputs: [decode]
/// options: { pointer: /level, equals: error }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct NodeConfig {
    pub id: String,
    pub kind: String,
    #[serde(default)]
    pub inputs: Vec<String>,
    #[serde(default)]
    pub options: HashMap<String, serde_yaml::Value>,
}

/// Parse a pipeline from YAML text
pub fn parse_config(yaml: &str) -> Result<PipelineConfig, ConfigError> {
    Ok(serde_yaml::from_str(yaml)?)
}

/// Load a pipeline from a YAML file
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig, ConfigError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let cfg = parse_config(&content)?;

    PipelineLoaded {
        path: &path.display().to_string(),
        source_count: cfg.sources.len(),
        node_count: cfg.nodes.len(),
    }
    .log();
    Ok(cfg)
}

/// Load and validate a pipeline from a YAML file
///
/// Every validation problem is reported at once in [`ConfigError::Invalid`].
pub fn load_and_validate_config<P: AsRef<Path>>(path: P) -> Result<PipelineConfig, ConfigError> {
    let cfg = load_config(path)?;

    if let Err(errors) = crate::config::validate_pipeline(&cfg) {
        PipelineValidationFailed { errors: &errors }.log();
        return Err(ConfigError::Invalid(errors));
    }

    Ok(cfg)
}
