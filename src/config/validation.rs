// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Pipeline configuration validation.
//!
//! A configured pipeline becomes a graph only after it passes these checks, so that
//! the failures a graph would raise at run time (a source or node emitting into
//! nothing, values looping back into a busy node) are reported up front, with ids
//! instead of handles.
//!
//! # Checks
//!
//! 1. **Sources**: at least one source is declared
//! 2. **Uniqueness**: sources and nodes share one id namespace
//! 3. **Kinds**: every node kind is one the factory can build
//! 4. **Reachability**: every node has at least one input
//! 5. **References**: every input names a declared source or node
//! 6. **Consumers**: every source, and every node that can emit, has a consumer
//! 7. **Cycles**: DFS over `input → node` edges, reporting the cycle path
//!
//! Errors from all checks are accumulated. Cycle detection only runs once every
//! reference resolves, since it needs a well-formed graph.
//!
//! # Example
//! ```rust
//! use canal::config::{parse_config, validate_pipeline};
//! use canal::errors::ValidationError;
//!
//! let cfg = parse_config(
//!     r#"
//! sources: [lines]
//! nodes:
//!   - id: a
//!     kind: transform
//!     inputs: [lines, b]
//!     options: { wrap: v }
//!   - id: b
//!     kind: transform
//!     inputs: [a]
//!     options: { wrap: v }
//! "#,
//! )
//! .unwrap();
//!
//! let errors = validate_pipeline(&cfg).unwrap_err();
//! assert!(errors.contains(&ValidationError::Cycle {
//!     cycle: vec!["a".into(), "b".into(), "a".into()],
//! }));
//! ```

use crate::config::PipelineConfig;
use crate::errors::ValidationError;
use crate::nodes::NodeFactory;
use std::collections::{HashMap, HashSet};

/// Validates a pipeline configuration, collecting every problem found.
///
/// # Returns
///
/// * `Ok(())` - The pipeline can be built and will not fail structurally at run time
/// * `Err(Vec<ValidationError>)` - All validation errors, in check order
pub fn validate_pipeline(config: &PipelineConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.sources.is_empty() {
        errors.push(ValidationError::NoSources);
    }
    errors.extend(duplicate_ids(config));
    errors.extend(unknown_kinds(config));
    errors.extend(unreachable_nodes(config));

    let unresolved = unresolved_inputs(config);
    let references_resolve = unresolved.is_empty();
    errors.extend(unresolved);
    errors.extend(dangling_outputs(config));

    if references_resolve {
        if let Some(cycle) = find_cycle(config) {
            errors.push(ValidationError::Cycle { cycle });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn all_ids(config: &PipelineConfig) -> impl Iterator<Item = &String> {
    config.sources.iter().chain(config.nodes.iter().map(|n| &n.id))
}

fn duplicate_ids(config: &PipelineConfig) -> Vec<ValidationError> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    all_ids(config)
        .filter(|id| !seen.insert(*id) && reported.insert(*id))
        .map(|id| ValidationError::DuplicateId { id: id.clone() })
        .collect()
}

fn unknown_kinds(config: &PipelineConfig) -> Vec<ValidationError> {
    config
        .nodes
        .iter()
        .filter(|node| !NodeFactory::is_kind_available(&node.kind))
        .map(|node| ValidationError::UnknownKind {
            node_id: node.id.clone(),
            kind: node.kind.clone(),
        })
        .collect()
}

fn unreachable_nodes(config: &PipelineConfig) -> Vec<ValidationError> {
    config
        .nodes
        .iter()
        .filter(|node| node.inputs.is_empty())
        .map(|node| ValidationError::Unreachable {
            node_id: node.id.clone(),
        })
        .collect()
}

fn unresolved_inputs(config: &PipelineConfig) -> Vec<ValidationError> {
    let ids: HashSet<&String> = all_ids(config).collect();
    let mut errors = Vec::new();

    for node in &config.nodes {
        for input in &node.inputs {
            if !ids.contains(input) {
                errors.push(ValidationError::UnresolvedInput {
                    node_id: node.id.clone(),
                    missing_input: input.clone(),
                });
            }
        }
    }
    errors
}

/// Sources and emitting nodes that nothing reads from.
///
/// Nodes of unknown kind are skipped; they are already reported.
fn dangling_outputs(config: &PipelineConfig) -> Vec<ValidationError> {
    let consumed: HashSet<&String> = config.nodes.iter().flat_map(|n| &n.inputs).collect();

    let sources = config.sources.iter();
    let emitters = config
        .nodes
        .iter()
        .filter(|node| NodeFactory::is_kind_available(&node.kind) && !NodeFactory::is_sink(&node.kind))
        .map(|node| &node.id);

    sources
        .chain(emitters)
        .filter(|id| !consumed.contains(id))
        .map(|id| ValidationError::DanglingOutput { id: id.clone() })
        .collect()
}

/// DFS with a recursion stack over `input → node` edges, in declaration order.
///
/// Returns the first cycle found, starting and ending at the same id.
fn find_cycle(config: &PipelineConfig) -> Option<Vec<String>> {
    let mut consumers: HashMap<&str, Vec<&str>> = HashMap::new();
    for node in &config.nodes {
        for input in &node.inputs {
            consumers.entry(input.as_str()).or_default().push(node.id.as_str());
        }
    }

    let mut visited = HashSet::new();
    let mut rec_stack = HashSet::new();
    let mut path = Vec::new();
    for id in all_ids(config) {
        if !visited.contains(id.as_str()) {
            if let Some(cycle) = dfs_cycle_detection(id, &consumers, &mut visited, &mut rec_stack, &mut path) {
                return Some(cycle);
            }
        }
    }
    None
}

fn dfs_cycle_detection<'a>(
    id: &'a str,
    consumers: &HashMap<&'a str, Vec<&'a str>>,
    visited: &mut HashSet<&'a str>,
    rec_stack: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Option<Vec<String>> {
    visited.insert(id);
    rec_stack.insert(id);
    path.push(id);

    for &next in consumers.get(id).into_iter().flatten() {
        if rec_stack.contains(next) {
            let start = path.iter().position(|&p| p == next).unwrap_or(0);
            let mut cycle: Vec<String> = path[start..].iter().map(|p| p.to_string()).collect();
            cycle.push(next.to_string());
            return Some(cycle);
        }
        if !visited.contains(next) {
            if let Some(cycle) = dfs_cycle_detection(next, consumers, visited, rec_stack, path) {
                return Some(cycle);
            }
        }
    }

    rec_stack.remove(id);
    path.pop();
    None
}
