// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Message types for loading, validating and building pipelines.

use crate::errors::ValidationError;
use crate::observability::messages::StructuredLog;
use std::fmt::{Display, Formatter};
use tracing::Span;

/// A pipeline configuration was read and parsed.
///
/// # Log Level
/// `info!` - Important lifecycle event
///
/// # Example
/// ```
/// use canal::observability::messages::pipeline::PipelineLoaded;
///
/// let msg = PipelineLoaded {
///     path: "pipeline.yaml",
///     source_count: 1,
///     node_count: 3,
/// };
/// assert_eq!(msg.to_string(), "Loaded pipeline 'pipeline.yaml' (1 sources, 3 nodes)");
/// ```
pub struct PipelineLoaded<'a> {
    pub path: &'a str,
    pub source_count: usize,
    pub node_count: usize,
}

impl Display for PipelineLoaded<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Loaded pipeline '{}' ({} sources, {} nodes)",
            self.path, self.source_count, self.node_count
        )
    }
}

impl StructuredLog for PipelineLoaded<'_> {
    fn log(&self) {
        tracing::info!(
            path = self.path,
            source_count = self.source_count,
            node_count = self.node_count,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_loaded",
            span_name = name,
            path = self.path,
            source_count = self.source_count,
            node_count = self.node_count,
        )
    }
}

/// Validation rejected a pipeline.
///
/// # Log Level
/// `error!` - The pipeline cannot run
pub struct PipelineValidationFailed<'a> {
    pub errors: &'a [ValidationError],
}

impl Display for PipelineValidationFailed<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Pipeline validation failed with {} error(s)", self.errors.len())
    }
}

impl StructuredLog for PipelineValidationFailed<'_> {
    fn log(&self) {
        tracing::error!(error_count = self.errors.len(), "{}", self);
        for error in self.errors {
            tracing::error!(error = %error, "validation error");
        }
    }

    fn span(&self, name: &str) -> Span {
        tracing::error_span!(
            "pipeline_validation_failed",
            span_name = name,
            error_count = self.errors.len(),
        )
    }
}

/// Building a validated pipeline graph has started.
///
/// # Log Level
/// `debug!` - Detailed operational info
pub struct PipelineBuildStarted {
    pub source_count: usize,
    pub node_count: usize,
    pub traced: bool,
}

impl Display for PipelineBuildStarted {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Building pipeline graph from {} sources and {} nodes",
            self.source_count, self.node_count
        )
    }
}

impl StructuredLog for PipelineBuildStarted {
    fn log(&self) {
        tracing::debug!(
            source_count = self.source_count,
            node_count = self.node_count,
            traced = self.traced,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_build_started",
            span_name = name,
            source_count = self.source_count,
            node_count = self.node_count,
        )
    }
}

/// A pipeline graph was built and every node initialized.
///
/// # Log Level
/// `info!` - Important lifecycle event
pub struct PipelineBuilt {
    pub node_count: usize,
    pub edge_count: usize,
    pub traced: bool,
}

impl Display for PipelineBuilt {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(
            f,
            "Built pipeline graph: {} nodes, {} edges{}",
            self.node_count,
            self.edge_count,
            if self.traced { " (tracing value flow)" } else { "" }
        )
    }
}

impl StructuredLog for PipelineBuilt {
    fn log(&self) {
        tracing::info!(
            node_count = self.node_count,
            edge_count = self.edge_count,
            traced = self.traced,
            "{}", self
        );
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_built",
            span_name = name,
            node_count = self.node_count,
            edge_count = self.edge_count,
        )
    }
}

/// Input is about to be pushed through a built pipeline.
///
/// # Log Level
/// `info!` - Important lifecycle event
pub struct PipelineRunStarted<'a> {
    pub config: &'a str,
    pub source: &'a str,
}

impl Display for PipelineRunStarted<'_> {
    fn fmt(&self, f: &mut Formatter) -> std::fmt::Result {
        write!(f, "Running pipeline '{}' through source '{}'", self.config, self.source)
    }
}

impl StructuredLog for PipelineRunStarted<'_> {
    fn log(&self) {
        tracing::info!(config = self.config, source = self.source, "{}", self);
    }

    fn span(&self, name: &str) -> Span {
        tracing::info_span!(
            "pipeline_run_started",
            span_name = name,
            config = self.config,
            source = self.source,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_built_mentions_tracing_only_when_enabled() {
        let quiet = PipelineBuilt {
            node_count: 2,
            edge_count: 2,
            traced: false,
        };
        assert_eq!(quiet.to_string(), "Built pipeline graph: 2 nodes, 2 edges");

        let traced = PipelineBuilt { traced: true, ..quiet };
        assert!(traced.to_string().ends_with("(tracing value flow)"));
    }

    #[test]
    fn test_validation_failed_counts_errors() {
        let errors = vec![ValidationError::NoSources];
        let msg = PipelineValidationFailed { errors: &errors };
        assert_eq!(msg.to_string(), "Pipeline validation failed with 1 error(s)");
    }

    #[test]
    fn test_run_started_names_config_and_source() {
        let msg = PipelineRunStarted {
            config: "configs/multicast.yaml",
            source: "lines",
        };
        assert_eq!(
            msg.to_string(),
            "Running pipeline 'configs/multicast.yaml' through source 'lines'"
        );
    }
}
