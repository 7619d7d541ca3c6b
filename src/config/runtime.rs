// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::config::{load_config, validate_pipeline, PipelineConfig};
use crate::engine::{Endpoint, Graph, Pipeline};
use crate::errors::{ConfigError, PipelineError};
use crate::nodes::NodeFactory;
use crate::observability::messages::pipeline::{
    PipelineBuildStarted, PipelineBuilt, PipelineValidationFailed,
};
use crate::observability::messages::StructuredLog;
use crate::observability::TracingObserver;
use serde_json::Value;
use std::collections::HashMap;
use std::path::Path;

/// Name the tracing observer tags graph events with
const TRACE_GRAPH_NAME: &str = "pipeline";

/// Pipeline runtime builder - turns a pipeline configuration into a running graph.
///
/// Sources are registered first, then every node (started in declaration order), then
/// the edges. A source or node feeds its consumers in the order they are declared in
/// `nodes`.
///
/// # Examples
///
/// ```
/// use canal::config::{parse_config, RuntimeBuilder};
/// use serde_json::json;
///
/// let cfg = parse_config(
///     r#"
/// sources: [numbers]
/// nodes:
///   - id: wrap
///     kind: transform
///     inputs: [numbers]
///     options: { wrap: n }
///   - id: out
///     kind: sink_to_file
///     inputs: [wrap]
///     options: { path: "-" }
/// "#,
/// )
/// .unwrap();
///
/// let mut pipeline = RuntimeBuilder::from_config(&cfg).unwrap();
/// pipeline.send("numbers", json!(1)).unwrap();
/// pipeline.terminate().unwrap();
/// ```
pub struct RuntimeBuilder;

impl RuntimeBuilder {
    /// Validate `cfg` and build its graph.
    ///
    /// # Returns
    /// A [`Pipeline`] whose sources are addressed by their configured names
    pub fn from_config(cfg: &PipelineConfig) -> Result<Pipeline<Value>, PipelineError> {
        if let Err(errors) = validate_pipeline(cfg) {
            PipelineValidationFailed { errors: &errors }.log();
            return Err(ConfigError::Invalid(errors).into());
        }

        let start_msg = PipelineBuildStarted {
            source_count: cfg.sources.len(),
            node_count: cfg.nodes.len(),
            traced: cfg.trace,
        };
        let span = start_msg.span("pipeline_build");
        let _guard = span.enter();
        start_msg.log();

        let mut graph: Graph<Value> = Graph::new();
        if cfg.trace {
            graph.set_observer(TracingObserver::new(TRACE_GRAPH_NAME));
        }

        let mut endpoints: HashMap<&str, Endpoint> = HashMap::new();
        let mut sources = Vec::with_capacity(cfg.sources.len());
        for name in &cfg.sources {
            let source = graph.add_source()?;
            endpoints.insert(name.as_str(), source.into());
            sources.push((name.clone(), source));
        }

        let mut nodes = Vec::with_capacity(cfg.nodes.len());
        for node_cfg in &cfg.nodes {
            let routine = NodeFactory::create(node_cfg)?;
            let node = graph.add_node(node_cfg.id.as_str(), routine)?;
            endpoints.insert(node_cfg.id.as_str(), node.into());
            nodes.push(node);
        }

        for (node_cfg, node) in cfg.nodes.iter().zip(nodes) {
            for input in &node_cfg.inputs {
                // validation guarantees every input resolves
                if let Some(&from) = endpoints.get(input.as_str()) {
                    graph.add_edge(from, node)?;
                }
            }
        }

        PipelineBuilt {
            node_count: graph.node_count(),
            edge_count: graph.edge_count(),
            traced: cfg.trace,
        }
        .log();
        Ok(Pipeline::new(graph, sources))
    }

    /// Load, validate and build the pipeline described by a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Pipeline<Value>, PipelineError> {
        // from_config validates
        let cfg = load_config(path)?;
        Self::from_config(&cfg)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::parse_config;
    use crate::errors::ValidationError;
    use std::io::{self, Write};
    use std::sync::{Arc, Mutex};
    use tempfile::NamedTempFile;

    const SINGLE_SINK: &str = r#"
sources: [in]
nodes:
  - id: out
    kind: sink_to_file
    inputs: [in]
    options: { path: "-" }
"#;

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    /// Run `f` under a plain-text subscriber and return everything it logged.
    fn capture_logs(f: impl FnOnce()) -> String {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        tracing::subscriber::with_default(subscriber, f);
        let bytes = logs.0.lock().unwrap().clone();
        String::from_utf8(bytes).unwrap()
    }

    #[test]
    fn test_edges_follow_declaration_order() {
        let cfg = parse_config(
            r#"
sources: [in]
nodes:
  - id: second_reader
    kind: sink_to_file
    inputs: [in]
    options: { path: "-" }
  - id: first_reader
    kind: sink_to_file
    inputs: [in]
    options: { path: "-" }
"#,
        )
        .unwrap();

        let pipeline = RuntimeBuilder::from_config(&cfg).unwrap();
        let graph = pipeline.graph();
        let source = pipeline.source("in").unwrap();
        let names: Vec<_> = graph
            .targets(source)
            .iter()
            .filter_map(|node| graph.node_name(*node))
            .collect();
        assert_eq!(names, vec!["second_reader", "first_reader"]);
        assert_eq!(graph.edge_count(), 2);
    }

    #[test]
    fn test_invalid_config_is_rejected_before_building() {
        let cfg = parse_config("sources: []\nnodes: []\n").unwrap();
        match RuntimeBuilder::from_config(&cfg) {
            Err(PipelineError::Config(ConfigError::Invalid(errors))) => {
                assert_eq!(errors, vec![ValidationError::NoSources]);
            }
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn test_bad_node_options_surface_as_factory_error() {
        let cfg = parse_config(
            r#"
sources: [in]
nodes:
  - id: out
    kind: sink_to_file
    inputs: [in]
"#,
        )
        .unwrap();
        let err = RuntimeBuilder::from_config(&cfg).unwrap_err();
        assert!(matches!(err, PipelineError::Factory(_)));
        assert_eq!(err.to_string(), "node 'out' is missing required option 'path'");
    }

    #[test]
    fn test_build_is_logged_inside_its_span() {
        let cfg = parse_config(SINGLE_SINK).unwrap();
        let logs = capture_logs(|| {
            RuntimeBuilder::from_config(&cfg).unwrap();
        });

        let built = logs
            .lines()
            .find(|line| line.contains("Built pipeline graph"))
            .unwrap();
        assert!(built.contains("pipeline_build_started{"), "{built}");
        assert!(logs.contains("Building pipeline graph from 1 sources and 1 nodes"));
    }

    #[test]
    fn test_invalid_file_is_reported_once() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"sources: []\nnodes: []\n").unwrap();

        let logs = capture_logs(|| {
            let err = RuntimeBuilder::from_file(file.path()).unwrap_err();
            assert!(matches!(err, PipelineError::Config(ConfigError::Invalid(_))));
        });
        assert_eq!(logs.matches("Pipeline validation failed").count(), 1);
    }
}
