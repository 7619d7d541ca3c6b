// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::engine::{Graph, SourceHandle};
use crate::errors::PipelineError;

/// A built graph whose sources are addressed by name.
///
/// Produced by [`RuntimeBuilder`](crate::config::RuntimeBuilder) from a pipeline
/// configuration, but usable with any hand-built graph.
#[derive(Debug)]
pub struct Pipeline<T> {
    graph: Graph<T>,
    sources: Vec<(String, SourceHandle)>,
}

impl<T: Clone + 'static> Pipeline<T> {
    pub fn new(graph: Graph<T>, sources: Vec<(String, SourceHandle)>) -> Self {
        Self { graph, sources }
    }

    /// Push `value` through the source called `source`.
    pub fn send(&mut self, source: &str, value: T) -> Result<(), PipelineError> {
        let handle = self
            .source(source)
            .ok_or_else(|| PipelineError::UnknownSource(source.to_owned()))?;
        self.graph.send(handle, value)?;
        Ok(())
    }

    pub fn terminate(&mut self) -> Result<(), PipelineError> {
        self.graph.terminate()?;
        Ok(())
    }

    pub fn source(&self, name: &str) -> Option<SourceHandle> {
        self.sources
            .iter()
            .find(|(candidate, _)| candidate == name)
            .map(|(_, handle)| *handle)
    }
}

impl<T> Pipeline<T> {
    /// Source names in declaration order.
    pub fn source_names(&self) -> impl Iterator<Item = &str> {
        self.sources.iter().map(|(name, _)| name.as_str())
    }

    pub fn graph(&self) -> &Graph<T> {
        &self.graph
    }
}
