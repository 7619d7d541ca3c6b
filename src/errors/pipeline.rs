// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

use crate::errors::{ConfigError, GraphError, NodeFactoryError};
use thiserror::Error;

/// Umbrella error for configured pipelines
#[derive(Debug, Error)]
pub enum PipelineError {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Factory(#[from] NodeFactoryError),

    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("pipeline has no source named '{0}'")]
    UnknownSource(String),
}
