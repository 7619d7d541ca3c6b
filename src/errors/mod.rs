// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

mod config;
mod graph;
mod node_factory;
mod pipeline;

pub use config::{ConfigError, ValidationError};
pub use graph::GraphError;
pub use node_factory::NodeFactoryError;
pub use pipeline::PipelineError;
