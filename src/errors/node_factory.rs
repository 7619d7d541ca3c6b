// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Errors for building nodes out of pipeline configuration.

use thiserror::Error;

/// Errors that can occur when the factory instantiates a configured node
#[derive(Debug, Error)]
pub enum NodeFactoryError {
    #[error("unknown node kind '{kind}' for node '{node_id}'")]
    UnknownKind { node_id: String, kind: String },

    #[error("node '{node_id}' is missing required option '{option}'")]
    MissingOption {
        node_id: String,
        option: &'static str,
    },

    #[error("node '{node_id}' has an invalid '{option}' option: {reason}")]
    InvalidOption {
        node_id: String,
        option: &'static str,
        reason: String,
    },

    #[error("node '{node_id}' could not open '{path}'")]
    Open {
        node_id: String,
        path: String,
        #[source]
        source: std::io::Error,
    },
}
