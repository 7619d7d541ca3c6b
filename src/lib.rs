// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod config;     // pipeline configuration
pub mod engine;     // graph execution engine
pub mod errors;     // error handling
pub mod nodes;      // node combinator library
pub mod observability;
pub mod traits;     // routine contract + observer hook
