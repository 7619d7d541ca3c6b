// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

pub mod observer;
pub mod routine;

pub use observer::{GraphObserver, NodeLabel};
pub use routine::{boxed, BoxedRoutine, Routine};
