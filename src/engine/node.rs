// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Node runtime: one routine parked as a cooperative execution context.
//!
//! The routine is a future polled with a no-op waker. It can only legally suspend in
//! two places: pulling from its [`Input`] (awaiting a value) or inside
//! [`Output::emit`] (waiting for the driver to deliver what it emitted). Each poll
//! therefore ends in exactly one [`Step`].

use crate::engine::io::{Delivery, Mailbox, SharedMailbox};
use crate::engine::{Input, Output};
use crate::errors::GraphError;
use crate::traits::Routine;
use futures::future::LocalBoxFuture;
use futures::task::noop_waker_ref;
use std::fmt;
use std::future::Future;
use std::task::Context;

/// Lifecycle of a node's routine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeState {
    /// Started, not yet suspended on its first input pull.
    Initializing,
    /// Parked on its input, ready for the next value.
    Suspended,
    /// Processing a value; may be blocked inside its own emission.
    Running,
    /// The routine returned.
    Terminated,
    /// Still alive after the termination signal.
    Zombie,
}

impl fmt::Display for NodeState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            NodeState::Initializing => "initializing",
            NodeState::Suspended => "suspended",
            NodeState::Running => "running",
            NodeState::Terminated => "terminated",
            NodeState::Zombie => "zombie",
        };
        f.write_str(label)
    }
}

/// How a poll of the routine ended.
pub(crate) enum Step<T> {
    Suspended,
    Emitted(T),
    Exited,
}

pub(crate) struct NodeRuntime<T> {
    name: String,
    routine: Option<LocalBoxFuture<'static, ()>>,
    mailbox: SharedMailbox<T>,
    state: NodeState,
}

impl<T: 'static> NodeRuntime<T> {
    /// Start the routine and run it up to its first input pull.
    pub(crate) fn start<R: Routine<T>>(name: String, routine: R) -> Result<Self, GraphError> {
        let mailbox = Mailbox::shared();
        let future = routine.start(Input::new(mailbox.clone()), Output::new(mailbox.clone()));
        let mut node = Self {
            name,
            routine: Some(future),
            mailbox,
            state: NodeState::Initializing,
        };

        match node.poll()? {
            Step::Suspended => Ok(node),
            Step::Exited => Err(GraphError::Initialization { node: node.name }),
            // nothing can be wired to a node that is not registered yet
            Step::Emitted(_) => Err(GraphError::SinkEmit { emitter: node.name }),
        }
    }

    pub(crate) fn resume(&mut self, delivery: Delivery<T>) -> Result<Step<T>, GraphError> {
        self.mailbox.borrow_mut().deliver(delivery);
        self.poll()
    }

    /// Run the routine until its next suspension or exit.
    pub(crate) fn poll(&mut self) -> Result<Step<T>, GraphError> {
        let Some(routine) = self.routine.as_mut() else {
            return Ok(Step::Exited);
        };

        self.state = NodeState::Running;
        self.mailbox.borrow_mut().begin_poll();
        let mut cx = Context::from_waker(noop_waker_ref());
        if routine.as_mut().poll(&mut cx).is_ready() {
            self.routine = None;
            self.state = NodeState::Terminated;
            return Ok(Step::Exited);
        }

        let mut mailbox = self.mailbox.borrow_mut();
        if let Some(value) = mailbox.take_emitted() {
            return Ok(Step::Emitted(value));
        }
        if mailbox.is_awaiting_input() {
            drop(mailbox);
            self.state = NodeState::Suspended;
            return Ok(Step::Suspended);
        }
        Err(GraphError::Stalled {
            node: self.name.clone(),
        })
    }

    pub(crate) fn mark_zombie(&mut self) {
        self.state = NodeState::Zombie;
    }
}

impl<T> NodeRuntime<T> {
    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn state(&self) -> NodeState {
        self.state
    }
}

impl<T> fmt::Debug for NodeRuntime<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeRuntime")
            .field("name", &self.name)
            .field("state", &self.state)
            .finish()
    }
}
