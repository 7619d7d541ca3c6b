// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! Propagation engine: fan a value out along an endpoint's edges.
//!
//! Propagation is a trampoline over an explicit stack of [`Frame`]s instead of native
//! recursion. A frame holds one emitted value and the targets it still has to reach.
//! Resuming a target either parks it again (move on to the next target), or makes it
//! emit (push a frame for the target's own edges). When a frame runs out of targets,
//! the node that emitted it is resumed from inside its `emit` call.
//!
//! This gives the same delivery order as a depth-first recursive push: every value
//! reaches all downstream nodes, in edge order, before its emitter continues.

use crate::engine::io::Delivery;
use crate::engine::node::Step;
use crate::engine::{Endpoint, Graph, NodeHandle, NodeState};
use crate::errors::GraphError;

struct Frame<T> {
    /// Node blocked in `emit` until this frame is exhausted; `None` for a source push.
    emitter: Option<NodeHandle>,
    value: T,
    targets: Vec<NodeHandle>,
    cursor: usize,
}

impl<T: Clone> Frame<T> {
    fn next_target(&mut self) -> Option<(NodeHandle, T)> {
        let target = *self.targets.get(self.cursor)?;
        self.cursor += 1;
        Some((target, self.value.clone()))
    }
}

impl<T: Clone + 'static> Graph<T> {
    /// Deliver `value` to every node downstream of `origin`.
    pub(crate) fn propagate(&mut self, origin: Endpoint, value: T) -> Result<(), GraphError> {
        let mut stack = vec![self.frame(origin, None, value)?];
        self.drain(&mut stack)
    }

    /// Resume a single node and carry everything it emits to completion.
    pub(crate) fn resume_node(&mut self, node: NodeHandle, delivery: Delivery<T>) -> Result<(), GraphError> {
        let mut stack = Vec::new();
        let step = self.runtime_mut(node)?.resume(delivery)?;
        self.settle(&mut stack, node, step)?;
        self.drain(&mut stack)
    }

    fn drain(&mut self, stack: &mut Vec<Frame<T>>) -> Result<(), GraphError> {
        while let Some(frame) = stack.last_mut() {
            match frame.next_target() {
                Some((target, value)) => {
                    if let Some(step) = self.deliver(target, value)? {
                        self.settle(stack, target, step)?;
                    }
                }
                None => {
                    let emitter = frame.emitter;
                    stack.pop();
                    if let Some(emitter) = emitter {
                        let step = self.runtime_mut(emitter)?.poll()?;
                        self.settle(stack, emitter, step)?;
                    }
                }
            }
        }
        Ok(())
    }

    /// Resume `target` with `value`; `None` when the value was dropped.
    fn deliver(&mut self, target: NodeHandle, value: T) -> Result<Option<Step<T>>, GraphError> {
        let state = self.node_state(target).ok_or(GraphError::UnknownNode(target))?;
        match state {
            NodeState::Suspended => {
                if let Some(observer) = &self.observer {
                    observer.value_delivered(self.label(target), &value);
                }
                self.runtime_mut(target)?.resume(Delivery::Value(value)).map(Some)
            }
            NodeState::Running => Err(GraphError::Reentrant {
                node: self.label(target).name.to_owned(),
            }),
            NodeState::Initializing | NodeState::Terminated | NodeState::Zombie => {
                if let Some(observer) = &self.observer {
                    observer.value_dropped(self.label(target), &value);
                }
                Ok(None)
            }
        }
    }

    fn settle(&mut self, stack: &mut Vec<Frame<T>>, node: NodeHandle, step: Step<T>) -> Result<(), GraphError> {
        match step {
            Step::Suspended => Ok(()),
            Step::Exited => {
                if let Some(observer) = &self.observer {
                    observer.node_terminated(self.label(node));
                }
                Ok(())
            }
            Step::Emitted(value) => {
                let frame = self.frame(Endpoint::Node(node), Some(node), value)?;
                stack.push(frame);
                Ok(())
            }
        }
    }

    fn frame(&self, origin: Endpoint, emitter: Option<NodeHandle>, value: T) -> Result<Frame<T>, GraphError> {
        match self.edges.get(&origin) {
            Some(targets) if !targets.is_empty() => Ok(Frame {
                emitter,
                value,
                targets: targets.clone(),
                cursor: 0,
            }),
            _ => Err(GraphError::SinkEmit {
                emitter: self.emitter_name(origin),
            }),
        }
    }
}
