// Copyright (c) 2025 Steve Wagner (ciroque@live.com)
// SPDX-License-Identifier: MIT

//! The two endpoints a node routine sees: its [`Input`] sequence and its [`Output`] sink.
//!
//! Both share a single-slot [`Mailbox`] with the node's runtime. The driver drops one
//! delivery into the inbox and polls the routine; the routine either pulls it out of
//! the inbox and later suspends on the next pull, or parks a value in the outbox and
//! suspends inside [`Output::emit`] until the driver has pushed that value through
//! every downstream node.

use futures::{Stream, StreamExt};
use std::cell::RefCell;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::task::{Context, Poll};

/// What the driver hands a suspended node.
pub(crate) enum Delivery<T> {
    Value(T),
    Terminate,
}

pub(crate) struct Mailbox<T> {
    inbox: Option<Delivery<T>>,
    outbox: Option<T>,
    awaiting_input: bool,
}

pub(crate) type SharedMailbox<T> = Rc<RefCell<Mailbox<T>>>;

impl<T> Mailbox<T> {
    pub(crate) fn shared() -> SharedMailbox<T> {
        Rc::new(RefCell::new(Self {
            inbox: None,
            outbox: None,
            awaiting_input: false,
        }))
    }

    pub(crate) fn deliver(&mut self, delivery: Delivery<T>) {
        debug_assert!(self.inbox.is_none(), "node resumed with an undelivered value");
        self.inbox = Some(delivery);
    }

    /// Reset before each poll so a suspension can be attributed to the input pull.
    pub(crate) fn begin_poll(&mut self) {
        self.awaiting_input = false;
    }

    pub(crate) fn take_emitted(&mut self) -> Option<T> {
        self.outbox.take()
    }

    pub(crate) fn is_awaiting_input(&self) -> bool {
        self.awaiting_input
    }
}

/// Lazy, single-pass sequence of the values delivered to a node.
///
/// Yields `None` exactly once, when the node receives the termination signal. A routine
/// that keeps pulling after that is suspended for good, which is how a node that
/// ignores termination shows up as a zombie.
pub struct Input<T> {
    mailbox: SharedMailbox<T>,
}

impl<T> Input<T> {
    pub(crate) fn new(mailbox: SharedMailbox<T>) -> Self {
        Self { mailbox }
    }

    /// Wait for the next value; `None` once the graph is terminating.
    pub async fn recv(&mut self) -> Option<T> {
        self.next().await
    }
}

impl<T> Stream for Input<T> {
    type Item = T;

    fn poll_next(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Option<T>> {
        let mut mailbox = self.mailbox.borrow_mut();
        match mailbox.inbox.take() {
            Some(Delivery::Value(value)) => Poll::Ready(Some(value)),
            Some(Delivery::Terminate) => Poll::Ready(None),
            None => {
                mailbox.awaiting_input = true;
                Poll::Pending
            }
        }
    }
}

/// Synchronous sink for a node's results.
pub struct Output<T> {
    mailbox: SharedMailbox<T>,
}

impl<T> Output<T> {
    pub(crate) fn new(mailbox: SharedMailbox<T>) -> Self {
        Self { mailbox }
    }

    /// Send `value` to every downstream node, in edge order.
    ///
    /// The returned future completes once all of them have processed it. Emitting from
    /// a node with no outgoing edges fails the whole push with
    /// [`GraphError::SinkEmit`](crate::errors::GraphError::SinkEmit).
    pub fn emit(&self, value: T) -> Emit<'_, T> {
        Emit {
            mailbox: &self.mailbox,
            value: Some(value),
            sent: false,
        }
    }
}

/// Future returned by [`Output::emit`].
#[must_use = "emitted values are only delivered when the future is awaited"]
pub struct Emit<'a, T> {
    mailbox: &'a SharedMailbox<T>,
    value: Option<T>,
    sent: bool,
}

// The value is moved out, never pinned in place.
impl<T> Unpin for Emit<'_, T> {}

impl<T> Future for Emit<'_, T> {
    type Output = ();

    fn poll(self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<()> {
        let this = self.get_mut();
        if this.sent {
            return Poll::Ready(());
        }

        let mailbox = this.mailbox;
        let mut mailbox = mailbox.borrow_mut();
        if mailbox.outbox.is_some() {
            // another emission from the same routine is still in flight
            return Poll::Pending;
        }
        mailbox.outbox = this.value.take();
        this.sent = true;
        Poll::Pending
    }
}
