// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Notification streams: a small multicast observer list.
//!
//! An [`Emitter`] fans a value out to every subscribed handler. Subscribing
//! returns a [`Subscription`]; dropping it (or calling
//! [`Subscription::unsubscribe`]) removes the handler. [`Emitter::complete`]
//! ends the stream: all handlers are released and further emissions are ignored.
//!
//! ## Delivery order
//!
//! Delivery is run-to-completion. A value emitted from inside a handler of the
//! same emitter is queued and delivered after the current value has reached
//! every handler, in FIFO order. Handlers therefore never re-enter themselves,
//! and a handler that reacts to a notification by mutating the source (for
//! example, closing more menus) cannot interleave with the delivery in progress.
//!
//! Handlers added during a delivery only see values emitted after they were
//! added. Handlers removed during a delivery are skipped for the rest of it.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_menu::signal::Emitter;
//!
//! let emitter: Emitter<u32> = Emitter::new();
//! let seen = Rc::new(RefCell::new(Vec::new()));
//! let sink = seen.clone();
//! let sub = emitter.subscribe(move |v| sink.borrow_mut().push(*v));
//!
//! emitter.emit(1);
//! drop(sub);
//! emitter.emit(2);
//! assert_eq!(*seen.borrow(), vec![1]);
//! ```

use alloc::collections::VecDeque;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

type Handler<T> = Rc<RefCell<dyn FnMut(&T)>>;

/// Multicast notification stream.
///
/// Cloning an `Emitter` yields another handle to the same stream.
pub struct Emitter<T> {
    shared: Rc<Shared<T>>,
}

struct Shared<T> {
    listeners: RefCell<Vec<(u64, Handler<T>)>>,
    pending: RefCell<VecDeque<T>>,
    delivering: Cell<bool>,
    completed: Cell<bool>,
    next_id: Cell<u64>,
}

trait Detach {
    fn detach(&self, id: u64);
    fn is_attached(&self, id: u64) -> bool;
}

impl<T> Detach for Shared<T> {
    fn detach(&self, id: u64) {
        self.listeners.borrow_mut().retain(|(lid, _)| *lid != id);
    }

    fn is_attached(&self, id: u64) -> bool {
        self.listeners.borrow().iter().any(|(lid, _)| *lid == id)
    }
}

impl<T: 'static> Emitter<T> {
    /// Create an empty, open stream.
    pub fn new() -> Self {
        Self {
            shared: Rc::new(Shared {
                listeners: RefCell::new(Vec::new()),
                pending: RefCell::new(VecDeque::new()),
                delivering: Cell::new(false),
                completed: Cell::new(false),
                next_id: Cell::new(0),
            }),
        }
    }

    /// Register `handler` for every future value.
    ///
    /// Subscribing to a completed stream returns an inactive subscription and
    /// drops the handler.
    pub fn subscribe(&self, handler: impl FnMut(&T) + 'static) -> Subscription {
        if self.shared.completed.get() {
            return Subscription::inactive();
        }
        let id = self.shared.next_id.get();
        self.shared.next_id.set(id + 1);
        let handler: Handler<T> = Rc::new(RefCell::new(handler));
        self.shared.listeners.borrow_mut().push((id, handler));
        let source: Weak<dyn Detach> = Rc::downgrade(&self.shared) as Weak<dyn Detach>;
        Subscription {
            source: Some(source),
            id,
        }
    }

    /// Deliver `value` to every current handler.
    pub fn emit(&self, value: T) {
        if self.shared.completed.get() {
            return;
        }
        self.shared.pending.borrow_mut().push_back(value);
        if self.shared.delivering.replace(true) {
            // An outer `emit` on this stream drains the queue.
            return;
        }
        let _guard = DeliveryGuard(&self.shared.delivering);
        loop {
            let Some(value) = self.shared.pending.borrow_mut().pop_front() else {
                break;
            };
            let snapshot = self.shared.listeners.borrow().clone();
            for (id, handler) in snapshot {
                if !self.shared.is_attached(id) {
                    continue;
                }
                (&mut *handler.borrow_mut())(&value);
            }
        }
    }

    /// End the stream: release every handler and ignore later emissions.
    pub fn complete(&self) {
        self.shared.completed.set(true);
        self.shared.pending.borrow_mut().clear();
        // Take the handlers out before dropping them; their captures may touch
        // this emitter again.
        let listeners = core::mem::take(&mut *self.shared.listeners.borrow_mut());
        drop(listeners);
    }

    /// Whether [`complete`](Self::complete) has been called.
    pub fn is_completed(&self) -> bool {
        self.shared.completed.get()
    }

    /// Number of attached handlers.
    pub fn listener_count(&self) -> usize {
        self.shared.listeners.borrow().len()
    }
}

impl<T: 'static> Default for Emitter<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Clone for Emitter<T> {
    fn clone(&self) -> Self {
        Self {
            shared: Rc::clone(&self.shared),
        }
    }
}

impl<T> fmt::Debug for Emitter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Emitter")
            .field("listeners", &self.shared.listeners.borrow().len())
            .field("pending", &self.shared.pending.borrow().len())
            .field("completed", &self.shared.completed.get())
            .finish()
    }
}

struct DeliveryGuard<'a>(&'a Cell<bool>);

impl Drop for DeliveryGuard<'_> {
    fn drop(&mut self) {
        self.0.set(false);
    }
}

/// Handle for one handler registered on an [`Emitter`].
///
/// Dropping the subscription removes the handler.
#[must_use = "dropping a Subscription unsubscribes its handler"]
pub struct Subscription {
    source: Option<Weak<dyn Detach>>,
    id: u64,
}

impl Subscription {
    fn inactive() -> Self {
        Self {
            source: None,
            id: 0,
        }
    }

    /// Remove the handler now.
    pub fn unsubscribe(self) {}

    /// Whether the handler is still attached: the subscription has not been
    /// dropped and the stream has not completed.
    pub fn is_active(&self) -> bool {
        self.source
            .as_ref()
            .and_then(Weak::upgrade)
            .is_some_and(|source| source.is_attached(self.id))
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(source) = self.source.take().and_then(|weak| weak.upgrade()) {
            source.detach(self.id);
        }
    }
}

impl fmt::Debug for Subscription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Subscription")
            .field("id", &self.id)
            .field("active", &self.is_active())
            .finish()
    }
}
