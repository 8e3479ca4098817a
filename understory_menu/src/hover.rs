// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Hover intent ("menu aim") call contract.
//!
//! When the pointer enters a trigger while a menu chain is open, the trigger
//! does not open right away. It hands an open-and-close-siblings callback to a
//! [`HoverIntent`] collaborator, which decides whether and when to run it,
//! typically by watching whether the pointer is heading into the submenu that
//! is already open. Without a collaborator the callback runs immediately.
//!
//! The callback is safe to run late: it is tied to the trigger's current
//! generation and does nothing once the trigger has been destroyed.

use alloc::boxed::Box;
use core::cell::RefCell;
use core::fmt;

/// Deferred hover-open callback.
pub type HoverCallback = Box<dyn FnOnce()>;

/// Decides if and when a hover-triggered open happens.
pub trait HoverIntent {
    /// Take ownership of `callback` and run it now, later, or never.
    fn toggle(&self, callback: HoverCallback);
}

/// Runs every callback immediately.
#[derive(Copy, Clone, Debug, Default)]
pub struct Immediate;

impl HoverIntent for Immediate {
    fn toggle(&self, callback: HoverCallback) {
        callback();
    }
}

/// Holds the most recent callback until the host decides its fate.
///
/// A new toggle replaces (drops) the pending one, the way a pointer sweeping
/// across several siblings should only ever open the last one it settles on.
/// The host calls [`flush`](Self::flush) when its delay expires and
/// [`cancel`](Self::cancel) when the pointer leaves.
#[derive(Default)]
pub struct Deferred {
    pending: RefCell<Option<HoverCallback>>,
}

impl Deferred {
    /// Create an empty collaborator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a callback is waiting.
    pub fn is_pending(&self) -> bool {
        self.pending.borrow().is_some()
    }

    /// Run the pending callback, if any. Returns whether one ran.
    pub fn flush(&self) -> bool {
        // Release the borrow first: the callback may toggle again.
        let pending = self.pending.borrow_mut().take();
        match pending {
            Some(callback) => {
                callback();
                true
            }
            None => false,
        }
    }

    /// Drop the pending callback without running it.
    pub fn cancel(&self) {
        self.pending.borrow_mut().take();
    }
}

impl HoverIntent for Deferred {
    fn toggle(&self, callback: HoverCallback) {
        *self.pending.borrow_mut() = Some(callback);
    }
}

impl fmt::Debug for Deferred {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Deferred")
            .field("pending", &self.is_pending())
            .finish()
    }
}
