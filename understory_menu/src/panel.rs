// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu panels: the content a trigger attaches to its surface.
//!
//! A [`MenuPanel`] wraps an application content handle together with the
//! stack it is currently bound to. The binding is what lets a trigger refuse a
//! panel that another live trigger already owns; see
//! [`MenuTrigger::set_panel`](crate::trigger::MenuTrigger::set_panel).

use core::cell::RefCell;
use core::fmt;

use crate::stack::MenuStack;
use crate::types::Orientation;

/// Focus hooks a panel's content exposes to its trigger.
///
/// Both hooks default to doing nothing, for content that manages its own focus.
pub trait MenuContent {
    /// Move keyboard focus to the first enabled item.
    fn focus_first_item(&self) {}

    /// Move keyboard focus to the last enabled item.
    fn focus_last_item(&self) {}
}

/// Content handle plus its stack binding.
pub struct MenuPanel<C> {
    content: C,
    orientation: Orientation,
    stack: RefCell<Option<MenuStack>>,
}

impl<C> MenuPanel<C> {
    /// Wrap `content` as an unbound, vertical panel.
    pub fn new(content: C) -> Self {
        Self {
            content,
            orientation: Orientation::Vertical,
            stack: RefCell::new(None),
        }
    }

    /// Set the axis along which the panel's items are laid out.
    pub fn with_orientation(mut self, orientation: Orientation) -> Self {
        self.orientation = orientation;
        self
    }

    /// The wrapped content.
    pub fn content(&self) -> &C {
        &self.content
    }

    /// Layout axis of the panel's items.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// The stack this panel is bound to, if any.
    pub fn menu_stack(&self) -> Option<MenuStack> {
        self.stack.borrow().clone()
    }

    /// Whether a trigger currently owns this panel.
    pub fn is_claimed(&self) -> bool {
        self.stack.borrow().is_some()
    }

    /// Drop the stack binding so another trigger may bind the panel.
    pub fn release(&self) {
        self.stack.borrow_mut().take();
    }

    pub(crate) fn claim(&self, stack: MenuStack) {
        *self.stack.borrow_mut() = Some(stack);
    }
}

impl<C> fmt::Debug for MenuPanel<C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuPanel")
            .field("orientation", &self.orientation)
            .field("claimed", &self.is_claimed())
            .finish_non_exhaustive()
    }
}
