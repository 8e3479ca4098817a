// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Parent menus: where a trigger lives.
//!
//! A trigger nested in a menu shares that menu's [`MenuStack`], so the whole
//! chain is tracked in one place. The stack is looked up through
//! [`ParentMenu::menu_stack`] every time it is needed rather than captured when
//! the child is built, because the parent may not be wired to its own stack
//! yet at that point.

use alloc::rc::Rc;
use core::fmt;

use kurbo::Rect;

use crate::stack::{MenuRegion, MenuStack};
use crate::types::{FocusNext, MenuId, Orientation};

/// The menu containing a trigger's item.
pub trait ParentMenu {
    /// Identity of the parent menu, as pushed on the stack (if it ever is).
    fn menu_id(&self) -> MenuId;

    /// Layout axis of the parent's items.
    fn orientation(&self) -> Orientation;

    /// The stack tracking the parent's chain, resolved at call time.
    fn menu_stack(&self) -> MenuStack;
}

/// An always-visible root menu, such as a menu bar.
///
/// A menu bar owns the stack shared by everything opened from it but is never
/// pushed onto that stack itself. Its on-screen bounds are registered as an
/// inline region so clicks on the bar do not count as outside clicks.
#[derive(Clone)]
pub struct MenuBar {
    inner: Rc<BarInner>,
}

struct BarInner {
    id: MenuId,
    orientation: Orientation,
    stack: MenuStack,
}

impl MenuBar {
    /// A horizontal menu bar with a fresh stack.
    pub fn new() -> Self {
        Self::with_orientation(Orientation::Horizontal)
    }

    /// An inline root menu laid out along `orientation`.
    pub fn with_orientation(orientation: Orientation) -> Self {
        Self {
            inner: Rc::new(BarInner {
                id: MenuId::next(),
                orientation,
                stack: MenuStack::new(),
            }),
        }
    }

    /// Identity of the bar.
    pub fn id(&self) -> MenuId {
        self.inner.id
    }

    /// The stack owned by this bar.
    pub fn stack(&self) -> &MenuStack {
        &self.inner.stack
    }

    /// Record where the bar is on screen.
    pub fn set_bounds(&self, bounds: Rect) {
        self.inner
            .stack
            .set_region(self.inner.id, MenuRegion::inline(bounds));
    }

    /// Whether any menu opened from this bar is open.
    pub fn has_open_menu(&self) -> bool {
        !self.inner.stack.is_empty()
    }

    /// Close every menu opened from this bar.
    pub fn close_all(&self, focus_next: FocusNext) {
        self.inner.stack.close_all(focus_next);
    }
}

impl Default for MenuBar {
    fn default() -> Self {
        Self::new()
    }
}

impl ParentMenu for MenuBar {
    fn menu_id(&self) -> MenuId {
        self.inner.id
    }

    fn orientation(&self) -> Orientation {
        self.inner.orientation
    }

    fn menu_stack(&self) -> MenuStack {
        self.inner.stack.clone()
    }
}

impl fmt::Debug for MenuBar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuBar")
            .field("id", &self.inner.id)
            .field("orientation", &self.inner.orientation)
            .field("stack", &self.inner.stack)
            .finish()
    }
}
