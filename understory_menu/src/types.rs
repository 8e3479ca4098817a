// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types shared by the stack and the triggers: menu identity, focus
//! destinations, and layout direction.

use core::sync::atomic::{AtomicU64, Ordering};

static NEXT_MENU_ID: AtomicU64 = AtomicU64::new(1);

/// Opaque identity of one menu.
///
/// Ids are compared by identity only; two menus with identical content still
/// have different ids. Every [`MenuTrigger`](crate::trigger::MenuTrigger) and
/// [`MenuBar`](crate::parent::MenuBar) allocates its id once at construction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct MenuId(u64);

impl MenuId {
    /// Allocate a new process-unique id.
    pub fn next() -> Self {
        Self(NEXT_MENU_ID.fetch_add(1, Ordering::Relaxed))
    }

    /// Raw id value, for logging and debugging.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0
    }
}

/// Where keyboard focus should land once a menu surface has been detached.
///
/// The tag travels with every close notification produced by a single stack
/// operation.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum FocusNext {
    /// Leave focus alone.
    #[default]
    Nothing,
    /// Focus the item whose menu was closed (its trigger).
    CurrentItem,
    /// Focus the sibling before the item in its parent menu.
    PreviousItem,
    /// Focus the sibling after the item in its parent menu.
    NextItem,
}

/// One removal from a [`MenuStack`](crate::stack::MenuStack).
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct MenuClosed {
    /// The menu that was removed.
    pub menu: MenuId,
    /// Focus destination requested by the operation that removed it.
    pub focus_next: FocusNext,
}

/// Axis along which a menu lays out its items.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// Items in a row, as in a menu bar.
    Horizontal,
    /// Items in a column, as in a dropdown or context menu.
    #[default]
    Vertical,
}

/// Writing direction of the surrounding content.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum Direction {
    /// Left to right.
    #[default]
    Ltr,
    /// Right to left.
    Rtl,
}
