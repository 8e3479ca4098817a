// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The menu stack: one linear chain of open menus, root first.
//!
//! A [`MenuStack`] holds [`MenuId`]s innermost-last: the top of the stack is the
//! deepest open submenu. It never branches and a menu appears at most once.
//! It only orders menus and reports removals; the triggers that own the menus
//! react to the [`closed`](MenuStack::closed) stream by detaching their surfaces.
//!
//! ## Removal order
//!
//! Every removing operation computes the full removal set first, truncates the
//! stack, and only then emits one [`MenuClosed`] per removed menu, innermost
//! first. A handler that reacts to its own notification can rely on every
//! descendant having been notified already, and a handler that calls back into
//! the stack always observes the post-removal state.
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use understory_menu::stack::MenuStack;
//! use understory_menu::types::{FocusNext, MenuId};
//!
//! let stack = MenuStack::new();
//! let (file, save, save_as) = (MenuId::next(), MenuId::next(), MenuId::next());
//! stack.push(file);
//! stack.push(save);
//! stack.push(save_as);
//!
//! let order = Rc::new(RefCell::new(Vec::new()));
//! let sink = order.clone();
//! let _sub = stack.closed().subscribe(move |c| sink.borrow_mut().push(c.menu));
//!
//! stack.pop(save, FocusNext::CurrentItem);
//! assert_eq!(*order.borrow(), vec![save_as, save]);
//! assert_eq!(stack.peek(), Some(file));
//! ```
//!
//! ## Hit regions
//!
//! The stack also records where its menus are on screen, so outside-click
//! handling can tell "somewhere else in this menu tree" apart from "outside".
//! Overlay regions are dropped together with their menu; inline regions (menu
//! bars and other always-visible roots) persist until cleared.

use alloc::rc::Rc;
use alloc::vec::Vec;
use core::cell::RefCell;
use core::fmt;

use hashbrown::HashMap;
use kurbo::{Point, Rect};
use smallvec::SmallVec;

use crate::signal::Emitter;
use crate::types::{FocusNext, MenuClosed, MenuId};

type Chain = SmallVec<[MenuId; 4]>;

/// Screen area that belongs to one menu of a stack.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct MenuRegion {
    /// Bounds of the menu's items.
    pub bounds: Rect,
    /// Bounds of the trigger that opened the menu, if any.
    pub anchor: Option<Rect>,
    /// Inline regions are not tied to stack membership.
    pub inline: bool,
}

impl MenuRegion {
    /// Region of an overlay surface opened from `anchor`.
    pub fn overlay(bounds: Rect, anchor: Option<Rect>) -> Self {
        Self {
            bounds,
            anchor,
            inline: false,
        }
    }

    /// Region of an always-visible menu such as a menu bar.
    pub fn inline(bounds: Rect) -> Self {
        Self {
            bounds,
            anchor: None,
            inline: true,
        }
    }

    /// Whether `pt` falls on the menu or its anchor.
    pub fn contains(&self, pt: Point) -> bool {
        self.bounds.contains(pt) || self.anchor.is_some_and(|a| a.contains(pt))
    }
}

/// Shared handle to one chain of open menus.
///
/// Cloning yields another handle to the same stack; use [`ptr_eq`](Self::ptr_eq)
/// to compare identity.
#[derive(Clone)]
pub struct MenuStack {
    inner: Rc<StackInner>,
}

struct StackInner {
    menus: RefCell<Chain>,
    regions: RefCell<HashMap<MenuId, MenuRegion>>,
    closed: Emitter<MenuClosed>,
    emptied: Emitter<FocusNext>,
}

impl MenuStack {
    /// Create an empty stack.
    pub fn new() -> Self {
        Self {
            inner: Rc::new(StackInner {
                menus: RefCell::new(SmallVec::new()),
                regions: RefCell::new(HashMap::new()),
                closed: Emitter::new(),
                emptied: Emitter::new(),
            }),
        }
    }

    /// Whether two handles refer to the same stack.
    pub fn ptr_eq(a: &Self, b: &Self) -> bool {
        Rc::ptr_eq(&a.inner, &b.inner)
    }

    /// Append `menu` as the new innermost open menu.
    ///
    /// Pushing a menu that is already on the stack does nothing.
    pub fn push(&self, menu: MenuId) {
        let mut menus = self.inner.menus.borrow_mut();
        if menus.contains(&menu) {
            return;
        }
        menus.push(menu);
        #[cfg(feature = "tracing")]
        tracing::trace!(menu = menu.get(), depth = menus.len(), "menu stack push");
    }

    /// Remove `menu` and every menu above it.
    ///
    /// Emits one [`MenuClosed`] per removed menu, innermost first, each carrying
    /// `focus_next`. Does nothing if `menu` is not on the stack.
    pub fn pop(&self, menu: MenuId, focus_next: FocusNext) {
        let Some(index) = self.position(menu) else {
            return;
        };
        self.remove_from(index, focus_next);
    }

    /// Remove every menu above `menu`, leaving `menu` open.
    ///
    /// Returns whether anything was removed. Returns `false` when `menu` is not
    /// on the stack.
    pub fn close_sub_menu_of(&self, menu: MenuId) -> bool {
        let Some(index) = self.position(menu) else {
            return false;
        };
        self.remove_from(index + 1, FocusNext::Nothing) > 0
    }

    /// Remove every menu, innermost first.
    pub fn close_all(&self, focus_next: FocusNext) {
        self.remove_from(0, focus_next);
    }

    /// The innermost open menu.
    pub fn peek(&self) -> Option<MenuId> {
        self.inner.menus.borrow().last().copied()
    }

    /// Whether no menu is open.
    pub fn is_empty(&self) -> bool {
        self.inner.menus.borrow().is_empty()
    }

    /// Number of open menus.
    pub fn len(&self) -> usize {
        self.inner.menus.borrow().len()
    }

    /// Whether `menu` is currently on the stack.
    pub fn contains(&self, menu: MenuId) -> bool {
        self.inner.menus.borrow().contains(&menu)
    }

    /// Snapshot of the chain, root first.
    pub fn menus(&self) -> Vec<MenuId> {
        self.inner.menus.borrow().to_vec()
    }

    /// Removal notifications, innermost first per operation.
    pub fn closed(&self) -> &Emitter<MenuClosed> {
        &self.inner.closed
    }

    /// Fires after a [`pop`](Self::pop) or [`close_all`](Self::close_all) leaves
    /// the stack empty, carrying that operation's focus destination.
    pub fn emptied(&self) -> &Emitter<FocusNext> {
        &self.inner.emptied
    }

    /// Record the screen region of `menu`, replacing any previous one.
    pub fn set_region(&self, menu: MenuId, region: MenuRegion) {
        self.inner.regions.borrow_mut().insert(menu, region);
    }

    /// Forget the screen region of `menu`.
    pub fn clear_region(&self, menu: MenuId) {
        self.inner.regions.borrow_mut().remove(&menu);
    }

    /// The recorded region of `menu`.
    pub fn region(&self, menu: MenuId) -> Option<MenuRegion> {
        self.inner.regions.borrow().get(&menu).copied()
    }

    /// Whether `pt` lands on any inline menu or any open menu of this stack.
    pub fn contains_point(&self, pt: Point) -> bool {
        let menus = self.inner.menus.borrow();
        self.inner
            .regions
            .borrow()
            .iter()
            .any(|(id, region)| (region.inline || menus.contains(id)) && region.contains(pt))
    }

    /// Whether `pt` lands on a menu opened above `menu`, i.e. one of its
    /// descendants. `false` when `menu` is not on the stack.
    pub fn contains_point_above(&self, menu: MenuId, pt: Point) -> bool {
        let Some(index) = self.position(menu) else {
            return false;
        };
        let menus = self.inner.menus.borrow();
        let regions = self.inner.regions.borrow();
        menus[index + 1..]
            .iter()
            .any(|m| regions.get(m).is_some_and(|r| r.contains(pt)))
    }

    fn position(&self, menu: MenuId) -> Option<usize> {
        self.inner.menus.borrow().iter().position(|m| *m == menu)
    }

    /// Truncate at `index` and notify, innermost first. Returns the number of
    /// removed menus.
    fn remove_from(&self, index: usize, focus_next: FocusNext) -> usize {
        let (removed, emptied) = {
            let mut menus = self.inner.menus.borrow_mut();
            if index >= menus.len() {
                return 0;
            }
            let removed: Chain = menus.drain(index..).rev().collect();
            (removed, menus.is_empty())
        };
        {
            let mut regions = self.inner.regions.borrow_mut();
            for menu in &removed {
                if regions.get(menu).is_some_and(|r| !r.inline) {
                    regions.remove(menu);
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            removed = removed.len(),
            remaining = index,
            focus_next = ?focus_next,
            "menu stack close"
        );

        for &menu in &removed {
            self.inner.closed.emit(MenuClosed { menu, focus_next });
        }
        // Sub-menu collapses always leave their parent behind.
        if emptied {
            self.inner.emptied.emit(focus_next);
        }
        removed.len()
    }
}

impl Default for MenuStack {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for MenuStack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuStack")
            .field("menus", &self.inner.menus.borrow())
            .field("regions", &self.inner.regions.borrow().len())
            .finish_non_exhaustive()
    }
}
