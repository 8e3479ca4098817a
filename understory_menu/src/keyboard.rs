// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keyboard routing for menu triggers.
//!
//! [`resolve`] is a pure mapping from a key press and the trigger's context to
//! a [`KeyAction`]; [`MenuTrigger::handle_key`](crate::trigger::MenuTrigger::handle_key)
//! carries the action out.
//!
//! | Key | Context | Action |
//! |---|---|---|
//! | Enter, Space | has panel | toggle, focus first item when opened |
//! | forward arrow (→ in LTR, ← in RTL) | vertical parent, has panel | open, focus first item |
//! | back arrow (← in LTR, → in RTL) | vertical parent | close the parent menu, focus returns to its item |
//! | ↓ / ↑ | horizontal or no parent, has panel | open, focus first / last item |
//! | Escape | any | close the innermost menu containing the trigger |
//! | Tab / Shift+Tab | any | close everything, focus next / previous item |
//!
//! Keys pressed with Control, Alt, or Meta are never routed. Shift is only
//! meaningful with Tab.

use crate::types::{Direction, FocusNext, Orientation};

/// Keys the menu protocol understands.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Key {
    /// Enter / Return.
    Enter,
    /// Space bar.
    Space,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Escape.
    Escape,
    /// Tab.
    Tab,
    /// Anything else.
    Other,
}

bitflags::bitflags! {
    /// Modifier keys held during a key press.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT   = 0b0000_0001;
        /// Control.
        const CONTROL = 0b0000_0010;
        /// Alt / Option.
        const ALT     = 0b0000_0100;
        /// Meta / Command / Windows.
        const META    = 0b0000_1000;
    }
}

/// A key press.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct KeyEvent {
    /// The key.
    pub key: Key,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// Unmodified press of `key`.
    pub fn new(key: Key) -> Self {
        Self {
            key,
            modifiers: Modifiers::empty(),
        }
    }

    /// Same key with `modifiers` held.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Which end of a freshly opened panel receives focus.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum FocusEdge {
    /// First item.
    First,
    /// Last item.
    Last,
}

/// What a trigger should do in response to a key.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum KeyAction {
    /// Toggle the trigger's menu; focus its first item if it ends up open.
    Toggle,
    /// Open the trigger's menu and focus one end of it.
    Open(FocusEdge),
    /// Close the menu the trigger lives in, returning focus to that menu's item.
    CloseParent,
    /// Close the innermost menu containing the trigger.
    Escape,
    /// Close the whole chain.
    CloseAll(FocusNext),
}

impl KeyAction {
    /// Whether the host should suppress the key's default behavior.
    ///
    /// Tab still moves focus natively after the chain closes.
    pub fn consumes_event(self) -> bool {
        !matches!(self, Self::CloseAll(_))
    }
}

/// The trigger state [`resolve`] looks at.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub struct KeyContext {
    /// Whether the trigger has a panel to open.
    pub has_panel: bool,
    /// Orientation of the trigger's parent menu, `None` when standalone.
    pub parent: Option<Orientation>,
    /// Writing direction.
    pub direction: Direction,
}

/// Map a key press to a trigger action.
pub fn resolve(event: &KeyEvent, cx: &KeyContext) -> Option<KeyAction> {
    let blocking = Modifiers::CONTROL | Modifiers::ALT | Modifiers::META;
    if event.modifiers.intersects(blocking) {
        return None;
    }
    let shift = event.modifiers.contains(Modifiers::SHIFT);
    if event.key == Key::Tab {
        let focus = if shift {
            FocusNext::PreviousItem
        } else {
            FocusNext::NextItem
        };
        return Some(KeyAction::CloseAll(focus));
    }
    if shift {
        return None;
    }

    let (forward, back) = match cx.direction {
        Direction::Ltr => (Key::ArrowRight, Key::ArrowLeft),
        Direction::Rtl => (Key::ArrowLeft, Key::ArrowRight),
    };
    let vertical_parent = cx.parent == Some(Orientation::Vertical);

    match event.key {
        Key::Enter | Key::Space if cx.has_panel => Some(KeyAction::Toggle),
        Key::Escape => Some(KeyAction::Escape),
        k if k == forward && vertical_parent && cx.has_panel => {
            Some(KeyAction::Open(FocusEdge::First))
        }
        k if k == back && vertical_parent => Some(KeyAction::CloseParent),
        Key::ArrowDown if !vertical_parent && cx.has_panel => {
            Some(KeyAction::Open(FocusEdge::First))
        }
        Key::ArrowUp if !vertical_parent && cx.has_panel => Some(KeyAction::Open(FocusEdge::Last)),
        _ => None,
    }
}
