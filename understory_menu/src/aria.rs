// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Accessibility attributes of a trigger, derived from its state.
//!
//! Recompute with [`MenuTrigger::aria`](crate::trigger::MenuTrigger::aria)
//! after every `opened`/`closed` notification; nothing here is stored.

use crate::types::MenuId;

bitflags::bitflags! {
    /// Boolean ARIA state of a trigger.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct AriaFlags: u8 {
        /// `aria-haspopup="menu"`.
        const HAS_POPUP = 0b0000_0001;
        /// `aria-expanded="true"`. Only meaningful together with `HAS_POPUP`.
        const EXPANDED  = 0b0000_0010;
    }
}

/// Attribute set for one trigger.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct TriggerAria {
    /// Boolean state.
    pub flags: AriaFlags,
    /// `aria-controls`: the open menu, if any.
    pub controls: Option<MenuId>,
}

impl TriggerAria {
    /// Attributes of a trigger that has a panel iff `has_panel`, with `open`
    /// holding its menu while that menu is shown.
    pub fn derive(has_panel: bool, open: Option<MenuId>) -> Self {
        if !has_panel {
            return Self::default();
        }
        let mut flags = AriaFlags::HAS_POPUP;
        flags.set(AriaFlags::EXPANDED, open.is_some());
        Self {
            flags,
            controls: open,
        }
    }

    /// Value of `aria-haspopup`, `None` when the attribute is absent.
    pub fn has_popup(&self) -> Option<&'static str> {
        self.flags.contains(AriaFlags::HAS_POPUP).then_some("menu")
    }

    /// Value of `aria-expanded`, `None` when the attribute is absent.
    pub fn expanded(&self) -> Option<bool> {
        self.flags
            .contains(AriaFlags::HAS_POPUP)
            .then(|| self.flags.contains(AriaFlags::EXPANDED))
    }
}
