// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration errors.

use core::fmt;

use crate::types::MenuId;

/// Errors raised while wiring triggers to their panels.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MenuError {
    /// The panel is already bound to a live menu stack by another trigger.
    PanelAlreadyClaimed {
        /// The trigger whose binding was refused.
        trigger: MenuId,
    },
}

impl fmt::Display for MenuError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::PanelAlreadyClaimed { trigger } => write!(
                f,
                "menu panel is already bound to a menu stack (trigger {})",
                trigger.get()
            ),
        }
    }
}

impl core::error::Error for MenuError {}
