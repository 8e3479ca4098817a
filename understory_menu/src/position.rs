// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Candidate placements for a menu surface relative to its trigger.
//!
//! The trigger picks one of two fixed tables based on its parent's orientation
//! and hands it to the surface service, which owns fallback selection.
//! Submenus of a horizontal parent (menu bar items) and standalone triggers
//! drop down below or above the trigger; submenus of a vertical parent open
//! to the side.

use crate::types::Orientation;

/// Horizontal attachment edge. `Start` and `End` follow the writing direction.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum HorizontalEdge {
    /// Leading edge.
    Start,
    /// Trailing edge.
    End,
}

/// Vertical attachment edge.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum VerticalEdge {
    /// Top edge.
    Top,
    /// Bottom edge.
    Bottom,
}

/// Pins one corner of the surface (`overlay_*`) to one corner of the trigger
/// (`origin_*`).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct ConnectedPosition {
    /// Horizontal edge of the trigger.
    pub origin_x: HorizontalEdge,
    /// Vertical edge of the trigger.
    pub origin_y: VerticalEdge,
    /// Horizontal edge of the surface.
    pub overlay_x: HorizontalEdge,
    /// Vertical edge of the surface.
    pub overlay_y: VerticalEdge,
}

impl ConnectedPosition {
    const fn new(
        origin_x: HorizontalEdge,
        origin_y: VerticalEdge,
        overlay_x: HorizontalEdge,
        overlay_y: VerticalEdge,
    ) -> Self {
        Self {
            origin_x,
            origin_y,
            overlay_x,
            overlay_y,
        }
    }
}

use HorizontalEdge::{End, Start};
use VerticalEdge::{Bottom, Top};

/// Below the trigger, then above, start-aligned before end-aligned.
pub const DROPDOWN_BELOW_POSITIONS: [ConnectedPosition; 4] = [
    ConnectedPosition::new(Start, Bottom, Start, Top),
    ConnectedPosition::new(Start, Top, Start, Bottom),
    ConnectedPosition::new(End, Bottom, End, Top),
    ConnectedPosition::new(End, Top, End, Bottom),
];

/// Beside the trigger, trailing side before leading side.
pub const DROPDOWN_ADJACENT_POSITIONS: [ConnectedPosition; 4] = [
    ConnectedPosition::new(End, Top, Start, Top),
    ConnectedPosition::new(End, Bottom, Start, Bottom),
    ConnectedPosition::new(Start, Top, End, Top),
    ConnectedPosition::new(Start, Bottom, End, Bottom),
];

/// Candidate table for a trigger whose parent menu has `parent` orientation
/// (`None` for a standalone trigger).
pub fn positions_for(parent: Option<Orientation>) -> &'static [ConnectedPosition] {
    match parent {
        None | Some(Orientation::Horizontal) => &DROPDOWN_BELOW_POSITIONS,
        Some(Orientation::Vertical) => &DROPDOWN_ADJACENT_POSITIONS,
    }
}
