// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Floating surface collaborator.
//!
//! Triggers render their menus into surfaces obtained from a
//! [`SurfaceService`]. The service owns placement, stacking, and event
//! capture; this crate only decides when a surface exists, when content is
//! attached, and what to do with pointer events that land outside it.
//!
//! A service may also detach content on its own, for example under
//! [`ScrollStrategy::Close`]. It reports that through
//! [`Surface::detachments`] so the owning trigger can take its menu off the
//! stack.

use alloc::vec::Vec;

use kurbo::{Point, Rect};

use crate::position::ConnectedPosition;
use crate::signal::Emitter;
use crate::types::Direction;

/// How a surface reacts to its anchor scrolling.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum ScrollStrategy {
    /// Follow the anchor.
    #[default]
    Reposition,
    /// Block scrolling of the page while the surface is attached.
    Block,
    /// Close the surface when the page scrolls; reported through
    /// [`Surface::detachments`].
    Close,
    /// Ignore scrolling.
    Noop,
}

/// Everything a service needs to create a surface for one trigger.
#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceConfig {
    /// Bounds of the trigger the surface is anchored to.
    pub anchor: Rect,
    /// Candidate placements, most preferred first.
    pub positions: Vec<ConnectedPosition>,
    /// Scroll behavior.
    pub scroll: ScrollStrategy,
    /// Writing direction, used to resolve `Start`/`End` edges.
    pub direction: Direction,
}

/// A pointer press reported by a surface.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Pointer position in the same space as trigger and surface bounds.
    pub position: Point,
    /// Pressed button.
    pub button: u8,
}

impl PointerEvent {
    /// Primary-button press at `position`.
    pub fn primary(position: Point) -> Self {
        Self {
            position,
            button: 0,
        }
    }
}

/// Factory for floating surfaces.
pub trait SurfaceService {
    /// Content handle a surface can display.
    type Content;
    /// Surface type produced by this service.
    type Surface: Surface<Content = Self::Content>;

    /// Create a detached surface.
    fn create(&self, config: SurfaceConfig) -> Self::Surface;
}

/// One floating surface.
pub trait Surface {
    /// Content handle this surface can display.
    type Content;

    /// Show `content`.
    fn attach(&mut self, content: &Self::Content);

    /// Hide the current content. The surface stays reusable.
    fn detach(&mut self);

    /// Release the surface for good.
    fn dispose(&mut self);

    /// Whether content is currently attached.
    fn has_attached_content(&self) -> bool;

    /// Pointer presses that land outside this surface while content is attached.
    fn outside_pointer_events(&self) -> Emitter<PointerEvent>;

    /// Fires whenever content is detached, including detaches the service
    /// performs on its own.
    fn detachments(&self) -> Emitter<()>;

    /// Current on-screen bounds, if laid out.
    fn bounds(&self) -> Option<Rect> {
        None
    }
}
