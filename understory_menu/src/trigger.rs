// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu triggers: items that open a menu.
//!
//! A [`MenuTrigger`] owns at most one floating surface, attaches its panel to
//! it when opening, and is the only thing that pushes its menu onto the shared
//! [`MenuStack`]. It listens to the stack's `closed` stream and detaches its
//! surface when its own menu is removed, whoever removed it. When the surface
//! service detaches the content on its own, the trigger pops its menu so the
//! stack never lists a menu that is not shown.
//!
//! ## States
//!
//! A trigger is `Open` while its surface has content attached and `Closed`
//! otherwise. Redundant requests are silent no-ops: `open` while open, `close`
//! while closed, `toggle` without a panel.
//!
//! ## Sibling collapse
//!
//! Every `close` ends by collapsing whatever the parent menu has open:
//! `close_sub_menu_of(parent)`. When that removes nothing and the parent is
//! not the top of the stack either, the parent can only be an inline root that
//! never gets pushed (a menu bar), and the whole chain is closed instead. This
//! runs even when the user closed the menu on purpose; a bar item tearing down
//! the chain and a click elsewhere in the tree both rely on it. When the close
//! was caused by the stack removing this menu, only the parent's submenus are
//! collapsed: the removal may have taken the parent along.
//! `open` runs the same collapse first, so opening a sibling never leaves two
//! chains on the stack.
//!
//! ## Focus
//!
//! The trigger's [`closed`](MenuTrigger::closed) stream carries the
//! [`FocusNext`] of the stack operation that closed it (`Nothing` for a direct
//! [`close`](MenuTrigger::close)). When a single operation closes several
//! menus each owner is notified innermost first, so a host that applies focus
//! on every notification ends on the outermost closed menu.

use alloc::boxed::Box;
use alloc::rc::{Rc, Weak};
use alloc::vec::Vec;
use core::cell::{Cell, RefCell};
use core::fmt;

use kurbo::Rect;

use crate::aria::TriggerAria;
use crate::error::MenuError;
use crate::hover::{HoverCallback, HoverIntent};
use crate::keyboard::{self, FocusEdge, KeyAction, KeyContext, KeyEvent};
use crate::panel::{MenuContent, MenuPanel};
use crate::parent::ParentMenu;
use crate::position::{ConnectedPosition, positions_for};
use crate::signal::{Emitter, Subscription};
use crate::stack::{MenuRegion, MenuStack};
use crate::surface::{PointerEvent, ScrollStrategy, Surface, SurfaceConfig, SurfaceService};
use crate::types::{Direction, FocusNext, MenuClosed, MenuId, Orientation};

/// Per-trigger surface settings.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriggerConfig {
    /// Writing direction; flips horizontal arrow keys and `Start`/`End` edges.
    pub direction: Direction,
    /// Scroll behavior of the surface.
    pub scroll: ScrollStrategy,
    /// Placement candidates replacing the orientation-based table.
    pub positions: Option<Vec<ConnectedPosition>>,
}

/// Builder for a [`MenuTrigger`].
pub struct MenuTriggerBuilder<S: SurfaceService> {
    service: Rc<S>,
    parent: Option<Rc<dyn ParentMenu>>,
    hover: Option<Rc<dyn HoverIntent>>,
    config: TriggerConfig,
}

impl<S: SurfaceService + 'static> MenuTriggerBuilder<S> {
    /// Nest the trigger inside `parent`; it will share the parent's stack.
    pub fn parent(mut self, parent: impl ParentMenu + 'static) -> Self {
        self.parent = Some(Rc::new(parent));
        self
    }

    /// Arbitrate hover-triggered opens through `hover`.
    pub fn hover_intent(mut self, hover: Rc<dyn HoverIntent>) -> Self {
        self.hover = Some(hover);
        self
    }

    /// Surface settings.
    pub fn config(mut self, config: TriggerConfig) -> Self {
        self.config = config;
        self
    }

    /// Finish the trigger.
    pub fn build(self) -> MenuTrigger<S> {
        MenuTrigger {
            inner: Rc::new(Inner {
                menu: MenuId::next(),
                service: self.service,
                parent: self.parent,
                own_stack: MenuStack::new(),
                hover: self.hover,
                config: self.config,
                state: RefCell::new(State {
                    panel: None,
                    surface: None,
                    bounds: Rect::ZERO,
                    stack_listener: None,
                    outside_listener: None,
                    detach_listener: None,
                }),
                generation: Cell::new(0),
                destroyed: Cell::new(false),
                opened: Emitter::new(),
                closed: Emitter::new(),
            }),
        }
    }
}

impl<S: SurfaceService> fmt::Debug for MenuTriggerBuilder<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MenuTriggerBuilder")
            .field("has_parent", &self.parent.is_some())
            .field("has_hover_intent", &self.hover.is_some())
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// A menu item that opens a menu.
///
/// Cloning yields another handle to the same trigger.
pub struct MenuTrigger<S: SurfaceService> {
    inner: Rc<Inner<S>>,
}

struct Inner<S: SurfaceService> {
    menu: MenuId,
    service: Rc<S>,
    parent: Option<Rc<dyn ParentMenu>>,
    /// Used only when there is no parent.
    own_stack: MenuStack,
    hover: Option<Rc<dyn HoverIntent>>,
    config: TriggerConfig,
    state: RefCell<State<S>>,
    generation: Cell<u64>,
    destroyed: Cell<bool>,
    opened: Emitter<()>,
    closed: Emitter<FocusNext>,
}

struct State<S: SurfaceService> {
    panel: Option<Rc<MenuPanel<S::Content>>>,
    surface: Option<S::Surface>,
    bounds: Rect,
    stack_listener: Option<(MenuStack, Subscription)>,
    outside_listener: Option<Subscription>,
    detach_listener: Option<Subscription>,
}

impl<S: SurfaceService> Inner<S> {
    fn resolve_stack(&self) -> MenuStack {
        match &self.parent {
            Some(parent) => parent.menu_stack(),
            None => self.own_stack.clone(),
        }
    }
}

impl<S: SurfaceService> Drop for Inner<S> {
    fn drop(&mut self) {
        let state = self.state.get_mut();
        state.detach_listener = None;
        state.outside_listener = None;
        state.stack_listener = None;
        if let Some(mut surface) = state.surface.take() {
            surface.dispose();
        }
        if let Some(panel) = state.panel.take() {
            panel.release();
        }
        let stack = self.resolve_stack();
        if stack.contains(self.menu) {
            stack.pop(self.menu, FocusNext::Nothing);
        }
    }
}

impl<S: SurfaceService + 'static> MenuTrigger<S>
where
    S::Content: MenuContent,
{
    /// Start building a trigger that creates its surfaces from `service`.
    pub fn builder(service: Rc<S>) -> MenuTriggerBuilder<S> {
        MenuTriggerBuilder {
            service,
            parent: None,
            hover: None,
            config: TriggerConfig::default(),
        }
    }

    /// A standalone trigger with its own stack and default settings.
    pub fn new(service: Rc<S>) -> Self {
        Self::builder(service).build()
    }

    /// Identity of the menu this trigger opens.
    pub fn menu_id(&self) -> MenuId {
        self.inner.menu
    }

    /// The stack tracking this trigger's chain: the parent's when nested,
    /// otherwise the trigger's own.
    pub fn menu_stack(&self) -> MenuStack {
        self.inner.resolve_stack()
    }

    /// The bound panel.
    pub fn panel(&self) -> Option<Rc<MenuPanel<S::Content>>> {
        self.inner.state.borrow().panel.clone()
    }

    /// Bind `panel` (or unbind with `None`).
    ///
    /// In debug builds, binding a panel that another trigger still claims fails
    /// with [`MenuError::PanelAlreadyClaimed`] and leaves everything untouched.
    /// Rebinding the panel this trigger already holds is accepted. An open menu
    /// is closed before its panel is replaced.
    pub fn set_panel(&self, panel: Option<Rc<MenuPanel<S::Content>>>) -> Result<(), MenuError> {
        let current = self.panel();
        let same = match (&current, &panel) {
            (Some(a), Some(b)) => Rc::ptr_eq(a, b),
            (None, None) => true,
            _ => false,
        };
        if same {
            return Ok(());
        }
        if cfg!(debug_assertions) && panel.as_ref().is_some_and(|p| p.is_claimed()) {
            #[cfg(feature = "tracing")]
            tracing::warn!(trigger = self.inner.menu.get(), "menu panel already claimed");
            return Err(MenuError::PanelAlreadyClaimed {
                trigger: self.inner.menu,
            });
        }

        if self.is_menu_open() {
            self.close();
        }
        if let Some(previous) = current {
            previous.release();
        }
        if let Some(panel) = &panel {
            panel.claim(self.menu_stack());
        }
        self.inner.state.borrow_mut().panel = panel;
        Ok(())
    }

    /// Record the trigger's on-screen bounds; used as the surface anchor and
    /// for outside-click scoping.
    pub fn set_bounds(&self, bounds: Rect) {
        self.inner.state.borrow_mut().bounds = bounds;
        if self.is_menu_open() {
            self.register_region();
        }
    }

    /// Whether a panel is bound.
    pub fn has_menu(&self) -> bool {
        self.inner.state.borrow().panel.is_some()
    }

    /// Whether the menu is shown: a surface exists and has content attached.
    pub fn is_menu_open(&self) -> bool {
        self.inner
            .state
            .borrow()
            .surface
            .as_ref()
            .is_some_and(|s| s.has_attached_content())
    }

    /// The open menu, if any.
    pub fn get_menu(&self) -> Option<MenuId> {
        self.is_menu_open().then_some(self.inner.menu)
    }

    /// Fires once per transition to `Open`.
    pub fn opened(&self) -> &Emitter<()> {
        &self.inner.opened
    }

    /// Fires once per transition to `Closed`, carrying the focus destination.
    pub fn closed(&self) -> &Emitter<FocusNext> {
        &self.inner.closed
    }

    /// Current accessibility attributes.
    pub fn aria(&self) -> TriggerAria {
        TriggerAria::derive(self.has_menu(), self.get_menu())
    }

    /// Whether [`destroy`](Self::destroy) has run.
    pub fn is_destroyed(&self) -> bool {
        self.inner.destroyed.get()
    }

    /// Open if closed, close if open. Does nothing without a panel.
    pub fn toggle(&self) {
        if !self.has_menu() {
            return;
        }
        if self.is_menu_open() {
            self.close();
        } else {
            self.open();
        }
    }

    /// Show the menu and push it onto the stack.
    ///
    /// The surface is created on first use and reused afterwards.
    pub fn open(&self) {
        if self.inner.destroyed.get() || self.is_menu_open() {
            return;
        }
        let Some(panel) = self.panel() else {
            return;
        };

        self.close_sibling_triggers(false);

        let stack = self.menu_stack();
        let (outside, detachments) = {
            let mut state = self.inner.state.borrow_mut();
            let anchor = state.bounds;
            let surface = state
                .surface
                .get_or_insert_with(|| self.inner.service.create(self.surface_config(anchor)));
            surface.attach(panel.content());
            (surface.outside_pointer_events(), surface.detachments())
        };
        stack.push(self.inner.menu);
        self.register_region();
        self.listen_to_stack(&stack);
        self.listen_surface(&outside, &detachments);

        #[cfg(feature = "tracing")]
        tracing::debug!(menu = self.inner.menu.get(), depth = stack.len(), "menu opened");
        self.inner.opened.emit(());
    }

    /// Hide the menu, then collapse the parent's open submenus.
    ///
    /// The surface instance is kept for the next `open`.
    pub fn close(&self) {
        self.close_with(FocusNext::Nothing, false);
    }

    /// Pointer entered the trigger.
    ///
    /// While some menu of the chain is open, this opens the trigger's menu
    /// (after collapsing its siblings) or, for a trigger without a panel, just
    /// collapses the parent's open submenu. The hover-intent collaborator, when
    /// present, decides if and when that happens.
    pub fn handle_pointer_enter(&self) {
        if self.inner.destroyed.get() || self.is_menu_open() || self.menu_stack().is_empty() {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let generation = self.inner.generation.get();
        let callback: HoverCallback = Box::new(move || {
            let Some(trigger) = Self::revive(&weak, generation) else {
                return;
            };
            if trigger.has_menu() {
                trigger.close_sibling_triggers(false);
                trigger.open();
            } else if let Some(parent) = &trigger.inner.parent {
                trigger.menu_stack().close_sub_menu_of(parent.menu_id());
            }
        });
        match &self.inner.hover {
            Some(hover) => hover.toggle(callback),
            None => callback(),
        }
    }

    /// Route a key press. Returns whether the host should suppress the key's
    /// default behavior.
    pub fn handle_key(&self, event: &KeyEvent) -> bool {
        if self.inner.destroyed.get() {
            return false;
        }
        let cx = KeyContext {
            has_panel: self.has_menu(),
            parent: self.inner.parent.as_ref().map(|p| p.orientation()),
            direction: self.inner.config.direction,
        };
        let Some(action) = keyboard::resolve(event, &cx) else {
            return false;
        };
        let stack = self.menu_stack();
        match action {
            KeyAction::Toggle => {
                self.toggle();
                self.focus_panel(FocusEdge::First);
            }
            KeyAction::Open(edge) => {
                self.open();
                self.focus_panel(edge);
            }
            KeyAction::CloseParent => {
                if let Some(parent) = &self.inner.parent {
                    stack.pop(parent.menu_id(), FocusNext::CurrentItem);
                }
            }
            KeyAction::Escape => {
                if stack.is_empty() {
                    return false;
                }
                match &self.inner.parent {
                    Some(parent) if stack.contains(parent.menu_id()) => {
                        stack.pop(parent.menu_id(), FocusNext::CurrentItem);
                    }
                    _ => stack.close_all(FocusNext::CurrentItem),
                }
            }
            KeyAction::CloseAll(focus_next) => stack.close_all(focus_next),
        }
        action.consumes_event()
    }

    /// Tear the trigger down: close its menu, dispose the surface, release the
    /// panel, and complete both notification streams. Pending hover callbacks
    /// become no-ops.
    pub fn destroy(&self) {
        if self.inner.destroyed.get() {
            return;
        }
        if self.is_menu_open() {
            self.close();
        }
        let stack = self.menu_stack();
        if stack.contains(self.inner.menu) {
            stack.pop(self.inner.menu, FocusNext::Nothing);
        }

        self.inner.destroyed.set(true);
        self.inner
            .generation
            .set(self.inner.generation.get().wrapping_add(1));
        let (surface, panel, listeners) = {
            let mut state = self.inner.state.borrow_mut();
            (
                state.surface.take(),
                state.panel.take(),
                (
                    state.stack_listener.take(),
                    state.outside_listener.take(),
                    state.detach_listener.take(),
                ),
            )
        };
        drop(listeners);
        if let Some(mut surface) = surface {
            surface.dispose();
        }
        if let Some(panel) = panel {
            panel.release();
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(menu = self.inner.menu.get(), "menu trigger destroyed");
        self.inner.opened.complete();
        self.inner.closed.complete();
    }

    fn revive(weak: &Weak<Inner<S>>, generation: u64) -> Option<Self> {
        let inner = weak.upgrade()?;
        (inner.generation.get() == generation && !inner.destroyed.get()).then_some(Self { inner })
    }

    /// `removed` is set when the stack already dropped this menu (and, with
    /// it, possibly the parent).
    fn close_with(&self, focus_next: FocusNext, removed: bool) {
        if self.is_menu_open() {
            self.tear_down(focus_next);
        }
        self.close_sibling_triggers(removed);
    }

    /// Close descendants, stop listening to the surface, detach it if still
    /// attached, and notify.
    fn tear_down(&self, focus_next: FocusNext) {
        self.menu_stack().close_sub_menu_of(self.inner.menu);
        {
            let mut state = self.inner.state.borrow_mut();
            state.outside_listener = None;
            // Our own detach must not come back as a service-side one.
            state.detach_listener = None;
            if let Some(surface) = state
                .surface
                .as_mut()
                .filter(|s| s.has_attached_content())
            {
                surface.detach();
            }
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(menu = self.inner.menu.get(), focus_next = ?focus_next, "menu closed");
        self.inner.closed.emit(focus_next);
    }

    /// The service detached the content without being asked.
    fn handle_detached(&self) {
        let stack = self.menu_stack();
        if self.is_menu_open() || !stack.contains(self.inner.menu) {
            return;
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(menu = self.inner.menu.get(), "menu surface detached by service");
        self.tear_down(FocusNext::Nothing);
        stack.pop(self.inner.menu, FocusNext::Nothing);
    }

    /// Collapse the parent's open submenus.
    ///
    /// When nothing was removed and the parent is not the top of the stack, the
    /// parent is taken to be an inline root and the whole chain closes. The
    /// inference is skipped when reacting to a removal, since the same
    /// truncation may have taken the parent.
    fn close_sibling_triggers(&self, reacting_to_removal: bool) {
        let stack = self.menu_stack();
        match &self.inner.parent {
            Some(parent) => {
                let parent_id = parent.menu_id();
                let removed = stack.close_sub_menu_of(parent_id);
                if !removed && !reacting_to_removal && stack.peek() != Some(parent_id) {
                    stack.close_all(FocusNext::Nothing);
                }
            }
            None => stack.close_all(FocusNext::Nothing),
        }
    }

    fn focus_panel(&self, edge: FocusEdge) {
        if !self.is_menu_open() {
            return;
        }
        if let Some(panel) = self.panel() {
            match edge {
                FocusEdge::First => panel.content().focus_first_item(),
                FocusEdge::Last => panel.content().focus_last_item(),
            }
        }
    }

    fn handle_outside_pointer(&self, event: &PointerEvent) {
        if !self.is_menu_open() {
            return;
        }
        let anchor = self.inner.state.borrow().bounds;
        if anchor.contains(event.position) {
            return;
        }
        let stack = self.menu_stack();
        // The innermost surface under the press owns it.
        if stack.contains_point_above(self.inner.menu, event.position) {
            return;
        }
        if stack.contains_point(event.position) {
            self.close_sibling_triggers(false);
        } else {
            stack.close_all(FocusNext::Nothing);
        }
    }

    fn surface_config(&self, anchor: Rect) -> SurfaceConfig {
        let positions = match &self.inner.config.positions {
            Some(positions) => positions.clone(),
            None => positions_for(self.inner.parent.as_ref().map(|p| p.orientation())).to_vec(),
        };
        SurfaceConfig {
            anchor,
            positions,
            scroll: self.inner.config.scroll,
            direction: self.inner.config.direction,
        }
    }

    fn register_region(&self) {
        let region = {
            let state = self.inner.state.borrow();
            let bounds = state
                .surface
                .as_ref()
                .and_then(|s| s.bounds())
                .unwrap_or(Rect::ZERO);
            MenuRegion::overlay(bounds, Some(state.bounds))
        };
        self.menu_stack().set_region(self.inner.menu, region);
    }

    fn listen_to_stack(&self, stack: &MenuStack) {
        let mut state = self.inner.state.borrow_mut();
        if state
            .stack_listener
            .as_ref()
            .is_some_and(|(s, _)| MenuStack::ptr_eq(s, stack))
        {
            return;
        }
        let weak = Rc::downgrade(&self.inner);
        let generation = self.inner.generation.get();
        let menu = self.inner.menu;
        let subscription = stack.closed().subscribe(move |closed: &MenuClosed| {
            if closed.menu != menu {
                return;
            }
            if let Some(trigger) = Self::revive(&weak, generation) {
                trigger.close_with(closed.focus_next, true);
            }
        });
        state.stack_listener = Some((stack.clone(), subscription));
    }

    fn listen_surface(&self, outside: &Emitter<PointerEvent>, detachments: &Emitter<()>) {
        let generation = self.inner.generation.get();
        let weak = Rc::downgrade(&self.inner);
        let on_outside = outside.subscribe(move |event| {
            if let Some(trigger) = Self::revive(&weak, generation) {
                trigger.handle_outside_pointer(event);
            }
        });
        let weak = Rc::downgrade(&self.inner);
        let on_detach = detachments.subscribe(move |_: &()| {
            if let Some(trigger) = Self::revive(&weak, generation) {
                trigger.handle_detached();
            }
        });
        let mut state = self.inner.state.borrow_mut();
        state.outside_listener = Some(on_outside);
        state.detach_listener = Some(on_detach);
    }
}

impl<S: SurfaceService + 'static> ParentMenu for MenuTrigger<S>
where
    S::Content: MenuContent,
{
    fn menu_id(&self) -> MenuId {
        self.inner.menu
    }

    fn orientation(&self) -> Orientation {
        self.panel()
            .map_or(Orientation::Vertical, |panel| panel.orientation())
    }

    fn menu_stack(&self) -> MenuStack {
        self.inner.resolve_stack()
    }
}

impl<S: SurfaceService> Clone for MenuTrigger<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Rc::clone(&self.inner),
        }
    }
}

impl<S: SurfaceService> fmt::Debug for MenuTrigger<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.inner.state.borrow();
        f.debug_struct("MenuTrigger")
            .field("menu", &self.inner.menu)
            .field("has_parent", &self.inner.parent.is_some())
            .field("has_panel", &state.panel.is_some())
            .field(
                "open",
                &state.surface.as_ref().is_some_and(|s| s.has_attached_content()),
            )
            .field("destroyed", &self.inner.destroyed.get())
            .finish_non_exhaustive()
    }
}
