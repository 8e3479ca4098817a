// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_menu --heading-base-level=0

//! Understory Menu: a headless menu stack and menu trigger state machine.
//!
//! ## Overview
//!
//! This crate keeps track of which menus are open in a nested menu tree and decides what opens or closes when.
//! It does not render anything and does not position anything.
//! Surfaces are created through a host-provided [`SurfaceService`](crate::surface::SurfaceService); content is any handle the host's surfaces can display.
//!
//! ## Pieces
//!
//! - [`MenuStack`](crate::stack::MenuStack): the linear chain of open menus, root first. Removals are reported innermost first on its `closed` stream.
//! - [`MenuTrigger`](crate::trigger::MenuTrigger): an item that opens a menu. It owns one surface, pushes its menu when opening, and detaches when the stack reports its menu closed.
//! - [`MenuBar`](crate::parent::MenuBar): an always-visible root that owns the stack its triggers share but is never pushed onto it.
//! - [`MenuPanel`](crate::panel::MenuPanel): the content a trigger attaches, plus the binding that keeps two triggers from sharing it.
//! - [`HoverIntent`](crate::hover::HoverIntent): the collaborator that decides whether a hover should open a submenu.
//!
//! ## Ordering guarantees
//!
//! - A menu is on the stack exactly while its trigger is open, including when the surface service detaches it on its own.
//! - Closing a menu closes its descendants first.
//! - Opening a menu collapses whatever its siblings had open, so there is never more than one chain.
//! - Notifications raised while another notification is being delivered are queued and delivered afterwards, in order.
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use understory_menu::parent::MenuBar;
//! use understory_menu::panel::{MenuContent, MenuPanel};
//! use understory_menu::signal::Emitter;
//! use understory_menu::surface::{PointerEvent, Surface, SurfaceConfig, SurfaceService};
//! use understory_menu::trigger::MenuTrigger;
//!
//! struct Items(&'static str);
//! impl MenuContent for Items {}
//!
//! # #[derive(Default)]
//! # struct Overlay { attached: bool, outside: Emitter<PointerEvent>, detached: Emitter<()> }
//! # impl Surface for Overlay {
//! #     type Content = Items;
//! #     fn attach(&mut self, _: &Items) { self.attached = true; }
//! #     fn detach(&mut self) { self.attached = false; }
//! #     fn dispose(&mut self) { self.attached = false; }
//! #     fn has_attached_content(&self) -> bool { self.attached }
//! #     fn outside_pointer_events(&self) -> Emitter<PointerEvent> { self.outside.clone() }
//! #     fn detachments(&self) -> Emitter<()> { self.detached.clone() }
//! # }
//! # struct Overlays;
//! # impl SurfaceService for Overlays {
//! #     type Content = Items;
//! #     type Surface = Overlay;
//! #     fn create(&self, _: SurfaceConfig) -> Overlay { Overlay::default() }
//! # }
//! let service = Rc::new(Overlays);
//! let bar = MenuBar::new();
//!
//! let file = MenuTrigger::builder(service.clone()).parent(bar.clone()).build();
//! file.set_panel(Some(Rc::new(MenuPanel::new(Items("file"))))).unwrap();
//! let save = MenuTrigger::builder(service.clone()).parent(file.clone()).build();
//! save.set_panel(Some(Rc::new(MenuPanel::new(Items("save"))))).unwrap();
//!
//! file.toggle();
//! save.open();
//! assert_eq!(bar.stack().menus(), vec![file.menu_id(), save.menu_id()]);
//!
//! // Closing the root closes the whole chain, innermost first.
//! file.close();
//! assert!(bar.stack().is_empty());
//! assert!(!save.is_menu_open());
//! ```
//!
//! ## Features
//!
//! - `std` (default): enables `std` for dependencies.
//! - `libm`: `no_std` math support for `kurbo`.
//! - `tracing`: structured `debug`/`trace` events for stack and trigger transitions.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod aria;
pub mod error;
pub mod hover;
pub mod keyboard;
pub mod panel;
pub mod parent;
pub mod position;
pub mod signal;
pub mod stack;
pub mod surface;
pub mod trigger;
pub mod types;
