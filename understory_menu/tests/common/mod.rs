// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Test doubles: an in-memory surface service and a small menu tree.

#![allow(dead_code, reason = "not every test binary uses every helper")]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_menu::panel::{MenuContent, MenuPanel};
use understory_menu::parent::MenuBar;
use understory_menu::position::HorizontalEdge;
use understory_menu::signal::Emitter;
use understory_menu::surface::{PointerEvent, Surface, SurfaceConfig, SurfaceService};
use understory_menu::trigger::MenuTrigger;
use understory_menu::types::MenuId;

pub type Log = Rc<RefCell<Vec<String>>>;

/// Panel content that records focus requests.
pub struct Items {
    pub name: &'static str,
    pub log: Log,
}

impl MenuContent for Items {
    fn focus_first_item(&self) {
        self.log.borrow_mut().push(format!("{}:first", self.name));
    }

    fn focus_last_item(&self) {
        self.log.borrow_mut().push(format!("{}:last", self.name));
    }
}

/// Observable state of one created surface.
pub struct SurfaceState {
    pub config: SurfaceConfig,
    pub attached: RefCell<Option<&'static str>>,
    pub attach_count: Cell<u32>,
    pub disposed: Cell<bool>,
    pub bounds: Rect,
    pub outside: Emitter<PointerEvent>,
    pub detached: Emitter<()>,
}

impl SurfaceState {
    /// The service hides the content on its own, as a scroll-close would.
    pub fn host_detach(&self) {
        if self.attached.borrow_mut().take().is_some() {
            self.detached.emit(());
        }
    }
}

pub struct MockSurface(Rc<SurfaceState>);

impl Surface for MockSurface {
    type Content = Items;

    fn attach(&mut self, content: &Items) {
        *self.0.attached.borrow_mut() = Some(content.name);
        self.0.attach_count.set(self.0.attach_count.get() + 1);
    }

    fn detach(&mut self) {
        self.0.host_detach();
    }

    fn dispose(&mut self) {
        self.detach();
        self.0.disposed.set(true);
    }

    fn has_attached_content(&self) -> bool {
        self.0.attached.borrow().is_some()
    }

    fn outside_pointer_events(&self) -> Emitter<PointerEvent> {
        self.0.outside.clone()
    }

    fn detachments(&self) -> Emitter<()> {
        self.0.detached.clone()
    }

    fn bounds(&self) -> Option<Rect> {
        Some(self.0.bounds)
    }
}

/// Places surfaces below the anchor, or to its right when the first
/// candidate attaches to the anchor's end edge.
#[derive(Default)]
pub struct MockService {
    pub surfaces: RefCell<Vec<Rc<SurfaceState>>>,
}

impl MockService {
    /// Deliver a primary press to every attached surface it lands outside of.
    pub fn press(&self, position: Point) {
        let targets: Vec<_> = self
            .surfaces
            .borrow()
            .iter()
            .filter(|s| s.attached.borrow().is_some() && !s.bounds.contains(position))
            .cloned()
            .collect();
        for surface in targets {
            surface.outside.emit(PointerEvent::primary(position));
        }
    }

    /// Names of the panels currently attached, in surface creation order.
    pub fn attached(&self) -> Vec<&'static str> {
        self.surfaces
            .borrow()
            .iter()
            .filter_map(|s| *s.attached.borrow())
            .collect()
    }

    pub fn created(&self) -> usize {
        self.surfaces.borrow().len()
    }
}

impl SurfaceService for MockService {
    type Content = Items;
    type Surface = MockSurface;

    fn create(&self, config: SurfaceConfig) -> MockSurface {
        let a = config.anchor;
        let beside = config
            .positions
            .first()
            .is_some_and(|p| p.origin_x == HorizontalEdge::End);
        let bounds = if beside {
            Rect::new(a.x1, a.y0, a.x1 + 100.0, a.y0 + 100.0)
        } else {
            Rect::new(a.x0, a.y1, a.x0 + 100.0, a.y1 + 100.0)
        };
        let state = Rc::new(SurfaceState {
            config,
            attached: RefCell::new(None),
            attach_count: Cell::new(0),
            disposed: Cell::new(false),
            bounds,
            outside: Emitter::new(),
            detached: Emitter::new(),
        });
        self.surfaces.borrow_mut().push(state.clone());
        MockSurface(state)
    }
}

pub type Trigger = MenuTrigger<MockService>;

pub fn panel(name: &'static str, log: &Log) -> Rc<MenuPanel<Items>> {
    Rc::new(MenuPanel::new(Items {
        name,
        log: log.clone(),
    }))
}

/// Menu bar `File | Edit`; `File > Save > Save As`, plus a plain `Print`
/// item in the File menu.
pub struct Tree {
    pub service: Rc<MockService>,
    pub bar: MenuBar,
    pub file: Trigger,
    pub edit: Trigger,
    pub save: Trigger,
    pub save_as: Trigger,
    pub print: Trigger,
    pub log: Log,
}

impl Tree {
    pub fn new() -> Self {
        let service = Rc::new(MockService::default());
        let log = Log::default();
        let bar = MenuBar::new();
        bar.set_bounds(Rect::new(0.0, 0.0, 300.0, 20.0));

        let file = Trigger::builder(service.clone()).parent(bar.clone()).build();
        file.set_bounds(Rect::new(0.0, 0.0, 50.0, 20.0));
        file.set_panel(Some(panel("file", &log))).unwrap();

        let edit = Trigger::builder(service.clone()).parent(bar.clone()).build();
        edit.set_bounds(Rect::new(50.0, 0.0, 100.0, 20.0));
        edit.set_panel(Some(panel("edit", &log))).unwrap();

        // File's panel spans (0, 20)..(100, 120).
        let save = Trigger::builder(service.clone()).parent(file.clone()).build();
        save.set_bounds(Rect::new(0.0, 20.0, 100.0, 40.0));
        save.set_panel(Some(panel("save", &log))).unwrap();

        let print = Trigger::builder(service.clone()).parent(file.clone()).build();
        print.set_bounds(Rect::new(0.0, 40.0, 100.0, 60.0));

        // Save's panel spans (100, 20)..(200, 120).
        let save_as = Trigger::builder(service.clone()).parent(save.clone()).build();
        save_as.set_bounds(Rect::new(100.0, 20.0, 200.0, 40.0));
        save_as.set_panel(Some(panel("save_as", &log))).unwrap();

        Self {
            service,
            bar,
            file,
            edit,
            save,
            save_as,
            print,
            log,
        }
    }

    pub fn menus(&self) -> Vec<MenuId> {
        self.bar.stack().menus()
    }

    /// Record every stack removal as `(menu, focus_next)`.
    pub fn record_closed(
        &self,
    ) -> (
        Rc<RefCell<Vec<understory_menu::types::MenuClosed>>>,
        understory_menu::signal::Subscription,
    ) {
        let log = Rc::new(RefCell::new(Vec::new()));
        let sink = log.clone();
        let sub = self
            .bar
            .stack()
            .closed()
            .subscribe(move |c| sink.borrow_mut().push(*c));
        (log, sub)
    }
}
