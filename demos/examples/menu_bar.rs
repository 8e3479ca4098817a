// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A menu bar walkthrough: `File | Edit`, with `File > Save > Save As`.
//!
//! This example shows how to:
//! - implement a `SurfaceService` that places and shows panels,
//! - wire triggers into a `MenuBar` chain,
//! - drive it with clicks, hovers, and keys while watching the stack.
//!
//! Run:
//! - `cargo run -p understory_menu_demos --example menu_bar`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::{Point, Rect};
use understory_menu::hover::Deferred;
use understory_menu::keyboard::{Key, KeyEvent};
use understory_menu::panel::{MenuContent, MenuPanel};
use understory_menu::parent::MenuBar;
use understory_menu::position::HorizontalEdge;
use understory_menu::signal::Emitter;
use understory_menu::surface::{PointerEvent, Surface, SurfaceConfig, SurfaceService};
use understory_menu::trigger::{MenuTrigger, MenuTriggerBuilder};
use understory_menu::types::MenuId;

/// Panel content: just a label.
struct Items(&'static str);

impl MenuContent for Items {
    fn focus_first_item(&self) {
        println!("    focus -> first item of {}", self.0);
    }

    fn focus_last_item(&self) {
        println!("    focus -> last item of {}", self.0);
    }
}

/// A "window" on a pretend screen.
struct Popup {
    bounds: Rect,
    shown: Option<&'static str>,
    outside: Emitter<PointerEvent>,
    detached: Emitter<()>,
}

struct PopupHandle(Rc<RefCell<Popup>>);

impl Surface for PopupHandle {
    type Content = Items;

    fn attach(&mut self, content: &Items) {
        println!("    show {} at {:?}", content.0, self.0.borrow().bounds);
        self.0.borrow_mut().shown = Some(content.0);
    }

    fn detach(&mut self) {
        let hidden = self.0.borrow_mut().shown.take();
        if let Some(name) = hidden {
            println!("    hide {name}");
            let detached = self.0.borrow().detached.clone();
            detached.emit(());
        }
    }

    fn dispose(&mut self) {
        self.detach();
    }

    fn has_attached_content(&self) -> bool {
        self.0.borrow().shown.is_some()
    }

    fn outside_pointer_events(&self) -> Emitter<PointerEvent> {
        self.0.borrow().outside.clone()
    }

    fn detachments(&self) -> Emitter<()> {
        self.0.borrow().detached.clone()
    }

    fn bounds(&self) -> Option<Rect> {
        Some(self.0.borrow().bounds)
    }
}

/// Places popups below or beside their anchor and routes presses to them.
#[derive(Default)]
struct Screen {
    popups: RefCell<Vec<Rc<RefCell<Popup>>>>,
}

impl Screen {
    fn press(&self, position: Point) {
        println!("press at ({}, {})", position.x, position.y);
        let outside: Vec<_> = self
            .popups
            .borrow()
            .iter()
            .filter(|p| {
                let p = p.borrow();
                p.shown.is_some() && !p.bounds.contains(position)
            })
            .map(|p| p.borrow().outside.clone())
            .collect();
        for events in outside {
            events.emit(PointerEvent::primary(position));
        }
    }
}

impl SurfaceService for Screen {
    type Content = Items;
    type Surface = PopupHandle;

    fn create(&self, config: SurfaceConfig) -> PopupHandle {
        let a = config.anchor;
        let beside = config
            .positions
            .first()
            .is_some_and(|p| p.origin_x == HorizontalEdge::End);
        let bounds = if beside {
            Rect::new(a.x1, a.y0, a.x1 + 120.0, a.y0 + 90.0)
        } else {
            Rect::new(a.x0, a.y1, a.x0 + 120.0, a.y1 + 90.0)
        };
        let popup = Rc::new(RefCell::new(Popup {
            bounds,
            shown: None,
            outside: Emitter::new(),
            detached: Emitter::new(),
        }));
        self.popups.borrow_mut().push(popup.clone());
        PopupHandle(popup)
    }
}

fn item(
    builder: MenuTriggerBuilder<Screen>,
    aim: &Rc<Deferred>,
    name: &'static str,
    bounds: Rect,
) -> MenuTrigger<Screen> {
    let trigger = builder.hover_intent(aim.clone()).build();
    trigger.set_bounds(bounds);
    if let Err(err) = trigger.set_panel(Some(Rc::new(MenuPanel::new(Items(name))))) {
        println!("cannot bind {name}: {err}");
    }
    trigger
}

fn main() {
    let screen = Rc::new(Screen::default());
    let aim = Rc::new(Deferred::new());
    let bar = MenuBar::new();
    bar.set_bounds(Rect::new(0.0, 0.0, 400.0, 24.0));

    let file = item(
        MenuTrigger::builder(screen.clone()).parent(bar.clone()),
        &aim,
        "File",
        Rect::new(0.0, 0.0, 50.0, 24.0),
    );
    let edit = item(
        MenuTrigger::builder(screen.clone()).parent(bar.clone()),
        &aim,
        "Edit",
        Rect::new(50.0, 0.0, 100.0, 24.0),
    );
    let save = item(
        MenuTrigger::builder(screen.clone()).parent(file.clone()),
        &aim,
        "Save",
        Rect::new(0.0, 24.0, 120.0, 44.0),
    );
    let save_as = item(
        MenuTrigger::builder(screen.clone()).parent(save.clone()),
        &aim,
        "Save As",
        Rect::new(120.0, 24.0, 240.0, 44.0),
    );

    let names = [
        (file.menu_id(), "File"),
        (edit.menu_id(), "Edit"),
        (save.menu_id(), "Save"),
        (save_as.menu_id(), "Save As"),
    ];
    let label = move |id: MenuId| {
        names
            .iter()
            .find(|(m, _)| *m == id)
            .map_or("?", |&(_, n)| n)
    };
    let _log = bar.stack().closed().subscribe(move |c| {
        println!("    closed {} (focus {:?})", label(c.menu), c.focus_next);
    });
    let show = |step: &str| {
        let chain: Vec<_> = bar.stack().menus().into_iter().map(label).collect();
        println!("{step}: stack = {chain:?}\n");
    };

    println!("click File");
    file.toggle();
    show("after click");

    println!("hover Save, then let the hover delay expire");
    save.handle_pointer_enter();
    aim.flush();
    show("after hover");

    println!("hover Save As");
    save_as.handle_pointer_enter();
    aim.flush();
    show("after hover");

    screen.press(Point::new(60.0, 12.0));
    show("after pressing on the bar");

    println!("click Edit");
    edit.toggle();
    show("after click");

    println!("press Escape on Edit");
    edit.handle_key(&KeyEvent::new(Key::Escape));
    show("after escape");

    println!("press ArrowDown on File");
    file.handle_key(&KeyEvent::new(Key::ArrowDown));
    println!("    aria-expanded = {:?}", file.aria().expanded());
    screen.press(Point::new(390.0, 300.0));
    show("after pressing elsewhere");

    save_as.destroy();
    save.destroy();
    edit.destroy();
    file.destroy();
}
