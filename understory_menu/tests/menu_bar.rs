// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Menu bar chains: hover, sibling collapse, and outside clicks.

mod common;

use std::cell::RefCell;
use std::rc::Rc;

use common::Tree;
use kurbo::Point;
use understory_menu::types::{FocusNext, MenuClosed};

fn open_full_chain(tree: &Tree) {
    tree.file.toggle();
    tree.save.handle_pointer_enter();
    tree.save_as.handle_pointer_enter();
}

#[test]
fn hover_builds_the_chain_and_outside_click_closes_innermost_first() {
    let tree = Tree::new();
    tree.file.toggle();
    assert_eq!(tree.menus(), vec![tree.file.menu_id()]);
    tree.save.handle_pointer_enter();
    assert_eq!(tree.menus(), vec![tree.file.menu_id(), tree.save.menu_id()]);
    tree.save_as.handle_pointer_enter();
    assert_eq!(
        tree.menus(),
        vec![
            tree.file.menu_id(),
            tree.save.menu_id(),
            tree.save_as.menu_id()
        ]
    );
    assert_eq!(tree.service.attached(), vec!["file", "save", "save_as"]);

    let (closed, _sub) = tree.record_closed();
    tree.service.press(Point::new(500.0, 500.0));

    assert!(tree.menus().is_empty());
    let order: Vec<_> = closed.borrow().iter().map(|c| c.menu).collect();
    assert_eq!(
        order,
        vec![
            tree.save_as.menu_id(),
            tree.save.menu_id(),
            tree.file.menu_id()
        ]
    );
    assert!(tree.service.attached().is_empty());
}

#[test]
fn hover_does_nothing_while_no_menu_is_open() {
    let tree = Tree::new();
    tree.edit.handle_pointer_enter();
    assert!(tree.menus().is_empty());
    assert!(!tree.edit.is_menu_open());
}

#[test]
fn clicking_a_sibling_bar_item_replaces_the_chain() {
    let tree = Tree::new();
    tree.file.toggle();
    tree.save.handle_pointer_enter();

    let snapshots = Rc::new(RefCell::new(Vec::new()));
    let sink = snapshots.clone();
    let stack = tree.bar.stack().clone();
    let _on_closed = stack.closed().subscribe({
        let stack = stack.clone();
        let sink = sink.clone();
        move |_: &MenuClosed| sink.borrow_mut().push(stack.menus())
    });
    let _on_opened = tree.edit.opened().subscribe({
        let stack = stack.clone();
        move |_| sink.borrow_mut().push(stack.menus())
    });

    // The press lands on the bar, then the click activates Edit.
    tree.service.press(Point::new(60.0, 10.0));
    tree.edit.toggle();

    let edit = tree.edit.menu_id();
    for menus in snapshots.borrow().iter() {
        assert!(
            menus.is_empty() || menus == &vec![tree.file.menu_id()] || menus == &vec![edit],
            "invalid intermediate stack {menus:?}"
        );
    }
    assert_eq!(snapshots.borrow().last(), Some(&vec![edit]));
    assert_eq!(tree.menus(), vec![edit]);
    assert!(!tree.file.is_menu_open());
    assert!(!tree.save.is_menu_open());
    assert_eq!(tree.service.attached(), vec!["edit"]);
}

#[test]
fn opening_a_sibling_closes_the_other_exactly_once() {
    let tree = Tree::new();
    tree.file.toggle();

    let file_closed = Rc::new(RefCell::new(Vec::new()));
    let sink = file_closed.clone();
    let _sub = tree
        .file
        .closed()
        .subscribe(move |f| sink.borrow_mut().push(*f));
    let edit_open_seen = Rc::new(RefCell::new(None));
    let seen = edit_open_seen.clone();
    let file = tree.file.clone();
    let _opened = tree
        .edit
        .opened()
        .subscribe(move |_| *seen.borrow_mut() = Some(file.is_menu_open()));

    // Moving across the bar with File open switches menus.
    tree.edit.handle_pointer_enter();

    assert_eq!(*file_closed.borrow(), vec![FocusNext::Nothing]);
    assert_eq!(*edit_open_seen.borrow(), Some(false));
    assert_eq!(tree.menus(), vec![tree.edit.menu_id()]);
}

#[test]
fn hovering_a_plain_item_collapses_the_open_submenu() {
    let tree = Tree::new();
    open_full_chain(&tree);
    tree.print.handle_pointer_enter();
    assert_eq!(tree.menus(), vec![tree.file.menu_id()]);
    assert!(!tree.save.is_menu_open());
    assert!(!tree.save_as.is_menu_open());
    assert!(tree.file.is_menu_open());
}

#[test]
fn press_inside_the_tree_closes_only_deeper_menus() {
    let tree = Tree::new();
    open_full_chain(&tree);
    let (closed, _sub) = tree.record_closed();

    // A plain area of the File panel.
    tree.service.press(Point::new(20.0, 100.0));

    assert_eq!(tree.menus(), vec![tree.file.menu_id()]);
    let order: Vec<_> = closed.borrow().iter().map(|c| c.menu).collect();
    assert_eq!(order, vec![tree.save_as.menu_id(), tree.save.menu_id()]);
    assert_eq!(tree.service.attached(), vec!["file"]);
}

#[test]
fn press_inside_a_submenu_keeps_the_chain_up_to_it() {
    let tree = Tree::new();
    open_full_chain(&tree);
    let (closed, _sub) = tree.record_closed();

    // Inside the Save panel, below the Save As item.
    tree.service.press(Point::new(150.0, 100.0));

    assert_eq!(tree.menus(), vec![tree.file.menu_id(), tree.save.menu_id()]);
    let order: Vec<_> = closed.borrow().iter().map(|c| c.menu).collect();
    assert_eq!(order, vec![tree.save_as.menu_id()]);
    assert_eq!(tree.service.attached(), vec!["file", "save"]);
    assert!(tree.file.is_menu_open());
}

#[test]
fn press_inside_the_innermost_panel_closes_nothing() {
    let tree = Tree::new();
    open_full_chain(&tree);
    tree.service.press(Point::new(250.0, 100.0));
    assert_eq!(tree.menus().len(), 3);
    assert_eq!(tree.service.attached(), vec!["file", "save", "save_as"]);
}

#[test]
fn press_on_the_open_trigger_is_not_outside() {
    let tree = Tree::new();
    tree.file.toggle();
    tree.service.press(Point::new(10.0, 10.0));
    assert!(tree.file.is_menu_open());
    // The click itself then toggles the menu shut.
    tree.file.toggle();
    assert!(tree.menus().is_empty());
}

#[test]
fn closing_a_bar_item_tears_down_the_whole_chain() {
    let tree = Tree::new();
    open_full_chain(&tree);
    let (closed, _sub) = tree.record_closed();

    tree.file.close();

    assert!(tree.menus().is_empty());
    let order: Vec<_> = closed.borrow().iter().map(|c| c.menu).collect();
    assert_eq!(
        order,
        vec![
            tree.save_as.menu_id(),
            tree.save.menu_id(),
            tree.file.menu_id()
        ]
    );
    assert!(tree.service.attached().is_empty());
}

#[test]
fn closing_a_submenu_keeps_its_parent_open() {
    let tree = Tree::new();
    open_full_chain(&tree);
    tree.save.close();
    assert_eq!(tree.menus(), vec![tree.file.menu_id()]);
    assert!(!tree.save_as.is_menu_open());
}

#[test]
fn emptied_fires_once_when_the_chain_is_gone() {
    let tree = Tree::new();
    open_full_chain(&tree);
    let emptied = Rc::new(RefCell::new(Vec::new()));
    let sink = emptied.clone();
    let _sub = tree
        .bar
        .stack()
        .emptied()
        .subscribe(move |f| sink.borrow_mut().push(*f));

    tree.save.close();
    assert!(emptied.borrow().is_empty());
    tree.bar.close_all(FocusNext::NextItem);
    assert_eq!(*emptied.borrow(), vec![FocusNext::NextItem]);
}

#[test]
fn surfaces_are_created_once_and_reused() {
    let tree = Tree::new();
    tree.file.toggle();
    tree.file.toggle();
    tree.file.toggle();
    assert_eq!(tree.service.created(), 1);
    let surface = tree.service.surfaces.borrow()[0].clone();
    assert_eq!(surface.attach_count.get(), 2);
    assert!(tree.file.is_menu_open());
}

#[test]
fn placement_follows_the_parent_orientation() {
    let tree = Tree::new();
    open_full_chain(&tree);
    let surfaces = tree.service.surfaces.borrow();
    use understory_menu::position::{DROPDOWN_ADJACENT_POSITIONS, DROPDOWN_BELOW_POSITIONS};
    assert_eq!(surfaces[0].config.positions, DROPDOWN_BELOW_POSITIONS.to_vec());
    assert_eq!(surfaces[1].config.positions, DROPDOWN_ADJACENT_POSITIONS.to_vec());
    assert_eq!(surfaces[2].config.positions, DROPDOWN_ADJACENT_POSITIONS.to_vec());
}
