// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests: the stack against a plain `Vec` model.

use std::cell::RefCell;
use std::rc::Rc;

use proptest::prelude::*;
use understory_menu::stack::MenuStack;
use understory_menu::types::{FocusNext, MenuClosed, MenuId};

#[derive(Clone, Debug)]
enum Op {
    Push(usize),
    Pop(usize, FocusNext),
    CloseSubMenuOf(usize),
    CloseAll(FocusNext),
}

fn focus() -> impl Strategy<Value = FocusNext> {
    prop_oneof![
        Just(FocusNext::Nothing),
        Just(FocusNext::CurrentItem),
        Just(FocusNext::PreviousItem),
        Just(FocusNext::NextItem),
    ]
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0..POOL).prop_map(Op::Push),
        1 => (0..POOL, focus()).prop_map(|(i, f)| Op::Pop(i, f)),
        1 => (0..POOL).prop_map(Op::CloseSubMenuOf),
        1 => focus().prop_map(Op::CloseAll),
    ]
}

const POOL: usize = 6;

/// Expected notifications for truncating `model` at `index`.
fn truncate(model: &mut Vec<MenuId>, index: usize, focus_next: FocusNext) -> Vec<MenuClosed> {
    model
        .drain(index..)
        .rev()
        .map(|menu| MenuClosed { menu, focus_next })
        .collect()
}

proptest! {
    #[test]
    fn stack_matches_vec_model(ops in prop::collection::vec(op(), 0..64)) {
        let ids: Vec<MenuId> = (0..POOL).map(|_| MenuId::next()).collect();
        let stack = MenuStack::new();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = seen.clone();
        let _sub = stack.closed().subscribe(move |c| sink.borrow_mut().push(*c));
        let mut model: Vec<MenuId> = Vec::new();

        for op in ops {
            seen.borrow_mut().clear();
            let expected = match op {
                Op::Push(i) => {
                    if !model.contains(&ids[i]) {
                        model.push(ids[i]);
                    }
                    stack.push(ids[i]);
                    Vec::new()
                }
                Op::Pop(i, f) => {
                    let expected = match model.iter().position(|m| *m == ids[i]) {
                        Some(index) => truncate(&mut model, index, f),
                        None => Vec::new(),
                    };
                    stack.pop(ids[i], f);
                    expected
                }
                Op::CloseSubMenuOf(i) => {
                    let expected = match model.iter().position(|m| *m == ids[i]) {
                        Some(index) => truncate(&mut model, index + 1, FocusNext::Nothing),
                        None => Vec::new(),
                    };
                    let removed = stack.close_sub_menu_of(ids[i]);
                    prop_assert_eq!(removed, !expected.is_empty());
                    expected
                }
                Op::CloseAll(f) => {
                    let expected = truncate(&mut model, 0, f);
                    stack.close_all(f);
                    expected
                }
            };
            prop_assert_eq!(&*seen.borrow(), &expected);
            prop_assert_eq!(stack.menus(), model.clone());
            prop_assert_eq!(stack.peek(), model.last().copied());
        }
    }

    #[test]
    fn close_all_always_empties(depth in 0usize..16, f in focus()) {
        let stack = MenuStack::new();
        for _ in 0..depth {
            stack.push(MenuId::next());
        }
        let emptied = Rc::new(RefCell::new(Vec::new()));
        let sink = emptied.clone();
        let _sub = stack.emptied().subscribe(move |f| sink.borrow_mut().push(*f));

        stack.close_all(f);
        prop_assert!(stack.is_empty());
        let expected = if depth == 0 { Vec::new() } else { vec![f] };
        prop_assert_eq!(&*emptied.borrow(), &expected);
    }
}
