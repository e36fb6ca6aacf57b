// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for list moves and drags over uniform rows.

use kurbo::Rect;
use proptest::prelude::*;
use understory_reorder::controller::ReorderController;
use understory_reorder::model::ListModel;
use understory_reorder::types::{Permutation, PointerKind};

const ROW: f64 = 24.0;

fn row(i: usize) -> impl Fn() -> Option<Rect> {
    let y0 = i as f64 * ROW;
    move || Some(Rect::new(0.0, y0, 320.0, y0 + ROW))
}

fn list_and_move() -> impl Strategy<Value = (Vec<u32>, usize, usize)> {
    (1_usize..40).prop_flat_map(|len| {
        (
            proptest::collection::vec(any::<u32>(), len),
            0..len,
            0..len,
        )
    })
}

proptest! {
    #[test]
    fn move_preserves_items_and_relative_order((items, from, to) in list_and_move()) {
        let model = ListModel::from(items.clone());
        let next = model.permuted(Permutation::new(from, to));
        let out = next.current();

        prop_assert_eq!(out.len(), items.len());
        prop_assert_eq!(out[to], items[from]);

        let mut rest_before = items.clone();
        rest_before.remove(from);
        let mut rest_after = out.to_vec();
        rest_after.remove(to);
        prop_assert_eq!(rest_before, rest_after);

        let mut sorted_in = items.clone();
        let mut sorted_out = out.to_vec();
        sorted_in.sort_unstable();
        sorted_out.sort_unstable();
        prop_assert_eq!(sorted_in, sorted_out);
    }

    #[test]
    fn identity_move_is_noop((items, from, _to) in list_and_move()) {
        let model = ListModel::from(items.clone());
        prop_assert_eq!(model.permuted(Permutation::new(from, from)).into_inner(), items);
    }

    #[test]
    fn drag_onto_row_lands_there((items, from, to) in list_and_move()) {
        let mut list = ReorderController::new(items.clone());
        for i in 0..items.len() {
            list.register(i, row(i));
        }

        // Press at the dragged row's midpoint and move to the target row's midpoint.
        let start = (from as f64 + 0.5) * ROW;
        let end = (to as f64 + 0.5) * ROW;
        list.press(None, PointerKind::Mouse, &from, start, 0);
        list.move_to(None, end, 16);
        let response = list.release(None);

        let expected = (from != to).then_some(Permutation::new(from, to));
        prop_assert_eq!(response.committed, expected);
        prop_assert_eq!(list.model().current()[to], items[from]);
    }

    #[test]
    fn registry_order_matches_model_after_commits((items, from, to) in list_and_move()) {
        let mut list = ReorderController::new(items.clone());
        for i in 0..items.len() {
            list.register(i, row(i));
        }
        list.press(None, PointerKind::Touch, &from, (from as f64 + 0.5) * ROW, 0);
        list.move_to(None, (to as f64 + 0.5) * ROW, 1);
        list.release(None);

        // Keys were the original indices, so they spell out the permutation.
        let by_key: Vec<u32> = list.registry().keys().map(|&k| items[k]).collect();
        prop_assert_eq!(by_key.as_slice(), list.model().current());
    }
}
