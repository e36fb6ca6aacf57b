// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder basics: drag the first of five rows onto the third.
//!
//! This example registers static row geometry, simulates a mouse drag, and
//! prints the effects a presentation layer would apply.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_demos --example reorder_basics`

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_reorder::controller::ReorderController;
use understory_reorder::types::{Permutation, PointerKind};

const ROW: f64 = 40.0;

fn row(i: u32) -> impl Fn() -> Option<Rect> {
    let y0 = f64::from(i) * ROW;
    move || Some(Rect::new(0.0, y0, 300.0, y0 + ROW))
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut list = ReorderController::new(vec!["A", "B", "C", "D", "E"]);
    for i in 0..5 {
        list.register(i, row(i));
    }

    let r = list.press(None, PointerKind::Mouse, &0, 20.0, 0);
    println!("== Press ==\n  {:?}", r.effects);

    // Step the pointer down; the dragged midpoint ends inside "C".
    let mut t = 0;
    for y in [30.0, 50.0, 70.0, 100.0] {
        t += 16;
        let r = list.move_to(None, y, t);
        let target = list.engine().session().map(|s| s.live_target_index);
        println!("== Move to y={y} (target {target:?}) ==\n  {:?}", r.effects);
    }

    let r = list.release(None);
    println!("== Release ==\n  {:?}", r.effects);
    println!("== Model ==\n  {:?}", list.model().current());

    assert_eq!(r.committed, Some(Permutation::new(0, 2)));
    assert_eq!(list.model().current(), ["B", "C", "A", "D", "E"]);
}
