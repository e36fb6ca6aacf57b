// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder with live layout: item rectangles follow the offsets the engine emits.
//!
//! A toy presentation layer applies each `SetOffset` to a shared layout, so the
//! geometry the engine reads back moves the way a transformed element would.
//! Each key's geometry reports the row its item occupies now, so a second drag
//! still sees the right rectangles after the first one reorders the list.
//! The last row is dragged up onto the second, then the first row down onto
//! the second.
//!
//! Run:
//! - `RUST_LOG=trace cargo run -p understory_demos --example reorder_animated`

use std::cell::RefCell;
use std::rc::Rc;

use kurbo::Rect;
use tracing_subscriber::EnvFilter;
use understory_reorder::controller::{ReorderController, Response};
use understory_reorder::types::{PointerKind, VisualEffect};

const ROW: f64 = 30.0;

/// What a presentation layer would hold for the list.
#[derive(Debug, Default)]
struct Layout {
    /// Keys in rendered order.
    order: Vec<usize>,
    /// Per-row translation, indexed by row.
    offsets: Vec<f64>,
    hidden: Option<usize>,
    proxy: Option<(Rect, f64)>,
}

impl Layout {
    fn rect_of(&self, key: usize) -> Option<Rect> {
        let row = self.order.iter().position(|&k| k == key)?;
        let y0 = row as f64 * ROW + self.offsets[row];
        Some(Rect::new(0.0, y0, 200.0, y0 + ROW))
    }

    fn apply(&mut self, response: &Response) {
        for effect in &response.effects {
            match *effect {
                VisualEffect::ShowProxy { rect, .. } => self.proxy = Some((rect, 0.0)),
                VisualEffect::MoveProxy { offset_y } => {
                    if let Some((_, dy)) = &mut self.proxy {
                        *dy = offset_y;
                    }
                }
                VisualEffect::RemoveProxy => self.proxy = None,
                VisualEffect::HideOriginal { index } => self.hidden = Some(index),
                VisualEffect::ShowOriginal { .. } => self.hidden = None,
                VisualEffect::SetOffset { index, offset_y } => {
                    println!("  row {index} -> {offset_y:+}");
                    self.offsets[index] = offset_y;
                }
                VisualEffect::ResetOffsets => self.offsets.iter_mut().for_each(|o| *o = 0.0),
            }
        }
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let items = vec!["A", "B", "C", "D", "E"];
    let layout = Rc::new(RefCell::new(Layout {
        order: (0..items.len()).collect(),
        offsets: vec![0.0; items.len()],
        ..Layout::default()
    }));

    let mut list = ReorderController::new(items);
    for key in 0..5_usize {
        let layout = layout.clone();
        list.register(key, move || layout.borrow().rect_of(key));
    }

    // Small steps, as a finger would produce.
    println!("== Drag E up ==");
    drag(&mut list, &layout, 4, (45..=135).rev().step_by(10), 0);
    assert_eq!(list.model().current(), ["A", "E", "B", "C", "D"]);

    println!("== Drag A down ==");
    drag(&mut list, &layout, 0, (15..=45).step_by(10), 1_000);
    assert_eq!(list.model().current(), ["E", "A", "B", "C", "D"]);

    let layout = layout.borrow();
    assert!(layout.offsets.iter().all(|&o| o == 0.0));
    assert!(layout.proxy.is_none() && layout.hidden.is_none());
}

/// Press `key` at the first `y`, move through the rest, release, and re-lay
/// out the rows in committed order.
fn drag<G: Fn() -> Option<Rect>>(
    list: &mut ReorderController<usize, &str, G>,
    layout: &RefCell<Layout>,
    key: usize,
    ys: impl IntoIterator<Item = i32>,
    mut t: u64,
) {
    let mut ys = ys.into_iter();
    let Some(start) = ys.next() else {
        return;
    };
    let r = list.press(None, PointerKind::Touch, &key, f64::from(start), t);
    layout.borrow_mut().apply(&r);
    for y in ys {
        t += 16;
        println!("  move to y={y}");
        let r = list.move_to(None, f64::from(y), t);
        layout.borrow_mut().apply(&r);
    }
    println!("  layout before release: {:?}", layout.borrow());

    let r = list.release(None);
    let mut layout = layout.borrow_mut();
    layout.apply(&r);
    layout.order = list.registry().keys().copied().collect();
    println!("  committed {:?}: {:?}", r.committed, list.model().current());
}
