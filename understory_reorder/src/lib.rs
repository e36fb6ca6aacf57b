// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_reorder --heading-base-level=0

//! Understory Reorder: a deterministic, `no_std` drag-to-reorder engine for vertical lists.
//!
//! ## Overview
//!
//! This crate implements the interaction logic behind "press an item, drag it
//! up or down, watch the list make room, release to commit". It does not
//! render anything and does not hit test. The host toolkit reports item
//! geometry and pointer input; the crate answers with advisory
//! [`VisualEffect`](crate::types::VisualEffect)s and, when a drag completes,
//! a single [`Permutation`](crate::types::Permutation) for the list.
//!
//! ## Pieces
//!
//! - [`PointerTracker`](crate::pointer::PointerTracker) turns mouse, touch and
//!   pen input into one press stream with a cumulative vertical offset.
//! - [`ItemRegistry`](crate::registry::ItemRegistry) holds the participating
//!   items in order, each with a live [`GeometryProvider`](crate::registry::GeometryProvider).
//! - [`ReorderEngine`](crate::engine::ReorderEngine) is the `Idle`/`Dragging`
//!   state machine. It decides which items shift, by how much, and where the
//!   dragged item would land.
//! - [`ListModel`](crate::model::ListModel) is the ordered sequence of items
//!   the caller owns.
//! - [`ReorderController`](crate::controller::ReorderController) wires the
//!   four together for one list instance.
//!
//! ## Workflow
//!
//! 1) Register each rendered item with a key and a geometry closure, in the
//!    same order as the model. Both belong to the item rather than its slot:
//!    the closure must report wherever the item is currently laid out, since
//!    the registry is reordered with the model on every commit.
//! 2) Forward press, move, release and cancel events to the controller.
//! 3) Apply the returned effects: hide the pressed item and float a proxy,
//!    translate shifted items, and clean up on release.
//! 4) When [`Response::committed`](crate::controller::Response::committed) is
//!    set, the model (and the registry) already hold the new order; re-render.
//! 5) When an item unmounts, call
//!    [`ReorderController::remove`](crate::controller::ReorderController::remove)
//!    so the model and registry drop it together.
//!
//! ## Commit semantics
//!
//! Moves use remove-then-insert semantics, so the dragged item ends up at the
//! live target index of the post-removal sequence. Dragging `A` of
//! `[A, B, C, D, E]` onto `C` yields `[B, C, A, D, E]`; dragging `E` onto `B`
//! yields `[A, E, B, C, D]`.
//!
//! ## Features
//!
//! - `std` (default) / `libm`: select Kurbo's float backend.
//! - `tracing`: log session begin, commit, cancel and ignored input with
//!   [`tracing`](https://docs.rs/tracing).
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod controller;
pub mod engine;
pub mod model;
pub mod pointer;
pub mod registry;
pub mod types;
