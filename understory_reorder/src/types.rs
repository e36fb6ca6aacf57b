// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core types for reordering: permutations, visual effects, pointers, and errors.
//!
//! ## Overview
//!
//! These types describe the reorder protocol and its inputs/outputs.
//! They are produced by the [`engine`](crate::engine) and consumed by the
//! host toolkit (the presentation adapter) and by the owner of the
//! [`ListModel`](crate::model::ListModel).

use alloc::vec::Vec;
use core::num::NonZeroU64;

use kurbo::Rect;

/// Pointer identifier for distinguishing concurrent contacts (e.g., two fingers).
pub type PointerId = NonZeroU64;

/// Pointer identifier used when the host does not supply one.
pub const PRIMARY_POINTER: PointerId = NonZeroU64::MIN;

/// The kind of device that produced a pointer event.
///
/// Mouse, touch and pen input are treated uniformly by the engine; the kind is
/// only consulted to filter which devices may start a drag
/// (see [`ReorderConfig::pointer_kinds`](crate::controller::ReorderConfig::pointer_kinds)).
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerKind {
    /// A mouse or trackpad.
    Mouse,
    /// A finger on a touch surface.
    Touch,
    /// A stylus.
    Pen,
}

bitflags::bitflags! {
    /// A set of [`PointerKind`] values.
    #[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
    pub struct PointerKinds: u8 {
        /// Accept mouse input.
        const MOUSE = 1 << 0;
        /// Accept touch input.
        const TOUCH = 1 << 1;
        /// Accept pen input.
        const PEN = 1 << 2;
    }
}

impl PointerKinds {
    /// Returns `true` if `kind` is part of this set.
    #[inline]
    pub fn accepts(self, kind: PointerKind) -> bool {
        self.contains(Self::from(kind))
    }
}

impl Default for PointerKinds {
    fn default() -> Self {
        Self::all()
    }
}

impl From<PointerKind> for PointerKinds {
    fn from(kind: PointerKind) -> Self {
        match kind {
            PointerKind::Mouse => Self::MOUSE,
            PointerKind::Touch => Self::TOUCH,
            PointerKind::Pen => Self::PEN,
        }
    }
}

/// A single-element move within an ordered sequence.
///
/// Applied with remove-then-insert semantics: the item at `from` is removed,
/// then inserted at `to` in the shortened sequence. The item therefore ends up
/// at exactly `to`, and every other item keeps its relative order.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Permutation {
    /// Origin position of the moved item.
    pub from: usize,
    /// Final position of the moved item.
    pub to: usize,
}

impl Permutation {
    /// Create a move from `from` to `to`.
    #[inline]
    pub const fn new(from: usize, to: usize) -> Self {
        Self { from, to }
    }

    /// Returns `true` if applying this permutation leaves a sequence unchanged.
    #[inline]
    pub const fn is_identity(&self) -> bool {
        self.from == self.to
    }

    /// Check both indices against a sequence of length `len`.
    pub fn check(&self, len: usize) -> Result<(), ReorderError> {
        for index in [self.from, self.to] {
            if index >= len {
                return Err(ReorderError::OutOfRange { index, len });
            }
        }
        Ok(())
    }

    /// Apply this move to `items` in place.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range. That signals a desynchronized
    /// registry and model, which must not silently corrupt the order.
    pub fn apply_to<T>(&self, items: &mut Vec<T>) {
        assert!(
            self.from < items.len() && self.to < items.len(),
            "permutation {self:?} out of range for a sequence of length {}",
            items.len()
        );
        if self.is_identity() {
            return;
        }
        let item = items.remove(self.from);
        items.insert(self.to, item);
    }

    /// Apply this move to `items`, or report the first out-of-range index.
    pub fn try_apply_to<T>(&self, items: &mut Vec<T>) -> Result<(), ReorderError> {
        self.check(items.len())?;
        self.apply_to(items);
        Ok(())
    }
}

/// An advisory visual command for the presentation adapter.
///
/// The adapter decides how to realize each effect (a transform, a direct
/// repaint, and so on). Offsets are vertical, in the same client space as the
/// geometry the adapter reports to the [`ItemRegistry`](crate::registry::ItemRegistry).
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum VisualEffect {
    /// Show a floating proxy for the item at `index`, initially at `rect`.
    ShowProxy {
        /// Index of the dragged item.
        index: usize,
        /// Geometry of the dragged item when the drag began.
        rect: Rect,
    },
    /// Translate the proxy vertically by `offset_y` from its initial rectangle.
    MoveProxy {
        /// Cumulative pointer displacement since the press.
        offset_y: f64,
    },
    /// Remove the floating proxy.
    RemoveProxy,
    /// Hide the in-place element for the item at `index`.
    HideOriginal {
        /// Index of the dragged item.
        index: usize,
    },
    /// Restore visibility of the in-place element for the item at `index`.
    ShowOriginal {
        /// Index of the dragged item.
        index: usize,
    },
    /// Shift the item at `index` vertically by `offset_y` (zero is neutral).
    SetOffset {
        /// Index of the shifted item.
        index: usize,
        /// Vertical displacement.
        offset_y: f64,
    },
    /// Return every item to its neutral offset.
    ResetOffsets,
}

/// Reasons an input was rejected or an operation could not be performed.
///
/// Most variants describe ignored input (no state changed). Only
/// [`OutOfRange`](Self::OutOfRange) describes misuse, and the panicking APIs
/// raise it as a panic instead.
#[derive(Copy, Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum ReorderError {
    /// The pressed target is not a registered handle.
    #[error("press target is not a registered item")]
    UnregisteredTarget,
    /// A drag session is already active.
    #[error("a drag session is already active")]
    SessionActive,
    /// No drag session is active.
    #[error("no drag session is active")]
    NoSession,
    /// The event came from a pointer other than the one that owns the session.
    #[error("event from a pointer that does not own the active session")]
    ForeignPointer,
    /// The pointer kind is not enabled for starting drags.
    #[error("pointer kind is not enabled for dragging")]
    PointerKindDisabled,
    /// The item's geometry could not be read.
    #[error("geometry unavailable for item {index}")]
    GeometryUnavailable {
        /// Index of the item.
        index: usize,
    },
    /// An index does not address an item.
    #[error("index {index} out of range for length {len}")]
    OutOfRange {
        /// The offending index.
        index: usize,
        /// Length of the sequence.
        len: usize,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn forward_move_lands_on_target() {
        let mut v = vec!['a', 'b', 'c', 'd', 'e'];
        Permutation::new(0, 2).apply_to(&mut v);
        assert_eq!(v, vec!['b', 'c', 'a', 'd', 'e']);
    }

    #[test]
    fn backward_move_lands_on_target() {
        let mut v = vec!['a', 'b', 'c', 'd', 'e'];
        Permutation::new(4, 1).apply_to(&mut v);
        assert_eq!(v, vec!['a', 'e', 'b', 'c', 'd']);
    }

    #[test]
    fn identity_is_noop() {
        let mut v = vec![1, 2, 3];
        let p = Permutation::new(1, 1);
        assert!(p.is_identity());
        p.apply_to(&mut v);
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    fn try_apply_reports_out_of_range() {
        let mut v = vec![1, 2, 3];
        assert_eq!(
            Permutation::new(0, 3).try_apply_to(&mut v),
            Err(ReorderError::OutOfRange { index: 3, len: 3 })
        );
        assert_eq!(
            Permutation::new(5, 0).try_apply_to(&mut v),
            Err(ReorderError::OutOfRange { index: 5, len: 3 })
        );
        assert_eq!(v, vec![1, 2, 3]);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn apply_panics_out_of_range() {
        let mut v = vec![1, 2, 3];
        Permutation::new(0, 7).apply_to(&mut v);
    }

    #[test]
    fn pointer_kinds_filtering() {
        let kinds = PointerKinds::MOUSE | PointerKinds::PEN;
        assert!(kinds.accepts(PointerKind::Mouse));
        assert!(kinds.accepts(PointerKind::Pen));
        assert!(!kinds.accepts(PointerKind::Touch));
        assert!(PointerKinds::default().accepts(PointerKind::Touch));
    }
}
