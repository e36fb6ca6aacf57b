// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Reorder engine: the drag state machine and index resolution.
//!
//! ## States
//!
//! The engine is either [`Idle`](DragState::Idle) or
//! [`Dragging`](DragState::Dragging). Transitions are explicit method calls and
//! each returns the [`VisualEffect`]s the presentation adapter should apply.
//!
//! - [`begin`](ReorderEngine::begin): `Idle → Dragging`. Snapshots the dragged
//!   item's rectangle, hides it, and shows a proxy in its place.
//! - [`update`](ReorderEngine::update): `Dragging → Dragging`. Moves the proxy,
//!   shifts passed items, and recomputes the live target index.
//! - [`end`](ReorderEngine::end): `Dragging → Idle`. Produces the committed
//!   [`Permutation`] (if any) and the cleanup effects.
//! - [`cancel`](ReorderEngine::cancel): `Dragging → Idle` without committing.
//!
//! ## Index resolution
//!
//! On every move the engine derives the *probe*: the dragged item's current
//! vertical midpoint, `offset_y + origin.y0 + origin.height() / 2`. Then, for
//! each other item with available geometry:
//!
//! - an item below the dragged one whose top edge is above the probe shifts up
//!   by the dragged item's height;
//! - an item above the dragged one whose bottom edge is below the probe shifts
//!   down by the dragged item's height;
//! - every other item returns to a zero offset.
//!
//! Scanning all items in ascending index order, each rectangle that vertically
//! contains the probe overwrites the live target, so the highest index wins
//! when animated geometry overlaps. If no rectangle contains the probe the
//! previous target is kept.
//!
//! Nothing is accumulated between moves: every update re-derives from the
//! absolute offset and the current geometry, so the engine tolerates any move
//! frequency.
//!
//! ## Example
//!
//! ```
//! use kurbo::Rect;
//! use understory_reorder::engine::ReorderEngine;
//! use understory_reorder::registry::ItemRegistry;
//! use understory_reorder::types::{Permutation, PRIMARY_POINTER};
//!
//! let mut reg = ItemRegistry::new();
//! for (i, key) in ["a", "b", "c"].into_iter().enumerate() {
//!     let y0 = i as f64 * 20.0;
//!     reg.register(key, move || Some(Rect::new(0.0, y0, 100.0, y0 + 20.0)));
//! }
//!
//! let mut engine = ReorderEngine::new();
//! engine.begin(&reg, PRIMARY_POINTER, 0, 5.0, 0).unwrap();
//! engine.update(&reg, 42.0, 16).unwrap();
//! assert_eq!(engine.session().map(|s| s.live_target_index), Some(2));
//!
//! let release = engine.end().unwrap();
//! assert_eq!(release.permutation, Some(Permutation::new(0, 2)));
//! ```

use alloc::vec;
use alloc::vec::Vec;
use core::hash::Hash;

use kurbo::Rect;

use crate::registry::{GeometryProvider, ItemRegistry};
use crate::types::{Permutation, PointerId, ReorderError, VisualEffect};

/// The record of one drag gesture, from press to release.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    /// Pointer that owns the gesture.
    pub pointer: PointerId,
    /// Index of the dragged item; fixed for the session.
    pub dragged_index: usize,
    /// Client-space `y` at the press.
    pub origin_y: f64,
    /// Cumulative vertical pointer displacement since the press.
    pub current_offset_y: f64,
    /// Where the dragged item would land if released now.
    pub live_target_index: usize,
    /// Geometry of the dragged item when the drag began.
    pub origin_rect: Rect,
    /// Timestamp of the press, in caller milliseconds.
    pub started_at: u64,
    /// Timestamp of the most recent event, in caller milliseconds.
    pub last_event_at: u64,
    offsets: Vec<f64>,
}

impl DragSession {
    /// Vertical midpoint of the dragged item at the current offset.
    pub fn probe_y(&self) -> f64 {
        probe_y(self.origin_rect, self.current_offset_y)
    }

    /// Offset last emitted for the item at `index` (zero if never shifted).
    pub fn offset_of(&self, index: usize) -> f64 {
        self.offsets.get(index).copied().unwrap_or(0.0)
    }
}

/// Engine state.
#[derive(Clone, Debug, Default, PartialEq)]
pub enum DragState {
    /// No drag in progress.
    #[default]
    Idle,
    /// A drag is in progress.
    Dragging(DragSession),
}

/// Outcome of finishing a drag.
#[derive(Clone, Debug, PartialEq)]
pub struct Release {
    /// The move to apply to the list, if the item changed position.
    pub permutation: Option<Permutation>,
    /// Cleanup effects for the presentation adapter.
    pub effects: Vec<VisualEffect>,
}

/// Vertical midpoint of `origin` after moving it by `offset_y`.
#[inline]
pub fn probe_y(origin: Rect, offset_y: f64) -> f64 {
    offset_y + origin.y0 + origin.height() / 2.0
}

/// Offset for the item at `index` given the current probe.
///
/// `shift` is the dragged item's height.
#[inline]
pub fn shift_for(probe: f64, dragged_index: usize, index: usize, rect: Rect, shift: f64) -> f64 {
    if probe > rect.y0 && dragged_index < index {
        -shift
    } else if probe < rect.y1 && dragged_index > index {
        shift
    } else {
        0.0
    }
}

#[inline]
fn contains_y(rect: Rect, y: f64) -> bool {
    rect.y0 <= y && y < rect.y1
}

/// Drag state machine for one list instance.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ReorderEngine {
    state: DragState,
}

impl ReorderEngine {
    /// Create an idle engine.
    pub fn new() -> Self {
        Self {
            state: DragState::Idle,
        }
    }

    /// Current state.
    pub fn state(&self) -> &DragState {
        &self.state
    }

    /// Active session, if dragging.
    pub fn session(&self) -> Option<&DragSession> {
        match &self.state {
            DragState::Dragging(s) => Some(s),
            DragState::Idle => None,
        }
    }

    /// Returns `true` while a drag is in progress.
    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    /// Returns `true` if the active session has seen no event for at least
    /// `timeout` milliseconds as of `now`.
    pub fn is_stale(&self, now: u64, timeout: u64) -> bool {
        self.session()
            .is_some_and(|s| now.saturating_sub(s.last_event_at) >= timeout)
    }

    /// Start dragging the item at `index`.
    ///
    /// Fails without changing state if a session is active, the index is not
    /// registered, or the item has no geometry to snapshot.
    pub fn begin<K, G>(
        &mut self,
        registry: &ItemRegistry<K, G>,
        pointer: PointerId,
        index: usize,
        client_y: f64,
        now: u64,
    ) -> Result<Vec<VisualEffect>, ReorderError>
    where
        K: Clone + Eq + Hash,
        G: GeometryProvider,
    {
        if self.is_dragging() {
            return Err(ReorderError::SessionActive);
        }
        if index >= registry.len() {
            return Err(ReorderError::UnregisteredTarget);
        }
        let origin_rect = registry
            .geometry_of(index)
            .ok_or(ReorderError::GeometryUnavailable { index })?;

        #[cfg(feature = "tracing")]
        tracing::debug!(index, y0 = origin_rect.y0, height = origin_rect.height(), "drag begin");

        self.state = DragState::Dragging(DragSession {
            pointer,
            dragged_index: index,
            origin_y: client_y,
            current_offset_y: 0.0,
            live_target_index: index,
            origin_rect,
            started_at: now,
            last_event_at: now,
            offsets: vec![0.0; registry.len()],
        });
        Ok(vec![
            VisualEffect::HideOriginal { index },
            VisualEffect::ShowProxy {
                index,
                rect: origin_rect,
            },
        ])
    }

    /// Apply a new cumulative pointer offset and recompute shifts and target.
    ///
    /// Only offsets that differ from the last emitted value are returned.
    pub fn update<K, G>(
        &mut self,
        registry: &ItemRegistry<K, G>,
        offset_y: f64,
        now: u64,
    ) -> Result<Vec<VisualEffect>, ReorderError>
    where
        K: Clone + Eq + Hash,
        G: GeometryProvider,
    {
        let DragState::Dragging(session) = &mut self.state else {
            return Err(ReorderError::NoSession);
        };
        session.current_offset_y = offset_y;
        session.last_event_at = now;
        session.offsets.resize(registry.len(), 0.0);

        let probe = session.probe_y();
        let shift = session.origin_rect.height();
        let dragged = session.dragged_index;

        let mut out = vec![VisualEffect::MoveProxy { offset_y }];
        let mut target = session.live_target_index;
        for index in 0..registry.len() {
            // Unavailable geometry: skip this item for this tick only.
            let Some(rect) = registry.geometry_of(index) else {
                continue;
            };
            if contains_y(rect, probe) {
                target = index;
            }
            if index == dragged {
                continue;
            }
            let offset_y = shift_for(probe, dragged, index, rect, shift);
            if session.offsets[index] != offset_y {
                session.offsets[index] = offset_y;
                out.push(VisualEffect::SetOffset { index, offset_y });
            }
        }

        #[cfg(feature = "tracing")]
        if target != session.live_target_index {
            tracing::trace!(from = session.live_target_index, to = target, probe, "live target");
        }

        session.live_target_index = target;
        Ok(out)
    }

    /// Finish the drag, producing the committed move if the target differs
    /// from the origin.
    pub fn end(&mut self) -> Result<Release, ReorderError> {
        let session = self.take()?;
        let permutation = Permutation::new(session.dragged_index, session.live_target_index);
        let permutation = (!permutation.is_identity()).then_some(permutation);

        #[cfg(feature = "tracing")]
        tracing::debug!(?permutation, "drag end");

        Ok(Release {
            permutation,
            effects: cleanup(session.dragged_index),
        })
    }

    /// Abandon the drag without committing.
    pub fn cancel(&mut self) -> Result<Vec<VisualEffect>, ReorderError> {
        let session = self.take()?;

        #[cfg(feature = "tracing")]
        tracing::debug!(index = session.dragged_index, "drag cancelled");

        Ok(cleanup(session.dragged_index))
    }

    fn take(&mut self) -> Result<DragSession, ReorderError> {
        match core::mem::take(&mut self.state) {
            DragState::Dragging(session) => Ok(session),
            DragState::Idle => Err(ReorderError::NoSession),
        }
    }
}

fn cleanup(index: usize) -> Vec<VisualEffect> {
    vec![
        VisualEffect::RemoveProxy,
        VisualEffect::ShowOriginal { index },
        VisualEffect::ResetOffsets,
    ]
}
