// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pointer tracking: normalize mouse, touch and pen input into one press stream.
//!
//! The tracker holds no domain state. It only knows whether a press is active,
//! which pointer owns it, and the client-space `y` at which it began, so it can
//! turn absolute pointer positions into a cumulative vertical offset.
//!
//! ## Usage
//!
//! 1) Resolve the pressed element to a registry index (or `None` when the
//!    element is not a registered handle).
//! 2) Feed press, move, and release events to the tracker.
//! 3) Forward accepted presses and offsets to the
//!    [`ReorderEngine`](crate::engine::ReorderEngine).
//!
//! Hosts should suppress default scrolling and text selection for every move
//! the tracker accepts.
//!
//! ```
//! use understory_reorder::pointer::PointerTracker;
//! use understory_reorder::types::{PointerKind, PointerKinds, PRIMARY_POINTER};
//!
//! let mut t = PointerTracker::new();
//! let start = t.on_press_start(None, PointerKind::Touch, Some(2), 40.0, PointerKinds::all());
//! assert_eq!(start, Ok((PRIMARY_POINTER, 2)));
//!
//! assert_eq!(t.on_press_move(None, 55.0), Ok(15.0));
//!
//! assert_eq!(t.on_press_end(None), Ok(()));
//! assert!(!t.is_active());
//! ```

use crate::types::{PRIMARY_POINTER, PointerId, PointerKind, PointerKinds, ReorderError};

#[derive(Copy, Clone, Debug, PartialEq)]
struct Press {
    pointer: PointerId,
    origin_y: f64,
}

/// Single-press tracker shared by all pointer kinds.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PointerTracker {
    press: Option<Press>,
}

impl PointerTracker {
    /// Create an idle tracker.
    pub fn new() -> Self {
        Self { press: None }
    }

    /// Returns `true` while a press is being tracked.
    pub fn is_active(&self) -> bool {
        self.press.is_some()
    }

    /// Pointer owning the active press, if any.
    pub fn pointer(&self) -> Option<PointerId> {
        self.press.map(|p| p.pointer)
    }

    /// Client-space `y` at which the active press began, if any.
    pub fn origin_y(&self) -> Option<f64> {
        self.press.map(|p| p.origin_y)
    }

    /// Begin tracking a press, returning the owning pointer and the pressed index.
    ///
    /// `target` is the registry index of the pressed element, or `None` if the
    /// element is not a registered item. Presses while another press is active
    /// are rejected rather than queued.
    pub fn on_press_start(
        &mut self,
        pointer: Option<PointerId>,
        kind: PointerKind,
        target: Option<usize>,
        client_y: f64,
        accepted: PointerKinds,
    ) -> Result<(PointerId, usize), ReorderError> {
        if self.press.is_some() {
            return Err(ReorderError::SessionActive);
        }
        if !accepted.accepts(kind) {
            return Err(ReorderError::PointerKindDisabled);
        }
        let index = target.ok_or(ReorderError::UnregisteredTarget)?;
        let pointer = pointer.unwrap_or(PRIMARY_POINTER);
        self.press = Some(Press {
            pointer,
            origin_y: client_y,
        });
        Ok((pointer, index))
    }

    /// Track movement of the owning pointer, returning `client_y` minus the
    /// press origin.
    pub fn on_press_move(&self, pointer: Option<PointerId>, client_y: f64) -> Result<f64, ReorderError> {
        let press = self.owned(pointer)?;
        Ok(client_y - press.origin_y)
    }

    /// Finish the press when the owning pointer is released.
    pub fn on_press_end(&mut self, pointer: Option<PointerId>) -> Result<(), ReorderError> {
        self.owned(pointer)?;
        self.press = None;
        Ok(())
    }

    /// Abandon the press when the owning pointer is cancelled by the host.
    pub fn on_press_cancel(&mut self, pointer: Option<PointerId>) -> Result<(), ReorderError> {
        self.owned(pointer)?;
        self.press = None;
        Ok(())
    }

    /// Forget any active press without producing an event.
    pub fn reset(&mut self) {
        self.press = None;
    }

    fn owned(&self, pointer: Option<PointerId>) -> Result<Press, ReorderError> {
        let press = self.press.ok_or(ReorderError::NoSession)?;
        if press.pointer != pointer.unwrap_or(PRIMARY_POINTER) {
            return Err(ReorderError::ForeignPointer);
        }
        Ok(press)
    }
}
