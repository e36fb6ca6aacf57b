// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Controller: one reorderable list, wired explicitly.
//!
//! ## Overview
//!
//! [`ReorderController`] owns the [`PointerTracker`], [`ItemRegistry`],
//! [`ListModel`] and [`ReorderEngine`] of a single list and routes raw pointer
//! input through them. Each entry point returns a [`Response`] describing the
//! visual effects to apply, whether the host should suppress its default
//! scrolling/selection behavior, and the committed move (if any).
//!
//! Ignored input (a press on an unregistered element, a second press while
//! dragging, a move from another finger) yields an empty response with
//! [`Response::rejected`] set; nothing is queued.
//!
//! ## Usage
//!
//! ```
//! use kurbo::Rect;
//! use understory_reorder::controller::ReorderController;
//! use understory_reorder::types::PointerKind;
//!
//! let mut list = ReorderController::new(vec!["A", "B", "C", "D", "E"]);
//! for (i, key) in [10, 11, 12, 13, 14].into_iter().enumerate() {
//!     let y0 = i as f64 * 30.0;
//!     list.register(key, move || Some(Rect::new(0.0, y0, 200.0, y0 + 30.0)));
//! }
//!
//! list.press(None, PointerKind::Mouse, &10, 15.0, 0);
//! list.move_to(None, 75.0, 16);
//! let response = list.release(None);
//!
//! assert!(response.committed.is_some());
//! assert_eq!(list.model().current(), ["B", "C", "A", "D", "E"]);
//! ```
//!
//! ## Stuck sessions
//!
//! A session that never sees a release (lost capture, a dropped event) can be
//! closed with [`ReorderController::cancel`]. With
//! [`ReorderConfig::stale_timeout`] set, an idle session also expires on the
//! next press or on [`ReorderController::expire`].

use alloc::vec::Vec;
use core::hash::Hash;

use crate::engine::ReorderEngine;
use crate::model::ListModel;
use crate::pointer::PointerTracker;
use crate::registry::{GeometryProvider, ItemRegistry};
use crate::types::{Permutation, PointerId, PointerKind, PointerKinds, ReorderError, VisualEffect};

/// Controller configuration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct ReorderConfig {
    /// Milliseconds without input after which an active session is considered
    /// stuck and may be cancelled. `None` keeps sessions open indefinitely.
    pub stale_timeout: Option<u64>,
    /// Pointer kinds allowed to start a drag.
    pub pointer_kinds: PointerKinds,
}

impl Default for ReorderConfig {
    fn default() -> Self {
        Self {
            stale_timeout: None,
            pointer_kinds: PointerKinds::all(),
        }
    }
}

impl ReorderConfig {
    /// Set the stale-session timeout in milliseconds.
    #[must_use]
    pub fn with_stale_timeout(mut self, timeout: Option<u64>) -> Self {
        self.stale_timeout = timeout;
        self
    }

    /// Restrict which pointer kinds may start a drag.
    #[must_use]
    pub fn with_pointer_kinds(mut self, kinds: PointerKinds) -> Self {
        self.pointer_kinds = kinds;
        self
    }
}

/// What the host should do after delivering an input.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Response {
    /// Visual effects to apply, in order.
    pub effects: Vec<VisualEffect>,
    /// Suppress default scrolling and selection for this input.
    pub prevent_default: bool,
    /// The move applied to the model, if this input committed a drag.
    pub committed: Option<Permutation>,
    /// Why the input was ignored, if it was.
    pub rejected: Option<ReorderError>,
}

impl Response {
    fn active(effects: Vec<VisualEffect>) -> Self {
        Self {
            effects,
            prevent_default: true,
            ..Self::default()
        }
    }

    fn ignored(effects: Vec<VisualEffect>, err: ReorderError) -> Self {
        #[cfg(feature = "tracing")]
        tracing::trace!(%err, "input ignored");

        Self {
            effects,
            rejected: Some(err),
            ..Self::default()
        }
    }
}

/// A reorderable list: tracker, registry, model and engine for one list instance.
pub struct ReorderController<K, T, G> {
    tracker: PointerTracker,
    registry: ItemRegistry<K, G>,
    model: ListModel<T>,
    engine: ReorderEngine,
    config: ReorderConfig,
}

impl<K: core::fmt::Debug, T: core::fmt::Debug, G> core::fmt::Debug for ReorderController<K, T, G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ReorderController")
            .field("tracker", &self.tracker)
            .field("registry", &self.registry)
            .field("model", &self.model)
            .field("engine", &self.engine)
            .field("config", &self.config)
            .finish()
    }
}

impl<K, T, G> ReorderController<K, T, G>
where
    K: Clone + Eq + Hash,
    G: GeometryProvider,
{
    /// Create a controller over `items` with the default configuration.
    pub fn new(items: impl Into<ListModel<T>>) -> Self {
        Self::with_config(items, ReorderConfig::default())
    }

    /// Create a controller over `items` with an explicit configuration.
    pub fn with_config(items: impl Into<ListModel<T>>, config: ReorderConfig) -> Self {
        Self {
            tracker: PointerTracker::new(),
            registry: ItemRegistry::new(),
            model: items.into(),
            engine: ReorderEngine::new(),
            config,
        }
    }

    /// Current configuration.
    pub fn config(&self) -> &ReorderConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect from the next input.
    pub fn set_config(&mut self, config: ReorderConfig) {
        self.config = config;
    }

    /// The item registry.
    pub fn registry(&self) -> &ItemRegistry<K, G> {
        &self.registry
    }

    /// The list model.
    pub fn model(&self) -> &ListModel<T> {
        &self.model
    }

    /// The engine, for inspecting the active session.
    pub fn engine(&self) -> &ReorderEngine {
        &self.engine
    }

    /// Consume the controller, returning the model.
    pub fn into_model(self) -> ListModel<T> {
        self.model
    }

    /// Register a rendered item. See [`ItemRegistry::register`].
    pub fn register(&mut self, key: K, geometry: G) -> usize {
        self.registry.register(key, geometry)
    }

    /// Append an item to the model and register its handle.
    pub fn push(&mut self, item: T, key: K, geometry: G) -> usize {
        self.model.push(item);
        self.registry.register(key, geometry)
    }

    /// Remove the item registered under `key` from both the registry and the
    /// model, returning the removed item.
    ///
    /// Removing a handle during a drag invalidates the session's indices, so
    /// the drag is cancelled first and its cleanup effects are returned.
    /// Unknown keys leave everything untouched.
    pub fn remove(&mut self, key: &K) -> (Response, Option<T>) {
        if !self.registry.contains(key) {
            return (Response::default(), None);
        }
        let response = if self.engine.is_dragging() {
            self.cancel()
        } else {
            Response::default()
        };
        let item = self
            .registry
            .unregister(key)
            .filter(|&index| index < self.model.len())
            .map(|index| self.model.remove(index));
        (response, item)
    }

    /// Deliver a press on `target` at client-space `client_y`.
    pub fn press(
        &mut self,
        pointer: Option<PointerId>,
        kind: PointerKind,
        target: &K,
        client_y: f64,
        now: u64,
    ) -> Response {
        let mut effects = self.expire(now).effects;

        let index = self.registry.index_of(target);
        let started =
            self.tracker
                .on_press_start(pointer, kind, index, client_y, self.config.pointer_kinds);
        let (pointer, index) = match started {
            Ok(start) => start,
            Err(err) => return Response::ignored(effects, err),
        };

        match self.engine.begin(&self.registry, pointer, index, client_y, now) {
            Ok(begin) => {
                effects.extend(begin);
                Response::active(effects)
            }
            Err(err) => {
                self.tracker.reset();
                Response::ignored(effects, err)
            }
        }
    }

    /// Deliver a pointer move.
    pub fn move_to(&mut self, pointer: Option<PointerId>, client_y: f64, now: u64) -> Response {
        let offset_y = match self.tracker.on_press_move(pointer, client_y) {
            Ok(offset_y) => offset_y,
            Err(err) => return Response::ignored(Vec::new(), err),
        };
        match self.engine.update(&self.registry, offset_y, now) {
            Ok(effects) => Response::active(effects),
            Err(err) => Response::ignored(Vec::new(), err),
        }
    }

    /// Deliver a pointer release, committing the drag if the item moved.
    pub fn release(&mut self, pointer: Option<PointerId>) -> Response {
        if let Err(err) = self.tracker.on_press_end(pointer) {
            return Response::ignored(Vec::new(), err);
        }
        let release = match self.engine.end() {
            Ok(release) => release,
            Err(err) => return Response::ignored(Vec::new(), err),
        };
        if let Some(permutation) = release.permutation {
            self.model.apply(permutation);
            self.registry.apply(permutation);
        }
        Response {
            effects: release.effects,
            prevent_default: true,
            committed: release.permutation,
            rejected: None,
        }
    }

    /// Deliver a host cancellation for the owning pointer (capture lost,
    /// touch cancelled). The drag ends without committing.
    pub fn pointer_cancel(&mut self, pointer: Option<PointerId>) -> Response {
        if let Err(err) = self.tracker.on_press_cancel(pointer) {
            return Response::ignored(Vec::new(), err);
        }
        match self.engine.cancel() {
            Ok(effects) => Response::active(effects),
            Err(err) => Response::ignored(Vec::new(), err),
        }
    }

    /// Cancel the active drag regardless of which pointer owns it.
    pub fn cancel(&mut self) -> Response {
        self.tracker.reset();
        match self.engine.cancel() {
            Ok(effects) => Response {
                effects,
                ..Response::default()
            },
            Err(err) => Response::ignored(Vec::new(), err),
        }
    }

    /// Cancel the active drag if it has exceeded the configured stale timeout.
    ///
    /// Returns an empty response when nothing expired.
    pub fn expire(&mut self, now: u64) -> Response {
        match self.config.stale_timeout {
            Some(timeout) if self.engine.is_stale(now, timeout) => {
                #[cfg(feature = "tracing")]
                tracing::debug!(now, timeout, "stale drag session expired");

                self.cancel()
            }
            _ => Response::default(),
        }
    }
}
