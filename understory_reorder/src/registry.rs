// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Item registry: the ordered handles that participate in reordering.
//!
//! ## Overview
//!
//! Each handle pairs a caller key (the identity of a rendered element, used to
//! match press targets) with a [`GeometryProvider`] that reports the element's
//! current bounding rectangle. Handles are kept in mount order, which must
//! match the order of the [`ListModel`](crate::model::ListModel).
//!
//! Geometry is read live on every query, never cached, since items move
//! while a drag animates.
//!
//! ## Keys identify items, not slots
//!
//! A commit permutes the handles along with the model (see
//! [`ItemRegistry::apply`]), so after a move each key sits at its item's new
//! index. The key and its geometry provider must therefore describe one item
//! wherever it is rendered. A provider that reports a fixed slot ("row 2")
//! goes stale after the first commit and misdirects the next drag; report the
//! item's current layout instead.
//!
//! ## Duplicate registration
//!
//! Registration is idempotent by key. Re-registering a key (for example after
//! a re-render) replaces its geometry provider and keeps its position, so
//! index-based lookups stay in sync with the model.
//!
//! ```
//! use kurbo::Rect;
//! use understory_reorder::registry::ItemRegistry;
//!
//! fn row(y0: f64) -> impl Fn() -> Option<Rect> {
//!     move || Some(Rect::new(0.0, y0, 100.0, y0 + 20.0))
//! }
//!
//! let mut reg = ItemRegistry::new();
//! reg.register("a", row(0.0));
//! reg.register("b", row(20.0));
//! assert_eq!(reg.register("a", row(0.0)), 0);
//! assert_eq!(reg.index_of(&"b"), Some(1));
//! assert_eq!(reg.geometry_of(1).map(|r| r.y0), Some(20.0));
//! ```

use alloc::vec::Vec;
use core::hash::Hash;

use hashbrown::HashMap;
use kurbo::Rect;

use crate::types::Permutation;

/// Live geometry for a registered item.
///
/// Implemented for any `Fn() -> Option<Rect>`, so hosts usually register a
/// closure that queries their layout.
pub trait GeometryProvider {
    /// Current bounding rectangle in client space, or `None` if unavailable
    /// (e.g., the element is not laid out yet).
    fn rect(&self) -> Option<Rect>;
}

impl<F> GeometryProvider for F
where
    F: Fn() -> Option<Rect>,
{
    #[inline]
    fn rect(&self) -> Option<Rect> {
        self()
    }
}

struct Handle<K, G> {
    key: K,
    geometry: G,
}

/// Ordered set of item handles.
pub struct ItemRegistry<K, G> {
    handles: Vec<Handle<K, G>>,
    index: HashMap<K, usize>,
}

impl<K: core::fmt::Debug, G> core::fmt::Debug for ItemRegistry<K, G> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ItemRegistry")
            .field("keys", &self.handles.iter().map(|h| &h.key).collect::<Vec<_>>())
            .finish_non_exhaustive()
    }
}

impl<K, G> Default for ItemRegistry<K, G> {
    fn default() -> Self {
        Self {
            handles: Vec::new(),
            index: HashMap::new(),
        }
    }
}

impl<K: Clone + Eq + Hash, G: GeometryProvider> ItemRegistry<K, G> {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered handles.
    pub fn len(&self) -> usize {
        self.handles.len()
    }

    /// Returns `true` if no handles are registered.
    pub fn is_empty(&self) -> bool {
        self.handles.is_empty()
    }

    /// Register a handle and return its index.
    ///
    /// New keys are appended. A key that is already registered keeps its
    /// index and has its geometry provider replaced.
    pub fn register(&mut self, key: K, geometry: G) -> usize {
        if let Some(&i) = self.index.get(&key) {
            self.handles[i].geometry = geometry;
            return i;
        }
        let i = self.handles.len();
        self.index.insert(key.clone(), i);
        self.handles.push(Handle { key, geometry });
        i
    }

    /// Remove the handle for `key`, returning its former index.
    ///
    /// Later handles shift down by one.
    pub fn unregister(&mut self, key: &K) -> Option<usize> {
        let i = self.index.remove(key)?;
        self.handles.remove(i);
        self.reindex(i, self.handles.len());
        Some(i)
    }

    /// Remove all handles.
    pub fn clear(&mut self) {
        self.handles.clear();
        self.index.clear();
    }

    /// Index of the handle registered under `key`.
    pub fn index_of(&self, key: &K) -> Option<usize> {
        self.index.get(key).copied()
    }

    /// Returns `true` if `key` is registered.
    pub fn contains(&self, key: &K) -> bool {
        self.index.contains_key(key)
    }

    /// Key of the handle at `index`.
    pub fn key_at(&self, index: usize) -> Option<&K> {
        self.handles.get(index).map(|h| &h.key)
    }

    /// Keys in registry order.
    pub fn keys(&self) -> impl Iterator<Item = &K> + '_ {
        self.handles.iter().map(|h| &h.key)
    }

    /// Current geometry of the handle at `index`, read live.
    ///
    /// Returns `None` if `index` is out of range or the provider has no
    /// rectangle right now.
    pub fn geometry_of(&self, index: usize) -> Option<Rect> {
        self.handles.get(index)?.geometry.rect()
    }

    /// Reorder handles the same way the model is reordered on commit.
    ///
    /// Each handle keeps its key and provider, so both keep following the
    /// moved item.
    ///
    /// # Panics
    ///
    /// Panics if either index of `permutation` is out of range.
    pub fn apply(&mut self, permutation: Permutation) {
        permutation.apply_to(&mut self.handles);
        let lo = permutation.from.min(permutation.to);
        let hi = permutation.from.max(permutation.to);
        self.reindex(lo, hi + 1);
    }

    fn reindex(&mut self, start: usize, end: usize) {
        for (i, h) in self.handles.iter().enumerate().take(end).skip(start) {
            if let Some(slot) = self.index.get_mut(&h.key) {
                *slot = i;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::boxed::Box;
    use alloc::rc::Rc;
    use alloc::vec;
    use core::cell::Cell;

    type Geom = Box<dyn Fn() -> Option<Rect>>;

    fn fixed(y0: f64, h: f64) -> Geom {
        Box::new(move || Some(Rect::new(0.0, y0, 100.0, y0 + h)))
    }

    fn keys(reg: &ItemRegistry<&'static str, Geom>) -> Vec<&'static str> {
        reg.keys().copied().collect()
    }

    #[test]
    fn mount_order_is_registry_order() {
        let mut reg: ItemRegistry<&str, Geom> = ItemRegistry::new();
        for (i, k) in ["a", "b", "c", "d"].into_iter().enumerate() {
            assert_eq!(reg.register(k, fixed(i as f64 * 10.0, 10.0)), i);
        }
        assert_eq!(keys(&reg), vec!["a", "b", "c", "d"]);
        assert_eq!(reg.index_of(&"c"), Some(2));
        assert_eq!(reg.key_at(3), Some(&"d"));
    }

    #[test]
    fn duplicate_registration_keeps_position() {
        let mut reg: ItemRegistry<&str, Geom> = ItemRegistry::new();
        reg.register("a", fixed(0.0, 10.0));
        reg.register("b", fixed(10.0, 10.0));
        assert_eq!(reg.register("a", fixed(50.0, 5.0)), 0);
        assert_eq!(reg.len(), 2);
        assert_eq!(reg.geometry_of(0), Some(Rect::new(0.0, 50.0, 100.0, 55.0)));
    }

    #[test]
    fn unregister_shifts_later_handles() {
        let mut reg: ItemRegistry<&str, Geom> = ItemRegistry::new();
        for k in ["a", "b", "c"] {
            reg.register(k, fixed(0.0, 10.0));
        }
        assert_eq!(reg.unregister(&"a"), Some(0));
        assert_eq!(reg.unregister(&"zz"), None);
        assert_eq!(reg.index_of(&"b"), Some(0));
        assert_eq!(reg.index_of(&"c"), Some(1));
        assert!(!reg.contains(&"a"));
    }

    #[test]
    fn geometry_is_read_live() {
        let y = Rc::new(Cell::new(0.0));
        let mut reg = ItemRegistry::new();
        let probe = y.clone();
        reg.register(1_u32, move || Some(Rect::new(0.0, probe.get(), 10.0, probe.get() + 10.0)));
        assert_eq!(reg.geometry_of(0).map(|r| r.y0), Some(0.0));
        y.set(35.0);
        assert_eq!(reg.geometry_of(0).map(|r| r.y0), Some(35.0));
        assert_eq!(reg.geometry_of(1), None);
    }

    #[test]
    fn apply_keeps_index_in_sync() {
        let mut reg: ItemRegistry<&str, Geom> = ItemRegistry::new();
        for k in ["a", "b", "c", "d", "e"] {
            reg.register(k, fixed(0.0, 10.0));
        }
        reg.apply(Permutation::new(0, 2));
        assert_eq!(keys(&reg), vec!["b", "c", "a", "d", "e"]);
        for (i, k) in ["b", "c", "a", "d", "e"].iter().enumerate() {
            assert_eq!(reg.index_of(k), Some(i));
        }
        reg.apply(Permutation::new(4, 1));
        assert_eq!(keys(&reg), vec!["b", "e", "c", "a", "d"]);
        assert_eq!(reg.index_of(&"d"), Some(4));
        assert_eq!(reg.index_of(&"e"), Some(1));
    }
}
