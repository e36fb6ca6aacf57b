// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! List model: the caller-owned ordered sequence of items.

use alloc::vec::Vec;

use crate::types::{Permutation, ReorderError};

/// An ordered sequence of opaque items, identified only by position.
///
/// The model is mutated only when a drag commits; it never sees intermediate
/// drag state.
///
/// ```
/// use understory_reorder::model::ListModel;
/// use understory_reorder::types::Permutation;
///
/// let mut list = ListModel::from(vec!["A", "B", "C", "D", "E"]);
/// list.apply(Permutation::new(0, 2));
/// assert_eq!(list.current(), ["B", "C", "A", "D", "E"]);
/// ```
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListModel<T> {
    items: Vec<T>,
}

impl<T> ListModel<T> {
    /// Create an empty model.
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// The present sequence, for rendering.
    pub fn current(&self) -> &[T] {
        &self.items
    }

    /// Number of items.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns `true` if the model holds no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Append an item.
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Remove and return the item at `index`, shifting later items down.
    ///
    /// # Panics
    ///
    /// Panics if `index` is out of range.
    pub fn remove(&mut self, index: usize) -> T {
        assert!(
            index < self.items.len(),
            "remove index {index} out of range for a list of length {}",
            self.items.len()
        );
        self.items.remove(index)
    }

    /// Apply a move in place.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    pub fn apply(&mut self, permutation: Permutation) {
        permutation.apply_to(&mut self.items);
    }

    /// Apply a move in place, or report an out-of-range index and leave the
    /// model unchanged.
    pub fn try_apply(&mut self, permutation: Permutation) -> Result<(), ReorderError> {
        permutation.try_apply_to(&mut self.items)
    }

    /// Consume the model, returning its items.
    pub fn into_inner(self) -> Vec<T> {
        self.items
    }
}

impl<T: Clone> ListModel<T> {
    /// Return a new model with the move applied, leaving `self` untouched.
    ///
    /// # Panics
    ///
    /// Panics if either index is out of range.
    #[must_use]
    pub fn permuted(&self, permutation: Permutation) -> Self {
        let mut next = self.clone();
        next.apply(permutation);
        next
    }
}

impl<T> From<Vec<T>> for ListModel<T> {
    fn from(items: Vec<T>) -> Self {
        Self { items }
    }
}

impl<T> FromIterator<T> for ListModel<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self {
            items: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    fn abcde() -> ListModel<char> {
        "ABCDE".chars().collect()
    }

    #[test]
    fn forward_drag_scenario() {
        let mut m = abcde();
        m.apply(Permutation::new(0, 2));
        assert_eq!(m.current(), ['B', 'C', 'A', 'D', 'E']);
    }

    #[test]
    fn backward_drag_scenario() {
        let mut m = abcde();
        m.apply(Permutation::new(4, 1));
        assert_eq!(m.current(), ['A', 'E', 'B', 'C', 'D']);
    }

    #[test]
    fn permuted_is_pure() {
        let m = abcde();
        let next = m.permuted(Permutation::new(1, 3));
        assert_eq!(m.current(), ['A', 'B', 'C', 'D', 'E']);
        assert_eq!(next.current(), ['A', 'C', 'D', 'B', 'E']);
        assert_eq!(m.permuted(Permutation::new(2, 2)), m);
    }

    #[test]
    fn try_apply_leaves_model_on_error() {
        let mut m = abcde();
        assert_eq!(
            m.try_apply(Permutation::new(0, 5)),
            Err(ReorderError::OutOfRange { index: 5, len: 5 })
        );
        assert_eq!(m, abcde());
        assert_eq!(m.try_apply(Permutation::new(4, 0)), Ok(()));
        assert_eq!(m.into_inner(), vec!['E', 'A', 'B', 'C', 'D']);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn apply_out_of_range_panics() {
        let mut m = abcde();
        m.apply(Permutation::new(9, 0));
    }

    #[test]
    fn remove_splices_item_out() {
        let mut m = abcde();
        assert_eq!(m.remove(1), 'B');
        assert_eq!(m.current(), ['A', 'C', 'D', 'E']);
        assert_eq!(m.remove(3), 'E');
        assert_eq!(m.current(), ['A', 'C', 'D']);
    }

    #[test]
    #[should_panic(expected = "out of range")]
    fn remove_out_of_range_panics() {
        let mut m = abcde();
        m.remove(5);
    }

    #[test]
    fn push_grows_model() {
        let mut m = ListModel::new();
        assert!(m.is_empty());
        m.push(1);
        m.push(2);
        assert_eq!(m.len(), 2);
        assert_eq!(m.current(), [1, 2]);
    }
}
