//! A singly linked list that keeps its elements ordered by a comparator.

use std::cmp::Ordering;
use std::fmt;

use super::linked_list::{self, LinkedList};
use super::{Comparator, NaturalOrder};

/// A linked list which stays sorted on every insertion and modification.
///
/// Elements comparing equal keep their insertion order.
pub struct SortedList<T, C = NaturalOrder> {
    list: LinkedList<T>,
    comparator: C,
}

impl<T, C: Comparator<T> + Default> SortedList<T, C> {
    /// Create an empty list using the comparator's default value.
    pub fn new() -> Self {
        Self::with_comparator(C::default())
    }
}

impl<T, C: Comparator<T>> SortedList<T, C> {
    /// Create an empty list ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        SortedList {
            list: LinkedList::new(),
            comparator,
        }
    }

    /// Number of elements.
    pub fn len(&self) -> usize {
        self.list.len()
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.list.is_empty()
    }

    /// Insert an element at its ordered position.
    pub fn insert(&mut self, element: T) {
        let comparator = &self.comparator;
        self.list.insert_before(element, |existing, inserting| {
            comparator.compare(existing, inserting) == Ordering::Greater
        });
    }

    /// First element satisfying the predicate.
    pub fn first_of<P>(&self, predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.list.first_of(predicate)
    }

    /// Position of the first element satisfying the predicate.
    pub fn position_of<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.list.position_of(predicate)
    }

    /// Remove the first element satisfying the predicate.
    pub fn remove_first_of<P>(&mut self, predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        self.list.remove_first_of(predicate)
    }

    /// Apply `modification` to the first element satisfying the predicate and
    /// move it to the position its new value sorts to.
    ///
    /// Returns `false` when no element matched.
    pub fn modify_first_of<P, M>(&mut self, predicate: P, modification: M) -> bool
    where
        P: FnMut(&T) -> bool,
        M: FnOnce(&mut T),
    {
        match self.list.remove_first_of(predicate) {
            Some(mut element) => {
                modification(&mut element);
                self.insert(element);
                true
            }
            None => false,
        }
    }

    /// The smallest element according to the comparator.
    pub fn first(&self) -> Option<&T> {
        self.list.get(0)
    }

    /// Iterate in sorted order.
    pub fn iter(&self) -> linked_list::Iter<'_, T> {
        self.list.iter()
    }
}

impl<T, C: Comparator<T> + Default> Default for SortedList<T, C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone, C: Clone> Clone for SortedList<T, C> {
    fn clone(&self) -> Self {
        SortedList {
            list: self.list.clone(),
            comparator: self.comparator.clone(),
        }
    }
}

impl<T: fmt::Debug, C> fmt::Debug for SortedList<T, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.list.iter()).finish()
    }
}

impl<'a, T, C: Comparator<T>> IntoIterator for &'a SortedList<T, C> {
    type Item = &'a T;
    type IntoIter = linked_list::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<T, C> IntoIterator for SortedList<T, C> {
    type Item = T;
    type IntoIter = linked_list::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.list.into_iter()
    }
}
