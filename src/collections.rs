//! Generic containers used by the text, analysis and index layers.
//!
//! - [`LinkedList`]: singly linked list with positional and predicate operations
//! - [`SortedList`]: linked list kept ordered by a [`Comparator`]
//! - [`OrderedMap`]: AVL-balanced ordered map
//! - [`ChainedHashMap`]: fixed-size separate-chaining hash map

use std::cmp::Ordering;

pub mod hash_map;
pub mod linked_list;
pub mod ordered_map;
pub mod sorted_list;

pub use hash_map::{BucketHasher, ChainedHashMap, IntHasher};
pub use linked_list::LinkedList;
pub use ordered_map::OrderedMap;
pub use sorted_list::SortedList;

/// A total order over `T` supplied by the caller.
pub trait Comparator<T: ?Sized> {
    /// Compare two values.
    fn compare(&self, a: &T, b: &T) -> Ordering;
}

/// Orders values by their [`Ord`] implementation.
#[derive(Clone, Copy, Debug, Default)]
pub struct NaturalOrder;

impl<T: Ord + ?Sized> Comparator<T> for NaturalOrder {
    fn compare(&self, a: &T, b: &T) -> Ordering {
        a.cmp(b)
    }
}
