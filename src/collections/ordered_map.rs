//! AVL-balanced ordered map.
//!
//! [`OrderedMap`] is the foundation of the tree-backed inverted index, of the
//! corpus document table and of the per-document scratch sets used while
//! counting distinct words. Every node owns its subtrees and caches its
//! height, so every operation walks at most `1.44 * log2(n + 2)` levels.
//!
//! # Examples
//!
//! ```
//! use kensaku::collections::OrderedMap;
//!
//! let mut map = OrderedMap::new();
//! map.insert(3, "three");
//! map.insert(1, "one");
//! assert_eq!(map.insert(3, "THREE"), Some("three"));
//!
//! assert_eq!(map.get(&3), Some(&"THREE"));
//! assert_eq!(map.get(&2), None);
//! assert_eq!(map.keys().copied().collect::<Vec<_>>(), vec![1, 3]);
//! ```

use std::cmp::{Ordering, max};
use std::fmt;

use super::{Comparator, NaturalOrder};

type Link<K, V> = Option<Box<Node<K, V>>>;

struct Node<K, V> {
    key: K,
    value: V,
    left: Link<K, V>,
    right: Link<K, V>,
    height: usize,
}

impl<K, V> Node<K, V> {
    fn new(key: K, value: V) -> Self {
        Node {
            key,
            value,
            left: None,
            right: None,
            height: 1,
        }
    }

    fn update_height(&mut self) {
        self.height = 1 + max(height(&self.left), height(&self.right));
    }
}

fn height<K, V>(link: &Link<K, V>) -> usize {
    link.as_ref().map_or(0, |node| node.height)
}

/// Single right rotation, used when the left-left grandchild is too tall.
fn rotate_left_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut new_root) = node.left.take() else {
        return node;
    };
    node.left = new_root.right.take();
    node.update_height();
    new_root.right = Some(node);
    new_root.update_height();
    new_root
}

/// Single left rotation, used when the right-right grandchild is too tall.
fn rotate_right_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    let Some(mut new_root) = node.right.take() else {
        return node;
    };
    node.right = new_root.left.take();
    node.update_height();
    new_root.left = Some(node);
    new_root.update_height();
    new_root
}

fn rotate_left_right<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.left = node.left.take().map(rotate_right_right);
    rotate_left_left(node)
}

fn rotate_right_left<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.right = node.right.take().map(rotate_left_left);
    rotate_right_right(node)
}

/// Recompute the height of `node` and restore the AVL property at it.
///
/// A double rotation is chosen only when the taller child leans strictly
/// towards the inside; on insertion this is exactly the case where the new key
/// went into the inner grandchild.
fn rebalance<K, V>(mut node: Box<Node<K, V>>) -> Box<Node<K, V>> {
    node.update_height();
    let left = height(&node.left);
    let right = height(&node.right);

    if left >= right + 2 {
        let leans_inside = node
            .left
            .as_ref()
            .is_some_and(|child| height(&child.right) > height(&child.left));
        if leans_inside {
            rotate_left_right(node)
        } else {
            rotate_left_left(node)
        }
    } else if right >= left + 2 {
        let leans_inside = node
            .right
            .as_ref()
            .is_some_and(|child| height(&child.left) > height(&child.right));
        if leans_inside {
            rotate_right_left(node)
        } else {
            rotate_right_right(node)
        }
    } else {
        node
    }
}

fn insert_into<K, V, C: Comparator<K>>(
    link: Link<K, V>,
    key: K,
    value: V,
    comparator: &C,
    replaced: &mut Option<V>,
) -> Box<Node<K, V>> {
    let Some(mut node) = link else {
        return Box::new(Node::new(key, value));
    };

    match comparator.compare(&key, &node.key) {
        Ordering::Less => {
            node.left = Some(insert_into(
                node.left.take(),
                key,
                value,
                comparator,
                replaced,
            ));
        }
        Ordering::Greater => {
            node.right = Some(insert_into(
                node.right.take(),
                key,
                value,
                comparator,
                replaced,
            ));
        }
        Ordering::Equal => {
            *replaced = Some(std::mem::replace(&mut node.value, value));
            return node;
        }
    }

    rebalance(node)
}

/// Detach the maximum node of a subtree.
fn take_max<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, K, V) {
    match node.right.take() {
        None => {
            let Node {
                key, value, left, ..
            } = *node;
            (left, key, value)
        }
        Some(right) => {
            let (rest, key, value) = take_max(right);
            node.right = rest;
            (Some(rebalance(node)), key, value)
        }
    }
}

/// Detach the minimum node of a subtree.
fn take_min<K, V>(mut node: Box<Node<K, V>>) -> (Link<K, V>, K, V) {
    match node.left.take() {
        None => {
            let Node {
                key, value, right, ..
            } = *node;
            (right, key, value)
        }
        Some(left) => {
            let (rest, key, value) = take_min(left);
            node.left = rest;
            (Some(rebalance(node)), key, value)
        }
    }
}

fn remove_from<K, V, C: Comparator<K>>(
    link: Link<K, V>,
    key: &K,
    comparator: &C,
    removed: &mut Option<V>,
) -> Link<K, V> {
    let mut node = link?;

    match comparator.compare(key, &node.key) {
        Ordering::Less => {
            node.left = remove_from(node.left.take(), key, comparator, removed);
        }
        Ordering::Greater => {
            node.right = remove_from(node.right.take(), key, comparator, removed);
        }
        Ordering::Equal => match (node.left.take(), node.right.take()) {
            (Some(left), Some(right)) => {
                // Replace with the predecessor when the left side is at least as
                // tall, otherwise with the successor.
                if left.height >= right.height {
                    let (rest, pred_key, pred_value) = take_max(left);
                    node.left = rest;
                    node.right = Some(right);
                    node.key = pred_key;
                    *removed = Some(std::mem::replace(&mut node.value, pred_value));
                } else {
                    let (rest, succ_key, succ_value) = take_min(right);
                    node.left = Some(left);
                    node.right = rest;
                    node.key = succ_key;
                    *removed = Some(std::mem::replace(&mut node.value, succ_value));
                }
            }
            (Some(child), None) | (None, Some(child)) => {
                *removed = Some(node.value);
                return Some(child);
            }
            (None, None) => {
                *removed = Some(node.value);
                return None;
            }
        },
    }

    Some(rebalance(node))
}

/// A balanced binary search tree map ordered by a [`Comparator`].
///
/// Keys are unique: inserting an existing key overwrites its value. Lookups
/// that miss return `None` rather than a default value.
pub struct OrderedMap<K, V, C = NaturalOrder> {
    root: Link<K, V>,
    len: usize,
    comparator: C,
}

impl<K: Ord, V> OrderedMap<K, V, NaturalOrder> {
    /// Create an empty map ordered by `K`'s natural order.
    pub fn new() -> Self {
        Self::with_comparator(NaturalOrder)
    }
}

impl<K, V, C: Comparator<K>> OrderedMap<K, V, C> {
    /// Create an empty map ordered by `comparator`.
    pub fn with_comparator(comparator: C) -> Self {
        OrderedMap {
            root: None,
            len: 0,
            comparator,
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Height of the tree (0 when empty).
    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// Insert a record, returning the previous value for the key if any.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let mut replaced = None;
        let root = self.root.take();
        self.root = Some(insert_into(root, key, value, &self.comparator, &mut replaced));
        if replaced.is_none() {
            self.len += 1;
        }
        replaced
    }

    /// Value stored for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        let mut current = self.root.as_deref();
        while let Some(node) = current {
            match self.comparator.compare(key, &node.key) {
                Ordering::Less => current = node.left.as_deref(),
                Ordering::Greater => current = node.right.as_deref(),
                Ordering::Equal => return Some(&node.value),
            }
        }
        None
    }

    /// Locate the record for `key` for in-place modification.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let comparator = &self.comparator;
        let mut current = self.root.as_deref_mut();
        while let Some(node) = current {
            match comparator.compare(key, &node.key) {
                Ordering::Less => current = node.left.as_deref_mut(),
                Ordering::Greater => current = node.right.as_deref_mut(),
                Ordering::Equal => return Some(&mut node.value),
            }
        }
        None
    }

    /// Check if the map holds a record for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Remove the record for `key`, returning its value.
    ///
    /// Removing an absent key leaves the map untouched.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let mut removed = None;
        let root = self.root.take();
        self.root = remove_from(root, key, &self.comparator, &mut removed);
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    /// Entry with the smallest key.
    pub fn first(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(left) = node.left.as_deref() {
            node = left;
        }
        Some((&node.key, &node.value))
    }

    /// Entry with the largest key.
    pub fn last(&self) -> Option<(&K, &V)> {
        let mut node = self.root.as_deref()?;
        while let Some(right) = node.right.as_deref() {
            node = right;
        }
        Some((&node.key, &node.value))
    }

    /// Visit every record in key order.
    pub fn for_each_inorder<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self.iter() {
            visit(key, value);
        }
    }

    /// Iterate over records in key order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(self.root.as_deref());
        iter
    }

    /// Iterate over keys in order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.iter().map(|(key, _)| key)
    }

    /// Iterate over values in key order.
    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, value)| value)
    }

    /// Remove every record.
    pub fn clear(&mut self) {
        self.root = None;
        self.len = 0;
    }

    /// Consume the map into a key-ordered vector of records.
    pub fn into_sorted_vec(mut self) -> Vec<(K, V)> {
        let mut records = Vec::with_capacity(self.len);
        let mut stack: Vec<Box<Node<K, V>>> = Vec::new();
        let mut current = self.root.take();

        loop {
            while let Some(mut node) = current {
                current = node.left.take();
                stack.push(node);
            }
            let Some(node) = stack.pop() else {
                break;
            };
            let Node {
                key, value, right, ..
            } = *node;
            records.push((key, value));
            current = right;
        }

        records
    }
}

impl<K: Ord, V> Default for OrderedMap<K, V, NaturalOrder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: fmt::Debug, V: fmt::Debug, C: Comparator<K>> fmt::Debug for OrderedMap<K, V, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<K: Ord, V> FromIterator<(K, V)> for OrderedMap<K, V, NaturalOrder> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = OrderedMap::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

impl<'a, K, V, C: Comparator<K>> IntoIterator for &'a OrderedMap<K, V, C> {
    type Item = (&'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// In-order iterator over an [`OrderedMap`].
pub struct Iter<'a, K, V> {
    stack: Vec<&'a Node<K, V>>,
}

impl<'a, K, V> Iter<'a, K, V> {
    fn push_left(&mut self, mut node: Option<&'a Node<K, V>>) {
        while let Some(current) = node {
            self.stack.push(current);
            node = current.left.as_deref();
        }
    }
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(node.right.as_deref());
        Some((&node.key, &node.value))
    }
}
