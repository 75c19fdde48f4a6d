//! Singly linked list with exclusively owned nodes.
//!
//! Used as the bucket type of [`ChainedHashMap`](super::ChainedHashMap) and as
//! the accumulation buffer of the dictionary segmenter, which builds its
//! output by prepending.

use std::fmt;

use crate::error::{KensakuError, Result};

struct Node<T> {
    element: T,
    next: Option<Box<Node<T>>>,
}

/// A singly linked list with a cached length.
pub struct LinkedList<T> {
    head: Option<Box<Node<T>>>,
    len: usize,
}

impl<T> LinkedList<T> {
    /// Create an empty list.
    pub fn new() -> Self {
        LinkedList { head: None, len: 0 }
    }

    /// Number of elements in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the list is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert an element at the front.
    pub fn push_front(&mut self, element: T) {
        let next = self.head.take();
        self.head = Some(Box::new(Node { element, next }));
        self.len += 1;
    }

    /// Remove and return the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        self.head.take().map(|node| {
            let node = *node;
            self.head = node.next;
            self.len -= 1;
            node.element
        })
    }

    /// Append an element at the end.
    pub fn append(&mut self, element: T) {
        let slot = self.slot_at(self.len);
        *slot = Some(Box::new(Node {
            element,
            next: None,
        }));
        self.len += 1;
    }

    /// Insert an element so that it ends up at position `index`.
    ///
    /// Fails if `index > len`.
    pub fn insert_at(&mut self, element: T, index: usize) -> Result<()> {
        if index > self.len {
            return Err(KensakuError::out_of_range(format!(
                "insert position {index} exceeds list length {}",
                self.len
            )));
        }

        let slot = self.slot_at(index);
        let next = slot.take();
        *slot = Some(Box::new(Node { element, next }));
        self.len += 1;
        Ok(())
    }

    /// Remove the element at `index` and return it.
    ///
    /// Fails if `index >= len`.
    pub fn remove_at(&mut self, index: usize) -> Result<T> {
        if index >= self.len {
            return Err(KensakuError::out_of_range(format!(
                "remove position {index} outside list of length {}",
                self.len
            )));
        }

        let slot = self.slot_at(index);
        let removed = match slot.take() {
            Some(node) => *node,
            None => {
                return Err(KensakuError::other("list length out of sync with nodes"));
            }
        };
        *slot = removed.next;
        self.len -= 1;
        Ok(removed.element)
    }

    /// Get the element at `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.iter().nth(index)
    }

    /// Get a mutable reference to the element at `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.iter_mut().nth(index)
    }

    /// First element satisfying the predicate.
    pub fn first_of<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|element| predicate(element))
    }

    /// Mutable reference to the first element satisfying the predicate.
    pub fn first_of_mut<P>(&mut self, mut predicate: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter_mut().find(|element| predicate(element))
    }

    /// Position of the first element satisfying the predicate.
    pub fn position_of<P>(&self, predicate: P) -> Option<usize>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().position(predicate)
    }

    /// Check if any element satisfies the predicate.
    pub fn contains_if<P>(&self, predicate: P) -> bool
    where
        P: FnMut(&T) -> bool,
    {
        self.position_of(predicate).is_some()
    }

    /// Remove the first element satisfying the predicate.
    ///
    /// Nothing happens (and `None` is returned) when no element matches.
    pub fn remove_first_of<P>(&mut self, mut predicate: P) -> Option<T>
    where
        P: FnMut(&T) -> bool,
    {
        let mut cursor = &mut self.head;
        while cursor
            .as_ref()
            .is_some_and(|node| !predicate(&node.element))
        {
            if let Some(node) = cursor {
                cursor = &mut node.next;
            }
        }

        let removed = *cursor.take()?;
        *cursor = removed.next;
        self.len -= 1;
        Some(removed.element)
    }

    /// Insert `element` before the first existing element for which
    /// `predicate(existing, &element)` holds, or at the end when none does.
    pub fn insert_before<P>(&mut self, element: T, mut predicate: P)
    where
        P: FnMut(&T, &T) -> bool,
    {
        let mut cursor = &mut self.head;
        while cursor
            .as_ref()
            .is_some_and(|node| !predicate(&node.element, &element))
        {
            if let Some(node) = cursor {
                cursor = &mut node.next;
            }
        }

        let next = cursor.take();
        *cursor = Some(Box::new(Node { element, next }));
        self.len += 1;
    }

    /// Iterate over the elements from front to back.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            next: self.head.as_deref(),
        }
    }

    /// Iterate mutably over the elements from front to back.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut {
            next: self.head.as_deref_mut(),
        }
    }

    /// Remove every element.
    pub fn clear(&mut self) {
        let mut next = self.head.take();
        while let Some(mut node) = next {
            next = node.next.take();
        }
        self.len = 0;
    }

    /// The link slot that currently holds position `index` (`index <= len`).
    fn slot_at(&mut self, index: usize) -> &mut Option<Box<Node<T>>> {
        let mut slot = &mut self.head;
        let mut position = 0;
        while position < index {
            if let Some(node) = slot {
                slot = &mut node.next;
                position += 1;
            } else {
                break;
            }
        }
        slot
    }
}

impl<T: PartialEq> LinkedList<T> {
    /// Position of the first element equal to `element`.
    pub fn index_of(&self, element: &T) -> Option<usize> {
        self.position_of(|item| item == element)
    }

    /// Check if the list contains `element`.
    pub fn contains(&self, element: &T) -> bool {
        self.index_of(element).is_some()
    }
}

impl<T> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for LinkedList<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T: Clone> Clone for LinkedList<T> {
    fn clone(&self) -> Self {
        self.iter().cloned().collect()
    }
}

impl<T: fmt::Debug> fmt::Debug for LinkedList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: PartialEq> PartialEq for LinkedList<T> {
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T> FromIterator<T> for LinkedList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = LinkedList::new();
        let mut slot = &mut list.head;
        for element in iter {
            let node = slot.insert(Box::new(Node {
                element,
                next: None,
            }));
            slot = &mut node.next;
            list.len += 1;
        }
        list
    }
}

/// Borrowing iterator over a [`LinkedList`].
pub struct Iter<'a, T> {
    next: Option<&'a Node<T>>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.map(|node| {
            self.next = node.next.as_deref();
            &node.element
        })
    }
}

/// Mutable iterator over a [`LinkedList`].
pub struct IterMut<'a, T> {
    next: Option<&'a mut Node<T>>,
}

impl<'a, T> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.next.take().map(|node| {
            self.next = node.next.as_deref_mut();
            &mut node.element
        })
    }
}

/// Owning iterator over a [`LinkedList`].
pub struct IntoIter<T>(LinkedList<T>);

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop_front()
    }
}

impl<T> IntoIterator for LinkedList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl<'a, T> IntoIterator for &'a LinkedList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
