//! Separate-chaining hash map with a fixed bucket range.
//!
//! The bucket array is sized once from the hasher's `[MIN, MAX)` range and
//! never grows. Each bucket is a [`LinkedList`] of entries scanned linearly.

use std::fmt;

use super::linked_list::{self, LinkedList};

/// Maps a key into the bucket range `[MIN, MAX)`.
pub trait BucketHasher<K: ?Sized> {
    /// Inclusive lower bound of produced hashes.
    const MIN: usize;
    /// Exclusive upper bound of produced hashes.
    const MAX: usize;

    /// Hash a key. The result must lie in `[MIN, MAX)`.
    fn hash(&self, key: &K) -> usize;
}

/// Hasher for integer document ids: `id mod 100000`.
#[derive(Clone, Copy, Debug, Default)]
pub struct IntHasher;

impl IntHasher {
    pub const BUCKETS: usize = 100_000;
}

macro_rules! impl_int_hasher {
    ($($ty:ty),*) => {
        $(
            impl BucketHasher<$ty> for IntHasher {
                const MIN: usize = 0;
                const MAX: usize = IntHasher::BUCKETS;

                fn hash(&self, key: &$ty) -> usize {
                    (*key as u64 % IntHasher::BUCKETS as u64) as usize
                }
            }
        )*
    };
}

impl_int_hasher!(u8, u16, u32, u64, usize);

struct Entry<K, V> {
    key: K,
    value: V,
}

/// A hash map whose buckets are linked lists of key/value entries.
///
/// A key appears at most once across all buckets.
pub struct ChainedHashMap<K, V, H> {
    buckets: Vec<LinkedList<Entry<K, V>>>,
    hasher: H,
    len: usize,
}

impl<K: PartialEq, V, H: BucketHasher<K> + Default> ChainedHashMap<K, V, H> {
    /// Create an empty map using the hasher's default value.
    pub fn new() -> Self {
        Self::with_hasher(H::default())
    }
}

impl<K: PartialEq, V, H: BucketHasher<K>> ChainedHashMap<K, V, H> {
    /// Create an empty map with `H::MAX - H::MIN` buckets.
    pub fn with_hasher(hasher: H) -> Self {
        let bucket_count = H::MAX.saturating_sub(H::MIN).max(1);
        let mut buckets = Vec::with_capacity(bucket_count);
        buckets.resize_with(bucket_count, LinkedList::new);
        ChainedHashMap {
            buckets,
            hasher,
            len: 0,
        }
    }

    fn bucket_index(&self, key: &K) -> usize {
        (self.hasher.hash(key).saturating_sub(H::MIN)) % self.buckets.len()
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of buckets.
    pub fn bucket_count(&self) -> usize {
        self.buckets.len()
    }

    /// Insert a record, replacing and returning the value of an equal key.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        let index = self.bucket_index(&key);
        let bucket = &mut self.buckets[index];
        if let Some(entry) = bucket.first_of_mut(|entry| entry.key == key) {
            return Some(std::mem::replace(&mut entry.value, value));
        }
        bucket.append(Entry { key, value });
        self.len += 1;
        None
    }

    /// Value stored for `key`.
    pub fn get(&self, key: &K) -> Option<&V> {
        self.buckets[self.bucket_index(key)]
            .first_of(|entry| entry.key == *key)
            .map(|entry| &entry.value)
    }

    /// Locate the record for `key` for in-place modification.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut V> {
        let index = self.bucket_index(key);
        self.buckets[index]
            .first_of_mut(|entry| entry.key == *key)
            .map(|entry| &mut entry.value)
    }

    /// Check if the map holds a record for `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Remove the record for `key`, returning its value.
    pub fn remove(&mut self, key: &K) -> Option<V> {
        let index = self.bucket_index(key);
        let removed = self.buckets[index].remove_first_of(|entry| entry.key == *key)?;
        self.len -= 1;
        Some(removed.value)
    }

    /// Visit every record in bucket order.
    pub fn for_each<F>(&self, mut visit: F)
    where
        F: FnMut(&K, &V),
    {
        for (key, value) in self.iter() {
            visit(key, value);
        }
    }

    /// Iterate over records in bucket order.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            buckets: self.buckets.iter(),
            current: None,
        }
    }

    /// Remove every record, keeping the bucket array.
    pub fn clear(&mut self) {
        for bucket in &mut self.buckets {
            bucket.clear();
        }
        self.len = 0;
    }
}

impl<K: PartialEq, V, H: BucketHasher<K> + Default> Default for ChainedHashMap<K, V, H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> fmt::Debug for ChainedHashMap<K, V, H>
where
    K: PartialEq + fmt::Debug,
    V: fmt::Debug,
    H: BucketHasher<K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

/// Iterator over a [`ChainedHashMap`] in bucket order.
pub struct Iter<'a, K, V> {
    buckets: std::slice::Iter<'a, LinkedList<Entry<K, V>>>,
    current: Option<linked_list::Iter<'a, Entry<K, V>>>,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(entry) = self.current.as_mut().and_then(Iterator::next) {
                return Some((&entry.key, &entry.value));
            }
            let bucket = self.buckets.next()?;
            self.current = Some(bucket.iter());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Collides every key into a handful of buckets.
    #[derive(Default)]
    struct TinyHasher;

    impl BucketHasher<u32> for TinyHasher {
        const MIN: usize = 10;
        const MAX: usize = 14;

        fn hash(&self, key: &u32) -> usize {
            10 + (*key as usize % 4)
        }
    }

    #[test]
    fn test_insert_get_replace() {
        let mut map: ChainedHashMap<u32, &str, IntHasher> = ChainedHashMap::new();
        assert_eq!(map.bucket_count(), 100_000);
        assert_eq!(map.insert(7, "seven"), None);
        assert_eq!(map.insert(100_007, "far"), None);
        assert_eq!(map.insert(7, "SEVEN"), Some("seven"));

        assert_eq!(map.get(&7), Some(&"SEVEN"));
        assert_eq!(map.get(&100_007), Some(&"far"));
        assert_eq!(map.get(&8), None);
        assert_eq!(map.len(), 2);
    }

    #[test]
    fn test_collisions_and_remove() {
        let mut map: ChainedHashMap<u32, u32, TinyHasher> = ChainedHashMap::new();
        assert_eq!(map.bucket_count(), 4);
        for key in 0..20 {
            map.insert(key, key * 10);
        }
        assert_eq!(map.len(), 20);

        assert_eq!(map.remove(&8), Some(80));
        assert_eq!(map.remove(&8), None);
        assert!(!map.contains_key(&8));
        assert!(map.contains_key(&12));

        if let Some(value) = map.get_mut(&12) {
            *value += 1;
        }
        assert_eq!(map.get(&12), Some(&121));
        assert_eq!(map.len(), 19);
    }

    #[test]
    fn test_traversal_in_bucket_order() {
        let mut map: ChainedHashMap<u32, (), TinyHasher> = ChainedHashMap::new();
        for key in [5, 2, 1, 4] {
            map.insert(key, ());
        }

        let mut keys = Vec::new();
        map.for_each(|key, _| keys.push(*key));
        // bucket 1 holds 5 then 1, bucket 2 holds 2, bucket 0 holds 4
        assert_eq!(keys, vec![4, 5, 1, 2]);
        assert_eq!(map.iter().count(), 4);
    }

    #[test]
    fn test_clear() {
        let mut map: ChainedHashMap<u32, u32, TinyHasher> = ChainedHashMap::new();
        map.insert(1, 1);
        map.clear();
        assert!(map.is_empty());
        assert_eq!(map.get(&1), None);
    }
}
