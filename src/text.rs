//! The text value used for words, terms and extracted document text.
//!
//! [`Text`] stores its characters as a `Vec<char>` so that every position and
//! length is measured in characters, and caches a small polynomial hash that
//! is recomputed whenever the content changes. The hash feeds the
//! [`TextHasher`] used by the dictionary and the hash-backed index.
//!
//! # Examples
//!
//! ```
//! use kensaku::text::Text;
//!
//! let text = Text::from("data structure");
//! assert_eq!(text.len(), 14);
//! assert_eq!(text.index_of(&Text::from("struct")).unwrap(), Some(5));
//! assert_eq!(text.substring(0, 4).unwrap(), Text::from("data"));
//! ```

use std::cmp::Ordering;
use std::fmt::{self, Write as _};
use std::hash::{Hash, Hasher};

use crate::collections::{BucketHasher, LinkedList};
use crate::error::{KensakuError, Result};

/// Inclusive lower bound of [`Text::hash_code`].
pub const HASH_MIN: u32 = 0;
/// Exclusive upper bound of [`Text::hash_code`].
pub const HASH_MAX: u32 = 100_019;

/// A character string with cached length and hash.
#[derive(Clone, Default)]
pub struct Text {
    chars: Vec<char>,
    hash: u32,
}

fn compute_hash(chars: &[char]) -> u32 {
    let sum = chars
        .iter()
        .fold(0u32, |h, &c| h.wrapping_mul(7).wrapping_add(c as u32));
    HASH_MIN + sum % (HASH_MAX - HASH_MIN)
}

/// Failure links for `pattern`, with links collapsed through positions whose
/// character equals the one at the link target.
fn failure_links(pattern: &[char]) -> Vec<isize> {
    let mut next = vec![-1isize; pattern.len()];
    let mut k: isize = -1;
    let mut j = 0usize;

    while j + 1 < pattern.len() {
        if k == -1 || pattern[j] == pattern[k as usize] {
            j += 1;
            k += 1;
            next[j] = k;
        } else {
            k = next[k as usize];
        }
    }

    for i in 1..pattern.len() {
        let link = next[i] as usize;
        if pattern[i] == pattern[link] {
            next[i] = next[link];
        }
    }

    next
}

impl Text {
    /// Create an empty text.
    pub fn new() -> Self {
        Text {
            chars: Vec::new(),
            hash: compute_hash(&[]),
        }
    }

    /// Create a text from a slice of characters.
    pub fn from_chars(chars: &[char]) -> Self {
        Text {
            chars: chars.to_vec(),
            hash: compute_hash(chars),
        }
    }

    fn refresh_hash(&mut self) {
        self.hash = compute_hash(&self.chars);
    }

    /// Length in characters.
    pub fn len(&self) -> usize {
        self.chars.len()
    }

    /// Check if the text is empty.
    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    /// Character at `index`, if in range.
    pub fn char_at(&self, index: usize) -> Option<char> {
        self.chars.get(index).copied()
    }

    /// The characters of the text.
    pub fn chars(&self) -> &[char] {
        &self.chars
    }

    /// Cached hash in `[HASH_MIN, HASH_MAX)`.
    pub fn hash_code(&self) -> u32 {
        self.hash
    }

    /// Index of the first occurrence of `pattern`, or `None` if it does not occur.
    ///
    /// Runs in `O(n + m)`. Fails with [`KensakuError::EmptyPattern`] when the
    /// pattern is empty.
    pub fn index_of(&self, pattern: &Text) -> Result<Option<usize>> {
        let pattern = pattern.chars();
        if pattern.is_empty() {
            return Err(KensakuError::EmptyPattern);
        }

        let next = failure_links(pattern);
        let mut i = 0usize;
        let mut j: isize = 0;

        while i < self.chars.len() {
            if j == -1 || self.chars[i] == pattern[j as usize] {
                i += 1;
                j += 1;
                if j as usize == pattern.len() {
                    return Ok(Some(i - pattern.len()));
                }
            } else {
                j = next[j as usize];
            }
        }

        Ok(None)
    }

    /// Check if `pattern` occurs in the text. An empty pattern is an error.
    pub fn contains(&self, pattern: &Text) -> Result<bool> {
        Ok(self.index_of(pattern)?.is_some())
    }

    /// Characters in `[left, right)`.
    ///
    /// Fails with [`KensakuError::OutOfRange`] when `left > right` or
    /// `right > len`.
    pub fn substring(&self, left: usize, right: usize) -> Result<Text> {
        if left > right || right > self.chars.len() {
            return Err(KensakuError::out_of_range(format!(
                "substring [{left}, {right}) of text with length {}",
                self.chars.len()
            )));
        }
        Ok(Text::from_chars(&self.chars[left..right]))
    }

    /// Append `other` to the end of the text.
    pub fn concat(&mut self, other: &Text) {
        if other.is_empty() {
            return;
        }
        self.chars.extend_from_slice(&other.chars);
        self.refresh_hash();
    }

    /// Replace the content with a copy of `other`.
    pub fn assign(&mut self, other: &Text) {
        self.chars.clear();
        self.chars.extend_from_slice(&other.chars);
        self.hash = other.hash;
    }

    /// Replace every occurrence of `from` with `to`.
    pub fn replace(&mut self, from: char, to: char) {
        for c in self.chars.iter_mut().filter(|c| **c == from) {
            *c = to;
        }
        self.refresh_hash();
    }

    /// Split on `delimiter`, skipping empty slices.
    pub fn split(&self, delimiter: char) -> LinkedList<Text> {
        self.chars
            .split(|c| *c == delimiter)
            .filter(|slice| !slice.is_empty())
            .map(Text::from_chars)
            .collect()
    }

    /// Whether `c` is one of space, tab, line feed, carriage return or NUL.
    pub fn is_space(c: char) -> bool {
        matches!(c, ' ' | '\t' | '\n' | '\r' | '\0')
    }

    /// Render the text as a `String`.
    pub fn as_string(&self) -> String {
        self.chars.iter().collect()
    }
}

impl From<&str> for Text {
    fn from(value: &str) -> Self {
        let chars: Vec<char> = value.chars().collect();
        let hash = compute_hash(&chars);
        Text { chars, hash }
    }
}

impl From<String> for Text {
    fn from(value: String) -> Self {
        Text::from(value.as_str())
    }
}

impl From<&[char]> for Text {
    fn from(value: &[char]) -> Self {
        Text::from_chars(value)
    }
}

impl PartialEq for Text {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash && self.chars == other.chars
    }
}

impl Eq for Text {}

impl PartialOrd for Text {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Text {
    fn cmp(&self, other: &Self) -> Ordering {
        self.chars.cmp(&other.chars)
    }
}

impl Hash for Text {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chars.hash(state);
    }
}

impl fmt::Display for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for c in &self.chars {
            f.write_char(*c)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Text {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.as_string())
    }
}

/// Buckets texts by their cached hash.
#[derive(Clone, Copy, Debug, Default)]
pub struct TextHasher;

impl BucketHasher<Text> for TextHasher {
    const MIN: usize = HASH_MIN as usize;
    const MAX: usize = HASH_MAX as usize;

    fn hash(&self, key: &Text) -> usize {
        key.hash_code() as usize
    }
}
