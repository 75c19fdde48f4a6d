//! Word list used by the segmenter.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::info;

use crate::collections::ChainedHashMap;
use crate::error::Result;
use crate::text::{Text, TextHasher};

/// A set of known words, bucketed by [`Text`] hash.
///
/// # Examples
///
/// ```
/// use kensaku::analysis::dictionary::Dictionary;
/// use kensaku::text::Text;
///
/// let mut dictionary = Dictionary::new();
/// dictionary.add_words(["数据", "数据结构"]);
/// assert!(dictionary.contains(&Text::from("数据")));
/// assert_eq!(dictionary.max_word_length(), 4);
/// ```
pub struct Dictionary {
    words: ChainedHashMap<Text, (), TextHasher>,
    max_word_length: usize,
}

impl Dictionary {
    /// Create an empty dictionary.
    pub fn new() -> Self {
        Dictionary {
            words: ChainedHashMap::new(),
            max_word_length: 1,
        }
    }

    /// Add a word. Returns `false` if it was already present or is empty.
    pub fn add_word(&mut self, word: Text) -> bool {
        if word.is_empty() {
            return false;
        }
        self.max_word_length = self.max_word_length.max(word.len());
        self.words.insert(word, ()).is_none()
    }

    /// Add every word of an iterator. Returns the number of new words.
    pub fn add_words<I, S>(&mut self, words: I) -> usize
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        words
            .into_iter()
            .filter(|word| {
                let word: &str = word.as_ref();
                self.add_word(Text::from(word))
            })
            .count()
    }

    /// Add one word per line from `reader`.
    ///
    /// Surrounding whitespace (including a trailing `\r`) is trimmed and blank
    /// lines are skipped.
    pub fn add_reader<R: BufRead>(&mut self, reader: R) -> Result<usize> {
        let mut added = 0;
        for line in reader.lines() {
            let line = line?;
            let word = line.trim();
            if !word.is_empty() && self.add_word(Text::from(word)) {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Add one word per line from the file at `path`.
    pub fn add_file<P: AsRef<Path>>(&mut self, path: P) -> Result<usize> {
        let path = path.as_ref();
        let added = self.add_reader(BufReader::new(File::open(path)?))?;
        info!(
            "Loaded {} words from {} (dictionary size {}, longest word {})",
            added,
            path.display(),
            self.len(),
            self.max_word_length
        );
        Ok(added)
    }

    /// Check if `word` is in the dictionary.
    pub fn contains(&self, word: &Text) -> bool {
        self.words.contains_key(word)
    }

    /// Longest word length in characters (at least 1).
    pub fn max_word_length(&self) -> usize {
        self.max_word_length
    }

    /// Number of distinct words.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the dictionary holds no words.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Dictionary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dictionary")
            .field("len", &self.len())
            .field("max_word_length", &self.max_word_length)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::io::Write;

    use tempfile::NamedTempFile;

    #[test]
    fn test_new_dictionary() {
        let dictionary = Dictionary::new();
        assert!(dictionary.is_empty());
        assert_eq!(dictionary.max_word_length(), 1);
        assert!(!dictionary.contains(&Text::from("a")));
    }

    #[test]
    fn test_add_words() {
        let mut dictionary = Dictionary::new();
        assert_eq!(dictionary.add_words(["data", "structure", "data", ""]), 2);
        assert_eq!(dictionary.len(), 2);
        assert_eq!(dictionary.max_word_length(), 9);
        assert!(dictionary.contains(&Text::from("structure")));
        assert!(!dictionary.contains(&Text::from("struct")));
    }

    #[test]
    fn test_add_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "数据\r\n结构\n\n  项目  \r\n数据").unwrap();

        let mut dictionary = Dictionary::new();
        assert_eq!(dictionary.add_file(file.path()).unwrap(), 3);
        assert!(dictionary.contains(&Text::from("项目")));
        assert!(dictionary.contains(&Text::from("结构")));
        assert_eq!(dictionary.max_word_length(), 2);
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let mut dictionary = Dictionary::new();
        let result = dictionary.add_file("/nonexistent/dictionary.txt");
        assert!(matches!(result, Err(crate::error::KensakuError::Io(_))));
    }
}
