//! Reverse maximum-match word segmentation.
//!
//! Scanning from the right end of the input, the segmenter repeatedly takes
//! the longest suffix (at least two characters, at most the dictionary's
//! longest word) that is a dictionary word. When no suffix matches, the last
//! character becomes a one-character word unless it is a stop character.
//!
//! ```text
//! "datastructureproject"   dictionary {data, structure, project}
//!                  ^^^^^^^ project
//!         ^^^^^^^^^        structure
//!     ^^^^                 data
//! ```

use std::sync::Arc;

use super::dictionary::Dictionary;
use super::stop_chars::StopChars;
use super::token::{IntoTokenStream, Token, TokenStream};
use super::tokenizer::Tokenizer;
use crate::collections::LinkedList;
use crate::error::Result;
use crate::text::Text;

/// Dictionary-driven segmenter shared by all indexing workers.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
///
/// use kensaku::analysis::dictionary::Dictionary;
/// use kensaku::analysis::segmenter::DictionarySegmenter;
/// use kensaku::text::Text;
///
/// let mut dictionary = Dictionary::new();
/// dictionary.add_words(["data", "structure", "project"]);
/// let segmenter = DictionarySegmenter::new(Arc::new(dictionary));
///
/// let words: Vec<String> = segmenter
///     .segment(&Text::from("datastructureproject"))
///     .iter()
///     .map(Text::as_string)
///     .collect();
/// assert_eq!(words, vec!["data", "structure", "project"]);
/// ```
#[derive(Clone, Debug)]
pub struct DictionarySegmenter {
    dictionary: Arc<Dictionary>,
    stop_chars: StopChars,
}

impl DictionarySegmenter {
    /// Create a segmenter with the default stop characters.
    pub fn new(dictionary: Arc<Dictionary>) -> Self {
        Self::with_stop_chars(dictionary, StopChars::default())
    }

    /// Create a segmenter with a custom stop-character set.
    pub fn with_stop_chars(dictionary: Arc<Dictionary>, stop_chars: StopChars) -> Self {
        DictionarySegmenter {
            dictionary,
            stop_chars,
        }
    }

    /// The dictionary in use.
    pub fn dictionary(&self) -> &Dictionary {
        &self.dictionary
    }

    /// Split `sentence` into words, in left-to-right order.
    pub fn segment(&self, sentence: &Text) -> LinkedList<Text> {
        let chars = sentence.chars();
        let mut words = LinkedList::new();
        self.scan(chars, |start, end| {
            words.push_front(Text::from_chars(&chars[start..end]));
        });
        words
    }

    /// Walk `chars` right to left, reporting each word span as it is found.
    fn scan<F>(&self, chars: &[char], mut emit: F)
    where
        F: FnMut(usize, usize),
    {
        let mut right = chars.len();

        while right > 0 {
            let longest = self.dictionary.max_word_length().min(right);
            let matched = (2..=longest).rev().find(|&length| {
                self.dictionary
                    .contains(&Text::from_chars(&chars[right - length..right]))
            });

            match matched {
                Some(length) => {
                    emit(right - length, right);
                    right -= length;
                }
                None => {
                    if !self.stop_chars.is_stop(chars[right - 1]) {
                        emit(right - 1, right);
                    }
                    right -= 1;
                }
            }
        }
    }
}

impl Tokenizer for DictionarySegmenter {
    /// Tokens carry character offsets into `text`.
    fn tokenize(&self, text: &str) -> Result<TokenStream> {
        let chars: Vec<char> = text.chars().collect();
        let mut spans = Vec::new();
        self.scan(&chars, |start, end| spans.push((start, end)));

        let tokens: Vec<Token> = spans
            .into_iter()
            .rev()
            .enumerate()
            .map(|(position, (start, end))| {
                let word: String = chars[start..end].iter().collect();
                Token::with_offsets(word, position, start, end)
            })
            .collect();

        Ok(tokens.into_token_stream())
    }

    fn name(&self) -> &'static str {
        "dictionary"
    }
}
