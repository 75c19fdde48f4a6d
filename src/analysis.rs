//! Text analysis: dictionaries, word segmentation and tokenizers.
//!
//! Document text is split into words by the [`DictionarySegmenter`], which
//! matches against a [`Dictionary`] loaded from word-list files. Query lines
//! are split by the [`WhitespaceTokenizer`]. Both implement [`Tokenizer`].

pub mod dictionary;
pub mod segmenter;
pub mod stop_chars;
pub mod token;
pub mod tokenizer;

pub use dictionary::Dictionary;
pub use segmenter::DictionarySegmenter;
pub use stop_chars::{DEFAULT_CJK_STOP_CHARS, StopChars};
pub use token::{Token, TokenStream};
pub use tokenizer::Tokenizer;
pub use tokenizer::whitespace::WhitespaceTokenizer;
