//! Integration tests for dictionary loading and segmentation.

use std::io::Write;
use std::sync::Arc;

use tempfile::NamedTempFile;

use kensaku::analysis::{Dictionary, DictionarySegmenter, StopChars, Tokenizer};
use kensaku::error::Result;
use kensaku::text::Text;

fn words(segmenter: &DictionarySegmenter, text: &str) -> Vec<String> {
    segmenter
        .segment(&Text::from(text))
        .iter()
        .map(Text::as_string)
        .collect()
}

#[test]
fn test_segment_with_dictionary_file() -> Result<()> {
    let mut file = NamedTempFile::new()?;
    writeln!(file, "data")?;
    writeln!(file, "structure")?;
    writeln!(file)?;
    writeln!(file, "  project  ")?;
    file.flush()?;

    let mut dictionary = Dictionary::new();
    assert_eq!(dictionary.add_file(file.path())?, 3);
    assert_eq!(dictionary.max_word_length(), 9);

    let segmenter = DictionarySegmenter::new(Arc::new(dictionary));
    assert_eq!(
        words(&segmenter, "datastructureproject"),
        vec!["data", "structure", "project"]
    );

    Ok(())
}

#[test]
fn test_unknown_characters_and_stop_characters() -> Result<()> {
    let mut dictionary = Dictionary::new();
    dictionary.add_words(["挖掘机", "维修"]);
    let dictionary = Arc::new(dictionary);

    let segmenter = DictionarySegmenter::new(dictionary.clone());
    assert_eq!(
        words(&segmenter, "《挖掘机》维修，好 ok"),
        vec!["挖掘机", "维修", "好"]
    );

    // replacing the punctuation list keeps ASCII and whitespace as stops
    let segmenter = DictionarySegmenter::with_stop_chars(dictionary, StopChars::new(['好']));
    assert_eq!(
        words(&segmenter, "《挖掘机》维修，好 ok"),
        vec!["《", "挖掘机", "》", "维修", "，"]
    );

    Ok(())
}

#[test]
fn test_tokenizer_offsets() -> Result<()> {
    let mut dictionary = Dictionary::new();
    dictionary.add_words(["数据", "结构"]);
    let segmenter = DictionarySegmenter::new(Arc::new(dictionary));

    let tokens: Vec<_> = segmenter.tokenize("数据，结构")?.collect();
    let spans: Vec<(String, usize, usize)> = tokens
        .iter()
        .map(|t| (t.text.clone(), t.start_offset, t.end_offset))
        .collect();
    assert_eq!(
        spans,
        vec![
            ("数据".to_string(), 0, 2),
            ("结构".to_string(), 3, 5),
        ]
    );
    assert_eq!(segmenter.name(), "dictionary");

    Ok(())
}
