//! Characters the segmenter never emits as single-character words.

/// Full-width and CJK punctuation treated as stop characters by default.
pub const DEFAULT_CJK_STOP_CHARS: &[char] = &[
    '·', '！', '￥', '…', '（', '）', '—', '【', '】', '、', '；', '：', '‘', '’', '“', '”',
    '，', '。', '《', '》', '？',
];

/// Stop-character classification.
///
/// Whitespace and control characters, ASCII letters, digits and punctuation,
/// and the no-break space are always stop characters. The remaining list is
/// configurable and defaults to [`DEFAULT_CJK_STOP_CHARS`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct StopChars {
    extra: Vec<char>,
}

impl StopChars {
    /// Use `extra` in place of the default punctuation list.
    pub fn new<I: IntoIterator<Item = char>>(extra: I) -> Self {
        let mut extra: Vec<char> = extra.into_iter().collect();
        extra.sort_unstable();
        extra.dedup();
        StopChars { extra }
    }

    /// Check if `c` is a stop character.
    pub fn is_stop(&self, c: char) -> bool {
        c.is_whitespace()
            || c.is_control()
            || c.is_ascii_alphanumeric()
            || c.is_ascii_punctuation()
            || c == '\u{a0}'
            || self.extra.binary_search(&c).is_ok()
    }

    /// The configurable part of the set, sorted.
    pub fn extra(&self) -> &[char] {
        &self.extra
    }
}

impl Default for StopChars {
    fn default() -> Self {
        StopChars::new(DEFAULT_CJK_STOP_CHARS.iter().copied())
    }
}
