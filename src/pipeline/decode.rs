//! Character-entity decoding of extracted page text.

use std::fmt;

/// Turns raw extracted text into plain text.
pub trait Decoder: Send + Sync + fmt::Debug {
    fn decode(&self, text: &str) -> String;
}

/// Passes text through unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityDecoder;

impl Decoder for IdentityDecoder {
    fn decode(&self, text: &str) -> String {
        text.to_string()
    }
}

/// Decodes the common named entities and numeric character references.
///
/// Unknown or malformed references are left as they are.
///
/// # Examples
///
/// ```
/// use kensaku::pipeline::{Decoder, EntityDecoder};
///
/// let decoder = EntityDecoder;
/// assert_eq!(decoder.decode("a&amp;b &#25968;&#x636E; &bogus;"), "a&b 数据 &bogus;");
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct EntityDecoder;

/// Longest reference body considered, e.g. `#x10FFFF`.
const MAX_ENTITY_LEN: usize = 10;

impl EntityDecoder {
    fn lookup(entity: &str) -> Option<char> {
        match entity {
            "amp" => Some('&'),
            "lt" => Some('<'),
            "gt" => Some('>'),
            "quot" => Some('"'),
            "apos" => Some('\''),
            "nbsp" => Some('\u{a0}'),
            _ => {
                let number = entity.strip_prefix('#')?;
                let code = match number.strip_prefix(['x', 'X']) {
                    Some(hex) => u32::from_str_radix(hex, 16).ok()?,
                    None => number.parse::<u32>().ok()?,
                };
                char::from_u32(code)
            }
        }
    }
}

impl Decoder for EntityDecoder {
    fn decode(&self, text: &str) -> String {
        let mut decoded = String::with_capacity(text.len());
        let mut rest = text;

        while let Some(amp) = rest.find('&') {
            decoded.push_str(&rest[..amp]);
            let after = &rest[amp + 1..];
            // Only a `;` within reach can end a reference.
            let replacement = after
                .char_indices()
                .take(MAX_ENTITY_LEN + 1)
                .find(|&(_, c)| c == ';')
                .and_then(|(end, _)| Self::lookup(&after[..end]).map(|c| (c, end)));

            match replacement {
                Some((c, end)) => {
                    decoded.push(c);
                    rest = &after[end + 1..];
                }
                None => {
                    decoded.push('&');
                    rest = after;
                }
            }
        }
        decoded.push_str(rest);
        decoded
    }
}
