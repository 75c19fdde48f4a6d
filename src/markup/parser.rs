//! Single-pass markup parser with an explicit open-element stack.

use log::trace;

use super::is_void_element;
use super::node::{Element, MarkupNode};
use crate::text::Text;

/// Parses raw markup into a [`MarkupNode`] tree.
///
/// # Examples
///
/// ```
/// use kensaku::markup::MarkupParser;
///
/// // `<p>` is never closed and `</span>` was never opened.
/// let root = MarkupParser::parse("<div id=\"pt\"><p>text</span></div>");
/// assert_eq!(root.element_count(), 3);
/// assert_eq!(root.navigate(&[0, 0, 0]).and_then(|n| n.name()), None);
/// ```
#[derive(Clone, Copy, Debug, Default)]
pub struct MarkupParser;

struct Scanner {
    chars: Vec<char>,
    pos: usize,
}

impl Scanner {
    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn skip_spaces(&mut self) {
        while self.peek().is_some_and(Text::is_space) {
            self.pos += 1;
        }
    }

    /// Advance while `predicate` holds, stopping at end of input.
    fn advance_while<P: Fn(char) -> bool>(&mut self, predicate: P) {
        while self.peek().is_some_and(&predicate) {
            self.pos += 1;
        }
    }

    fn slice(&self, start: usize, end: usize) -> String {
        let end = end.min(self.chars.len());
        self.chars[start.min(end)..end].iter().collect()
    }

    /// Position of the first `needle` at or after `from`.
    fn find(&self, from: usize, needle: &[char]) -> Option<usize> {
        if from >= self.chars.len() {
            return None;
        }
        self.chars[from..]
            .windows(needle.len())
            .position(|window| window == needle)
            .map(|offset| from + offset)
    }
}

/// Open elements, with the pseudo-root at the bottom.
struct OpenElements {
    stack: Vec<Element>,
}

impl OpenElements {
    fn new() -> Self {
        OpenElements {
            stack: vec![Element::new("")],
        }
    }

    fn attach(&mut self, node: MarkupNode) {
        if let Some(top) = self.stack.last_mut() {
            top.children.push(node);
        }
    }

    /// Pop the top element into its parent. The pseudo-root is never popped.
    fn close_top(&mut self) {
        if self.stack.len() > 1 {
            if let Some(element) = self.stack.pop() {
                self.attach(MarkupNode::Element(element));
            }
        }
    }

    /// Close elements down to and including the innermost one named `name`.
    fn close(&mut self, name: &str) {
        let Some(depth) = self.stack.iter().skip(1).rposition(|e| e.name == name) else {
            trace!("ignoring closing tag </{name}> with no open element");
            return;
        };
        // `rposition` counts from the first non-root element.
        while self.stack.len() > depth + 1 {
            self.close_top();
        }
    }

    fn finish(mut self) -> MarkupNode {
        while self.stack.len() > 1 {
            self.close_top();
        }
        let root = self.stack.pop().unwrap_or_default();
        MarkupNode::Element(root)
    }
}

impl MarkupParser {
    /// Parse `markup` into a tree under a pseudo-root element with an empty
    /// name. Never fails.
    pub fn parse(markup: &str) -> MarkupNode {
        let mut scanner = Scanner {
            chars: markup.chars().collect(),
            pos: 0,
        };
        let mut open = OpenElements::new();

        while let Some(c) = scanner.peek() {
            if c == '<' {
                scanner.pos += 1;
                scanner.skip_spaces();
                match scanner.peek() {
                    Some('!') | Some('?') => Self::comment(&mut scanner, &mut open),
                    Some('/') => Self::closing_tag(&mut scanner, &mut open),
                    Some(_) => Self::opening_tag(&mut scanner, &mut open),
                    None => {}
                }
            } else if Text::is_space(c) {
                scanner.pos += 1;
            } else {
                let start = scanner.pos;
                scanner.advance_while(|c| c != '<');
                open.attach(MarkupNode::Text(scanner.slice(start, scanner.pos)));
            }
        }

        open.finish()
    }

    /// `<!-- ... -->` ends at `-->`; other `<!...>`/`<?...>` regions at the
    /// next `>`. Content runs from the `!`/`?` up to the final `>`.
    fn comment(scanner: &mut Scanner, open: &mut OpenElements) {
        let start = scanner.pos;
        let is_real_comment = scanner.chars.get(start + 1) == Some(&'-')
            && scanner.chars.get(start + 2) == Some(&'-');

        let end = if is_real_comment {
            scanner
                .find(start + 1, &['-', '-', '>'])
                .map(|dashes| dashes + 2)
        } else {
            scanner.find(start, &['>'])
        }
        .unwrap_or(scanner.chars.len());

        open.attach(MarkupNode::Comment(scanner.slice(start, end)));
        scanner.pos = end + 1;
    }

    fn closing_tag(scanner: &mut Scanner, open: &mut OpenElements) {
        scanner.pos += 1;
        scanner.skip_spaces();
        let start = scanner.pos;
        scanner.advance_while(|c| c != '>' && !Text::is_space(c));
        let name = scanner.slice(start, scanner.pos);
        scanner.advance_while(|c| c != '>');
        scanner.pos += 1;

        if !name.is_empty() {
            open.close(&name);
        }
    }

    fn opening_tag(scanner: &mut Scanner, open: &mut OpenElements) {
        let start = scanner.pos;
        scanner.advance_while(|c| c != '>' && c != '/' && !Text::is_space(c));
        let mut element = Element::new(scanner.slice(start, scanner.pos));

        loop {
            scanner.skip_spaces();
            match scanner.peek() {
                None => break,
                Some('>') => {
                    scanner.pos += 1;
                    break;
                }
                Some('/') => scanner.pos += 1,
                Some(_) => element.attributes.push(Self::attribute(scanner)),
            }
        }

        if element.name.is_empty() {
            return;
        }
        if is_void_element(&element.name) {
            open.attach(MarkupNode::Element(element));
        } else {
            open.stack.push(element);
        }
    }

    /// Read `key`, `key=value`, `key="value"` or `key='value'` verbatim.
    fn attribute(scanner: &mut Scanner) -> String {
        let start = scanner.pos;
        scanner.advance_while(|c| c != '>' && c != '=' && c != '/' && !Text::is_space(c));
        let key_end = scanner.pos;

        scanner.skip_spaces();
        if scanner.peek() != Some('=') {
            scanner.pos = key_end;
            return scanner.slice(start, key_end);
        }

        scanner.pos += 1;
        scanner.skip_spaces();
        match scanner.peek() {
            Some(quote @ ('"' | '\'')) => {
                scanner.pos += 1;
                scanner.advance_while(|c| c != quote);
                scanner.pos = (scanner.pos + 1).min(scanner.chars.len());
            }
            Some(_) => {
                while let Some(c) = scanner.peek() {
                    let closes_tag = c == '/' && scanner.chars.get(scanner.pos + 1) == Some(&'>');
                    if c == '>' || closes_tag || Text::is_space(c) {
                        break;
                    }
                    scanner.pos += 1;
                }
            }
            None => {}
        }

        scanner.slice(start, scanner.pos)
    }
}
