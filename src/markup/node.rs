//! Markup tree nodes and tree queries.
//!
//! Unclosed tags can nest arbitrarily deep, so every trait that walks a whole
//! tree (`Clone`, `PartialEq`, `Drop`) works from a heap stack instead of
//! recursing. `Debug` prints one level only.

use std::fmt;

/// An element: tag name, verbatim attribute tokens and ordered children.
#[derive(Default)]
pub struct Element {
    /// Tag name. Empty for the pseudo-root returned by the parser.
    pub name: String,
    /// Attribute tokens as written, e.g. `id="pt"` or `required`.
    pub attributes: Vec<String>,
    /// Child nodes in document order.
    pub children: Vec<MarkupNode>,
}

impl Element {
    /// Create an element with no attributes or children.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Element {
            name: name.into(),
            attributes: Vec::new(),
            children: Vec::new(),
        }
    }

    /// Copy of the name and attributes, without children.
    fn shallow_copy(&self) -> Self {
        Element {
            name: self.name.clone(),
            attributes: self.attributes.clone(),
            children: Vec::with_capacity(self.children.len()),
        }
    }
}

impl Clone for Element {
    fn clone(&self) -> Self {
        let mut root = self.shallow_copy();
        // (source element, copy under construction); the copy's child count
        // is the index of the next source child to copy.
        let mut frames: Vec<(&Element, Element)> = Vec::new();

        loop {
            let (source, copy) = match frames.last_mut() {
                Some((source, copy)) => (*source, copy),
                None => (self, &mut root),
            };

            match source.children.get(copy.children.len()) {
                Some(MarkupNode::Element(child)) => frames.push((child, child.shallow_copy())),
                Some(leaf) => copy.children.push(leaf.clone()),
                None => {
                    let Some((_, done)) = frames.pop() else {
                        return root;
                    };
                    match frames.last_mut() {
                        Some((_, parent)) => parent.children.push(MarkupNode::Element(done)),
                        None => root.children.push(MarkupNode::Element(done)),
                    }
                }
            }
        }
    }
}

impl PartialEq for Element {
    fn eq(&self, other: &Self) -> bool {
        let mut pending = vec![(self, other)];

        while let Some((left, right)) = pending.pop() {
            if left.name != right.name
                || left.attributes != right.attributes
                || left.children.len() != right.children.len()
            {
                return false;
            }
            for pair in left.children.iter().zip(&right.children) {
                match pair {
                    (MarkupNode::Element(a), MarkupNode::Element(b)) => pending.push((a, b)),
                    (MarkupNode::Text(a), MarkupNode::Text(b))
                    | (MarkupNode::Comment(a), MarkupNode::Comment(b)) => {
                        if a != b {
                            return false;
                        }
                    }
                    _ => return false,
                }
            }
        }

        true
    }
}

impl fmt::Debug for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Element")
            .field("name", &self.name)
            .field("attributes", &self.attributes)
            .field("children", &self.children.len())
            .finish()
    }
}

impl Drop for Element {
    fn drop(&mut self) {
        let mut pending = std::mem::take(&mut self.children);
        while let Some(mut node) = pending.pop() {
            if let MarkupNode::Element(element) = &mut node {
                pending.append(&mut element.children);
            }
        }
    }
}

/// A node of the markup tree.
#[derive(Clone, Debug, PartialEq)]
pub enum MarkupNode {
    /// A tag with attributes and children.
    Element(Element),
    /// A run of free text.
    Text(String),
    /// A comment, doctype or processing instruction, with its raw content.
    Comment(String),
}

impl MarkupNode {
    /// Tag name of an element.
    pub fn name(&self) -> Option<&str> {
        match self {
            MarkupNode::Element(element) => Some(&element.name),
            _ => None,
        }
    }

    /// Attribute tokens of an element; empty for other nodes.
    pub fn attributes(&self) -> &[String] {
        match self {
            MarkupNode::Element(element) => &element.attributes,
            _ => &[],
        }
    }

    /// Children of an element; empty for other nodes.
    pub fn children(&self) -> &[MarkupNode] {
        match self {
            MarkupNode::Element(element) => &element.children,
            _ => &[],
        }
    }

    /// Check if this node is an element.
    pub fn is_element(&self) -> bool {
        matches!(self, MarkupNode::Element(_))
    }

    /// Check if this node is text.
    pub fn is_text(&self) -> bool {
        matches!(self, MarkupNode::Text(_))
    }

    /// Check if this node is a comment.
    pub fn is_comment(&self) -> bool {
        matches!(self, MarkupNode::Comment(_))
    }

    /// Check if an element carries the exact attribute token.
    pub fn has_attribute(&self, token: &str) -> bool {
        self.attributes().iter().any(|attribute| attribute == token)
    }

    /// Concatenated text beneath this node in document order.
    ///
    /// Comments are skipped, as are elements (including this node) whose name
    /// is listed in `ignore`.
    pub fn content(&self, ignore: &[&str]) -> String {
        let mut content = String::new();
        let mut pending = vec![self];

        while let Some(node) = pending.pop() {
            match node {
                MarkupNode::Text(text) => content.push_str(text),
                MarkupNode::Comment(_) => {}
                MarkupNode::Element(element) => {
                    if !ignore.contains(&element.name.as_str()) {
                        pending.extend(element.children.iter().rev());
                    }
                }
            }
        }

        content
    }

    /// Follow a path of child indexes from this node.
    ///
    /// `[1, 2]` is the third child of the second child. Returns `None` when an
    /// index is out of range.
    pub fn navigate(&self, path: &[usize]) -> Option<&MarkupNode> {
        path.iter()
            .try_fold(self, |node, &index| node.children().get(index))
    }

    /// All elements in this subtree (this node included) named `name`, in
    /// document order.
    pub fn elements_by_name(&self, name: &str) -> Vec<&MarkupNode> {
        self.elements_where(|element| element.name == name)
    }

    /// All elements in this subtree (this node included) carrying the exact
    /// attribute token, in document order.
    pub fn elements_by_attribute(&self, token: &str) -> Vec<&MarkupNode> {
        self.elements_where(|element| element.attributes.iter().any(|a| a == token))
    }

    /// Number of element nodes in this subtree, this node included.
    pub fn element_count(&self) -> usize {
        self.elements_where(|_| true).len()
    }

    fn elements_where<P>(&self, mut predicate: P) -> Vec<&MarkupNode>
    where
        P: FnMut(&Element) -> bool,
    {
        let mut found = Vec::new();
        let mut pending = vec![self];

        while let Some(node) = pending.pop() {
            if let MarkupNode::Element(element) = node {
                if predicate(element) {
                    found.push(node);
                }
                pending.extend(element.children.iter().rev());
            }
        }

        found
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(content: &str) -> MarkupNode {
        MarkupNode::Text(content.to_string())
    }

    fn element(name: &str, attributes: &[&str], children: Vec<MarkupNode>) -> MarkupNode {
        let mut element = Element::new(name);
        element.attributes = attributes.iter().map(|a| a.to_string()).collect();
        element.children = children;
        MarkupNode::Element(element)
    }

    fn sample() -> MarkupNode {
        element(
            "",
            &[],
            vec![element(
                "div",
                &[r#"id="pt""#],
                vec![
                    text("a"),
                    MarkupNode::Comment("!-- hidden --".to_string()),
                    element("script", &[], vec![text("var x;")]),
                    element("span", &["class=\"t_f\""], vec![text("b"), text("c")]),
                ],
            )],
        )
    }

    #[test]
    fn test_content_skips_comments_and_ignored_tags() {
        let root = sample();
        assert_eq!(root.content(&[]), "avar x;bc");
        assert_eq!(root.content(&["script"]), "abc");
        assert_eq!(root.content(&["div"]), "");
        assert_eq!(text("plain").content(&["plain"]), "plain");
    }

    #[test]
    fn test_navigate() {
        let root = sample();
        let span = root.navigate(&[0, 3]).unwrap();
        assert_eq!(span.name(), Some("span"));
        assert_eq!(root.navigate(&[0, 3, 1]), Some(&text("c")));
        assert_eq!(root.navigate(&[0, 9]), None);
        assert_eq!(root.navigate(&[]), Some(&root));
    }

    #[test]
    fn test_element_queries() {
        let root = sample();
        let by_attribute = root.elements_by_attribute(r#"id="pt""#);
        assert_eq!(by_attribute.len(), 1);
        assert_eq!(by_attribute[0].name(), Some("div"));

        let spans = root.elements_by_name("span");
        assert_eq!(spans.len(), 1);
        assert!(spans[0].has_attribute("class=\"t_f\""));
        assert!(root.elements_by_name("table").is_empty());

        // pseudo-root, div, script, span
        assert_eq!(root.element_count(), 4);
    }

    #[test]
    fn test_clone_and_compare() {
        let root = sample();
        let copy = root.clone();
        assert_eq!(copy, root);
        assert_eq!(copy.content(&[]), root.content(&[]));

        let mut changed = root.clone();
        if let MarkupNode::Element(pseudo_root) = &mut changed {
            pseudo_root.children.push(text("d"));
        }
        assert_ne!(changed, root);
        assert_ne!(text("a"), MarkupNode::Comment("a".to_string()));
        assert_ne!(element("p", &[], vec![]), element("p", &["x"], vec![]));
    }

    #[test]
    fn test_debug_is_shallow() {
        let rendered = format!("{:?}", sample());
        assert_eq!(
            rendered,
            r#"Element(Element { name: "", attributes: [], children: 1 })"#
        );
    }

    #[test]
    fn test_deep_tree_clone_compare_drop() {
        let mut node = text("leaf");
        for _ in 0..100_000 {
            node = element("div", &[], vec![node]);
        }
        assert!(node.is_element());

        let copy = node.clone();
        assert_eq!(copy, node);
        assert_eq!(copy.element_count(), 100_000);
        assert_eq!(copy.content(&[]), "leaf");
        assert!(!format!("{copy:?}").is_empty());

        drop(copy);
        drop(node);
    }
}
