//! DOM Operations Adapter
//!
//! Element-level helpers over `dom_query` nodes: attribute access with
//! "absent means empty" semantics, own-text and full-text measurements, and
//! queries that treat an unparseable selector as "no match".

// Re-export core types for external use
pub use dom_query::{Document, Matcher, NodeId, NodeRef, Selection};

use crate::patterns::WHITESPACE_NORMALIZE;

// === Attribute Operations ===

/// Get tag name (lowercase). Empty for non-element nodes.
#[inline]
#[must_use]
pub fn tag_name(node: &NodeRef) -> String {
    node.node_name().map(|n| n.to_string()).unwrap_or_default()
}

/// Get an attribute value, empty string when absent.
#[inline]
#[must_use]
pub fn attr(node: &NodeRef, name: &str) -> String {
    node.attr(name).map(|s| s.to_string()).unwrap_or_default()
}

/// Get element ID attribute, empty string when absent.
#[inline]
#[must_use]
pub fn id(node: &NodeRef) -> String {
    node.id_attr().map(|s| s.to_string()).unwrap_or_default()
}

/// Get element class attribute, empty string when absent.
#[inline]
#[must_use]
pub fn class_name(node: &NodeRef) -> String {
    node.class().map(|s| s.to_string()).unwrap_or_default()
}

/// Parse an integer attribute. Missing or malformed values are `None`.
#[must_use]
pub fn int_attr(node: &NodeRef, name: &str) -> Option<i32> {
    node.attr(name).and_then(|v| v.parse::<i32>().ok())
}

// === Text Content ===

/// Collapse whitespace runs to one space and trim.
#[must_use]
pub fn normalize_whitespace(text: &str) -> String {
    WHITESPACE_NORMALIZE.replace_all(text, " ").trim().to_string()
}

/// Text directly inside the element, excluding descendant elements' text.
///
/// Each direct `<br>` child contributes a space. Whitespace is collapsed and
/// trimmed.
#[must_use]
pub fn own_text(node: &NodeRef) -> String {
    let mut raw = String::new();
    for child in node.children_it(false) {
        if child.is_text() {
            raw.push_str(&child.text());
        } else if child.has_name("br") {
            raw.push(' ');
        }
    }
    normalize_whitespace(&raw)
}

/// Full text of the element and its descendants, whitespace-normalized.
///
/// Block and `<br>` boundaries separate words the same way they do in
/// rendered text; `script`, `style` and `template` content is left out.
#[must_use]
pub fn text(node: &NodeRef) -> String {
    let mut buf = TextBuffer::new();
    push_descendant_text(node, &mut buf);
    normalize_whitespace(&buf.into_string())
}

fn push_descendant_text(node: &NodeRef, buf: &mut TextBuffer) {
    for child in node.children_it(false) {
        if child.is_text() {
            buf.push_text(&child.text());
            continue;
        }
        if !child.is_element() {
            continue;
        }
        let tag = tag_name(&child);
        if NON_RENDERED_TAGS.contains(&tag.as_str()) {
            continue;
        }

        let boundary = Boundary::of(&tag);
        buf.mark(boundary);
        push_descendant_text(&child, buf);
        buf.mark(boundary);
    }
}

/// Character count of [`text`].
#[inline]
#[must_use]
pub fn text_len(node: &NodeRef) -> usize {
    text(node).chars().count()
}

/// Count Unicode letters in `text`.
#[must_use]
pub fn count_letters(text: &str) -> usize {
    text.chars().filter(|c| c.is_alphabetic()).count()
}

// === Text Assembly ===

/// Elements whose text content is never shown.
pub const NON_RENDERED_TAGS: &[&str] = &["script", "style", "template"];

/// Text that attaches to the preceding word across a link boundary.
const CLOSING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')', ']', '}', '%'];

/// How an element boundary separates the text on either side of it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord)]
pub enum Boundary {
    /// Inline formatting: words run together (`un<b>believ</b>able`).
    #[default]
    Inline,
    /// A link: one space, except before closing punctuation.
    Link,
    /// Any other element, including `<br>`: always one space.
    Block,
}

impl Boundary {
    /// Boundary kind of an element with tag `tag`.
    #[must_use]
    pub fn of(tag: &str) -> Self {
        if is_inline_formatting(tag) {
            Boundary::Inline
        } else if tag == "a" {
            Boundary::Link
        } else {
            Boundary::Block
        }
    }
}

/// Accumulates text nodes, inserting a single space at pending element
/// boundaries unless whitespace is already there.
#[derive(Debug, Default)]
pub struct TextBuffer {
    out: String,
    pending: Boundary,
}

impl TextBuffer {
    /// Create an empty buffer.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a boundary before the next text. The strongest one wins.
    pub fn mark(&mut self, boundary: Boundary) {
        self.pending = self.pending.max(boundary);
    }

    /// Append a text node.
    pub fn push_text(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        let separates = match self.pending {
            Boundary::Inline => false,
            Boundary::Link => !text.starts_with(CLOSING_PUNCTUATION),
            Boundary::Block => true,
        };
        if separates
            && !self.out.is_empty()
            && !self.out.ends_with(char::is_whitespace)
            && !text.starts_with(char::is_whitespace)
        {
            self.out.push(' ');
        }
        self.pending = Boundary::Inline;
        self.out.push_str(text);
    }

    /// The assembled text, not normalized.
    #[must_use]
    pub fn into_string(self) -> String {
        self.out
    }
}

// === Tree Navigation ===

/// Element descendants of `node` in document order, excluding `node`.
#[must_use]
pub fn descendant_elements<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    node.descendants_it().filter(NodeRef::is_element).collect()
}

// === Querying ===

/// Select descendants of `root` matching `selector`.
///
/// An unparseable selector selects nothing instead of panicking.
#[must_use]
pub fn select_or_empty<'a>(root: &NodeRef<'a>, selector: &str) -> Vec<NodeRef<'a>> {
    match Matcher::new(selector) {
        Ok(matcher) => Selection::from(*root).select_matcher(&matcher).nodes().to_vec(),
        Err(err) => {
            tracing::debug!(selector, error = ?err, "selector did not parse, treating as no match");
            Vec::new()
        }
    }
}

/// Select from the whole document; unparseable selectors select nothing.
#[must_use]
pub fn select_doc_or_empty<'a>(doc: &'a Document, selector: &str) -> Vec<NodeRef<'a>> {
    select_or_empty(&doc.root(), selector)
}

/// Elements under `root` whose own text contains `needle`, case-insensitively.
///
/// An empty or blank needle matches nothing.
#[must_use]
pub fn elements_containing_own_text<'a>(root: &NodeRef<'a>, needle: &str) -> Vec<NodeRef<'a>> {
    let needle = normalize_whitespace(needle).to_lowercase();
    if needle.is_empty() {
        return Vec::new();
    }
    descendant_elements(root)
        .into_iter()
        .filter(|el| own_text(el).to_lowercase().contains(&needle))
        .collect()
}

// === Element Classification ===

/// Inline formatting tags whose text flows into the surrounding words.
///
/// Every other element (links, blocks, `<br>`) separates words when text is
/// rendered.
pub const INLINE_FORMATTING_TAGS: &[&str] = &[
    "abbr", "b", "big", "cite", "code", "del", "dfn", "em", "font", "i", "ins", "kbd", "label",
    "mark", "q", "s", "samp", "small", "span", "strike", "strong", "sub", "sup", "time", "tt",
    "u", "var",
];

/// Void elements cannot have children and have no closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param",
    "source", "track", "wbr",
];

/// Whether `tag` is an inline formatting tag.
#[inline]
#[must_use]
pub fn is_inline_formatting(tag: &str) -> bool {
    INLINE_FORMATTING_TAGS.contains(&tag)
}

/// Whether `tag` is a void element.
#[inline]
#[must_use]
pub fn is_void_element(tag: &str) -> bool {
    VOID_ELEMENTS.contains(&tag)
}

// === Serialization ===

/// Escape text content for HTML output.
#[must_use]
pub fn escape_text(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('\u{a0}', "&nbsp;")
}

/// Escape an attribute value for double-quoted HTML output.
#[must_use]
pub fn escape_attr(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('"', "&quot;")
        .replace('\u{a0}', "&nbsp;")
}

/// All attributes of `node` as name/value pairs.
#[must_use]
pub fn get_all_attributes(node: &NodeRef) -> Vec<(String, String)> {
    node.attrs()
        .iter()
        .map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
        .collect()
}

// === Parsing ===

/// Parse HTML string into document
#[inline]
#[must_use]
pub fn parse(html: &str) -> Document {
    Document::from(html)
}

/// Parse a text snippet as a detached fragment and return its plain text.
///
/// Strips tag-like substrings that survived into extracted text.
#[must_use]
pub fn reparse_text(snippet: &str) -> String {
    let fragment = Document::fragment(snippet);
    normalize_whitespace(&fragment.root().text())
}
