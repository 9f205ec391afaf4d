//! Author name and description resolution.
//!
//! Author links and meta tags are tried first. Otherwise the best-scoring
//! byline-like element wins, picked with [`find_best_among`] the same way the
//! content root is picked among candidates.

use dom_query::Document;

use crate::dom;
use crate::finder::find_best_among;
use crate::patterns::{PatternSet, CLEAN_AUTHOR, IGNORE_AUTHOR_PARTS};
use crate::weights::WeightTable;

/// Author names longer than this are truncated.
pub const MAX_AUTHOR_NAME_LEN: usize = 255;

/// Author descriptions longer than this are truncated.
pub const MAX_AUTHOR_DESCRIPTION_LEN: usize = 1000;

/// Descriptions starting like the article text are dropped; this many
/// characters are compared.
const SNIPPET_LEN: usize = 50;

/// Meta-style sources of an author name, read from `content`.
const AUTHOR_META_SELECTORS: &[&str] = &[
    "head meta[name=author]",
    r#"head meta[property="article:author"]"#,
    r#"head meta[property="twitter:creator"]"#,
    "meta[itemprop=author], span[itemprop=author]",
];

/// Byline-like elements, tried in order until one selector matches anything.
const BYLINE_SELECTORS: &[&str] = &[
    "a[rel=author],.byline-name,.byLineTag,.byline,.author,.by,.writer,.address",
    "body [class*=author]",
    "body [title*=author]",
    ".staff_info dl a[href]",
    "cite[class*=source]",
];

/// Elements that directly hold an author bio.
const BIO_SELECTORS: &[&str] = &[".byline > .bio", ".byline span[class*=teaser]"];

/// Resolved author information. Empty strings mean "not found".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Byline {
    /// Author name.
    pub name: String,
    /// Short author bio.
    pub description: String,
}

impl Byline {
    /// Resolve the author name and description of `doc`.
    #[must_use]
    pub fn from_document(doc: &Document, patterns: &PatternSet) -> Self {
        let name = author_name(doc, patterns);
        let description = author_description(doc, &name, patterns);
        Self { name, description }
    }

    /// Apply length limits, and drop a description that merely repeats the
    /// start of the article `text`.
    #[must_use]
    pub fn finish(self, text: &str) -> (Option<String>, Option<String>) {
        let name = truncate_chars(&self.name, MAX_AUTHOR_NAME_LEN);
        let description = if snippet(&self.description) == snippet(text) {
            String::new()
        } else {
            truncate_chars(&self.description, MAX_AUTHOR_DESCRIPTION_LEN)
        };

        (non_empty(name), non_empty(description))
    }
}

fn truncate_chars(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}

fn snippet(text: &str) -> String {
    truncate_chars(text, SNIPPET_LEN)
}

fn non_empty(text: String) -> Option<String> {
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

/// The author name of `doc`, or an empty string.
#[must_use]
pub fn author_name(doc: &Document, patterns: &PatternSet) -> String {
    let mut name = dom::select_doc_or_empty(doc, "body [rel*=author]")
        .first()
        .map(dom::own_text)
        .unwrap_or_default();

    if name.is_empty() {
        name = meta_author(doc);
    }
    if name.is_empty() {
        name = byline_author(doc, patterns);
    }

    if let Some(inner) = CLEAN_AUTHOR.captures(&name).and_then(|caps| caps.get(1)) {
        name = dom::normalize_whitespace(inner.as_str());
    }

    name
}

fn meta_author(doc: &Document) -> String {
    for selector in AUTHOR_META_SELECTORS {
        let content = dom::select_doc_or_empty(doc, selector)
            .iter()
            .find_map(|el| el.attr("content"))
            .map(|content| dom::normalize_whitespace(&content))
            .unwrap_or_default();
        if !content.is_empty() {
            return content;
        }
    }
    String::new()
}

fn byline_author(doc: &Document, patterns: &PatternSet) -> String {
    let Some(matches) = BYLINE_SELECTORS
        .iter()
        .map(|selector| dom::select_doc_or_empty(doc, selector))
        .find(|matches| !matches.is_empty())
    else {
        return String::new();
    };

    let mut scratch = WeightTable::new();
    let Some(best) = find_best_among(matches, &mut scratch, patterns) else {
        return String::new();
    };

    let cleaned =
        dom::normalize_whitespace(&IGNORE_AUTHOR_PARTS.replace_all(&dom::text(&best), ""));
    cleaned.split(',').next().unwrap_or_default().trim().to_string()
}

/// A short bio of `author`, or an empty string.
///
/// Known bio containers win; otherwise the best-scoring element whose own
/// text mentions the author is used.
#[must_use]
pub fn author_description(doc: &Document, author: &str, patterns: &PatternSet) -> String {
    if author.is_empty() {
        return String::new();
    }

    for selector in BIO_SELECTORS {
        if let Some(bio) = dom::select_doc_or_empty(doc, selector).first() {
            return dom::text(bio);
        }
    }

    let mentions = dom::elements_containing_own_text(&doc.root(), author);
    let mut scratch = WeightTable::new();
    find_best_among(mentions, &mut scratch, patterns)
        .map(|el| dom::text(&el))
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn name_of(html: &str) -> String {
        author_name(&dom::parse(html), &PatternSet::default())
    }

    #[test]
    fn rel_author_wins() {
        let html = r#"<html><head><meta name="author" content="Meta Person"></head>
            <body><a rel="author" href="/u/1">Link Person</a></body></html>"#;
        assert_eq!(name_of(html), "Link Person");
    }

    #[test]
    fn meta_tags_in_order() {
        let html = r#"<html><head><meta property="article:author" content="Graph Person"></head><body></body></html>"#;
        assert_eq!(name_of(html), "Graph Person");
    }

    #[test]
    fn byline_element_is_cleaned() {
        let html = r#"<body><div class="byline">By Jane Doe, Staff Writer</div><p>Story</p></body>"#;
        assert_eq!(name_of(html), "Jane Doe");
    }

    #[test]
    fn by_prefix_is_unwrapped() {
        let html = r#"<html><head><meta name="author" content="By: John Smith. Reporter"></head><body></body></html>"#;
        assert_eq!(name_of(html), "John Smith");
    }

    #[test]
    fn no_author() {
        assert_eq!(name_of("<body><p>Nothing here</p></body>"), "");
    }

    #[test]
    fn bio_container_description() {
        let doc = dom::parse(
            r#"<body><div class="byline"><span>Jane Doe</span><div class="bio">Jane covers science.</div></div></body>"#,
        );
        assert_eq!(
            author_description(&doc, "Jane Doe", &PatternSet::default()),
            "Jane covers science."
        );
    }

    #[test]
    fn bio_paragraphs_keep_word_boundaries() {
        let doc = dom::parse(
            r#"<body><div class="byline"><span>Jane Doe</span><div class="bio"><p>Jane covers science.</p><p>She lives in Ohio.</p></div></div></body>"#,
        );
        assert_eq!(
            author_description(&doc, "Jane Doe", &PatternSet::default()),
            "Jane covers science. She lives in Ohio."
        );
    }

    #[test]
    fn description_from_mentions() {
        let doc = dom::parse(
            "<body><section><p>Jane Doe writes about the climate for the paper.</p></section></body>",
        );
        assert_eq!(
            author_description(&doc, "jane doe", &PatternSet::default()),
            "Jane Doe writes about the climate for the paper."
        );
        assert_eq!(author_description(&doc, "", &PatternSet::default()), "");
    }

    #[test]
    fn finish_drops_repeated_description() {
        let text = "Jane Doe writes about the climate for the paper, and this is the story.";
        let byline = Byline {
            name: "Jane Doe".to_string(),
            description: "Jane Doe writes about the climate for the paper, and more.".to_string(),
        };
        let (name, description) = byline.finish(text);

        assert_eq!(name.as_deref(), Some("Jane Doe"));
        assert_eq!(description, None);
    }

    #[test]
    fn finish_truncates() {
        let byline = Byline {
            name: "n".repeat(300),
            description: "d".repeat(1200),
        };
        let (name, description) = byline.finish("article");

        assert_eq!(name.map(|n| n.len()), Some(MAX_AUTHOR_NAME_LEN));
        assert_eq!(description.map(|d| d.len()), Some(MAX_AUTHOR_DESCRIPTION_LEN));
    }
}
