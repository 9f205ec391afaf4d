//! Rendering of the chosen content root.
//!
//! Formatting runs in two steps. First every element matched by the
//! nodes-to-keep selector gets a paragraph index, and weighted elements that
//! are negative or too short for their index are pruned (rescuing large
//! images). Then the kept elements that survive are rendered one by one,
//! filtered for length and noise, and joined. When too little survives the
//! whole visible text of the root is returned instead.

pub mod markup;
pub mod prune;
pub mod text;

use dom_query::{Document, Matcher, NodeRef};

use crate::dom;
use crate::error::{Error, Result};
use crate::patterns::{PatternKind, PatternSet};
use crate::weights::WeightTable;

pub use prune::{Kept, ParagraphIndex, PrunedTree};

/// Joined output shorter than this falls back to the root's text.
const MIN_JOINED_LEN: usize = 100;

/// Joined output covering less than this share of the root's visible text
/// falls back to the root's text.
const MIN_TEXT_RATIO: f64 = 0.25;

const FRAGMENT_SEPARATOR: &str = "\n\n";

/// What the formatter renders for each kept element.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Visible text with whitespace collapsed.
    #[default]
    PlainText,
    /// The element's markup.
    Markup,
}

impl OutputFormat {
    /// Nodes-to-keep selector used when none is configured.
    #[must_use]
    pub fn default_nodes_to_keep(self) -> &'static str {
        match self {
            OutputFormat::PlainText => "p, ol",
            OutputFormat::Markup => "p, ol, img",
        }
    }
}

/// Formatter settings.
///
/// # Example
///
/// ```rust
/// use article_gravity::{FormatterConfig, OutputFormat};
///
/// let config = FormatterConfig {
///     format: OutputFormat::Markup,
///     min_paragraph_len: 20,
///     ..FormatterConfig::default()
/// };
/// assert_eq!(config.nodes_to_keep(), "p, ol, img");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormatterConfig {
    /// Plain text or markup output.
    ///
    /// Default: `OutputFormat::PlainText`
    pub format: OutputFormat,

    /// CSS selector of elements eligible as output paragraphs.
    ///
    /// Default: `None` (`"p, ol"` for plain text, `"p, ol, img"` for markup)
    pub nodes_to_keep: Option<String>,

    /// Minimum text length of the first paragraph.
    ///
    /// Default: `50`
    pub min_first_paragraph_len: usize,

    /// Minimum text length of every later paragraph.
    ///
    /// Default: `30`
    pub min_paragraph_len: usize,
}

impl Default for FormatterConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::PlainText,
            nodes_to_keep: None,
            min_first_paragraph_len: 50,
            min_paragraph_len: 30,
        }
    }
}

impl FormatterConfig {
    /// The effective nodes-to-keep selector.
    #[must_use]
    pub fn nodes_to_keep(&self) -> &str {
        self.nodes_to_keep
            .as_deref()
            .unwrap_or_else(|| self.format.default_nodes_to_keep())
    }

    /// Minimum length for a paragraph at `index`. Unindexed elements use
    /// the first-paragraph minimum.
    #[must_use]
    pub fn min_len(&self, index: Option<usize>) -> usize {
        match index {
            Some(0) | None => self.min_first_paragraph_len,
            Some(_) => self.min_paragraph_len,
        }
    }
}

/// Whether `node` is hidden by style or class, or is a caption.
pub(crate) fn is_unlikely(node: &NodeRef, patterns: &PatternSet) -> bool {
    let class = dom::class_name(node);
    patterns.is_match(PatternKind::Caption, &class)
        || patterns.is_match(PatternKind::Hidden, &class)
        || patterns.is_match(PatternKind::Hidden, &dom::attr(node, "style"))
}

/// Whether `node` or an ancestor strictly below `root` is unlikely content.
fn is_unlikely_below(node: &NodeRef, root: &NodeRef, patterns: &PatternSet) -> bool {
    std::iter::once(*node)
        .chain(node.ancestors_it(None))
        .take_while(|n| n.id != root.id)
        .any(|n| n.is_element() && is_unlikely(&n, patterns))
}

/// A configured formatter with a compiled nodes-to-keep selector.
#[derive(Debug, Clone)]
pub struct Formatter {
    config: FormatterConfig,
    keep: Matcher,
    keeps_images: bool,
}

impl Formatter {
    /// Compile the formatter's selector.
    ///
    /// Fails with [`Error::InvalidSelector`] when the nodes-to-keep selector
    /// does not parse.
    pub fn new(config: FormatterConfig) -> Result<Self> {
        let selector = config.nodes_to_keep();
        let keep =
            Matcher::new(selector).map_err(|_| Error::InvalidSelector(selector.to_string()))?;

        // Rescued images are bare <img src> elements; they are rendered only
        // when such an element would match the selector.
        let probe = Document::fragment(r#"<img src="x">"#);
        let keeps_images = probe.select("img").nodes().iter().any(|img| img.is_match(&keep));

        Ok(Self {
            config,
            keep,
            keeps_images,
        })
    }

    /// The formatter's settings.
    #[must_use]
    pub fn config(&self) -> &FormatterConfig {
        &self.config
    }

    /// Render `root`, pruning by `weights`.
    ///
    /// The document is not modified.
    #[must_use]
    pub fn format(&self, root: &NodeRef, weights: &WeightTable, patterns: &PatternSet) -> String {
        let paragraphs = ParagraphIndex::build(root, &self.keep);
        let pruned =
            PrunedTree::build(*root, weights, &paragraphs, |index| self.config.min_len(index));
        self.render(&pruned, patterns)
    }

    fn render(&self, pruned: &PrunedTree, patterns: &PatternSet) -> String {
        let root = pruned.root();
        let mut fragments: Vec<String> = Vec::new();
        let mut paragraph_count = 0usize;

        for kept in pruned.kept(&self.keep, self.keeps_images) {
            let (rendered, is_paragraph) = match kept {
                Kept::Node(node) => {
                    if is_unlikely_below(&node, &root, patterns) {
                        continue;
                    }
                    let rendered = match self.config.format {
                        OutputFormat::PlainText => text::visible_text(pruned, &node, patterns),
                        OutputFormat::Markup => markup::outer_markup(pruned, &node),
                    };
                    (rendered, node.has_name("p"))
                }
                Kept::Image { parent, src } => {
                    if is_unlikely_below(&parent, &root, patterns) {
                        continue;
                    }
                    let rendered = match self.config.format {
                        OutputFormat::PlainText => String::new(),
                        OutputFormat::Markup => markup::image_markup(src),
                    };
                    (rendered, false)
                }
            };

            let fragment = dom::normalize_whitespace(&rendered);
            let len = fragment.chars().count();
            if len == 0
                || len < self.config.min_len(Some(fragments.len()))
                || len > dom::count_letters(&fragment) * 2
            {
                continue;
            }

            if is_paragraph {
                paragraph_count += 1;
            }
            fragments.push(fragment);
        }

        let joined = fragments.join(FRAGMENT_SEPARATOR);
        let joined_len = joined.chars().count();

        let visible = dom::normalize_whitespace(&text::visible_text(pruned, &root, patterns));
        let visible_len = visible.chars().count().max(1);
        let ratio = joined_len as f64 / visible_len as f64;

        if joined_len > MIN_JOINED_LEN && paragraph_count > 0 && ratio >= MIN_TEXT_RATIO {
            tracing::debug!(fragments = fragments.len(), paragraph_count, "formatted paragraphs");
            return joined;
        }

        tracing::debug!(
            joined_len,
            paragraph_count,
            ratio,
            "too little paragraph text, falling back to root text"
        );
        if visible.is_empty() {
            return String::new();
        }
        dom::reparse_text(&visible)
    }
}

/// Format `root` with `config` in one call.
///
/// ```rust
/// use article_gravity::{dom, format, FormatterConfig, PatternSet, WeightTable};
///
/// let doc = dom::parse("<div>hello world</div>");
/// let root = doc.select("div").nodes()[0];
///
/// let config = FormatterConfig::default();
/// let text = format(&root, &WeightTable::new(), &PatternSet::default(), &config)?;
/// assert_eq!(text, "hello world");
/// # Ok::<(), article_gravity::Error>(())
/// ```
pub fn format(
    root: &NodeRef,
    weights: &WeightTable,
    patterns: &PatternSet,
    config: &FormatterConfig,
) -> Result<String> {
    Ok(Formatter::new(config.clone())?.format(root, weights, patterns))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plain() -> Formatter {
        Formatter::new(FormatterConfig::default()).unwrap()
    }

    #[test]
    fn invalid_selector_is_rejected_up_front() {
        let config = FormatterConfig {
            nodes_to_keep: Some("p[".to_string()),
            ..FormatterConfig::default()
        };
        assert!(matches!(Formatter::new(config), Err(Error::InvalidSelector(s)) if s == "p["));
    }

    #[test]
    fn image_probe_follows_selector() {
        assert!(!plain().keeps_images);

        let markup = Formatter::new(FormatterConfig {
            format: OutputFormat::Markup,
            ..FormatterConfig::default()
        })
        .unwrap();
        assert!(markup.keeps_images);
    }

    #[test]
    fn min_len_by_index() {
        let config = FormatterConfig::default();
        assert_eq!(config.min_len(None), 50);
        assert_eq!(config.min_len(Some(0)), 50);
        assert_eq!(config.min_len(Some(3)), 30);
    }

    #[test]
    fn unlikely_ancestors_below_root_only() {
        let doc = dom::parse(
            r#"<div class="caption-root"><section style="display:none"><p>x</p></section><p>y</p></div>"#,
        );
        let root = doc.select("div").nodes()[0];
        let ps = doc.select("p").nodes().to_vec();
        let patterns = PatternSet::default();

        assert!(is_unlikely_below(&ps[0], &root, &patterns));
        assert!(!is_unlikely_below(&ps[1], &root, &patterns));
        assert!(!is_unlikely_below(&root, &root, &patterns));
    }

    #[test]
    fn paragraphs_are_joined_with_blank_lines() {
        let first = "The opening paragraph has more than fifty characters of text.";
        let second = "A second paragraph, also long enough to be kept.";
        let html = format!("<div><p>{first}</p><p>{second}</p><p>tiny</p></div>");
        let doc = dom::parse(&html);
        let root = doc.select("div").nodes()[0];

        let text = plain().format(&root, &WeightTable::new(), &PatternSet::default());
        assert_eq!(text, format!("{first}\n\n{second}"));
    }
}
