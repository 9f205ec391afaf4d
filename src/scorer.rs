//! Node weighting.
//!
//! Assigns a signed content-likelihood weight to one element by combining its
//! class/id/itemprop/style classification, the length of its own text, and the
//! text of its children and grandchildren. Grandchildren count a third as
//! much as children, so shallower containers win over deeper ones.
//!
//! Scoring also persists weight deltas onto the children and grandchildren it
//! inspects. The formatter relies on those deltas when it prunes, so they are
//! written into the caller's [`WeightTable`] rather than discarded.

use dom_query::NodeRef;

use crate::dom;
use crate::patterns::{PatternKind, PatternSet};
use crate::weights::WeightTable;

/// Children with less own text than this do not contribute.
const MIN_CHILD_TEXT_LEN: usize = 20;

/// Own text above this length earns a flat text bonus.
const LONG_CHILD_TEXT_LEN: usize = 200;

/// A `<p>` child with more own text than this counts as a real paragraph.
const REAL_PARAGRAPH_TEXT_LEN: usize = 50;

/// Above this many markup-noise tokens a div/p child is penalized.
const MAX_NOISE_TOKENS: usize = 5;

/// Substrings that indicate leaked markup or inline CSS in text.
const NOISE_TOKENS: &[&str] = &["&quot;", "&lt;", "&gt;", "px"];

const HEADING_TAGS: &[&str] = &["h1", "h2", "h3", "h4", "h5", "h6"];
const TABULAR_TAGS: &[&str] = &["table", "li", "td", "th"];

/// Score `node`, recording side-effect weights of its descendants in `weights`.
///
/// The return value depends only on the tree structure and `patterns`; calling
/// it twice on an unchanged tree yields the same number, though the persisted
/// descendant deltas accumulate.
///
/// # Example
///
/// ```rust
/// use article_gravity::{dom, score_element, PatternSet, WeightTable};
///
/// let doc = dom::parse("<p>A paragraph of forty-three characters long.</p>");
/// let p = doc.select("p").nodes()[0];
/// let mut weights = WeightTable::new();
///
/// assert_eq!(score_element(&p, &mut weights, &PatternSet::default()), 4);
/// ```
pub fn score_element(node: &NodeRef, weights: &mut WeightTable, patterns: &PatternSet) -> i32 {
    let classification = classification_weight(node, patterns);
    let own_text = own_text_weight(dom::own_text(node).chars().count());
    let children = weight_child_nodes(node, weights, patterns);

    tracing::trace!(
        tag = %dom::tag_name(node),
        classification,
        own_text,
        children,
        "scored element"
    );

    classification + own_text + children
}

/// Bonus or penalty from the element's class, id, itemprop and inline style.
///
/// Every rule is checked independently, so several can apply at once.
#[must_use]
pub fn classification_weight(node: &NodeRef, patterns: &PatternSet) -> i32 {
    let class = dom::class_name(node);
    let id = dom::id(node);
    let mut weight = 0;

    if patterns.is_match(PatternKind::Positive, &class) {
        weight += 35;
    }
    if patterns.is_match(PatternKind::Positive, &id) {
        weight += 45;
    }
    if patterns.is_match(PatternKind::Unlikely, &class) {
        weight -= 20;
    }
    if patterns.is_match(PatternKind::Unlikely, &id) {
        weight -= 20;
    }
    if patterns.is_match(PatternKind::Negative, &class) {
        weight -= 50;
    }
    if patterns.is_match(PatternKind::Negative, &id) {
        weight -= 50;
    }

    let style = dom::attr(node, "style");
    if !style.is_empty() && patterns.is_match(PatternKind::NegativeStyle, &style) {
        weight -= 50;
    }

    let itemprop = dom::attr(node, "itemprop");
    if !itemprop.is_empty() && patterns.is_match(PatternKind::Positive, &itemprop) {
        weight += 100;
    }

    weight
}

/// Ten points per hundred characters of own text, rounded.
#[inline]
#[must_use]
pub fn own_text_weight(own_text_len: usize) -> i32 {
    (own_text_len as f64 / 100.0 * 10.0).round() as i32
}

/// Whether an element's id or class marks it as boilerplate.
fn is_negative(node: &NodeRef, patterns: &PatternSet) -> bool {
    patterns.is_match(PatternKind::Negative, &dom::id(node))
        || patterns.is_match(PatternKind::Negative, &dom::class_name(node))
}

/// Weight of one child or grandchild with enough own text.
///
/// div/p deltas are also persisted onto the element itself.
fn text_block_weight(
    node: &NodeRef,
    tag: &str,
    own_text: &str,
    own_text_len: usize,
    weights: &mut WeightTable,
) -> i32 {
    let mut weight = 0;

    if own_text_len > LONG_CHILD_TEXT_LEN {
        weight += 50.max((own_text_len / 10) as i32);
    }

    match tag {
        "h1" | "h2" => weight += 30,
        "div" | "p" => weight += noise_adjusted_weight(node, own_text, own_text_len, weights),
        _ => {}
    }

    weight
}

/// Length-based weight for div/p text, or a flat penalty when the text looks
/// like escaped markup or CSS. The result is added to the node's own weight.
fn noise_adjusted_weight(
    node: &NodeRef,
    own_text: &str,
    own_text_len: usize,
    weights: &mut WeightTable,
) -> i32 {
    let noise: usize = NOISE_TOKENS.iter().map(|t| own_text.matches(t).count()).sum();
    let value = if noise > MAX_NOISE_TOKENS {
        -30
    } else {
        (own_text_len as f64 / 35.0).round() as i32
    };

    weights.add(node.id, value);
    value
}

fn weight_child_nodes(root: &NodeRef, weights: &mut WeightTable, patterns: &PatternSet) -> i32 {
    let children = root.element_children();
    let mut weight = 0;
    let mut has_caption = false;
    let mut real_paragraphs = 0usize;

    for child in &children {
        let own_text = dom::own_text(child);
        let own_text_len = own_text.chars().count();
        if own_text_len < MIN_CHILD_TEXT_LEN {
            continue;
        }

        let tag = dom::tag_name(child);
        weight += text_block_weight(child, &tag, &own_text, own_text_len, weights);

        if tag == "div" || tag == "p" {
            if tag == "p" && own_text_len > REAL_PARAGRAPH_TEXT_LEN {
                real_paragraphs += 1;
            }
            if dom::class_name(child).to_lowercase() == "caption" {
                has_caption = true;
            }
        }
    }

    // Grandchildren are worth a third of children. A boilerplate-looking
    // child is not descended into and costs its parent instead.
    let mut grandchildren_weight = 0;
    for child in &children {
        if is_negative(child, patterns) {
            grandchildren_weight -= 30;
            continue;
        }

        for grandchild in child.element_children() {
            let own_text = dom::own_text(&grandchild);
            let own_text_len = own_text.chars().count();
            if own_text_len < MIN_CHILD_TEXT_LEN {
                continue;
            }
            let tag = dom::tag_name(&grandchild);
            grandchildren_weight +=
                text_block_weight(&grandchild, &tag, &own_text, own_text_len, weights);
        }
    }
    weight += grandchildren_weight / 3;

    if has_caption {
        weight += 30;
    }

    if real_paragraphs >= 2 {
        for child in &children {
            let tag = dom::tag_name(child);
            if HEADING_TAGS.contains(&tag.as_str()) {
                weight += 20;
            } else if TABULAR_TAGS.contains(&tag.as_str()) {
                weights.add(child.id, -30);
            }

            if tag == "p" {
                weights.add(child.id, 30);
            }
        }
    }

    weight
}

#[cfg(test)]
mod tests {
    use super::*;

    fn words(n: usize) -> String {
        "word ".repeat(n).trim_end().to_string()
    }

    #[test]
    fn own_text_weight_rounds() {
        assert_eq!(own_text_weight(0), 0);
        assert_eq!(own_text_weight(43), 4);
        assert_eq!(own_text_weight(47), 5);
        assert_eq!(own_text_weight(250), 25);
    }

    #[test]
    fn classification_rules_stack() {
        let doc = dom::parse(
            r#"<div class="article-content" id="main" itemprop="articleBody" style="display:none"></div>"#,
        );
        let div = doc.select("div").nodes()[0];

        assert_eq!(classification_weight(&div, &PatternSet::default()), 35 + 45 - 50 + 100);
    }

    #[test]
    fn negative_and_unlikely_names_are_penalized() {
        let doc = dom::parse(r#"<div class="comment" id="sidebar"></div>"#);
        let div = doc.select("div").nodes()[0];

        // class: unlikely (comment) + negative (comment); id: unlikely + negative (sidebar)
        assert_eq!(classification_weight(&div, &PatternSet::default()), -20 - 20 - 50 - 50);
    }

    #[test]
    fn long_paragraph_child_gets_text_bonus() {
        let html = format!("<div><p>{}</p></div>", "x".repeat(301));
        let doc = dom::parse(&html);
        let div = doc.select("div").nodes()[0];
        let p = doc.select("p").nodes()[0];
        let mut weights = WeightTable::new();

        // max(50, 30) + round(301 / 35)
        assert_eq!(score_element(&div, &mut weights, &PatternSet::default()), 59);
        assert_eq!(weights.get(p.id), 9);
    }

    #[test]
    fn noisy_paragraph_is_penalized_and_persisted() {
        let doc = dom::parse("<div><p>10px 20px 30px 40px 50px 60px margin</p></div>");
        let div = doc.select("div").nodes()[0];
        let p = doc.select("p").nodes()[0];
        let mut weights = WeightTable::new();

        assert_eq!(score_element(&div, &mut weights, &PatternSet::default()), -30);
        assert_eq!(weights.get(p.id), -30);
    }

    #[test]
    fn caption_child_adds_bonus() {
        let html = format!(r#"<div><div class="Caption">{}</div></div>"#, words(5));
        let doc = dom::parse(&html);
        let outer = doc.select("div").nodes()[0];
        let mut weights = WeightTable::new();

        // round(24 / 35) + caption bonus
        assert_eq!(score_element(&outer, &mut weights, &PatternSet::default()), 31);
    }

    #[test]
    fn short_children_are_ignored() {
        let doc = dom::parse("<div><p>too short</p><h1>tiny</h1></div>");
        let div = doc.select("div").nodes()[0];
        let mut weights = WeightTable::new();

        assert_eq!(score_element(&div, &mut weights, &PatternSet::default()), 0);
        assert!(weights.is_empty());
    }
}
