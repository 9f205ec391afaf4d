//! Best-node selection.
//!
//! Picks the single element most likely to be the article body, either from
//! the default candidate set of a document or from any caller-supplied nodes.

use dom_query::{Document, NodeRef};

use crate::dom;
use crate::patterns::PatternSet;
use crate::scorer::score_element;
use crate::weights::WeightTable;

/// Tags eligible as content roots in candidate mode.
pub const CANDIDATE_TAGS: &[&str] = &["p", "div", "td", "h1", "h2", "article", "section"];

/// Seed weight of the first candidate. Each later candidate gets half the
/// previous seed.
const INITIAL_GRAVITY: i32 = 100;

/// Running maximum the first candidate has to beat. Low enough that an
/// all-negative document still yields an element.
const MIN_BEST_WEIGHT: i32 = -200;

/// Candidate elements of `doc` in document order, seeding their weights.
///
/// Every element under `<body>` with a tag in [`CANDIDATE_TAGS`] is returned.
/// The first gets a seed of 100 in `weights`, each later one half of the
/// previous seed (integer division), so earlier candidates survive pruning
/// more easily.
pub fn candidates<'a>(doc: &'a Document, weights: &mut WeightTable) -> Vec<NodeRef<'a>> {
    let mut nodes = Vec::new();
    let mut gravity = INITIAL_GRAVITY;

    for body in doc.select("body").nodes() {
        for el in dom::descendant_elements(body) {
            if CANDIDATE_TAGS.contains(&dom::tag_name(&el).as_str()) {
                weights.set(el.id, gravity);
                gravity /= 2;
                nodes.push(el);
            }
        }
    }

    nodes
}

/// Find the element of `doc` most likely to hold the article.
///
/// Returns `None` only when the document has no candidate elements.
///
/// # Example
///
/// ```rust
/// use article_gravity::{dom, find_best_element, PatternSet, WeightTable};
///
/// let doc = dom::parse(r#"<body>
///     <div class="sidebar"><p>Links and more links in a sidebar box</p></div>
///     <div class="article-body">
///         <p>The first paragraph of the story carries plenty of words in it.</p>
///         <p>The second paragraph of the story carries plenty of words too.</p>
///     </div>
/// </body>"#);
///
/// let mut weights = WeightTable::new();
/// let best = find_best_element(&doc, &mut weights, &PatternSet::default()).unwrap();
/// assert_eq!(dom::class_name(&best), "article-body");
/// ```
pub fn find_best_element<'a>(
    doc: &'a Document,
    weights: &mut WeightTable,
    patterns: &PatternSet,
) -> Option<NodeRef<'a>> {
    let nodes = candidates(doc, weights);
    tracing::debug!(candidates = nodes.len(), "scoring candidate elements");
    find_best_among(nodes, weights, patterns)
}

/// Pick the highest-scoring element among `nodes`.
///
/// No tag filter and no seed bonus. Ties keep the earliest element.
pub fn find_best_among<'a, I>(
    nodes: I,
    weights: &mut WeightTable,
    patterns: &PatternSet,
) -> Option<NodeRef<'a>>
where
    I: IntoIterator<Item = NodeRef<'a>>,
{
    let mut max_weight = MIN_BEST_WEIGHT;
    let mut best = None;

    for node in nodes {
        let weight = score_element(&node, weights, patterns);
        if weight > max_weight {
            max_weight = weight;
            best = Some(node);
        }
    }

    if let Some(node) = &best {
        tracing::debug!(
            tag = %dom::tag_name(node),
            class = %dom::class_name(node),
            weight = max_weight,
            "selected best element"
        );
    }

    best
}
