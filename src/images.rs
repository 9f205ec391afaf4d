//! Image ranking.
//!
//! Scores the `<img>` elements under a content root from their declared size,
//! alt/title text and link `rel`, and picks a best image.

use dom_query::NodeRef;

use crate::dom;
use crate::result::ImageCandidate;

/// Declared dimensions at or above this earn a bonus, below it a penalty.
const MIN_DIMENSION: i32 = 50;

/// alt/title text longer than this earns a bonus.
const DESCRIPTIVE_TEXT_LEN: usize = 35;

/// `img` elements that are `node` or inside it, in document order.
fn imgs_within<'a>(node: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    std::iter::once(*node)
        .chain(node.descendants_it())
        .filter(|n| n.has_name("img"))
        .collect()
}

/// Images considered for `root`: its own, or its parent's when it has none.
#[must_use]
pub fn images_for<'a>(root: &NodeRef<'a>) -> Vec<NodeRef<'a>> {
    let imgs = imgs_within(root);
    if !imgs.is_empty() {
        return imgs;
    }
    root.parent().map(|parent| imgs_within(&parent)).unwrap_or_default()
}

/// Sources with "ad" in them twice or more are treated as advertisements.
fn is_ad_image(src: &str) -> bool {
    src.matches("ad").count() >= 2
}

fn dimension_weight(value: Option<i32>) -> i32 {
    match value {
        Some(v) if v >= MIN_DIMENSION => 20,
        Some(_) => -20,
        None => 0,
    }
}

/// Score a single image. Returns `None` for images without a `src` and for
/// ad-like sources.
#[must_use]
pub fn analyze_image(img: &NodeRef) -> Option<ImageCandidate> {
    let source_url = dom::attr(img, "src");
    if source_url.is_empty() || is_ad_image(&source_url) {
        tracing::trace!(src = %source_url, "dropping image");
        return None;
    }

    let height = dom::int_attr(img, "height");
    let width = dom::int_attr(img, "width");
    let alt_text = dom::attr(img, "alt");
    let title = dom::attr(img, "title");

    let mut weight = dimension_weight(height) + dimension_weight(width);
    if alt_text.chars().count() > DESCRIPTIVE_TEXT_LEN {
        weight += 20;
    }
    if title.chars().count() > DESCRIPTIVE_TEXT_LEN {
        weight += 20;
    }

    let no_follow = img
        .parent()
        .is_some_and(|parent| dom::attr(&parent, "rel").contains("nofollow"));
    if no_follow {
        weight -= 40;
    }

    Some(ImageCandidate {
        source_url,
        weight,
        title,
        height: height.unwrap_or(0),
        width: width.unwrap_or(0),
        alt_text,
        no_follow,
    })
}

/// Rank the images of `root` and pick the best one.
///
/// The best pick walks images in document order with a multiplier that starts
/// at 1 and halves on every new maximum, so later images need to outweigh
/// earlier ones by a growing margin. The ranked list is sorted by the raw
/// weight instead, so its head can differ from the best pick.
///
/// ```rust
/// use article_gravity::{dom, extract_images};
///
/// let doc = dom::parse(r#"<div>
///     <img src="small.png" height="80">
///     <img src="large.png" height="400" width="600">
/// </div>"#);
/// let root = doc.select("div").nodes()[0];
///
/// let (best, ranked) = extract_images(&root);
/// assert_eq!(best.map(|img| dom::attr(&img, "src")).as_deref(), Some("small.png"));
/// assert_eq!(ranked[0].source_url, "large.png");
/// ```
#[must_use]
pub fn extract_images<'a>(root: &NodeRef<'a>) -> (Option<NodeRef<'a>>, Vec<ImageCandidate>) {
    let mut best = None;
    let mut max_weight = 0;
    let mut decay = 1.0_f64;
    let mut ranked = Vec::new();

    for img in images_for(root) {
        let Some(candidate) = analyze_image(&img) else {
            continue;
        };

        let decayed = (f64::from(candidate.weight) * decay) as i32;
        if decayed > max_weight {
            max_weight = decayed;
            best = Some(img);
            decay /= 2.0;
        }
        ranked.push(candidate);
    }

    // Stable sort keeps document order among equal weights.
    ranked.sort_by(|a, b| b.weight.cmp(&a.weight));

    tracing::debug!(images = ranked.len(), has_best = best.is_some(), "ranked images");
    (best, ranked)
}
