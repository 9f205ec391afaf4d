//! Result types for extraction output.
//!
//! [`ContentResult`] borrows from the parsed document and is what one
//! extraction pass produces. [`Article`] is the owned, serializable summary
//! returned by [`crate::extract`].

use dom_query::NodeRef;
use serde::{Deserialize, Serialize};

/// A scored `<img>` found under (or next to) the content root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageCandidate {
    /// Raw `src` attribute value.
    pub source_url: String,

    /// Heuristic weight from size, alt/title length and link `rel`.
    pub weight: i32,

    /// `title` attribute, empty when absent.
    pub title: String,

    /// Parsed `height` attribute, 0 when absent or not an integer.
    pub height: i32,

    /// Parsed `width` attribute, 0 when absent or not an integer.
    pub width: i32,

    /// `alt` attribute, empty when absent.
    pub alt_text: String,

    /// Whether the enclosing element has `rel` containing `nofollow`.
    pub no_follow: bool,
}

impl ImageCandidate {
    /// Whether a known dimension marks the image as an icon or spacer.
    ///
    /// Width under 100 or height under 50 counts only when the attribute was
    /// present and parsed.
    #[must_use]
    pub fn is_too_small(&self) -> bool {
        (self.width != 0 && self.width < 100) || (self.height != 0 && self.height < 50)
    }
}

/// A hyperlink inside the content root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// `href`, resolved against the base URL when one was given.
    pub url: String,

    /// Link text, whitespace-normalized.
    pub text: String,

    /// Byte offset of the link's markup within the root's markup.
    pub position: usize,
}

/// Everything one extraction pass decided about a document.
///
/// Node references borrow from the document the pass ran over.
#[derive(Debug, Clone, Default)]
pub struct ContentResult<'a> {
    /// The element chosen as the article body.
    pub root: Option<NodeRef<'a>>,

    /// The image picked by the decaying running-maximum rule.
    pub best_image: Option<NodeRef<'a>>,

    /// All surviving images, weight descending, ties in document order.
    pub ranked_images: Vec<ImageCandidate>,

    /// Rendered article text (plain or markup, per the formatter config).
    pub formatted_text: String,

    /// Links found under the root.
    pub links: Vec<Link>,
}

/// Owned extraction result.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    /// Rendered article text.
    pub text: String,

    /// URL of the best image, resolved and escaped.
    pub image_url: Option<String>,

    /// Ranked images under the content root.
    pub images: Vec<ImageCandidate>,

    /// Links under the content root.
    pub links: Vec<Link>,

    /// Author name, when one could be resolved.
    pub author_name: Option<String>,

    /// Short author bio, when one could be resolved.
    pub author_description: Option<String>,
}
