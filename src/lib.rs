//! # article-gravity
//!
//! Heuristic main-content extraction for HTML articles.
//!
//! Every block-level candidate under `<body>` gets a gravity score from its
//! class/id names and from the amount of text in its children and
//! grandchildren. The best-scoring element becomes the content root. Its
//! images are ranked, and it is rendered to clean text (or minimal markup)
//! after pruning low-weight descendants.
//!
//! ## Quick Start
//!
//! ```rust
//! use article_gravity::extract;
//!
//! let html = r#"<html><body>
//!   <div class="sidebar"><p>Related links</p></div>
//!   <div class="article-body">
//!     <p>First paragraph with plenty of words to count as a real paragraph of text.</p>
//!     <p>Second paragraph, which is also long enough to count as a real paragraph.</p>
//!   </div>
//! </body></html>"#;
//!
//! let article = extract(html)?;
//! assert!(article.text.starts_with("First paragraph"));
//! assert!(article.text.contains("\n\nSecond paragraph"));
//! # Ok::<(), article_gravity::Error>(())
//! ```
//!
//! ## Building Blocks
//!
//! The pipeline steps are public and work on a caller-owned
//! [`dom::Document`]:
//!
//! - [`find_best_element`] / [`score_element`]: pick and score content roots
//! - [`extract_images`]: rank the images of a root
//! - [`format`] / [`Formatter`]: render a root to text or markup
//! - [`extract_document`]: all of the above in one pass
//!
//! Scoring state is kept in a [`WeightTable`] passed explicitly between the
//! steps; the parsed document is never modified by them.

mod error;
mod extract;
mod options;
mod result;

/// Compiled classification patterns and the swappable [`PatternSet`].
pub mod patterns;

/// DOM operations adapter over `dom_query`.
pub mod dom;

/// Per-element weight annotations.
pub mod weights;

/// Element scoring.
pub mod scorer;

/// Content root selection.
pub mod finder;

/// Image ranking.
pub mod images;

/// Pruning and rendering of the content root.
pub mod formatter;

/// Author name and description resolution.
pub mod byline;

/// URL resolution for links and images.
pub mod url_utils;

// Public API - re-exports
pub use error::{Error, Result};
pub use extract::{collect_links, extract_document};
pub use finder::{find_best_among, find_best_element};
pub use formatter::{format, Formatter, FormatterConfig, OutputFormat};
pub use images::{analyze_image, extract_images};
pub use options::Options;
pub use patterns::{PatternKind, PatternSet};
pub use result::{Article, ContentResult, ImageCandidate, Link};
pub use scorer::score_element;
pub use weights::WeightTable;

/// Extracts the article from an HTML document using default options.
///
/// # Example
///
/// ```rust
/// use article_gravity::extract;
///
/// let html = "<html><body><div><p>Content</p></div></body></html>";
/// let article = extract(html)?;
/// println!("{}", article.text);
/// # Ok::<(), article_gravity::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract(html: &str) -> Result<Article> {
    extract_with_options(html, &Options::default())
}

/// Extracts the article from an HTML document with custom options.
///
/// Fails on empty input or when the configured nodes-to-keep selector does
/// not parse.
///
/// # Example
///
/// ```rust
/// use article_gravity::{extract_with_options, FormatterConfig, Options, OutputFormat};
///
/// let html = "<html><body><div><p>Content</p></div></body></html>";
/// let options = Options {
///     formatter: FormatterConfig {
///         format: OutputFormat::Markup,
///         ..FormatterConfig::default()
///     },
///     extract_author: false,
///     ..Options::default()
/// };
/// let article = extract_with_options(html, &options)?;
/// # Ok::<(), article_gravity::Error>(())
/// ```
#[allow(clippy::missing_errors_doc)]
pub fn extract_with_options(html: &str, options: &Options) -> Result<Article> {
    extract::extract_content(html, options)
}
