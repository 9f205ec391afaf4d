//! Configuration options for content extraction.
//!
//! The `Options` struct controls which parts of an article are extracted and
//! how the content root is rendered.

use crate::formatter::FormatterConfig;
use crate::patterns::PatternSet;

/// Configuration options for content extraction.
///
/// All fields are public for easy configuration. Use `Default::default()`
/// for standard settings.
///
/// # Example
///
/// ```rust
/// use article_gravity::{FormatterConfig, Options, OutputFormat};
///
/// // Use defaults
/// let options = Options::default();
///
/// // Customize specific fields
/// let options = Options {
///     formatter: FormatterConfig {
///         format: OutputFormat::Markup,
///         ..FormatterConfig::default()
///     },
///     extract_links: false,
///     base_url: Some("https://example.com/news/".to_string()),
///     ..Options::default()
/// };
/// ```
#[derive(Debug, Clone)]
#[allow(clippy::struct_excessive_bools)]
pub struct Options {
    /// Output format, kept-node selector and paragraph length thresholds.
    ///
    /// Default: `FormatterConfig::default()` (plain text)
    pub formatter: FormatterConfig,

    /// Classification patterns used for scoring and rendering.
    ///
    /// Default: `PatternSet::default()`
    pub patterns: PatternSet,

    /// Rank the images of the content root and pick a best image.
    ///
    /// Default: `true`
    pub extract_images: bool,

    /// Collect the links inside the content root.
    ///
    /// Default: `true`
    pub extract_links: bool,

    /// Resolve the author name and description.
    ///
    /// Default: `true`
    pub extract_author: bool,

    /// Remove `script`, `noscript` and `style` elements before the first pass.
    ///
    /// Default: `true`
    pub clean_scripts: bool,

    /// Run a second pass over the uncleaned document when the first pass
    /// produced no text.
    ///
    /// Default: `true`
    pub retry_uncleaned: bool,

    /// URL the document was fetched from, used to resolve relative link and
    /// image URLs.
    ///
    /// Default: `None`
    pub base_url: Option<String>,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            formatter: FormatterConfig::default(),
            patterns: PatternSet::default(),
            extract_images: true,
            extract_links: true,
            extract_author: true,
            clean_scripts: true,
            retry_uncleaned: true,
            base_url: None,
        }
    }
}
