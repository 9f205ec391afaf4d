//! Compiled regex patterns for node classification.
//!
//! The default patterns are compiled once using `LazyLock`. A [`PatternSet`]
//! holds the patterns used for one extraction and lets callers swap any of
//! them out by [`PatternKind`].

#![allow(clippy::expect_used)]

use std::sync::LazyLock;

use regex::Regex;

use crate::error::{Error, Result};

// =============================================================================
// Scoring Patterns (class / id / itemprop / style)
// =============================================================================

/// Matches class/id names of elements that are rarely article content.
///
/// Note: `sponsor` and `a(d|ll|...)` have no `|` between them, so the
/// alternative is `sponsora(d|ll|...)`. Extraction parity depends on it.
pub static UNLIKELY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"com(bx|ment|munity)|dis(qus|cuss)|e(xtra|[-]?mail)|foot|header|menu|re(mark|ply)|rss|sh(are|outbox)|sponsora(d|ll|gegate|rchive|ttachment)|(pag(er|ination))|popup|print|login|si(debar|gn|ngle)",
    )
    .expect("UNLIKELY regex")
});

/// Matches class/id/itemprop values of likely article containers.
pub static POSITIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(^(body|content|h?entry|main|page|post|text|blog|story|haupt))|arti(cle|kel)|instapaper_body",
    )
    .expect("POSITIVE regex")
});

/// Matches class/id names of navigation, comments, ads and widgets.
pub static NEGATIVE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"nav($|igation)|user|com(ment|bx)|(^com-)|contact|foot|masthead|(me(dia|ta))|outbrain|promo|related|scroll|(sho(utbox|pping))|sidebar|sponsor|tags|tool|widget|player|disclaimer|toc|infobox|vcard",
    )
    .expect("NEGATIVE regex")
});

/// Matches inline styles that hide or shrink an element.
pub static NEGATIVE_STYLE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"hidden|display: ?none|font-size: ?small").expect("NEGATIVE_STYLE regex")
});

// =============================================================================
// Rendering Patterns (style / class)
// =============================================================================

/// Matches style or class values of hidden elements skipped when rendering.
pub static HIDDEN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"display:none|visibility:hidden").expect("HIDDEN regex")
});

/// Matches class values of captions skipped when rendering.
pub static CAPTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)caption").expect("CAPTION regex"));

// =============================================================================
// Byline Patterns
// =============================================================================

/// Words stripped from author names found through byline-like elements.
pub static IGNORE_AUTHOR_PARTS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)by|name|author|posted|twitter|handle|news").expect("IGNORE_AUTHOR_PARTS regex")
});

/// Unwraps "By... <name>, ..." style author strings.
pub static CLEAN_AUTHOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^By\S*(.*)[.,].*$").expect("CLEAN_AUTHOR regex"));

// =============================================================================
// Text Cleaning Patterns
// =============================================================================

/// Matches multiple whitespace characters for normalization.
pub static WHITESPACE_NORMALIZE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("WHITESPACE_NORMALIZE regex"));

/// Selects one of the swappable pattern sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternKind {
    /// Content-like class/id/itemprop (scoring bonus).
    Positive,
    /// Boilerplate-like class/id (scoring penalty, grandchild exclusion).
    Negative,
    /// Rarely-content class/id (scoring penalty).
    Unlikely,
    /// Hiding inline style (scoring penalty).
    NegativeStyle,
    /// Hidden style or class (skipped when rendering).
    Hidden,
    /// Caption class (skipped when rendering).
    Caption,
}

/// The classification patterns used by one extraction.
///
/// `Default` uses the built-in patterns above. Any of them can be replaced or
/// extended:
///
/// ```rust
/// use article_gravity::{PatternKind, PatternSet};
///
/// let patterns = PatternSet::default()
///     .with_pattern(PatternKind::Negative, "sidebar|newsletter")?;
/// assert!(patterns.is_match(PatternKind::Negative, "newsletter-box"));
/// # Ok::<(), article_gravity::Error>(())
/// ```
#[derive(Debug, Clone)]
pub struct PatternSet {
    positive: Regex,
    negative: Regex,
    unlikely: Regex,
    negative_style: Regex,
    hidden: Regex,
    caption: Regex,
}

impl Default for PatternSet {
    fn default() -> Self {
        Self {
            positive: POSITIVE.clone(),
            negative: NEGATIVE.clone(),
            unlikely: UNLIKELY.clone(),
            negative_style: NEGATIVE_STYLE.clone(),
            hidden: HIDDEN.clone(),
            caption: CAPTION.clone(),
        }
    }
}

impl PatternSet {
    /// Returns the compiled pattern for `kind`.
    #[must_use]
    pub fn get(&self, kind: PatternKind) -> &Regex {
        match kind {
            PatternKind::Positive => &self.positive,
            PatternKind::Negative => &self.negative,
            PatternKind::Unlikely => &self.unlikely,
            PatternKind::NegativeStyle => &self.negative_style,
            PatternKind::Hidden => &self.hidden,
            PatternKind::Caption => &self.caption,
        }
    }

    fn slot(&mut self, kind: PatternKind) -> &mut Regex {
        match kind {
            PatternKind::Positive => &mut self.positive,
            PatternKind::Negative => &mut self.negative,
            PatternKind::Unlikely => &mut self.unlikely,
            PatternKind::NegativeStyle => &mut self.negative_style,
            PatternKind::Hidden => &mut self.hidden,
            PatternKind::Caption => &mut self.caption,
        }
    }

    /// Tests `haystack` against the pattern for `kind` (unanchored search).
    #[inline]
    #[must_use]
    pub fn is_match(&self, kind: PatternKind, haystack: &str) -> bool {
        self.get(kind).is_match(haystack)
    }

    /// Replaces the pattern for `kind`.
    pub fn set(&mut self, kind: PatternKind, pattern: &str) -> Result<()> {
        let regex = Regex::new(pattern).map_err(|source| Error::InvalidPattern { kind, source })?;
        *self.slot(kind) = regex;
        Ok(())
    }

    /// Extends the pattern for `kind` with another alternative.
    pub fn append(&mut self, kind: PatternKind, pattern: &str) -> Result<()> {
        let combined = format!("{}|{pattern}", self.get(kind).as_str());
        self.set(kind, &combined)
    }

    /// Builder form of [`PatternSet::set`].
    pub fn with_pattern(mut self, kind: PatternKind, pattern: &str) -> Result<Self> {
        self.set(kind, pattern)?;
        Ok(self)
    }
}
