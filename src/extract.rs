//! Extraction pipeline.
//!
//! One pass picks the content root, ranks its images, renders it and collects
//! its links. [`extract_content`] runs a pass over a cleaned document and,
//! when that yields no text, a second pass over a fresh uncleaned parse.

use url::Url;

use crate::byline::Byline;
use crate::dom::{self, Document, NodeRef};
use crate::error::{Error, Result};
use crate::finder::find_best_element;
use crate::formatter::Formatter;
use crate::images::extract_images;
use crate::options::Options;
use crate::result::{Article, ContentResult, Link};
use crate::url_utils;
use crate::weights::WeightTable;

/// Elements removed before the first pass.
const CLUTTER_SELECTOR: &str = "script, noscript, style";

/// Run one extraction pass over `doc`.
///
/// The document is not modified; all scoring state lives in a weight table
/// owned by this call.
pub fn extract_document<'a>(doc: &'a Document, options: &Options) -> Result<ContentResult<'a>> {
    let formatter = Formatter::new(options.formatter.clone())?;
    let base = options.base_url.as_deref().and_then(url_utils::parse_base_url);
    Ok(run_pass(doc, options, &formatter, base.as_ref()))
}

fn run_pass<'a>(
    doc: &'a Document,
    options: &Options,
    formatter: &Formatter,
    base: Option<&Url>,
) -> ContentResult<'a> {
    let mut weights = WeightTable::new();
    let Some(root) = find_best_element(doc, &mut weights, &options.patterns) else {
        tracing::debug!("no candidate elements in document");
        return ContentResult::default();
    };

    let (best_image, ranked_images) = if options.extract_images {
        extract_images(&root)
    } else {
        (None, Vec::new())
    };

    let formatted_text = formatter.format(&root, &weights, &options.patterns);

    let links = if options.extract_links {
        collect_links(&root, base)
    } else {
        Vec::new()
    };

    ContentResult {
        root: Some(root),
        best_image,
        ranked_images,
        formatted_text,
        links,
    }
}

/// Links under `root` with their position in the root's markup.
///
/// Each link is searched after the end of the previous one, so repeated
/// identical links get increasing positions.
#[must_use]
pub fn collect_links(root: &NodeRef, base: Option<&Url>) -> Vec<Link> {
    let full_html = root.html();
    let mut search_from = 0;
    let mut links = Vec::new();

    for anchor in dom::select_or_empty(root, "a[href]") {
        let markup = anchor.html();
        let found = full_html
            .get(search_from..)
            .and_then(|rest| rest.find(&*markup))
            .map(|offset| search_from + offset);
        let position = found.unwrap_or(search_from);
        if found.is_some() {
            search_from = position + markup.len();
        }

        links.push(Link {
            url: url_utils::resolve_url(&dom::attr(&anchor, "href"), base),
            text: dom::text(&anchor),
            position,
        });
    }

    links
}

fn to_article(result: &ContentResult, base: Option<&Url>) -> Article {
    Article {
        text: result.formatted_text.clone(),
        image_url: result
            .best_image
            .as_ref()
            .and_then(|img| url_utils::image_url(&dom::attr(img, "src"), base)),
        images: result.ranked_images.clone(),
        links: result.links.clone(),
        author_name: None,
        author_description: None,
    }
}

/// Main entry point for article extraction.
pub(crate) fn extract_content(html: &str, options: &Options) -> Result<Article> {
    if html.is_empty() {
        return Err(Error::EmptyInput);
    }

    let formatter = Formatter::new(options.formatter.clone())?;
    let base = options.base_url.as_deref().and_then(url_utils::parse_base_url);
    if options.base_url.is_some() && base.is_none() {
        tracing::debug!(base_url = ?options.base_url, "ignoring unparseable base url");
    }

    let document = dom::parse(html);

    // Bylines are read from the uncleaned document.
    let byline = if options.extract_author {
        Byline::from_document(&document, &options.patterns)
    } else {
        Byline::default()
    };

    if options.clean_scripts {
        document.select(CLUTTER_SELECTOR).remove();
    }

    let first_pass = run_pass(&document, options, &formatter, base.as_ref());
    let mut article = to_article(&first_pass, base.as_ref());

    if article.text.is_empty() && options.clean_scripts && options.retry_uncleaned {
        tracing::debug!("cleaned pass produced no text, retrying on uncleaned document");
        let uncleaned = dom::parse(html);
        let second_pass = run_pass(&uncleaned, options, &formatter, base.as_ref());
        article = to_article(&second_pass, base.as_ref());
    }

    let (author_name, author_description) = byline.finish(&article.text);
    article.author_name = author_name;
    article.author_description = author_description;

    tracing::debug!(
        text_len = article.text.len(),
        images = article.images.len(),
        links = article.links.len(),
        "extraction finished"
    );
    Ok(article)
}
