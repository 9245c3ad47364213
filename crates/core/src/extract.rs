//! Readability extraction.
//!
//! The content-extraction algorithm itself lives in `dom_smoothie`; this
//! module configures it, maps its output onto [`Article`], and fills in a
//! title when the extractor could not find one.

use dom_smoothie::{Config, Readability, ReadabilityError};
use scraper::{Html, Selector};
use url::Url;

use crate::{Article, QuteReaderError, Result};

/// Extractor tuning knobs.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Minimum character count for a candidate block to count as content.
    pub char_threshold: usize,
    /// Number of top candidates to compare.
    pub top_candidates: usize,
    /// Maximum elements to parse (0 = unlimited).
    pub max_elements: usize,
}

impl Default for ExtractConfig {
    fn default() -> Self {
        Self { char_threshold: 500, top_candidates: 5, max_elements: 0 }
    }
}

/// Extracts the readable article from `html`.
///
/// `url` is the document location; relative links and images in the
/// extracted content are resolved against it.
pub fn extract_article(html: &str, url: Option<&Url>, config: &ExtractConfig) -> Result<Article> {
    let cfg = Config {
        char_threshold: config.char_threshold,
        n_top_candidates: config.top_candidates,
        max_elements_to_parse: config.max_elements,
        ..Default::default()
    };

    let mut readability = Readability::new(html, url.map(Url::as_str), Some(cfg))
        .map_err(|e| QuteReaderError::Extraction(e.to_string()))?;
    let parsed = readability.parse().map_err(|e| match e {
        ReadabilityError::GrabFailed => QuteReaderError::NoContent,
        other => QuteReaderError::Extraction(other.to_string()),
    })?;

    if parsed.text_content.trim().is_empty() {
        return Err(QuteReaderError::NoContent);
    }

    let mut title = parsed.title.trim().to_string();
    if title.is_empty() {
        title = document_title(html).unwrap_or_default();
    }

    tracing::debug!(
        title = %title,
        site_name = ?parsed.site_name,
        length = parsed.length,
        "article extracted"
    );

    Ok(Article {
        title,
        site_name: non_blank(parsed.site_name),
        content: parsed.content.to_string(),
        byline: non_blank(parsed.byline),
        excerpt: non_blank(parsed.excerpt),
        source_url: url.map(Url::to_string),
    })
}

/// First non-empty `<title>` or `<h1>` text of the page.
fn document_title(html: &str) -> Option<String> {
    let doc = Html::parse_document(html);

    ["title", "h1"]
        .iter()
        .filter_map(|s| Selector::parse(s).ok())
        .find_map(|selector| {
            doc.select(&selector)
                .map(|el| el.text().collect::<String>().trim().to_string())
                .find(|text| !text.is_empty())
        })
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
