//! The article produced by readability extraction.

use serde::Serialize;
use url::Url;

/// Simplified page content, ready for rendering.
///
/// Lives for a single invocation: produced by
/// [`extract_article`](crate::extract_article), consumed once by
/// [`render`](fn@crate::render).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Article {
    pub title: String,
    pub site_name: Option<String>,
    /// Cleaned article body as HTML.
    pub content: String,
    pub byline: Option<String>,
    pub excerpt: Option<String>,
    /// URL the page was read from, if known.
    pub source_url: Option<String>,
}

impl Article {
    /// Line shown under the title.
    ///
    /// The site name when the page declares one, otherwise the host of `url`.
    /// URLs without a host (`about:`, `data:`) are shown whole.
    pub fn subtitle(&self, url: &Url) -> String {
        match self.site_name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => url.host_str().map_or_else(|| url.to_string(), str::to_string),
        }
    }
}
