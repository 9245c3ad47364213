//! Reader view template.
//!
//! The rendered page is a standalone document: a fixed reading stylesheet,
//! the colors scraped from the browser config, and a link to the user's own
//! `readability.css` so everything can be overridden without rebuilding.

use std::path::{Path, PathBuf};

use url::Url;

use crate::{Article, Theme};

const BASE_CSS: &str = r#"        body {
            margin: 40px auto;
            max-width: 650px;
            line-height: 1.4;
            padding: 0 10px;
            font-size: 18px;
        }
        h1, h2, h3 {
            line-height: 1.2;
        }
        img {
            max-width: 100%;
            height: auto;
        }
        p > img:only-child,
        p > a:only-child > img:only-child,
        .wp-caption img,
        figure img {
            display: block;
        }
        .reader-show-element {
            display: initial;
        }
"#;

/// Inputs to [`render`] besides the article itself.
#[derive(Debug, Clone)]
pub struct RenderOptions {
    /// Page URL, used for the subtitle when the site has no name.
    pub url: Url,
    /// User stylesheet linked after the built-in styles.
    pub stylesheet: Option<PathBuf>,
    pub theme: Theme,
}

impl RenderOptions {
    pub fn new(url: Url) -> Self {
        Self { url, stylesheet: None, theme: Theme::default() }
    }

    pub fn stylesheet(mut self, path: impl Into<PathBuf>) -> Self {
        self.stylesheet = Some(path.into());
        self
    }

    pub fn theme(mut self, theme: Theme) -> Self {
        self.theme = theme;
        self
    }
}

/// Renders `article` into a complete HTML document.
///
/// Title and subtitle are escaped; the content is inserted as-is since it is
/// already markup produced by the extractor.
pub fn render(article: &Article, options: &RenderOptions) -> String {
    let title = escape_html(&article.title);
    let subtitle = escape_html(&article.subtitle(&options.url));

    let mut html = String::with_capacity(article.content.len() + 2048);

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("    <meta http-equiv=\"Content-Type\" content=\"text/html; charset=UTF-8\">\n");
    html.push_str("    <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("    <title>{}</title>\n", title));
    html.push_str("    <style type=\"text/css\">\n");
    html.push_str(BASE_CSS);
    for line in options.theme.css().lines() {
        html.push_str("        ");
        html.push_str(line);
        html.push('\n');
    }
    html.push_str("    </style>\n");

    if let Some(path) = &options.stylesheet {
        html.push_str(&format!(
            "    <link rel=\"stylesheet\" type=\"text/css\" href=\"{}\">\n",
            escape_html(&file_url(path))
        ));
    }

    html.push_str("</head>\n");
    html.push_str(&format!(
        "<body><div id=\"readability-page-1\" class=\"page\"><h1>{}</h1><p>{}</p>{}</div></body>\n</html>\n",
        title, subtitle, article.content
    ));

    html
}

fn file_url(path: &Path) -> String {
    Url::from_file_path(path).map_or_else(|_| format!("file://{}", path.display()), |url| url.to_string())
}

/// Escapes text for use in element content and attribute values.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
