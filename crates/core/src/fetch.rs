//! Content acquisition from URLs, files, and stdin.
//!
//! In hints mode the page is fetched over HTTP; in command mode qutebrowser
//! has already dumped the rendered page to a file.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::{QuteReaderError, Result};

/// HTTP client configuration for fetching web pages.
#[derive(Debug, Clone)]
pub struct FetchConfig {
    /// Request timeout in seconds.
    pub timeout: u64,
    /// User-Agent string; qutebrowser passes its own via `QUTE_USER_AGENT`.
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout: 30,
            user_agent: "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 (KHTML, like Gecko) qute-reader/0.1"
                .to_string(),
        }
    }
}

/// Where the page HTML comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Url(Url),
    File(PathBuf),
    Stdin,
}

/// Reads the page HTML from `source`.
pub async fn acquire(source: &Source, config: &FetchConfig) -> Result<String> {
    match source {
        Source::Url(url) => fetch_url(url.as_str(), config).await,
        Source::File(path) => fetch_file(path),
        Source::Stdin => fetch_stdin(),
    }
}

/// Fetches HTML content from a URL.
///
/// Follows redirects and fails on non-success status codes, since an error
/// page would otherwise be rendered as if it were the article.
pub async fn fetch_url(url: &str, config: &FetchConfig) -> Result<String> {
    let parsed_url = Url::parse(url).map_err(|e| QuteReaderError::InvalidUrl(format!("{}: {}", url, e)))?;

    if !matches!(parsed_url.scheme(), "http" | "https") {
        return Err(QuteReaderError::InvalidUrl(format!(
            "{}: only http:// and https:// can be fetched",
            url
        )));
    }

    let client = Client::builder()
        .timeout(Duration::from_secs(config.timeout))
        .build()
        .map_err(QuteReaderError::HttpError)?;

    tracing::debug!(url = %parsed_url, "fetching page");

    let response = client
        .get(parsed_url)
        .header("User-Agent", &config.user_agent)
        .header("Accept", "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8")
        .send()
        .await
        .map_err(|e| {
            if e.is_timeout() {
                QuteReaderError::Timeout { timeout: config.timeout }
            } else {
                QuteReaderError::HttpError(e)
            }
        })?
        .error_for_status()?;

    let content = response.text().await?;
    tracing::debug!(bytes = content.len(), "page fetched");

    Ok(content)
}

/// Reads HTML content from a local file.
pub fn fetch_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(QuteReaderError::FileNotFound(path.to_path_buf()));
    }

    let content = fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), bytes = content.len(), "page read from file");
    Ok(content)
}

/// Reads HTML content from standard input until EOF.
pub fn fetch_stdin() -> Result<String> {
    use std::io::{self, Read};

    let mut buffer = String::new();
    io::stdin().read_to_string(&mut buffer)?;

    Ok(buffer)
}
