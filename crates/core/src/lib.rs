//! Reader view for qutebrowser.
//!
//! Takes the page qutebrowser hands to a userscript, extracts the readable
//! article with [`dom_smoothie`], renders it into a themed standalone HTML
//! document and asks the browser to open it in a new tab.
pub mod article;
pub mod env;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod host;
pub mod output;
pub mod pipeline;
pub mod render;
pub mod theme;

#[cfg(test)]
mod test_utils;

pub use article::Article;
pub use env::{Environment, Mode};
pub use error::{QuteReaderError, Result};
pub use extract::{ExtractConfig, extract_article};
pub use fetch::{FetchConfig, Source, acquire, fetch_file, fetch_stdin, fetch_url};
pub use host::{FifoHost, Host, HostCommand, RecordingHost, StdoutHost};
pub use output::write_document;
pub use pipeline::{Options, run, run_and_report};
pub use render::{RenderOptions, escape_html, render};
pub use theme::Theme;
