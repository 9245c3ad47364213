//! The reader view pipeline.
//!
//! ```text
//! environment -> acquire -> extract -> theme -> render -> write -> open
//! ```
//!
//! # Example
//!
//! ```rust,no_run
//! use qute_reader_core::{Environment, FifoHost, Options, StdoutHost, run_and_report};
//!
//! # #[tokio::main]
//! # async fn main() -> qute_reader_core::Result<()> {
//! let env = Environment::from_env()?;
//! let options = Options::for_environment(&env);
//! let path = match &env.fifo {
//!     Some(fifo) => run_and_report(&env, &options, &FifoHost::new(fifo)).await?,
//!     None => run_and_report(&env, &options, &StdoutHost).await?,
//! };
//! println!("{}", path.display());
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

use crate::fetch::{FetchConfig, Source, acquire};
use crate::{
    Environment, ExtractConfig, Host, HostCommand, RenderOptions, Result, Theme, extract_article, render,
    write_document,
};

/// Per-run settings layered on top of the [`Environment`].
#[derive(Debug, Clone)]
pub struct Options {
    pub fetch: FetchConfig,
    pub extract: ExtractConfig,
    /// Replaces the environment-derived source.
    pub source: Option<Source>,
    /// Replaces `<data_dir>/userscripts/readability.html`.
    pub output: Option<PathBuf>,
    /// Ask the browser to open the result.
    pub open: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            fetch: FetchConfig::default(),
            extract: ExtractConfig::default(),
            source: None,
            output: None,
            open: true,
        }
    }
}

impl Options {
    /// Defaults, with the browser's own user agent when it provides one.
    pub fn for_environment(env: &Environment) -> Self {
        let mut options = Self::default();
        if let Some(ua) = &env.user_agent {
            options.fetch.user_agent = ua.clone();
        }
        options
    }
}

/// Runs the pipeline and returns the path of the written document.
pub async fn run(env: &Environment, options: &Options, host: &dyn Host) -> Result<PathBuf> {
    let source = options.source.clone().unwrap_or_else(|| env.source());
    tracing::debug!(mode = %env.mode, source = ?source, "reading page");

    let html = acquire(&source, &options.fetch).await?;

    let article = extract_article(&html, env.base_url(), &options.extract)?;

    let theme = Theme::load(&env.config_file());
    if !theme.is_empty() {
        tracing::debug!(theme = ?theme, "theme colors found");
    }

    let render_options = RenderOptions::new(env.url.clone())
        .stylesheet(env.stylesheet_path())
        .theme(theme);
    let document = render(&article, &render_options);

    let path = options.output.clone().unwrap_or_else(|| env.output_path());
    write_document(&path, &document)?;

    if options.open {
        host.send(&HostCommand::open_tab(path.display().to_string()))?;
    }

    Ok(path)
}

/// Like [`run`], but tells the browser about a failure before returning it.
pub async fn run_and_report(env: &Environment, options: &Options, host: &dyn Host) -> Result<PathBuf> {
    match run(env, options, host).await {
        Ok(path) => Ok(path),
        Err(e) => {
            tracing::error!(error = %e, "reader view failed");
            if let Err(report_err) = host.send(&HostCommand::MessageError(e.to_string())) {
                tracing::warn!(error = %report_err, "could not report failure to browser");
            }
            Err(e)
        }
    }
}
