//! Userscript invocation context.
//!
//! qutebrowser hands a userscript everything it knows through `QUTE_*`
//! environment variables. [`Environment`] reads and validates them once so the
//! rest of the pipeline works with typed values.
//!
//! # Example
//!
//! ```rust
//! use std::collections::HashMap;
//! use qute_reader_core::{Environment, Mode};
//!
//! let vars = HashMap::from([
//!     ("QUTE_MODE", "hints"),
//!     ("QUTE_URL", "https://example.com/post"),
//!     ("QUTE_DATA_DIR", "/tmp/qb/data"),
//!     ("QUTE_CONFIG_DIR", "/tmp/qb/config"),
//! ]);
//! let env = Environment::from_lookup(|name| vars.get(name).map(|v| v.to_string())).unwrap();
//! assert_eq!(env.mode, Mode::Hints);
//! ```

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use url::Url;

use crate::fetch::Source;
use crate::{QuteReaderError, Result};

pub const VAR_MODE: &str = "QUTE_MODE";
pub const VAR_URL: &str = "QUTE_URL";
pub const VAR_HTML: &str = "QUTE_HTML";
pub const VAR_DATA_DIR: &str = "QUTE_DATA_DIR";
pub const VAR_CONFIG_DIR: &str = "QUTE_CONFIG_DIR";
pub const VAR_FIFO: &str = "QUTE_FIFO";
pub const VAR_USER_AGENT: &str = "QUTE_USER_AGENT";

/// File name of the rendered page inside `<data_dir>/userscripts`.
pub const OUTPUT_FILE_NAME: &str = "readability.html";

/// User stylesheet picked up from the config directory.
pub const STYLESHEET_FILE_NAME: &str = "readability.css";

/// How qutebrowser invoked the script.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Started from a hint: `QUTE_URL` is a link to fetch.
    Hints,
    /// Started as a command: the current page is dumped to `QUTE_HTML`.
    #[default]
    Command,
}

impl FromStr for Mode {
    type Err = QuteReaderError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "hints" => Ok(Self::Hints),
            "command" => Ok(Self::Command),
            other => Err(QuteReaderError::InvalidVar {
                name: VAR_MODE,
                reason: format!("unknown mode '{}', expected 'hints' or 'command'", other),
            }),
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Hints => f.write_str("hints"),
            Self::Command => f.write_str("command"),
        }
    }
}

/// Validated userscript environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    pub mode: Mode,
    /// Page URL. Always absolute.
    pub url: Url,
    /// Dumped page HTML. Always present in command mode.
    pub html: Option<PathBuf>,
    pub data_dir: PathBuf,
    pub config_dir: PathBuf,
    /// Command FIFO; `None` when commands should go to stdout.
    pub fifo: Option<PathBuf>,
    pub user_agent: Option<String>,
}

impl Environment {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Builds an environment from an arbitrary variable lookup.
    ///
    /// Empty values are treated as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let mode = match get(VAR_MODE) {
            Some(raw) => raw.parse()?,
            None => Mode::default(),
        };

        let raw_url = get(VAR_URL).ok_or(QuteReaderError::MissingVar(VAR_URL))?;
        let url = Url::parse(&raw_url).map_err(|e| QuteReaderError::InvalidVar {
            name: VAR_URL,
            reason: format!("'{}' is not an absolute URL ({})", raw_url, e),
        })?;

        let html = get(VAR_HTML).map(PathBuf::from);
        if mode == Mode::Command && html.is_none() {
            return Err(QuteReaderError::MissingVar(VAR_HTML));
        }

        let data_dir = match get(VAR_DATA_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::data_dir()
                .map(|d| d.join("qutebrowser"))
                .ok_or(QuteReaderError::MissingVar(VAR_DATA_DIR))?,
        };

        let config_dir = match get(VAR_CONFIG_DIR) {
            Some(dir) => PathBuf::from(dir),
            None => dirs::config_dir()
                .map(|d| d.join("qutebrowser"))
                .ok_or(QuteReaderError::MissingVar(VAR_CONFIG_DIR))?,
        };

        Ok(Self {
            mode,
            url,
            html,
            data_dir,
            config_dir,
            fifo: get(VAR_FIFO).map(PathBuf::from),
            user_agent: get(VAR_USER_AGENT),
        })
    }

    /// Where the page content comes from for this mode.
    pub fn source(&self) -> Source {
        match (&self.mode, &self.html) {
            (Mode::Command, Some(path)) => Source::File(path.clone()),
            _ => Source::Url(self.url.clone()),
        }
    }

    /// URL that relative links in the page resolve against.
    ///
    /// `None` for URLs such as `about:blank` that cannot act as a base.
    pub fn base_url(&self) -> Option<&Url> {
        (!self.url.cannot_be_a_base()).then_some(&self.url)
    }

    /// Default location of the rendered document.
    pub fn output_path(&self) -> PathBuf {
        self.data_dir.join("userscripts").join(OUTPUT_FILE_NAME)
    }

    pub fn stylesheet_path(&self) -> PathBuf {
        self.config_dir.join(STYLESHEET_FILE_NAME)
    }

    /// qutebrowser's `config.py`, scraped for theme colors.
    pub fn config_file(&self) -> PathBuf {
        self.config_dir.join("config.py")
    }
}
