//! Page colors borrowed from the browser configuration.
//!
//! qutebrowser's `config.py` is Python, so rather than evaluating it the
//! color options are scraped with regular expressions. Anything that does
//! not look like a literal color assignment is ignored; the reader view
//! simply falls back to its default look.

use std::fs;
use std::path::Path;
use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

/// Option that sets the page background.
pub const BACKGROUND_OPTION: &str = "colors.webpage.bg";
/// Option that sets the body text color.
pub const FOREGROUND_OPTION: &str = "colors.completion.fg";
/// Option that sets the link color.
pub const LINK_OPTION: &str = "colors.statusbar.url.success.https.fg";

/// `c.colors.webpage.bg = '#1d2021'`
static ATTRIBUTE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*c\.(colors(?:\.\w+)+)\s*=\s*(?:'([^']*)'|"([^"]*)")"#).unwrap()
});

/// `config.set('colors.webpage.bg', '#1d2021')`
static SET_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"^\s*config\.set\(\s*['"](colors(?:\.\w+)+)['"]\s*,\s*(?:'([^']*)'|"([^"]*)")"#).unwrap()
});

static COLOR_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"(?i)^(?:#(?:[0-9a-f]{3}|[0-9a-f]{4}|[0-9a-f]{6}|[0-9a-f]{8})|(?:rgba?|hsla?)\([0-9.,%/\s]+\)|[a-z]+)$",
    )
    .unwrap()
});

/// Colors applied on top of the reader stylesheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Theme {
    pub background: Option<String>,
    pub foreground: Option<String>,
    pub link: Option<String>,
}

impl Theme {
    /// Loads the theme from a `config.py`.
    ///
    /// A missing or unreadable file yields the empty theme.
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(text) => Self::from_config_str(&text),
            Err(e) => {
                tracing::debug!(path = %path.display(), error = %e, "no theme config");
                Self::default()
            }
        }
    }

    /// Scrapes color assignments from config text. Later assignments win.
    pub fn from_config_str(text: &str) -> Self {
        let mut theme = Self::default();

        for line in text.lines() {
            let Some(caps) = ATTRIBUTE_RE.captures(line).or_else(|| SET_RE.captures(line)) else {
                continue;
            };

            let option = &caps[1];
            let Some(value) = caps.get(2).or_else(|| caps.get(3)).map(|m| m.as_str().trim()) else {
                continue;
            };

            let slot = match option {
                BACKGROUND_OPTION => &mut theme.background,
                FOREGROUND_OPTION => &mut theme.foreground,
                LINK_OPTION => &mut theme.link,
                _ => continue,
            };

            if COLOR_RE.is_match(value) {
                *slot = Some(value.to_string());
            } else {
                tracing::debug!(option, value, "ignoring non-color value");
            }
        }

        theme
    }

    pub fn is_empty(&self) -> bool {
        self.background.is_none() && self.foreground.is_none() && self.link.is_none()
    }

    /// CSS rules for the colors that are set.
    pub fn css(&self) -> String {
        let mut css = String::new();

        if self.background.is_some() || self.foreground.is_some() {
            css.push_str("body {\n");
            if let Some(bg) = &self.background {
                css.push_str(&format!("    background-color: {};\n", bg));
            }
            if let Some(fg) = &self.foreground {
                css.push_str(&format!("    color: {};\n", fg));
            }
            css.push_str("}\n");
        }

        if let Some(link) = &self.link {
            css.push_str(&format!("a, a:visited {{\n    color: {};\n}}\n", link));
        }

        css
    }
}
