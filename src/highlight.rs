//! Syntax highlighting of source fragments.
//!
//! The renderer treats highlighting as a black box behind [`Highlighter`].
//! [`SyntectHighlighter`] colors Python source with a dark theme using
//! 24-bit terminal escapes; [`PassthroughHighlighter`] leaves text untouched.

use syntect::easy::HighlightLines;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::parsing::{SyntaxReference, SyntaxSet};
use syntect::util::{as_24_bit_terminal_escaped, LinesWithEndings};

/// Default dark theme from syntect's bundled theme set.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

/// SGR reset appended after highlighted output so colors do not bleed.
const HIGHLIGHT_RESET: &str = "\x1b[0m";

/// Extension used to look up the Python grammar.
const SOURCE_EXTENSION: &str = "py";

/// Errors produced while highlighting.
#[derive(Debug, thiserror::Error)]
pub enum HighlightError {
    /// The requested theme is not in the bundled theme set.
    #[error("unknown highlight theme: {0}")]
    UnknownTheme(String),
    /// No grammar is available for the source language.
    #[error("no syntax definition for extension '{0}'")]
    MissingSyntax(&'static str),
    /// The highlighting engine rejected the input.
    #[error("highlighting failed: {0}")]
    Engine(#[from] syntect::Error),
}

/// Adds terminal styling to a source fragment without changing its content.
pub trait Highlighter: Send + Sync {
    /// Return `source` with styling applied.
    ///
    /// Implementations may append a trailing reset or newline; callers trim
    /// line endings from the result.
    fn highlight(&self, source: &str) -> Result<String, HighlightError>;
}

/// Highlighter that returns its input unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughHighlighter;

impl Highlighter for PassthroughHighlighter {
    fn highlight(&self, source: &str) -> Result<String, HighlightError> {
        Ok(source.to_owned())
    }
}

/// Python highlighter backed by syntect's bundled grammars and themes.
#[derive(Debug)]
pub struct SyntectHighlighter {
    syntaxes: SyntaxSet,
    theme: Theme,
}

impl SyntectHighlighter {
    /// Load the bundled grammars and the named theme.
    ///
    /// # Errors
    ///
    /// Returns an error if the theme is unknown or the Python grammar is missing.
    pub fn new(theme_name: &str) -> Result<Self, HighlightError> {
        let syntaxes = SyntaxSet::load_defaults_newlines();
        if syntaxes.find_syntax_by_extension(SOURCE_EXTENSION).is_none() {
            return Err(HighlightError::MissingSyntax(SOURCE_EXTENSION));
        }

        let mut themes = ThemeSet::load_defaults();
        let theme = themes
            .themes
            .remove(theme_name)
            .ok_or_else(|| HighlightError::UnknownTheme(theme_name.to_owned()))?;

        Ok(Self { syntaxes, theme })
    }

    /// Names of the themes [`SyntectHighlighter::new`] accepts.
    pub fn theme_names() -> Vec<String> {
        ThemeSet::load_defaults().themes.into_keys().collect()
    }

    fn syntax(&self) -> Result<&SyntaxReference, HighlightError> {
        self.syntaxes
            .find_syntax_by_extension(SOURCE_EXTENSION)
            .ok_or(HighlightError::MissingSyntax(SOURCE_EXTENSION))
    }
}

impl Highlighter for SyntectHighlighter {
    fn highlight(&self, source: &str) -> Result<String, HighlightError> {
        let mut lines = HighlightLines::new(self.syntax()?, &self.theme);
        let mut out = String::with_capacity(source.len().saturating_mul(4));
        for line in LinesWithEndings::from(source) {
            let ranges = lines.highlight_line(line, &self.syntaxes)?;
            out.push_str(&as_24_bit_terminal_escaped(&ranges, false));
        }
        out.push_str(HIGHLIGHT_RESET);
        Ok(out)
    }
}
