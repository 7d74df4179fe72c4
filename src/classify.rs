//! Line classification for the traceback state machine.
//!
//! [`Patterns::classify`] looks at one newline-stripped line and the current
//! [`Mode`] and decides which syntactic role the line plays. Checks run in a
//! fixed order and every rule except the start marker only fires inside a
//! traceback. Anything unrecognised is [`ClassifiedLine::Plain`].

use regex::Regex;
use tracing::warn;

/// First line of every traceback block.
pub const TRACEBACK_START: &str = "Traceback (most recent call last):";

/// Prefix of a captured local variable line.
pub const VARIABLE_PREFIX: &str = "|     ";

/// Indentation of a source code line inside a traceback.
pub const CODE_INDENT: &str = "    ";

const EXCEPTION_SUMMARY_PATTERN: &str = r"^(?P<exception>[\w.]+): (?P<description>.*)$";
const FILE_HEADER_PATTERN: &str =
    r#"^  File "(?P<filename>[^"]*)", line (?P<line>\d+), in (?P<function>.*)$"#;

/// State of the traceback recognizer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Outside any traceback; lines pass through.
    #[default]
    Idle,
    /// Between a start marker and the exception summary.
    InTraceback,
}

/// The role a single line plays, with the fields extracted from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifiedLine<'a> {
    /// `Traceback (most recent call last):`
    TracebackStart,
    /// `  File "<filename>", line <n>, in <function>`
    FileHeader {
        /// The whole line, for verbatim output.
        raw: &'a str,
        /// Path as it appears between the quotes.
        filename: &'a str,
        /// Decimal line number, exactly as written.
        line_number: &'a str,
        /// Function (or module-level marker such as `<module>`).
        function: &'a str,
    },
    /// A captured local, prefixed with [`VARIABLE_PREFIX`].
    VariableLine {
        /// The whole line.
        raw: &'a str,
    },
    /// A source line, indented with [`CODE_INDENT`].
    CodeLine {
        /// The whole line, indentation included.
        raw: &'a str,
    },
    /// `<exception>: <description>`, the last line of a traceback.
    ExceptionSummary {
        /// Dotted exception name.
        exception: &'a str,
        /// Everything after the first `": "`.
        description: &'a str,
    },
    /// Anything else.
    Plain {
        /// The whole line.
        raw: &'a str,
    },
}

impl ClassifiedLine<'_> {
    /// Mode the recognizer is in after consuming this line.
    pub fn next_mode(&self, current: Mode) -> Mode {
        match self {
            Self::TracebackStart => Mode::InTraceback,
            Self::ExceptionSummary { .. } => Mode::Idle,
            _ => current,
        }
    }
}

/// Precompiled structural patterns.
///
/// A pattern that fails to compile is logged and never matches, so the
/// lines it would have recognised degrade to [`ClassifiedLine::Plain`].
#[derive(Debug, Clone)]
pub struct Patterns {
    exception_summary: Option<Regex>,
    file_header: Option<Regex>,
}

impl Default for Patterns {
    fn default() -> Self {
        Self::new()
    }
}

impl Patterns {
    /// Compile the exception-summary and file-header patterns.
    pub fn new() -> Self {
        Self {
            exception_summary: compile(EXCEPTION_SUMMARY_PATTERN),
            file_header: compile(FILE_HEADER_PATTERN),
        }
    }

    /// Classify one line that has already had its line ending removed.
    pub fn classify<'a>(&self, mode: Mode, line: &'a str) -> ClassifiedLine<'a> {
        match mode {
            Mode::Idle if line == TRACEBACK_START => ClassifiedLine::TracebackStart,
            Mode::Idle => ClassifiedLine::Plain { raw: line },
            Mode::InTraceback => self
                .exception_summary(line)
                .or_else(|| self.file_header(line))
                .unwrap_or_else(|| classify_indented(line)),
        }
    }

    fn exception_summary<'a>(&self, line: &'a str) -> Option<ClassifiedLine<'a>> {
        let caps = self.exception_summary.as_ref()?.captures(line)?;
        Some(ClassifiedLine::ExceptionSummary {
            exception: caps.name("exception")?.as_str(),
            description: caps.name("description")?.as_str(),
        })
    }

    fn file_header<'a>(&self, line: &'a str) -> Option<ClassifiedLine<'a>> {
        let caps = self.file_header.as_ref()?.captures(line)?;
        Some(ClassifiedLine::FileHeader {
            raw: line,
            filename: caps.name("filename")?.as_str(),
            line_number: caps.name("line")?.as_str(),
            function: caps.name("function")?.as_str(),
        })
    }
}

fn classify_indented(line: &str) -> ClassifiedLine<'_> {
    if line.starts_with(VARIABLE_PREFIX) {
        ClassifiedLine::VariableLine { raw: line }
    } else if line.starts_with(CODE_INDENT) {
        ClassifiedLine::CodeLine { raw: line }
    } else {
        ClassifiedLine::Plain { raw: line }
    }
}

fn compile(pattern: &str) -> Option<Regex> {
    match Regex::new(pattern) {
        Ok(regex) => Some(regex),
        Err(e) => {
            warn!(error = %e, pattern, "failed to compile traceback pattern");
            None
        }
    }
}
