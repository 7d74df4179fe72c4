//! Per-role rendering of classified traceback lines.

use std::path::is_separator;

use tracing::debug;

use crate::classify::{ClassifiedLine, TRACEBACK_START};
use crate::highlight::Highlighter;
use crate::style::{truncate_visible, Color, StyledBuffer, Weight};

/// Marker that replaces the first column of an interesting code line.
pub const ISOLATION_MARKER: &str = ">";

/// Whether a leading separator alone makes a path absolute on this platform.
const LEADING_SEPARATOR_IS_ABSOLUTE: bool = cfg!(unix);

/// Result of rendering one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Output was written to the buffer.
    Emitted,
    /// Nothing should be printed for this line, not even a newline.
    Suppressed,
}

/// Decides which files are "of interest" when isolation is on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsolationPolicy {
    code_dir: String,
    relative_paths_of_interest: bool,
}

impl IsolationPolicy {
    /// Files under `code_dir` are of interest. With `relative_paths_of_interest`,
    /// so are paths that are not absolute.
    pub fn new(code_dir: impl Into<String>, relative_paths_of_interest: bool) -> Self {
        Self {
            code_dir: code_dir.into(),
            relative_paths_of_interest,
        }
    }

    /// Directory prefix that marks a file as project code.
    pub fn code_dir(&self) -> &str {
        &self.code_dir
    }

    /// Whether `file` belongs to the project being debugged.
    pub fn is_of_interest(&self, file: &str) -> bool {
        if file.starts_with(&self.code_dir) {
            return true;
        }
        self.relative_paths_of_interest
            && LEADING_SEPARATOR_IS_ABSOLUTE
            && !file.starts_with(is_separator)
    }
}

/// Turns classified lines into styled text.
pub struct Renderer {
    highlighter: Box<dyn Highlighter>,
    policy: IsolationPolicy,
    isolate: bool,
    show_variables: bool,
    max_variable_line_length: usize,
}

impl std::fmt::Debug for Renderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Renderer")
            .field("policy", &self.policy)
            .field("isolate", &self.isolate)
            .field("show_variables", &self.show_variables)
            .field("max_variable_line_length", &self.max_variable_line_length)
            .finish_non_exhaustive()
    }
}

impl Renderer {
    /// Build a renderer around a highlighter and an isolation policy.
    pub fn new(
        highlighter: Box<dyn Highlighter>,
        policy: IsolationPolicy,
        isolate: bool,
        show_variables: bool,
        max_variable_line_length: usize,
    ) -> Self {
        Self {
            highlighter,
            policy,
            isolate,
            show_variables,
            max_variable_line_length,
        }
    }

    /// Isolation policy in effect.
    pub fn policy(&self) -> &IsolationPolicy {
        &self.policy
    }

    /// Render `line` into `out`.
    ///
    /// `current_file` is the file named by the most recent header of the
    /// current traceback; code and variable lines are judged by it.
    pub fn render(
        &self,
        line: &ClassifiedLine<'_>,
        current_file: Option<&str>,
        out: &mut StyledBuffer,
    ) -> Outcome {
        match *line {
            ClassifiedLine::TracebackStart => {
                out.push_styled(TRACEBACK_START, Color::Blue, Weight::Normal);
            }
            ClassifiedLine::ExceptionSummary {
                exception,
                description,
            } => {
                out.push_styled(exception, Color::Red, Weight::Bright);
                out.push(": ");
                out.push_styled(description, Color::Green, Weight::Normal);
            }
            ClassifiedLine::FileHeader {
                raw,
                filename,
                line_number,
                function,
            } => {
                if self.styles(Some(filename)) {
                    render_file_header(filename, line_number, function, out);
                } else {
                    out.push(raw);
                }
            }
            ClassifiedLine::CodeLine { raw } => self.render_code(raw, current_file, out),
            ClassifiedLine::VariableLine { raw } => {
                return self.render_variable(raw, current_file, out);
            }
            ClassifiedLine::Plain { raw } => out.push(raw),
        }
        Outcome::Emitted
    }

    /// Whether lines belonging to `file` get styled.
    fn styles(&self, file: Option<&str>) -> bool {
        !self.isolate || file.is_some_and(|f| self.policy.is_of_interest(f))
    }

    fn render_code(&self, raw: &str, current_file: Option<&str>, out: &mut StyledBuffer) {
        if !self.styles(current_file) {
            out.push(raw);
            return;
        }

        let code = if self.isolate {
            out.push_styled(ISOLATION_MARKER, Color::Red, Weight::Bright);
            skip_first_char(raw)
        } else {
            raw
        };
        out.push(trim_line_ending(&self.highlight(code)));
    }

    fn render_variable(
        &self,
        raw: &str,
        current_file: Option<&str>,
        out: &mut StyledBuffer,
    ) -> Outcome {
        if !self.show_variables || !self.styles(current_file) {
            return Outcome::Suppressed;
        }

        let highlighted = self.highlight(raw);
        let highlighted = trim_line_ending(&highlighted);
        match truncate_visible(highlighted, self.max_variable_line_length) {
            Some(truncated) => out.push(&truncated),
            None => out.push(highlighted),
        }
        Outcome::Emitted
    }

    fn highlight(&self, source: &str) -> String {
        match self.highlighter.highlight(source) {
            Ok(styled) => styled,
            Err(e) => {
                debug!(error = %e, "highlighting failed, emitting raw text");
                source.to_owned()
            }
        }
    }
}

fn render_file_header(
    filename: &str,
    line_number: &str,
    function: &str,
    out: &mut StyledBuffer,
) {
    out.push("  File \"");
    let (dir, base) = match filename.rfind(is_separator) {
        Some(idx) => filename.split_at(idx.saturating_add(1)),
        None => ("", filename),
    };
    if !dir.is_empty() {
        out.push_styled(dir, Color::Cyan, Weight::Normal);
    }
    if !base.is_empty() {
        out.push_styled(base, Color::Cyan, Weight::Bright);
    }
    out.push("\", line ");
    out.push_styled(line_number, Color::Yellow, Weight::Normal);
    out.push(", in ");
    out.push_styled(function, Color::Magenta, Weight::Normal);
}

fn skip_first_char(text: &str) -> &str {
    let mut chars = text.chars();
    chars.next();
    chars.as_str()
}

fn trim_line_ending(text: &str) -> &str {
    text.trim_end_matches(['\r', '\n'])
}
