//! The per-stream traceback processor.
//!
//! A [`Processor`] owns the recognizer state for one logical input stream:
//! the current [`Mode`], the file named by the last frame header, and the
//! buffer a line is rendered into. Feed it lines in order; each call returns
//! the text to print for that line.

use tracing::{trace, warn};

use crate::classify::{ClassifiedLine, Mode, Patterns};
use crate::config::Config;
use crate::highlight::{Highlighter, PassthroughHighlighter, SyntectHighlighter};
use crate::render::{IsolationPolicy, Outcome, Renderer};
use crate::style::StyledBuffer;

/// Streaming traceback recognizer and renderer.
///
/// Not shareable between streams: create one per input.
#[derive(Debug)]
pub struct Processor {
    patterns: Patterns,
    renderer: Renderer,
    mode: Mode,
    current_file: Option<String>,
    buffer: StyledBuffer,
}

impl Processor {
    /// Build a processor, choosing the highlighter from `config.highlight`.
    ///
    /// An unusable theme falls back to unhighlighted output.
    pub fn new(config: &Config) -> Self {
        let highlighter: Box<dyn Highlighter> = if config.highlight.enabled {
            match SyntectHighlighter::new(&config.highlight.theme) {
                Ok(h) => Box::new(h),
                Err(e) => {
                    warn!(error = %e, theme = %config.highlight.theme, "highlighting disabled");
                    Box::new(PassthroughHighlighter)
                }
            }
        } else {
            Box::new(PassthroughHighlighter)
        };
        Self::with_highlighter(config, highlighter)
    }

    /// Build a processor around an explicit highlighter.
    pub fn with_highlighter(config: &Config, highlighter: Box<dyn Highlighter>) -> Self {
        let settings = &config.processor;
        let policy = IsolationPolicy::new(
            settings.resolved_code_dir(),
            settings.relative_paths_of_interest,
        );
        let renderer = Renderer::new(
            highlighter,
            policy,
            settings.isolate,
            settings.show_variables,
            settings.max_variable_line_length,
        );
        Self {
            patterns: Patterns::new(),
            renderer,
            mode: Mode::Idle,
            current_file: None,
            buffer: StyledBuffer::new(),
        }
    }

    /// Current recognizer state.
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// File named by the most recent frame header of the current traceback.
    pub fn current_file(&self) -> Option<&str> {
        self.current_file.as_deref()
    }

    /// Renderer in use.
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Process one line and return the text to print for it.
    ///
    /// Suppressed lines and empty lines both yield an empty string; use
    /// [`Processor::feed`] to tell them apart.
    pub fn process_line(&mut self, line: &str) -> String {
        self.feed(line).unwrap_or_default()
    }

    /// Process one line.
    ///
    /// Returns `None` when the line must not be printed at all, `Some("")` for
    /// an empty input line, and otherwise the rendered line with a single
    /// trailing newline.
    pub fn feed(&mut self, line: &str) -> Option<String> {
        let line = line.trim_end_matches(['\r', '\n']);
        if line.is_empty() {
            return Some(String::new());
        }

        let classified = self.patterns.classify(self.mode, line);
        self.advance(&classified);

        match self
            .renderer
            .render(&classified, self.current_file.as_deref(), &mut self.buffer)
        {
            Outcome::Emitted => {
                self.buffer.push("\n");
                Some(self.buffer.take())
            }
            Outcome::Suppressed => {
                self.buffer.clear();
                None
            }
        }
    }

    /// Format a whole block of text, line by line.
    pub fn format(&mut self, text: &str) -> String {
        let mut out = String::with_capacity(text.len());
        for line in text.split('\n') {
            out.push_str(&self.process_line(line));
        }
        out
    }

    fn advance(&mut self, classified: &ClassifiedLine<'_>) {
        let next = classified.next_mode(self.mode);
        if next != self.mode {
            trace!(from = ?self.mode, to = ?next, "traceback mode transition");
            self.mode = next;
            self.current_file = None;
        }
        if let ClassifiedLine::FileHeader { filename, .. } = *classified {
            self.current_file = Some(filename.to_owned());
        }
    }
}

/// Format `text` with a fresh processor.
///
/// This is the entry point for hosts that capture a traceback as a string,
/// such as an uncaught-error hook.
pub fn format(text: &str, config: &Config) -> String {
    Processor::new(config).format(text)
}
