//! Traceback text with captured local variables.
//!
//! Capturing locals is host-specific, so this module only shapes what a host
//! captured into the line format the processor already understands: a frame
//! header, its source line, then one [`VARIABLE_PREFIX`] line per local.

use std::fmt::{self, Write as _};

use crate::classify::{CODE_INDENT, TRACEBACK_START, VARIABLE_PREFIX};

/// Shown in place of a value whose `Display` implementation fails.
pub const UNCONVERTIBLE_VALUE: &str = "<CANNOT CONVERT VALUE>";

/// Convert a captured value to text, never failing.
pub fn display_value(value: &dyn fmt::Display) -> String {
    let mut out = String::new();
    match write!(out, "{value}") {
        Ok(()) => out,
        Err(_) => UNCONVERTIBLE_VALUE.to_owned(),
    }
}

/// One stack frame and the locals captured in it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    filename: String,
    line: u32,
    function: String,
    source: Option<String>,
    locals: Vec<(String, String)>,
}

impl Frame {
    /// Create a frame for `function` at `filename:line`.
    pub fn new(filename: impl Into<String>, line: u32, function: impl Into<String>) -> Self {
        Self {
            filename: filename.into(),
            line,
            function: function.into(),
            source: None,
            locals: Vec::new(),
        }
    }

    /// Attach the source line executing in this frame.
    pub fn with_source(mut self, source: impl Into<String>) -> Self {
        self.source = Some(source.into());
        self
    }

    /// Record a local variable.
    pub fn with_local(mut self, name: impl Into<String>, value: &dyn fmt::Display) -> Self {
        self.locals.push((name.into(), display_value(value)));
        self
    }

    fn write_to(&self, out: &mut String) -> fmt::Result {
        writeln!(
            out,
            "  File \"{}\", line {}, in {}",
            self.filename, self.line, self.function
        )?;
        if let Some(source) = self.source.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
            writeln!(out, "{CODE_INDENT}{source}")?;
        }

        let mut locals: Vec<&(String, String)> = self.locals.iter().collect();
        locals.sort_by(|a, b| a.0.cmp(&b.0));
        let width = locals
            .iter()
            .map(|(name, _)| name.chars().count())
            .max()
            .unwrap_or(0);
        for (name, value) in locals {
            // Keep each local on one line so it stays a single variable line.
            let value = value.replace('\n', "\\n");
            writeln!(out, "{VARIABLE_PREFIX}{name:<width$} = {value}")?;
        }
        Ok(())
    }
}

/// Builds traceback text, outermost frame first.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TracebackBuilder {
    frames: Vec<Frame>,
}

impl TracebackBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a frame (builder style).
    pub fn frame(mut self, frame: Frame) -> Self {
        self.frames.push(frame);
        self
    }

    /// Append a frame.
    pub fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    /// Render the traceback, ending with `<exception>: <message>`.
    pub fn build(&self, exception: &str, message: &str) -> String {
        let mut out = String::new();
        // Writing into a String cannot fail.
        let _ = self.write_to(&mut out, exception, message);
        out
    }

    fn write_to(&self, out: &mut String, exception: &str, message: &str) -> fmt::Result {
        writeln!(out, "{TRACEBACK_START}")?;
        for frame in &self.frames {
            frame.write_to(out)?;
        }
        writeln!(out, "{exception}: {message}")
    }
}
