//! TBVaccine — colorized, readable Python tracebacks in the terminal.
//!
//! A single-pass line filter: feed it a program's stderr one line at a time
//! and it recognises traceback blocks in the stream, classifies each line
//! (start marker, frame header, source line, captured local, exception
//! summary) and styles it. Everything else passes through untouched.
//!
//! ```
//! use tbvaccine::{Config, Processor};
//!
//! let mut processor = Processor::new(&Config::default());
//! let out = processor.process_line("plain output\n");
//! assert_eq!(out, "plain output\n");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

/// Line classification and the traceback state machine's states.
pub mod classify;
/// Configuration loading and validation.
pub mod config;
/// Syntax highlighting of source fragments.
pub mod highlight;
/// Building traceback text that carries captured local variables.
pub mod locals;
/// Diagnostic logging setup.
pub mod logging;
/// Per-stream line processor.
pub mod processor;
/// Per-role rendering and the isolation policy.
pub mod render;
/// ANSI styling primitives.
pub mod style;

pub use classify::{ClassifiedLine, Mode};
pub use config::Config;
pub use processor::{format, Processor};
