//! TBVaccine CLI entry point.
//!
//! Reads a program's output from stdin and writes it to stderr with any
//! Python tracebacks colorized.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tracing::debug;

use tbvaccine::config::{load_config, load_default_config, Config};
use tbvaccine::logging;
use tbvaccine::Processor;

/// Colorize Python tracebacks read from stdin.
#[derive(Parser)]
#[command(name = "tbvaccine", version, about)]
struct Cli {
    /// Directory of the code to highlight in the traceback [default: current dir].
    #[arg(short = 'd', long = "dir", value_name = "DIR")]
    dir: Option<String>,

    /// Highlight all lines, not just the ones in the code directory.
    #[arg(short = 'i', long)]
    dont_isolate: bool,

    /// Hide captured local variable lines.
    #[arg(long)]
    no_vars: bool,

    /// Maximum visible length of a variable line before truncation.
    #[arg(long, value_name = "N")]
    max_length: Option<usize>,

    /// Do not syntax-highlight source lines.
    #[arg(long)]
    no_highlight: bool,

    /// Highlighting theme name.
    #[arg(long, value_name = "NAME")]
    theme: Option<String>,

    /// Config file to use instead of the default location.
    #[arg(short, long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Log diagnostics at debug level.
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Apply command-line overrides on top of file configuration.
    fn apply(&self, config: &mut Config) {
        if let Some(dir) = &self.dir {
            config.processor.code_dir.clone_from(dir);
        }
        if self.dont_isolate {
            config.processor.isolate = false;
        }
        if self.no_vars {
            config.processor.show_variables = false;
        }
        if let Some(max_length) = self.max_length {
            config.processor.max_variable_line_length = max_length;
        }
        if self.no_highlight {
            config.highlight.enabled = false;
        }
        if let Some(theme) = &self.theme {
            config.highlight.theme.clone_from(theme);
        }
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init_cli(if cli.verbose {
        logging::VERBOSE_LEVEL
    } else {
        logging::DEFAULT_LEVEL
    });

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => load_default_config().context("failed to load default config")?,
    };
    cli.apply(&mut config);
    config.validate()?;
    debug!(?config, "configuration resolved");

    let mut processor = Processor::new(&config);
    filter(&mut processor, io::stdin().lock(), io::stderr().lock())
}

/// Copy `input` to `output` line by line through the processor.
fn filter(
    processor: &mut Processor,
    mut input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<()> {
    let mut raw = Vec::new();
    loop {
        raw.clear();
        let read = input
            .read_until(b'\n', &mut raw)
            .context("failed to read from stdin")?;
        if read == 0 {
            return Ok(());
        }

        let line = String::from_utf8_lossy(&raw);
        let rendered = processor.process_line(&line);
        if let Err(e) = output
            .write_all(rendered.as_bytes())
            .and_then(|()| output.flush())
        {
            if e.kind() == io::ErrorKind::BrokenPipe {
                debug!("output closed, stopping");
                return Ok(());
            }
            return Err(e).context("failed to write rendered output");
        }
    }
}
