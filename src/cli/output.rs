//! Colored operator output.

use std::io::{self, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Terminal output for the operator, separate from `log` diagnostics.
///
/// Progress and success go to stdout, warnings and errors to stderr.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates an output manager.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    /// Whether verbose output is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose && !self.quiet
    }

    /// Prints a message only in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.is_verbose() {
            return Ok(());
        }
        let mut out = stdout();
        writeln!(out, "  {message}")
    }

    /// Prints a progress step.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        tagged(&mut stdout(), Color::Cyan, "→", message)
    }

    /// Prints a section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = stdout();
        out.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(out, "\n{title}")?;
        out.reset()
    }

    /// Prints indented detail text.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut out = stdout();
        writeln!(out, "    {message}")
    }

    /// Prints a success line.
    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        tagged(&mut stdout(), Color::Green, "✓", message)
    }

    /// Prints a warning to stderr.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        tagged(&mut stderr(), Color::Yellow, "warning:", message)
    }

    /// Prints an error to stderr; shown even in quiet mode.
    pub fn error(&self, message: &str) -> io::Result<()> {
        tagged(&mut stderr(), Color::Red, "error:", message)
    }
}

fn stdout() -> StandardStream {
    StandardStream::stdout(ColorChoice::Auto)
}

fn stderr() -> StandardStream {
    StandardStream::stderr(ColorChoice::Auto)
}

fn tagged(out: &mut StandardStream, color: Color, tag: &str, message: &str) -> io::Result<()> {
    out.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
    write!(out, "{tag}")?;
    out.reset()?;
    writeln!(out, " {message}")
}
