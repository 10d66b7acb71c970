//! Colored terminal output.

use std::io::{self, IsTerminal, Write};
use termcolor::{Color, ColorChoice, ColorSpec, StandardStream, WriteColor};

/// Writes user-facing messages to stdout/stderr with optional color.
#[derive(Debug, Clone)]
pub struct OutputManager {
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self { verbose, quiet }
    }

    fn stdout() -> StandardStream {
        StandardStream::stdout(Self::choice(io::stdout().is_terminal()))
    }

    fn stderr() -> StandardStream {
        StandardStream::stderr(Self::choice(io::stderr().is_terminal()))
    }

    fn choice(is_terminal: bool) -> ColorChoice {
        if is_terminal {
            ColorChoice::Auto
        } else {
            ColorChoice::Never
        }
    }

    fn write_tagged(
        stream: &mut StandardStream,
        color: Color,
        tag: &str,
        message: &str,
    ) -> io::Result<()> {
        stream.set_color(ColorSpec::new().set_fg(Some(color)).set_bold(true))?;
        write!(stream, "{}", tag)?;
        stream.reset()?;
        writeln!(stream, " {}", message)
    }

    /// Plain line on stdout.
    pub fn println(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(Self::stdout(), "{}", message)
    }

    /// Informational line.
    pub fn info(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        Self::write_tagged(&mut Self::stdout(), Color::Blue, "[INFO]", message)
    }

    /// Step that is about to run.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        Self::write_tagged(&mut Self::stdout(), Color::Cyan, "==>", message)
    }

    pub fn success(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        Self::write_tagged(&mut Self::stdout(), Color::Green, "✓", message)
    }

    /// Warning on stderr.
    pub fn warn(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        Self::write_tagged(&mut Self::stderr(), Color::Yellow, "[WARN]", message)
    }

    /// Only printed in verbose mode.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        if !self.verbose || self.quiet {
            return Ok(());
        }
        writeln!(Self::stdout(), "{}", message)
    }

    /// Bold section header.
    pub fn section(&self, title: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        let mut stream = Self::stdout();
        stream.set_color(ColorSpec::new().set_bold(true))?;
        writeln!(stream, "{}", title)?;
        stream.reset()
    }

    /// Indented line, used for streamed child output.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        writeln!(Self::stdout(), "    {}", message)
    }
}
