// SPDX-License-Identifier: MIT OR Apache-2.0

//! Styled terminal output.
//!
//! Command results go to an [`Output`] wrapping any writer so they can be
//! captured. Colour is only used when the writer is a terminal; plain output
//! marks successes and warnings with `[OK]` and `[WARNING]`.

use owo_colors::OwoColorize;
use std::io::{self, IsTerminal, Write};

/// A writer that knows whether to style what it prints.
#[derive(Debug)]
pub struct Output<W> {
    writer: W,
    color: bool,
}

impl<W: Write> Output<W> {
    /// Wraps `writer`, styling output when `color` is set.
    pub fn new(writer: W, color: bool) -> Self {
        Self { writer, color }
    }

    /// Wraps `writer` without styling.
    pub fn plain(writer: W) -> Self {
        Self::new(writer, false)
    }

    /// Whether output is styled.
    pub fn is_colored(&self) -> bool {
        self.color
    }

    /// The wrapped writer.
    pub fn into_inner(self) -> W {
        self.writer
    }

    /// Print a plain line
    pub fn line(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.writer, "{}", text)
    }

    /// Print a success message
    pub fn success(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.writer, "{} {}", "✔".green().bold(), text.green())
        } else {
            writeln!(self.writer, "[OK] {}", text)
        }
    }

    /// Print a warning message
    pub fn warn(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.writer, "{} {}", "⚠".yellow().bold(), text.yellow())
        } else {
            writeln!(self.writer, "[WARNING] {}", text)
        }
    }

    /// Print a list item
    pub fn item(&mut self, text: &str) -> io::Result<()> {
        if self.color {
            writeln!(self.writer, "    {} {}", "-".dimmed(), text)
        } else {
            writeln!(self.writer, "    - {}", text)
        }
    }
}

impl Output<io::StdoutLock<'static>> {
    /// Locked stdout, styled when it is a terminal.
    pub fn stdout() -> Self {
        let stdout = io::stdout();
        let color = stdout.is_terminal();
        Self::new(stdout.lock(), color)
    }
}

/// Print an error message to stderr
pub fn error(text: &str) {
    if io::stderr().is_terminal() {
        eprintln!("{} {}", "✖".red().bold(), text.red());
    } else {
        eprintln!("{}", text);
    }
}
