use std::io::{self, BufRead, StdinLock, Stdout, Write};

use anyhow::{Context, Result};

/// Everything the picker says to or asks of the user.
pub trait Console {
    /// Next command line with the trailing newline removed, `None` once the
    /// input is exhausted.
    fn read_command(&mut self) -> Result<Option<String>>;

    /// Shows a freshly rendered screen.
    fn show(&mut self, screen: &str) -> Result<()>;

    /// Tells the user something without expecting an answer.
    fn notify(&mut self, message: &str) -> Result<()>;

    /// Blocking yes/no question. Anything but an explicit yes is a no.
    fn confirm(&mut self, message: &str) -> Result<bool>;
}

/// Line-oriented console over any reader/writer pair.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

impl Terminal<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Terminal::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Terminal { input, output }
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read from input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(&['\r', '\n'][..]).to_string()))
    }
}

impl<R: BufRead, W: Write> Console for Terminal<R, W> {
    fn read_command(&mut self) -> Result<Option<String>> {
        write!(self.output, "> ")?;
        self.output.flush()?;
        self.read_line()
    }

    fn show(&mut self, screen: &str) -> Result<()> {
        writeln!(self.output, "{}", screen).context("Failed to write to output")
    }

    fn notify(&mut self, message: &str) -> Result<()> {
        writeln!(self.output, "! {}", message).context("Failed to write to output")
    }

    fn confirm(&mut self, message: &str) -> Result<bool> {
        write!(self.output, "{} [y/N] ", message)?;
        self.output.flush()?;

        let answer = self.read_line()?.unwrap_or_default();
        let answer = answer.trim();
        Ok(answer.eq_ignore_ascii_case("y") || answer.eq_ignore_ascii_case("yes"))
    }
}
