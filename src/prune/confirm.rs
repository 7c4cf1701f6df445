//! Per-file confirmation
//!
//! The pruner asks a `Confirm` implementation for each candidate, so the
//! interactive terminal prompt can be swapped for scripted input in tests.

use std::io::{self, BufRead, Write};
use std::path::Path;

/// Answer to a confirmation request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Delete,
    Skip,
    Abort,
}

/// Capability that decides the fate of one candidate
pub trait Confirm {
    fn confirm(&mut self, path: &Path) -> io::Result<Decision>;
}

/// Approves every candidate without asking; the confirmer behind `--yes`
#[derive(Debug, Default, Clone, Copy)]
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _path: &Path) -> io::Result<Decision> {
        Ok(Decision::Delete)
    }
}

/// Parse a typed answer. Empty input declines.
pub fn parse_answer(answer: &str) -> Option<Decision> {
    match answer.trim().to_lowercase().as_str() {
        "y" | "yes" => Some(Decision::Delete),
        "" | "n" | "no" => Some(Decision::Skip),
        "a" | "abort" | "q" | "quit" => Some(Decision::Abort),
        _ => None,
    }
}

/// Line-based prompt over any reader/writer pair
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stderr> {
    /// Prompt on stderr, read answers from stdin
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stderr())
    }
}

impl<R: BufRead, W: Write> Confirm for TerminalPrompt<R, W> {
    fn confirm(&mut self, path: &Path) -> io::Result<Decision> {
        loop {
            write!(self.output, "Delete {}? [y/N/a] ", path.display())?;
            self.output.flush()?;

            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                // End of input: nobody is left to answer
                writeln!(self.output)?;
                return Ok(Decision::Abort);
            }

            match parse_answer(&line) {
                Some(decision) => return Ok(decision),
                None => writeln!(self.output, "Please answer y (yes), n (no) or a (abort).")?,
            }
        }
    }
}
