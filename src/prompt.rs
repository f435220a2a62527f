//! Interactive operator prompts.
//!
//! [`TerminalPrompt`] reads answers line by line from any [`BufRead`] and
//! writes questions to any [`Write`], so the same code drives a terminal and
//! a test with canned input.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use chatpluck::prompt::TerminalPrompt;
//!
//! let input = Cursor::new("YES\n");
//! let mut output = Vec::new();
//! let mut prompt = TerminalPrompt::new(input, &mut output);
//!
//! assert!(prompt.confirm("Save these messages?")?);
//! # Ok::<(), chatpluck::ChatpluckError>(())
//! ```

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use tracing::debug;

use crate::core::SenderCatalog;
use crate::error::{ChatpluckError, Result};
use crate::transcript::Transcript;

/// Line-based prompt over a reader/writer pair.
pub struct TerminalPrompt<R, W> {
    input: R,
    output: W,
}

impl TerminalPrompt<io::StdinLock<'static>, io::Stdout> {
    /// Prompts on the process's stdin and stdout.
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> TerminalPrompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Asks a free-text question.
    ///
    /// A blank answer returns `default` when one is given. The answer is
    /// trimmed.
    ///
    /// # Errors
    ///
    /// [`ChatpluckError::Io`] with `UnexpectedEof` if input ends before an
    /// answer is read and there is no default.
    pub fn ask(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        self.ask_raw(question, default)
            .map(|answer| answer.trim().to_string())
    }

    /// Like [`ask`](Self::ask), but only the line ending is removed.
    fn ask_raw(&mut self, question: &str, default: Option<&str>) -> Result<String> {
        match default {
            Some(d) => write!(self.output, "{question} ({d}): ")?,
            None => write!(self.output, "{question}: ")?,
        }
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;
        let answer = line.trim_end_matches(['\n', '\r']);

        if answer.trim().is_empty() {
            if let Some(d) = default {
                return Ok(d.to_string());
            }
            if read == 0 {
                return Err(io::Error::new(io::ErrorKind::UnexpectedEof, "no answer on input").into());
            }
        }
        Ok(answer.to_string())
    }

    /// Asks a yes/no question. Only `yes` (any case) approves.
    ///
    /// End of input counts as a refusal.
    pub fn confirm(&mut self, question: &str) -> Result<bool> {
        write!(self.output, "{question} (yes/no): ")?;
        self.output.flush()?;

        let mut line = String::new();
        self.input.read_line(&mut line)?;
        let approved = line.trim().eq_ignore_ascii_case("yes");
        debug!(approved, "approval answered");
        Ok(approved)
    }

    /// Shows the catalog with message counts and asks for a sender.
    ///
    /// Accepts a 1-based number or an exact name. Invalid answers are
    /// reported and asked again, up to `attempts` times.
    pub fn choose_sender(
        &mut self,
        catalog: &SenderCatalog,
        transcript: &Transcript,
        attempts: usize,
    ) -> Result<String> {
        writeln!(self.output, "👥 Senders:")?;
        for (index, sender, count) in catalog.numbered(transcript) {
            writeln!(self.output, "   {:>3}. {} ({} messages)", index, sender, count)?;
        }

        let mut last_err = None;
        for _ in 0..attempts.max(1) {
            let answer = self.ask_raw("Enter the sender's name or number", None)?;
            match catalog.resolve(&answer) {
                Ok(sender) => return Ok(sender.to_string()),
                Err(e) => {
                    writeln!(self.output, "⚠️  {e}")?;
                    last_err = Some(e);
                }
            }
        }
        Err(last_err.unwrap_or_else(|| ChatpluckError::sender_not_in_catalog("")))
    }

    /// Asks for the output path, offering `default`.
    pub fn output_path(&mut self, default: &Path) -> Result<PathBuf> {
        let default = default.to_string_lossy();
        self.ask("Enter output filename", Some(&default))
            .map(PathBuf::from)
    }

    /// Consumes the prompt and returns the writer.
    pub fn into_output(self) -> W {
        self.output
    }
}
