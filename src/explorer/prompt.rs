//! Line-oriented console with interrupt awareness.
//!
//! The binary talks to the terminal through [`StdConsole`]; sessions can also
//! be driven from a fixed list of replies with [`ScriptedConsole`]. Both
//! report a Ctrl+C that arrived while a prompt was waiting as
//! [`Reply::Interrupted`] instead of terminating the process. The handler
//! cannot cut a blocking read short, so the interrupt is reported once the
//! pending line is submitted.

use crate::error::{BikeshareError, Result};
use std::collections::VecDeque;
use std::io::{self, BufRead, Write};
use std::str::FromStr;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Outcome of a single prompt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    /// A line of input with the line terminator removed
    Line(String),
    /// Ctrl+C was pressed while the prompt was waiting
    Interrupted,
}

pub trait Console {
    /// Show `question` and wait for a reply.
    ///
    /// # Errors
    ///
    /// Returns [`BikeshareError::Aborted`] once input is exhausted.
    fn ask(&mut self, question: &str) -> Result<Reply>;

    /// Stream for regular output.
    fn out(&mut self) -> &mut dyn Write;

    /// Stream for error reports.
    fn err(&mut self) -> &mut dyn Write;
}

/// Install a Ctrl+C handler that raises the returned flag.
///
/// # Errors
///
/// Fails if a handler is already installed for this process.
pub fn install_interrupt_handler() -> std::result::Result<Arc<AtomicBool>, ctrlc::Error> {
    let interrupted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&interrupted);
    ctrlc::set_handler(move || {
        flag.store(true, Ordering::SeqCst);
    })?;
    Ok(interrupted)
}

/// Console over any line reader and pair of writers, watching an interrupt
/// flag raised by [`install_interrupt_handler`].
pub struct LineConsole<R, W, E> {
    interrupted: Arc<AtomicBool>,
    input: R,
    output: W,
    errors: E,
}

/// Terminal console backed by stdin, stdout and stderr.
pub type StdConsole = LineConsole<io::StdinLock<'static>, io::Stdout, io::Stderr>;

impl StdConsole {
    pub fn new(interrupted: Arc<AtomicBool>) -> Self {
        LineConsole::with_streams(interrupted, io::stdin().lock(), io::stdout(), io::stderr())
    }
}

impl<R: BufRead, W: Write, E: Write> LineConsole<R, W, E> {
    pub fn with_streams(interrupted: Arc<AtomicBool>, input: R, output: W, errors: E) -> Self {
        Self {
            interrupted,
            input,
            output,
            errors,
        }
    }

    /// Give back the output and error streams.
    pub fn into_streams(self) -> (W, E) {
        (self.output, self.errors)
    }
}

impl<R: BufRead, W: Write, E: Write> Console for LineConsole<R, W, E> {
    fn ask(&mut self, question: &str) -> Result<Reply> {
        // Only a Ctrl+C pressed while this prompt waits counts.
        self.interrupted.store(false, Ordering::SeqCst);
        writeln!(self.output, "{question}")?;
        self.output.flush()?;

        let mut line = String::new();
        let read = self.input.read_line(&mut line)?;

        // The handler runs on its own thread and cannot cut the read short;
        // whatever was typed alongside the interrupt is discarded.
        if self.interrupted.swap(false, Ordering::SeqCst) {
            writeln!(self.output)?;
            return Ok(Reply::Interrupted);
        }
        if read == 0 {
            return Err(BikeshareError::Aborted);
        }

        Ok(Reply::Line(strip_line_ending(&line).to_owned()))
    }

    fn out(&mut self) -> &mut dyn Write {
        &mut self.output
    }

    fn err(&mut self) -> &mut dyn Write {
        &mut self.errors
    }
}

fn strip_line_ending(line: &str) -> &str {
    line.strip_suffix('\n')
        .map(|l| l.strip_suffix('\r').unwrap_or(l))
        .unwrap_or(line)
}

/// Console that replays canned replies and captures everything written.
///
/// Prompts are echoed into the output buffer so a transcript reads like the
/// terminal would.
#[derive(Debug, Default)]
pub struct ScriptedConsole {
    replies: VecDeque<Reply>,
    output: Vec<u8>,
    errors: Vec<u8>,
}

impl ScriptedConsole {
    pub fn new(replies: impl IntoIterator<Item = Reply>) -> Self {
        Self {
            replies: replies.into_iter().collect(),
            ..Default::default()
        }
    }

    /// Script made of plain lines only.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::new(lines.into_iter().map(|l| Reply::Line(l.into())))
    }

    pub fn output(&self) -> String {
        String::from_utf8_lossy(&self.output).into_owned()
    }

    pub fn errors(&self) -> String {
        String::from_utf8_lossy(&self.errors).into_owned()
    }

    /// Replies not consumed yet.
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

impl Console for ScriptedConsole {
    fn ask(&mut self, question: &str) -> Result<Reply> {
        writeln!(self.output, "{question}")?;
        self.replies.pop_front().ok_or(BikeshareError::Aborted)
    }

    fn out(&mut self) -> &mut dyn Write {
        &mut self.output
    }

    fn err(&mut self) -> &mut dyn Write {
        &mut self.errors
    }
}

/// Messages used by [`ask_choice`] for one prompt.
#[derive(Debug, Clone, Copy)]
pub struct ChoicePrompt<'a> {
    pub question: &'a str,
    pub invalid: &'a str,
    pub interrupted: &'a str,
}

/// Ask until the reply parses as `T`.
///
/// Invalid replies print `prompt.invalid`; interrupts print
/// `prompt.interrupted`. Both re-ask the same question.
///
/// # Errors
///
/// Propagates console failures, including [`BikeshareError::Aborted`].
pub fn ask_choice<T: FromStr>(console: &mut dyn Console, prompt: &ChoicePrompt<'_>) -> Result<T> {
    loop {
        match console.ask(prompt.question)? {
            Reply::Line(line) => match line.parse::<T>() {
                Ok(choice) => return Ok(choice),
                Err(_) => {
                    tracing::debug!(reply = %line, "Rejected reply");
                    writeln!(console.out(), "{}", prompt.invalid)?;
                }
            },
            Reply::Interrupted => {
                writeln!(console.out(), "{}", prompt.interrupted)?;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::explorer::filters::City;
    use std::io::Read as _;

    const CITY_PROMPT: ChoicePrompt<'static> = ChoicePrompt {
        question: "Which city?",
        invalid: "Bad city",
        interrupted: "Interrupted",
    };

    #[test]
    fn test_ask_choice_accepts_first_valid_reply() {
        let mut console = ScriptedConsole::from_lines(["Washington"]);
        let city: City = ask_choice(&mut console, &CITY_PROMPT).unwrap();
        assert_eq!(city, City::Washington);
        assert_eq!(console.output(), "Which city?\n");
    }

    #[test]
    fn test_ask_choice_retries_after_invalid_and_interrupt() {
        let mut console = ScriptedConsole::new([
            Reply::Line("boston".to_owned()),
            Reply::Interrupted,
            Reply::Line("chicago".to_owned()),
        ]);
        let city: City = ask_choice(&mut console, &CITY_PROMPT).unwrap();
        assert_eq!(city, City::Chicago);

        let output = console.output();
        assert_eq!(output.matches("Which city?").count(), 3);
        assert_eq!(output.matches("Bad city").count(), 1);
        assert_eq!(output.matches("Interrupted").count(), 1);
    }

    #[test]
    fn test_ask_choice_aborts_when_input_runs_out() {
        let mut console = ScriptedConsole::from_lines(["nowhere"]);
        let result: Result<City> = ask_choice(&mut console, &CITY_PROMPT);
        assert!(matches!(result, Err(BikeshareError::Aborted)));
    }

    fn line_console(
        input: &'static str,
        interrupted: &Arc<AtomicBool>,
    ) -> LineConsole<&'static [u8], Vec<u8>, Vec<u8>> {
        LineConsole::with_streams(
            Arc::clone(interrupted),
            input.as_bytes(),
            Vec::new(),
            Vec::new(),
        )
    }

    #[test]
    fn test_line_console_reads_reply() {
        let flag = Arc::new(AtomicBool::new(false));
        let mut console = line_console("no\r\n", &flag);
        assert_eq!(
            console.ask("Would you like to restart?").unwrap(),
            Reply::Line("no".to_owned())
        );
        assert!(matches!(
            console.ask("Would you like to restart?"),
            Err(BikeshareError::Aborted)
        ));

        let (output, _) = console.into_streams();
        let output = String::from_utf8(output).unwrap();
        assert_eq!(output.matches("Would you like to restart?").count(), 2);
    }

    #[test]
    fn test_interrupt_before_prompt_is_ignored() {
        // Raised while a report was running, before the prompt was shown.
        let flag = Arc::new(AtomicBool::new(true));
        let mut console = line_console("no\n", &flag);
        assert_eq!(
            console.ask("Would you like to restart?").unwrap(),
            Reply::Line("no".to_owned())
        );
        assert!(!flag.load(Ordering::SeqCst));
    }

    /// Reader that raises the interrupt flag while the read is in progress,
    /// the way the Ctrl+C handler thread would.
    struct InterruptingReader {
        flag: Arc<AtomicBool>,
        inner: &'static [u8],
    }

    impl io::Read for InterruptingReader {
        fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
            self.flag.store(true, Ordering::SeqCst);
            self.inner.read(buf)
        }
    }

    #[test]
    fn test_interrupt_during_read_discards_line() {
        let flag = Arc::new(AtomicBool::new(false));
        let reader = io::BufReader::new(InterruptingReader {
            flag: Arc::clone(&flag),
            inner: b"chicago\n",
        });
        let mut console =
            LineConsole::with_streams(Arc::clone(&flag), reader, Vec::new(), Vec::new());

        assert_eq!(console.ask("Which city?").unwrap(), Reply::Interrupted);
        assert!(!flag.load(Ordering::SeqCst), "flag is cleared once reported");
    }

    #[test]
    fn test_strip_line_ending() {
        assert_eq!(strip_line_ending("yes\n"), "yes");
        assert_eq!(strip_line_ending("yes\r\n"), "yes");
        assert_eq!(strip_line_ending("yes"), "yes");
        assert_eq!(strip_line_ending(" yes \n"), " yes ");
    }
}
