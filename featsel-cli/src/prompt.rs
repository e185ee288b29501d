//! Interactive questions: dataset path and search algorithm.
//!
//! A terminal gets `dialoguer` prompts; piped stdin is read line by line so
//! answers can be scripted.

use anyhow::{Context, Result, bail};
use dialoguer::Input;
use featsel_core::SearchKind;
use std::io::{BufRead, IsTerminal, Write};
use std::path::PathBuf;

pub const ALGORITHM_PROMPT: &str =
    "Choose the search algorithm: 1 - Forward Selection, 2 - Backward Elimination";

/// Source of free-text answers.
pub trait Prompter {
    /// Ask `prompt`. `None` means no more input is available.
    fn ask(&mut self, prompt: &str) -> Result<Option<String>>;

    /// Show a message (e.g. why an answer was rejected).
    fn tell(&mut self, message: &str);
}

/// `dialoguer` prompts on the controlling terminal.
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        let answer: String = Input::new().with_prompt(prompt).interact_text()?;
        Ok(Some(answer))
    }

    fn tell(&mut self, message: &str) {
        println!("{message}");
    }
}

/// Reads answers from any line source, echoing prompts to `out`.
pub struct LinePrompter<R, W> {
    input: R,
    out: W,
}

impl<R: BufRead, W: Write> LinePrompter<R, W> {
    pub fn new(input: R, out: W) -> Self {
        Self { input, out }
    }
}

impl<R: BufRead, W: Write> Prompter for LinePrompter<R, W> {
    fn ask(&mut self, prompt: &str) -> Result<Option<String>> {
        writeln!(self.out, "{prompt}")?;
        self.out.flush()?;
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn tell(&mut self, message: &str) {
        let _ = writeln!(self.out, "{message}");
    }
}

/// Run `f` with a prompter suited to the current stdin.
pub fn with_stdin_prompter<T>(f: impl FnOnce(&mut dyn Prompter) -> Result<T>) -> Result<T> {
    if std::io::stdin().is_terminal() {
        f(&mut TerminalPrompter)
    } else {
        let stdin = std::io::stdin();
        f(&mut LinePrompter::new(stdin.lock(), std::io::stdout()))
    }
}

/// Ask for the dataset file name.
pub fn ask_dataset_path(prompter: &mut dyn Prompter) -> Result<PathBuf> {
    loop {
        let Some(answer) = prompter.ask("Type in the name of the file to test")? else {
            bail!("input closed before a dataset file was given");
        };
        if answer.is_empty() {
            prompter.tell("Please enter a file name.");
            continue;
        }
        return Ok(PathBuf::from(answer));
    }
}

/// Ask for the algorithm until the answer is 1 or 2.
pub fn ask_search_kind(prompter: &mut dyn Prompter) -> Result<SearchKind> {
    loop {
        let answer = prompter
            .ask(ALGORITHM_PROMPT)?
            .context("input closed before an algorithm was chosen")?;
        match answer.parse::<SearchKind>() {
            Ok(kind) => return Ok(kind),
            Err(e) => {
                tracing::debug!(answer = %answer, "Rejected algorithm choice");
                prompter.tell(&e.to_string());
            }
        }
    }
}
