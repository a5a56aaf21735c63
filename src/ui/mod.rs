//! User interface module - interaction (prompts) and formatting.
//!
//! Separates concerns:
//! - `formatter` - Pure formatting functions
//! - `editor` - Editing text in the user's editor
//! - This module - Interactive prompts and user input handling

use std::cell::RefCell;
use std::io::{self, BufRead, Stdout, StdinLock, Write};

use console::style;

use crate::classify::TypeSelector;
use crate::domain::{Change, Type, TypeManager};
use crate::error::{ReleaseNotesError, Result};

pub mod editor;
pub mod formatter;

// Re-export formatter functions for convenience
pub use editor::edit_text;
pub use formatter::{
    display_boundary_warning, display_change_summary, display_error,
    display_release_url, display_status, display_success, format_block,
};

/// Line-based questions on an input and output stream.
///
/// Every question may be preceded by a preamble, shown framed above it.
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<StdinLock<'static>, Stdout> {
    /// Prompter on the process's stdin and stdout
    pub fn stdio() -> Self {
        Prompter::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Prompter { input, output }
    }

    /// Give back the output stream
    pub fn into_output(self) -> W {
        self.output
    }

    /// Print a line between questions
    pub fn message(&mut self, text: &str) -> Result<()> {
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    fn read_answer(&mut self) -> Result<String> {
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Err(ReleaseNotesError::prompt("No more input"));
        }
        Ok(line.trim().to_string())
    }

    fn write_question(
        &mut self,
        preamble: Option<&str>,
        question: &str,
        default: Option<&str>,
    ) -> Result<()> {
        if let Some(text) = preamble.filter(|t| !t.trim().is_empty()) {
            writeln!(self.output, "\n{}", style(format_block(text)).cyan())?;
        }

        write!(self.output, "{}", style(question).cyan().bold())?;
        if let Some(default) = default {
            write!(self.output, " {}", style(format!("(default: {})", default)).green())?;
        }
        write!(self.output, ": ")?;
        Ok(())
    }

    /// Free-text question.
    ///
    /// An empty answer gives `default`, or an empty string without one.
    pub fn ask(
        &mut self,
        preamble: Option<&str>,
        question: &str,
        default: Option<&str>,
    ) -> Result<String> {
        self.write_question(preamble, question, default)?;
        let answer = self.read_answer()?;

        if answer.is_empty() {
            return Ok(default.unwrap_or_default().to_string());
        }
        Ok(answer)
    }

    /// Free-text question with numbered suggestions.
    ///
    /// Answering with a suggestion's number picks that suggestion; any other
    /// answer is returned as typed. An empty answer picks the first suggestion.
    pub fn ask_with_suggestions(
        &mut self,
        question: &str,
        suggestions: &[String],
    ) -> Result<String> {
        for (i, suggestion) in suggestions.iter().enumerate() {
            writeln!(self.output, "  {}) {}", style(i + 1).dim(), suggestion)?;
        }

        let answer = self.ask(None, question, suggestions.first().map(String::as_str))?;
        let picked = answer
            .parse::<usize>()
            .ok()
            .filter(|n| (1..=suggestions.len()).contains(n))
            .map(|n| suggestions[n - 1].clone());

        Ok(picked.unwrap_or(answer))
    }

    /// Yes/no question, repeated until the answer is recognized
    pub fn confirm(
        &mut self,
        preamble: Option<&str>,
        question: &str,
        default: bool,
    ) -> Result<bool> {
        let shown = if default { "yes" } else { "no" };
        self.write_question(preamble, question, Some(shown))?;

        loop {
            match self.read_answer()?.to_lowercase().as_str() {
                "" => return Ok(default),
                "y" | "yes" => return Ok(true),
                "n" | "no" => return Ok(false),
                other => {
                    write!(self.output, "Please answer yes or no, not '{}': ", other)?;
                }
            }
        }
    }

    /// Pick one of `choices` by key, repeated until a listed key is given.
    ///
    /// # Arguments
    /// * `choices` - `(key, label)` pairs in display order
    /// * `default` - Key returned for an empty answer
    pub fn select(
        &mut self,
        preamble: Option<&str>,
        question: &str,
        choices: &[(String, String)],
        default: Option<&str>,
    ) -> Result<String> {
        if choices.is_empty() {
            return Err(ReleaseNotesError::prompt(format!(
                "No choices for '{}'",
                question
            )));
        }

        let default = default.and_then(|key| choices.iter().find(|(k, _)| k == key));
        let shown = default.map(|(key, label)| format!("{} \"{}\"", key, label));

        if let Some(text) = preamble.filter(|t| !t.trim().is_empty()) {
            writeln!(self.output, "\n{}", style(format_block(text)).cyan())?;
        }
        for (key, label) in choices {
            writeln!(self.output, "  [{}] {}", style(key).yellow(), label)?;
        }
        self.write_question(None, question, shown.as_deref())?;

        loop {
            let answer = self.read_answer()?;
            if answer.is_empty() {
                if let Some((key, _)) = default {
                    return Ok(key.clone());
                }
            } else if let Some((key, _)) = choices.iter().find(|(k, _)| *k == answer) {
                return Ok(key.clone());
            }

            write!(
                self.output,
                "Value \"{}\" is invalid, pick one of the listed keys: ",
                answer
            )?;
        }
    }
}

/// Asks the user for the type of every change.
///
/// Shows the full change description and a menu of the manager's types,
/// defaulting to the type the change already has.
pub struct PromptTypeSelector<'p, R, W> {
    prompter: &'p RefCell<Prompter<R, W>>,
}

impl<'p, R: BufRead, W: Write> PromptTypeSelector<'p, R, W> {
    pub fn new(prompter: &'p RefCell<Prompter<R, W>>) -> Self {
        PromptTypeSelector { prompter }
    }
}

impl<R: BufRead, W: Write> TypeSelector for PromptTypeSelector<'_, R, W> {
    fn select_type(&self, change: &Change, types: &TypeManager) -> Result<Type> {
        let choices: Vec<(String, String)> = types
            .get_types_for_command()
            .into_iter()
            .map(|(code, description)| (code.to_string(), description))
            .collect();
        let default = change.change_type().code().to_string();

        let picked = self.prompter.borrow_mut().select(
            Some(&change.display_full()),
            "Type of change",
            &choices,
            Some(&default),
        )?;

        picked
            .chars()
            .next()
            .and_then(|code| types.get_type_by_code(code))
            .cloned()
            .ok_or_else(|| ReleaseNotesError::prompt(format!("Unknown type '{}'", picked)))
    }
}
