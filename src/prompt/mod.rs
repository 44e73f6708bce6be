//! Interactive prompts drawn with ratatui in an inline viewport.
//!
//! The workflow only sees the [`Prompter`] trait; [`TerminalPrompter`] is the
//! real implementation and tests substitute scripted ones.

use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use ratatui::Frame;
use secrecy::SecretString;

use crate::{config::Host, lib::errors::PromptError};

mod host_select;
mod input;
mod password;
mod terminal;
mod user_select;

pub use host_select::{host_matches, HostSelect, VISIBLE_HOST_ROWS};
pub use password::{PasswordPrompt, PASSWORD_MASK};
pub use terminal::Terminal;
pub use user_select::{UserSelect, OTHER_LABEL};

/// Validation hook for free-text prompts; `Err` carries the message shown to the operator.
pub type Validator<'a> = &'a dyn Fn(&str) -> Result<(), String>;

/// The three questions the launcher asks.
pub trait Prompter {
    /// Returns the index of the chosen host in `hosts`.
    fn select_host(&mut self, hosts: &[Host]) -> Result<usize, PromptError>;
    /// Returns one of `logins` or a login typed by the operator.
    fn select_login(&mut self, logins: &[String]) -> Result<String, PromptError>;
    /// Masked entry, re-asked until `validate` accepts it.
    fn password(&mut self, validate: Validator<'_>) -> Result<SecretString, PromptError>;
}

/// Outcome of feeding one key to a prompt.
#[derive(Debug)]
pub enum Step<T> {
    Continue,
    Done(T),
    Cancel(PromptError),
}

/// A prompt's state machine, independent from the terminal it is drawn on.
pub trait PromptState {
    type Output;

    /// Rows of the inline viewport.
    fn height(&self) -> u16;
    fn render(&mut self, frame: &mut Frame);
    fn handle_key(&mut self, key: KeyEvent) -> Step<Self::Output>;
    /// Line left on screen once the prompt has been answered.
    fn summary(&self, output: &Self::Output) -> Option<String>;
}

/// Draw `state` until it produces a value or is cancelled.
pub fn run_prompt<S: PromptState>(mut state: S) -> Result<S::Output, PromptError> {
    let mut terminal = Terminal::inline(state.height())?;

    let outcome = loop {
        terminal.draw(|frame| state.render(frame))?;
        if let Event::Key(key) = event::read()? {
            // Windows reports releases too
            if key.kind != KeyEventKind::Press {
                continue;
            }
            if let Some(err) = interrupt_for(&key) {
                break Err(err);
            }
            match state.handle_key(key) {
                Step::Continue => {}
                Step::Done(value) => break Ok(value),
                Step::Cancel(err) => break Err(err),
            }
        }
    };

    let summary = outcome.as_ref().ok().and_then(|value| state.summary(value));
    terminal.finish(summary)?;
    outcome
}

/// Ctrl-C interrupts and Ctrl-D ends input in every prompt.
fn interrupt_for(key: &KeyEvent) -> Option<PromptError> {
    if !key.modifiers.contains(KeyModifiers::CONTROL) {
        return None;
    }
    match key.code {
        KeyCode::Char('c') => Some(PromptError::Interrupted),
        KeyCode::Char('d') => Some(PromptError::Eof),
        _ => None,
    }
}

/// [`Prompter`] backed by the process terminal.
#[derive(Debug, Default)]
pub struct TerminalPrompter;

impl Prompter for TerminalPrompter {
    fn select_host(&mut self, hosts: &[Host]) -> Result<usize, PromptError> {
        if hosts.is_empty() {
            return Err(PromptError::NoItems { label: "Host" });
        }
        run_prompt(HostSelect::new(hosts))
    }

    fn select_login(&mut self, logins: &[String]) -> Result<String, PromptError> {
        run_prompt(UserSelect::new(logins))
    }

    fn password(&mut self, validate: Validator<'_>) -> Result<SecretString, PromptError> {
        run_prompt(PasswordPrompt::new(validate))
    }
}
