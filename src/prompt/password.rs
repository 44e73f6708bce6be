use crossterm::event::{Event, KeyCode, KeyEvent};
use crossterm::style::{style, Stylize};
use ratatui::prelude::*;
use ratatui::widgets::*;
use secrecy::SecretString;

use crate::lib::errors::PromptError;

use super::{input::InputBuffer, PromptState, Step, Validator};

pub const PASSWORD_MASK: char = '*';

/// Masked single-line entry that only completes once the validator accepts it.
pub struct PasswordPrompt<'a> {
    validate: Validator<'a>,
    input_buffer: InputBuffer,
    error: Option<String>,
}

impl<'a> PasswordPrompt<'a> {
    pub fn new(validate: Validator<'a>) -> Self {
        Self {
            validate,
            input_buffer: InputBuffer::new("Password: "),
            error: None,
        }
    }
}

impl PromptState for PasswordPrompt<'_> {
    type Output = SecretString;

    fn height(&self) -> u16 {
        2
    }

    fn render(&mut self, f: &mut Frame) {
        let recs = Layout::vertical([Constraint::Length(1), Constraint::Length(1)]).split(f.size());

        let line = Line::from(vec![
            Span::styled("? ", Style::default().fg(Color::Blue)),
            Span::raw(self.input_buffer.masked_line(PASSWORD_MASK)),
        ]);
        f.render_widget(Paragraph::new(line), recs[0]);
        f.set_cursor(
            recs[0].x + 2 + self.input_buffer.visual_cursor(true) as u16,
            recs[0].y,
        );

        if let Some(message) = &self.error {
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("✗ {message}"),
                    Style::default().fg(Color::Red),
                ))),
                recs[1],
            );
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Step<SecretString> {
        match key.code {
            KeyCode::Enter => match (self.validate)(self.input_buffer.value()) {
                Ok(()) => {
                    return Step::Done(SecretString::from(self.input_buffer.value().to_string()))
                }
                Err(message) => self.error = Some(message),
            },
            KeyCode::Esc => return Step::Cancel(PromptError::Interrupted),
            _ => {
                self.input_buffer.handle_event(Event::Key(key));
                if self.error.is_some() {
                    self.error = (self.validate)(self.input_buffer.value()).err();
                }
            }
        }
        Step::Continue
    }

    fn summary(&self, _output: &SecretString) -> Option<String> {
        let masked = self.input_buffer.masked_line(PASSWORD_MASK);
        Some(format!("{} {}", style("✔").green(), style(masked).dim()))
    }
}
