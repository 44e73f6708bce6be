use crossterm::event::{Event, KeyCode, KeyEvent};
use crossterm::style::{style, Stylize};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::lib::errors::PromptError;

use super::{input::InputBuffer, PromptState, Step};

/// Entry that switches the list to free-text input.
pub const OTHER_LABEL: &str = "Other";
const VISIBLE_ROWS: u16 = 5;
const EMPTY_LOGIN_MESSAGE: &str = "Login must not be empty";

enum Mode {
    List,
    Add,
}

/// Login list with an extra entry for typing a login that is not configured.
pub struct UserSelect<'a> {
    logins: &'a [String],
    state: ListState,
    input_buffer: InputBuffer,
    mode: Mode,
    error: Option<&'static str>,
}

impl<'a> UserSelect<'a> {
    pub fn new(logins: &'a [String]) -> Self {
        Self {
            logins,
            // row 0 is OTHER_LABEL
            state: ListState::default().with_selected(Some(if logins.is_empty() { 0 } else { 1 })),
            input_buffer: InputBuffer::new(format!("{OTHER_LABEL}: ")),
            mode: Mode::List,
            error: None,
        }
    }

    fn rows(&self) -> usize {
        self.logins.len() + 1
    }

    fn up(&mut self) {
        let i = match self.state.selected() {
            Some(0) | None => self.rows() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn down(&mut self) {
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.rows() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    fn pick(&mut self) -> Step<String> {
        match self.state.selected() {
            Some(0) => {
                self.mode = Mode::Add;
                self.input_buffer.reset();
                Step::Continue
            }
            Some(row) => match self.logins.get(row - 1) {
                Some(login) => Step::Done(login.clone()),
                None => Step::Continue,
            },
            None => Step::Continue,
        }
    }

    fn submit_typed(&mut self) -> Step<String> {
        let typed = self.input_buffer.value().trim();
        if typed.is_empty() {
            self.error = Some(EMPTY_LOGIN_MESSAGE);
            return Step::Continue;
        }
        Step::Done(typed.to_string())
    }

    fn handle_list_key(&mut self, key: KeyEvent) -> Step<String> {
        match key.code {
            KeyCode::Down | KeyCode::Char('j') => self.down(),
            KeyCode::Up | KeyCode::Char('k') => self.up(),
            KeyCode::Enter => return self.pick(),
            KeyCode::Esc => return Step::Cancel(PromptError::Interrupted),
            _ => {}
        }
        Step::Continue
    }

    fn handle_add_key(&mut self, key: KeyEvent) -> Step<String> {
        match key.code {
            KeyCode::Enter => return self.submit_typed(),
            KeyCode::Esc => {
                self.mode = Mode::List;
                self.error = None;
            }
            _ => {
                self.error = None;
                self.input_buffer.handle_event(Event::Key(key));
            }
        }
        Step::Continue
    }
}

impl PromptState for UserSelect<'_> {
    type Output = String;

    fn height(&self) -> u16 {
        // label + rows + input + error
        1 + VISIBLE_ROWS + 1 + 1
    }

    fn render(&mut self, f: &mut Frame) {
        let recs = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(VISIBLE_ROWS),
            Constraint::Length(1),
            Constraint::Length(1),
        ])
        .split(f.size());

        let label = Line::from(vec![
            Span::styled("? ", Style::default().fg(Color::Blue)),
            Span::styled("User", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(" - DOWN:j UP:k"),
        ]);
        f.render_widget(Paragraph::new(label), recs[0]);

        let active = self.state.selected();
        let mut items = vec![ListItem::new(Line::from(vec![
            Span::raw(if active == Some(0) { "▸ " } else { "  " }),
            Span::styled(
                format!("+ {OTHER_LABEL}"),
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::ITALIC),
            ),
        ]))];
        items.extend(self.logins.iter().enumerate().map(|(index, login)| {
            let row = index + 1;
            if active == Some(row) {
                ListItem::new(Line::from(vec![
                    Span::raw("▸ "),
                    Span::styled(
                        login.clone(),
                        Style::default()
                            .fg(Color::Cyan)
                            .add_modifier(Modifier::UNDERLINED),
                    ),
                ]))
            } else {
                ListItem::new(Line::from(vec![
                    Span::raw("  "),
                    Span::styled(login.clone(), Style::default().fg(Color::Cyan)),
                ]))
            }
        }));
        f.render_stateful_widget(List::new(items), recs[1], &mut self.state);

        if matches!(self.mode, Mode::Add) {
            f.render_widget(Paragraph::new(self.input_buffer.line()), recs[2]);
            f.set_cursor(
                recs[2].x + self.input_buffer.visual_cursor(false) as u16,
                recs[2].y,
            );
        }
        if let Some(message) = self.error {
            f.render_widget(
                Paragraph::new(Line::from(Span::styled(
                    format!("✗ {message}"),
                    Style::default().fg(Color::Red),
                ))),
                recs[3],
            );
        }
    }

    fn handle_key(&mut self, key: KeyEvent) -> Step<String> {
        if matches!(self.mode, Mode::List) {
            self.handle_list_key(key)
        } else {
            self.handle_add_key(key)
        }
    }

    fn summary(&self, output: &String) -> Option<String> {
        Some(format!("{} {}", style("✔").green(), style(output).bold()))
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyCode;

    use super::*;
    use crate::prompt::testing::{chars, key, render_to_string};

    fn logins() -> Vec<String> {
        vec![String::from("CORP\\alice"), String::from("CORP\\bob")]
    }

    fn press(select: &mut UserSelect<'_>, keys: Vec<KeyEvent>) -> Option<String> {
        for key in keys {
            if let Step::Done(login) = select.handle_key(key) {
                return Some(login);
            }
        }
        None
    }

    #[test]
    fn first_configured_login_is_preselected() {
        let logins = logins();
        let mut select = UserSelect::new(&logins);

        assert_eq!(
            press(&mut select, vec![key(KeyCode::Enter)]),
            Some(String::from("CORP\\alice"))
        );
    }

    #[test]
    fn other_entry_accepts_typed_login() {
        let logins = logins();
        let mut select = UserSelect::new(&logins);

        let mut keys = vec![key(KeyCode::Up), key(KeyCode::Enter)];
        keys.extend(chars("  LAB\\carol "));
        keys.push(key(KeyCode::Enter));

        assert_eq!(press(&mut select, keys), Some(String::from("LAB\\carol")));
    }

    #[test]
    fn typed_login_must_not_be_blank() {
        let logins = logins();
        let mut select = UserSelect::new(&logins);

        let keys = vec![
            key(KeyCode::Up),
            key(KeyCode::Enter),
            key(KeyCode::Char(' ')),
            key(KeyCode::Enter),
        ];
        assert_eq!(press(&mut select, keys), None);
        assert_eq!(select.error, Some(EMPTY_LOGIN_MESSAGE));
    }

    #[test]
    fn escape_leaves_free_text_then_cancels() {
        let logins = logins();
        let mut select = UserSelect::new(&logins);
        select.handle_key(key(KeyCode::Up));
        select.handle_key(key(KeyCode::Enter));

        assert!(matches!(
            select.handle_key(key(KeyCode::Esc)),
            Step::Continue
        ));
        assert!(matches!(
            select.handle_key(key(KeyCode::Esc)),
            Step::Cancel(PromptError::Interrupted)
        ));
    }

    #[test]
    fn empty_login_list_starts_on_other() {
        let logins: Vec<String> = Vec::new();
        let mut select = UserSelect::new(&logins);

        let mut keys = vec![key(KeyCode::Enter)];
        keys.extend(chars("CORP\\dave"));
        keys.push(key(KeyCode::Enter));

        assert_eq!(press(&mut select, keys), Some(String::from("CORP\\dave")));
    }

    #[test]
    fn render_marks_other_entry_distinctly() {
        let logins = logins();
        let mut select = UserSelect::new(&logins);

        let screen = render_to_string(&mut select, 40);

        assert!(screen.contains("? User"), "{screen}");
        assert!(screen.contains("  + Other"), "{screen}");
        assert!(screen.contains("▸ CORP\\alice"), "{screen}");
        assert!(screen.contains("  CORP\\bob"), "{screen}");
    }
}
