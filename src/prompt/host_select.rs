use crossterm::event::{Event, KeyCode, KeyEvent};
use crossterm::style::{style, Stylize};
use ratatui::prelude::*;
use ratatui::widgets::*;

use crate::config::Host;
use crate::lib::errors::PromptError;

use super::{input::InputBuffer, PromptState, Step};

pub const VISIBLE_HOST_ROWS: usize = 4;
const LABEL_HINT: &str = " - DOWN:j UP:k SEARCH:/";
const SEARCH_PROMPT: &str = "Search: ";
const DETAILS_HEADER: &str = "----------- Host -----------";
// label + search line + rows + header + three detail lines
const HEIGHT: u16 = 1 + 1 + VISIBLE_HOST_ROWS as u16 + 4;

/// Case-insensitive substring match on the host name, ignoring whitespace.
pub fn host_matches(host: &Host, query: &str) -> bool {
    normalize(&host.name).contains(&normalize(query))
}

fn normalize(value: &str) -> String {
    value
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .flat_map(char::to_lowercase)
        .collect()
}

enum Mode {
    Normal,
    Search,
}

/// Scrolling host list with a search filter and a details panel.
pub struct HostSelect<'a> {
    hosts: &'a [Host],
    filtered: Vec<usize>,
    state: ListState,
    input_buffer: InputBuffer,
    mode: Mode,
}

impl<'a> HostSelect<'a> {
    pub fn new(hosts: &'a [Host]) -> Self {
        Self {
            filtered: (0..hosts.len()).collect(),
            state: ListState::default().with_selected(Some(0)),
            input_buffer: InputBuffer::new(SEARCH_PROMPT),
            mode: Mode::Normal,
            hosts,
        }
    }

    /// Index into the configured host list of the highlighted row.
    pub fn highlighted(&self) -> Option<usize> {
        self.state
            .selected()
            .and_then(|row| self.filtered.get(row))
            .copied()
    }

    fn refilter(&mut self) {
        let query = self.input_buffer.value();
        self.filtered = self
            .hosts
            .iter()
            .enumerate()
            .filter(|(_, host)| host_matches(host, query))
            .map(|(index, _)| index)
            .collect();
        let selected = if self.filtered.is_empty() { None } else { Some(0) };
        self.state.select(selected);
    }

    fn up(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(0) | None => self.filtered.len() - 1,
            Some(i) => i - 1,
        };
        self.state.select(Some(i));
    }

    fn down(&mut self) {
        if self.filtered.is_empty() {
            return;
        }
        let i = match self.state.selected() {
            Some(i) if i + 1 < self.filtered.len() => i + 1,
            _ => 0,
        };
        self.state.select(Some(i));
    }

    fn row(host: &Host, active: bool) -> ListItem<'static> {
        let line = if active {
            Line::from(vec![
                Span::raw("▸ "),
                Span::styled(
                    host.name.clone(),
                    Style::default()
                        .fg(Color::Cyan)
                        .add_modifier(Modifier::UNDERLINED),
                ),
                Span::raw(" ("),
                Span::styled(host.address.clone(), Style::default().fg(Color::Green)),
                Span::raw(")"),
            ])
        } else {
            Line::from(vec![
                Span::raw("  "),
                Span::styled(host.name.clone(), Style::default().fg(Color::Cyan)),
                Span::raw(" ("),
                Span::styled(host.address.clone(), Style::default().fg(Color::Green)),
                Span::raw(")"),
            ])
        };
        ListItem::new(line)
    }

    fn details(&self) -> Paragraph<'static> {
        let faint = Style::default().add_modifier(Modifier::DIM);
        let mut lines = vec![Line::from(DETAILS_HEADER)];
        if let Some(host) = self.highlighted().map(|index| &self.hosts[index]) {
            for (label, value) in [
                ("Name:", &host.name),
                ("Type:", &host.kind),
                ("Address:", &host.address),
            ] {
                lines.push(Line::from(vec![
                    Span::styled(format!("{label:<9}"), faint),
                    Span::raw(value.clone()),
                ]));
            }
        }
        Paragraph::new(lines)
    }
}

impl PromptState for HostSelect<'_> {
    type Output = usize;

    fn height(&self) -> u16 {
        HEIGHT
    }

    fn render(&mut self, f: &mut Frame) {
        let recs = Layout::vertical([
            Constraint::Length(1),
            Constraint::Length(1),
            Constraint::Length(VISIBLE_HOST_ROWS as u16),
            Constraint::Length(4),
        ])
        .split(f.size());

        let label = Line::from(vec![
            Span::styled("? ", Style::default().fg(Color::Blue)),
            Span::styled("Host", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw(LABEL_HINT),
        ]);
        f.render_widget(Paragraph::new(label), recs[0]);

        if matches!(self.mode, Mode::Search) {
            f.render_widget(
                Paragraph::new(self.input_buffer.line()).style(Style::default().fg(Color::Cyan)),
                recs[1],
            );
            f.set_cursor(
                recs[1].x + self.input_buffer.visual_cursor(false) as u16,
                recs[1].y,
            );
        }

        let active = self.state.selected();
        let items: Vec<ListItem> = if self.filtered.is_empty() {
            vec![ListItem::new(Line::from(Span::styled(
                "  no matching hosts",
                Style::default().add_modifier(Modifier::DIM),
            )))]
        } else {
            self.filtered
                .iter()
                .enumerate()
                .map(|(row, &index)| Self::row(&self.hosts[index], Some(row) == active))
                .collect()
        };
        f.render_stateful_widget(List::new(items), recs[2], &mut self.state);
        f.render_widget(self.details(), recs[3]);
    }

    fn handle_key(&mut self, key: KeyEvent) -> Step<usize> {
        use KeyCode::*;
        match key.code {
            Down => self.down(),
            Up => self.up(),
            Enter => {
                // nothing to pick while the filter matches no host
                if let Some(index) = self.highlighted() {
                    return Step::Done(index);
                }
            }
            _ => {
                if matches!(self.mode, Mode::Normal) {
                    match key.code {
                        Char('j') => self.down(),
                        Char('k') => self.up(),
                        Char('/') => {
                            self.mode = Mode::Search;
                            self.input_buffer.reset();
                        }
                        Esc => return Step::Cancel(PromptError::Interrupted),
                        _ => {}
                    }
                } else {
                    match key.code {
                        Esc => {
                            self.input_buffer.reset();
                            self.mode = Mode::Normal;
                            self.refilter();
                        }
                        _ => {
                            self.input_buffer.handle_event(Event::Key(key));
                            self.refilter();
                        }
                    }
                }
            }
        }
        Step::Continue
    }

    fn summary(&self, output: &usize) -> Option<String> {
        let host = self.hosts.get(*output)?;
        Some(format!("{} {}", style("✔").green(), style(&host.name).bold()))
    }
}
