use std::{
    io::{self, stdout, IsTerminal, Stdout, Write},
    ops::{Deref, DerefMut},
};

use crossterm::{
    cursor::Show,
    execute,
    style::Print,
    terminal::{disable_raw_mode, enable_raw_mode},
};
use ratatui::{self, backend::CrosstermBackend, TerminalOptions, Viewport};

use crate::lib::errors::PromptError;

type TerminalBackend<W> = ratatui::Terminal<CrosstermBackend<W>>;

/// Raw-mode terminal drawing into an inline viewport below the cursor.
pub struct Terminal<W: Write> {
    inner: TerminalBackend<W>,
}

impl Terminal<Stdout> {
    pub fn inline(height: u16) -> Result<Self, PromptError> {
        if !io::stdin().is_terminal() {
            return Err(PromptError::NotInteractive);
        }

        enable_raw_mode()?;
        let backend = CrosstermBackend::new(stdout());
        let terminal = ratatui::Terminal::with_options(
            backend,
            TerminalOptions {
                viewport: Viewport::Inline(height),
            },
        );

        match terminal {
            Ok(inner) => Ok(Self { inner }),
            Err(err) => {
                let _ = disable_raw_mode();
                Err(err.into())
            }
        }
    }

    /// Erase the prompt area and leave `summary` in its place.
    pub fn finish(mut self, summary: Option<String>) -> Result<(), PromptError> {
        self.inner.clear()?;
        disable_raw_mode()?;
        if let Some(summary) = summary {
            execute!(self.inner.backend_mut(), Print(summary), Print("\r\n"))?;
        }
        Ok(())
    }
}

impl<W: Write> Deref for Terminal<W> {
    type Target = TerminalBackend<W>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl<W: Write> DerefMut for Terminal<W> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

impl<W: Write> Drop for Terminal<W> {
    fn drop(&mut self) {
        let _ = restore_terminal(self.inner.backend_mut());
    }
}

fn restore_terminal(writer: &mut impl Write) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(writer, Show)
}
