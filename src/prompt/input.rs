use crossterm::event::Event;
use std::ops::{Deref, DerefMut};
use unicode_width::UnicodeWidthStr;

use tui_input::{backend::crossterm::EventHandler, Input};

/// Single-line editor with a fixed prompt prefix.
pub(crate) struct InputBuffer {
    pub(crate) input: Input,
    pub(crate) prompt: String,
}

impl Deref for InputBuffer {
    type Target = Input;

    fn deref(&self) -> &Self::Target {
        &self.input
    }
}

impl DerefMut for InputBuffer {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.input
    }
}

impl InputBuffer {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            input: Input::default(),
            prompt: prompt.into(),
        }
    }

    pub(crate) fn line(&self) -> String {
        self.prompt.clone() + self.input.value()
    }

    /// Prompt followed by one `mask` per typed character.
    pub(crate) fn masked_line(&self, mask: char) -> String {
        let masked: String = self.input.value().chars().map(|_| mask).collect();
        self.prompt.clone() + &masked
    }

    /// Cursor column; masked input is one column per character.
    pub(crate) fn visual_cursor(&self, masked: bool) -> usize {
        let typed = if masked {
            self.input.value()[..self.byte_cursor()].chars().count()
        } else {
            self.input.visual_cursor()
        };
        UnicodeWidthStr::width(self.prompt.as_str()) + typed
    }

    pub(crate) fn handle_event(&mut self, event: Event) {
        self.input.handle_event(&event);
    }

    fn byte_cursor(&self) -> usize {
        self.input
            .value()
            .char_indices()
            .nth(self.input.cursor())
            .map(|(index, _)| index)
            .unwrap_or(self.input.value().len())
    }
}
