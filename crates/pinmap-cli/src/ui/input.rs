use crossterm::event::{KeyCode, KeyEvent};
use ratatui::style::{Modifier, Style};
use tui_textarea::{CursorMove, TextArea};

/// Single-line text field used by the name prompt and the pin form.
#[derive(Clone)]
pub struct TextInput {
    area: TextArea<'static>,
}

impl TextInput {
    /// Creates a field holding `value` with the cursor at the end.
    pub fn with_value(value: &str) -> Self {
        let mut area = TextArea::new(vec![value.to_owned()]);
        area.set_cursor_line_style(Style::default());
        area.set_cursor_style(Style::default().add_modifier(Modifier::REVERSED));
        area.move_cursor(CursorMove::End);
        Self { area }
    }

    /// Current text.
    pub fn value(&self) -> &str {
        self.area.lines().first().map_or("", String::as_str)
    }

    /// Feeds a key to the field.
    ///
    /// Enter is never inserted so the field stays on one line; the caller treats it
    /// as commit.
    pub fn handle_key(&mut self, key: &KeyEvent) {
        if matches!(key.code, KeyCode::Enter) {
            return;
        }
        self.area.input(*key);
    }

    /// Shows or hides the cursor.
    pub fn set_focused(&mut self, focused: bool) {
        let style = if focused {
            Style::default().add_modifier(Modifier::REVERSED)
        } else {
            Style::default()
        };
        self.area.set_cursor_style(style);
    }

    /// Widget for rendering.
    pub fn widget(&self) -> &TextArea<'static> {
        &self.area
    }
}

impl Default for TextInput {
    fn default() -> Self {
        Self::with_value("")
    }
}
