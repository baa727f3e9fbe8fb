use crossterm::event::{KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    prelude::{Backend, Rect},
    style::{Color, Style, Stylize},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use tokio::sync::mpsc::UnboundedSender;

use crate::state_store::{action::Action, State};

use super::{Component, ComponentRender};

/// Single line text input. The cursor position counts chars, not bytes.
pub struct InputBox {
    /// Current value of the input box
    text: String,
    /// Position of cursor in the editor area.
    cursor_position: usize,
}

impl InputBox {
    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn set_text(&mut self, new_text: &str) {
        self.text = String::from(new_text);
        self.cursor_position = self.char_count();
    }

    pub fn reset(&mut self) {
        self.cursor_position = 0;
        self.text.clear();
    }

    fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    fn byte_index(&self) -> usize {
        self.text
            .char_indices()
            .nth(self.cursor_position)
            .map(|(idx, _)| idx)
            .unwrap_or(self.text.len())
    }

    fn move_cursor_left(&mut self) {
        self.cursor_position = self.cursor_position.saturating_sub(1);
    }

    fn move_cursor_right(&mut self) {
        self.cursor_position = (self.cursor_position + 1).min(self.char_count());
    }

    fn enter_char(&mut self, new_char: char) {
        let idx = self.byte_index();
        self.text.insert(idx, new_char);

        self.move_cursor_right();
    }

    fn delete_char(&mut self) {
        if self.cursor_position == 0 {
            return;
        }

        self.move_cursor_left();
        let idx = self.byte_index();
        self.text.remove(idx);
    }
}

impl Component for InputBox {
    fn new(_state: &State, _action_tx: UnboundedSender<Action>) -> Self {
        Self {
            text: String::new(),
            cursor_position: 0,
        }
    }

    fn move_with_state(self, _state: &State) -> Self
    where
        Self: Sized,
    {
        Self { ..self }
    }

    fn name(&self) -> &str {
        "Input Box"
    }

    fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        match key.code {
            KeyCode::Char(to_insert) => self.enter_char(to_insert),
            KeyCode::Backspace => self.delete_char(),
            KeyCode::Left => self.move_cursor_left(),
            KeyCode::Right => self.move_cursor_right(),
            KeyCode::Home => self.cursor_position = 0,
            KeyCode::End => self.cursor_position = self.char_count(),
            _ => {}
        }
    }
}

pub struct RenderProps {
    pub title: String,
    pub placeholder: &'static str,
    pub area: Rect,
    pub border_color: Color,
    pub show_cursor: bool,
}

impl ComponentRender<RenderProps> for InputBox {
    fn render<B: Backend>(&self, frame: &mut Frame<B>, props: RenderProps) {
        let input = if self.text.is_empty() {
            Paragraph::new(props.placeholder).style(Style::default().fg(Color::DarkGray))
        } else {
            Paragraph::new(self.text.as_str()).style(Style::default().fg(Color::Yellow))
        };
        let input = input.block(
            Block::default()
                .borders(Borders::ALL)
                .fg(props.border_color)
                .title(props.title),
        );
        frame.render_widget(input, props.area);

        // Cursor is hidden by default, so we need to make it visible if the input box is selected
        if props.show_cursor {
            frame.set_cursor(
                props.area.x + self.cursor_position as u16 + 1,
                // Move one line down, from the border to the input line
                props.area.y + 1,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use crossterm::event::KeyModifiers;

    use super::*;

    fn input_box() -> InputBox {
        let (action_tx, _) = tokio::sync::mpsc::unbounded_channel();
        InputBox::new(&State::default(), action_tx)
    }

    fn press(input_box: &mut InputBox, code: KeyCode) {
        input_box.handle_key_event(KeyEvent::new(code, KeyModifiers::NONE));
    }

    #[test]
    fn test_typing_and_deleting() {
        let mut input_box = input_box();
        for c in "rot".chars() {
            press(&mut input_box, KeyCode::Char(c));
        }
        press(&mut input_box, KeyCode::Left);
        press(&mut input_box, KeyCode::Char('o'));
        assert_eq!(input_box.text(), "root");

        press(&mut input_box, KeyCode::End);
        press(&mut input_box, KeyCode::Backspace);
        assert_eq!(input_box.text(), "roo");

        input_box.reset();
        assert_eq!(input_box.text(), "");
    }

    #[test]
    fn test_multibyte_chars() {
        let mut input_box = input_box();
        input_box.set_text("รถ");
        press(&mut input_box, KeyCode::Char('!'));
        assert_eq!(input_box.text(), "รถ!");

        press(&mut input_box, KeyCode::Left);
        press(&mut input_box, KeyCode::Backspace);
        assert_eq!(input_box.text(), "ร!");

        press(&mut input_box, KeyCode::Home);
        press(&mut input_box, KeyCode::Backspace);
        assert_eq!(input_box.text(), "ร!");
    }
}
