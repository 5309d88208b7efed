//! Test utilities for widget tests
//!
//! Event constructors ([`key`], [`char_key`], [`click`]) and a
//! [`RenderHarness`] that renders into ratatui's `TestBackend` and dumps the
//! buffer as plain text for snapshot-style assertions.

use crossterm::event::{
    KeyCode, KeyEvent, KeyEventKind, KeyEventState, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};
use ratatui::{backend::TestBackend, buffer::Buffer, Frame, Terminal};

/// Create a `KeyEvent` from a key string.
///
/// Accepts single characters (`"a"`), names (`"esc"`, `"enter"`,
/// `"backspace"`, `"delete"`, `"left"`, `"right"`, `"home"`, `"end"`,
/// `"tab"`) and a `ctrl+` prefix (`"ctrl+u"`).
///
/// # Panics
///
/// Panics on an unrecognized key string, making it suitable for tests.
pub fn key(s: &str) -> KeyEvent {
    let (modifiers, name) = match s.strip_prefix("ctrl+") {
        Some(rest) => (KeyModifiers::CONTROL, rest),
        None => (KeyModifiers::empty(), s),
    };

    let code = match name {
        "esc" => KeyCode::Esc,
        "enter" => KeyCode::Enter,
        "backspace" => KeyCode::Backspace,
        "delete" => KeyCode::Delete,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "tab" => KeyCode::Tab,
        name => {
            let mut chars = name.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => KeyCode::Char(c),
                _ => panic!("invalid key string: {:?}", s),
            }
        }
    };

    KeyEvent {
        code,
        modifiers,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a `KeyEvent` for a character with no modifiers.
pub fn char_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::empty(),
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a `KeyEvent` for a character with Ctrl held.
pub fn ctrl_key(c: char) -> KeyEvent {
    KeyEvent {
        code: KeyCode::Char(c),
        modifiers: KeyModifiers::CONTROL,
        kind: KeyEventKind::Press,
        state: KeyEventState::empty(),
    }
}

/// Create a left-button mouse-down event at the given cell.
pub fn click(column: u16, row: u16) -> MouseEvent {
    MouseEvent {
        kind: MouseEventKind::Down(MouseButton::Left),
        column,
        row,
        modifiers: KeyModifiers::empty(),
    }
}

/// Render the buffer's symbols as plain text, one line per row.
pub fn buffer_to_string_plain(buffer: &Buffer) -> String {
    let area = buffer.area;
    let mut out = String::with_capacity((area.width as usize + 1) * area.height as usize);
    for y in area.y..area.y + area.height {
        for x in area.x..area.x + area.width {
            out.push_str(buffer[(x, y)].symbol());
        }
        out.push('\n');
    }
    out
}

/// In-memory render target for widget tests.
pub struct RenderHarness {
    terminal: Terminal<TestBackend>,
}

impl RenderHarness {
    /// Create a harness with the given terminal size.
    pub fn new(width: u16, height: u16) -> Self {
        let terminal = Terminal::new(TestBackend::new(width, height))
            .expect("test backend terminal should build");
        Self { terminal }
    }

    /// Run one render pass.
    pub fn render(&mut self, draw: impl FnOnce(&mut Frame)) {
        self.terminal.draw(|frame| draw(frame)).expect("draw");
    }

    /// Run one render pass and return the buffer as plain text.
    pub fn render_to_string_plain(&mut self, draw: impl FnOnce(&mut Frame)) -> String {
        self.render(draw);
        buffer_to_string_plain(self.terminal.backend().buffer())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_parses_plain_char() {
        let k = key("q");
        assert_eq!(k.code, KeyCode::Char('q'));
        assert_eq!(k.modifiers, KeyModifiers::empty());
    }

    #[test]
    fn key_parses_ctrl_combo() {
        let k = key("ctrl+u");
        assert_eq!(k.code, KeyCode::Char('u'));
        assert!(k.modifiers.contains(KeyModifiers::CONTROL));
    }

    #[test]
    fn key_parses_named_keys() {
        assert_eq!(key("esc").code, KeyCode::Esc);
        assert_eq!(key("backspace").code, KeyCode::Backspace);
        assert_eq!(key("enter").code, KeyCode::Enter);
    }

    #[test]
    fn harness_dumps_rendered_text() {
        use ratatui::widgets::Paragraph;

        let mut harness = RenderHarness::new(10, 1);
        let output = harness.render_to_string_plain(|frame| {
            frame.render_widget(Paragraph::new("hello"), frame.area());
        });
        assert!(output.contains("hello"));
    }
}
