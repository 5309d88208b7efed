//! Composite autocomplete widget: text input plus dropdown

use crossterm::event::{KeyCode, KeyModifiers, MouseButton, MouseEventKind};
use ratatui::{
    layout::Rect,
    style::{Color, Style},
    text::Line,
    widgets::{Block, Borders, List, ListItem, Paragraph},
    Frame,
};

use crate::component::Component;
use crate::event::EventKind;

const SPINNER: &[char] = &['⠋', '⠙', '⠹', '⠸', '⠼', '⠴', '⠦', '⠧', '⠇', '⠏'];

/// Props for the AutoSelect widget
///
/// A snapshot of the controller's observable state plus the action
/// constructors the host maps back onto controller calls.
pub struct AutoSelectProps<'a, A> {
    /// Current text value
    pub input_value: &'a str,
    /// Placeholder shown while the text value is empty
    pub placeholder: &'a str,
    /// Whether this widget has input focus
    pub is_focused: bool,
    /// Whether the dropdown is open
    pub is_open: bool,
    /// Whether a load is in flight (async variant; false for sync)
    pub loading: bool,
    /// Last loader error (async variant)
    pub error: Option<&'a str>,
    /// Labels of the currently visible options, in order
    pub visible_labels: &'a [String],
    /// Animation counter for the loading spinner
    pub tick: u32,
    /// The text value was edited
    pub on_edit: fn(String) -> A,
    /// The input was clicked / gained focus
    pub on_focus: fn() -> A,
    /// Focus left the widget
    pub on_blur: fn() -> A,
    /// The visible option at this index was clicked
    pub on_activate: fn(usize) -> A,
}

/// An autocomplete input with a dropdown of filtered options.
///
/// The top three rows are a bordered single-line input with cursor; while
/// open, a bordered list of the visible options renders below it, replaced
/// by a spinner row while loading. Typing edits the text; Esc blurs; left
/// clicks focus the input, activate the clicked option, or blur when they
/// land outside the widget. Hit-testing uses the areas recorded during the
/// last render.
#[derive(Default)]
pub struct AutoSelect {
    /// Cursor position (byte index)
    cursor: usize,
    input_area: Rect,
    dropdown_inner: Rect,
    visible_len: usize,
}

impl AutoSelect {
    /// Create a new AutoSelect
    pub fn new() -> Self {
        Self::default()
    }

    fn clamp_cursor(&mut self, value: &str) {
        self.cursor = self.cursor.min(value.len());
    }

    fn move_cursor_left(&mut self, value: &str) {
        if self.cursor > 0 {
            let mut new_pos = self.cursor - 1;
            while new_pos > 0 && !value.is_char_boundary(new_pos) {
                new_pos -= 1;
            }
            self.cursor = new_pos;
        }
    }

    fn move_cursor_right(&mut self, value: &str) {
        if self.cursor < value.len() {
            let mut new_pos = self.cursor + 1;
            while new_pos < value.len() && !value.is_char_boundary(new_pos) {
                new_pos += 1;
            }
            self.cursor = new_pos;
        }
    }

    fn insert_char(&mut self, value: &str, c: char) -> String {
        let mut new_value = String::with_capacity(value.len() + c.len_utf8());
        new_value.push_str(&value[..self.cursor]);
        new_value.push(c);
        new_value.push_str(&value[self.cursor..]);
        self.cursor += c.len_utf8();
        new_value
    }

    fn delete_char_before(&mut self, value: &str) -> Option<String> {
        if self.cursor == 0 {
            return None;
        }
        let char_start = value[..self.cursor]
            .char_indices()
            .last()
            .map(|(i, _)| i)
            .unwrap_or(0);
        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..char_start]);
        new_value.push_str(&value[self.cursor..]);
        self.cursor = char_start;
        Some(new_value)
    }

    fn delete_char_at(&self, value: &str) -> Option<String> {
        if self.cursor >= value.len() {
            return None;
        }
        let mut new_value = String::with_capacity(value.len());
        new_value.push_str(&value[..self.cursor]);
        if let Some((_, c)) = value[self.cursor..].char_indices().next() {
            new_value.push_str(&value[self.cursor + c.len_utf8()..]);
        }
        Some(new_value)
    }

    fn handle_key<A>(
        &mut self,
        key: &crossterm::event::KeyEvent,
        props: &AutoSelectProps<'_, A>,
    ) -> Option<A> {
        self.clamp_cursor(props.input_value);

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return match key.code {
                // Ctrl+A: move to start
                KeyCode::Char('a') => {
                    self.cursor = 0;
                    None
                }
                // Ctrl+E: move to end
                KeyCode::Char('e') => {
                    self.cursor = props.input_value.len();
                    None
                }
                // Ctrl+U: clear line
                KeyCode::Char('u') => {
                    self.cursor = 0;
                    Some((props.on_edit)(String::new()))
                }
                _ => None,
            };
        }

        match key.code {
            KeyCode::Char(c) => {
                let new_value = self.insert_char(props.input_value, c);
                Some((props.on_edit)(new_value))
            }
            KeyCode::Backspace => self
                .delete_char_before(props.input_value)
                .map(|v| (props.on_edit)(v)),
            KeyCode::Delete => self
                .delete_char_at(props.input_value)
                .map(|v| (props.on_edit)(v)),
            KeyCode::Left => {
                self.move_cursor_left(props.input_value);
                None
            }
            KeyCode::Right => {
                self.move_cursor_right(props.input_value);
                None
            }
            KeyCode::Home => {
                self.cursor = 0;
                None
            }
            KeyCode::End => {
                self.cursor = props.input_value.len();
                None
            }
            KeyCode::Esc => Some((props.on_blur)()),
            _ => None,
        }
    }

    fn handle_mouse<A>(
        &mut self,
        mouse: &crossterm::event::MouseEvent,
        props: &AutoSelectProps<'_, A>,
    ) -> Option<A> {
        if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
            return None;
        }
        let (x, y) = (mouse.column, mouse.row);

        if contains(self.input_area, x, y) {
            return Some((props.on_focus)());
        }

        if props.is_open && contains(self.dropdown_inner, x, y) {
            let index = (y - self.dropdown_inner.y) as usize;
            if index < self.visible_len && !props.loading {
                return Some((props.on_activate)(index));
            }
            // Click on the loading/error row or below the last option.
            return None;
        }

        if props.is_focused {
            return Some((props.on_blur)());
        }
        None
    }
}

fn contains(area: Rect, x: u16, y: u16) -> bool {
    x >= area.x
        && x < area.x.saturating_add(area.width)
        && y >= area.y
        && y < area.y.saturating_add(area.height)
}

impl<A> Component<A> for AutoSelect {
    type Props<'a> = AutoSelectProps<'a, A>;

    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        match event {
            EventKind::Key(key) if props.is_focused => self.handle_key(key, &props),
            EventKind::Mouse(mouse) => self.handle_mouse(mouse, &props),
            _ => None,
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>) {
        self.clamp_cursor(props.input_value);

        // ----- input row -----
        let input_area = Rect {
            x: area.x,
            y: area.y,
            width: area.width,
            height: 3.min(area.height),
        };
        self.input_area = input_area;

        let display_text = if props.input_value.is_empty() {
            props.placeholder
        } else {
            props.input_value
        };
        let style = if props.input_value.is_empty() {
            Style::default().fg(Color::DarkGray)
        } else {
            Style::default()
        };
        let input = Paragraph::new(display_text).style(style).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(if props.is_focused {
                    Style::default().fg(Color::Cyan)
                } else {
                    Style::default().fg(Color::DarkGray)
                }),
        );
        frame.render_widget(input, input_area);

        if props.is_focused && input_area.height >= 3 {
            let cursor_x = input_area.x + 1 + self.cursor as u16;
            if cursor_x < input_area.x + input_area.width.saturating_sub(1) {
                frame.set_cursor_position((cursor_x, input_area.y + 1));
            }
        }

        // ----- dropdown -----
        self.dropdown_inner = Rect::default();
        self.visible_len = 0;

        if !props.is_open || area.height <= input_area.height {
            return;
        }

        let rows = if props.loading || props.error.is_some() {
            1
        } else {
            props.visible_labels.len()
        };
        let remaining = area.height - input_area.height;
        let dropdown_height = ((rows as u16).saturating_add(2)).min(remaining);
        if dropdown_height < 2 {
            return;
        }
        let dropdown_area = Rect {
            x: area.x,
            y: area.y + input_area.height,
            width: area.width,
            height: dropdown_height,
        };

        let items: Vec<ListItem> = if props.loading {
            let spinner = SPINNER[props.tick as usize % SPINNER.len()];
            vec![
                ListItem::new(Line::raw(format!("{} loading...", spinner)))
                    .style(Style::default().fg(Color::DarkGray)),
            ]
        } else if let Some(error) = props.error {
            vec![ListItem::new(Line::raw(error.to_string())).style(Style::default().fg(Color::Red))]
        } else {
            props
                .visible_labels
                .iter()
                .map(|label| ListItem::new(Line::raw(label.as_str())))
                .collect()
        };

        let list = List::new(items).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::default().fg(Color::DarkGray)),
        );
        frame.render_widget(list, dropdown_area);

        self.dropdown_inner = Rect {
            x: dropdown_area.x + 1,
            y: dropdown_area.y + 1,
            width: dropdown_area.width.saturating_sub(2),
            height: dropdown_area.height.saturating_sub(2),
        };
        self.visible_len = if props.loading || props.error.is_some() {
            0
        } else {
            props
                .visible_labels
                .len()
                .min(self.dropdown_inner.height as usize)
        };
    }
}
