//! Palette - synchronous AutoSelect demo
//!
//! A select over a static list of color names with a case-insensitive
//! substring filter:
//! - Click the input to open, click an option to commit it
//! - Type to filter, Esc to close
//! - Ctrl+Q to quit

use std::io;
use std::time::Duration;

use crossterm::{
    event::{DisableMouseCapture, EnableMouseCapture, KeyCode, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Flex, Layout},
    style::{Color, Style},
    widgets::Paragraph,
    Terminal,
};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tui_autoselect::{
    contains_ignore_case, process_raw_event, spawn_event_poller, AutoSelect, AutoSelectProps,
    Component, EventKind, RawEvent, SelectConfig, SelectController,
};

const COLORS: &[&str] = &[
    "Red", "Green", "Blue", "Cyan", "Magenta", "Yellow", "Orange", "Purple", "Teal", "Crimson",
];

// ============================================================================
// State - What the app knows
// ============================================================================

struct App {
    select: SelectController<String>,
    focused: bool,
}

impl App {
    fn new() -> Self {
        Self {
            select: SelectController::new(
                SelectConfig::new(
                    COLORS.iter().map(|c| c.to_string()).collect(),
                    |c: &String| c.clone(),
                )
                .filter(|c, q| contains_ignore_case(c, q)),
            ),
            focused: false,
        }
    }
}

// ============================================================================
// Actions - What can happen
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Edit(String),
    Focus,
    Blur,
    Activate(usize),
    Quit,
}

/// Apply an action to the app. Returns true if a re-render is needed.
fn apply(app: &mut App, action: Action) -> bool {
    match action {
        Action::Edit(text) => {
            app.select.input_edited(&text);
            true
        }
        Action::Focus => {
            app.focused = true;
            app.select.focus();
            true
        }
        Action::Blur => {
            app.focused = false;
            app.select.blur();
            true
        }
        Action::Activate(index) => {
            app.select.activate(index);
            true
        }
        Action::Quit => false, // handled in main loop
    }
}

fn props<'a>(app: &'a App, labels: &'a [String]) -> AutoSelectProps<'a, Action> {
    AutoSelectProps {
        input_value: app.select.input_value(),
        placeholder: "Pick a color...",
        is_focused: app.focused,
        is_open: app.select.is_open(),
        loading: false,
        error: None,
        visible_labels: labels,
        tick: 0,
        on_edit: Action::Edit,
        on_focus: || Action::Focus,
        on_blur: || Action::Blur,
        on_activate: Action::Activate,
    }
}

// ============================================================================
// Main - Setup terminal, run event loop, cleanup
// ============================================================================

#[tokio::main]
async fn main() -> io::Result<()> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>) -> io::Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();

    let mut app = App::new();
    let mut widget = AutoSelect::new();

    let (event_tx, mut event_rx) = mpsc::unbounded_channel::<RawEvent>();
    let cancel_token = CancellationToken::new();
    let _handle = spawn_event_poller(
        event_tx,
        Duration::from_millis(10),
        Duration::from_millis(16),
        cancel_token.clone(),
    );

    let mut should_render = true;

    loop {
        if should_render {
            terminal.draw(|frame| {
                let area = frame.area();

                let [_, column, _] = Layout::horizontal([
                    Constraint::Fill(1),
                    Constraint::Length(36),
                    Constraint::Fill(1),
                ])
                .flex(Flex::Center)
                .areas(area);
                let [_, widget_area, status_area, help_area] = Layout::vertical([
                    Constraint::Length(2),
                    Constraint::Fill(1),
                    Constraint::Length(1),
                    Constraint::Length(1),
                ])
                .areas(column);

                let labels = app.select.visible_labels();
                widget.render(frame, widget_area, props(&app, &labels));

                let status = match app.select.value() {
                    Some(color) => format!("Selected: {}", color),
                    None => "Selected: (none)".to_string(),
                };
                frame.render_widget(
                    Paragraph::new(status).style(Style::default().fg(Color::Green)),
                    status_area,
                );
                frame.render_widget(
                    Paragraph::new("click to open, type to filter, ctrl+q quits")
                        .style(Style::default().fg(Color::DarkGray)),
                    help_area,
                );
            })?;
            should_render = false;
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                let event = process_raw_event(raw_event);

                // Global quit, before the widget sees the key.
                if let EventKind::Key(key) = &event {
                    let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
                    if (ctrl && matches!(key.code, KeyCode::Char('q') | KeyCode::Char('c')))
                        || (!app.focused && key.code == KeyCode::Char('q'))
                    {
                        let _ = action_tx.send(Action::Quit);
                        continue;
                    }
                }

                if matches!(event, EventKind::Resize(_, _)) {
                    should_render = true;
                    continue;
                }

                let labels = app.select.visible_labels();
                for action in widget.handle_event(&event, props(&app, &labels)) {
                    let _ = action_tx.send(action);
                }
            }

            Some(action) = action_rx.recv() => {
                if matches!(action, Action::Quit) {
                    break;
                }
                should_render = apply(&mut app, action);
            }
        }
    }

    cancel_token.cancel();
    Ok(())
}
