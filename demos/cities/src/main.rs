//! Cities - asynchronous AutoSelect demo
//!
//! The option list comes from a simulated backend: a static city list
//! filtered server-side after an artificial delay. Opening the control or
//! editing the text starts a fetch; a spinner runs while it is in flight,
//! and stale responses from superseded fetches are discarded.
//!
//! ```sh
//! cargo run -p cities-demo
//! cargo run -p cities-demo -- --delay-ms 2500
//! ```

use std::io;
use std::time::Duration;

use clap::Parser;
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
    contains_ignore_case, process_raw_event, spawn_event_poller, AsyncSelectConfig,
    AsyncSelectController, AutoSelect, AutoSelectProps, Component, EventKind, Fetcher,
    LoadRequest, RawEvent,
};

const CITIES: &[&str] = &[
    "Amsterdam", "Athens", "Barcelona", "Berlin", "Budapest", "Copenhagen", "Dublin", "Helsinki",
    "Kyiv", "Kyoto", "Lisbon", "London", "Madrid", "Oslo", "Paris", "Prague", "Reykjavik", "Rome",
    "Seoul", "Stockholm", "Tokyo", "Vienna", "Warsaw", "Zagreb", "Zurich",
];

/// Simulated backend: filter the city list after an artificial delay.
async fn load_cities(query: String, delay: Duration) -> Result<Vec<String>, String> {
    tokio::time::sleep(delay).await;
    Ok(CITIES
        .iter()
        .filter(|city| contains_ignore_case(city, &query))
        .map(|city| city.to_string())
        .collect())
}

struct App {
    select: AsyncSelectController<String>,
    focused: bool,
    tick: u32,
}

impl App {
    fn new() -> Self {
        Self {
            select: AsyncSelectController::new(AsyncSelectConfig::new(|c: &String| c.clone())),
            focused: false,
            tick: 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Edit(String),
    Focus,
    Blur,
    Activate(usize),
    Quit,
}

/// Apply an action. Returns (re-render needed, fetch to run).
fn apply(app: &mut App, action: Action) -> (bool, Option<LoadRequest>) {
    match action {
        Action::Edit(text) => (true, app.select.input_edited(&text)),
        Action::Focus => {
            app.focused = true;
            (true, app.select.focus())
        }
        Action::Blur => {
            app.focused = false;
            app.select.blur();
            (true, None)
        }
        Action::Activate(index) => {
            app.select.activate(index);
            (true, None)
        }
        Action::Quit => (false, None), // handled in main loop
    }
}

fn props<'a>(app: &'a App, labels: &'a [String]) -> AutoSelectProps<'a, Action> {
    AutoSelectProps {
        input_value: app.select.input_value(),
        placeholder: "Search cities...",
        is_focused: app.focused,
        is_open: app.select.is_open(),
        loading: app.select.loading(),
        error: app.select.error(),
        visible_labels: labels,
        tick: app.tick,
        on_edit: Action::Edit,
        on_focus: || Action::Focus,
        on_blur: || Action::Blur,
        on_activate: Action::Activate,
    }
}

/// Cities TUI - async autocomplete demo
#[derive(Parser, Debug)]
#[command(name = "cities")]
#[command(about = "An async autocomplete demo with a simulated slow backend")]
struct Args {
    /// Simulated backend latency in milliseconds
    #[arg(long, default_value = "1000")]
    delay_ms: u64,
}

#[tokio::main]
async fn main() -> io::Result<()> {
    let args = Args::parse();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run_app(&mut terminal, Duration::from_millis(args.delay_ms)).await;

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;

    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    delay: Duration,
) -> io::Result<()> {
    let (action_tx, mut action_rx) = mpsc::unbounded_channel::<Action>();
    let (mut fetcher, mut outcome_rx) = Fetcher::channel();

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

    // Spinner animation while a fetch is in flight.
    let mut tick_timer = tokio::time::interval(Duration::from_millis(100));

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
                    Some(city) => format!("Selected: {}", city),
                    None => "Selected: (none)".to_string(),
                };
                frame.render_widget(
                    Paragraph::new(status).style(Style::default().fg(Color::Green)),
                    status_area,
                );
                frame.render_widget(
                    Paragraph::new("click to open, type to search, ctrl+q quits")
                        .style(Style::default().fg(Color::DarkGray)),
                    help_area,
                );
            })?;
            should_render = false;
        }

        tokio::select! {
            Some(raw_event) = event_rx.recv() => {
                let event = process_raw_event(raw_event);

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
                let (changed, request) = apply(&mut app, action);
                if let Some(request) = request {
                    let query = request.query.clone();
                    fetcher.spawn(&request, load_cities(query, delay));
                }
                should_render = changed;
            }

            Some(outcome) = outcome_rx.recv() => {
                let applied = match outcome.result {
                    Ok(options) => app.select.resolve(outcome.generation, options),
                    Err(e) => app.select.resolve_err(outcome.generation, e),
                };
                should_render = applied;
            }

            _ = tick_timer.tick() => {
                if app.select.loading() {
                    app.tick = app.tick.wrapping_add(1);
                    should_render = true;
                }
            }
        }
    }

    cancel_token.cancel();
    Ok(())
}
