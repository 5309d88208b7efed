//! End-to-end sync flow: widget events -> actions -> controller

use tui_autoselect::testing::{click, key, RenderHarness};
use tui_autoselect::{
    contains_ignore_case, AutoSelect, AutoSelectProps, Component, EventKind, SelectConfig,
    SelectController,
};

#[derive(Debug, Clone, PartialEq)]
enum Action {
    Edit(String),
    Focus,
    Blur,
    Activate(usize),
}

struct App {
    select: SelectController<String>,
    focused: bool,
}

impl App {
    fn new() -> Self {
        Self {
            select: SelectController::new(
                SelectConfig::new(
                    vec!["Red".to_string(), "Green".to_string(), "Blue".to_string()],
                    |c: &String| c.clone(),
                )
                .filter(|c, q| contains_ignore_case(c, q)),
            ),
            focused: false,
        }
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::Edit(text) => self.select.input_edited(&text),
            Action::Focus => {
                self.focused = true;
                self.select.focus();
            }
            Action::Blur => {
                self.focused = false;
                self.select.blur();
            }
            Action::Activate(index) => self.select.activate(index),
        }
    }
}

/// One render + one event, the way the demo loop drives the widget.
fn step(harness: &mut RenderHarness, widget: &mut AutoSelect, app: &mut App, event: EventKind) {
    let labels = app.select.visible_labels();
    harness.render(|frame| {
        widget.render(frame, frame.area(), props(app, &labels));
    });
    let labels = app.select.visible_labels();
    let actions: Vec<Action> = widget
        .handle_event(&event, props(app, &labels))
        .into_iter()
        .collect();
    for action in actions {
        app.apply(action);
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

#[test]
fn click_type_click_commits_a_selection() {
    let mut harness = RenderHarness::new(40, 15);
    let mut widget = AutoSelect::new();
    let mut app = App::new();

    // Click into the input: focus + open, all options visible.
    step(&mut harness, &mut widget, &mut app, EventKind::Mouse(click(5, 1)));
    assert!(app.focused);
    assert!(app.select.is_open());
    assert_eq!(app.select.visible_options().len(), 3);

    // Type "re": Red and Green remain.
    step(&mut harness, &mut widget, &mut app, EventKind::Key(key("r")));
    step(&mut harness, &mut widget, &mut app, EventKind::Key(key("e")));
    assert_eq!(app.select.input_value(), "re");
    assert_eq!(
        app.select.visible_labels(),
        vec!["Red".to_string(), "Green".to_string()]
    );

    // Click the first dropdown row (row 4 = first inner row).
    step(&mut harness, &mut widget, &mut app, EventKind::Mouse(click(5, 4)));
    assert_eq!(app.select.value(), Some(&"Red".to_string()));
    assert_eq!(app.select.input_value(), "Red");
    assert!(!app.select.is_open());
}

#[test]
fn esc_blurs_and_restores_committed_label() {
    let mut harness = RenderHarness::new(40, 15);
    let mut widget = AutoSelect::new();
    let mut app = App::new();

    step(&mut harness, &mut widget, &mut app, EventKind::Mouse(click(5, 1)));
    step(&mut harness, &mut widget, &mut app, EventKind::Key(key("b")));
    step(&mut harness, &mut widget, &mut app, EventKind::Mouse(click(5, 4))); // Blue
    assert_eq!(app.select.value(), Some(&"Blue".to_string()));

    // Reopen, scribble, then Esc: text snaps back to the committed label.
    step(&mut harness, &mut widget, &mut app, EventKind::Mouse(click(5, 1)));
    step(&mut harness, &mut widget, &mut app, EventKind::Key(key("x")));
    step(&mut harness, &mut widget, &mut app, EventKind::Key(key("esc")));
    assert_eq!(app.select.input_value(), "Blue");
    assert_eq!(app.select.value(), Some(&"Blue".to_string()));
    assert!(!app.focused);
}

#[test]
fn clearing_the_text_clears_the_selection() {
    let mut harness = RenderHarness::new(40, 15);
    let mut widget = AutoSelect::new();
    let mut app = App::new();

    step(&mut harness, &mut widget, &mut app, EventKind::Mouse(click(5, 1)));
    step(&mut harness, &mut widget, &mut app, EventKind::Key(key("r")));
    step(&mut harness, &mut widget, &mut app, EventKind::Mouse(click(5, 4))); // Red
    assert_eq!(app.select.value(), Some(&"Red".to_string()));

    // Ctrl+U clears the line; the committed selection goes with it.
    step(&mut harness, &mut widget, &mut app, EventKind::Mouse(click(5, 1)));
    step(&mut harness, &mut widget, &mut app, EventKind::Key(key("ctrl+u")));
    assert_eq!(app.select.input_value(), "");
    assert!(app.select.value().is_none());
}

#[test]
fn rendered_dropdown_matches_controller_state() {
    let mut harness = RenderHarness::new(40, 15);
    let mut widget = AutoSelect::new();
    let mut app = App::new();

    app.apply(Action::Focus);
    app.apply(Action::Edit("blu".to_string()));

    let labels = app.select.visible_labels();
    let output = harness.render_to_string_plain(|frame| {
        widget.render(frame, frame.area(), props(&app, &labels));
    });

    assert!(output.contains("blu"));
    assert!(output.contains("Blue"));
    assert!(!output.contains("Red"));
}
