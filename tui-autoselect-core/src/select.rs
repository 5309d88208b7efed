//! Synchronous autocomplete/select controller

use tracing::debug;

/// Extracts the display label for an option.
pub type LabelFn<T> = Box<dyn Fn(&T) -> String + Send>;

/// Invoked when the text value changes (after the equality guard).
pub type InputChangeFn = Box<dyn FnMut(&str) + Send>;

/// Invoked when the committed selection changes (after the equality guard).
pub type ChangeFn<T> = Box<dyn FnMut(Option<&T>) + Send>;

/// Decides whether an option stays visible for the current text.
pub type FilterFn<T> = Box<dyn Fn(&T, &str) -> bool + Send>;

/// Case-insensitive substring match, the usual autocomplete filter.
///
/// Provided as a convenience for `SelectConfig::filter`; any
/// `Fn(&T, &str) -> bool` works.
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Construction-time configuration for [`SelectController`].
///
/// Only the candidate list and the label extractor are required:
///
/// ```
/// use tui_autoselect_core::{contains_ignore_case, SelectConfig, SelectController};
///
/// let config = SelectConfig::new(vec!["Red".to_string(), "Green".to_string()], |c: &String| c.clone())
///     .filter(|c, q| contains_ignore_case(c, q));
/// let controller = SelectController::new(config);
/// assert!(!controller.is_open());
/// ```
pub struct SelectConfig<T> {
    options: Vec<T>,
    label_of: LabelFn<T>,
    default_value: Option<T>,
    initial_input: Option<String>,
    on_input_change: Option<InputChangeFn>,
    on_change: Option<ChangeFn<T>>,
    filter: Option<FilterFn<T>>,
}

impl<T> SelectConfig<T> {
    /// Create a configuration from the candidate options and a label extractor.
    pub fn new(options: Vec<T>, label_of: impl Fn(&T) -> String + Send + 'static) -> Self {
        Self {
            options,
            label_of: Box::new(label_of),
            default_value: None,
            initial_input: None,
            on_input_change: None,
            on_change: None,
            filter: None,
        }
    }

    /// Pre-committed selection; also seeds the text value with its label.
    pub fn default_value(mut self, value: T) -> Self {
        self.default_value = Some(value);
        self
    }

    /// Explicit initial text value, overriding the default selection's label.
    pub fn initial_input(mut self, text: impl Into<String>) -> Self {
        self.initial_input = Some(text.into());
        self
    }

    /// Callback fired whenever the text value actually changes.
    pub fn on_input_change(mut self, f: impl FnMut(&str) + Send + 'static) -> Self {
        self.on_input_change = Some(Box::new(f));
        self
    }

    /// Callback fired whenever the committed selection actually changes.
    pub fn on_change(mut self, f: impl FnMut(Option<&T>) + Send + 'static) -> Self {
        self.on_change = Some(Box::new(f));
        self
    }

    /// Filter predicate applied to each candidate against the current text.
    ///
    /// Without one, all candidates are shown while open regardless of text.
    pub fn filter(mut self, f: impl Fn(&T, &str) -> bool + Send + 'static) -> Self {
        self.filter = Some(Box::new(f));
        self
    }
}

/// Pure visible-set computation: indices into `candidates`.
///
/// Empty while closed; while open, the candidates passing the filter for the
/// current text, in candidate order. This is the single source of truth for
/// what a dropdown renders: callers and [`SelectController::activate`] agree
/// on indices because both derive them from the same state.
pub fn compute_visible<T>(
    candidates: &[T],
    text: &str,
    open: bool,
    filter: Option<&(dyn Fn(&T, &str) -> bool + Send)>,
) -> Vec<usize> {
    if !open {
        return Vec::new();
    }
    match filter {
        Some(f) => candidates
            .iter()
            .enumerate()
            .filter(|(_, c)| f(c, text))
            .map(|(i, _)| i)
            .collect(),
        None => (0..candidates.len()).collect(),
    }
}

/// Stateful controller for an autocomplete input.
///
/// Owns the text value, the committed selection, and the open/closed flag.
/// All mutation goes through the handler methods; the visible option set is
/// derived on demand via [`compute_visible`], never stored. Writing an
/// unchanged text or selection is a no-op and fires no callback.
pub struct SelectController<T> {
    config: SelectConfig<T>,
    input_value: String,
    value: Option<T>,
    open: bool,
    focus_requested: bool,
}

impl<T: Clone + PartialEq> SelectController<T> {
    /// Create a controller. Starts closed, with the default selection (if
    /// any) committed and its label in the text field.
    pub fn new(config: SelectConfig<T>) -> Self {
        let value = config.default_value.clone();
        let input_value = config
            .initial_input
            .clone()
            .or_else(|| value.as_ref().map(|v| (config.label_of)(v)))
            .unwrap_or_default();
        Self {
            config,
            input_value,
            value,
            open: false,
            focus_requested: false,
        }
    }

    /// The user edited the text field.
    ///
    /// Updates the text value, clears the selection when the text becomes
    /// empty, and opens the dropdown if it was closed.
    pub fn input_edited(&mut self, new_text: &str) {
        if self.input_value != new_text {
            self.input_value = new_text.to_string();
            if let Some(cb) = self.config.on_input_change.as_mut() {
                cb(new_text);
            }
        }

        // Selection is cleared before any visible-set recomputation.
        if new_text.is_empty() {
            self.set_value(None);
        }

        if !self.open {
            self.open = true;
        }
    }

    /// The text field gained focus: open the dropdown.
    pub fn focus(&mut self) {
        self.open = true;
    }

    /// Mouse-down on the text field: open if closed.
    pub fn input_pressed(&mut self) {
        if !self.open {
            self.open = true;
        }
    }

    /// The text field lost focus.
    ///
    /// Resynchronizes the text to the committed selection's label (empty if
    /// none) and closes the dropdown.
    pub fn blur(&mut self) {
        self.sync_input_to_value();
        self.open = false;
    }

    /// Commit the option at `index` in the currently visible list.
    ///
    /// Sets the selection, resynchronizes the text to its label, and closes.
    /// The caller only activates indices it rendered; an out-of-range index
    /// is ignored with a debug log.
    pub fn activate(&mut self, index: usize) {
        let visible = self.visible_indices();
        let Some(&candidate) = visible.get(index) else {
            debug!(index, visible = visible.len(), "activate index out of range");
            return;
        };
        let option = self.config.options[candidate].clone();
        self.set_value(Some(option));
        self.sync_input_to_value();
        self.open = false;
    }

    /// Click on the widget container: request input focus from the host UI.
    ///
    /// No other state change. The host consumes the request with
    /// [`take_focus_request`](Self::take_focus_request).
    pub fn container_clicked(&mut self) {
        self.focus_requested = true;
    }

    /// Consume a pending focus request, if any.
    pub fn take_focus_request(&mut self) -> bool {
        std::mem::take(&mut self.focus_requested)
    }

    /// Swap the candidate list. The visible set is derived, so it follows.
    pub fn replace_options(&mut self, options: Vec<T>) {
        self.config.options = options;
    }

    /// Current text value.
    pub fn input_value(&self) -> &str {
        &self.input_value
    }

    /// Current committed selection.
    pub fn value(&self) -> Option<&T> {
        self.value.as_ref()
    }

    /// Whether the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Indices of currently visible options, into the candidate list.
    pub fn visible_indices(&self) -> Vec<usize> {
        compute_visible(
            &self.config.options,
            &self.input_value,
            self.open,
            self.config.filter.as_deref(),
        )
    }

    /// Currently visible options.
    pub fn visible_options(&self) -> Vec<&T> {
        self.visible_indices()
            .into_iter()
            .map(|i| &self.config.options[i])
            .collect()
    }

    /// Display labels of the currently visible options, in order.
    pub fn visible_labels(&self) -> Vec<String> {
        self.visible_options()
            .into_iter()
            .map(|o| (self.config.label_of)(o))
            .collect()
    }

    /// Display label of an option, via the configured extractor.
    pub fn label_of(&self, option: &T) -> String {
        (self.config.label_of)(option)
    }

    fn sync_input_to_value(&mut self) {
        let text = self
            .value
            .as_ref()
            .map(|v| (self.config.label_of)(v))
            .unwrap_or_default();
        if self.input_value != text {
            self.input_value = text.clone();
            if let Some(cb) = self.config.on_input_change.as_mut() {
                cb(&text);
            }
        }
    }

    fn set_value(&mut self, new_value: Option<T>) {
        if self.value == new_value {
            return;
        }
        if let Some(cb) = self.config.on_change.as_mut() {
            cb(new_value.as_ref());
        }
        self.value = new_value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    fn colors() -> Vec<String> {
        vec!["Red".into(), "Green".into(), "Blue".into()]
    }

    fn controller() -> SelectController<String> {
        SelectController::new(
            SelectConfig::new(colors(), |c: &String| c.clone())
                .filter(|c, q| contains_ignore_case(c, q)),
        )
    }

    #[test]
    fn starts_closed_with_empty_visible_set() {
        let ctl = controller();
        assert!(!ctl.is_open());
        assert_eq!(ctl.input_value(), "");
        assert!(ctl.value().is_none());
        assert!(ctl.visible_options().is_empty());
    }

    #[test]
    fn default_selection_seeds_input() {
        let ctl = SelectController::new(
            SelectConfig::new(colors(), |c: &String| c.clone()).default_value("Blue".to_string()),
        );
        assert_eq!(ctl.input_value(), "Blue");
        assert_eq!(ctl.value(), Some(&"Blue".to_string()));
        assert!(ctl.visible_options().is_empty());
    }

    #[test]
    fn initial_input_overrides_default_label() {
        let ctl = SelectController::new(
            SelectConfig::new(colors(), |c: &String| c.clone())
                .default_value("Blue".to_string())
                .initial_input("Bl"),
        );
        assert_eq!(ctl.input_value(), "Bl");
    }

    #[test]
    fn typing_re_filters_candidates() {
        let mut ctl = controller();
        ctl.focus();
        ctl.input_edited("re");
        // "green" contains "re" too; substring, not prefix
        assert_eq!(
            ctl.visible_labels(),
            vec!["Red".to_string(), "Green".to_string()]
        );
    }

    #[test]
    fn typing_blu_yields_exactly_blue() {
        let mut ctl = controller();
        ctl.focus();
        ctl.input_edited("blu");
        assert_eq!(ctl.visible_labels(), vec!["Blue".to_string()]);
    }

    #[test]
    fn open_without_filter_shows_all_regardless_of_text() {
        let mut ctl = SelectController::new(SelectConfig::new(colors(), |c: &String| c.clone()));
        ctl.focus();
        ctl.input_edited("zzz");
        assert_eq!(ctl.visible_options().len(), 3);
    }

    #[test]
    fn edit_tracks_text_verbatim_until_blur() {
        let mut ctl = controller();
        for text in ["r", "re", "reD", "re"] {
            ctl.input_edited(text);
            assert_eq!(ctl.input_value(), text);
        }
    }

    #[test]
    fn edit_opens_the_dropdown() {
        let mut ctl = controller();
        ctl.input_edited("r");
        assert!(ctl.is_open());
    }

    #[test]
    fn blur_resyncs_input_to_selected_label() {
        let mut ctl = controller();
        ctl.focus();
        ctl.input_edited("re");
        ctl.activate(0); // Red
        ctl.focus();
        ctl.input_edited("gibberish");
        ctl.blur();
        assert_eq!(ctl.input_value(), "Red");
        assert!(!ctl.is_open());
    }

    #[test]
    fn blur_without_selection_clears_text() {
        let mut ctl = controller();
        ctl.input_edited("gr");
        ctl.blur();
        assert_eq!(ctl.input_value(), "");
    }

    #[test]
    fn clearing_text_clears_selection() {
        let changes: Arc<Mutex<Vec<Option<String>>>> = Arc::new(Mutex::new(Vec::new()));
        let log = changes.clone();
        let mut ctl = SelectController::new(
            SelectConfig::new(colors(), |c: &String| c.clone())
                .default_value("Red".to_string())
                .on_change(move |v| log.lock().unwrap().push(v.cloned())),
        );

        ctl.input_edited("");
        assert!(ctl.value().is_none());
        assert_eq!(*changes.lock().unwrap(), vec![None]);
    }

    #[test]
    fn activation_commits_visible_option_and_closes() {
        let mut ctl = controller();
        ctl.focus();
        ctl.input_edited("e"); // Red, Green, Blue all contain "e"
        ctl.activate(1);
        assert_eq!(ctl.value(), Some(&"Green".to_string()));
        assert_eq!(ctl.input_value(), "Green");
        assert!(!ctl.is_open());
    }

    #[test]
    fn later_edit_does_not_change_committed_selection() {
        let mut ctl = controller();
        ctl.focus();
        ctl.input_edited("re");
        ctl.activate(0);
        ctl.input_edited("blu");
        assert_eq!(ctl.value(), Some(&"Red".to_string()));
    }

    #[test]
    fn out_of_range_activation_is_ignored() {
        let mut ctl = controller();
        ctl.focus();
        ctl.input_edited("re"); // visible = ["Red"]
        ctl.activate(5);
        assert!(ctl.value().is_none());
        assert!(ctl.is_open());
    }

    #[test]
    fn unchanged_text_fires_no_callback() {
        let edits = Arc::new(Mutex::new(0u32));
        let log = edits.clone();
        let mut ctl = SelectController::new(
            SelectConfig::new(colors(), |c: &String| c.clone())
                .on_input_change(move |_| *log.lock().unwrap() += 1),
        );

        ctl.input_edited("re");
        ctl.input_edited("re");
        assert_eq!(*edits.lock().unwrap(), 1);
    }

    #[test]
    fn reselecting_same_option_fires_no_callback() {
        let changes = Arc::new(Mutex::new(0u32));
        let log = changes.clone();
        let mut ctl = SelectController::new(
            SelectConfig::new(colors(), |c: &String| c.clone())
                .on_change(move |_| *log.lock().unwrap() += 1),
        );

        ctl.focus();
        ctl.activate(0);
        ctl.focus();
        ctl.activate(0); // Red again, still visible at index 0
        assert_eq!(*changes.lock().unwrap(), 1);
    }

    #[test]
    fn blur_after_activation_fires_no_text_callback() {
        let edits = Arc::new(Mutex::new(Vec::new()));
        let log = edits.clone();
        let mut ctl = SelectController::new(
            SelectConfig::new(colors(), |c: &String| c.clone())
                .on_input_change(move |t| log.lock().unwrap().push(t.to_string())),
        );

        ctl.focus();
        ctl.activate(2); // text becomes "Blue"
        ctl.blur(); // text already "Blue", no callback
        assert_eq!(*edits.lock().unwrap(), vec!["Blue".to_string()]);
    }

    #[test]
    fn container_click_requests_focus_once() {
        let mut ctl = controller();
        ctl.container_clicked();
        assert!(!ctl.is_open());
        assert!(ctl.take_focus_request());
        assert!(!ctl.take_focus_request());
    }

    #[test]
    fn compute_visible_is_empty_while_closed() {
        let candidates = colors();
        let visible = compute_visible(&candidates, "re", false, None);
        assert!(visible.is_empty());
    }

    #[test]
    fn replace_options_feeds_the_visible_set() {
        let mut ctl = controller();
        ctl.focus();
        ctl.replace_options(vec!["Crimson".into(), "Scarlet".into()]);
        assert_eq!(
            ctl.visible_labels(),
            vec!["Crimson".to_string(), "Scarlet".to_string()]
        );
    }
}
