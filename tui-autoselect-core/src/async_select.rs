//! Async-options variant of the select controller
//!
//! Same state machine as [`SelectController`], except the candidate list is
//! produced by an external loader instead of being fixed at construction.
//! The controller never runs the loader itself: fetch-triggering transitions
//! return a [`LoadRequest`] describing the fetch, and the host reports back
//! through [`AsyncSelectController::resolve`]. Staleness is handled with a
//! monotonically increasing generation counter: a result is applied only if
//! no newer request has started since it was issued.

use tracing::debug;

use crate::select::{SelectConfig, SelectController};

/// A fetch the host should execute: call the loader with `query` and report
/// the outcome back tagged with `generation`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadRequest {
    /// Generation this request belongs to; echo it back on completion.
    pub generation: u64,
    /// Text value at the time the fetch was triggered.
    pub query: String,
}

/// Configuration for [`AsyncSelectController`].
///
/// Identical to [`SelectConfig`] minus the candidate list, which the loader
/// supplies.
pub struct AsyncSelectConfig<T>(SelectConfig<T>);

impl<T> AsyncSelectConfig<T> {
    /// Create a configuration from a label extractor.
    pub fn new(label_of: impl Fn(&T) -> String + Send + 'static) -> Self {
        Self(SelectConfig::new(Vec::new(), label_of))
    }

    /// Pre-committed selection; also seeds the text value with its label.
    pub fn default_value(self, value: T) -> Self {
        Self(self.0.default_value(value))
    }

    /// Explicit initial text value.
    pub fn initial_input(self, text: impl Into<String>) -> Self {
        Self(self.0.initial_input(text))
    }

    /// Callback fired whenever the text value actually changes.
    pub fn on_input_change(self, f: impl FnMut(&str) + Send + 'static) -> Self {
        Self(self.0.on_input_change(f))
    }

    /// Callback fired whenever the committed selection actually changes.
    pub fn on_change(self, f: impl FnMut(Option<&T>) + Send + 'static) -> Self {
        Self(self.0.on_change(f))
    }

    /// Local filter applied on top of whatever the loader returned.
    pub fn filter(self, f: impl Fn(&T, &str) -> bool + Send + 'static) -> Self {
        Self(self.0.filter(f))
    }
}

/// Select controller whose options come from an asynchronous loader.
///
/// Wraps [`SelectController`] with an empty candidate list and three extra
/// pieces of state: the active fetch generation, a `loading` flag, and the
/// last loader error. Entering the open state or editing the text while open
/// starts a new generation; closing invalidates the in-flight one.
pub struct AsyncSelectController<T> {
    inner: SelectController<T>,
    generation: u64,
    loading: bool,
    error: Option<String>,
}

impl<T: Clone + PartialEq> AsyncSelectController<T> {
    /// Create a controller. Starts closed with no options loaded.
    pub fn new(config: AsyncSelectConfig<T>) -> Self {
        Self {
            inner: SelectController::new(config.0),
            generation: 0,
            loading: false,
            error: None,
        }
    }

    /// Focus gained. Opens, and starts a fetch if the control was closed.
    #[must_use]
    pub fn focus(&mut self) -> Option<LoadRequest> {
        let was_open = self.inner.is_open();
        self.inner.focus();
        (!was_open).then(|| self.begin_load())
    }

    /// Mouse-down on the text field. Starts a fetch if this opened it.
    #[must_use]
    pub fn input_pressed(&mut self) -> Option<LoadRequest> {
        let was_open = self.inner.is_open();
        self.inner.input_pressed();
        (!was_open).then(|| self.begin_load())
    }

    /// Text edited. Starts a fetch when the text changed or the control just
    /// opened; re-editing identical text while open triggers nothing.
    #[must_use]
    pub fn input_edited(&mut self, new_text: &str) -> Option<LoadRequest> {
        let was_open = self.inner.is_open();
        let changed = self.inner.input_value() != new_text;
        self.inner.input_edited(new_text);
        (changed || !was_open).then(|| self.begin_load())
    }

    /// Focus lost. Closes and invalidates any in-flight fetch.
    pub fn blur(&mut self) {
        self.inner.blur();
        self.invalidate();
    }

    /// Commit the visible option at `index`. Closes and invalidates any
    /// in-flight fetch.
    pub fn activate(&mut self, index: usize) {
        self.inner.activate(index);
        self.invalidate();
    }

    /// Click on the widget container: request input focus from the host UI.
    pub fn container_clicked(&mut self) {
        self.inner.container_clicked();
    }

    /// Consume a pending focus request, if any.
    pub fn take_focus_request(&mut self) -> bool {
        self.inner.take_focus_request()
    }

    /// Report a successful load for `generation`.
    ///
    /// Applied only when `generation` is still the active one and the fetch
    /// is still outstanding; stale and superseded results are discarded.
    /// Returns whether the result was applied. At most one result is ever
    /// applied per generation.
    pub fn resolve(&mut self, generation: u64, options: Vec<T>) -> bool {
        if generation != self.generation || !self.loading {
            debug!(
                generation,
                current = self.generation,
                "discarding stale load result"
            );
            return false;
        }
        self.inner.replace_options(options);
        self.loading = false;
        true
    }

    /// Report a failed load for `generation`, under the same staleness rule
    /// as [`resolve`](Self::resolve).
    pub fn resolve_err(&mut self, generation: u64, message: impl Into<String>) -> bool {
        if generation != self.generation || !self.loading {
            debug!(
                generation,
                current = self.generation,
                "discarding stale load error"
            );
            return false;
        }
        self.error = Some(message.into());
        self.loading = false;
        true
    }

    /// Whether a fetch is outstanding for the active generation.
    pub fn loading(&self) -> bool {
        self.loading
    }

    /// Last loader error, cleared when a new fetch starts.
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Current text value.
    pub fn input_value(&self) -> &str {
        self.inner.input_value()
    }

    /// Current committed selection.
    pub fn value(&self) -> Option<&T> {
        self.inner.value()
    }

    /// Whether the dropdown is open.
    pub fn is_open(&self) -> bool {
        self.inner.is_open()
    }

    /// Currently visible options (empty while closed or before first load).
    pub fn visible_options(&self) -> Vec<&T> {
        self.inner.visible_options()
    }

    /// Display labels of the currently visible options.
    pub fn visible_labels(&self) -> Vec<String> {
        self.inner.visible_labels()
    }

    fn begin_load(&mut self) -> LoadRequest {
        self.generation += 1;
        self.loading = true;
        self.error = None;
        LoadRequest {
            generation: self.generation,
            query: self.inner.input_value().to_string(),
        }
    }

    // Closed state holds no live fetch; anything in flight becomes stale.
    fn invalidate(&mut self) {
        if self.loading {
            self.generation += 1;
            self.loading = false;
        }
    }
}
