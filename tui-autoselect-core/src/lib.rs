//! Core controller state machines for tui-autoselect
//!
//! This crate holds the rendering-free half of an autocomplete/select
//! widget: who owns the text value, when the dropdown is open, what the
//! committed selection is, and which options are currently visible.
//!
//! # Core Concepts
//!
//! - **[`SelectController`]**: synchronous controller over a fixed candidate
//!   list. UI events map to handler methods (`input_edited`, `focus`,
//!   `blur`, `activate`); the visible option set is a pure derivation of
//!   candidates, text, and the open flag.
//! - **[`AsyncSelectController`]**: same state machine, but the candidate
//!   list comes from an external loader. Fetch-triggering transitions
//!   return a [`LoadRequest`]; the host runs the loader and reports back.
//!   A generation counter discards stale, out-of-order results.
//! - **[`Fetcher`]**: tokio glue that runs loader futures and delivers
//!   [`FetchOutcome`]s over a channel.
//!
//! # Basic Example
//!
//! ```
//! use tui_autoselect_core::{contains_ignore_case, SelectConfig, SelectController};
//!
//! let mut select = SelectController::new(
//!     SelectConfig::new(
//!         vec!["Red".to_string(), "Green".to_string(), "Blue".to_string()],
//!         |c: &String| c.clone(),
//!     )
//!     .filter(|c, q| contains_ignore_case(c, q)),
//! );
//!
//! select.focus();
//! select.input_edited("blu");
//! assert_eq!(select.visible_labels(), vec!["Blue".to_string()]);
//!
//! select.activate(0);
//! assert_eq!(select.input_value(), "Blue");
//! assert!(!select.is_open());
//! ```
//!
//! # Async Pattern
//!
//! The async controller follows a two-phase pattern: handler methods return
//! the fetch to perform, the event loop performs it and feeds the outcome
//! back:
//!
//! ```ignore
//! if let Some(request) = select.input_edited(&text) {
//!     let query = request.query.clone();
//!     fetcher.spawn(&request, async move { load_cities(&query).await });
//! }
//!
//! // ... in the select! loop:
//! Some(outcome) = outcome_rx.recv() => {
//!     match outcome.result {
//!         Ok(options) => select.resolve(outcome.generation, options),
//!         Err(e) => select.resolve_err(outcome.generation, e),
//!     };
//! }
//! ```

pub mod async_select;
pub mod fetch;
pub mod select;

pub use async_select::{AsyncSelectConfig, AsyncSelectController, LoadRequest};
pub use fetch::{FetchOutcome, Fetcher};
pub use select::{
    compute_visible, contains_ignore_case, ChangeFn, FilterFn, InputChangeFn, LabelFn,
    SelectConfig, SelectController,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::async_select::{AsyncSelectConfig, AsyncSelectController, LoadRequest};
    pub use crate::fetch::{FetchOutcome, Fetcher};
    pub use crate::select::{
        compute_visible, contains_ignore_case, SelectConfig, SelectController,
    };
}
