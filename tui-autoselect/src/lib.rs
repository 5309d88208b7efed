//! tui-autoselect: autocomplete/select widgets for Rust TUI apps
//!
//! Two composable layers:
//!
//! - `tui-autoselect-core`: rendering-free controller state machines:
//!   [`SelectController`] over a fixed option list, and
//!   [`AsyncSelectController`] whose options come from an async loader with
//!   generation-based staleness protection.
//! - `tui-autoselect-components`: the ratatui [`AutoSelect`] widget binding
//!   a controller snapshot to the terminal, plus event plumbing and test
//!   utilities.
//!
//! # Example
//!
//! ```
//! use tui_autoselect::prelude::*;
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
//! select.activate(0);
//! assert_eq!(select.value(), Some(&"Blue".to_string()));
//! ```

// Controller layer
pub use tui_autoselect_core::{
    compute_visible, contains_ignore_case, AsyncSelectConfig, AsyncSelectController, ChangeFn,
    FetchOutcome, Fetcher, FilterFn, InputChangeFn, LabelFn, LoadRequest, SelectConfig,
    SelectController,
};

// Presentation layer
pub use tui_autoselect_components::{
    process_raw_event, spawn_event_poller, AutoSelect, AutoSelectProps, Component, EventKind,
    RawEvent,
};

// Test utilities
pub use tui_autoselect_components::testing;

// Re-export ratatui types for convenience
pub use tui_autoselect_components::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};

/// Prelude for convenient imports
pub mod prelude {
    pub use tui_autoselect_components::{
        process_raw_event, spawn_event_poller, AutoSelect, AutoSelectProps, Component, EventKind,
        RawEvent,
    };
    pub use tui_autoselect_core::{
        compute_visible, contains_ignore_case, AsyncSelectConfig, AsyncSelectController,
        FetchOutcome, Fetcher, LoadRequest, SelectConfig, SelectController,
    };

    pub use tui_autoselect_components::{Color, Frame, Line, Modifier, Rect, Span, Style, Text};
}
