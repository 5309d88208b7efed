//! Ratatui presentation layer for tui-autoselect
//!
//! Binds the controller state machines from `tui-autoselect-core` to
//! terminal UI. The [`AutoSelect`] widget renders a controller snapshot and
//! turns key/mouse events into actions for the host's event loop to apply
//! back onto the controller.
//!
//! # Example
//!
//! ```ignore
//! use tui_autoselect_components::{AutoSelect, AutoSelectProps, Component};
//!
//! let mut widget = AutoSelect::new();
//! widget.render(frame, area, AutoSelectProps {
//!     input_value: select.input_value(),
//!     placeholder: "Pick a color...",
//!     is_focused: state.focused,
//!     is_open: select.is_open(),
//!     loading: false,
//!     error: None,
//!     visible_labels: &labels,
//!     tick: 0,
//!     on_edit: Action::Edit,
//!     on_focus: || Action::Focus,
//!     on_blur: || Action::Blur,
//!     on_activate: Action::Activate,
//! });
//! ```

pub mod auto_select;
pub mod component;
pub mod event;
pub mod testing;

pub use auto_select::{AutoSelect, AutoSelectProps};
pub use component::Component;
pub use event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};

// Re-export ratatui types for convenience
pub use ratatui::{
    layout::Rect,
    style::{Color, Modifier, Style},
    text::{Line, Span, Text},
    Frame,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::auto_select::{AutoSelect, AutoSelectProps};
    pub use crate::component::Component;
    pub use crate::event::{process_raw_event, spawn_event_poller, EventKind, RawEvent};
    pub use ratatui::{
        layout::Rect,
        style::{Color, Modifier, Style},
        text::{Line, Span, Text},
        Frame,
    };
}
