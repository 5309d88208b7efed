//! Component trait for pure UI elements

use ratatui::{layout::Rect, Frame};

use crate::event::EventKind;

/// A UI element that renders from props and emits actions.
///
/// Props carry all the read-only data a render needs; `handle_event` turns
/// raw events into actions for the host to apply, never mutating external
/// state directly. Internal presentation state (cursor position, recorded
/// hit areas) lives in `&mut self`.
pub trait Component<A> {
    /// Data required to render the component (read-only)
    type Props<'a>;

    /// Handle an event and return actions for the host to apply.
    ///
    /// Returns any `IntoIterator<Item = A>`: `None` for no actions,
    /// `Some(action)` for one, a `Vec` for several. The default emits
    /// nothing (render-only components).
    #[allow(unused_variables)]
    fn handle_event(
        &mut self,
        event: &EventKind,
        props: Self::Props<'_>,
    ) -> impl IntoIterator<Item = A> {
        None::<A>
    }

    /// Render the component to the frame
    fn render(&mut self, frame: &mut Frame, area: Rect, props: Self::Props<'_>);
}
