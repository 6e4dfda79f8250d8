//! The channel through which the input method edits the widget.

use ::tracing::debug;

use crate::{input::keyboard::KeyEvent, widget::surface::ImeAction};

/// The calls an input method makes into a text input widget.
///
/// Return values follow the platform convention: `false` means the
/// connection is no longer valid.
pub trait InputConnection {
    /// Up to `n` characters before the selection.
    fn text_before_cursor(&mut self, n: usize) -> Option<String>;
    /// Up to `n` characters after the selection.
    fn text_after_cursor(&mut self, n: usize) -> Option<String>;
    /// The selected text, or `None` without a selection.
    fn selected_text(&mut self) -> Option<String>;
    /// Insert `text` in place of the selection. `new_cursor_position` is
    /// relative to the inserted text, as defined by the platform.
    fn commit_text(&mut self, text: &str, new_cursor_position: i32) -> bool;
    /// Delete `before` characters before and `after` characters after the
    /// selection, leaving the selection itself alone.
    fn delete_surrounding_text(&mut self, before: usize, after: usize) -> bool;
    fn set_selection_range(&mut self, start: usize, end: usize) -> bool;
    fn send_key_event(&mut self, event: &KeyEvent) -> bool;
    /// Report the action button being pressed.
    fn perform_editor_action(&mut self, action: ImeAction) -> bool;
    fn begin_batch_edit(&mut self) -> bool;
    fn end_batch_edit(&mut self) -> bool;
}

impl<C> InputConnection for &mut C
where
    C: InputConnection + ?Sized,
{
    fn text_before_cursor(&mut self, n: usize) -> Option<String> {
        (**self).text_before_cursor(n)
    }

    fn text_after_cursor(&mut self, n: usize) -> Option<String> {
        (**self).text_after_cursor(n)
    }

    fn selected_text(&mut self) -> Option<String> {
        (**self).selected_text()
    }

    fn commit_text(&mut self, text: &str, new_cursor_position: i32) -> bool {
        (**self).commit_text(text, new_cursor_position)
    }

    fn delete_surrounding_text(&mut self, before: usize, after: usize) -> bool {
        (**self).delete_surrounding_text(before, after)
    }

    fn set_selection_range(&mut self, start: usize, end: usize) -> bool {
        (**self).set_selection_range(start, end)
    }

    fn send_key_event(&mut self, event: &KeyEvent) -> bool {
        (**self).send_key_event(event)
    }

    fn perform_editor_action(&mut self, action: ImeAction) -> bool {
        (**self).perform_editor_action(action)
    }

    fn begin_batch_edit(&mut self) -> bool {
        (**self).begin_batch_edit()
    }

    fn end_batch_edit(&mut self) -> bool {
        (**self).end_batch_edit()
    }
}

/// Decorates a widget's input connection, logging every call the input
/// method makes before forwarding it unchanged.
///
/// Input method behaviour varies wildly between vendors, and a trace of the
/// raw calls is usually the only way to make sense of a misbehaving
/// keyboard.
pub struct TracingInputConnection<C> {
    inner: C,
}

impl<C> TracingInputConnection<C>
where
    C: InputConnection,
{
    pub fn new(inner: C) -> Self {
        Self { inner }
    }

    pub fn into_inner(self) -> C {
        self.inner
    }
}

impl<C> InputConnection for TracingInputConnection<C>
where
    C: InputConnection,
{
    fn text_before_cursor(&mut self, n: usize) -> Option<String> {
        debug!(n, "text_before_cursor");
        self.inner.text_before_cursor(n)
    }

    fn text_after_cursor(&mut self, n: usize) -> Option<String> {
        debug!(n, "text_after_cursor");
        self.inner.text_after_cursor(n)
    }

    fn selected_text(&mut self) -> Option<String> {
        debug!("selected_text");
        self.inner.selected_text()
    }

    fn commit_text(&mut self, text: &str, new_cursor_position: i32) -> bool {
        debug!(text, new_cursor_position, "commit_text");
        self.inner.commit_text(text, new_cursor_position)
    }

    fn delete_surrounding_text(&mut self, before: usize, after: usize) -> bool {
        debug!(before, after, "delete_surrounding_text");
        self.inner.delete_surrounding_text(before, after)
    }

    fn set_selection_range(&mut self, start: usize, end: usize) -> bool {
        debug!(start, end, "set_selection_range");
        self.inner.set_selection_range(start, end)
    }

    fn send_key_event(&mut self, event: &KeyEvent) -> bool {
        debug!(?event, "send_key_event");
        self.inner.send_key_event(event)
    }

    fn perform_editor_action(&mut self, action: ImeAction) -> bool {
        debug!(?action, "perform_editor_action");
        self.inner.perform_editor_action(action)
    }

    fn begin_batch_edit(&mut self) -> bool {
        debug!("begin_batch_edit");
        self.inner.begin_batch_edit()
    }

    fn end_batch_edit(&mut self) -> bool {
        debug!("end_batch_edit");
        self.inner.end_batch_edit()
    }
}
