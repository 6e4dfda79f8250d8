//! The capabilities the bridge needs from the platform's text input widget.

use ::std::rc::Rc;

use crate::{
    errors::{Error, Result},
    input::{keyboard::KeyEvent, sink::KeyboardConfiguration},
    widget::{filter::LengthLimit, keyboard_type::InputConfig},
};

/// A single mutation of the widget's text buffer: `removed` was replaced by
/// `inserted`, starting at character index `start`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextChange {
    pub start: usize,
    pub removed: String,
    pub inserted: String,
}

/// Observer of text buffer mutations.
pub trait TextWatcher {
    /// Called after the buffer changed.
    fn on_text_changed(&self, change: &TextChange);
}

/// Returns `true` if both handles point at the same watcher.
pub(crate) fn same_watcher(a: &Rc<dyn TextWatcher>, b: &Rc<dyn TextWatcher>) -> bool {
    ::std::ptr::eq(Rc::as_ptr(a) as *const (), Rc::as_ptr(b) as *const ())
}

/// The action button the input method presents, and the action it reports
/// back when pressed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[repr(i32)]
pub enum ImeAction {
    #[default]
    Unspecified = 0,
    None = 1,
    Go = 2,
    Search = 3,
    Send = 4,
    Next = 5,
    Done = 6,
    Previous = 7,
}

impl TryFrom<i32> for ImeAction {
    type Error = Error;

    fn try_from(action: i32) -> Result<Self> {
        Ok(match action {
            0 => Self::Unspecified,
            1 => Self::None,
            2 => Self::Go,
            3 => Self::Search,
            4 => Self::Send,
            5 => Self::Next,
            6 => Self::Done,
            7 => Self::Previous,
            _ => return Err(Error::UnknownImeAction(action)),
        })
    }
}

/// Options passed to the input method when it attaches to the widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ImeOptions {
    pub action: ImeAction,
    /// Suppress the full screen extracted text UI in landscape.
    pub no_extract_ui: bool,
}

impl ImeOptions {
    pub const FLAG_NO_EXTRACT_UI: i32 = 0x1000_0000;

    /// The raw platform value.
    pub fn bits(&self) -> i32 {
        let flags = if self.no_extract_ui {
            Self::FLAG_NO_EXTRACT_UI
        } else {
            0
        };
        self.action as i32 | flags
    }
}

impl Default for ImeOptions {
    fn default() -> Self {
        Self {
            action: ImeAction::Done,
            no_extract_ui: true,
        }
    }
}

/// A platform text input widget, reduced to the capabilities the keyboard
/// session and event routing depend on.
///
/// Positions are character indices. Implementations must keep the selection
/// within `[0, text_len()]` after every mutation.
///
/// All methods are called on the UI thread.
pub trait TextInputSurface {
    /// Request input focus. Returns `false` if the widget cannot take focus.
    fn request_focus(&mut self) -> bool;

    /// Current platform keyboard configuration.
    fn keyboard_configuration(&self) -> KeyboardConfiguration;

    /// Replace the whole text. Subject to the installed length limit.
    fn set_text(&mut self, text: &str);

    /// Length of the text, in characters.
    fn text_len(&self) -> usize;

    /// Collapse the selection to a caret at `index`.
    fn set_selection(&mut self, index: usize);

    /// Move the selection's end to `index`, keeping its start.
    fn extend_selection(&mut self, index: usize);

    /// Install the length limit, replacing any previous one.
    fn set_length_limit(&mut self, limit: LengthLimit);

    /// Apply input type and character filter together.
    fn apply_input_config(&mut self, config: &InputConfig);

    /// Set the options passed to the input method when it attaches.
    fn set_ime_options(&mut self, options: ImeOptions);

    /// Attach `watcher`, which is notified of every later text mutation.
    fn add_text_watcher(&mut self, watcher: Rc<dyn TextWatcher>);

    /// Detach `watcher`. Does nothing if it is not attached.
    fn remove_text_watcher(&mut self, watcher: &Rc<dyn TextWatcher>);

    /// Ask the input method to present the soft keyboard for this widget.
    fn show_soft_input(&mut self);

    /// Ask the input method to dismiss the soft keyboard.
    fn hide_soft_input(&mut self);

    /// The widget's own key handling, for events the engine leaves to it.
    /// Returns `true` if the widget handled the event.
    fn default_key_handling(&mut self, event: &KeyEvent) -> bool;
}
