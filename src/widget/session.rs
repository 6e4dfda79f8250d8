//! Soft keyboard sessions.
//!
//! The engine owns the authoritative text and asks for the soft keyboard with
//! a snapshot of it: the text, a length limit and a cursor (optionally with a
//! second endpoint). A session imports that snapshot into the widget,
//! configures the widget for the requested keyboard type and presents the
//! soft keyboard. User edits are replayed to the engine by the
//! [`TextChangeForwarder`], which is attached only once the programmatic
//! setup is complete.

use ::num_traits::clamp;
use ::std::rc::Rc;
use ::tap::Pipe;
use ::tracing::debug;

use crate::{
    input::sink::RenderView,
    widget::{
        filter::{LengthLimit, NumericLocale},
        keyboard_type::{InputConfig, KeyboardType},
        surface::{TextInputSurface, TextWatcher},
        watcher::TextChangeForwarder,
    },
};

/// A request from the engine to present the soft keyboard.
///
/// Cursor positions use `-1` (or any negative value) for "not given".
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShowKeyboardRequest<'a> {
    pub existing_text: &'a str,
    pub keyboard_type: KeyboardType,
    /// Limit on the engine's full text. Zero or negative for no limit.
    pub max_input_length: i32,
    pub cursor_start: i32,
    pub cursor_end: i32,
}

/// What the widget should contain for a [`ShowKeyboardRequest`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TextImport {
    /// The part of the engine's text loaded into the widget.
    pub text: String,
    /// Limit on the widget's text. The engine's limit is reduced by the
    /// characters which were not loaded, so the engine's full text still
    /// respects it.
    pub length_limit: LengthLimit,
    /// Caret position, before clamping to the widget's text.
    pub cursor: usize,
    /// End of the selection, before clamping to the widget's text. `None`
    /// when only a caret is placed.
    pub selection_end: Option<usize>,
}

impl TextImport {
    /// Interprets the cursor parameters of a request. The order of the checks
    /// matters:
    ///
    /// - no cursor given: load the whole text with the caret at the start,
    /// - no end given: load the text up to the cursor,
    /// - both given: load the text up to the end.
    ///
    /// Positions past the end of the text are treated as the end of the text.
    pub fn new(
        existing_text: &str,
        max_input_length: i32,
        cursor_start: i32,
        cursor_end: i32,
    ) -> Self {
        let text_len = existing_text.chars().count() as i64;
        let max_input_length = i64::from(max_input_length);
        let cursor_end = i64::from(cursor_end);

        let (loaded_len, max_input_length, cursor_start) = if cursor_start < 0 {
            (text_len, max_input_length, 0)
        } else if cursor_end < 0 {
            let cursor_start = i64::from(cursor_start);
            let loaded_len = clamp(cursor_start, 0, text_len);
            (loaded_len, max_input_length - (text_len - loaded_len), cursor_start)
        } else {
            let loaded_len = clamp(cursor_end, 0, text_len);
            (
                loaded_len,
                max_input_length - (text_len - loaded_len),
                i64::from(cursor_start),
            )
        };

        Self {
            text: existing_text.chars().take(loaded_len as usize).collect(),
            length_limit: max_input_length.pipe(LengthLimit::from_engine),
            cursor: cursor_start as usize,
            selection_end: (cursor_end >= cursor_start).then_some(cursor_end as usize),
        }
    }
}

/// Keyboard session state for a single text input widget.
pub struct KeyboardSession {
    keyboard_type: KeyboardType,
    length_limit: LengthLimit,
    numeric_locale: Option<NumericLocale>,
    forwarder: Rc<TextChangeForwarder>,
    /// A session was shown and not hidden since.
    open: bool,
}

impl KeyboardSession {
    pub fn new(forwarder: Rc<TextChangeForwarder>, numeric_locale: Option<NumericLocale>) -> Self {
        Self {
            keyboard_type: KeyboardType::default(),
            length_limit: LengthLimit::Unlimited,
            numeric_locale,
            forwarder,
            open: false,
        }
    }

    /// The keyboard type of the current or most recent session.
    pub fn keyboard_type(&self) -> KeyboardType {
        self.keyboard_type
    }

    /// Whether a session is open, i.e. shown and not yet hidden.
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// The length limit installed by the open session. Unlimited when no
    /// session is open.
    pub fn length_limit(&self) -> LengthLimit {
        self.length_limit
    }

    /// Whether the engine holds a selection which the next user deletion
    /// removes as a whole.
    pub fn selection_active(&self) -> bool {
        self.forwarder.selection_active()
    }

    /// The watcher which replays edits to the engine.
    pub fn forwarder(&self) -> &Rc<TextChangeForwarder> {
        &self.forwarder
    }

    /// Opens a session: imports the engine's text into `surface`, configures
    /// it for the requested keyboard type and presents the soft keyboard.
    ///
    /// Does nothing if a hardware keyboard is present or the surface cannot
    /// take focus. Returns whether the soft keyboard was requested.
    pub fn show<S>(
        &mut self,
        surface: &mut S,
        has_hardware_keyboard: bool,
        request: ShowKeyboardRequest<'_>,
    ) -> bool
    where
        S: TextInputSurface,
    {
        debug!(
            keyboard_type = %request.keyboard_type,
            max_input_length = request.max_input_length,
            cursor_start = request.cursor_start,
            cursor_end = request.cursor_end,
            "Show keyboard"
        );

        if has_hardware_keyboard {
            debug!("Hardware keyboard present, not showing soft keyboard");
            return false;
        }
        if !surface.request_focus() {
            debug!("Text input could not take focus, not showing soft keyboard");
            return false;
        }

        // Nothing below may reach the engine as a user edit.
        surface.remove_text_watcher(&self.watcher());

        self.keyboard_type = request.keyboard_type;
        self.forwarder.set_keyboard_type(request.keyboard_type);

        let import = TextImport::new(
            request.existing_text,
            request.max_input_length,
            request.cursor_start,
            request.cursor_end,
        );

        self.length_limit = import.length_limit;
        surface.set_length_limit(import.length_limit);
        surface.set_text(&import.text);

        let len = surface.text_len();
        surface.set_selection(import.cursor.min(len));
        match import.selection_end {
            Some(end) => {
                surface.extend_selection(end.min(len));
                self.forwarder.set_selection_active(true);
            }
            None => self.forwarder.set_selection_active(false),
        }

        let config = request.keyboard_type.input_config(self.numeric_locale.as_ref());
        surface.apply_input_config(&config);

        surface.add_text_watcher(self.watcher());
        surface.show_soft_input();
        self.open = true;
        true
    }

    /// Closes the session: stops forwarding edits, removes the length limit
    /// and character filter, dismisses the soft keyboard and returns focus to
    /// the engine's render view.
    ///
    /// Does nothing if a hardware keyboard is present or no session is open,
    /// so hiding twice has no further effect.
    pub fn hide<S, V>(&mut self, surface: &mut S, view: &mut V, has_hardware_keyboard: bool)
    where
        S: TextInputSurface,
        V: RenderView,
    {
        debug!(has_hardware_keyboard, open = self.open, "Hide keyboard");
        if has_hardware_keyboard || !self.open {
            return;
        }

        surface.remove_text_watcher(&self.watcher());
        self.forwarder.set_selection_active(false);

        self.length_limit = LengthLimit::Unlimited;
        surface.set_length_limit(LengthLimit::Unlimited);
        surface.apply_input_config(&InputConfig {
            input_type: self.keyboard_type.input_type(),
            character_filter: None,
        });

        surface.hide_soft_input();
        view.request_focus();
        self.open = false;
    }

    fn watcher(&self) -> Rc<dyn TextWatcher> {
        self.forwarder.clone()
    }
}
