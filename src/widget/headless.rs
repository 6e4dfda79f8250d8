//! An in-memory text input widget.
//!
//! [`HeadlessSurface`] behaves like a platform text field without needing a
//! UI runtime: filters apply to edits, watchers are notified of every text
//! mutation, and the soft keyboard and focus state are recorded for
//! inspection. Useful for tests, and for hosts which render their own text
//! field and only need the bridge's bookkeeping.

use ::std::rc::Rc;
use ::tracing::trace;

use crate::{
    input::{
        keyboard::{KeyAction, KeyCode, KeyEvent},
        sink::KeyboardConfiguration,
    },
    widget::{
        connection::InputConnection,
        filter::LengthLimit,
        keyboard_type::InputConfig,
        surface::{same_watcher, ImeAction, ImeOptions, TextChange, TextInputSurface, TextWatcher},
    },
};

/// Whether an edit comes from the user (and passes the character filter) or
/// is programmatic.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Origin {
    User,
    Program,
}

/// An in-memory [`TextInputSurface`] and [`InputConnection`].
pub struct HeadlessSurface {
    text: Vec<char>,
    /// Selection as (anchor, caret). Equal values mean no selection.
    selection: (usize, usize),
    length_limit: LengthLimit,
    input_config: Option<InputConfig>,
    ime_options: Option<ImeOptions>,
    watchers: Vec<Rc<dyn TextWatcher>>,
    keyboard_configuration: KeyboardConfiguration,
    focusable: bool,
    focused: bool,
    soft_input_visible: bool,
    last_editor_action: Option<ImeAction>,
}

impl Default for HeadlessSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl HeadlessSurface {
    /// A focusable, empty text field on a device without a hardware keyboard.
    pub fn new() -> Self {
        Self {
            text: Vec::new(),
            selection: (0, 0),
            length_limit: LengthLimit::Unlimited,
            input_config: None,
            ime_options: None,
            watchers: Vec::new(),
            keyboard_configuration: KeyboardConfiguration::SOFT_ONLY,
            focusable: true,
            focused: false,
            soft_input_visible: false,
            last_editor_action: None,
        }
    }

    /// Sets the platform keyboard configuration the surface reports.
    pub fn with_keyboard_configuration(
        self,
        keyboard_configuration: KeyboardConfiguration,
    ) -> Self {
        Self {
            keyboard_configuration,
            ..self
        }
    }

    /// Changes the reported keyboard configuration, e.g. when a keyboard is
    /// plugged in.
    pub fn set_keyboard_configuration(&mut self, keyboard_configuration: KeyboardConfiguration) {
        self.keyboard_configuration = keyboard_configuration;
    }

    /// Controls whether [`request_focus`] succeeds.
    ///
    /// [`request_focus`]: TextInputSurface::request_focus
    pub fn set_focusable(&mut self, focusable: bool) {
        self.focusable = focusable;
        if !focusable {
            self.focused = false;
        }
    }

    /// The current text.
    pub fn text(&self) -> String {
        self.text.iter().collect()
    }

    /// The selection as (start, end), where start may be greater than end if
    /// the selection was extended backwards.
    pub fn selection(&self) -> (usize, usize) {
        self.selection
    }

    /// Whether the selection is non-empty.
    pub fn has_selection(&self) -> bool {
        self.selection.0 != self.selection.1
    }

    /// The installed length limit.
    pub fn length_limit(&self) -> LengthLimit {
        self.length_limit
    }

    /// The last applied input configuration, if any.
    pub fn input_config(&self) -> Option<&InputConfig> {
        self.input_config.as_ref()
    }

    /// The options set for the input method, if any.
    pub fn ime_options(&self) -> Option<ImeOptions> {
        self.ime_options
    }

    /// Number of attached text watchers.
    pub fn watcher_count(&self) -> usize {
        self.watchers.len()
    }

    /// Whether the surface has input focus.
    pub fn is_focused(&self) -> bool {
        self.focused
    }

    /// Whether the soft keyboard was requested and not dismissed since.
    pub fn is_soft_input_visible(&self) -> bool {
        self.soft_input_visible
    }

    /// The last action the input method performed through the connection.
    pub fn last_editor_action(&self) -> Option<ImeAction> {
        self.last_editor_action
    }

    /// Types `text` as the user would: replaces the selection, subject to the
    /// character filter and length limit.
    pub fn type_text(&mut self, text: &str) {
        let (start, end) = self.ordered_selection();
        self.replace(start, end, text, Origin::User);
    }

    /// Deletes the selection, or the character before the caret.
    pub fn backspace(&mut self) {
        let (start, end) = self.ordered_selection();
        if start != end {
            self.replace(start, end, "", Origin::User);
        } else if start > 0 {
            self.replace(start - 1, start, "", Origin::User);
        }
    }

    /// Deletes the selection, or the character after the caret.
    pub fn delete_forward(&mut self) {
        let (start, end) = self.ordered_selection();
        if start != end {
            self.replace(start, end, "", Origin::User);
        } else if end < self.text.len() {
            self.replace(end, end + 1, "", Origin::User);
        }
    }

    /// Selects `[start, end)` as the user would by dragging.
    pub fn select(&mut self, start: usize, end: usize) {
        let len = self.text.len();
        self.selection = (start.min(len), end.min(len));
    }

    fn ordered_selection(&self) -> (usize, usize) {
        let (a, b) = self.selection;
        (a.min(b), a.max(b))
    }

    fn replace(&mut self, start: usize, end: usize, inserted: &str, origin: Origin) {
        let inserted: Vec<char> = match (&self.input_config, origin) {
            (Some(InputConfig { character_filter: Some(filter), .. }), Origin::User) => {
                inserted.chars().filter(|&c| filter.accepts(c)).collect()
            }
            _ => inserted.chars().collect(),
        };
        let accepted = self
            .length_limit
            .accepted_len(self.text.len(), end - start, inserted.len());
        let inserted = &inserted[..accepted];

        if start == end && inserted.is_empty() {
            return;
        }

        let removed: String = self
            .text
            .splice(start..end, inserted.iter().copied())
            .collect();
        let caret = start + inserted.len();
        self.selection = (caret, caret);

        let change = TextChange {
            start,
            removed,
            inserted: inserted.iter().collect(),
        };
        trace!(?change, "Headless text changed");
        for watcher in &self.watchers {
            watcher.on_text_changed(&change);
        }
    }

    fn move_caret(&mut self, caret: usize) {
        let caret = caret.min(self.text.len());
        self.selection = (caret, caret);
    }
}

impl TextInputSurface for HeadlessSurface {
    fn request_focus(&mut self) -> bool {
        self.focused = self.focusable;
        self.focused
    }

    fn keyboard_configuration(&self) -> KeyboardConfiguration {
        self.keyboard_configuration
    }

    fn set_text(&mut self, text: &str) {
        self.replace(0, self.text.len(), text, Origin::Program);
    }

    fn text_len(&self) -> usize {
        self.text.len()
    }

    fn set_selection(&mut self, index: usize) {
        self.move_caret(index);
    }

    fn extend_selection(&mut self, index: usize) {
        self.selection.1 = index.min(self.text.len());
    }

    fn set_length_limit(&mut self, limit: LengthLimit) {
        self.length_limit = limit;
    }

    fn apply_input_config(&mut self, config: &InputConfig) {
        self.input_config = Some(config.clone());
    }

    fn set_ime_options(&mut self, options: ImeOptions) {
        self.ime_options = Some(options);
    }

    fn add_text_watcher(&mut self, watcher: Rc<dyn TextWatcher>) {
        self.watchers.push(watcher);
    }

    fn remove_text_watcher(&mut self, watcher: &Rc<dyn TextWatcher>) {
        self.watchers.retain(|w| !same_watcher(w, watcher));
    }

    fn show_soft_input(&mut self) {
        self.soft_input_visible = true;
    }

    fn hide_soft_input(&mut self) {
        self.soft_input_visible = false;
        self.focused = false;
    }

    fn default_key_handling(&mut self, event: &KeyEvent) -> bool {
        if event.action != KeyAction::Down {
            return false;
        }

        let (start, end) = self.ordered_selection();
        match event.key_code {
            KeyCode::DEL => self.backspace(),
            KeyCode::FORWARD_DEL => self.delete_forward(),
            KeyCode::DPAD_LEFT if start != end => self.move_caret(start),
            KeyCode::DPAD_LEFT => self.move_caret(start.saturating_sub(1)),
            KeyCode::DPAD_RIGHT if start != end => self.move_caret(end),
            KeyCode::DPAD_RIGHT => self.move_caret(end + 1),
            KeyCode::MOVE_HOME => self.move_caret(0),
            KeyCode::MOVE_END => self.move_caret(self.text.len()),
            KeyCode::A if event.meta.is_ctrl_pressed() => self.selection = (0, self.text.len()),
            _ => match event.unicode_char {
                Some(c) if !event.meta.has_command_modifier() => {
                    let mut buf = [0; 4];
                    self.type_text(c.encode_utf8(&mut buf));
                }
                _ => return false,
            },
        }
        true
    }
}

impl InputConnection for HeadlessSurface {
    fn text_before_cursor(&mut self, n: usize) -> Option<String> {
        let (start, _) = self.ordered_selection();
        Some(self.text[start.saturating_sub(n)..start].iter().collect())
    }

    fn text_after_cursor(&mut self, n: usize) -> Option<String> {
        let (_, end) = self.ordered_selection();
        let stop = end.saturating_add(n).min(self.text.len());
        Some(self.text[end..stop].iter().collect())
    }

    fn selected_text(&mut self) -> Option<String> {
        let (start, end) = self.ordered_selection();
        (start != end).then(|| self.text[start..end].iter().collect())
    }

    fn commit_text(&mut self, text: &str, _new_cursor_position: i32) -> bool {
        self.type_text(text);
        true
    }

    fn delete_surrounding_text(&mut self, before: usize, after: usize) -> bool {
        let (start, end) = self.ordered_selection();
        let after_end = end.saturating_add(after).min(self.text.len());
        if after_end > end {
            self.replace(end, after_end, "", Origin::User);
        }
        let before_start = start.saturating_sub(before);
        if before_start < start {
            self.replace(before_start, start, "", Origin::User);
        }
        true
    }

    fn set_selection_range(&mut self, start: usize, end: usize) -> bool {
        self.select(start, end);
        true
    }

    fn send_key_event(&mut self, event: &KeyEvent) -> bool {
        self.default_key_handling(event)
    }

    fn perform_editor_action(&mut self, action: ImeAction) -> bool {
        self.last_editor_action = Some(action);
        true
    }

    fn begin_batch_edit(&mut self) -> bool {
        true
    }

    fn end_batch_edit(&mut self) -> bool {
        true
    }
}
