//! Key event routing between the engine and the text input widget.
//!
//! With a soft keyboard, the text input widget provides editing affordances
//! (cursor movement, clipboard, undo) the engine does not. Some keys must
//! still reach the engine while a text field has focus, e.g. arrow keys for
//! in-game navigation. The [`EventRouter`] decides, per key event, which side
//! sees the event and in which order.

use ::tracing::debug;

use crate::input::{
    keyboard::{KeyAction, KeyCode, KeyEvent, MetaState},
    sink::InputSink,
};

/// Where a key event is delivered.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Route {
    /// The engine receives the event and its answer is final. The widget
    /// never sees it.
    EngineOnly,
    /// The engine is offered the event first. If it does not consume the
    /// event, the widget's default key handling runs.
    EngineThenWidget,
    /// Only the widget's default key handling runs. The engine never sees the
    /// event.
    WidgetOnly,
}

/// Returns `true` if the key event must be offered to the engine even though
/// a text input widget has focus.
///
/// This is the case for tab, pure modifier keys, escape and back, the arrow
/// keys, and any key pressed with a command modifier (alt, ctrl, sym,
/// function, meta). Ctrl combined with one of the editing shortcut letters is
/// excluded so the widget keeps its native select all, undo, redo, cut, copy
/// and paste behaviour.
pub fn needs_engine_handling(key_code: KeyCode, meta: &MetaState) -> bool {
    let is_editing_shortcut = meta.is_ctrl_pressed() && key_code.is_editing_shortcut();
    let is_modified_key = !is_editing_shortcut && meta.has_command_modifier();

    key_code == KeyCode::TAB
        || key_code.is_modifier_key()
        || key_code.is_back()
        || key_code.is_arrow()
        || is_modified_key
}

/// Decides where a key event is delivered.
///
/// A hardware keyboard makes the widget's editing affordances redundant, so
/// every event goes to the engine. Otherwise the engine is only involved for
/// keys which [`need engine handling`].
///
/// [`need engine handling`]: needs_engine_handling
pub fn route(key_code: KeyCode, meta: &MetaState, has_hardware_keyboard: bool) -> Route {
    if has_hardware_keyboard {
        Route::EngineOnly
    } else if needs_engine_handling(key_code, meta) {
        Route::EngineThenWidget
    } else {
        Route::WidgetOnly
    }
}

/// Routes key events into the engine's [`InputSink`], falling back to the
/// widget's default key handling where the routing decision allows.
pub struct EventRouter<K> {
    sink: K,
}

impl<K> EventRouter<K>
where
    K: InputSink,
{
    /// Constructs a router which delivers engine-bound events to `sink`.
    pub fn new(sink: K) -> Self {
        Self { sink }
    }

    /// The engine input sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    /// The engine input sink.
    pub fn sink_mut(&mut self) -> &mut K {
        &mut self.sink
    }

    /// Dispatches a key event.
    ///
    /// `widget_default` runs the widget's default key handling and returns
    /// whether the widget handled the event. The return value reports
    /// whether the event was handled by either side.
    pub fn dispatch<F>(
        &mut self,
        event: &KeyEvent,
        has_hardware_keyboard: bool,
        widget_default: F,
    ) -> bool
    where
        F: FnOnce(&KeyEvent) -> bool,
    {
        let route = route(event.key_code, &event.meta, has_hardware_keyboard);
        debug!(key_code = ?event.key_code, action = ?event.action, ?route, "Routing key event");

        match route {
            Route::EngineOnly => self.offer_to_engine(event),
            Route::EngineThenWidget => self.offer_to_engine(event) || widget_default(event),
            Route::WidgetOnly => widget_default(event),
        }
    }

    fn offer_to_engine(&mut self, event: &KeyEvent) -> bool {
        match event.action {
            KeyAction::Down => self.sink.on_key_down(event),
            KeyAction::Up => self.sink.on_key_up(event),
        }
    }
}
