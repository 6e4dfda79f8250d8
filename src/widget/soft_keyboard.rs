//! The text input widget as seen by the engine.

use ::tracing::debug;

use crate::{
    input::{
        keyboard::KeyEvent,
        router::EventRouter,
        sink::{self, RenderView},
    },
    widget::{
        connection::{InputConnection, TracingInputConnection},
        keyboard_type::KeyboardType,
        session::{KeyboardSession, ShowKeyboardRequest},
        surface::{ImeAction, TextInputSurface},
    },
};

/// Ties a platform text input widget to the engine's render view.
///
/// Key events the platform delivers to the widget are routed through
/// [`on_key_down`] and [`on_key_up`]; the engine opens and closes soft
/// keyboard sessions with [`show_keyboard`] and [`hide_keyboard`].
///
/// Constructed with a [`Builder`]. Like the widget it wraps, a
/// `SoftKeyboard` belongs to the UI thread and is neither `Send` nor `Sync`.
///
/// [`on_key_down`]: SoftKeyboard::on_key_down
/// [`on_key_up`]: SoftKeyboard::on_key_up
/// [`show_keyboard`]: SoftKeyboard::show_keyboard
/// [`hide_keyboard`]: SoftKeyboard::hide_keyboard
/// [`Builder`]: crate::widget::Builder
pub struct SoftKeyboard<S, V> {
    surface: S,
    router: EventRouter<V>,
    session: KeyboardSession,
}

impl<S, V> SoftKeyboard<S, V>
where
    S: TextInputSurface,
    V: RenderView,
{
    pub(crate) fn new(surface: S, view: V, session: KeyboardSession) -> Self {
        Self {
            surface,
            router: EventRouter::new(view),
            session,
        }
    }

    /// The text input widget.
    pub fn surface(&self) -> &S {
        &self.surface
    }

    /// The text input widget.
    pub fn surface_mut(&mut self) -> &mut S {
        &mut self.surface
    }

    /// The engine's render view, which also receives routed key events.
    pub fn view(&self) -> &V {
        self.router.sink()
    }

    /// The engine's render view.
    pub fn view_mut(&mut self) -> &mut V {
        self.router.sink_mut()
    }

    /// Whether a physical keyboard is attached and not hidden, according to
    /// the platform or the engine.
    pub fn has_hardware_keyboard(&self) -> bool {
        sink::has_hardware_keyboard(&self.surface.keyboard_configuration(), self.router.sink())
    }

    /// Handles a key press delivered to the widget. Returns `true` if the
    /// engine or the widget handled it.
    pub fn on_key_down(&mut self, event: &KeyEvent) -> bool {
        self.dispatch(event)
    }

    /// Handles a key release delivered to the widget. Returns `true` if the
    /// engine or the widget handled it.
    pub fn on_key_up(&mut self, event: &KeyEvent) -> bool {
        self.dispatch(event)
    }

    fn dispatch(&mut self, event: &KeyEvent) -> bool {
        let has_hardware_keyboard = self.has_hardware_keyboard();
        let surface = &mut self.surface;
        self.router.dispatch(event, has_hardware_keyboard, |event| {
            surface.default_key_handling(event)
        })
    }

    /// Opens a soft keyboard session for `existing_text`.
    ///
    /// `cursor_start` and `cursor_end` are character positions, or `-1` when
    /// not given. A `max_input_length` of zero or less means no limit. See
    /// [`TextImport`] for how the parameters combine.
    ///
    /// Does nothing if a hardware keyboard is present or the widget cannot
    /// take focus.
    ///
    /// [`TextImport`]: crate::widget::session::TextImport
    pub fn show_keyboard(
        &mut self,
        existing_text: &str,
        keyboard_type: KeyboardType,
        max_input_length: i32,
        cursor_start: i32,
        cursor_end: i32,
    ) {
        let has_hardware_keyboard = self.has_hardware_keyboard();
        self.session.show(
            &mut self.surface,
            has_hardware_keyboard,
            ShowKeyboardRequest {
                existing_text,
                keyboard_type,
                max_input_length,
                cursor_start,
                cursor_end,
            },
        );
    }

    /// Closes the soft keyboard session and returns focus to the render
    /// view. Does nothing if a hardware keyboard is present or no session is
    /// open.
    pub fn hide_keyboard(&mut self) {
        let has_hardware_keyboard = self.has_hardware_keyboard();
        let view = self.router.sink_mut();
        self.session.hide(&mut self.surface, view, has_hardware_keyboard);
    }

    /// The keyboard type of the current or most recent session.
    pub fn keyboard_type(&self) -> KeyboardType {
        self.session.keyboard_type()
    }

    /// State of the current or most recent soft keyboard session.
    pub fn session(&self) -> &KeyboardSession {
        &self.session
    }

    /// Handles an editor action reported by the input method. The done action
    /// is forwarded to the engine as [`SyncEvent::Enter`] and returns focus to
    /// the render view.
    ///
    /// [`SyncEvent::Enter`]: crate::widget::SyncEvent::Enter
    pub fn on_editor_action(&mut self, action: ImeAction) -> bool {
        let handled = self.session.forwarder().on_editor_action(action);
        if handled {
            self.router.sink_mut().request_focus();
        }
        handled
    }

    /// Opens the widget's own input connection for the input method, with
    /// every call the input method makes traced.
    pub fn create_input_connection(&mut self) -> TracingInputConnection<&mut S>
    where
        S: InputConnection,
    {
        debug!(keyboard_type = %self.keyboard_type(), "Creating input connection");
        TracingInputConnection::new(&mut self.surface)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        input::{
            keyboard::{meta, KeyCode, MetaState},
            sink::{InputSink, KeyboardConfiguration},
        },
        widget::{
            filter::{CharacterFilter, LengthLimit},
            headless::HeadlessSurface,
            keyboard_type::InputType,
            Builder, SyncEvent,
        },
    };

    use ::pretty_assertions::assert_eq;
    use ::tokio::sync::mpsc::UnboundedReceiver;

    #[derive(Default)]
    struct View {
        consume: bool,
        hardware: bool,
        received: Vec<KeyCode>,
        focus_requests: usize,
    }

    impl InputSink for View {
        fn on_key_down(&mut self, event: &KeyEvent) -> bool {
            self.received.push(event.key_code);
            self.consume
        }

        fn on_key_up(&mut self, event: &KeyEvent) -> bool {
            self.received.push(event.key_code);
            self.consume
        }

        fn has_hardware_keyboard(&self) -> bool {
            self.hardware
        }
    }

    impl RenderView for View {
        fn request_focus(&mut self) {
            self.focus_requests += 1;
        }
    }

    type Bridge = SoftKeyboard<HeadlessSurface, View>;

    fn bridge() -> (Bridge, UnboundedReceiver<SyncEvent>) {
        Builder::new().build(HeadlessSurface::new(), View::default())
    }

    fn drain(rx: &mut UnboundedReceiver<SyncEvent>) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    /// Whole text, caret at the start, limit unchanged.
    #[test]
    fn test_show_without_cursor() {
        let (mut kb, _rx) = bridge();

        kb.show_keyboard("hello world", KeyboardType::Default, 20, -1, -1);

        let surface = kb.surface();
        assert_eq!(surface.text(), "hello world");
        assert_eq!(surface.selection(), (0, 0));
        assert_eq!(surface.length_limit(), LengthLimit::Max(20));
        assert!(!kb.session().selection_active());
        assert!(surface.is_soft_input_visible());
        assert!(surface.is_focused());
    }

    /// Text up to the caret, limit reduced by what was left out.
    #[test]
    fn test_show_with_cursor() {
        let (mut kb, _rx) = bridge();

        kb.show_keyboard("hello world", KeyboardType::Default, 20, 5, -1);

        let surface = kb.surface();
        assert_eq!(surface.text(), "hello");
        assert_eq!(surface.selection(), (5, 5));
        assert_eq!(surface.length_limit(), LengthLimit::Max(14));
        assert!(!kb.session().selection_active());
    }

    /// Text up to the selection end, with the selection in place.
    #[test]
    fn test_show_with_selection() {
        let (mut kb, _rx) = bridge();

        kb.show_keyboard("hello world", KeyboardType::Default, 20, 2, 7);

        let surface = kb.surface();
        assert_eq!(surface.text(), "hello w");
        assert_eq!(surface.selection(), (2, 7));
        assert_eq!(surface.length_limit(), LengthLimit::Max(16));
        assert!(kb.session().selection_active());
    }

    #[test]
    fn test_show_without_limit() {
        for max in [0, -5] {
            let (mut kb, _rx) = bridge();
            kb.surface_mut().set_length_limit(LengthLimit::Max(3));

            kb.show_keyboard("hello world", KeyboardType::Default, max, -1, -1);

            assert_eq!(kb.surface().length_limit(), LengthLimit::Unlimited);
            assert_eq!(kb.surface().text(), "hello world");
        }
    }

    #[test]
    fn test_show_clamps_cursor() {
        let (mut kb, _rx) = bridge();

        kb.show_keyboard("abc", KeyboardType::Default, 0, 10, 20);

        assert_eq!(kb.surface().text(), "abc");
        assert_eq!(kb.surface().selection(), (3, 3));
    }

    #[test]
    fn test_show_applies_input_config() {
        let (mut kb, _rx) = bridge();

        kb.show_keyboard("", KeyboardType::NumberDecimal, 0, -1, -1);

        assert_eq!(kb.keyboard_type(), KeyboardType::NumberDecimal);
        let config = kb.surface().input_config().cloned();
        assert_eq!(
            config.map(|c| (c.input_type, c.character_filter)),
            Some((
                InputType::TYPE_CLASS_NUMBER
                    | InputType::TYPE_NUMBER_FLAG_DECIMAL
                    | InputType::TYPE_NUMBER_FLAG_SIGNED,
                Some(CharacterFilter::fixed_decimal_digits())
            ))
        );

        kb.show_keyboard("", KeyboardType::EmailAddress, 0, -1, -1);
        let config = kb.surface().input_config().cloned();
        assert_eq!(config.and_then(|c| c.character_filter), None);
    }

    /// Only the user's edits reach the engine, never the session setup.
    #[test]
    fn test_setup_does_not_sync() {
        let (mut kb, mut rx) = bridge();

        kb.show_keyboard("hello world", KeyboardType::Default, 20, 5, -1);
        kb.hide_keyboard();
        kb.show_keyboard("goodbye", KeyboardType::Default, 20, 2, 4);
        assert!(drain(&mut rx).is_empty());

        kb.surface_mut().type_text("x");
        assert_eq!(drain(&mut rx), [SyncEvent::Backspace, SyncEvent::Char('x')]);
    }

    #[test]
    fn test_user_edits_sync() {
        let (mut kb, mut rx) = bridge();
        kb.show_keyboard("hello world", KeyboardType::Default, 20, 5, -1);

        kb.surface_mut().type_text("!");
        kb.surface_mut().backspace();
        kb.surface_mut().backspace();

        assert_eq!(
            drain(&mut rx),
            [SyncEvent::Char('!'), SyncEvent::Backspace, SyncEvent::Backspace]
        );
        assert_eq!(kb.surface().text(), "hell");
    }

    /// Replacing the engine's selection is one backspace, not one per
    /// character.
    #[test]
    fn test_replacing_selection_syncs_single_backspace() {
        let (mut kb, mut rx) = bridge();
        kb.show_keyboard("hello world", KeyboardType::Default, 20, 2, 7);

        kb.surface_mut().type_text("X");

        assert_eq!(drain(&mut rx), [SyncEvent::Backspace, SyncEvent::Char('X')]);
        assert_eq!(kb.surface().text(), "heX");
        assert!(!kb.session().selection_active());
    }

    #[test]
    fn test_hide() {
        let (mut kb, mut rx) = bridge();
        kb.show_keyboard("hello", KeyboardType::Default, 0, -1, -1);
        let focus_requests = kb.view().focus_requests;

        kb.hide_keyboard();

        assert!(!kb.surface().is_soft_input_visible());
        assert!(!kb.surface().is_focused());
        assert_eq!(kb.surface().watcher_count(), 0);
        assert_eq!(kb.view().focus_requests, focus_requests + 1);
        assert!(!kb.session().is_open());

        kb.surface_mut().type_text("x");
        assert!(drain(&mut rx).is_empty());
    }

    /// Closing a session leaves neither a length limit nor a character filter
    /// behind.
    #[test]
    fn test_hide_removes_filters() {
        let (mut kb, _rx) = bridge();
        kb.show_keyboard("12", KeyboardType::NumberDecimal, 5, -1, -1);
        assert_eq!(kb.surface().length_limit(), LengthLimit::Max(5));

        kb.hide_keyboard();

        let surface = kb.surface();
        assert_eq!(surface.length_limit(), LengthLimit::Unlimited);
        assert_eq!(kb.session().length_limit(), LengthLimit::Unlimited);
        assert_eq!(
            surface.input_config().map(|c| c.character_filter.clone()),
            Some(None)
        );
        assert_eq!(
            surface.input_config().map(|c| c.input_type),
            Some(KeyboardType::NumberDecimal.input_type())
        );
        assert!(!kb.session().selection_active());
    }

    #[test]
    fn test_hide_twice() {
        let (mut kb, _rx) = bridge();
        kb.show_keyboard("12.5", KeyboardType::NumberDecimal, 10, 3, -1);

        kb.hide_keyboard();
        let snapshot = |kb: &Bridge| {
            let s = kb.surface();
            (
                (s.text(), s.selection(), s.length_limit()),
                s.input_config().cloned(),
                (s.watcher_count(), s.is_soft_input_visible(), s.is_focused()),
                kb.view().focus_requests,
                kb.keyboard_type(),
            )
        };
        let after_first = snapshot(&kb);

        kb.hide_keyboard();
        assert_eq!(snapshot(&kb), after_first);
    }

    #[test]
    fn test_hide_without_session() {
        let (mut kb, _rx) = bridge();

        kb.hide_keyboard();

        assert!(!kb.surface().is_soft_input_visible());
        assert_eq!(kb.surface().watcher_count(), 0);
        assert_eq!(kb.view().focus_requests, 1);
    }

    #[test]
    fn test_hardware_keyboard_disables_sessions() {
        let (mut kb, mut rx) = Builder::new().build(
            HeadlessSurface::new().with_keyboard_configuration(KeyboardConfiguration::HARDWARE),
            View::default(),
        );
        let focus_requests = kb.view().focus_requests;

        kb.show_keyboard("hello", KeyboardType::Default, 20, -1, -1);
        assert_eq!(kb.surface().text(), "");
        assert!(!kb.surface().is_soft_input_visible());
        assert_eq!(kb.surface().watcher_count(), 0);

        kb.hide_keyboard();
        assert_eq!(kb.view().focus_requests, focus_requests);
        assert!(drain(&mut rx).is_empty());
    }

    #[test]
    fn test_engine_reported_hardware_keyboard() {
        let (mut kb, _rx) = Builder::new().build(
            HeadlessSurface::new(),
            View {
                hardware: true,
                ..View::default()
            },
        );

        assert!(kb.has_hardware_keyboard());
        kb.show_keyboard("hello", KeyboardType::Default, 20, -1, -1);
        assert!(!kb.surface().is_soft_input_visible());
    }

    #[test]
    fn test_unfocusable_widget() {
        let (mut kb, _rx) = bridge();
        kb.surface_mut().set_focusable(false);

        kb.show_keyboard("hello", KeyboardType::Default, 20, -1, -1);

        assert_eq!(kb.surface().text(), "");
        assert!(!kb.surface().is_soft_input_visible());
        assert_eq!(kb.surface().watcher_count(), 0);
    }

    #[test]
    fn test_show_replaces_previous_session() {
        let (mut kb, _rx) = bridge();

        kb.show_keyboard("hello world", KeyboardType::Default, 20, 2, 7);
        kb.show_keyboard("abc", KeyboardType::Multiline, 0, -1, -1);

        assert_eq!(kb.surface().text(), "abc");
        assert_eq!(kb.surface().length_limit(), LengthLimit::Unlimited);
        assert_eq!(kb.surface().watcher_count(), 1);
        assert!(!kb.session().selection_active());
        assert_eq!(kb.keyboard_type(), KeyboardType::Multiline);
    }

    #[test]
    fn test_key_routing() {
        let (mut kb, _rx) = bridge();
        kb.show_keyboard("abc", KeyboardType::Default, 0, 1, 3);

        // Unconsumed arrow keys fall through to the widget.
        assert!(kb.on_key_down(&KeyEvent::down(KeyCode::DPAD_LEFT, MetaState::NONE)));
        assert_eq!(kb.view().received, [KeyCode::DPAD_LEFT]);
        assert_eq!(kb.surface().selection(), (1, 1));

        // Consumed ones do not.
        kb.view_mut().consume = true;
        assert!(kb.on_key_down(&KeyEvent::down(KeyCode::DPAD_RIGHT, MetaState::NONE)));
        assert_eq!(kb.surface().selection(), (1, 1));

        // Editing shortcuts never reach the engine.
        let ctrl = MetaState::from(meta::CTRL_ON | meta::CTRL_LEFT_ON);
        assert!(kb.on_key_down(&KeyEvent::down(KeyCode::A, ctrl)));
        assert_eq!(kb.surface().selection(), (0, 3));

        // Neither do plain characters.
        let z = KeyEvent::down(KeyCode::Z, MetaState::NONE).with_unicode_char('z');
        assert!(kb.on_key_down(&z));
        assert_eq!(kb.surface().text(), "z");
        assert!(!kb.on_key_up(&KeyEvent::up(KeyCode::Z, MetaState::NONE)));

        assert_eq!(kb.view().received, [KeyCode::DPAD_LEFT, KeyCode::DPAD_RIGHT]);
    }

    #[test]
    fn test_key_routing_with_hardware_keyboard() {
        let (mut kb, _rx) = bridge();
        kb.surface_mut().set_text("abc");
        kb.surface_mut()
            .set_keyboard_configuration(KeyboardConfiguration::HARDWARE);

        let event = KeyEvent::down(KeyCode::B, MetaState::NONE).with_unicode_char('b');
        assert!(!kb.on_key_down(&event));
        assert_eq!(kb.surface().text(), "abc");
        assert_eq!(kb.view().received, [KeyCode::B]);
    }

    #[test]
    fn test_done_action() {
        let (mut kb, mut rx) = bridge();
        let focus_requests = kb.view().focus_requests;

        assert!(kb.on_editor_action(ImeAction::Done));
        assert!(!kb.on_editor_action(ImeAction::Search));

        assert_eq!(drain(&mut rx), [SyncEvent::Enter]);
        assert_eq!(kb.view().focus_requests, focus_requests + 1);
    }

    #[test]
    fn test_input_connection() {
        let (mut kb, mut rx) = bridge();
        kb.show_keyboard("hi", KeyboardType::Default, 0, 2, -1);

        let mut conn = kb.create_input_connection();
        assert!(conn.begin_batch_edit());
        assert!(conn.commit_text("!", 1));
        assert!(conn.end_batch_edit());
        assert_eq!(conn.text_before_cursor(2), Some("i!".into()));
        assert!(conn.perform_editor_action(ImeAction::Done));

        assert_eq!(kb.surface().text(), "hi!");
        assert_eq!(kb.surface().last_editor_action(), Some(ImeAction::Done));
        assert_eq!(drain(&mut rx), [SyncEvent::Char('!')]);
    }
}
