//! Forwarding of widget edits back to the engine.
//!
//! The engine keeps its own copy of the text. Rather than sending snapshots,
//! edits made in the widget are replayed to the engine as the key strokes
//! which would have produced them.

use ::std::cell::Cell;
use ::tokio::sync::mpsc::UnboundedSender;
use ::tracing::{debug, trace};

use crate::widget::{
    keyboard_type::KeyboardType,
    surface::{ImeAction, TextChange, TextWatcher},
};

/// An edit replayed to the engine.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SyncEvent {
    /// Delete the character before the engine's caret, or the engine's
    /// selection if it has one.
    Backspace,
    /// Insert a character at the engine's caret.
    Char(char),
    /// The input method's done action was pressed.
    Enter,
}

/// Translates text buffer mutations into [`SyncEvent`]s for the engine.
///
/// The forwarder is only attached to the widget between keyboard session
/// setup and teardown, so the edits it sees are those the user makes.
pub struct TextChangeForwarder {
    tx: UnboundedSender<SyncEvent>,
    keyboard_type: Cell<KeyboardType>,
    /// The engine holds a non-empty selection which the next deletion
    /// removes as a whole.
    selection_active: Cell<bool>,
}

impl TextChangeForwarder {
    pub fn new(tx: UnboundedSender<SyncEvent>) -> Self {
        Self {
            tx,
            keyboard_type: Cell::new(KeyboardType::default()),
            selection_active: Cell::new(false),
        }
    }

    pub fn keyboard_type(&self) -> KeyboardType {
        self.keyboard_type.get()
    }

    pub fn set_keyboard_type(&self, keyboard_type: KeyboardType) {
        self.keyboard_type.set(keyboard_type);
    }

    pub fn selection_active(&self) -> bool {
        self.selection_active.get()
    }

    pub fn set_selection_active(&self, active: bool) {
        self.selection_active.set(active);
    }

    /// Handles an editor action reported by the input method. Returns `true`
    /// if the action was handled.
    pub fn on_editor_action(&self, action: ImeAction) -> bool {
        debug!(?action, "Editor action");
        if action == ImeAction::Done {
            self.send(SyncEvent::Enter);
            true
        } else {
            false
        }
    }

    fn send(&self, event: SyncEvent) {
        if self.tx.send(event).is_err() {
            trace!(?event, "Engine sync channel closed, dropping event");
        }
    }

    fn forwards_char(&self, c: char) -> bool {
        match c {
            // Return is reported through the editor action instead.
            '\n' => self.keyboard_type() == KeyboardType::Multiline,
            '\t' => false,
            _ => true,
        }
    }
}

impl TextWatcher for TextChangeForwarder {
    fn on_text_changed(&self, change: &TextChange) {
        trace!(?change, "Forwarding text change");

        for _ in change.removed.chars() {
            self.send(SyncEvent::Backspace);
            if self.selection_active.replace(false) {
                break;
            }
        }

        for c in change.inserted.chars().filter(|&c| self.forwards_char(c)) {
            self.send(SyncEvent::Char(c));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use ::pretty_assertions::assert_eq;
    use ::tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver};

    fn forwarder() -> (TextChangeForwarder, UnboundedReceiver<SyncEvent>) {
        let (tx, rx) = unbounded_channel();
        (TextChangeForwarder::new(tx), rx)
    }

    fn drain(rx: &mut UnboundedReceiver<SyncEvent>) -> Vec<SyncEvent> {
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }
        events
    }

    fn change(start: usize, removed: &str, inserted: &str) -> TextChange {
        TextChange {
            start,
            removed: removed.to_owned(),
            inserted: inserted.to_owned(),
        }
    }

    #[test]
    fn test_insertion() {
        let (fwd, mut rx) = forwarder();

        fwd.on_text_changed(&change(0, "", "hi"));

        assert_eq!(drain(&mut rx), [SyncEvent::Char('h'), SyncEvent::Char('i')]);
    }

    #[test]
    fn test_deletion_without_selection() {
        let (fwd, mut rx) = forwarder();

        fwd.on_text_changed(&change(2, "abc", ""));

        assert_eq!(drain(&mut rx), [SyncEvent::Backspace; 3]);
    }

    #[test]
    fn test_deletion_with_selection_is_single_backspace() {
        let (fwd, mut rx) = forwarder();
        fwd.set_selection_active(true);

        fwd.on_text_changed(&change(2, "llo w", "X"));

        assert_eq!(drain(&mut rx), [SyncEvent::Backspace, SyncEvent::Char('X')]);
        assert!(!fwd.selection_active());

        // The selection is gone now, later deletions are per character.
        fwd.on_text_changed(&change(1, "eX", ""));
        assert_eq!(drain(&mut rx), [SyncEvent::Backspace; 2]);
    }

    #[test]
    fn test_newline_only_forwarded_for_multiline() {
        let (fwd, mut rx) = forwarder();

        fwd.on_text_changed(&change(0, "", "a\n\tb"));
        assert_eq!(drain(&mut rx), [SyncEvent::Char('a'), SyncEvent::Char('b')]);

        fwd.set_keyboard_type(KeyboardType::Multiline);
        fwd.on_text_changed(&change(0, "", "a\n\tb"));
        assert_eq!(
            drain(&mut rx),
            [
                SyncEvent::Char('a'),
                SyncEvent::Char('\n'),
                SyncEvent::Char('b')
            ]
        );
    }

    #[test]
    fn test_done_action() {
        let (fwd, mut rx) = forwarder();

        assert!(fwd.on_editor_action(ImeAction::Done));
        assert!(!fwd.on_editor_action(ImeAction::Next));
        assert_eq!(drain(&mut rx), [SyncEvent::Enter]);
    }

    #[test]
    fn test_closed_channel_is_ignored() {
        let (fwd, rx) = forwarder();
        drop(rx);

        fwd.on_text_changed(&change(0, "", "x"));
        assert!(fwd.on_editor_action(ImeAction::Done));
    }
}
