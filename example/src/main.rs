// Drives a soft keyboard session against an in-memory text field and prints
// the edits the engine would receive. Run with `RUST_LOG=debug` to see the
// routing decisions and input method calls.

use ::imebridge::{
    input::{
        keyboard::{meta, KeyCode, KeyEvent, MetaState},
        sink::{InputSink, RenderView},
    },
    widget::{Builder, HeadlessSurface, ImeAction, InputConnection, KeyboardType},
};
use ::tracing::info;
use ::tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// Stands in for the engine's render view. Consumes the escape key, as a game
/// would to open its pause menu.
struct RenderSurface;

impl InputSink for RenderSurface {
    fn on_key_down(&mut self, event: &KeyEvent) -> bool {
        info!(key_code = ?event.key_code, "Engine key down");
        event.key_code == KeyCode::ESCAPE
    }

    fn on_key_up(&mut self, event: &KeyEvent) -> bool {
        info!(key_code = ?event.key_code, "Engine key up");
        event.key_code == KeyCode::ESCAPE
    }

    fn has_hardware_keyboard(&self) -> bool {
        false
    }
}

impl RenderView for RenderSurface {
    fn request_focus(&mut self) {
        info!("Render surface focused");
    }
}

#[tokio::main]
pub async fn main() {
    ::tracing_subscriber::registry()
        .with(fmt::layer())
        .with(EnvFilter::from_default_env())
        .init();

    let (mut keyboard, mut sync_events) =
        Builder::new().build(HeadlessSurface::new(), RenderSurface);

    // The engine's text field holds "hello world" with "llo w" selected.
    keyboard.show_keyboard("hello world", KeyboardType::Default, 32, 2, 7);

    // The user types over the selection, then fixes a typo.
    keyboard.surface_mut().type_text("y, wor");
    keyboard.surface_mut().type_text("k");
    keyboard.on_key_down(&KeyEvent::down(KeyCode::DEL, MetaState::NONE));
    keyboard.surface_mut().type_text("ld");

    // The input method commits through its connection.
    {
        let mut conn = keyboard.create_input_connection();
        conn.commit_text("!", 1);
    }

    // Arrow keys reach the engine first, editing shortcuts never do.
    keyboard.on_key_down(&KeyEvent::down(KeyCode::DPAD_LEFT, MetaState::NONE));
    let ctrl = MetaState::from(meta::CTRL_ON | meta::CTRL_LEFT_ON);
    keyboard.on_key_down(&KeyEvent::down(KeyCode::A, ctrl));
    keyboard.on_key_down(&KeyEvent::down(KeyCode::ESCAPE, MetaState::NONE));

    keyboard.on_editor_action(ImeAction::Done);
    keyboard.hide_keyboard();

    info!(text = %keyboard.surface().text(), "Widget text after session");

    // Closes the channel once the last queued event has been read.
    drop(keyboard);
    while let Some(event) = sync_events.recv().await {
        println!("{event:?}");
    }
}
