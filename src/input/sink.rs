//! The engine side of the bridge: where routed key events end up, and where
//! focus returns once the soft keyboard is dismissed.

use crate::input::keyboard::KeyEvent;

/// The engine's input queue.
///
/// Events are offered to the sink synchronously on the UI thread. The sink
/// reports whether it consumed the event; an unconsumed event may still be
/// handled by the text input widget.
pub trait InputSink {
    /// Offer a key press to the engine. Returns `true` if it was consumed.
    fn on_key_down(&mut self, event: &KeyEvent) -> bool;

    /// Offer a key release to the engine. Returns `true` if it was consumed.
    fn on_key_up(&mut self, event: &KeyEvent) -> bool;

    /// The engine's own view on whether a physical keyboard is attached. This
    /// is consulted in addition to the platform configuration, as some input
    /// devices are only recognised by the engine's input layer.
    fn has_hardware_keyboard(&self) -> bool;
}

/// The engine's primary render surface, which doubles as the input sink.
pub trait RenderView: InputSink {
    /// Move input focus back to the render surface.
    fn request_focus(&mut self);
}

/// The kind of keyboard the platform configuration reports.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum KeyboardKind {
    #[default]
    Undefined,
    NoKeys,
    Qwerty,
    TwelveKey,
}

/// Whether the platform considers the hardware keyboard hidden, e.g. a slide
/// out keyboard which is closed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HardKeyboardHidden {
    #[default]
    Undefined,
    No,
    Yes,
}

/// Snapshot of the keyboard related parts of the platform configuration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct KeyboardConfiguration {
    pub keyboard: KeyboardKind,
    pub hard_keyboard_hidden: HardKeyboardHidden,
}

impl KeyboardConfiguration {
    /// A configuration with only the on-screen keyboard available.
    pub const SOFT_ONLY: Self = Self {
        keyboard: KeyboardKind::NoKeys,
        hard_keyboard_hidden: HardKeyboardHidden::Yes,
    };

    /// A configuration with an attached, visible physical keyboard.
    pub const HARDWARE: Self = Self {
        keyboard: KeyboardKind::Qwerty,
        hard_keyboard_hidden: HardKeyboardHidden::No,
    };

    /// Returns `true` if the platform reports a physical keyboard which is
    /// present and not hidden.
    pub fn reports_hardware_keyboard(&self) -> bool {
        self.keyboard != KeyboardKind::NoKeys && self.hard_keyboard_hidden == HardKeyboardHidden::No
    }
}

/// Returns `true` if a hardware keyboard should be assumed: either the
/// platform configuration reports one, or the engine independently does.
///
/// The engine is only asked when the platform does not already report one.
pub fn has_hardware_keyboard(config: &KeyboardConfiguration, sink: &impl InputSink) -> bool {
    config.reports_hardware_keyboard() || sink.has_hardware_keyboard()
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sink {
        hardware: bool,
    }

    impl InputSink for Sink {
        fn on_key_down(&mut self, _: &KeyEvent) -> bool {
            false
        }

        fn on_key_up(&mut self, _: &KeyEvent) -> bool {
            false
        }

        fn has_hardware_keyboard(&self) -> bool {
            self.hardware
        }
    }

    #[test]
    fn test_platform_configuration() {
        assert!(KeyboardConfiguration::HARDWARE.reports_hardware_keyboard());
        assert!(!KeyboardConfiguration::SOFT_ONLY.reports_hardware_keyboard());
        assert!(!KeyboardConfiguration::default().reports_hardware_keyboard());

        // A keyboard which exists but is slid closed does not count.
        assert!(!KeyboardConfiguration {
            keyboard: KeyboardKind::Qwerty,
            hard_keyboard_hidden: HardKeyboardHidden::Yes,
        }
        .reports_hardware_keyboard());

        // Visible, but the platform reports no keys at all.
        assert!(!KeyboardConfiguration {
            keyboard: KeyboardKind::NoKeys,
            hard_keyboard_hidden: HardKeyboardHidden::No,
        }
        .reports_hardware_keyboard());
    }

    #[test]
    fn test_engine_override() {
        let engine_sees_keyboard = Sink { hardware: true };
        let engine_sees_nothing = Sink { hardware: false };

        assert!(has_hardware_keyboard(
            &KeyboardConfiguration::SOFT_ONLY,
            &engine_sees_keyboard
        ));
        assert!(has_hardware_keyboard(
            &KeyboardConfiguration::HARDWARE,
            &engine_sees_nothing
        ));
        assert!(!has_hardware_keyboard(
            &KeyboardConfiguration::SOFT_ONLY,
            &engine_sees_nothing
        ));
    }
}
