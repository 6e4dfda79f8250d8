//! Adapter for raw platform key events into their strongly-typed Rust
//! counterparts.

use ::deku::prelude::*;

use crate::input::keyboard::KeyCode;

/// Raw platform action value for a key press.
pub const ACTION_DOWN: i32 = 0;
/// Raw platform action value for a key release.
pub const ACTION_UP: i32 = 1;

/// Raw platform meta state bits, as found in [`MetaState`].
pub mod meta {
    pub const SHIFT_ON: i32 = 0x1;
    pub const ALT_ON: i32 = 0x2;
    pub const SYM_ON: i32 = 0x4;
    pub const FUNCTION_ON: i32 = 0x8;
    pub const ALT_LEFT_ON: i32 = 0x10;
    pub const ALT_RIGHT_ON: i32 = 0x20;
    pub const SHIFT_LEFT_ON: i32 = 0x40;
    pub const SHIFT_RIGHT_ON: i32 = 0x80;
    pub const CTRL_ON: i32 = 0x1000;
    pub const CTRL_LEFT_ON: i32 = 0x2000;
    pub const CTRL_RIGHT_ON: i32 = 0x4000;
    pub const META_ON: i32 = 0x10000;
    pub const META_LEFT_ON: i32 = 0x20000;
    pub const META_RIGHT_ON: i32 = 0x40000;
    pub const CAPS_LOCK_ON: i32 = 0x100000;
    pub const NUM_LOCK_ON: i32 = 0x200000;
    pub const SCROLL_LOCK_ON: i32 = 0x400000;
}

/// Whether a key is being pressed or released.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyAction {
    Down,
    Up,
}

/// A key event delivered to the text input widget.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    pub action: KeyAction,
    pub key_code: KeyCode,
    pub meta: MetaState,
    /// The character produced by the key in combination with the meta state,
    /// if any.
    pub unicode_char: Option<char>,
    /// The number of auto-repeats for a held key. Zero for the initial press.
    pub repeat_count: u32,
}

impl KeyEvent {
    /// Adapts a raw platform key event. Returns `None` for actions other than
    /// press and release (e.g. the deprecated "multiple" action).
    pub fn new(action: i32, key_code: i32, meta_state: i32) -> Option<Self> {
        let action = match action {
            ACTION_DOWN => KeyAction::Down,
            ACTION_UP => KeyAction::Up,
            _ => return None,
        };

        Some(Self {
            action,
            key_code: key_code.into(),
            meta: meta_state.into(),
            unicode_char: None,
            repeat_count: 0,
        })
    }

    /// A key press with the given modifier state.
    pub fn down(key_code: KeyCode, meta: MetaState) -> Self {
        Self {
            action: KeyAction::Down,
            key_code,
            meta,
            unicode_char: None,
            repeat_count: 0,
        }
    }

    /// A key release with the given modifier state.
    pub fn up(key_code: KeyCode, meta: MetaState) -> Self {
        Self {
            action: KeyAction::Up,
            ..Self::down(key_code, meta)
        }
    }

    /// Attaches the character the key produces.
    pub fn with_unicode_char(self, c: char) -> Self {
        Self {
            unicode_char: Some(c),
            ..self
        }
    }
}

/// Struct representation of the platform meta state bitfield.
///
/// Bitfield definition follows the platform `KeyEvent.META_*` constants. The
/// generic `*_on` flag is set whenever either the left or right variant of
/// the modifier is held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, DekuRead, DekuWrite)]
#[deku(endian = "big")]
pub struct MetaState {
    /// Bit 22. Scroll lock is toggled on.
    #[deku(pad_bits_before = "9", bits = "1")]
    pub scroll_lock_on: bool,

    /// Bit 21. Num lock is toggled on.
    #[deku(bits = "1")]
    pub num_lock_on: bool,

    /// Bit 20. Caps lock is toggled on.
    #[deku(bits = "1")]
    pub caps_lock_on: bool,

    /// Bit 18.
    #[deku(pad_bits_before = "1", bits = "1")]
    pub meta_right_on: bool,

    /// Bit 17.
    #[deku(bits = "1")]
    pub meta_left_on: bool,

    /// Bit 16. Either meta key is held.
    #[deku(bits = "1")]
    pub meta_on: bool,

    /// Bit 14.
    #[deku(pad_bits_before = "1", bits = "1")]
    pub ctrl_right_on: bool,

    /// Bit 13.
    #[deku(bits = "1")]
    pub ctrl_left_on: bool,

    /// Bit 12. Either ctrl key is held.
    #[deku(bits = "1")]
    pub ctrl_on: bool,

    /// Bit 7.
    #[deku(pad_bits_before = "4", bits = "1")]
    pub shift_right_on: bool,

    /// Bit 6.
    #[deku(bits = "1")]
    pub shift_left_on: bool,

    /// Bit 5.
    #[deku(bits = "1")]
    pub alt_right_on: bool,

    /// Bit 4.
    #[deku(bits = "1")]
    pub alt_left_on: bool,

    /// Bit 3. The function modifier is held.
    #[deku(bits = "1")]
    pub function_on: bool,

    /// Bit 2. The symbol modifier is held.
    #[deku(bits = "1")]
    pub sym_on: bool,

    /// Bit 1. Either alt key is held.
    #[deku(bits = "1")]
    pub alt_on: bool,

    /// Bit 0. Either shift key is held.
    #[deku(bits = "1")]
    pub shift_on: bool,
}

impl MetaState {
    /// No modifiers held, no locks toggled.
    pub const NONE: Self = Self {
        scroll_lock_on: false,
        num_lock_on: false,
        caps_lock_on: false,
        meta_right_on: false,
        meta_left_on: false,
        meta_on: false,
        ctrl_right_on: false,
        ctrl_left_on: false,
        ctrl_on: false,
        shift_right_on: false,
        shift_left_on: false,
        alt_right_on: false,
        alt_left_on: false,
        function_on: false,
        sym_on: false,
        alt_on: false,
        shift_on: false,
    };

    pub fn is_ctrl_pressed(&self) -> bool {
        self.ctrl_on
    }

    pub fn is_alt_pressed(&self) -> bool {
        self.alt_on
    }

    pub fn is_sym_pressed(&self) -> bool {
        self.sym_on
    }

    pub fn is_function_pressed(&self) -> bool {
        self.function_on
    }

    pub fn is_meta_pressed(&self) -> bool {
        self.meta_on
    }

    pub fn is_shift_pressed(&self) -> bool {
        self.shift_on
    }

    /// Returns `true` if any of the modifiers which turn a key into a command
    /// combination is held: alt, ctrl, sym, function or meta. Shift and the
    /// lock keys do not count.
    pub fn has_command_modifier(&self) -> bool {
        self.is_alt_pressed()
            || self.is_ctrl_pressed()
            || self.is_sym_pressed()
            || self.is_function_pressed()
            || self.is_meta_pressed()
    }
}

impl From<i32> for MetaState {
    fn from(meta_state: i32) -> Self {
        Self::from_bytes((&(meta_state as u32).to_be_bytes(), 0))
            .map(|(_, meta)| meta)
            .unwrap_or_default()
    }
}
