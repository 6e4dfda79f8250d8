//! Platform key codes.

use ::std::fmt;

/// Declares the named platform key codes along with a lookup table used for
/// debug output and exhaustive iteration.
macro_rules! key_codes {
    ($($(#[$meta:meta])* $name:ident = $value:literal,)*) => {
        impl KeyCode {
            $(
                $(#[$meta])*
                pub const $name: KeyCode = KeyCode($value);
            )*

            /// Every key code which has a name in the platform vocabulary.
            pub const NAMED: &'static [KeyCode] = &[$(KeyCode::$name),*];

            /// Returns the platform name of the key code, if it has one.
            pub const fn name(self) -> Option<&'static str> {
                match self.0 {
                    $($value => Some(stringify!($name)),)*
                    _ => None,
                }
            }
        }
    };
}

/// A platform virtual key code.
///
/// Key codes are an open set: hardware and newer platform versions may deliver
/// values which have no named constant here. Those remain valid key codes and
/// are routed like any other unnamed key.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KeyCode(i32);

key_codes! {
    UNKNOWN = 0,
    SOFT_LEFT = 1,
    SOFT_RIGHT = 2,
    HOME = 3,
    /// The system back key.
    BACK = 4,
    CALL = 5,
    ENDCALL = 6,
    NUM_0 = 7,
    NUM_1 = 8,
    NUM_2 = 9,
    NUM_3 = 10,
    NUM_4 = 11,
    NUM_5 = 12,
    NUM_6 = 13,
    NUM_7 = 14,
    NUM_8 = 15,
    NUM_9 = 16,
    STAR = 17,
    POUND = 18,
    DPAD_UP = 19,
    DPAD_DOWN = 20,
    DPAD_LEFT = 21,
    DPAD_RIGHT = 22,
    DPAD_CENTER = 23,
    VOLUME_UP = 24,
    VOLUME_DOWN = 25,
    POWER = 26,
    CAMERA = 27,
    CLEAR = 28,
    A = 29,
    B = 30,
    C = 31,
    D = 32,
    E = 33,
    F = 34,
    G = 35,
    H = 36,
    I = 37,
    J = 38,
    K = 39,
    L = 40,
    M = 41,
    N = 42,
    O = 43,
    P = 44,
    Q = 45,
    R = 46,
    S = 47,
    T = 48,
    U = 49,
    V = 50,
    W = 51,
    X = 52,
    Y = 53,
    Z = 54,
    COMMA = 55,
    PERIOD = 56,
    ALT_LEFT = 57,
    ALT_RIGHT = 58,
    SHIFT_LEFT = 59,
    SHIFT_RIGHT = 60,
    TAB = 61,
    SPACE = 62,
    SYM = 63,
    EXPLORER = 64,
    ENVELOPE = 65,
    ENTER = 66,
    /// Backspace.
    DEL = 67,
    GRAVE = 68,
    MINUS = 69,
    EQUALS = 70,
    LEFT_BRACKET = 71,
    RIGHT_BRACKET = 72,
    BACKSLASH = 73,
    SEMICOLON = 74,
    APOSTROPHE = 75,
    SLASH = 76,
    AT = 77,
    NUM = 78,
    HEADSETHOOK = 79,
    FOCUS = 80,
    PLUS = 81,
    MENU = 82,
    NOTIFICATION = 83,
    SEARCH = 84,
    PAGE_UP = 92,
    PAGE_DOWN = 93,
    ESCAPE = 111,
    /// Delete, as opposed to [`KeyCode::DEL`] which is backspace.
    FORWARD_DEL = 112,
    CTRL_LEFT = 113,
    CTRL_RIGHT = 114,
    CAPS_LOCK = 115,
    SCROLL_LOCK = 116,
    META_LEFT = 117,
    META_RIGHT = 118,
    FUNCTION = 119,
    SYSRQ = 120,
    BREAK = 121,
    MOVE_HOME = 122,
    MOVE_END = 123,
    INSERT = 124,
    F1 = 131,
    F2 = 132,
    F3 = 133,
    F4 = 134,
    F5 = 135,
    F6 = 136,
    F7 = 137,
    F8 = 138,
    F9 = 139,
    F10 = 140,
    F11 = 141,
    F12 = 142,
}

impl KeyCode {
    /// Wraps a raw platform key code.
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    /// The raw platform value of the key code.
    pub const fn value(self) -> i32 {
        self.0
    }

    /// Returns `true` for keys which only modify other keys and carry no
    /// character payload of their own.
    pub const fn is_modifier_key(self) -> bool {
        matches!(
            self,
            Self::SHIFT_LEFT
                | Self::SHIFT_RIGHT
                | Self::ALT_LEFT
                | Self::ALT_RIGHT
                | Self::CTRL_LEFT
                | Self::CTRL_RIGHT
                | Self::META_LEFT
                | Self::META_RIGHT
                | Self::SYM
                | Self::NUM
                | Self::FUNCTION
        )
    }

    /// Returns `true` for the four directional pad keys.
    pub const fn is_arrow(self) -> bool {
        matches!(
            self,
            Self::DPAD_UP | Self::DPAD_DOWN | Self::DPAD_LEFT | Self::DPAD_RIGHT
        )
    }

    /// Returns `true` for escape and the system back key.
    pub const fn is_back(self) -> bool {
        matches!(self, Self::ESCAPE | Self::BACK)
    }

    /// Returns `true` for the letters which form the canonical editing
    /// shortcuts when combined with ctrl: select all, undo, redo, cut, copy
    /// and paste.
    pub const fn is_editing_shortcut(self) -> bool {
        matches!(
            self,
            Self::A | Self::Z | Self::Y | Self::X | Self::C | Self::V
        )
    }
}

impl From<i32> for KeyCode {
    fn from(value: i32) -> Self {
        Self(value)
    }
}

impl From<KeyCode> for i32 {
    fn from(key_code: KeyCode) -> Self {
        key_code.0
    }
}

impl fmt::Debug for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.name() {
            Some(name) => write!(f, "{name}"),
            None => write!(f, "KeyCode({})", self.0),
        }
    }
}
