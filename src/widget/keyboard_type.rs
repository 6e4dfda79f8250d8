//! Virtual keyboard types and their platform input configuration.

use ::lazy_static::lazy_static;
use ::maplit::hashmap;
use ::std::{collections::HashMap, fmt, ops::BitOr};
use ::strum::{AsRefStr, EnumIter, FromRepr};

use crate::{
    errors::{Error, Result},
    widget::filter::{CharacterFilter, NumericLocale},
};

/// The virtual keyboard the engine requests for a text field.
///
/// The ordinals are shared with the engine's own keyboard type enumeration
/// and must never be renumbered without a matching update on the engine side.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, AsRefStr, EnumIter, FromRepr)]
#[repr(i32)]
pub enum KeyboardType {
    #[default]
    Default = 0,
    Multiline = 1,
    Number = 2,
    NumberDecimal = 3,
    Phone = 4,
    EmailAddress = 5,
    Password = 6,
    Url = 7,
}

impl KeyboardType {
    /// The ordinal shared with the engine.
    pub const fn ordinal(self) -> i32 {
        self as i32
    }

    /// The platform input type for this keyboard type.
    pub fn input_type(self) -> InputType {
        INPUT_TYPES[&self]
    }

    /// The complete input configuration to apply to the text input widget:
    /// the platform input type, plus an accepted character filter for
    /// [`KeyboardType::NumberDecimal`].
    ///
    /// The numeric filter uses the separators of `locale` where given, and a
    /// fixed set of digits, separators, sign and space otherwise.
    pub fn input_config(self, locale: Option<&NumericLocale>) -> InputConfig {
        let character_filter = match self {
            Self::NumberDecimal => Some(match locale {
                Some(locale) => CharacterFilter::decimal_digits(locale),
                None => CharacterFilter::fixed_decimal_digits(),
            }),
            _ => None,
        };

        InputConfig {
            input_type: self.input_type(),
            character_filter,
        }
    }
}

impl TryFrom<i32> for KeyboardType {
    type Error = Error;

    fn try_from(ordinal: i32) -> Result<Self> {
        Self::from_repr(ordinal).ok_or(Error::UnknownKeyboardType(ordinal))
    }
}

impl fmt::Display for KeyboardType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_ref())
    }
}

/// Platform input type: an input class in the low bits, combined with class
/// specific variation and flag bits.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct InputType(u32);

impl InputType {
    pub const CLASS_MASK: u32 = 0xf;

    pub const TYPE_CLASS_TEXT: Self = Self(0x1);
    pub const TYPE_CLASS_NUMBER: Self = Self(0x2);
    pub const TYPE_CLASS_PHONE: Self = Self(0x3);

    pub const TYPE_TEXT_VARIATION_URI: Self = Self(0x10);
    pub const TYPE_TEXT_VARIATION_EMAIL_ADDRESS: Self = Self(0x20);
    pub const TYPE_TEXT_VARIATION_PASSWORD: Self = Self(0x80);
    pub const TYPE_TEXT_FLAG_MULTI_LINE: Self = Self(0x20000);

    pub const TYPE_NUMBER_FLAG_SIGNED: Self = Self(0x1000);
    pub const TYPE_NUMBER_FLAG_DECIMAL: Self = Self(0x2000);

    /// The raw platform value.
    pub const fn bits(self) -> u32 {
        self.0
    }

    /// The input class with all variation and flag bits stripped.
    pub const fn class(self) -> Self {
        Self(self.0 & Self::CLASS_MASK)
    }

    /// Returns `true` if all bits of `other` are set.
    pub const fn contains(self, other: Self) -> bool {
        self.0 & other.0 == other.0
    }
}

impl BitOr for InputType {
    type Output = Self;

    fn bitor(self, rhs: Self) -> Self {
        Self(self.0 | rhs.0)
    }
}

impl fmt::Debug for InputType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InputType({:#x})", self.0)
    }
}

/// Everything the text input widget needs to know about a keyboard type.
/// Applied to the widget in a single step so type and filter never disagree.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InputConfig {
    pub input_type: InputType,
    pub character_filter: Option<CharacterFilter>,
}

lazy_static! {
    /// The one mapping from keyboard type to platform input type.
    static ref INPUT_TYPES: HashMap<KeyboardType, InputType> = hashmap! {
        KeyboardType::Default => InputType::TYPE_CLASS_TEXT,
        KeyboardType::Multiline => {
            InputType::TYPE_CLASS_TEXT | InputType::TYPE_TEXT_FLAG_MULTI_LINE
        },
        KeyboardType::Number => InputType::TYPE_CLASS_NUMBER,
        KeyboardType::NumberDecimal => InputType::TYPE_CLASS_NUMBER
            | InputType::TYPE_NUMBER_FLAG_SIGNED
            | InputType::TYPE_NUMBER_FLAG_DECIMAL,
        KeyboardType::Phone => InputType::TYPE_CLASS_PHONE,
        KeyboardType::EmailAddress => {
            InputType::TYPE_CLASS_TEXT | InputType::TYPE_TEXT_VARIATION_EMAIL_ADDRESS
        },
        KeyboardType::Password => {
            InputType::TYPE_CLASS_TEXT | InputType::TYPE_TEXT_VARIATION_PASSWORD
        },
        KeyboardType::Url => InputType::TYPE_CLASS_TEXT | InputType::TYPE_TEXT_VARIATION_URI,
    };
}
