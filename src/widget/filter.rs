//! Input constraints installed on the text input widget: a total length limit
//! and an accepted character set.

use ::std::collections::BTreeSet;

/// Bound on the total text length, in characters.
///
/// Exactly one of the two variants is installed at any time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LengthLimit {
    #[default]
    Unlimited,
    /// At most this many characters. Never zero.
    Max(usize),
}

impl LengthLimit {
    /// Interprets a length as sent by the engine, where zero and negative
    /// values mean "no limit".
    pub fn from_engine(max_input_length: i64) -> Self {
        if max_input_length <= 0 {
            Self::Unlimited
        } else {
            Self::Max(max_input_length as usize)
        }
    }

    /// The number of leading characters of an insertion of `inserting`
    /// characters which fit, given a destination of `dest_len` characters of
    /// which `replacing` are about to be replaced.
    pub fn accepted_len(&self, dest_len: usize, replacing: usize, inserting: usize) -> usize {
        match *self {
            Self::Unlimited => inserting,
            Self::Max(max) => {
                let remaining_after_replace = dest_len.saturating_sub(replacing);
                max.saturating_sub(remaining_after_replace).min(inserting)
            }
        }
    }
}

/// Locale specific separators for numeric input.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct NumericLocale {
    pub decimal_separator: char,
    pub grouping_separator: char,
    pub minus_sign: char,
}

impl Default for NumericLocale {
    fn default() -> Self {
        Self {
            decimal_separator: '.',
            grouping_separator: ',',
            minus_sign: '-',
        }
    }
}

/// A set of characters the widget accepts from user input. Everything else is
/// dropped before it reaches the text buffer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CharacterFilter {
    accepted: BTreeSet<char>,
}

impl CharacterFilter {
    /// Accepted set used for decimal input when no locale information is
    /// available.
    pub const FIXED_DECIMAL_CHARS: &'static str = "0123456789,.- ";

    /// Accepts exactly the characters in `chars`.
    pub fn new(chars: impl IntoIterator<Item = char>) -> Self {
        Self {
            accepted: chars.into_iter().collect(),
        }
    }

    /// Digits, the locale's separators and minus sign, and space.
    pub fn decimal_digits(locale: &NumericLocale) -> Self {
        Self::new(('0'..='9').chain([
            locale.decimal_separator,
            locale.grouping_separator,
            locale.minus_sign,
            ' ',
        ]))
    }

    /// Digits, comma, period, minus and space.
    pub fn fixed_decimal_digits() -> Self {
        Self::new(Self::FIXED_DECIMAL_CHARS.chars())
    }

    pub fn accepts(&self, c: char) -> bool {
        self.accepted.contains(&c)
    }

    /// Drops every character which is not accepted.
    pub fn filter(&self, text: &str) -> String {
        text.chars().filter(|&c| self.accepts(c)).collect()
    }
}
