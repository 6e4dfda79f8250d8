//! Crate-specific error and result types.
//!
//! Routing and keyboard session operations never fail. Errors only arise at
//! the integer boundaries where the engine or the platform hands us a raw
//! value which has no counterpart in our strongly-typed vocabulary.

/// Result type returned by the fallible conversions in this crate.
pub type Result<T> = ::std::result::Result<T, Error>;

/// Error type for conversions from raw engine and platform values.
#[derive(Clone, Debug, PartialEq, Eq, ::thiserror::Error)]
pub enum Error {
    /// The engine sent a keyboard type ordinal which is not part of the shared
    /// keyboard type enumeration. Usually indicates the engine's enumeration
    /// was extended without a matching update on this side.
    #[error("unknown virtual keyboard type ordinal {0}")]
    UnknownKeyboardType(i32),

    /// The platform reported an editor action id we do not handle.
    #[error("unknown IME editor action {0:#x}")]
    UnknownImeAction(i32),
}
