//! Bridges a platform text input widget and its soft keyboard to a real-time
//! rendering engine.
//!
//! Two things happen here. Every key event the widget receives is routed
//! either to the engine, to the widget's own editing behaviour, or to the
//! engine first with the widget as a fallback (see [`input::router`]). And
//! when the engine asks for the soft keyboard, the engine's text, cursor and
//! length limit are imported into the widget, with the user's edits replayed
//! back to the engine as [`widget::SyncEvent`]s.
//!
//! The platform is reached only through the [`widget::TextInputSurface`] and
//! [`input::sink::RenderView`] traits. [`widget::HeadlessSurface`] is an
//! in-memory widget for tests and for hosts which draw their own text field.

pub mod errors;
pub mod input;
pub mod widget;

pub use errors::{Error, Result};
