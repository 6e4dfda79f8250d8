//! Key codes, modifier state and key events as delivered by the platform.

mod codes;
mod event;

pub use codes::*;
pub use event::*;
