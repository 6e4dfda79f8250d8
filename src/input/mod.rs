//! Key events and their routing between the engine and the text input
//! widget.

pub mod keyboard;
pub mod router;
pub mod sink;
