//! The platform text input widget and the soft keyboard sessions opened on
//! it.

mod builder;
pub mod connection;
pub mod filter;
mod headless;
pub mod keyboard_type;
pub mod session;
mod soft_keyboard;
pub mod surface;
mod watcher;

pub use builder::*;
pub use connection::{InputConnection, TracingInputConnection};
pub use filter::{CharacterFilter, LengthLimit, NumericLocale};
pub use headless::*;
pub use keyboard_type::{InputConfig, InputType, KeyboardType};
pub use soft_keyboard::*;
pub use surface::{ImeAction, ImeOptions, TextChange, TextInputSurface, TextWatcher};
pub use watcher::*;
