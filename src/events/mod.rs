//! Event handling for Sweepy.
//!
//! Terminal key and mouse events are turned into store actions, taking the
//! current view and input mode into account.

mod handler;
mod input;

pub use handler::EventHandler;
pub use input::{InputEvent, Key, Modifiers};
