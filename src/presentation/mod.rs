//! Presentation layer handling terminal UI and user input.
//!
//! Renders the current snapshot with ratatui and turns key presses into
//! gestures on the application state.

pub mod ui;
pub mod input;

pub use ui::*;
pub use input::*;
