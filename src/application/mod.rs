//! Application layer managing state and user workflows.
//!
//! This module owns the todo store and the UI state around it, and turns
//! user gestures into store actions.

pub mod state;
pub mod store;

pub use state::*;
pub use store::*;
