//! todolist - Terminal Todo List Library
//!
//! A terminal todo list built around a pure reducer: every add, done or
//! delete gesture becomes an action that produces a new list snapshot.

pub mod domain;
pub mod application;
pub mod infrastructure;
pub mod presentation;

pub use domain::*;
pub use application::*;
