//! Infrastructure layer providing external service integrations.
//!
//! Configuration files, log output and headless action scripts.

pub mod config;
pub mod logging;
pub mod script;

pub use config::*;
pub use logging::*;
pub use script::*;
