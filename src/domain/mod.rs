pub mod models;
pub mod action;
pub mod reducer;
pub mod errors;

pub use models::*;
pub use action::*;
pub use reducer::*;
pub use errors::*;
