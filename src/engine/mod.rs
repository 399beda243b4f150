//! The scheduling and standings core.
//!
//! Every function in this module is a pure transformation over the values passed in: there is no
//! I/O, no async and no shared state, so it can be called concurrently from any number of
//! requests. Persistence and the guards that make concurrent writes safe live in the server layer.

pub mod bracket;
pub mod error;
pub mod lifecycle;
pub mod ranking;
pub mod roster;
pub mod schedule;
pub mod standings;

pub use error::ValidationError;
