//! Tournament scheduling and standings.
//!
//! The crate is split into three layers:
//! - [`model`] holds the typed domain records shared by every layer and the API DTOs.
//! - [`engine`] is the pure core: schedule generation, bracket progression, the match
//!   lifecycle, standings aggregation and ranking queries. It performs no I/O.
//! - `server` (feature `server`) persists the records with sea-orm and exposes the engine
//!   through services and an axum router.

pub mod engine;
pub mod model;

#[cfg(feature = "server")]
pub mod server;
