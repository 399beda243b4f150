//! Server application state and request-scoped types.

pub mod app;
pub mod viewer;
