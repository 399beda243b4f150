//! Server application core modules.
//!
//! Persistence, request handling and collaborator plumbing around the pure [`crate::engine`].
//! Repositories in [`data`] own every database query, [`service`] composes them with the engine
//! inside transactions, and [`controller`] exposes the services over HTTP.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod calendar;
pub mod config;
pub mod controller;
pub mod data;
pub mod error;
pub mod model;
pub mod router;
pub mod service;
pub mod startup;
