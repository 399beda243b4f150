//! HTTP controller endpoints for the tournament API.
//!
//! Controllers extract the request, build the matching service from [`AppState`] and map the
//! result to a JSON response. Errors are converted by [`Error`](crate::server::error::Error)'s
//! `IntoResponse` implementation. Every handler carries a utoipa annotation for the OpenAPI
//! document served at `/api/docs`.
//!
//! [`AppState`]: crate::server::model::app::AppState

pub mod hall;
pub mod matches;
pub mod season;
pub mod team;
pub mod tournament;
