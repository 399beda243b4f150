//! Error types for the tournament server.
//!
//! Each domain has its own `thiserror` enum with an `IntoResponse` mapping, and [`Error`]
//! aggregates them so services and controllers can use `?` throughout. Engine rejections map to
//! 400, missing records to 404, conflicting writes to 409 and everything else to a logged 500.

pub mod config;
pub mod matches;
pub mod retry;
pub mod season;
pub mod team;
pub mod tournament;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    engine::ValidationError,
    model::api::ErrorDto,
    server::error::{
        config::ConfigError, matches::MatchError, season::SeasonError, team::TeamError,
        tournament::TournamentError,
    },
};

/// Main error type for the tournament server.
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// The engine rejected the input; never has a partial effect.
    #[error(transparent)]
    ValidationError(#[from] ValidationError),
    #[error(transparent)]
    TournamentError(#[from] TournamentError),
    #[error(transparent)]
    SeasonError(#[from] SeasonError),
    #[error(transparent)]
    MatchError(#[from] MatchError),
    #[error(transparent)]
    TeamError(#[from] TeamError),
    /// Internal error indicating a bug in the server's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::ValidationError(err) => {
                tracing::debug!("Rejected request: {}", err);

                ClientError(StatusCode::BAD_REQUEST, err).into_response()
            }
            Self::TournamentError(err) => err.into_response(),
            Self::SeasonError(err) => err.into_response(),
            Self::MatchError(err) => err.into_response(),
            Self::TeamError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Responds with `status` and the error's message as the body.
pub struct ClientError<E>(pub StatusCode, pub E);

impl<E: std::fmt::Display> IntoResponse for ClientError<E> {
    fn into_response(self) -> Response {
        (
            self.0,
            Json(ErrorDto {
                error: self.1.to_string(),
            }),
        )
            .into_response()
    }
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// The error is logged; the client only receives a generic message.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
