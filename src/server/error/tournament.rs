use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{model::tournament::TournamentId, server::error::ClientError};

#[derive(Error, Debug)]
pub enum TournamentError {
    #[error("Tournament {0} not found")]
    NotFound(TournamentId),
}

impl IntoResponse for TournamentError {
    fn into_response(self) -> Response {
        ClientError(StatusCode::NOT_FOUND, self).into_response()
    }
}
