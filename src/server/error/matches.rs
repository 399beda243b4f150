use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{model::matches::MatchId, server::error::ClientError};

#[derive(Error, Debug)]
pub enum MatchError {
    #[error("Match {0} not found")]
    NotFound(MatchId),
}

impl IntoResponse for MatchError {
    fn into_response(self) -> Response {
        match self {
            Self::NotFound(_) => ClientError(StatusCode::NOT_FOUND, self).into_response(),
        }
    }
}
