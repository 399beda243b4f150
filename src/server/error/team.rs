use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{
    model::{person::PersonId, team::TeamId},
    server::error::ClientError,
};

#[derive(Error, Debug)]
pub enum TeamError {
    #[error("Team {0} not found")]
    NotFound(TeamId),
    #[error("Person {0} not found")]
    PersonNotFound(PersonId),
}

impl IntoResponse for TeamError {
    fn into_response(self) -> Response {
        ClientError(StatusCode::NOT_FOUND, self).into_response()
    }
}
