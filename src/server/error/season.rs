use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::{model::season::SeasonId, server::error::ClientError};

#[derive(Error, Debug)]
pub enum SeasonError {
    #[error("Season {0} not found")]
    NotFound(SeasonId),
    /// Generating again would duplicate the schedule.
    #[error("Season {0} already has matches, reset or regenerate the schedule instead")]
    ScheduleExists(SeasonId),
    /// The season's revision moved between read and write.
    #[error("Season {season_id} was modified concurrently (expected revision {revision})")]
    StaleRevision { season_id: SeasonId, revision: i32 },
}

impl IntoResponse for SeasonError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::ScheduleExists(_) | Self::StaleRevision { .. } => StatusCode::CONFLICT,
        };

        ClientError(status, self).into_response()
    }
}
