use sea_orm::DbErr;

use super::{season::SeasonError, Error};

/// Strategy for handling errors in a retry context
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorRetryStrategy {
    /// Retry with exponential backoff
    Retry,
    /// Failed permanently
    Fail,
}

impl Error {
    /// Determine error retry strategy based upon application Error type
    pub fn to_retry_strategy(&self) -> ErrorRetryStrategy {
        match self {
            Self::DbErr(db_err) => match db_err {
                // Pool exhausted or connection dropped, transient
                DbErr::ConnectionAcquire(_) => ErrorRetryStrategy::Retry,
                DbErr::Conn(_) => ErrorRetryStrategy::Retry,

                // Query, type and constraint errors won't resolve by retrying
                _ => ErrorRetryStrategy::Fail,
            },

            // Another writer bumped the season first; re-reading sees its result
            Self::SeasonError(SeasonError::StaleRevision { .. }) => ErrorRetryStrategy::Retry,
            Self::SeasonError(_) => ErrorRetryStrategy::Fail,

            Self::ConfigError(_) => ErrorRetryStrategy::Fail,
            Self::ValidationError(_) => ErrorRetryStrategy::Fail,
            Self::TournamentError(_) => ErrorRetryStrategy::Fail,
            Self::MatchError(_) => ErrorRetryStrategy::Fail,
            Self::TeamError(_) => ErrorRetryStrategy::Fail,
            Self::InternalError(_) => ErrorRetryStrategy::Fail,
        }
    }
}
