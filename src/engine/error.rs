use thiserror::Error;

use crate::model::{matches::MatchId, season::PriorityMode, team::TeamId};

/// Input rejected by the engine.
///
/// Every variant renders a human-readable reason. Rejection never has a partial effect: the
/// engine works on values it owns and returns nothing on failure.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("At least 2 distinct teams are required to generate a schedule, found {0}")]
    TooFewTeams(usize),
    #[error("Unknown season format: {0:?}")]
    UnknownFormat(String),
    #[error("Unknown match status: {0:?}")]
    UnknownMatchStatus(String),
    #[error("Unknown season status: {0:?}")]
    UnknownSeasonStatus(String),
    #[error("Unknown priority mode: {0:?}")]
    UnknownPriorityMode(String),
    #[error("Unknown hall kind: {0:?}, expected \"fame\" or \"shame\"")]
    UnknownHallKind(String),
    #[error("Unknown bracket position: {0:?}")]
    UnknownBracketPosition(String),
    #[error("Scores cannot be set while the match is scheduled, start the match first")]
    ScoreWhileScheduled,
    #[error("Scores cannot be set until both teams of the match are known")]
    UnresolvedParticipants,
    #[error("Scores cannot be negative, got {0}")]
    NegativeScore(i32),
    #[error("Team {0} cannot play against itself")]
    SameTeamBothSides(TeamId),
    #[error("Bracket match {match_id} ended in a draw, a winner is required to advance")]
    BracketDraw { match_id: MatchId },
    #[error(
        "Bracket match {match_id} no longer matches the results feeding it, correct or reset \
         the later rounds first"
    )]
    BracketOutOfSync { match_id: MatchId },
    #[error("Priority mode {0:?} is only available for cup and double elimination seasons")]
    PriorityModeOnLeague(PriorityMode),
    #[error("At least one team is required to build preview buckets")]
    NoTeamBuckets,
    #[error("At least one person must be selected to build preview buckets")]
    NoPeopleSelected,
}
