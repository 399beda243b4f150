use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    engine::error::ValidationError,
    model::{season::SeasonId, team::TeamId},
};

pub type MatchId = i32;

/// Lifecycle state of a match.
///
/// The canonical string forms are `scheduled`, `in_progress` and `completed`. Older
/// stored or submitted values may use `ongoing`; [`FromStr`] accepts it and yields
/// [`MatchStatus::InProgress`], while [`MatchStatus::as_str`] never emits it.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum MatchStatus {
    #[default]
    Scheduled,
    InProgress,
    Completed,
}

impl MatchStatus {
    const LEGACY_IN_PROGRESS: &'static str = "ongoing";

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Scheduled => "scheduled",
            Self::InProgress => "in_progress",
            Self::Completed => "completed",
        }
    }

    /// Scores may only be written while a match is being played or being finished.
    pub fn allows_score(&self) -> bool {
        matches!(self, Self::InProgress | Self::Completed)
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MatchStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(Self::Scheduled),
            "in_progress" | Self::LEGACY_IN_PROGRESS => Ok(Self::InProgress),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError::UnknownMatchStatus(other.to_string())),
        }
    }
}

/// Bracket tag used by double-elimination seasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum BracketPosition {
    Upper,
    Lower,
}

impl BracketPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Upper => "upper",
            Self::Lower => "lower",
        }
    }
}

impl fmt::Display for BracketPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BracketPosition {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "upper" => Ok(Self::Upper),
            "lower" => Ok(Self::Lower),
            other => Err(ValidationError::UnknownBracketPosition(other.to_string())),
        }
    }
}

/// A persisted match.
///
/// `team1_id`/`team2_id` are `None` while a bracket slot is unresolved ("TBD"). A
/// `winner_id` of `None` on a scored match means a draw.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct Match {
    pub id: MatchId,
    pub season_id: SeasonId,
    pub round: i32,
    pub match_number: i32,
    pub bracket_position: Option<BracketPosition>,
    pub team1_id: Option<TeamId>,
    pub team2_id: Option<TeamId>,
    pub team1_score: Option<i32>,
    pub team2_score: Option<i32>,
    pub winner_id: Option<TeamId>,
    pub status: MatchStatus,
    pub scheduled_at: Option<DateTime<Utc>>,
    /// Opaque reference owned by the calendar collaborator
    pub calendar_event_id: Option<String>,
    pub calendar_provider: Option<String>,
}

impl Match {
    pub fn is_completed(&self) -> bool {
        self.status == MatchStatus::Completed
    }

    /// Both scores, when both are present.
    pub fn scores(&self) -> Option<(i32, i32)> {
        Some((self.team1_score?, self.team2_score?))
    }

    /// Both participants, when both slots are resolved.
    pub fn participants(&self) -> Option<(TeamId, TeamId)> {
        Some((self.team1_id?, self.team2_id?))
    }

    /// The participant that did not win, if the match has a winner.
    pub fn loser_id(&self) -> Option<TeamId> {
        let winner = self.winner_id?;
        let (team1, team2) = self.participants()?;

        if winner == team1 {
            Some(team2)
        } else {
            Some(team1)
        }
    }

    pub fn involves(&self, team_id: TeamId) -> bool {
        self.team1_id == Some(team_id) || self.team2_id == Some(team_id)
    }
}

/// A match produced by the schedule generator, not yet persisted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct NewMatch {
    pub season_id: SeasonId,
    pub round: i32,
    pub match_number: i32,
    pub bracket_position: Option<BracketPosition>,
    pub team1_id: Option<TeamId>,
    pub team2_id: Option<TeamId>,
    pub status: MatchStatus,
}

impl NewMatch {
    pub fn pairing(&self) -> (Option<TeamId>, Option<TeamId>) {
        (self.team1_id, self.team2_id)
    }
}
