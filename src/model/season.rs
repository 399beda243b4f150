use std::{fmt, str::FromStr};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    engine::{error::ValidationError, ranking::PodiumFlags, standings::PointsConfig},
    model::tournament::TournamentId,
};

pub type SeasonId = i32;

/// Competition format of a season.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum Format {
    /// Round-robin: every team plays every other team once.
    League,
    /// Single elimination.
    Cup,
    /// Upper and lower bracket; a team is out after two losses.
    DoubleElimination,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::League => "league",
            Self::Cup => "cup",
            Self::DoubleElimination => "double_elimination",
        }
    }

    /// Cup and double elimination are bracket formats.
    pub fn is_bracket(&self) -> bool {
        !matches!(self, Self::League)
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Format {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "league" => Ok(Self::League),
            "cup" => Ok(Self::Cup),
            "double_elimination" => Ok(Self::DoubleElimination),
            other => Err(ValidationError::UnknownFormat(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum PriorityMode {
    #[default]
    None,
    Highest,
    Lowest,
}

impl PriorityMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Highest => "highest",
            Self::Lowest => "lowest",
        }
    }
}

impl fmt::Display for PriorityMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PriorityMode {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "none" | "" => Ok(Self::None),
            "highest" => Ok(Self::Highest),
            "lowest" => Ok(Self::Lowest),
            other => Err(ValidationError::UnknownPriorityMode(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum SeasonStatus {
    #[default]
    Draft,
    Active,
    Completed,
}

impl SeasonStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }
}

impl fmt::Display for SeasonStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SeasonStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "draft" => Ok(Self::Draft),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(ValidationError::UnknownSeasonStatus(other.to_string())),
        }
    }
}

/// One instance of a competition within a tournament.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct Season {
    pub id: SeasonId,
    pub tournament_id: TournamentId,
    pub name: String,
    pub format: Format,
    /// Points awarded for a win (league only)
    pub points_win: i32,
    /// Points awarded for a draw (league only)
    pub points_draw: i32,
    /// Points awarded for a loss (league only)
    pub points_loss: i32,
    /// Only meaningful for bracket formats
    pub priority_mode: PriorityMode,
    pub status: SeasonStatus,
    pub show_champion: bool,
    pub show_loser: bool,
    pub champion_label: String,
    pub loser_label: String,
    pub created_at: DateTime<Utc>,
}

impl Season {
    pub const DEFAULT_CHAMPION_LABEL: &'static str = "Champion";
    pub const DEFAULT_LOSER_LABEL: &'static str = "Last Place";

    pub fn points(&self) -> PointsConfig {
        PointsConfig {
            win: self.points_win,
            draw: self.points_draw,
            loss: self.points_loss,
        }
    }

    pub fn podium_flags(&self) -> PodiumFlags {
        PodiumFlags {
            show_champion: self.show_champion,
            show_loser: self.show_loser,
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == SeasonStatus::Completed
    }

    /// Checks settings that only make sense for some formats.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.format == Format::League && self.priority_mode != PriorityMode::None {
            return Err(ValidationError::PriorityModeOnLeague(self.priority_mode));
        }

        Ok(())
    }
}
