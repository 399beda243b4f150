use serde::{Deserialize, Serialize};

use crate::model::{season::SeasonId, team::TeamId};

/// A team's aggregated record within a league season.
///
/// Standings are derived data: they can always be rebuilt from the season's completed
/// matches, see [`crate::engine::standings::recompute_standings`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct Standing {
    pub team_id: TeamId,
    pub season_id: SeasonId,
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    /// Always `goals_for - goals_against`
    pub goal_difference: i32,
    pub points: i32,
}

impl Standing {
    /// An empty row for a team that has not played yet.
    pub fn zero(season_id: SeasonId, team_id: TeamId) -> Self {
        Self {
            team_id,
            season_id,
            played: 0,
            won: 0,
            drawn: 0,
            lost: 0,
            goals_for: 0,
            goals_against: 0,
            goal_difference: 0,
            points: 0,
        }
    }
}
