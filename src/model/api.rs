use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};

use crate::{
    engine::{
        error::ValidationError,
        lifecycle::MatchPatch,
        ranking::{Achievement, HallEntry, HallKind, Podium},
        roster::RosterEntry,
    },
    model::{
        matches::{Match, MatchId, MatchStatus},
        person::PersonId,
        season::{Season, SeasonId},
        standing::Standing,
        team::TeamId,
        tournament::Tournament,
    },
};

/// The response when an error occurs with an API request
#[derive(Debug, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Distinguishes an explicit `null` (`Some(None)`) from an absent field (`None`).
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct GenerateScheduleRequest {
    /// Shuffle the season's teams before seeding
    #[serde(default)]
    pub shuffle: bool,
    /// Delete existing matches first instead of failing with a conflict
    #[serde(default)]
    pub regenerate: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ScheduleReportDto {
    pub season_id: SeasonId,
    /// Matches removed before generating, only non-zero on regeneration
    pub deleted_matches: u64,
    pub matches: Vec<Match>,
    pub created_standings: usize,
    /// Teams whose existing standing rows were kept rather than re-created; these rows may no
    /// longer agree with the regenerated schedule
    pub kept_standings: Vec<TeamId>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct ResetReportDto {
    pub season_id: SeasonId,
    pub deleted_matches: u64,
    /// Calendar events that could not be removed; the matches were deleted regardless
    pub calendar_failures: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct AdvanceReportDto {
    pub season_id: SeasonId,
    pub matches: Vec<Match>,
}

/// Partial match update. Omitted fields are left untouched, `null` clears a field.
///
/// `status` accepts the canonical values and the legacy `ongoing`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct UpdateMatchRequest {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    #[cfg_attr(feature = "server", schema(value_type = Option<i32>))]
    pub team1_score: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[cfg_attr(feature = "server", schema(value_type = Option<i32>))]
    pub team2_score: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    #[cfg_attr(feature = "server", schema(value_type = Option<String>, format = DateTime))]
    pub scheduled_at: Option<Option<DateTime<Utc>>>,
    #[serde(default, deserialize_with = "double_option")]
    #[cfg_attr(feature = "server", schema(value_type = Option<i32>))]
    pub team1_id: Option<Option<TeamId>>,
    #[serde(default, deserialize_with = "double_option")]
    #[cfg_attr(feature = "server", schema(value_type = Option<i32>))]
    pub team2_id: Option<Option<TeamId>>,
}

impl TryFrom<UpdateMatchRequest> for MatchPatch {
    type Error = ValidationError;

    fn try_from(request: UpdateMatchRequest) -> Result<Self, Self::Error> {
        let status = request
            .status
            .as_deref()
            .map(str::parse::<MatchStatus>)
            .transpose()?;

        Ok(MatchPatch {
            status,
            team1_score: request.team1_score,
            team2_score: request.team2_score,
            scheduled_at: request.scheduled_at,
            team1_id: request.team1_id,
            team2_id: request.team2_id,
        })
    }
}

/// Result of the calendar side effect of a match update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CalendarOutcome {
    /// Nothing calendar-relevant changed
    NotRequired,
    /// No calendar is configured
    Disabled,
    Synced { event_id: String },
    Removed,
    /// The match was updated but the calendar could not be
    Failed { reason: String },
}

impl CalendarOutcome {
    pub fn is_degraded(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct MatchUpdateDto {
    #[serde(rename = "match")]
    pub updated: Match,
    pub calendar: CalendarOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct DeleteMatchDto {
    pub match_id: MatchId,
    pub calendar: CalendarOutcome,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct StandingsDto {
    pub season_id: SeasonId,
    /// Ranked by points, then goal difference
    pub standings: Vec<Standing>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct SeasonSummaryDto {
    pub season: Season,
    pub standings: Vec<Standing>,
    pub podium: Podium,
    pub next_match: Option<Match>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct TournamentSummaryDto {
    pub tournament: Tournament,
    pub seasons: Vec<Season>,
    pub podium: Podium,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct CalendarSyncDto {
    pub season_id: SeasonId,
    pub synced: usize,
    pub failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct RandomizeTeamsRequest {
    pub team_count: usize,
    #[serde(default)]
    pub entries: Vec<RosterEntry>,
    /// A previously previewed assignment to commit as is; `entries` is ignored when set
    #[serde(default)]
    pub buckets: Option<Vec<Vec<PersonId>>>,
    /// Only build the assignment, do not create or link teams
    #[serde(default)]
    pub preview: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct TeamBucketDto {
    /// 1-based bucket index
    pub index: usize,
    pub name: String,
    pub members: Vec<PersonId>,
    /// The created or reused team, absent in a preview
    pub team_id: Option<TeamId>,
    /// Whether an existing team with the same members was reused
    pub reused: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct RandomizeTeamsDto {
    pub season_id: SeasonId,
    pub buckets: Vec<TeamBucketDto>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::IntoParams))]
#[cfg_attr(feature = "server", into_params(parameter_in = Query))]
pub struct HallOfFameQuery {
    /// `fame` (default) or `shame`
    pub kind: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct HallOfFameDto {
    pub kind: HallKind,
    pub entries: Vec<HallEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct AchievementsDto {
    pub team_id: TeamId,
    pub achievements: Vec<Achievement>,
}
