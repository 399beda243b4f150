//! Selection queries over standings and matches used by presentation layers.

use std::{
    collections::{HashMap, HashSet},
    fmt,
    str::FromStr,
};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{
    engine::{error::ValidationError, standings::rank},
    model::{
        matches::Match,
        person::{Person, PersonId},
        season::{Season, SeasonId},
        standing::Standing,
        team::{Team, TeamId, TeamMembership},
        tournament::Tournament,
    },
};

/// Number of people listed in a hall of fame or shame.
pub const HALL_SIZE: usize = 4;

/// Display switches for champion and last place.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PodiumFlags {
    pub show_champion: bool,
    pub show_loser: bool,
}

/// Champion and last place of one season, each present only when shown.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct Podium {
    pub season_id: Option<SeasonId>,
    pub champion: Option<Standing>,
    pub last_place: Option<Standing>,
}

/// Who is looking. Anonymous viewers never see private teams or people.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Viewer {
    Anonymous,
    Authenticated,
}

impl Viewer {
    pub fn can_see(&self, is_private: bool) -> bool {
        !is_private || *self == Self::Authenticated
    }
}

/// The top ranked standing, if the flags allow showing it.
pub fn champion(flags: PodiumFlags, ranked: &[Standing]) -> Option<&Standing> {
    if !flags.show_champion {
        return None;
    }

    ranked.first()
}

/// The bottom ranked standing. A single-team table has no last place.
pub fn last_place(flags: PodiumFlags, ranked: &[Standing]) -> Option<&Standing> {
    if !flags.show_loser || ranked.len() < 2 {
        return None;
    }

    ranked.last()
}

pub fn podium(season_id: SeasonId, flags: PodiumFlags, ranked: &[Standing]) -> Podium {
    Podium {
        season_id: Some(season_id),
        champion: champion(flags, ranked).cloned(),
        last_place: last_place(flags, ranked).cloned(),
    }
}

/// Most recently created completed season. Ties on creation time resolve to any one of them.
pub fn latest_completed_season(seasons: &[Season]) -> Option<&Season> {
    seasons
        .iter()
        .filter(|s| s.is_completed())
        .max_by_key(|s| s.created_at)
}

/// Champion and last place of a tournament: those of its latest completed season, gated by
/// the tournament's own display flags.
pub fn tournament_podium(
    tournament: &Tournament,
    seasons: &[Season],
    standings_by_season: &HashMap<SeasonId, Vec<Standing>>,
) -> Podium {
    let Some(season) = latest_completed_season(seasons) else {
        return Podium::default();
    };

    let ranked = rank(
        standings_by_season
            .get(&season.id)
            .cloned()
            .unwrap_or_default(),
    );

    podium(season.id, tournament.podium_flags(), &ranked)
}

/// Picks the match to highlight as coming up next.
///
/// Among matches that are not completed:
/// 1. the earliest `scheduled_at` still in the future
/// 2. otherwise the earliest `scheduled_at` in the past, so overdue matches surface
/// 3. otherwise, when nothing is scheduled, the lowest match number
pub fn next_match(matches: &[Match], now: DateTime<Utc>) -> Option<&Match> {
    let open: Vec<&Match> = matches.iter().filter(|m| !m.is_completed()).collect();

    let upcoming = open
        .iter()
        .copied()
        .filter(|m| m.scheduled_at.is_some_and(|at| at > now))
        .min_by_key(|m| m.scheduled_at);
    if let Some(found) = upcoming {
        return Some(found);
    }

    let overdue = open
        .iter()
        .copied()
        .filter(|m| m.scheduled_at.is_some())
        .min_by_key(|m| m.scheduled_at);
    if let Some(found) = overdue {
        return Some(found);
    }

    open.into_iter().min_by_key(|m| m.match_number)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum HallKind {
    /// Champions of completed seasons
    Fame,
    /// Last places of completed seasons
    Shame,
}

impl HallKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Fame => "fame",
            Self::Shame => "shame",
        }
    }
}

impl fmt::Display for HallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for HallKind {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "fame" => Ok(Self::Fame),
            "shame" => Ok(Self::Shame),
            other => Err(ValidationError::UnknownHallKind(other.to_string())),
        }
    }
}

/// Snapshot of everything the hall aggregation reads.
pub struct HallInput<'a> {
    pub seasons: &'a [Season],
    pub standings_by_season: &'a HashMap<SeasonId, Vec<Standing>>,
    pub memberships: &'a [TeamMembership],
    pub people: &'a [Person],
    pub teams: &'a [Team],
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct HallEntry {
    pub person_id: PersonId,
    pub name: String,
    pub avatar_url: Option<String>,
    /// Number of completed seasons this person's team finished first (fame) or last (shame)
    pub count: u32,
}

/// Hall of fame or shame across every completed season.
///
/// The first (fame) or last (shame) team of each completed season is expanded to its members,
/// and each person is counted once per season. A season needs at least 2 standings to have a
/// last place. Private teams and people are left out for anonymous viewers.
///
/// # Returns
/// At most [`HALL_SIZE`] entries ordered by count descending, then name ascending.
pub fn hall_of(kind: HallKind, input: &HallInput<'_>, viewer: Viewer) -> Vec<HallEntry> {
    let teams: HashMap<TeamId, &Team> = input.teams.iter().map(|t| (t.id, t)).collect();
    let people: HashMap<PersonId, &Person> = input.people.iter().map(|p| (p.id, p)).collect();

    let mut counts: HashMap<PersonId, u32> = HashMap::new();

    for season in input.seasons.iter().filter(|s| s.is_completed()) {
        let Some(standings) = input.standings_by_season.get(&season.id) else {
            continue;
        };
        let ranked = rank(standings.clone());

        let standing = match kind {
            HallKind::Fame => ranked.first(),
            HallKind::Shame if ranked.len() >= 2 => ranked.last(),
            HallKind::Shame => None,
        };
        let Some(team_id) = standing.map(|s| s.team_id) else {
            continue;
        };

        let team_visible = teams
            .get(&team_id)
            .is_some_and(|team| viewer.can_see(team.is_private));
        if !team_visible {
            continue;
        }

        let mut counted = HashSet::new();
        for membership in input.memberships.iter().filter(|m| m.team_id == team_id) {
            let visible = people
                .get(&membership.person_id)
                .is_some_and(|person| viewer.can_see(person.is_private));

            if visible && counted.insert(membership.person_id) {
                *counts.entry(membership.person_id).or_default() += 1;
            }
        }
    }

    let mut entries: Vec<HallEntry> = counts
        .into_iter()
        .filter_map(|(person_id, count)| {
            let person = people.get(&person_id)?;
            Some(HallEntry {
                person_id,
                name: person.name.clone(),
                avatar_url: person.avatar_url.clone(),
                count,
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.count
            .cmp(&a.count)
            .then_with(|| a.name.cmp(&b.name))
            .then_with(|| a.person_id.cmp(&b.person_id))
    });
    entries.truncate(HALL_SIZE);

    entries
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
#[serde(rename_all = "snake_case")]
pub enum AchievementKind {
    Champion,
    LastPlace,
}

/// A season in which a team finished first or last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct Achievement {
    pub season_id: SeasonId,
    pub season_name: String,
    pub kind: AchievementKind,
    /// The season's champion or loser label
    pub label: String,
}

/// Completed seasons where `team_id` finished first (shown with `show_champion`) or last
/// (shown with `show_loser`), ordered by season creation time.
pub fn team_achievements(
    team_id: TeamId,
    seasons: &[Season],
    standings_by_season: &HashMap<SeasonId, Vec<Standing>>,
) -> Vec<Achievement> {
    let mut seasons: Vec<&Season> = seasons.iter().filter(|s| s.is_completed()).collect();
    seasons.sort_by_key(|s| s.created_at);

    let mut achievements = Vec::new();

    for season in seasons {
        let Some(standings) = standings_by_season.get(&season.id) else {
            continue;
        };
        let ranked = rank(standings.clone());
        let flags = season.podium_flags();

        if champion(flags, &ranked).is_some_and(|s| s.team_id == team_id) {
            achievements.push(Achievement {
                season_id: season.id,
                season_name: season.name.clone(),
                kind: AchievementKind::Champion,
                label: season.champion_label.clone(),
            });
        }
        if last_place(flags, &ranked).is_some_and(|s| s.team_id == team_id) {
            achievements.push(Achievement {
                season_id: season.id,
                season_name: season.name.clone(),
                kind: AchievementKind::LastPlace,
                label: season.loser_label.clone(),
            });
        }
    }

    achievements
}
