//! Initial schedule generation for a season.
//!
//! Generation is deterministic: for a fixed team order and format the output is identical on
//! every call. Callers that want randomised seeding shuffle the team list first, see
//! [`shuffle_seeding`].

use std::collections::HashSet;

use rand::{seq::SliceRandom, Rng};

use crate::model::{
    matches::{BracketPosition, MatchStatus, NewMatch},
    season::{Format, SeasonId},
    standing::Standing,
    team::TeamId,
};

/// Settings shared by every generated match.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub season_id: SeasonId,
}

/// Output of [`generate_schedule`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schedule {
    pub matches: Vec<NewMatch>,
    /// Zero-initialized rows, only emitted for league seasons
    pub standings: Vec<Standing>,
}

impl Schedule {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }
}

/// Generates the initial match set for a season.
///
/// # Arguments
/// - `teams` - Participants in seeding order; duplicates are dropped, first occurrence wins
/// - `format` - Competition format of the season
/// - `config` - Season the matches belong to
///
/// # Returns
/// - League: one match per unordered pair in round 1, numbered in generation order, plus one
///   zero standing per team
/// - Cup: round 1 pairs consecutive teams `(0,1), (2,3), ...`; with an odd count the last team
///   is left out of round 1
/// - Double elimination: same as cup with every match tagged [`BracketPosition::Upper`]
/// - An empty schedule when fewer than 2 distinct teams are given
pub fn generate_schedule(teams: &[TeamId], format: Format, config: ScheduleConfig) -> Schedule {
    let teams = distinct(teams);

    if teams.len() < 2 {
        return Schedule::default();
    }

    match format {
        Format::League => league(&teams, config),
        Format::Cup => Schedule {
            matches: pair_round(&teams, 1, None, config.season_id),
            standings: Vec::new(),
        },
        Format::DoubleElimination => Schedule {
            matches: pair_round(&teams, 1, Some(BracketPosition::Upper), config.season_id),
            standings: Vec::new(),
        },
    }
}

/// Randomises seeding order in place before generation.
pub fn shuffle_seeding<R: Rng + ?Sized>(teams: &mut [TeamId], rng: &mut R) {
    teams.shuffle(rng);
}

/// Pairs consecutive participants into one round; `match_number = i / 2 + 1` for the pair
/// starting at index `i`. A trailing unpaired participant gets no match.
pub(crate) fn pair_round(
    participants: &[TeamId],
    round: i32,
    bracket_position: Option<BracketPosition>,
    season_id: SeasonId,
) -> Vec<NewMatch> {
    participants
        .chunks_exact(2)
        .enumerate()
        .map(|(pair, teams)| NewMatch {
            season_id,
            round,
            match_number: pair as i32 + 1,
            bracket_position,
            team1_id: Some(teams[0]),
            team2_id: Some(teams[1]),
            status: MatchStatus::Scheduled,
        })
        .collect()
}

fn league(teams: &[TeamId], config: ScheduleConfig) -> Schedule {
    let mut matches = Vec::with_capacity(teams.len() * (teams.len() - 1) / 2);

    for (i, &home) in teams.iter().enumerate() {
        for &away in &teams[i + 1..] {
            matches.push(NewMatch {
                season_id: config.season_id,
                round: 1,
                match_number: matches.len() as i32 + 1,
                bracket_position: None,
                team1_id: Some(home),
                team2_id: Some(away),
                status: MatchStatus::Scheduled,
            });
        }
    }

    let standings = teams
        .iter()
        .map(|&team_id| Standing::zero(config.season_id, team_id))
        .collect();

    Schedule { matches, standings }
}

pub(crate) fn distinct(teams: &[TeamId]) -> Vec<TeamId> {
    let mut seen = HashSet::with_capacity(teams.len());

    teams.iter().copied().filter(|id| seen.insert(*id)).collect()
}
