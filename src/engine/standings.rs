//! Standings aggregation for league seasons.
//!
//! Standings are a pure function of the completed-match set: recomputing twice from the same
//! matches yields the same rows, independent of whatever was stored before.

use std::collections::HashMap;

use crate::model::{matches::Match, season::SeasonId, standing::Standing, team::TeamId};

/// Points awarded per result.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointsConfig {
    pub win: i32,
    pub draw: i32,
    pub loss: i32,
}

impl Default for PointsConfig {
    fn default() -> Self {
        Self {
            win: 3,
            draw: 1,
            loss: 0,
        }
    }
}

/// Whether a match counts towards standings: completed, with both scores and both teams known.
pub fn contributes(m: &Match) -> bool {
    m.is_completed() && m.scores().is_some() && m.participants().is_some()
}

/// Aggregates standings from a season's matches.
///
/// Rows appear in order of each team's first appearance in `matches`. Matches that do not
/// [`contribute`](contributes) are ignored.
pub fn recompute_standings(
    season_id: SeasonId,
    matches: &[Match],
    points: PointsConfig,
) -> Vec<Standing> {
    recompute_standings_for(season_id, &[], matches, points)
}

/// Like [`recompute_standings`], but seeds a zero row for every rostered team first so teams
/// without completed matches are still listed. Rostered teams come first in roster order.
pub fn recompute_standings_for(
    season_id: SeasonId,
    teams: &[TeamId],
    matches: &[Match],
    points: PointsConfig,
) -> Vec<Standing> {
    let mut table = Table::new(season_id);

    for &team_id in teams {
        table.row(team_id);
    }

    for m in matches.iter().filter(|m| contributes(m)) {
        let (Some((team1, team2)), Some((score1, score2))) = (m.participants(), m.scores()) else {
            continue;
        };

        table.record(team1, score1, score2, points);
        table.record(team2, score2, score1, points);
    }

    table.rows
}

/// Orders standings by points descending, then goal difference descending.
///
/// The sort is stable: rows tied on both keys keep their input order.
pub fn rank(mut standings: Vec<Standing>) -> Vec<Standing> {
    standings.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then_with(|| b.goal_difference.cmp(&a.goal_difference))
    });

    standings
}

struct Table {
    season_id: SeasonId,
    rows: Vec<Standing>,
    index: HashMap<TeamId, usize>,
}

impl Table {
    fn new(season_id: SeasonId) -> Self {
        Self {
            season_id,
            rows: Vec::new(),
            index: HashMap::new(),
        }
    }

    fn row(&mut self, team_id: TeamId) -> &mut Standing {
        let next = self.rows.len();
        let position = *self.index.entry(team_id).or_insert(next);

        if position == next {
            self.rows.push(Standing::zero(self.season_id, team_id));
        }

        &mut self.rows[position]
    }

    fn record(&mut self, team_id: TeamId, scored: i32, conceded: i32, points: PointsConfig) {
        let row = self.row(team_id);

        row.played += 1;
        row.goals_for += scored;
        row.goals_against += conceded;
        row.goal_difference = row.goals_for - row.goals_against;

        match scored.cmp(&conceded) {
            std::cmp::Ordering::Greater => {
                row.won += 1;
                row.points += points.win;
            }
            std::cmp::Ordering::Less => {
                row.lost += 1;
                row.points += points.loss;
            }
            std::cmp::Ordering::Equal => {
                row.drawn += 1;
                row.points += points.draw;
            }
        }
    }
}
