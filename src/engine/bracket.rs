//! Bracket progression for cup and double-elimination seasons.
//!
//! The schedule generator only seeds round 1. [`advance_bracket`] derives every later round from
//! the results recorded so far:
//!
//! - Upper round `r + 1` is played by the winners of round `r` in match number order, followed
//!   by the bye of round `r` (the trailing participant when round `r` had an odd count).
//! - Lower round 1 is played by the losers of upper round 1. Lower round `k` is played by the
//!   winners and bye of lower round `k - 1`, followed by the losers of upper round `k`. A lone
//!   participant carries over to the next round without a match.
//! - The grand final pits the upper champion against the lower champion. It is tagged
//!   [`BracketPosition::Upper`] and numbered one round after the last upper round. There is no
//!   bracket reset.
//!
//! A round is only produced once every round feeding it is completed.

use std::collections::HashMap;

use crate::{
    engine::{error::ValidationError, schedule::distinct, schedule::pair_round},
    model::{
        matches::{BracketPosition, Match, MatchStatus, NewMatch},
        season::{Format, SeasonId},
        team::TeamId,
    },
};

type Slot = (Option<BracketPosition>, i32, i32);

/// Returns the matches that have become determinable and do not exist yet.
///
/// # Arguments
/// - `season_id` - Season the new matches belong to
/// - `seeding` - Participants in seeding order, used when round 1 has not been persisted
/// - `format` - Format of the season; leagues never advance
/// - `existing` - Every match already persisted for the season
///
/// # Returns
/// - `Ok(Vec<NewMatch>)` - New matches, upper bracket first, then lower bracket, then the
///   grand final
/// - `Err(ValidationError::BracketDraw)` - A completed bracket match has no winner
/// - `Err(ValidationError::BracketOutOfSync)` - A persisted match holds other participants than
///   the results feeding it produce, e.g. after an earlier result was corrected
pub fn advance_bracket(
    season_id: SeasonId,
    seeding: &[TeamId],
    format: Format,
    existing: &[Match],
) -> Result<Vec<NewMatch>, ValidationError> {
    let main = match format {
        Format::League => return Ok(Vec::new()),
        Format::Cup => None,
        Format::DoubleElimination => Some(BracketPosition::Upper),
    };

    let slots: HashMap<Slot, &Match> = existing
        .iter()
        .map(|m| ((m.bracket_position, m.round, m.match_number), m))
        .collect();

    let mut bracket = Bracket {
        season_id,
        slots,
        created: Vec::new(),
    };

    let participants = round_one(seeding, main, existing);
    if participants.len() < 2 {
        return Ok(Vec::new());
    }

    let upper = bracket.run_upper(participants, main)?;

    if format == Format::DoubleElimination {
        let lower_champion = bracket.run_lower(&upper)?;

        if let (Some(upper_champion), Some(lower_champion)) = (upper.champion, lower_champion) {
            let round = upper.rounds_played() + 1;
            let slot = (Some(BracketPosition::Upper), round, 1);

            if let Some(existing) = bracket.slots.get(&slot) {
                ensure_pairing(existing, (Some(upper_champion), Some(lower_champion)))?;
            } else {
                bracket.created.push(NewMatch {
                    season_id,
                    round,
                    match_number: 1,
                    bracket_position: Some(BracketPosition::Upper),
                    team1_id: Some(upper_champion),
                    team2_id: Some(lower_champion),
                    status: MatchStatus::Scheduled,
                });
            }
        }
    }

    Ok(bracket.created)
}

/// Round 1 participants, recovered from persisted round 1 matches when they exist so that
/// shuffled seeding survives. Seeded teams absent from round 1 (the bye) are appended.
fn round_one(
    seeding: &[TeamId],
    position: Option<BracketPosition>,
    existing: &[Match],
) -> Vec<TeamId> {
    let mut firsts: Vec<&Match> = existing
        .iter()
        .filter(|m| m.round == 1 && m.bracket_position == position)
        .collect();

    if firsts.is_empty() {
        return distinct(seeding);
    }

    firsts.sort_by_key(|m| m.match_number);

    let mut participants: Vec<TeamId> = firsts
        .iter()
        .flat_map(|m| [m.team1_id, m.team2_id])
        .flatten()
        .collect();

    for team in distinct(seeding) {
        if !participants.contains(&team) {
            participants.push(team);
        }
    }

    distinct(&participants)
}

/// Rejects a persisted match whose participants differ from the ones the earlier results
/// send into its slot. Either side order is accepted.
fn ensure_pairing(
    existing: &Match,
    (team1, team2): (Option<TeamId>, Option<TeamId>),
) -> Result<(), ValidationError> {
    let persisted = (existing.team1_id, existing.team2_id);

    if persisted == (team1, team2) || persisted == (team2, team1) {
        Ok(())
    } else {
        Err(ValidationError::BracketOutOfSync {
            match_id: existing.id,
        })
    }
}

struct Bracket<'a> {
    season_id: SeasonId,
    slots: HashMap<Slot, &'a Match>,
    created: Vec<NewMatch>,
}

/// Result of a fully completed round.
struct Decided {
    /// Winners in match number order followed by the bye, if any
    advancing: Vec<TeamId>,
    losers: Vec<TeamId>,
}

/// State of the upper (or cup) bracket after replaying every completed round.
struct UpperRun {
    /// Losers of each completed round, index 0 is round 1
    losers: Vec<Vec<TeamId>>,
    champion: Option<TeamId>,
}

impl UpperRun {
    fn rounds_played(&self) -> i32 {
        self.losers.len() as i32
    }
}

impl Bracket<'_> {
    /// Plays out one round: creates its missing matches and, once every match is completed,
    /// returns who advances. `None` while the round is still in progress.
    fn play_round(
        &mut self,
        participants: &[TeamId],
        round: i32,
        position: Option<BracketPosition>,
    ) -> Result<Option<Decided>, ValidationError> {
        let mut pending = false;
        let mut advancing = Vec::with_capacity(participants.len() / 2 + 1);
        let mut losers = Vec::with_capacity(participants.len() / 2);

        for expected in pair_round(participants, round, position, self.season_id) {
            let slot = (position, round, expected.match_number);

            let Some(existing) = self.slots.get(&slot) else {
                self.created.push(expected);
                pending = true;
                continue;
            };

            ensure_pairing(existing, expected.pairing())?;

            if !existing.is_completed() {
                pending = true;
                continue;
            }

            let winner = existing.winner_id.ok_or(ValidationError::BracketDraw {
                match_id: existing.id,
            })?;
            advancing.push(winner);
            losers.extend(existing.loser_id());
        }

        if pending {
            return Ok(None);
        }

        if participants.len() % 2 == 1 {
            advancing.extend(participants.last().copied());
        }

        Ok(Some(Decided { advancing, losers }))
    }

    fn run_upper(
        &mut self,
        mut participants: Vec<TeamId>,
        position: Option<BracketPosition>,
    ) -> Result<UpperRun, ValidationError> {
        let mut run = UpperRun {
            losers: Vec::new(),
            champion: None,
        };

        let mut round = 1;
        while participants.len() > 1 {
            let Some(decided) = self.play_round(&participants, round, position)? else {
                return Ok(run);
            };

            run.losers.push(decided.losers);
            participants = decided.advancing;
            round += 1;
        }

        run.champion = participants.first().copied();

        Ok(run)
    }

    /// Replays the lower bracket, returning its champion once it is decided.
    fn run_lower(&mut self, upper: &UpperRun) -> Result<Option<TeamId>, ValidationError> {
        let mut carried: Vec<TeamId> = Vec::new();
        let mut round = 1;

        loop {
            let dropped: &[TeamId] = match upper.losers.get(round as usize - 1) {
                Some(losers) => losers.as_slice(),
                None if upper.champion.is_some() => &[],
                None => return Ok(None),
            };
            let drops_exhausted =
                upper.champion.is_some() && round >= upper.rounds_played();

            let mut participants = std::mem::take(&mut carried);
            participants.extend_from_slice(dropped);

            match participants.len() {
                0 if drops_exhausted => return Ok(None),
                1 if drops_exhausted => return Ok(participants.first().copied()),
                0 | 1 => carried = participants,
                _ => match self.play_round(&participants, round, Some(BracketPosition::Lower))? {
                    Some(decided) => carried = decided.advancing,
                    None => return Ok(None),
                },
            }

            round += 1;
        }
    }
}
