//! Match lifecycle state machine.
//!
//! Status moves freely between `scheduled`, `in_progress` and `completed` in both directions;
//! what is gated is which fields may change along the way:
//!
//! - Entering `scheduled` clears both scores and the winner.
//! - Non-null scores can only be written when the resulting status is `in_progress` or
//!   `completed`.
//! - The winner is never supplied, it is derived from the scores.

use chrono::{DateTime, Utc};

use crate::{
    engine::error::ValidationError,
    model::{
        matches::{Match, MatchStatus},
        team::TeamId,
    },
};

/// Requested changes to a match.
///
/// Outer `None` leaves a field untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchPatch {
    pub status: Option<MatchStatus>,
    pub team1_score: Option<Option<i32>>,
    pub team2_score: Option<Option<i32>>,
    pub scheduled_at: Option<Option<DateTime<Utc>>>,
    pub team1_id: Option<Option<TeamId>>,
    pub team2_id: Option<Option<TeamId>>,
}

impl MatchPatch {
    pub fn status(status: MatchStatus) -> Self {
        Self {
            status: Some(status),
            ..Default::default()
        }
    }

    /// Sets both scores and the status in one step.
    pub fn result(status: MatchStatus, team1_score: i32, team2_score: i32) -> Self {
        Self {
            status: Some(status),
            team1_score: Some(Some(team1_score)),
            team2_score: Some(Some(team2_score)),
            ..Default::default()
        }
    }

    fn writes_score(&self) -> bool {
        matches!(self.team1_score, Some(Some(_))) || matches!(self.team2_score, Some(Some(_)))
    }
}

/// Something a transition changed that collaborators may need to react to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchEvent {
    StatusChanged {
        from: MatchStatus,
        to: MatchStatus,
    },
    /// The match entered or left `completed`
    CompletionChanged { completed: bool },
    ScheduleChanged {
        from: Option<DateTime<Utc>>,
        to: Option<DateTime<Utc>>,
    },
    /// `scheduled_at` was cleared while an external calendar event existed. The reference has
    /// been removed from the updated match; the event itself still has to be deleted.
    Unscheduled {
        calendar_event_id: String,
        calendar_provider: Option<String>,
    },
    ScoreChanged,
    ParticipantsChanged,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub updated: Match,
    pub events: Vec<MatchEvent>,
}

impl Transition {
    pub fn is_noop(&self) -> bool {
        self.events.is_empty()
    }

    /// Whether the external calendar entry for this match is now out of date.
    pub fn needs_calendar_sync(&self) -> bool {
        self.events.iter().any(|event| {
            matches!(
                event,
                MatchEvent::ScheduleChanged { .. }
                    | MatchEvent::CompletionChanged { .. }
                    | MatchEvent::Unscheduled { .. }
            )
        })
    }

    /// Whether league standings derived from this match must be recomputed.
    pub fn affects_standings(&self) -> bool {
        let completed = self.updated.is_completed();

        self.events.iter().any(|event| match event {
            MatchEvent::CompletionChanged { .. } => true,
            MatchEvent::ScoreChanged | MatchEvent::ParticipantsChanged => completed,
            _ => false,
        })
    }

    pub fn unscheduled_event(&self) -> Option<(&str, Option<&str>)> {
        self.events.iter().find_map(|event| match event {
            MatchEvent::Unscheduled {
                calendar_event_id,
                calendar_provider,
            } => Some((calendar_event_id.as_str(), calendar_provider.as_deref())),
            _ => None,
        })
    }
}

/// Applies a patch to a match, validating the resulting state.
///
/// # Arguments
/// - `current` - The match as currently persisted
/// - `patch` - Requested changes
///
/// # Returns
/// - `Ok(Transition)` - The updated match and the events describing what changed
/// - `Err(ValidationError)` - The patch would leave the match in an invalid state; nothing is
///   applied
pub fn apply_patch(current: &Match, patch: MatchPatch) -> Result<Transition, ValidationError> {
    let mut updated = current.clone();

    if let Some(team1_id) = patch.team1_id {
        updated.team1_id = team1_id;
    }
    if let Some(team2_id) = patch.team2_id {
        updated.team2_id = team2_id;
    }
    if let (Some(team1), Some(team2)) = (updated.team1_id, updated.team2_id) {
        if team1 == team2 {
            return Err(ValidationError::SameTeamBothSides(team1));
        }
    }

    updated.status = patch.status.unwrap_or(current.status);

    if updated.status.allows_score() {
        if let Some(score) = patch.team1_score {
            updated.team1_score = score;
        }
        if let Some(score) = patch.team2_score {
            updated.team2_score = score;
        }

        for score in [updated.team1_score, updated.team2_score].into_iter().flatten() {
            if score < 0 {
                return Err(ValidationError::NegativeScore(score));
            }
        }

        let scored = updated.team1_score.is_some() || updated.team2_score.is_some();
        if scored && updated.participants().is_none() {
            return Err(ValidationError::UnresolvedParticipants);
        }
    } else {
        if patch.writes_score() {
            return Err(ValidationError::ScoreWhileScheduled);
        }

        updated.team1_score = None;
        updated.team2_score = None;
    }

    updated.winner_id = derive_winner(&updated);

    if let Some(scheduled_at) = patch.scheduled_at {
        updated.scheduled_at = scheduled_at;
    }

    let mut events = Vec::new();

    if updated.status != current.status {
        events.push(MatchEvent::StatusChanged {
            from: current.status,
            to: updated.status,
        });
    }
    if updated.is_completed() != current.is_completed() {
        events.push(MatchEvent::CompletionChanged {
            completed: updated.is_completed(),
        });
    }
    if updated.scheduled_at != current.scheduled_at {
        events.push(MatchEvent::ScheduleChanged {
            from: current.scheduled_at,
            to: updated.scheduled_at,
        });

        if updated.scheduled_at.is_none() {
            if let Some(calendar_event_id) = updated.calendar_event_id.take() {
                events.push(MatchEvent::Unscheduled {
                    calendar_event_id,
                    calendar_provider: updated.calendar_provider.take(),
                });
            }
        }
    }
    if (updated.team1_score, updated.team2_score) != (current.team1_score, current.team2_score) {
        events.push(MatchEvent::ScoreChanged);
    }
    if (updated.team1_id, updated.team2_id) != (current.team1_id, current.team2_id) {
        events.push(MatchEvent::ParticipantsChanged);
    }

    Ok(Transition { updated, events })
}

/// `team1` on a higher team 1 score, `team2` on a higher team 2 score, `None` on a draw or
/// while either score is missing.
pub fn derive_winner(m: &Match) -> Option<TeamId> {
    let (score1, score2) = m.scores()?;

    match score1.cmp(&score2) {
        std::cmp::Ordering::Greater => m.team1_id,
        std::cmp::Ordering::Less => m.team2_id,
        std::cmp::Ordering::Equal => None,
    }
}
