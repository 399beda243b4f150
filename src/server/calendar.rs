//! External calendar collaborator.
//!
//! Matches can be mirrored as events in an external calendar. The server only talks to the
//! calendar through [`CalendarClient`]; a deployment without a calendar leaves it unset and every
//! calendar side effect reports [`CalendarOutcome::Disabled`](crate::model::api::CalendarOutcome).

use async_trait::async_trait;
use chrono::{DateTime, Duration, NaiveDate, Utc};
use thiserror::Error;

use crate::model::{matches::Match, season::Season, team::Team, tournament::Tournament};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    #[error("Calendar provider rejected the request: {0}")]
    Provider(String),
    #[error("Calendar event {0} does not exist")]
    EventNotFound(String),
    #[error("Calendar is unreachable: {0}")]
    Unavailable(String),
}

/// When an event takes place.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTiming {
    Timed {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },
    /// Placeholder for a match without a date yet
    AllDay { date: NaiveDate },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CalendarEvent {
    pub summary: String,
    pub description: String,
    pub attendees: Vec<String>,
    pub timing: EventTiming,
}

/// Names and addresses an event is built from, resolved by the caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct EventContext<'a> {
    pub tournament: Option<&'a Tournament>,
    pub season: Option<&'a Season>,
    pub team1: Option<&'a Team>,
    pub team2: Option<&'a Team>,
    pub attendees: &'a [String],
}

impl CalendarEvent {
    /// Builds the event mirroring `m`.
    ///
    /// The summary reads `"{tournament} - {season}: {team1} vs {team2}"`, unknown teams show as
    /// `TBD`. A scheduled match becomes a timed event of `event_minutes`; an unscheduled one an
    /// all-day placeholder on `today`.
    pub fn for_match(
        m: &Match,
        context: &EventContext<'_>,
        event_minutes: i64,
        today: NaiveDate,
    ) -> Self {
        let team1 = context.team1.map_or("TBD", |t| t.name.as_str());
        let team2 = context.team2.map_or("TBD", |t| t.name.as_str());
        let tournament = context.tournament.map(|t| t.name.as_str());
        let season = context.season.map(|s| s.name.as_str());

        let prefix = [tournament, season]
            .into_iter()
            .flatten()
            .collect::<Vec<_>>()
            .join(" - ");
        let summary = if prefix.is_empty() {
            format!("{team1} vs {team2}")
        } else {
            format!("{prefix}: {team1} vs {team2}")
        };

        let mut description = format!(
            "Match: {team1} vs {team2}\nTournament: {}\nSeason: {}\nStatus: {}",
            tournament.unwrap_or("-"),
            season.unwrap_or("-"),
            m.status
        );

        let timing = match m.scheduled_at {
            Some(start) => EventTiming::Timed {
                start,
                end: start + Duration::minutes(event_minutes),
            },
            None => {
                description.push_str("\nSchedule: TBD");
                EventTiming::AllDay { date: today }
            }
        };

        Self {
            summary,
            description,
            attendees: context.attendees.to_vec(),
            timing,
        }
    }
}

#[async_trait]
pub trait CalendarClient: Send + Sync {
    /// Provider name stored next to the event id, e.g. `google`
    fn provider(&self) -> &str;

    /// Creates an event and returns its id.
    async fn create_event(&self, event: &CalendarEvent) -> Result<String, CalendarError>;

    async fn update_event(&self, event_id: &str, event: &CalendarEvent)
        -> Result<(), CalendarError>;

    async fn delete_event(&self, event_id: &str) -> Result<(), CalendarError>;
}
