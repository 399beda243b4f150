use chrono::{NaiveDate, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    model::{
        api::{CalendarOutcome, CalendarSyncDto},
        matches::{Match, MatchId},
        season::{Season, SeasonId},
        team::{Team, TeamId},
        tournament::Tournament,
    },
    server::{
        calendar::{CalendarClient, CalendarError, CalendarEvent, EventContext},
        data::{
            matches::MatchRepository, season::SeasonRepository, team::TeamRepository,
            tournament::TournamentRepository,
        },
        error::{season::SeasonError, Error},
        service::roster::RosterService,
    },
};

/// Mirrors matches into the external calendar.
///
/// Calendar failures never fail the caller: they are logged and reported as
/// [`CalendarOutcome::Failed`] or counted in [`CalendarSyncDto::failed`]. This includes the
/// database reads and writes made on behalf of a single match. Only the season lookup of
/// [`CalendarService::sync_season`] propagates database errors.
pub struct CalendarService<'a> {
    db: &'a DatabaseConnection,
    calendar: Option<&'a dyn CalendarClient>,
    event_minutes: i64,
}

/// Names an event is built from, loaded once per season.
struct EventNames {
    tournament: Option<Tournament>,
    season: Option<Season>,
    teams: Vec<Team>,
}

impl EventNames {
    fn context<'b>(&'b self, m: &Match, attendees: &'b [String]) -> EventContext<'b> {
        let team = |id: Option<TeamId>| id.and_then(|id| self.teams.iter().find(|t| t.id == id));

        EventContext {
            tournament: self.tournament.as_ref(),
            season: self.season.as_ref(),
            team1: team(m.team1_id),
            team2: team(m.team2_id),
            attendees,
        }
    }
}

impl<'a> CalendarService<'a> {
    /// Creates a new instance of [`CalendarService`]
    ///
    /// # Arguments
    /// - `db` - Database connection reference
    /// - `calendar` - The calendar provider, `None` disables every sync
    /// - `event_minutes` - Length of the timed event created for a scheduled match
    pub fn new(
        db: &'a DatabaseConnection,
        calendar: Option<&'a dyn CalendarClient>,
        event_minutes: i64,
    ) -> Self {
        Self {
            db,
            calendar,
            event_minutes,
        }
    }

    /// Creates or updates the event of a single match.
    ///
    /// An existing event is updated in place; if the provider no longer knows it a new one is
    /// created. A newly created event reference is persisted and written back into `m`. Every
    /// failure, including loading the names or storing the reference, is reported as
    /// [`CalendarOutcome::Failed`].
    pub async fn sync_match(&self, m: &mut Match) -> CalendarOutcome {
        let Some(calendar) = self.calendar else {
            return CalendarOutcome::Disabled;
        };

        match self.try_sync_match(calendar, m).await {
            Ok(outcome) => outcome,
            Err(e) => {
                tracing::warn!(match_id = %m.id, "Failed to sync calendar event: {}", e);
                CalendarOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    async fn try_sync_match(
        &self,
        calendar: &dyn CalendarClient,
        m: &mut Match,
    ) -> Result<CalendarOutcome, Error> {
        let season = SeasonRepository::new(self.db)
            .get(m.season_id)
            .await?
            .map(|(season, _)| season);
        let names = self.load_names(season, &participants(m)).await?;

        let event =
            CalendarEvent::for_match(m, &names.context(m, &[]), self.event_minutes, today());

        if let Some(event_id) = m.calendar_event_id.clone() {
            match calendar.update_event(&event_id, &event).await {
                Ok(()) => return Ok(CalendarOutcome::Synced { event_id }),
                Err(CalendarError::EventNotFound(_)) => {
                    tracing::debug!(
                        match_id = %m.id,
                        event_id = %event_id,
                        "Calendar event is gone, creating a new one"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        match_id = %m.id,
                        event_id = %event_id,
                        "Failed to update calendar event: {}",
                        e
                    );
                    return Ok(CalendarOutcome::Failed {
                        reason: e.to_string(),
                    });
                }
            }
        }

        let event_id = match calendar.create_event(&event).await {
            Ok(event_id) => event_id,
            Err(e) => {
                tracing::warn!(match_id = %m.id, "Failed to create calendar event: {}", e);
                return Ok(CalendarOutcome::Failed {
                    reason: e.to_string(),
                });
            }
        };

        self.store_event(calendar, m.id, &event_id).await?;

        m.calendar_event_id = Some(event_id.clone());
        m.calendar_provider = Some(calendar.provider().to_string());

        Ok(CalendarOutcome::Synced { event_id })
    }

    /// Removes the event of a match from the calendar.
    pub async fn remove_event(&self, event_id: &str) -> CalendarOutcome {
        let Some(calendar) = self.calendar else {
            return CalendarOutcome::Disabled;
        };

        match calendar.delete_event(event_id).await {
            Ok(()) => CalendarOutcome::Removed,
            Err(e) => {
                tracing::warn!(event_id, "Failed to delete calendar event: {}", e);
                CalendarOutcome::Failed {
                    reason: e.to_string(),
                }
            }
        }
    }

    /// Creates events for every match of a season that has none yet.
    ///
    /// Each event invites the contact emails of both teams' members. Matches without a date get
    /// an all-day placeholder on the current day. A failing match is counted and the sync moves on
    /// to the next one.
    ///
    /// # Returns
    /// - `Ok(CalendarSyncDto)` - Counts of synced and failed matches
    /// - `Err(Error::SeasonError(SeasonError::NotFound))` - Unknown season
    pub async fn sync_season(&self, season_id: SeasonId) -> Result<CalendarSyncDto, Error> {
        let (season, _) = SeasonRepository::new(self.db)
            .get(season_id)
            .await?
            .ok_or(SeasonError::NotFound(season_id))?;

        let match_repo = MatchRepository::new(self.db);
        let matches = match_repo.get_unsynced_by_season(season_id).await?;

        let Some(calendar) = self.calendar else {
            tracing::warn!(
                season_id = %season_id,
                unsynced = matches.len(),
                "No calendar configured, skipping season sync"
            );
            return Ok(CalendarSyncDto {
                season_id,
                synced: 0,
                failed: matches.len(),
            });
        };

        let mut team_ids: Vec<TeamId> = matches.iter().flat_map(participants).collect();
        team_ids.sort_unstable();
        team_ids.dedup();

        let names = self.load_names(Some(season), &team_ids).await?;
        let roster = RosterService::new(self.db);
        let placeholder_date = today();

        let mut synced = 0;
        let mut failed = 0;

        for m in &matches {
            let attendees = match self.attendees(&roster, m).await {
                Ok(attendees) => attendees,
                Err(e) => {
                    tracing::warn!(match_id = %m.id, "Failed to load match attendees: {}", e);
                    failed += 1;
                    continue;
                }
            };

            let event = CalendarEvent::for_match(
                m,
                &names.context(m, &attendees),
                self.event_minutes,
                placeholder_date,
            );

            let event_id = match calendar.create_event(&event).await {
                Ok(event_id) => event_id,
                Err(e) => {
                    tracing::warn!(match_id = %m.id, "Failed to create calendar event: {}", e);
                    failed += 1;
                    continue;
                }
            };

            match self.store_event(calendar, m.id, &event_id).await {
                Ok(()) => synced += 1,
                Err(e) => {
                    tracing::warn!(match_id = %m.id, "Failed to store calendar event: {}", e);
                    failed += 1;
                }
            }
        }

        tracing::info!(season_id = %season_id, synced, failed, "Synced season calendar");

        Ok(CalendarSyncDto {
            season_id,
            synced,
            failed,
        })
    }

    /// Contact emails of both teams' notified members, without duplicates.
    async fn attendees(
        &self,
        roster: &RosterService<'_>,
        m: &Match,
    ) -> Result<Vec<String>, Error> {
        let mut attendees: Vec<String> = Vec::new();
        for person in roster.notify_roster(&participants(m)).await? {
            if let Some(email) = person.contact_email() {
                if !attendees.iter().any(|a| a == email) {
                    attendees.push(email.to_string());
                }
            }
        }

        Ok(attendees)
    }

    /// Persists a created event on its match. When that fails the event is deleted again so
    /// the calendar holds no event the match does not know about.
    async fn store_event(
        &self,
        calendar: &dyn CalendarClient,
        match_id: MatchId,
        event_id: &str,
    ) -> Result<(), Error> {
        let stored = MatchRepository::new(self.db)
            .set_calendar_event(match_id, Some((event_id, calendar.provider())))
            .await;

        if let Err(e) = stored {
            if let Err(delete) = calendar.delete_event(event_id).await {
                tracing::warn!(
                    match_id = %match_id,
                    event_id,
                    "Failed to delete unreferenced calendar event: {}",
                    delete
                );
            }
            return Err(e.into());
        }

        Ok(())
    }

    async fn load_names(
        &self,
        season: Option<Season>,
        team_ids: &[TeamId],
    ) -> Result<EventNames, Error> {
        let tournament = match &season {
            Some(season) => {
                TournamentRepository::new(self.db)
                    .get(season.tournament_id)
                    .await?
            }
            None => None,
        };
        let teams = TeamRepository::new(self.db).get_many(team_ids).await?;

        Ok(EventNames {
            tournament,
            season,
            teams,
        })
    }
}

fn participants(m: &Match) -> Vec<TeamId> {
    [m.team1_id, m.team2_id].into_iter().flatten().collect()
}

fn today() -> NaiveDate {
    Utc::now().date_naive()
}
