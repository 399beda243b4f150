use std::collections::HashSet;

use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    engine::{
        bracket::advance_bracket,
        schedule::{generate_schedule, shuffle_seeding, ScheduleConfig},
        ValidationError,
    },
    model::{
        api::{AdvanceReportDto, ResetReportDto, ScheduleReportDto},
        season::{Season, SeasonId},
    },
    server::{
        calendar::CalendarClient,
        data::{
            matches::MatchRepository, season::SeasonRepository,
            season_team::SeasonTeamRepository, standing::StandingRepository,
        },
        error::{season::SeasonError, Error},
        service::retry::RetryContext,
    },
};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Shuffle the season's teams before seeding
    pub shuffle: bool,
}

/// Generates, resets and advances the match schedule of a season.
pub struct ScheduleService<'a> {
    db: &'a DatabaseConnection,
    calendar: Option<&'a dyn CalendarClient>,
}

impl<'a> ScheduleService<'a> {
    /// Creates a new instance of [`ScheduleService`]
    pub fn new(db: &'a DatabaseConnection, calendar: Option<&'a dyn CalendarClient>) -> Self {
        Self { db, calendar }
    }

    /// Generates the initial schedule of a season.
    ///
    /// Matches and the missing league standings are persisted in one transaction. Standing rows
    /// that already existed are kept and reported, they may disagree with the new schedule.
    ///
    /// # Returns
    /// - `Ok(ScheduleReportDto)` - The persisted matches
    /// - `Err(Error::SeasonError(SeasonError::NotFound))` - Unknown season
    /// - `Err(Error::SeasonError(SeasonError::ScheduleExists))` - The season already has matches,
    ///   reported before any team count check
    /// - `Err(Error::ValidationError(ValidationError::TooFewTeams))` - Fewer than 2 distinct teams
    pub async fn generate(
        &self,
        season_id: SeasonId,
        options: GenerateOptions,
    ) -> Result<ScheduleReportDto, Error> {
        RetryContext::new()
            .execute_with_retry(
                &format!("schedule generation for season {}", season_id),
                || self.try_generate(season_id, options, false),
            )
            .await
    }

    /// Deletes the calendar events and matches of a season.
    ///
    /// Every calendar event is attempted; failures are logged and counted but never stop the
    /// matches from being deleted. Standings are left untouched.
    pub async fn reset(&self, season_id: SeasonId) -> Result<ResetReportDto, Error> {
        self.load_season(season_id).await?;

        let calendar_failures = self.delete_calendar_events(season_id).await?;

        let deleted_matches = RetryContext::new()
            .execute_with_retry(&format!("schedule reset for season {}", season_id), || {
                self.try_reset(season_id)
            })
            .await?;

        tracing::info!(
            season_id = %season_id,
            deleted_matches,
            calendar_failures,
            "Reset season schedule"
        );

        Ok(ResetReportDto {
            season_id,
            deleted_matches,
            calendar_failures,
        })
    }

    /// Replaces the schedule of a season: removes the existing matches and their calendar
    /// events, then generates anew. Deletion and generation share one transaction.
    pub async fn regenerate(
        &self,
        season_id: SeasonId,
        options: GenerateOptions,
    ) -> Result<ScheduleReportDto, Error> {
        self.load_season(season_id).await?;

        let calendar_failures = self.delete_calendar_events(season_id).await?;
        if calendar_failures > 0 {
            tracing::warn!(
                season_id = %season_id,
                calendar_failures,
                "Regenerating schedule with calendar events that could not be removed"
            );
        }

        RetryContext::new()
            .execute_with_retry(
                &format!("schedule regeneration for season {}", season_id),
                || self.try_generate(season_id, options, true),
            )
            .await
    }

    /// Persists the bracket matches that have become determinable.
    ///
    /// Returns an empty report for leagues and when no further round can be built yet.
    pub async fn advance(&self, season_id: SeasonId) -> Result<AdvanceReportDto, Error> {
        RetryContext::new()
            .execute_with_retry(&format!("bracket advance for season {}", season_id), || {
                self.try_advance(season_id)
            })
            .await
    }

    async fn try_generate(
        &self,
        season_id: SeasonId,
        options: GenerateOptions,
        replace: bool,
    ) -> Result<ScheduleReportDto, Error> {
        let (season, revision) = self.load_season(season_id).await?;

        if !replace
            && MatchRepository::new(self.db)
                .count_by_season(season_id)
                .await?
                > 0
        {
            return Err(SeasonError::ScheduleExists(season_id).into());
        }

        let mut teams = SeasonTeamRepository::new(self.db)
            .get_team_ids(season_id)
            .await?;
        if options.shuffle {
            shuffle_seeding(&mut teams, &mut rand::rng());
        }

        let schedule = generate_schedule(&teams, season.format, ScheduleConfig { season_id });
        if schedule.is_empty() {
            let distinct = teams.iter().collect::<HashSet<_>>().len();
            return Err(ValidationError::TooFewTeams(distinct).into());
        }

        let txn = self.db.begin().await?;

        if !SeasonRepository::new(&txn)
            .bump_revision(season_id, revision)
            .await?
        {
            return Err(SeasonError::StaleRevision {
                season_id,
                revision,
            }
            .into());
        }

        let match_repo = MatchRepository::new(&txn);

        let deleted_matches = if replace {
            match_repo.delete_by_season(season_id).await?
        } else {
            0
        };

        if match_repo.count_by_season(season_id).await? > 0 {
            return Err(SeasonError::ScheduleExists(season_id).into());
        }

        let matches = match_repo.create_many(schedule.matches).await?;
        let standings = StandingRepository::new(&txn)
            .create_missing(season_id, &schedule.standings)
            .await?;

        txn.commit().await?;

        if !standings.kept.is_empty() {
            tracing::warn!(
                season_id = %season_id,
                kept = ?standings.kept,
                "Kept existing standing rows that may not match the new schedule"
            );
        }

        tracing::info!(
            season_id = %season_id,
            format = %season.format,
            matches = matches.len(),
            "Generated season schedule"
        );

        Ok(ScheduleReportDto {
            season_id,
            deleted_matches,
            matches,
            created_standings: standings.created.len(),
            kept_standings: standings.kept,
        })
    }

    async fn try_reset(&self, season_id: SeasonId) -> Result<u64, Error> {
        let (_, revision) = self.load_season(season_id).await?;

        let txn = self.db.begin().await?;

        if !SeasonRepository::new(&txn)
            .bump_revision(season_id, revision)
            .await?
        {
            return Err(SeasonError::StaleRevision {
                season_id,
                revision,
            }
            .into());
        }

        let deleted = MatchRepository::new(&txn)
            .delete_by_season(season_id)
            .await?;

        txn.commit().await?;

        Ok(deleted)
    }

    async fn try_advance(&self, season_id: SeasonId) -> Result<AdvanceReportDto, Error> {
        let (season, revision) = self.load_season(season_id).await?;

        let seeding = SeasonTeamRepository::new(self.db)
            .get_team_ids(season_id)
            .await?;
        let existing = MatchRepository::new(self.db)
            .get_by_season(season_id)
            .await?;

        let next = advance_bracket(season_id, &seeding, season.format, &existing)?;
        if next.is_empty() {
            return Ok(AdvanceReportDto {
                season_id,
                matches: Vec::new(),
            });
        }

        let txn = self.db.begin().await?;

        if !SeasonRepository::new(&txn)
            .bump_revision(season_id, revision)
            .await?
        {
            return Err(SeasonError::StaleRevision {
                season_id,
                revision,
            }
            .into());
        }

        let matches = MatchRepository::new(&txn).create_many(next).await?;

        txn.commit().await?;

        tracing::info!(
            season_id = %season_id,
            matches = matches.len(),
            "Advanced bracket"
        );

        Ok(AdvanceReportDto { season_id, matches })
    }

    async fn load_season(&self, season_id: SeasonId) -> Result<(Season, i32), Error> {
        SeasonRepository::new(self.db)
            .get(season_id)
            .await?
            .ok_or_else(|| SeasonError::NotFound(season_id).into())
    }

    /// Deletes the calendar event of every match in the season and returns how many failed.
    async fn delete_calendar_events(&self, season_id: SeasonId) -> Result<usize, Error> {
        let matches = MatchRepository::new(self.db)
            .get_by_season(season_id)
            .await?;

        let mut failures = 0;

        for m in matches {
            let Some(event_id) = m.calendar_event_id.as_deref() else {
                continue;
            };

            let Some(calendar) = self.calendar else {
                tracing::warn!(
                    match_id = %m.id,
                    event_id,
                    "No calendar configured, leaving event behind"
                );
                failures += 1;
                continue;
            };

            if let Err(e) = calendar.delete_event(event_id).await {
                tracing::warn!(
                    match_id = %m.id,
                    event_id,
                    "Failed to delete calendar event: {}",
                    e
                );
                failures += 1;
            }
        }

        Ok(failures)
    }
}
