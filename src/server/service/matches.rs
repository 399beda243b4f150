use sea_orm::{DatabaseConnection, DatabaseTransaction, TransactionTrait};

use crate::{
    engine::{
        lifecycle::{apply_patch, MatchPatch, Transition},
        standings::contributes,
    },
    model::{
        api::{CalendarOutcome, DeleteMatchDto, MatchUpdateDto},
        matches::{Match, MatchId},
        season::{Format, Season, SeasonId},
    },
    server::{
        calendar::CalendarClient,
        data::{matches::MatchRepository, season::SeasonRepository},
        error::{matches::MatchError, season::SeasonError, Error},
        service::{calendar::CalendarService, retry::RetryContext, standings::replace_standings},
    },
};

/// Applies lifecycle transitions to matches and keeps standings and the calendar in step.
pub struct MatchService<'a> {
    db: &'a DatabaseConnection,
    calendar: CalendarService<'a>,
}

impl<'a> MatchService<'a> {
    /// Creates a new instance of [`MatchService`]
    pub fn new(
        db: &'a DatabaseConnection,
        calendar: Option<&'a dyn CalendarClient>,
        event_minutes: i64,
    ) -> Self {
        Self {
            db,
            calendar: CalendarService::new(db, calendar, event_minutes),
        }
    }

    /// Updates a match through the lifecycle state machine.
    ///
    /// The match is written in a revision-guarded transaction together with the recomputed
    /// league standings when the completed result changed, then the calendar is brought in line.
    /// A calendar failure, including the database work done for it, does not fail the update.
    /// It is reported in [`MatchUpdateDto::calendar`].
    ///
    /// # Returns
    /// - `Ok(MatchUpdateDto)` - The updated match and the calendar outcome
    /// - `Err(Error::MatchError(MatchError::NotFound))` - Unknown match
    /// - `Err(Error::ValidationError(_))` - The patch was rejected, nothing was written
    pub async fn update_match(
        &self,
        match_id: MatchId,
        patch: MatchPatch,
    ) -> Result<MatchUpdateDto, Error> {
        let (transition, mut updated) = RetryContext::new()
            .execute_with_retry(&format!("update of match {}", match_id), || {
                self.try_update_match(match_id, patch.clone())
            })
            .await?;

        if transition.is_noop() {
            return Ok(MatchUpdateDto {
                updated,
                calendar: CalendarOutcome::NotRequired,
            });
        }

        tracing::debug!(
            match_id = %match_id,
            status = %updated.status,
            events = ?transition.events,
            "Updated match"
        );

        let calendar = match transition.unscheduled_event() {
            Some((event_id, _)) => self.calendar.remove_event(event_id).await,
            None if !transition.needs_calendar_sync() => CalendarOutcome::NotRequired,
            None if updated.scheduled_at.is_none() && updated.calendar_event_id.is_none() => {
                CalendarOutcome::NotRequired
            }
            None => self.calendar.sync_match(&mut updated).await,
        };

        Ok(MatchUpdateDto { updated, calendar })
    }

    /// Deletes a match along with its calendar event.
    ///
    /// Standings of a league season are recomputed in the same transaction when the match
    /// counted towards them.
    pub async fn delete_match(&self, match_id: MatchId) -> Result<DeleteMatchDto, Error> {
        let m = MatchRepository::new(self.db)
            .get(match_id)
            .await?
            .ok_or(MatchError::NotFound(match_id))?;

        let calendar = match m.calendar_event_id.as_deref() {
            Some(event_id) => self.calendar.remove_event(event_id).await,
            None => CalendarOutcome::NotRequired,
        };

        RetryContext::new()
            .execute_with_retry(&format!("deletion of match {}", match_id), || {
                self.try_delete_match(match_id)
            })
            .await?;

        tracing::info!(match_id = %match_id, season_id = %m.season_id, "Deleted match");

        Ok(DeleteMatchDto { match_id, calendar })
    }

    /// Returns the transition and the match as stored afterwards. A noop transition writes
    /// nothing and returns the current match.
    async fn try_update_match(
        &self,
        match_id: MatchId,
        patch: MatchPatch,
    ) -> Result<(Transition, Match), Error> {
        let current = MatchRepository::new(self.db)
            .get(match_id)
            .await?
            .ok_or(MatchError::NotFound(match_id))?;

        let transition = apply_patch(&current, patch)?;
        if transition.is_noop() {
            return Ok((transition, current));
        }

        let (season, revision) = self.load_season(current.season_id).await?;

        let txn = self.db.begin().await?;

        bump_revision(&txn, season.id, revision).await?;

        let updated = MatchRepository::new(&txn)
            .update(&transition.updated)
            .await?;

        if transition.affects_standings() && season.format == Format::League {
            replace_standings(&txn, &season).await?;
        }

        txn.commit().await?;

        Ok((transition, updated))
    }

    async fn try_delete_match(&self, match_id: MatchId) -> Result<(), Error> {
        let m = MatchRepository::new(self.db)
            .get(match_id)
            .await?
            .ok_or(MatchError::NotFound(match_id))?;

        let (season, revision) = self.load_season(m.season_id).await?;

        let txn = self.db.begin().await?;

        bump_revision(&txn, season.id, revision).await?;

        let result = MatchRepository::new(&txn).delete(match_id).await?;
        if result.rows_affected == 0 {
            return Err(MatchError::NotFound(match_id).into());
        }

        if contributes(&m) && season.format == Format::League {
            replace_standings(&txn, &season).await?;
        }

        txn.commit().await?;

        Ok(())
    }

    async fn load_season(&self, season_id: SeasonId) -> Result<(Season, i32), Error> {
        SeasonRepository::new(self.db)
            .get(season_id)
            .await?
            .ok_or_else(|| SeasonError::NotFound(season_id).into())
    }
}

async fn bump_revision(
    txn: &DatabaseTransaction,
    season_id: SeasonId,
    revision: i32,
) -> Result<(), Error> {
    if SeasonRepository::new(txn)
        .bump_revision(season_id, revision)
        .await?
    {
        Ok(())
    } else {
        Err(SeasonError::StaleRevision {
            season_id,
            revision,
        }
        .into())
    }
}
