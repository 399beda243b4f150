use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder,
};

use crate::{
    model::{
        matches::{Match, MatchId, MatchStatus, NewMatch},
        season::SeasonId,
    },
    server::data::decode_err,
};

pub struct MatchRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> MatchRepository<'a, C> {
    /// Creates a new instance of [`MatchRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Inserts matches in the given order and returns them with their ids
    pub async fn create_many(&self, matches: Vec<NewMatch>) -> Result<Vec<Match>, DbErr> {
        let now = Utc::now().naive_utc();
        let mut created = Vec::with_capacity(matches.len());

        for m in matches {
            let model = entity::season_match::ActiveModel {
                season_id: ActiveValue::Set(m.season_id),
                round: ActiveValue::Set(m.round),
                match_number: ActiveValue::Set(m.match_number),
                bracket_position: ActiveValue::Set(
                    m.bracket_position.map(|p| p.as_str().to_string()),
                ),
                team1_id: ActiveValue::Set(m.team1_id),
                team2_id: ActiveValue::Set(m.team2_id),
                team1_score: ActiveValue::Set(None),
                team2_score: ActiveValue::Set(None),
                winner_id: ActiveValue::Set(None),
                status: ActiveValue::Set(m.status.as_str().to_string()),
                scheduled_at: ActiveValue::Set(None),
                calendar_event_id: ActiveValue::Set(None),
                calendar_provider: ActiveValue::Set(None),
                created_at: ActiveValue::Set(now),
                updated_at: ActiveValue::Set(now),
                ..Default::default()
            }
            .insert(self.db)
            .await?;

            created.push(to_match(model)?);
        }

        Ok(created)
    }

    pub async fn get(&self, match_id: MatchId) -> Result<Option<Match>, DbErr> {
        entity::prelude::SeasonMatch::find_by_id(match_id)
            .one(self.db)
            .await?
            .map(to_match)
            .transpose()
    }

    /// Every match of a season ordered by round, bracket position and match number
    pub async fn get_by_season(&self, season_id: SeasonId) -> Result<Vec<Match>, DbErr> {
        entity::prelude::SeasonMatch::find()
            .filter(entity::season_match::Column::SeasonId.eq(season_id))
            .order_by_asc(entity::season_match::Column::Round)
            .order_by_asc(entity::season_match::Column::BracketPosition)
            .order_by_asc(entity::season_match::Column::MatchNumber)
            .order_by_asc(entity::season_match::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_match)
            .collect()
    }

    pub async fn get_completed_by_season(&self, season_id: SeasonId) -> Result<Vec<Match>, DbErr> {
        entity::prelude::SeasonMatch::find()
            .filter(entity::season_match::Column::SeasonId.eq(season_id))
            .filter(entity::season_match::Column::Status.eq(MatchStatus::Completed.as_str()))
            .order_by_asc(entity::season_match::Column::Round)
            .order_by_asc(entity::season_match::Column::MatchNumber)
            .order_by_asc(entity::season_match::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_match)
            .collect()
    }

    /// Matches of a season that have no calendar event yet
    pub async fn get_unsynced_by_season(&self, season_id: SeasonId) -> Result<Vec<Match>, DbErr> {
        entity::prelude::SeasonMatch::find()
            .filter(entity::season_match::Column::SeasonId.eq(season_id))
            .filter(entity::season_match::Column::CalendarEventId.is_null())
            .order_by_asc(entity::season_match::Column::Round)
            .order_by_asc(entity::season_match::Column::MatchNumber)
            .order_by_asc(entity::season_match::Column::Id)
            .all(self.db)
            .await?
            .into_iter()
            .map(to_match)
            .collect()
    }

    pub async fn count_by_season(&self, season_id: SeasonId) -> Result<u64, DbErr> {
        entity::prelude::SeasonMatch::find()
            .filter(entity::season_match::Column::SeasonId.eq(season_id))
            .count(self.db)
            .await
    }

    /// Writes every mutable field of `m`
    ///
    /// Returns [`DbErr::RecordNotUpdated`] if the match no longer exists.
    pub async fn update(&self, m: &Match) -> Result<Match, DbErr> {
        let model = entity::season_match::ActiveModel {
            id: ActiveValue::Unchanged(m.id),
            team1_id: ActiveValue::Set(m.team1_id),
            team2_id: ActiveValue::Set(m.team2_id),
            team1_score: ActiveValue::Set(m.team1_score),
            team2_score: ActiveValue::Set(m.team2_score),
            winner_id: ActiveValue::Set(m.winner_id),
            status: ActiveValue::Set(m.status.as_str().to_string()),
            scheduled_at: ActiveValue::Set(m.scheduled_at.map(|at| at.naive_utc())),
            calendar_event_id: ActiveValue::Set(m.calendar_event_id.clone()),
            calendar_provider: ActiveValue::Set(m.calendar_provider.clone()),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        to_match(model)
    }

    /// Records the calendar event mirroring a match, or clears it with `None`
    pub async fn set_calendar_event(
        &self,
        match_id: MatchId,
        event: Option<(&str, &str)>,
    ) -> Result<(), DbErr> {
        let (event_id, provider) = match event {
            Some((event_id, provider)) => (Some(event_id.to_string()), Some(provider.to_string())),
            None => (None, None),
        };

        entity::season_match::ActiveModel {
            id: ActiveValue::Unchanged(match_id),
            calendar_event_id: ActiveValue::Set(event_id),
            calendar_provider: ActiveValue::Set(provider),
            ..Default::default()
        }
        .update(self.db)
        .await?;

        Ok(())
    }

    /// Deletes a match
    ///
    /// Returns OK regardless of the match existing, check [`DeleteResult::rows_affected`].
    pub async fn delete(&self, match_id: MatchId) -> Result<DeleteResult, DbErr> {
        entity::prelude::SeasonMatch::delete_by_id(match_id)
            .exec(self.db)
            .await
    }

    /// Deletes every match of a season and returns how many were removed
    pub async fn delete_by_season(&self, season_id: SeasonId) -> Result<u64, DbErr> {
        let result = entity::prelude::SeasonMatch::delete_many()
            .filter(entity::season_match::Column::SeasonId.eq(season_id))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}

pub(crate) fn to_match(model: entity::season_match::Model) -> Result<Match, DbErr> {
    Ok(Match {
        id: model.id,
        season_id: model.season_id,
        round: model.round,
        match_number: model.match_number,
        bracket_position: model
            .bracket_position
            .as_deref()
            .map(str::parse)
            .transpose()
            .map_err(decode_err)?,
        team1_id: model.team1_id,
        team2_id: model.team2_id,
        team1_score: model.team1_score,
        team2_score: model.team2_score,
        winner_id: model.winner_id,
        status: model.status.parse().map_err(decode_err)?,
        scheduled_at: model.scheduled_at.map(|at| at.and_utc()),
        calendar_event_id: model.calendar_event_id,
        calendar_provider: model.calendar_provider,
    })
}
