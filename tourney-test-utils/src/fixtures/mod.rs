//! Database fixtures for tournament tables.
//!
//! Fixtures insert rows directly through the entity crate so tests never depend on the
//! repositories they exercise. Every inserted row is returned as its entity model.

pub mod factory;

use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter,
};

use crate::{error::TestError, TestContext};

/// A tournament with one season and its linked teams.
#[derive(Debug, Clone)]
pub struct SeasonFixture {
    pub tournament: entity::tournament::Model,
    pub season: entity::season::Model,
    /// In link order
    pub teams: Vec<entity::team::Model>,
}

impl SeasonFixture {
    pub fn team_ids(&self) -> Vec<i32> {
        self.teams.iter().map(|t| t.id).collect()
    }
}

pub struct Fixtures<'a> {
    db: &'a DatabaseConnection,
}

impl TestContext {
    pub fn fixtures(&self) -> Fixtures<'_> {
        Fixtures { db: &self.db }
    }
}

impl<'a> Fixtures<'a> {
    pub async fn insert_mock_tournament(
        &self,
        name: &str,
    ) -> Result<entity::tournament::Model, TestError> {
        Ok(entity::tournament::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            is_private: ActiveValue::Set(false),
            show_champion: ActiveValue::Set(true),
            show_loser: ActiveValue::Set(false),
            champion_label: ActiveValue::Set("Champion".to_string()),
            loser_label: ActiveValue::Set("Last Place".to_string()),
            owner_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await?)
    }

    /// Inserts a draft season with default points (3/1/0) and podium settings.
    pub async fn insert_mock_season(
        &self,
        tournament_id: i32,
        name: &str,
        format: &str,
    ) -> Result<entity::season::Model, TestError> {
        Ok(entity::season::ActiveModel {
            tournament_id: ActiveValue::Set(tournament_id),
            name: ActiveValue::Set(name.to_string()),
            format: ActiveValue::Set(format.to_string()),
            points_win: ActiveValue::Set(3),
            points_draw: ActiveValue::Set(1),
            points_loss: ActiveValue::Set(0),
            priority_mode: ActiveValue::Set("none".to_string()),
            status: ActiveValue::Set("draft".to_string()),
            show_champion: ActiveValue::Set(true),
            show_loser: ActiveValue::Set(false),
            champion_label: ActiveValue::Set("Champion".to_string()),
            loser_label: ActiveValue::Set("Last Place".to_string()),
            revision: ActiveValue::Set(0),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await?)
    }

    /// Updates a season's status, podium flags and creation time in one go.
    pub async fn update_mock_season(
        &self,
        season: entity::season::Model,
        status: &str,
        show_loser: bool,
        created_days_ago: i64,
    ) -> Result<entity::season::Model, TestError> {
        let mut active: entity::season::ActiveModel = season.into();
        active.status = ActiveValue::Set(status.to_string());
        active.show_loser = ActiveValue::Set(show_loser);
        active.created_at =
            ActiveValue::Set((Utc::now() - Duration::days(created_days_ago)).naive_utc());

        Ok(active.update(self.db).await?)
    }

    pub async fn insert_mock_team(&self, name: &str) -> Result<entity::team::Model, TestError> {
        Ok(entity::team::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            logo_url: ActiveValue::Set(None),
            banner_url: ActiveValue::Set(None),
            is_private: ActiveValue::Set(false),
            owner_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await?)
    }

    pub async fn set_team_private(
        &self,
        team: entity::team::Model,
        is_private: bool,
    ) -> Result<entity::team::Model, TestError> {
        let mut active: entity::team::ActiveModel = team.into();
        active.is_private = ActiveValue::Set(is_private);

        Ok(active.update(self.db).await?)
    }

    pub async fn set_tournament_private(
        &self,
        tournament: entity::tournament::Model,
        is_private: bool,
    ) -> Result<entity::tournament::Model, TestError> {
        let mut active: entity::tournament::ActiveModel = tournament.into();
        active.is_private = ActiveValue::Set(is_private);

        Ok(active.update(self.db).await?)
    }

    pub async fn insert_mock_person(
        &self,
        name: &str,
        email: Option<&str>,
        is_private: bool,
    ) -> Result<entity::person::Model, TestError> {
        Ok(entity::person::ActiveModel {
            name: ActiveValue::Set(name.to_string()),
            role: ActiveValue::Set(None),
            avatar_url: ActiveValue::Set(None),
            email: ActiveValue::Set(email.map(str::to_string)),
            whatsapp: ActiveValue::Set(None),
            is_private: ActiveValue::Set(is_private),
            owner_id: ActiveValue::Set(None),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
            ..Default::default()
        }
        .insert(self.db)
        .await?)
    }

    /// Adds a member; `order` offsets the membership time so roster order is deterministic.
    pub async fn insert_team_member(
        &self,
        team_id: i32,
        person_id: i32,
        order: i64,
    ) -> Result<entity::team_member::Model, TestError> {
        Ok(entity::team_member::ActiveModel {
            team_id: ActiveValue::Set(team_id),
            person_id: ActiveValue::Set(person_id),
            created_at: ActiveValue::Set(
                (factory::base_time() + Duration::seconds(order)).naive_utc(),
            ),
        }
        .insert(self.db)
        .await?)
    }

    pub async fn link_season_team(
        &self,
        season_id: i32,
        team_id: i32,
        position: i32,
    ) -> Result<entity::season_team::Model, TestError> {
        Ok(entity::season_team::ActiveModel {
            season_id: ActiveValue::Set(season_id),
            team_id: ActiveValue::Set(team_id),
            position: ActiveValue::Set(position),
            created_at: ActiveValue::Set(Utc::now().naive_utc()),
        }
        .insert(self.db)
        .await?)
    }

    /// Inserts a scheduled round 1 match between two teams.
    pub async fn insert_mock_match(
        &self,
        season_id: i32,
        match_number: i32,
        team1_id: Option<i32>,
        team2_id: Option<i32>,
    ) -> Result<entity::season_match::Model, TestError> {
        Ok(factory::mock_match_active_model(season_id, 1, match_number, team1_id, team2_id)
            .insert(self.db)
            .await?)
    }

    /// Inserts a completed match with the given scores; the winner is the higher score.
    pub async fn insert_completed_match(
        &self,
        season_id: i32,
        match_number: i32,
        (team1_id, team2_id): (i32, i32),
        (team1_score, team2_score): (i32, i32),
    ) -> Result<entity::season_match::Model, TestError> {
        let mut active = factory::mock_match_active_model(
            season_id,
            1,
            match_number,
            Some(team1_id),
            Some(team2_id),
        );
        active.status = ActiveValue::Set("completed".to_string());
        active.team1_score = ActiveValue::Set(Some(team1_score));
        active.team2_score = ActiveValue::Set(Some(team2_score));
        active.winner_id = ActiveValue::Set(match team1_score.cmp(&team2_score) {
            std::cmp::Ordering::Greater => Some(team1_id),
            std::cmp::Ordering::Less => Some(team2_id),
            std::cmp::Ordering::Equal => None,
        });

        Ok(active.insert(self.db).await?)
    }

    pub async fn insert_mock_standing(
        &self,
        season_id: i32,
        team_id: i32,
        points: i32,
        goal_difference: i32,
    ) -> Result<entity::standing::Model, TestError> {
        Ok(entity::standing::ActiveModel {
            season_id: ActiveValue::Set(season_id),
            team_id: ActiveValue::Set(team_id),
            played: ActiveValue::Set(0),
            won: ActiveValue::Set(0),
            drawn: ActiveValue::Set(0),
            lost: ActiveValue::Set(0),
            goals_for: ActiveValue::Set(goal_difference.max(0)),
            goals_against: ActiveValue::Set((-goal_difference).max(0)),
            goal_difference: ActiveValue::Set(goal_difference),
            points: ActiveValue::Set(points),
            updated_at: ActiveValue::Set(Utc::now().naive_utc()),
        }
        .insert(self.db)
        .await?)
    }

    /// Inserts a tournament, a draft season and `team_count` linked teams.
    pub async fn insert_season_with_teams(
        &self,
        format: &str,
        team_count: usize,
    ) -> Result<SeasonFixture, TestError> {
        let tournament = self.insert_mock_tournament("Test Cup").await?;
        let season = self
            .insert_mock_season(tournament.id, "Season 1", format)
            .await?;

        let mut teams = Vec::with_capacity(team_count);
        for index in 1..=team_count {
            let team = self.insert_mock_team(&format!("Team {index}")).await?;
            self.link_season_team(season.id, team.id, index as i32)
                .await?;
            teams.push(team);
        }

        Ok(SeasonFixture {
            tournament,
            season,
            teams,
        })
    }

    pub async fn get_matches(
        &self,
        season_id: i32,
    ) -> Result<Vec<entity::season_match::Model>, TestError> {
        Ok(entity::prelude::SeasonMatch::find()
            .filter(entity::season_match::Column::SeasonId.eq(season_id))
            .all(self.db)
            .await?)
    }

    pub async fn get_standings(
        &self,
        season_id: i32,
    ) -> Result<Vec<entity::standing::Model>, TestError> {
        Ok(entity::prelude::Standing::find()
            .filter(entity::standing::Column::SeasonId.eq(season_id))
            .all(self.db)
            .await?)
    }
}
