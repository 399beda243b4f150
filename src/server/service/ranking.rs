use std::collections::HashMap;

use chrono::{DateTime, Utc};
use sea_orm::DatabaseConnection;

use crate::{
    engine::{
        ranking::{
            hall_of, next_match, podium, team_achievements, tournament_podium, HallInput, HallKind,
            Viewer,
        },
        standings::rank,
    },
    model::{
        api::{AchievementsDto, HallOfFameDto, SeasonSummaryDto, TournamentSummaryDto},
        season::{Season, SeasonId},
        standing::Standing,
        team::TeamId,
        tournament::TournamentId,
    },
    server::{
        data::{
            matches::MatchRepository, person::PersonRepository, season::SeasonRepository,
            standing::StandingRepository, team::TeamRepository,
            team_member::TeamMemberRepository, tournament::TournamentRepository,
        },
        error::{season::SeasonError, team::TeamError, tournament::TournamentError, Error},
    },
};

/// Read-only presentation queries: podiums, upcoming matches, halls and achievements.
pub struct RankingService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RankingService<'a> {
    /// Creates a new instance of [`RankingService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Ranked standings, podium and the match coming up next for one season.
    ///
    /// The podium follows the season's own display flags.
    pub async fn season_summary(
        &self,
        season_id: SeasonId,
        now: DateTime<Utc>,
    ) -> Result<SeasonSummaryDto, Error> {
        let (season, _) = SeasonRepository::new(self.db)
            .get(season_id)
            .await?
            .ok_or(SeasonError::NotFound(season_id))?;

        let standings = rank(
            StandingRepository::new(self.db)
                .get_by_season(season_id)
                .await?,
        );
        let matches = MatchRepository::new(self.db)
            .get_by_season(season_id)
            .await?;

        Ok(SeasonSummaryDto {
            podium: podium(season.id, season.podium_flags(), &standings),
            next_match: next_match(&matches, now).cloned(),
            season,
            standings,
        })
    }

    /// A tournament with its seasons and the podium of its latest completed season.
    ///
    /// A private tournament is reported as not found to anonymous viewers.
    pub async fn tournament_summary(
        &self,
        tournament_id: TournamentId,
        viewer: Viewer,
    ) -> Result<TournamentSummaryDto, Error> {
        let tournament = TournamentRepository::new(self.db)
            .get(tournament_id)
            .await?
            .filter(|tournament| viewer.can_see(tournament.is_private))
            .ok_or(TournamentError::NotFound(tournament_id))?;

        let seasons = SeasonRepository::new(self.db)
            .get_by_tournament(tournament_id)
            .await?;
        let standings = self.standings_by_season(&seasons).await?;

        Ok(TournamentSummaryDto {
            podium: tournament_podium(&tournament, &seasons, &standings),
            tournament,
            seasons,
        })
    }

    pub async fn hall_of_fame(&self, kind: HallKind, viewer: Viewer) -> Result<HallOfFameDto, Error> {
        let seasons = SeasonRepository::new(self.db).get_all().await?;
        let standings_by_season = self.standings_by_season(&seasons).await?;
        let memberships = TeamMemberRepository::new(self.db).get_all().await?;
        let people = PersonRepository::new(self.db).get_all().await?;
        let teams = TeamRepository::new(self.db).get_all().await?;

        let input = HallInput {
            seasons: &seasons,
            standings_by_season: &standings_by_season,
            memberships: &memberships,
            people: &people,
            teams: &teams,
        };

        Ok(HallOfFameDto {
            kind,
            entries: hall_of(kind, &input, viewer),
        })
    }

    /// Completed seasons in which the team finished first or last.
    ///
    /// A private team is reported as not found to anonymous viewers.
    pub async fn team_achievements(
        &self,
        team_id: TeamId,
        viewer: Viewer,
    ) -> Result<AchievementsDto, Error> {
        let visible = TeamRepository::new(self.db)
            .get(team_id)
            .await?
            .is_some_and(|team| viewer.can_see(team.is_private));
        if !visible {
            return Err(TeamError::NotFound(team_id).into());
        }

        let seasons = SeasonRepository::new(self.db).get_all().await?;
        let standings = self.standings_by_season(&seasons).await?;

        Ok(AchievementsDto {
            team_id,
            achievements: team_achievements(team_id, &seasons, &standings),
        })
    }

    /// Stored standings of the completed seasons among `seasons`, keyed by season.
    async fn standings_by_season(
        &self,
        seasons: &[Season],
    ) -> Result<HashMap<SeasonId, Vec<Standing>>, Error> {
        let completed: Vec<SeasonId> = seasons
            .iter()
            .filter(|s| s.is_completed())
            .map(|s| s.id)
            .collect();

        let mut by_season: HashMap<SeasonId, Vec<Standing>> = HashMap::new();
        for standing in StandingRepository::new(self.db)
            .get_by_seasons(&completed)
            .await?
        {
            by_season.entry(standing.season_id).or_default().push(standing);
        }

        Ok(by_season)
    }
}
