use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::{
    engine::{
        roster::{build_preview_buckets, bucket_team_name, TeamIndex},
        ValidationError,
    },
    model::{
        api::{RandomizeTeamsDto, RandomizeTeamsRequest, TeamBucketDto},
        person::{Person, PersonId},
        season::SeasonId,
        team::TeamId,
    },
    server::{
        data::{
            person::PersonRepository, season::SeasonRepository,
            season_team::SeasonTeamRepository, team::TeamRepository,
            team_member::TeamMemberRepository,
        },
        error::{season::SeasonError, team::TeamError, Error},
    },
};

/// Team rosters: contact resolution and building teams from randomised buckets.
pub struct RosterService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> RosterService<'a> {
    /// Creates a new instance of [`RosterService`]
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Resolves team rosters to the people that can be contacted.
    ///
    /// Each person appears once, in team order and then membership order. A person is
    /// contactable with an email containing `@` or a non-empty WhatsApp number.
    pub async fn notify_roster(&self, team_ids: &[TeamId]) -> Result<Vec<Person>, Error> {
        let memberships = TeamMemberRepository::new(self.db)
            .get_by_teams(team_ids)
            .await?;

        let mut person_ids: Vec<PersonId> = Vec::with_capacity(memberships.len());
        for membership in memberships {
            if !person_ids.contains(&membership.person_id) {
                person_ids.push(membership.person_id);
            }
        }

        let people = PersonRepository::new(self.db).get_many(&person_ids).await?;

        Ok(person_ids
            .iter()
            .filter_map(|id| people.iter().find(|p| p.id == *id))
            .filter(|p| p.is_contactable())
            .cloned()
            .collect())
    }

    /// Assigns people to team buckets and, unless previewing, turns them into season teams.
    ///
    /// A previously previewed assignment can be committed as is by passing it in
    /// `request.buckets`; otherwise `request.entries` are randomised into `request.team_count`
    /// buckets.
    ///
    /// # Returns
    /// - `Ok(RandomizeTeamsDto)` - One entry per bucket; `team_id` is `None` in a preview
    /// - `Err(Error::SeasonError(SeasonError::NotFound))` - Unknown season
    /// - `Err(Error::TeamError(TeamError::PersonNotFound))` - A bucket references an unknown person
    /// - `Err(Error::ValidationError(_))` - No buckets or no people to assign
    pub async fn randomize(
        &self,
        season_id: SeasonId,
        request: RandomizeTeamsRequest,
        owner_id: Option<&str>,
    ) -> Result<RandomizeTeamsDto, Error> {
        self.ensure_season(season_id).await?;

        let buckets = match request.buckets {
            Some(buckets) if buckets.is_empty() => return Err(ValidationError::NoTeamBuckets.into()),
            Some(buckets) => buckets,
            None => build_preview_buckets(&request.entries, request.team_count, &mut rand::rng())?,
        };

        if !request.preview {
            let buckets = self
                .create_teams_from_buckets(season_id, &buckets, owner_id)
                .await?;

            return Ok(RandomizeTeamsDto { season_id, buckets });
        }

        let people = self.load_people(&buckets).await?;

        let buckets = buckets
            .into_iter()
            .enumerate()
            .map(|(i, members)| TeamBucketDto {
                index: i + 1,
                name: bucket_team_name(i + 1, &member_names(&members, &people)),
                members,
                team_id: None,
                reused: false,
            })
            .collect();

        Ok(RandomizeTeamsDto { season_id, buckets })
    }

    /// Creates one team per bucket and links every team to the season.
    ///
    /// A bucket whose member set exactly matches an existing team reuses that team instead of
    /// creating a duplicate; teams created earlier in the same call are matched as well. New
    /// teams are named after their members, or `Team {index}` when the bucket is empty.
    pub async fn create_teams_from_buckets(
        &self,
        season_id: SeasonId,
        buckets: &[Vec<PersonId>],
        owner_id: Option<&str>,
    ) -> Result<Vec<TeamBucketDto>, Error> {
        self.ensure_season(season_id).await?;
        let people = self.load_people(buckets).await?;

        let txn = self.db.begin().await?;

        let team_repo = TeamRepository::new(&txn);
        let member_repo = TeamMemberRepository::new(&txn);

        let mut index = TeamIndex::from_memberships(&member_repo.get_all().await?);
        let mut result = Vec::with_capacity(buckets.len());

        for (i, bucket) in buckets.iter().enumerate() {
            let mut members: Vec<PersonId> = Vec::with_capacity(bucket.len());
            for &person_id in bucket {
                if !members.contains(&person_id) {
                    members.push(person_id);
                }
            }

            let existing = match index.find(&members) {
                Some(team_id) => team_repo.get(team_id).await?,
                None => None,
            };

            let (team, reused) = match existing {
                Some(team) => (team, true),
                None => {
                    let name = bucket_team_name(i + 1, &member_names(&members, &people));
                    let team = team_repo.create(&name, owner_id).await?;
                    member_repo.add_many(team.id, &members).await?;
                    index.insert(&members, team.id);

                    (team, false)
                }
            };

            result.push(TeamBucketDto {
                index: i + 1,
                name: team.name,
                members,
                team_id: Some(team.id),
                reused,
            });
        }

        let team_ids: Vec<TeamId> = result.iter().filter_map(|b| b.team_id).collect();
        SeasonTeamRepository::new(&txn)
            .link_many(season_id, &team_ids)
            .await?;

        txn.commit().await?;

        tracing::info!(
            season_id = %season_id,
            teams = result.len(),
            reused = result.iter().filter(|b| b.reused).count(),
            "Created teams from buckets"
        );

        Ok(result)
    }

    async fn ensure_season(&self, season_id: SeasonId) -> Result<(), Error> {
        match SeasonRepository::new(self.db).get(season_id).await? {
            Some(_) => Ok(()),
            None => Err(SeasonError::NotFound(season_id).into()),
        }
    }

    /// Every person referenced by the buckets; an unknown id is an error.
    async fn load_people(&self, buckets: &[Vec<PersonId>]) -> Result<Vec<Person>, Error> {
        let mut ids: Vec<PersonId> = buckets.iter().flatten().copied().collect();
        ids.sort_unstable();
        ids.dedup();

        let people = PersonRepository::new(self.db).get_many(&ids).await?;

        if let Some(missing) = ids.iter().find(|id| !people.iter().any(|p| p.id == **id)) {
            return Err(TeamError::PersonNotFound(*missing).into());
        }

        Ok(people)
    }
}

fn member_names<'p>(members: &[PersonId], people: &'p [Person]) -> Vec<&'p str> {
    members
        .iter()
        .filter_map(|id| people.iter().find(|p| p.id == *id))
        .map(|p| p.name.as_str())
        .collect()
}
