//! Team randomisation helpers.
//!
//! Building teams from a pool of people is split into pure steps so that a preview can be
//! shown, re-rolled and then committed without any shared state between calls:
//! [`build_preview_buckets`] assigns people to buckets, [`bucket_team_name`] names them and
//! [`TeamIndex`] finds teams that already have exactly a bucket's members.

use std::collections::{BTreeMap, HashMap, HashSet};

use rand::{seq::SliceRandom, Rng};
use serde::{Deserialize, Serialize};

use crate::{
    engine::error::ValidationError,
    model::{
        person::PersonId,
        team::{TeamId, TeamMembership},
    },
};

/// A selected person and the bucket they are locked to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct RosterEntry {
    pub person_id: PersonId,
    /// 1-based bucket index; `None` lets the randomiser choose
    pub lock: Option<usize>,
}

impl RosterEntry {
    pub fn auto(person_id: PersonId) -> Self {
        Self {
            person_id,
            lock: None,
        }
    }

    pub fn locked(person_id: PersonId, bucket: usize) -> Self {
        Self {
            person_id,
            lock: Some(bucket),
        }
    }
}

/// Canonical form of a team's member set: sorted, without duplicates.
pub type MemberSetKey = Vec<PersonId>;

/// Assigns people to `team_count` buckets.
///
/// Locked entries are placed first, with the lock clamped to `1..=team_count`. The remaining
/// entries are shuffled and each one goes to the currently smallest bucket, the lowest index
/// winning ties. A person listed twice is only placed once.
///
/// # Returns
/// - `Ok(Vec<Vec<PersonId>>)` - Exactly `team_count` buckets, index 0 is bucket 1
/// - `Err(ValidationError::NoTeamBuckets)` - `team_count` is zero
/// - `Err(ValidationError::NoPeopleSelected)` - `entries` is empty
pub fn build_preview_buckets<R: Rng + ?Sized>(
    entries: &[RosterEntry],
    team_count: usize,
    rng: &mut R,
) -> Result<Vec<Vec<PersonId>>, ValidationError> {
    if team_count == 0 {
        return Err(ValidationError::NoTeamBuckets);
    }
    if entries.is_empty() {
        return Err(ValidationError::NoPeopleSelected);
    }

    let mut seen = HashSet::with_capacity(entries.len());
    let entries: Vec<&RosterEntry> = entries
        .iter()
        .filter(|entry| seen.insert(entry.person_id))
        .collect();

    let mut buckets: Vec<Vec<PersonId>> = vec![Vec::new(); team_count];

    for entry in &entries {
        if let Some(lock) = entry.lock {
            let index = lock.clamp(1, team_count) - 1;
            buckets[index].push(entry.person_id);
        }
    }

    let mut remaining: Vec<PersonId> = entries
        .iter()
        .filter(|entry| entry.lock.is_none())
        .map(|entry| entry.person_id)
        .collect();
    remaining.shuffle(rng);

    for person_id in remaining {
        let smallest = buckets
            .iter()
            .enumerate()
            .min_by_key(|(index, bucket)| (bucket.len(), *index))
            .map(|(index, _)| index)
            .unwrap_or_default();

        buckets[smallest].push(person_id);
    }

    Ok(buckets)
}

/// Member names joined with `" - "`, or `"Team {index}"` for an empty bucket.
pub fn bucket_team_name<S: AsRef<str>>(index: usize, member_names: &[S]) -> String {
    if member_names.is_empty() {
        return format!("Team {index}");
    }

    member_names
        .iter()
        .map(AsRef::as_ref)
        .collect::<Vec<_>>()
        .join(" - ")
}

pub fn member_set_key(members: &[PersonId]) -> MemberSetKey {
    let mut key = members.to_vec();
    key.sort_unstable();
    key.dedup();

    key
}

/// Lookup of existing teams by exact member set, built from one membership snapshot.
#[derive(Debug, Clone, Default)]
pub struct TeamIndex {
    by_members: HashMap<MemberSetKey, TeamId>,
}

impl TeamIndex {
    /// When several teams share a member set the lowest team id is kept.
    pub fn from_memberships(snapshot: &[TeamMembership]) -> Self {
        let mut members_by_team: BTreeMap<TeamId, Vec<PersonId>> = BTreeMap::new();
        for membership in snapshot {
            members_by_team
                .entry(membership.team_id)
                .or_default()
                .push(membership.person_id);
        }

        let mut by_members = HashMap::with_capacity(members_by_team.len());
        // BTreeMap iterates in ascending team id, so the first insert per key wins
        for (team_id, members) in members_by_team {
            by_members
                .entry(member_set_key(&members))
                .or_insert(team_id);
        }

        Self { by_members }
    }

    /// The team whose members are exactly `members`. An empty set never matches.
    pub fn find(&self, members: &[PersonId]) -> Option<TeamId> {
        let key = member_set_key(members);
        if key.is_empty() {
            return None;
        }

        self.by_members.get(&key).copied()
    }

    /// Records a newly created team so later buckets in the same batch can reuse it.
    pub fn insert(&mut self, members: &[PersonId], team_id: TeamId) {
        let key = member_set_key(members);
        if !key.is_empty() {
            self.by_members.entry(key).or_insert(team_id);
        }
    }
}
