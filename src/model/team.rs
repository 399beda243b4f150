use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::person::PersonId;

pub type TeamId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub logo_url: Option<String>,
    pub banner_url: Option<String>,
    /// Hidden from anonymous viewers
    pub is_private: bool,
    /// Identifier of the creating account, issued by the external auth provider
    pub owner_id: Option<String>,
}

/// Links a person to a team. Rosters are ordered by `created_at`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct TeamMembership {
    pub team_id: TeamId,
    pub person_id: PersonId,
    pub created_at: DateTime<Utc>,
}
