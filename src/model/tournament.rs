use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::ranking::PodiumFlags;

pub type TournamentId = i32;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "server", derive(utoipa::ToSchema))]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    pub is_private: bool,
    pub show_champion: bool,
    pub show_loser: bool,
    pub champion_label: String,
    pub loser_label: String,
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Tournament {
    pub fn podium_flags(&self) -> PodiumFlags {
        PodiumFlags {
            show_champion: self.show_champion,
            show_loser: self.show_loser,
        }
    }
}
