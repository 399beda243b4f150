//! Domain records and API payloads.
//!
//! These types are plain data: they carry no persistence or request-handling logic and are
//! shared between the engine, the repositories and the HTTP controllers.

pub mod api;
pub mod matches;
pub mod person;
pub mod season;
pub mod standing;
pub mod team;
pub mod tournament;

pub use matches::{BracketPosition, Match, MatchId, MatchStatus, NewMatch};
pub use person::{Person, PersonId};
pub use season::{Format, PriorityMode, Season, SeasonId, SeasonStatus};
pub use standing::Standing;
pub use team::{Team, TeamId, TeamMembership};
pub use tournament::{Tournament, TournamentId};
