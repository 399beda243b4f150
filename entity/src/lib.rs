//! sea-orm entities for every persisted table.
//!
//! Enumerations (season format, statuses, bracket position, priority mode) are stored as their
//! canonical strings and decoded at the repository boundary.

pub mod prelude;

pub mod person;
pub mod season;
pub mod season_match;
pub mod season_team;
pub mod standing;
pub mod team;
pub mod team_member;
pub mod tournament;
