//! Data access layer repositories.
//!
//! Each repository wraps one table (or one link table) and converts rows into the domain types
//! of [`crate::model`]. Repositories are generic over [`sea_orm::ConnectionTrait`] so the same
//! code runs on the pool or inside a transaction. Enumerations stored as strings are decoded
//! here; a value that does not decode surfaces as [`sea_orm::DbErr::Type`].

pub mod matches;
pub mod person;
pub mod season;
pub mod season_team;
pub mod standing;
pub mod team;
pub mod team_member;
pub mod tournament;

use sea_orm::DbErr;

use crate::engine::ValidationError;

fn decode_err(err: ValidationError) -> DbErr {
    DbErr::Type(err.to_string())
}
