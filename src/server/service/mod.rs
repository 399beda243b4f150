//! Service layer for business logic and orchestration.
//!
//! Services coordinate the repositories, the pure engine and the external calendar. Writes that
//! depend on a season's current state run inside a transaction guarded by the season revision
//! and are retried through [`retry::RetryContext`] when another writer moved the revision first.

pub mod calendar;
pub mod matches;
pub mod ranking;
pub mod retry;
pub mod roster;
pub mod schedule;
pub mod standings;
