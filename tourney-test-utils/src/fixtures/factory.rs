//! In-memory model builders shared by the fixtures.

use chrono::{DateTime, TimeZone, Utc};
use sea_orm::ActiveValue;

/// Fixed reference time for ordering-sensitive fixtures.
pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0)
        .single()
        .unwrap_or_else(Utc::now)
}

pub fn mock_match_active_model(
    season_id: i32,
    round: i32,
    match_number: i32,
    team1_id: Option<i32>,
    team2_id: Option<i32>,
) -> entity::season_match::ActiveModel {
    let now = Utc::now().naive_utc();

    entity::season_match::ActiveModel {
        season_id: ActiveValue::Set(season_id),
        round: ActiveValue::Set(round),
        match_number: ActiveValue::Set(match_number),
        bracket_position: ActiveValue::Set(None),
        team1_id: ActiveValue::Set(team1_id),
        team2_id: ActiveValue::Set(team2_id),
        team1_score: ActiveValue::Set(None),
        team2_score: ActiveValue::Set(None),
        winner_id: ActiveValue::Set(None),
        status: ActiveValue::Set("scheduled".to_string()),
        scheduled_at: ActiveValue::Set(None),
        calendar_event_id: ActiveValue::Set(None),
        calendar_provider: ActiveValue::Set(None),
        created_at: ActiveValue::Set(now),
        updated_at: ActiveValue::Set(now),
        ..Default::default()
    }
}
