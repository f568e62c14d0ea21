use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    models::{Alert, DailyScore, FootData, Thresholds},
    utils::{iso_day, iso_day_of_ms, BoundedLog},
};

use super::risk;

pub const MAX_HISTORY_DAYS: usize = 30;

pub fn new_history() -> BoundedLog<DailyScore> {
    BoundedLog::new(MAX_HISTORY_DAYS)
}

/// Today's entry built from the live frame and the alert log.
pub fn daily_snapshot<'a, I>(
    now: DateTime<Utc>,
    data: &FootData,
    thresholds: &Thresholds,
    alerts: I,
) -> DailyScore
where
    I: IntoIterator<Item = &'a Alert>,
{
    let date = iso_day(now);
    let alert_count = alerts
        .into_iter()
        .filter(|alert| iso_day_of_ms(alert.timestamp).as_deref() == Some(date.as_str()))
        .count();

    DailyScore {
        score: risk::score(data, thresholds),
        max_pressure: data.max_pressure(),
        max_temperature: data.max_temperature(),
        alert_count,
        date,
    }
}

/// Replaces any entry for the same date and puts `entry` first.
pub fn upsert(history: &mut BoundedLog<DailyScore>, entry: DailyScore) {
    history.retain(|existing| existing.date != entry.date);
    history.push_front(entry);
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HistorySummary {
    pub average_score: f64,
    pub average_max_pressure: f64,
    pub total_alerts: usize,
    pub peak_score: f64,
}

/// Trend figures over the recorded days; `None` when nothing was recorded yet.
pub fn summarize<'a, I>(entries: I) -> Option<HistorySummary>
where
    I: IntoIterator<Item = &'a DailyScore>,
{
    let mut days = 0usize;
    let mut score_sum = 0.0;
    let mut pressure_sum = 0.0;
    let mut total_alerts = 0;
    let mut peak_score = f64::NEG_INFINITY;

    for entry in entries {
        days += 1;
        score_sum += entry.score;
        pressure_sum += entry.max_pressure;
        total_alerts += entry.alert_count;
        peak_score = peak_score.max(entry.score);
    }

    if days == 0 {
        return None;
    }

    Some(HistorySummary {
        average_score: score_sum / days as f64,
        average_max_pressure: pressure_sum / days as f64,
        total_alerts,
        peak_score,
    })
}
