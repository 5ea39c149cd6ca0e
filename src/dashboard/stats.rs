//! Aggregates computed from the fetched entry list.

use chrono::NaiveDate;

use crate::models::daily_log::LogEntry;

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Summary {
    pub average_mood: Option<f64>,
    pub average_sleep: Option<f64>,
    /// Truncated toward zero.
    pub average_steps: Option<i64>,
}

/// Means over the entries that carry a value; a column with no values has no mean.
pub fn summarize(entries: &[LogEntry]) -> Summary {
    Summary {
        average_mood: mean(entries.iter().filter_map(|e| e.mood.map(f64::from))),
        average_sleep: mean(entries.iter().filter_map(|e| e.sleep_hours)),
        average_steps: mean(entries.iter().filter_map(|e| e.steps.map(|s| s as f64)))
            .map(|m| m.trunc() as i64),
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub mood: i32,
}

/// Mood over time, oldest first. Entries without a mood are skipped.
pub fn mood_trend(entries: &[LogEntry]) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = entries
        .iter()
        .filter_map(|e| e.mood.map(|mood| TrendPoint { date: e.log_date, mood }))
        .collect();
    points.sort_by_key(|p| p.date);
    points
}

/// Entries oldest first, for the details table.
pub fn chronological(entries: &[LogEntry]) -> Vec<LogEntry> {
    let mut sorted = entries.to_vec();
    sorted.sort_by_key(|e| e.log_date);
    sorted
}

pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn mean(values: impl Iterator<Item = f64>) -> Option<f64> {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    (count > 0).then(|| sum / count as f64)
}
