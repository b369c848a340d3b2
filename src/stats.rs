use crate::models::{Mood, MoodDistribution, MoodEntry, TrendPeriod, TrendPoint};
use chrono::{DateTime, Duration, Months, NaiveDate, TimeZone, Utc};
use std::collections::BTreeMap;

pub fn compute_distribution(entries: &[MoodEntry]) -> MoodDistribution {
    let mut counts: BTreeMap<Mood, usize> = Mood::ALL.into_iter().map(|mood| (mood, 0)).collect();
    for entry in entries {
        *counts.entry(entry.mood).or_default() += 1;
    }

    let total = entries.len();
    let percentages = counts
        .iter()
        .map(|(&mood, &count)| (mood, percentage(count, total)))
        .collect();

    MoodDistribution {
        total,
        counts,
        percentages,
    }
}

/// Daily average mood over `period`, ending at `now`.
///
/// Days are taken in `now`'s time zone, so passing `Local::now()` groups by
/// the user's calendar while tests can pin a fixed offset.
pub fn compute_trend<Tz: TimeZone>(
    entries: &[MoodEntry],
    period: TrendPeriod,
    now: DateTime<Tz>,
) -> Vec<TrendPoint> {
    let tz = now.timezone();
    let start = window_start(period, now).map(|start| start.with_timezone(&Utc));

    let mut days: BTreeMap<NaiveDate, (u32, usize)> = BTreeMap::new();
    for entry in entries {
        if start.is_some_and(|start| entry.timestamp < start) {
            continue;
        }
        let date = entry.timestamp.with_timezone(&tz).date_naive();
        let (sum, count) = days.entry(date).or_default();
        *sum += u32::from(entry.mood.ordinal());
        *count += 1;
    }

    days.into_iter()
        .map(|(date, (sum, count))| TrendPoint {
            date,
            display_label: date.format("%b %-d").to_string(),
            average_mood: f64::from(sum) / count as f64,
            entry_count: count,
        })
        .collect()
}

fn window_start<Tz: TimeZone>(period: TrendPeriod, now: DateTime<Tz>) -> Option<DateTime<Tz>> {
    match period {
        TrendPeriod::Week => Some(now - Duration::days(7)),
        TrendPeriod::Month => {
            let fallback = now.clone() - Duration::days(30);
            Some(now.checked_sub_months(Months::new(1)).unwrap_or(fallback))
        }
        TrendPeriod::AllTime => None,
    }
}

fn percentage(count: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    (count as f64 / total as f64 * 100.0).round() as u32
}
