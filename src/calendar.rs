use crate::models::{CalendarDay, CalendarMonth, MoodEntry};
use chrono::{Datelike, NaiveDate, TimeZone};
use std::collections::HashMap;

/// One month of the mood calendar.
///
/// A day shows the mood of its first entry in journal order, i.e. the most
/// recent one. Trend charts average instead; the two views are kept apart.
pub fn calendar_month<Tz: TimeZone>(
    entries: &[MoodEntry],
    year: i32,
    month: u32,
    tz: &Tz,
) -> Option<CalendarMonth> {
    let first = NaiveDate::from_ymd_opt(year, month, 1)?;
    let next = if month == 12 {
        NaiveDate::from_ymd_opt(year + 1, 1, 1)?
    } else {
        NaiveDate::from_ymd_opt(year, month + 1, 1)?
    };

    let mut moods = HashMap::new();
    for entry in entries {
        let date = entry.timestamp.with_timezone(tz).date_naive();
        if date >= first && date < next {
            moods.entry(date).or_insert(entry.mood);
        }
    }

    let days = first
        .iter_days()
        .take_while(|date| *date < next)
        .map(|date| CalendarDay {
            day: date.day(),
            date,
            mood: moods.get(&date).copied(),
        })
        .collect();

    Some(CalendarMonth {
        year,
        month,
        label: first.format("%B %Y").to_string(),
        leading_blanks: first.weekday().num_days_from_sunday(),
        days,
    })
}
