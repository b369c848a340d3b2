use crate::errors::ExportError;
use crate::models::MoodEntry;
use chrono::{NaiveDate, TimeZone};

const HEADERS: [&str; 6] = ["Date", "Mood", "Note", "Temperature", "Weather", "Location"];

/// Renders entries as CSV, dates shown in `tz`.
pub fn render_csv<Tz>(entries: &[MoodEntry], tz: &Tz) -> Result<String, ExportError>
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    if entries.is_empty() {
        return Err(ExportError::NothingToExport);
    }

    let mut lines = Vec::with_capacity(entries.len() + 1);
    lines.push(HEADERS.join(","));
    for entry in entries {
        let (temperature, condition, location) = match &entry.weather {
            Some(weather) => (
                format!("{}°C", weather.temperature),
                weather.condition.as_str(),
                non_empty_or_unknown(&weather.location_name),
            ),
            None => (String::new(), "", "Unknown"),
        };

        let date = entry
            .timestamp
            .with_timezone(tz)
            .format("%-m/%-d/%Y, %-I:%M:%S %p")
            .to_string();
        let row = [
            escape(&date),
            entry.mood.to_string(),
            quote(&entry.note),
            temperature,
            escape(condition),
            escape(location),
        ];
        lines.push(row.join(","));
    }

    Ok(lines.join("\n"))
}

pub fn export_filename(date: NaiveDate) -> String {
    format!("moodmate_export_{}.csv", date.format("%Y-%m-%d"))
}

// Quotes only fields that would otherwise break the row.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        quote(field)
    } else {
        field.to_string()
    }
}

fn quote(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn non_empty_or_unknown(value: &str) -> &str {
    if value.is_empty() { "Unknown" } else { value }
}
