use crate::errors::ValidationFailure;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

/// One of the five feelings a user can log, in canonical order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Neutral,
    Meh,
    Sad,
    Terrible,
}

impl Mood {
    pub const ALL: [Mood; 5] = [
        Mood::Happy,
        Mood::Neutral,
        Mood::Meh,
        Mood::Sad,
        Mood::Terrible,
    ];

    /// Position on the 1..=5 scale used for trend averages.
    pub fn ordinal(self) -> u8 {
        match self {
            Mood::Terrible => 1,
            Mood::Sad => 2,
            Mood::Meh => 3,
            Mood::Neutral => 4,
            Mood::Happy => 5,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Neutral => "neutral",
            Mood::Meh => "meh",
            Mood::Sad => "sad",
            Mood::Terrible => "terrible",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Mood::Happy => "Happy",
            Mood::Neutral => "Neutral",
            Mood::Meh => "Meh",
            Mood::Sad => "Sad",
            Mood::Terrible => "Terrible",
        }
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Happy => "\u{1F60A}",
            Mood::Neutral => "\u{1F610}",
            Mood::Meh => "\u{1F615}",
            Mood::Sad => "\u{1F622}",
            Mood::Terrible => "\u{1F62B}",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mood {
    type Err = ValidationFailure;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        Mood::ALL
            .into_iter()
            .find(|mood| mood.as_str().eq_ignore_ascii_case(value))
            .ok_or_else(|| ValidationFailure::UnknownMood(value.to_string()))
    }
}

/// Which entries a listing or export shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MoodFilter {
    #[default]
    All,
    Only(Mood),
}

impl MoodFilter {
    pub fn matches(self, mood: Mood) -> bool {
        match self {
            MoodFilter::All => true,
            MoodFilter::Only(wanted) => wanted == mood,
        }
    }
}

impl FromStr for MoodFilter {
    type Err = ValidationFailure;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() || value.eq_ignore_ascii_case("all") {
            return Ok(MoodFilter::All);
        }
        value.parse().map(MoodFilter::Only)
    }
}

/// Weather frozen into an entry when it was saved.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub temperature: i32,
    pub condition: String,
    pub location_name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoodEntry {
    pub id: i64,
    pub timestamp: DateTime<Utc>,
    pub mood: Mood,
    pub note: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weather: Option<WeatherSnapshot>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TrendPeriod {
    #[default]
    Week,
    Month,
    #[serde(alias = "all")]
    AllTime,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeLevel {
    Success,
    Error,
}

/// A short user-facing notification, shown as a toast by the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: NoticeLevel::Error,
            message: message.into(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct CreateEntryRequest {
    pub mood: Option<String>,
    #[serde(default)]
    pub note: String,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateEntryResponse {
    pub entry: MoodEntry,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Default, Deserialize)]
pub struct EntriesQuery {
    pub mood: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WeatherQuery {
    pub lat: Option<f64>,
    pub lon: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct WeatherResponse {
    pub weather: WeatherSnapshot,
    pub notices: Vec<Notice>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TrendQuery {
    #[serde(default)]
    pub period: TrendPeriod,
}

#[derive(Debug, Default, Deserialize)]
pub struct CalendarQuery {
    pub year: Option<i32>,
    pub month: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MoodDistribution {
    pub total: usize,
    pub counts: BTreeMap<Mood, usize>,
    pub percentages: BTreeMap<Mood, u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub display_label: String,
    pub average_mood: f64,
    pub entry_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarDay {
    pub day: u32,
    pub date: NaiveDate,
    pub mood: Option<Mood>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub leading_blanks: u32,
    pub days: Vec<CalendarDay>,
}
