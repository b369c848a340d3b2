use crate::errors::ValidationFailure;
use crate::models::{Mood, MoodEntry, MoodFilter, WeatherSnapshot};
use chrono::{DateTime, Utc};

/// Checks "save mood" input before anything else happens.
pub fn validate_entry(mood: Option<Mood>, note: &str) -> Result<Mood, ValidationFailure> {
    let mood = mood.ok_or(ValidationFailure::MissingMood)?;
    if note.trim().is_empty() {
        return Err(ValidationFailure::EmptyNote);
    }
    Ok(mood)
}

/// The entry collection, most recent first.
#[derive(Debug, Clone, Default)]
pub struct Journal {
    entries: Vec<MoodEntry>,
}

impl Journal {
    pub fn new(entries: Vec<MoodEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[MoodEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn add_entry(
        &mut self,
        mood: Option<Mood>,
        note: &str,
        weather: Option<WeatherSnapshot>,
        now: DateTime<Utc>,
    ) -> Result<&MoodEntry, ValidationFailure> {
        let mood = validate_entry(mood, note)?;
        let entry = MoodEntry {
            id: self.next_id(now),
            timestamp: now,
            mood,
            note: note.to_string(),
            weather,
        };
        self.entries.insert(0, entry);
        Ok(&self.entries[0])
    }

    pub fn filtered(&self, filter: MoodFilter) -> Vec<MoodEntry> {
        self.entries
            .iter()
            .filter(|entry| filter.matches(entry.mood))
            .cloned()
            .collect()
    }

    // Millisecond clock ids, bumped past the newest id when the clock stalls.
    fn next_id(&self, now: DateTime<Utc>) -> i64 {
        let candidate = now.timestamp_millis();
        match self.entries.iter().map(|entry| entry.id).max() {
            Some(latest) if latest >= candidate => latest + 1,
            _ => candidate,
        }
    }
}
