use crate::journal::Journal;
use crate::models::MoodEntry;
use crate::storage::EntryStore;
use crate::weather::WeatherLookup;
use std::sync::Arc;
use tokio::sync::Mutex;

#[derive(Clone)]
pub struct AppState {
    pub journal: Arc<Mutex<Journal>>,
    pub store: Arc<dyn EntryStore>,
    pub weather: Arc<dyn WeatherLookup>,
}

impl AppState {
    pub fn new(
        entries: Vec<MoodEntry>,
        store: Arc<dyn EntryStore>,
        weather: Arc<dyn WeatherLookup>,
    ) -> Self {
        Self {
            journal: Arc::new(Mutex::new(Journal::new(entries))),
            store,
            weather,
        }
    }
}
