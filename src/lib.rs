pub mod app;
pub mod calendar;
pub mod config;
pub mod errors;
pub mod export;
pub mod handlers;
pub mod journal;
pub mod models;
pub mod stats;
pub mod storage;
pub mod ui;
pub mod state;
pub mod weather;

pub use app::router;
pub use config::AppConfig;
pub use state::AppState;
pub use storage::{EntryStore, JsonFileStore};
pub use weather::{OpenWeatherClient, WeatherLookup};
