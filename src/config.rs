use std::{env, path::PathBuf, time::Duration};

pub const DEFAULT_PORT: u16 = 8080;
pub const DEFAULT_DATA_PATH: &str = "data/entries.json";
pub const DEFAULT_WEATHER_URL: &str = "https://api.openweathermap.org/data/2.5/weather";
const DEFAULT_WEATHER_TIMEOUT_SECS: u64 = 10;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub port: u16,
    pub data_path: PathBuf,
    pub weather_api_key: Option<String>,
    pub weather_base_url: String,
    pub weather_timeout: Duration,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from any key lookup. Unparsable values fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = non_empty("PORT")
            .and_then(|value| value.trim().parse::<u16>().ok())
            .unwrap_or(DEFAULT_PORT);

        let data_path = non_empty("APP_DATA_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DATA_PATH));

        let weather_timeout = non_empty("WEATHER_TIMEOUT_SECS")
            .and_then(|value| value.trim().parse::<u64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_WEATHER_TIMEOUT_SECS);

        Self {
            port,
            data_path,
            weather_api_key: non_empty("OPENWEATHER_API_KEY"),
            weather_base_url: non_empty("OPENWEATHER_BASE_URL")
                .unwrap_or_else(|| DEFAULT_WEATHER_URL.to_string()),
            weather_timeout: Duration::from_secs(weather_timeout),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(pairs: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_nothing_is_set() {
        let config = config_from(&[]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_PATH));
        assert_eq!(config.weather_api_key, None);
        assert_eq!(config.weather_base_url, DEFAULT_WEATHER_URL);
        assert_eq!(config.weather_timeout, Duration::from_secs(10));
    }

    #[test]
    fn values_are_read_and_bad_ones_ignored() {
        let config = config_from(&[
            ("PORT", "9123"),
            ("APP_DATA_PATH", "/tmp/moods.json"),
            ("OPENWEATHER_API_KEY", "secret"),
            ("WEATHER_TIMEOUT_SECS", "soon"),
        ]);
        assert_eq!(config.port, 9123);
        assert_eq!(config.data_path, PathBuf::from("/tmp/moods.json"));
        assert_eq!(config.weather_api_key.as_deref(), Some("secret"));
        assert_eq!(config.weather_timeout, Duration::from_secs(10));

        assert_eq!(config_from(&[("PORT", "http")]).port, DEFAULT_PORT);
        assert_eq!(config_from(&[("OPENWEATHER_API_KEY", "  ")]).weather_api_key, None);
    }
}
