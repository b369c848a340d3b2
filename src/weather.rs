use crate::config::AppConfig;
use crate::errors::LookupFailure;
use crate::models::{Notice, WeatherSnapshot};
use async_trait::async_trait;
use serde::Deserialize;
use tracing::{debug, warn};

/// Used when geolocation is unavailable (New York).
pub const FALLBACK_COORDINATES: Coordinates = Coordinates {
    latitude: 40.7128,
    longitude: -74.0060,
};
pub const FALLBACK_TEMPERATURE: i32 = 25;
pub const FALLBACK_CONDITION: &str = "Clear";
pub const FALLBACK_LOCATION: &str = "Unknown Location";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    pub fn from_pair(latitude: Option<f64>, longitude: Option<f64>) -> Option<Self> {
        match (latitude, longitude) {
            (Some(latitude), Some(longitude)) if latitude.is_finite() && longitude.is_finite() => {
                Some(Self {
                    latitude,
                    longitude,
                })
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WeatherReading {
    pub temperature: i32,
    pub condition: String,
    pub location_name: String,
}

impl From<WeatherReading> for WeatherSnapshot {
    fn from(reading: WeatherReading) -> Self {
        Self {
            temperature: reading.temperature,
            condition: reading.condition,
            location_name: reading.location_name,
        }
    }
}

#[async_trait]
pub trait WeatherLookup: Send + Sync {
    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherReading, LookupFailure>;
}

/// Current conditions from the OpenWeatherMap API.
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(config: &AppConfig) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder()
            .timeout(config.weather_timeout)
            .build()?;
        Ok(Self {
            client,
            base_url: config.weather_base_url.clone(),
            api_key: config.weather_api_key.clone(),
        })
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherClient {
    async fn fetch(&self, coordinates: Coordinates) -> Result<WeatherReading, LookupFailure> {
        let api_key = self.api_key.as_deref().ok_or(LookupFailure::MissingApiKey)?;

        debug!(
            lat = coordinates.latitude,
            lon = coordinates.longitude,
            "fetching current weather"
        );

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("lat", coordinates.latitude.to_string()),
                ("lon", coordinates.longitude.to_string()),
                ("units", "metric".to_string()),
                ("appid", api_key.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupFailure::Status(status));
        }

        let body: OpenWeatherResponse = response
            .json()
            .await
            .map_err(|err| LookupFailure::Malformed(err.to_string()))?;
        normalize(body)
    }
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherResponse {
    #[serde(default)]
    pub name: String,
    pub main: OpenWeatherMain,
    #[serde(default)]
    pub weather: Vec<OpenWeatherCondition>,
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherMain {
    pub temp: f64,
}

#[derive(Debug, Deserialize)]
pub struct OpenWeatherCondition {
    pub main: String,
}

pub fn normalize(body: OpenWeatherResponse) -> Result<WeatherReading, LookupFailure> {
    let condition = body
        .weather
        .into_iter()
        .next()
        .map(|weather| weather.main)
        .ok_or_else(|| LookupFailure::Malformed("no weather conditions".to_string()))?;

    if !body.main.temp.is_finite() {
        return Err(LookupFailure::Malformed("temperature is not a number".to_string()));
    }

    Ok(WeatherReading {
        temperature: body.main.temp.round() as i32,
        condition,
        location_name: body.name,
    })
}

/// Weather to attach to a new entry, plus any notices for the user.
#[derive(Debug, Clone, PartialEq)]
pub struct AmbientWeather {
    pub snapshot: WeatherSnapshot,
    pub notices: Vec<Notice>,
}

/// Looks up the weather, substituting fixed fallbacks instead of failing.
pub async fn ambient_weather(
    lookup: &dyn WeatherLookup,
    coordinates: Option<Coordinates>,
) -> AmbientWeather {
    let mut notices = Vec::new();
    let coordinates = coordinates.unwrap_or_else(|| {
        notices.push(Notice::error("Location access denied. Using default location."));
        FALLBACK_COORDINATES
    });

    let snapshot = match lookup.fetch(coordinates).await {
        Ok(reading) => reading.into(),
        Err(err) => {
            warn!("weather lookup failed, using fallback: {err}");
            notices.push(Notice::error("Could not fetch weather data."));
            fallback_snapshot()
        }
    };

    AmbientWeather { snapshot, notices }
}

pub fn fallback_snapshot() -> WeatherSnapshot {
    WeatherSnapshot {
        temperature: FALLBACK_TEMPERATURE,
        condition: FALLBACK_CONDITION.to_string(),
        location_name: FALLBACK_LOCATION.to_string(),
    }
}
