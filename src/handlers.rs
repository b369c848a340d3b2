use crate::calendar::calendar_month;
use crate::errors::AppError;
use crate::export::{export_filename, render_csv};
use crate::journal::validate_entry;
use crate::models::{
    CalendarMonth, CalendarQuery, CreateEntryRequest, CreateEntryResponse, EntriesQuery, Mood,
    MoodDistribution, MoodEntry, MoodFilter, Notice, TrendPoint, TrendQuery, WeatherQuery,
    WeatherResponse,
};
use crate::state::AppState;
use crate::stats::{compute_distribution, compute_trend};
use crate::ui::render_index;
use crate::weather::{ambient_weather, Coordinates};
use axum::{
    extract::{Query, State},
    http::header,
    response::{Html, IntoResponse},
    Json,
};
use chrono::{Datelike, Local, Utc};
use tracing::{error, info};

pub async fn index(State(state): State<AppState>) -> Html<String> {
    let today = Local::now().date_naive();
    let journal = state.journal.lock().await;
    Html(render_index(today, journal.len()))
}

pub async fn list_entries(
    State(state): State<AppState>,
    Query(query): Query<EntriesQuery>,
) -> Result<Json<Vec<MoodEntry>>, AppError> {
    let filter = parse_filter(query.mood.as_deref())?;
    let journal = state.journal.lock().await;
    Ok(Json(journal.filtered(filter)))
}

pub async fn create_entry(
    State(state): State<AppState>,
    Json(payload): Json<CreateEntryRequest>,
) -> Result<Json<CreateEntryResponse>, AppError> {
    let mood = payload
        .mood
        .as_deref()
        .filter(|mood| !mood.trim().is_empty())
        .map(str::parse::<Mood>)
        .transpose()?;
    validate_entry(mood, &payload.note)?;

    let coordinates = Coordinates::from_pair(payload.latitude, payload.longitude);
    let ambient = ambient_weather(state.weather.as_ref(), coordinates).await;
    let mut notices = ambient.notices;

    let mut journal = state.journal.lock().await;
    let entry = journal
        .add_entry(mood, &payload.note, Some(ambient.snapshot), Utc::now())?
        .clone();
    info!(id = entry.id, mood = %entry.mood, "saved mood entry");

    if let Err(err) = state.store.save(journal.entries()).await {
        error!("failed to persist journal: {err}");
        notices.push(Notice::error("Could not write entries to disk."));
    }
    notices.push(Notice::success("Mood saved successfully!"));

    Ok(Json(CreateEntryResponse { entry, notices }))
}

pub async fn get_weather(
    State(state): State<AppState>,
    Query(query): Query<WeatherQuery>,
) -> Json<WeatherResponse> {
    let coordinates = Coordinates::from_pair(query.lat, query.lon);
    let ambient = ambient_weather(state.weather.as_ref(), coordinates).await;
    Json(WeatherResponse {
        weather: ambient.snapshot,
        notices: ambient.notices,
    })
}

pub async fn get_distribution(State(state): State<AppState>) -> Json<MoodDistribution> {
    let journal = state.journal.lock().await;
    Json(compute_distribution(journal.entries()))
}

pub async fn get_trend(
    State(state): State<AppState>,
    Query(query): Query<TrendQuery>,
) -> Json<Vec<TrendPoint>> {
    let journal = state.journal.lock().await;
    Json(compute_trend(journal.entries(), query.period, Local::now()))
}

pub async fn get_calendar(
    State(state): State<AppState>,
    Query(query): Query<CalendarQuery>,
) -> Result<Json<CalendarMonth>, AppError> {
    let today = Local::now().date_naive();
    let year = query.year.unwrap_or(today.year());
    let month = query.month.unwrap_or(today.month());

    let journal = state.journal.lock().await;
    calendar_month(journal.entries(), year, month, &Local)
        .map(Json)
        .ok_or_else(|| AppError::bad_request(format!("invalid month {year}-{month}")))
}

pub async fn export_csv(
    State(state): State<AppState>,
    Query(query): Query<EntriesQuery>,
) -> Result<impl IntoResponse, AppError> {
    let filter = parse_filter(query.mood.as_deref())?;
    let entries = state.journal.lock().await.filtered(filter);
    let csv = render_csv(&entries, &Local)?;
    let filename = export_filename(Local::now().date_naive());
    info!(rows = entries.len(), %filename, "exported entries");

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{filename}\""),
            ),
        ],
        csv,
    ))
}

fn parse_filter(raw: Option<&str>) -> Result<MoodFilter, AppError> {
    Ok(raw.unwrap_or_default().parse::<MoodFilter>()?)
}
