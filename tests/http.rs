use once_cell::sync::Lazy;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::process::{Child, Command, Stdio};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tokio::time::sleep;

#[derive(Debug, Deserialize)]
struct Weather {
    temperature: i32,
    condition: String,
    location_name: String,
}

#[derive(Debug, Deserialize)]
struct Entry {
    id: i64,
    mood: String,
    note: String,
    weather: Option<Weather>,
}

#[derive(Debug, Deserialize)]
struct Notice {
    level: String,
    message: String,
}

#[derive(Debug, Deserialize)]
struct CreateResponse {
    entry: Entry,
    notices: Vec<Notice>,
}

#[derive(Debug, Deserialize)]
struct Distribution {
    total: usize,
    counts: BTreeMap<String, usize>,
}

#[derive(Debug, Deserialize)]
struct TrendPoint {
    average_mood: f64,
    entry_count: usize,
}

struct TestServer {
    base_url: String,
    child: Child,
}

impl Drop for TestServer {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

static TEST_LOCK: Lazy<Mutex<()>> = Lazy::new(|| Mutex::new(()));
static SERVER: Lazy<Mutex<Option<Arc<TestServer>>>> = Lazy::new(|| Mutex::new(None));

#[cfg(unix)]
mod cleanup {
    use std::sync::{Mutex, Once};

    static REGISTER: Once = Once::new();
    static PIDS: Mutex<Vec<i32>> = Mutex::new(Vec::new());

    pub fn register(pid: u32) {
        if let Ok(mut pids) = PIDS.lock() {
            pids.push(pid as i32);
        }
        REGISTER.call_once(|| unsafe {
            libc::atexit(on_exit);
        });
    }

    pub fn registered() -> Vec<i32> {
        PIDS.lock().map(|pids| pids.clone()).unwrap_or_default()
    }

    extern "C" fn on_exit() {
        let Ok(pids) = PIDS.lock() else { return };
        for &pid in pids.iter().filter(|pid| **pid > 0) {
            unsafe {
                libc::kill(pid, libc::SIGTERM);
            }
        }
    }
}

fn pick_free_port() -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}

fn unique_data_path() -> String {
    let nanos = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let mut path = std::env::temp_dir();
    path.push(format!("moodmate_http_{}_{}.json", std::process::id(), nanos));
    path.to_string_lossy().to_string()
}

async fn wait_until_ready(base_url: &str) {
    let client = Client::new();
    let deadline = Instant::now() + Duration::from_secs(3);
    loop {
        if let Ok(resp) = client.get(format!("{base_url}/api/entries")).send().await {
            if resp.status().is_success() {
                return;
            }
        }
        if Instant::now() > deadline {
            panic!("server did not become ready");
        }
        sleep(Duration::from_millis(100)).await;
    }
}

async fn spawn_server() -> TestServer {
    let port = pick_free_port();
    let data_path = unique_data_path();
    let child = Command::new(env!("CARGO_BIN_EXE_moodmate"))
        .env("PORT", port.to_string())
        .env("APP_DATA_PATH", data_path)
        .env_remove("OPENWEATHER_API_KEY")
        .env("RUST_LOG", "info")
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
        .expect("failed to spawn server");

    #[cfg(unix)]
    cleanup::register(child.id());

    let base_url = format!("http://127.0.0.1:{port}");
    wait_until_ready(&base_url).await;

    TestServer { base_url, child }
}

async fn shared_server() -> Arc<TestServer> {
    let mut guard = SERVER.lock().await;
    if let Some(server) = guard.as_ref() {
        return Arc::clone(server);
    }
    let server = Arc::new(spawn_server().await);
    *guard = Some(Arc::clone(&server));
    server
}

async fn list_entries(client: &Client, base_url: &str) -> Vec<Entry> {
    client
        .get(format!("{base_url}/api/entries"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap()
}

#[tokio::test]
async fn http_create_entry_prepends_with_fallback_weather() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = list_entries(&client, &server.base_url).await;

    let response = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&serde_json::json!({ "mood": "happy", "note": "sunny walk" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let created: CreateResponse = response.json().await.unwrap();

    assert_eq!(created.entry.mood, "happy");
    assert_eq!(created.entry.note, "sunny walk");
    let weather = created.entry.weather.as_ref().expect("weather snapshot");
    assert_eq!(weather.temperature, 25);
    assert_eq!(weather.condition, "Clear");
    assert_eq!(weather.location_name, "Unknown Location");
    assert!(created.notices.iter().any(|n| n.level == "error"));
    assert_eq!(
        created.notices.last().map(|n| n.message.as_str()),
        Some("Mood saved successfully!")
    );

    let after = list_entries(&client, &server.base_url).await;
    assert_eq!(after.len(), before.len() + 1);
    assert_eq!(after[0].id, created.entry.id);
}

#[tokio::test]
async fn http_invalid_entries_are_rejected() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before = list_entries(&client, &server.base_url).await;

    for payload in [
        serde_json::json!({ "mood": null, "note": "no mood" }),
        serde_json::json!({ "mood": "sad", "note": "" }),
        serde_json::json!({ "mood": "grumpy", "note": "unknown mood" }),
    ] {
        let response = client
            .post(format!("{}/api/entries", server.base_url))
            .json(&payload)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = response.json().await.unwrap();
        assert!(body["error"].is_string());
    }

    let after = list_entries(&client, &server.base_url).await;
    assert_eq!(after.len(), before.len());
}

#[tokio::test]
async fn http_stats_reflect_new_entries() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let before: Distribution = client
        .get(format!("{}/api/stats/distribution", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(before.counts.len(), 5);

    let response = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&serde_json::json!({
            "mood": "terrible",
            "note": "flat tyre",
            "latitude": 48.85,
            "longitude": 2.35
        }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let after: Distribution = client
        .get(format!("{}/api/stats/distribution", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(after.total, before.total + 1);
    assert_eq!(after.counts["terrible"], before.counts["terrible"] + 1);

    let trend: Vec<TrendPoint> = client
        .get(format!("{}/api/stats/trend?period=week", server.base_url))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let last = trend.last().expect("today is in the trend");
    assert!(last.entry_count >= 1);
    assert!((1.0..=5.0).contains(&last.average_mood));
}

#[tokio::test]
async fn http_export_downloads_csv() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let response = client
        .post(format!("{}/api/entries", server.base_url))
        .json(&serde_json::json!({ "mood": "meh", "note": "said \"fine\"" }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let response = client
        .get(format!("{}/api/export?mood=meh", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let disposition = response
        .headers()
        .get("content-disposition")
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("moodmate_export_"));
    assert!(disposition.ends_with(".csv\""));

    let body = response.text().await.unwrap();
    let mut lines = body.lines();
    assert_eq!(lines.next(), Some("Date,Mood,Note,Temperature,Weather,Location"));
    assert!(body.contains(r#""said ""fine""""#));
    assert!(lines.all(|line| line.contains(",meh,")));
}

#[tokio::test]
async fn http_export_of_empty_journal_is_rejected() {
    let server = spawn_server().await;
    let client = Client::new();

    let response = client
        .get(format!("{}/api/export", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No entries to export");
}

#[tokio::test]
async fn http_index_and_calendar_render() {
    let _guard = TEST_LOCK.lock().await;
    let server = shared_server().await;
    let client = Client::new();

    let html = client
        .get(format!("{}/", server.base_url))
        .send()
        .await
        .unwrap()
        .text()
        .await
        .unwrap();
    assert!(html.contains("MoodMate"));

    let response = client
        .get(format!("{}/api/calendar?year=2026&month=2", server.base_url))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let calendar: serde_json::Value = response.json().await.unwrap();
    assert_eq!(calendar["days"].as_array().map(Vec::len), Some(28));

    let response = client
        .get(format!("{}/api/calendar?year=2026&month=13", server.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[cfg(unix)]
#[tokio::test]
async fn http_every_spawned_server_is_killed_at_exit() {
    let shared = shared_server().await;
    let extra = spawn_server().await;

    let pids = cleanup::registered();
    assert!(pids.contains(&(shared.child.id() as i32)));
    assert!(pids.contains(&(extra.child.id() as i32)));
}
