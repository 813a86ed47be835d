//! In-process stand-in for the analytics service, served by axum on an
//! ephemeral port.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use practice_core::model::{AuthToken, UserId};
use serde_json::{Value, json};
use services::{ApiClient, ApiConfig, Session};
use tokio::net::TcpListener;

pub const USER: u64 = 42;
pub const TOKEN: &str = "query_id=AAE&user=%7B%22id%22%3A42%7D&hash=deadbeef";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub auth: Option<String>,
    pub content_type: Option<String>,
}

#[derive(Default)]
pub struct Backend {
    requests: Mutex<Vec<Recorded>>,
    reviews: Mutex<Vec<Value>>,
    words: Mutex<Vec<Value>>,
    due: Mutex<Vec<String>>,
    fail_reviews: AtomicBool,
    fail_vocabulary: AtomicBool,
    analytics_override: Mutex<Option<(StatusCode, String)>>,
    charts_delay_ms: AtomicU64,
}

impl Backend {
    /// Add words to the vocabulary; `due` ones are returned by the due endpoint.
    pub fn seed(&self, words: &[&str], due: bool) {
        for word in words {
            self.words.lock().unwrap().push(entry(word, "learning"));
            if due {
                self.due.lock().unwrap().push((*word).to_string());
            }
        }
    }

    pub fn requests(&self) -> Vec<Recorded> {
        self.requests.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str, path: &str) -> usize {
        self.requests()
            .iter()
            .filter(|r| r.method == method && r.path == path)
            .count()
    }

    pub fn reviews(&self) -> Vec<Value> {
        self.reviews.lock().unwrap().clone()
    }

    pub fn fail_reviews(&self, fail: bool) {
        self.fail_reviews.store(fail, Ordering::SeqCst);
    }

    /// Make the vocabulary list endpoint answer 503.
    pub fn fail_vocabulary(&self, fail: bool) {
        self.fail_vocabulary.store(fail, Ordering::SeqCst);
    }

    /// Serve `body` verbatim with `status` from the analytics endpoint.
    pub fn override_analytics(&self, status: StatusCode, body: &str) {
        *self.analytics_override.lock().unwrap() = Some((status, body.to_string()));
    }

    pub fn clear_analytics_override(&self) {
        *self.analytics_override.lock().unwrap() = None;
    }

    pub fn delay_charts(&self, delay: Duration) {
        self.charts_delay_ms
            .store(delay.as_millis() as u64, Ordering::SeqCst);
    }
}

pub fn entry(word: &str, status: &str) -> Value {
    json!({
        "word": word,
        "translation": format!("{word} (ru)"),
        "example": format!("I used {word} today."),
        "added_date": "2024-05-01",
        "next_review": "2024-05-06",
        "interval_days": 1,
        "status": status,
        "reviews_count": 0,
        "correct_count": 0
    })
}

//
// ─── SERVER ────────────────────────────────────────────────────────────────────
//

pub async fn spawn() -> (String, Arc<Backend>) {
    let backend = Arc::new(Backend::default());
    let app = router(Arc::clone(&backend));
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{addr}"), backend)
}

pub fn client(base_url: &str) -> ApiClient {
    let http = reqwest::Client::builder().no_proxy().build().unwrap();
    ApiClient::with_client(http, ApiConfig::new(base_url).unwrap())
}

pub fn session() -> Session {
    Session::new(UserId::new(USER), AuthToken::new(TOKEN))
}

fn router(backend: Arc<Backend>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/auth/validate", post(validate))
        .route("/api/analytics/{user_id}", get(analytics))
        .route("/api/charts/{user_id}", get(charts))
        .route("/api/stats/summary", get(summary))
        .route("/api/vocabulary/{user_id}", get(vocabulary))
        .route("/api/vocabulary/{user_id}/due", get(due))
        .route("/api/vocabulary/{user_id}/stats", get(stats))
        .route("/api/vocabulary/{user_id}/add", post(add))
        .route("/api/vocabulary/{user_id}/review", post(review))
        .route("/api/vocabulary/{user_id}/{word}", delete(remove))
        .layer(middleware::from_fn_with_state(Arc::clone(&backend), record))
        .with_state(backend)
}

async fn record(State(backend): State<Arc<Backend>>, request: Request, next: Next) -> Response {
    // The header closure borrows the request, so it must not live across the await.
    let recorded = {
        let header = |name: &str| {
            request
                .headers()
                .get(name)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string)
        };
        Recorded {
            method: request.method().to_string(),
            path: request.uri().path().to_string(),
            query: request.uri().query().map(str::to_string),
            auth: header("x-auth-init-data"),
            content_type: header("content-type"),
        }
    };
    backend.requests.lock().unwrap().push(recorded);
    next.run(request).await
}

fn detail(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "detail": message }))).into_response()
}

//
// ─── HANDLERS ──────────────────────────────────────────────────────────────────
//

async fn health() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

async fn validate(headers: HeaderMap) -> Response {
    if headers.get("x-auth-init-data").is_none() {
        return detail(StatusCode::UNAUTHORIZED, "Missing Telegram authentication data");
    }
    Json(json!({ "status": "ok", "user": { "id": USER, "first_name": "Test" } })).into_response()
}

async fn analytics(State(backend): State<Arc<Backend>>, Path(user_id): Path<u64>) -> Response {
    if let Some((status, body)) = backend.analytics_override.lock().unwrap().clone() {
        return (status, body).into_response();
    }
    Json(json!({
        "user_id": user_id,
        "total_messages": 20,
        "voice_messages": 5,
        "text_messages": 15,
        "total_errors": 4,
        "error_types": { "grammar_error": 3, "word_order": 1 },
        "practice_days": ["2024-05-05", "2024-05-06"],
        "streak": 2,
        "daily_activity": {},
        "error_rate": 20.0,
        "messages_this_week": 12
    }))
    .into_response()
}

async fn charts(
    State(backend): State<Arc<Backend>>,
    Path(user_id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let delay = backend.charts_delay_ms.load(Ordering::SeqCst);
    if delay > 0 {
        tokio::time::sleep(Duration::from_millis(delay)).await;
    }
    let days: u32 = params.get("days").and_then(|d| d.parse().ok()).unwrap_or(7);
    let daily: Vec<Value> = (0..days)
        .map(|i| json!({ "date": format!("2024-05-{:02}", i + 1), "messages": i, "errors": i / 2 }))
        .collect();
    Json(json!({
        "user_id": user_id,
        "days": days,
        "daily": daily,
        "error_types": { "grammar_error": 3, "word_order": 1 }
    }))
}

async fn summary() -> Json<Value> {
    Json(json!({
        "user_id": USER,
        "summary": { "total_messages": 20, "messages_this_week": 12, "total_errors": 4, "error_rate": 20.0, "streak": 2 },
        "recent_activity": [{ "date": "2024-05-06", "messages": 3, "errors": 1 }],
        "error_breakdown": { "articles": 2 }
    }))
}

fn stats_of(words: &[Value], due: usize) -> Value {
    let count = |status: &str| words.iter().filter(|w| w["status"] == status).count();
    json!({
        "total": words.len(),
        "new": count("new"),
        "learning": count("learning"),
        "mastered": count("mastered"),
        "due_today": due
    })
}

async fn vocabulary(
    State(backend): State<Arc<Backend>>,
    Path(user_id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
) -> Response {
    if backend.fail_vocabulary.load(Ordering::SeqCst) {
        return detail(StatusCode::SERVICE_UNAVAILABLE, "vocabulary offline");
    }
    let words = backend.words.lock().unwrap().clone();
    let due = backend.due.lock().unwrap().len();
    let filtered: Vec<Value> = match params.get("status") {
        Some(status) => words
            .iter()
            .filter(|w| w["status"] == status.as_str())
            .cloned()
            .collect(),
        None => words.clone(),
    };
    Json(json!({ "user_id": user_id, "words": filtered, "stats": stats_of(&words, due) }))
        .into_response()
}

async fn due(
    State(backend): State<Arc<Backend>>,
    Path(user_id): Path<u64>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<Value> {
    let limit: usize = params.get("limit").and_then(|l| l.parse().ok()).unwrap_or(5);
    let due = backend.due.lock().unwrap().clone();
    let words = backend.words.lock().unwrap().clone();
    let due_words: Vec<Value> = due
        .iter()
        .filter_map(|name| words.iter().find(|w| w["word"] == name.as_str()).cloned())
        .take(limit)
        .collect();
    Json(json!({ "user_id": user_id, "count": due_words.len(), "due_words": due_words }))
}

async fn stats(State(backend): State<Arc<Backend>>, Path(user_id): Path<u64>) -> Json<Value> {
    let words = backend.words.lock().unwrap().clone();
    let due = backend.due.lock().unwrap().len();
    let mut body = stats_of(&words, due);
    body["user_id"] = json!(user_id);
    Json(body)
}

async fn add(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    let Some(word) = body["word"].as_str().map(str::to_lowercase) else {
        return detail(StatusCode::UNPROCESSABLE_ENTITY, "word is required");
    };
    let mut new_entry = entry(&word, "new");
    new_entry["next_review"] = json!("2024-05-07");
    backend.words.lock().unwrap().push(new_entry.clone());
    Json(json!({ "status": "ok", "word": new_entry })).into_response()
}

async fn review(State(backend): State<Arc<Backend>>, Json(body): Json<Value>) -> Response {
    backend.reviews.lock().unwrap().push(body.clone());
    if backend.fail_reviews.load(Ordering::SeqCst) {
        return detail(StatusCode::INTERNAL_SERVER_ERROR, "database unavailable");
    }
    let word = body["word"].as_str().unwrap_or_default().to_string();
    backend.due.lock().unwrap().retain(|due| *due != word);
    Json(json!({ "status": "ok", "message": format!("Word '{word}' reviewed") })).into_response()
}

async fn remove(State(backend): State<Arc<Backend>>, Path((_user_id, word)): Path<(u64, String)>) -> Response {
    let mut words = backend.words.lock().unwrap();
    let before = words.len();
    words.retain(|w| w["word"] != word.as_str());
    if words.len() == before {
        return detail(StatusCode::NOT_FOUND, &format!("Word '{word}' not found"));
    }
    Json(json!({ "status": "ok", "message": format!("Word '{word}' deleted") })).into_response()
}
