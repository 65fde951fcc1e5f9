use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

pub const DEFAULT_PROJECT_KEY: &str = "demo-key";
pub const PROJECT_KEY_HEADER: &str = "x-project-key";
pub const DEFAULT_GROUP: &str = "default";

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Language {
    pub code: String,
    pub name: String,
}

/// A stored string entry: `key` plus any other fields the client pushed.
pub type Entry = Map<String, Value>;

#[derive(Debug)]
pub struct Store {
    pub project_key: String,
    pub project: Value,
    pub languages: Vec<Language>,
    pub strings: HashMap<String, Vec<Entry>>,
}

impl Store {
    /// A "Demo" project with English and French, seeded with one English
    /// string.
    pub fn new(project_key: &str) -> Self {
        let mut strings = HashMap::new();
        strings.insert(
            "en".to_string(),
            vec![entry(json!({"key": "hello", "value": "Hello", "group": "greetings"}))],
        );
        strings.insert("fr".to_string(), Vec::new());
        Self {
            project_key: project_key.to_string(),
            project: json!({"id": 1, "name": "Demo"}),
            languages: vec![
                Language {
                    code: "en".to_string(),
                    name: "English".to_string(),
                },
                Language {
                    code: "fr".to_string(),
                    name: "French".to_string(),
                },
            ],
            strings,
        }
    }
}

impl Default for Store {
    fn default() -> Self {
        Self::new(DEFAULT_PROJECT_KEY)
    }
}

fn entry(value: Value) -> Entry {
    match value {
        Value::Object(map) => map,
        _ => Map::new(),
    }
}

#[derive(Deserialize)]
pub struct StringsQuery {
    pub grouped: Option<String>,
}

#[derive(Deserialize)]
pub struct SyncStrings {
    pub strings: Vec<Entry>,
}

pub type Db = Arc<RwLock<Store>>;

type Failure = (StatusCode, Json<Value>);

pub fn app() -> Router {
    app_with_store(Store::default())
}

pub fn app_with_store(store: Store) -> Router {
    let db: Db = Arc::new(RwLock::new(store));
    Router::new()
        .route("/api/projects", get(get_project))
        .route("/api/projects/languages", get(list_languages))
        .route("/api/projects/languages/{lang}/strings", get(get_strings))
        .route("/api/projects/languages/{lang}/sync-strings", post(sync_strings))
        .layer(TraceLayer::new_for_http())
        .with_state(db)
}

pub async fn run(listener: TcpListener, store: Store) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock translation server listening");
    }
    axum::serve(listener, app_with_store(store)).await
}

fn failure(status: StatusCode, message: &str) -> Failure {
    (status, Json(json!({ "error": message })))
}

fn authorize(headers: &HeaderMap, store: &Store) -> Result<(), Failure> {
    match headers.get(PROJECT_KEY_HEADER).and_then(|v| v.to_str().ok()) {
        Some(key) if key == store.project_key => Ok(()),
        _ => Err(failure(StatusCode::UNAUTHORIZED, "invalid project key")),
    }
}

async fn get_project(State(db): State<Db>, headers: HeaderMap) -> Result<Json<Value>, Failure> {
    let store = db.read().await;
    authorize(&headers, &store)?;
    Ok(Json(store.project.clone()))
}

async fn list_languages(
    State(db): State<Db>,
    headers: HeaderMap,
) -> Result<Json<Vec<Language>>, Failure> {
    let store = db.read().await;
    authorize(&headers, &store)?;
    Ok(Json(store.languages.clone()))
}

async fn get_strings(
    State(db): State<Db>,
    Path(lang): Path<String>,
    Query(query): Query<StringsQuery>,
    headers: HeaderMap,
) -> Result<Json<Value>, Failure> {
    let store = db.read().await;
    authorize(&headers, &store)?;
    let entries = store
        .strings
        .get(&lang)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "unknown language"))?;

    if query.grouped.as_deref() != Some("true") {
        return Ok(Json(Value::Array(
            entries.iter().cloned().map(Value::Object).collect(),
        )));
    }

    let mut groups: Map<String, Value> = Map::new();
    for entry in entries {
        let group = entry
            .get("group")
            .and_then(Value::as_str)
            .unwrap_or(DEFAULT_GROUP)
            .to_string();
        let slot = groups
            .entry(group)
            .or_insert_with(|| Value::Array(Vec::new()));
        if let Value::Array(items) = slot {
            items.push(Value::Object(entry.clone()));
        }
    }
    Ok(Json(Value::Object(groups)))
}

/// Upserts each pushed entry by `key`, merging fields into an existing one.
async fn sync_strings(
    State(db): State<Db>,
    Path(lang): Path<String>,
    headers: HeaderMap,
    Json(input): Json<SyncStrings>,
) -> Result<Json<Value>, Failure> {
    let mut store = db.write().await;
    authorize(&headers, &store)?;
    if input
        .strings
        .iter()
        .any(|e| e.get("key").and_then(Value::as_str).is_none())
    {
        return Err(failure(StatusCode::UNPROCESSABLE_ENTITY, "string entry missing key"));
    }
    let entries = store
        .strings
        .get_mut(&lang)
        .ok_or_else(|| failure(StatusCode::NOT_FOUND, "unknown language"))?;

    let synced = input.strings.len();
    for incoming in input.strings {
        let existing = entries
            .iter_mut()
            .find(|e| e.get("key") == incoming.get("key"));
        match existing {
            Some(current) => current.extend(incoming),
            None => entries.push(incoming),
        }
    }
    info!(%lang, synced, "synced strings");
    Ok(Json(json!({ "status": "ok", "synced": synced })))
}
