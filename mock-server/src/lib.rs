use std::{collections::BTreeMap, sync::Arc};

use axum::{
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::info;

pub const TOKEN_HEADER: &str = "x-api-token";
pub const DEFAULT_PRIORITY: &str = "medium";
pub const DEFAULT_STATUS: &str = "pending";

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Task {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub due_date: String,
    pub priority: String,
    pub status: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct CreateTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub priority: String,
}

#[derive(Deserialize)]
pub struct UpdateTask {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub due_date: String,
    #[serde(default)]
    pub priority: String,
    #[serde(default)]
    pub status: String,
}

#[derive(Clone, Debug, Default)]
pub struct ServerConfig {
    /// When set, POST/PUT/DELETE must carry this value in `X-API-Token`.
    pub api_token: Option<String>,
}

#[derive(Debug)]
pub struct Store {
    next_id: i64,
    tasks: BTreeMap<i64, Task>,
}

impl Default for Store {
    fn default() -> Self {
        Self {
            next_id: 1,
            tasks: BTreeMap::new(),
        }
    }
}

pub type Db = Arc<RwLock<Store>>;

#[derive(Clone)]
struct AppState {
    db: Db,
    config: Arc<ServerConfig>,
}

type Failure = (StatusCode, String);

pub fn app() -> Router {
    app_with_config(ServerConfig::default())
}

pub fn app_with_config(config: ServerConfig) -> Router {
    let state = AppState {
        db: Arc::new(RwLock::new(Store::default())),
        config: Arc::new(config),
    };
    Router::new()
        .route("/api/v1/tasks", get(list_tasks).post(create_task))
        .route(
            "/api/v1/tasks/{id}",
            get(get_task).put(update_task).delete(delete_task),
        )
        .with_state(state)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    run_with_config(listener, ServerConfig::default()).await
}

pub async fn run_with_config(listener: TcpListener, config: ServerConfig) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with_config(config)).await
}

fn authorize(config: &ServerConfig, headers: &HeaderMap) -> Result<(), Failure> {
    let Some(expected) = &config.api_token else {
        return Ok(());
    };
    match headers.get(TOKEN_HEADER).and_then(|v| v.to_str().ok()) {
        Some(given) if given == expected => Ok(()),
        _ => Err((StatusCode::UNAUTHORIZED, "invalid or missing API token".to_string())),
    }
}

fn require_title(title: &str) -> Result<(), Failure> {
    if title.trim().is_empty() {
        return Err((StatusCode::BAD_REQUEST, "title is required".to_string()));
    }
    Ok(())
}

/// `updated_at` must strictly advance even when two writes land in the same
/// clock tick.
fn next_timestamp(previous: DateTime<Utc>) -> DateTime<Utc> {
    let now = Utc::now();
    if now > previous {
        now
    } else {
        previous + Duration::microseconds(1)
    }
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

async fn list_tasks(State(state): State<AppState>) -> Json<Vec<Task>> {
    let store = state.db.read().await;
    Json(store.tasks.values().cloned().collect())
}

async fn create_task(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(input): Json<CreateTask>,
) -> Result<(StatusCode, Json<Task>), Failure> {
    authorize(&state.config, &headers)?;
    require_title(&input.title)?;

    let mut store = state.db.write().await;
    let now = Utc::now();
    let task = Task {
        id: store.next_id,
        title: input.title,
        description: input.description,
        due_date: input.due_date,
        priority: or_default(input.priority, DEFAULT_PRIORITY),
        status: DEFAULT_STATUS.to_string(),
        created_at: now,
        updated_at: now,
    };
    store.next_id += 1;
    store.tasks.insert(task.id, task.clone());
    info!(id = task.id, "task created");
    Ok((StatusCode::CREATED, Json(task)))
}

async fn get_task(State(state): State<AppState>, Path(id): Path<i64>) -> Result<Json<Task>, StatusCode> {
    let store = state.db.read().await;
    store.tasks.get(&id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn update_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
    Json(input): Json<UpdateTask>,
) -> Result<Json<Task>, Failure> {
    authorize(&state.config, &headers)?;
    require_title(&input.title)?;

    let mut store = state.db.write().await;
    let task = store
        .tasks
        .get_mut(&id)
        .ok_or((StatusCode::NOT_FOUND, format!("task {id} not found")))?;
    task.title = input.title;
    task.description = input.description;
    task.due_date = input.due_date;
    if !input.priority.is_empty() {
        task.priority = input.priority;
    }
    if !input.status.is_empty() {
        task.status = input.status;
    }
    task.updated_at = next_timestamp(task.updated_at);
    info!(id, "task updated");
    Ok(Json(task.clone()))
}

async fn delete_task(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<StatusCode, Failure> {
    authorize(&state.config, &headers)?;
    let mut store = state.db.write().await;
    store
        .tasks
        .remove(&id)
        .map(|_| {
            info!(id, "task deleted");
            StatusCode::NO_CONTENT
        })
        .ok_or((StatusCode::NOT_FOUND, format!("task {id} not found")))
}
