//! Stateless HTTP request builder and response parser for the task API.
//!
//! # Design
//! `TaskApi` holds only the base URL and optional token, and carries no
//! mutable state between calls. Each operation is split into a `build_*`
//! method that produces an `HttpRequest` and a `parse_*` method that
//! consumes an `HttpResponse`.

use serde::de::DeserializeOwned;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTask, Task, UpdateTask};

/// Header carrying the API token on every request.
pub const TOKEN_HEADER: &str = "X-API-Token";

const API_PREFIX: &str = "/api/v1";

/// Request builder and response parser for the task API.
#[derive(Clone)]
pub struct TaskApi {
    base_url: String,
    token: Option<String>,
}

impl std::fmt::Debug for TaskApi {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskApi")
            .field("base_url", &self.base_url)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl TaskApi {
    /// An empty token is treated as no token.
    pub fn new(host: &str, token: Option<&str>) -> Self {
        Self {
            base_url: host.trim_end_matches('/').to_string(),
            token: token.filter(|t| !t.is_empty()).map(str::to_string),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{API_PREFIX}{path}", self.base_url)
    }

    fn request(&self, method: HttpMethod, path: &str, body: Option<String>) -> HttpRequest {
        let mut headers = Vec::new();
        if let Some(token) = &self.token {
            headers.push((TOKEN_HEADER.to_string(), token.clone()));
        }
        if body.is_some() {
            headers.push(("content-type".to_string(), "application/json".to_string()));
        }
        HttpRequest {
            method,
            url: self.url(path),
            headers,
            body,
        }
    }

    pub fn build_list_tasks(&self) -> HttpRequest {
        self.request(HttpMethod::Get, "/tasks", None)
    }

    pub fn build_get_task(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Get, &format!("/tasks/{id}"), None)
    }

    pub fn build_create_task(&self, input: &CreateTask) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(ApiError::Encode)?;
        Ok(self.request(HttpMethod::Post, "/tasks", Some(body)))
    }

    pub fn build_update_task(&self, id: i64, input: &UpdateTask) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(input).map_err(ApiError::Encode)?;
        Ok(self.request(HttpMethod::Put, &format!("/tasks/{id}"), Some(body)))
    }

    pub fn build_delete_task(&self, id: i64) -> HttpRequest {
        self.request(HttpMethod::Delete, &format!("/tasks/{id}"), None)
    }

    pub fn parse_list_tasks(&self, response: HttpResponse) -> Result<Vec<Task>, ApiError> {
        check_status(&response, 200, None)?;
        decode(&response)
    }

    pub fn parse_get_task(&self, id: i64, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response, 200, Some(id))?;
        decode(&response)
    }

    pub fn parse_create_task(&self, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response, 201, None)?;
        decode(&response)
    }

    pub fn parse_update_task(&self, id: i64, response: HttpResponse) -> Result<Task, ApiError> {
        check_status(&response, 200, Some(id))?;
        decode(&response)
    }

    pub fn parse_delete_task(&self, id: i64, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204, Some(id))
    }
}

fn decode<T: DeserializeOwned>(response: &HttpResponse) -> Result<T, ApiError> {
    serde_json::from_str(&response.body).map_err(ApiError::Decode)
}

/// Map unexpected status codes to the appropriate `ApiError` variant.
///
/// A 404 is only `NotFound` for operations addressing a single task id.
fn check_status(response: &HttpResponse, expected: u16, id: Option<i64>) -> Result<(), ApiError> {
    if response.status == expected {
        return Ok(());
    }
    match id {
        Some(id) if response.status == 404 => Err(ApiError::NotFound { id }),
        _ => Err(ApiError::Api {
            status: response.status,
            body: response.body.clone(),
        }),
    }
}
