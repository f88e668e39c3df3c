//! `TaskClient`: the five task operations over a pluggable transport.

use std::sync::Arc;

use crate::api::TaskApi;
use crate::error::ApiError;
use crate::http::{HttpTransport, UreqTransport};
use crate::types::{CreateTask, Task, UpdateTask};

/// Blocking client for the task API.
///
/// Immutable after construction; clone the surrounding `Arc` to share it
/// between concurrently running callers.
#[derive(Clone)]
pub struct TaskClient {
    api: TaskApi,
    transport: Arc<dyn HttpTransport>,
}

impl std::fmt::Debug for TaskClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskClient").field("api", &self.api).finish_non_exhaustive()
    }
}

impl TaskClient {
    /// Client using the default `ureq` transport and its 30 second timeout.
    pub fn new(host: &str, token: Option<&str>) -> Self {
        Self::with_transport(TaskApi::new(host, token), Arc::new(UreqTransport::new()))
    }

    pub fn with_transport(api: TaskApi, transport: Arc<dyn HttpTransport>) -> Self {
        Self { api, transport }
    }

    pub fn api(&self) -> &TaskApi {
        &self.api
    }

    pub fn create_task(&self, input: &CreateTask) -> Result<Task, ApiError> {
        let req = self.api.build_create_task(input)?;
        self.api.parse_create_task(self.transport.execute(req)?)
    }

    pub fn get_task(&self, id: i64) -> Result<Task, ApiError> {
        let req = self.api.build_get_task(id);
        self.api.parse_get_task(id, self.transport.execute(req)?)
    }

    pub fn update_task(&self, id: i64, input: &UpdateTask) -> Result<Task, ApiError> {
        let req = self.api.build_update_task(id, input)?;
        self.api.parse_update_task(id, self.transport.execute(req)?)
    }

    pub fn delete_task(&self, id: i64) -> Result<(), ApiError> {
        let req = self.api.build_delete_task(id);
        self.api.parse_delete_task(id, self.transport.execute(req)?)
    }

    pub fn list_tasks(&self) -> Result<Vec<Task>, ApiError> {
        let req = self.api.build_list_tasks();
        self.api.parse_list_tasks(self.transport.execute(req)?)
    }
}
