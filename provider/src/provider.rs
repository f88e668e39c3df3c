//! The `taskmate` provider: configuration schema, shared client construction,
//! and the list of resources and data sources it serves.

use std::sync::Arc;

use taskmate_core::TaskClient;
use tracing::debug;

use crate::config::{process_env, EnvLookup, ProviderConfig, DEFAULT_HOST};
use crate::diagnostics::Diagnostics;
use crate::resource::{DataSource, Provider, ProviderData, ProviderMetadata, Resource};
use crate::schema::{Attribute, Schema};
use crate::task_data_source::TaskDataSource;
use crate::task_resource::TaskResource;
use crate::tasks_data_source::TasksDataSource;
use crate::value::Object;

pub const TYPE_NAME: &str = "taskmate";

#[derive(Clone)]
pub struct TaskMateProvider {
    /// "dev" for local builds, "test" under acceptance tests, the release
    /// version otherwise.
    version: String,
    env: EnvLookup,
}

impl std::fmt::Debug for TaskMateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskMateProvider")
            .field("version", &self.version)
            .finish_non_exhaustive()
    }
}

impl TaskMateProvider {
    pub fn new(version: impl Into<String>) -> Self {
        Self {
            version: version.into(),
            env: process_env,
        }
    }

    /// Resolve `TASKMATE_*` variables through `env` instead of the process
    /// environment.
    pub fn with_env_lookup(mut self, env: EnvLookup) -> Self {
        self.env = env;
        self
    }
}

impl Provider for TaskMateProvider {
    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            type_name: TYPE_NAME.to_string(),
            version: self.version.clone(),
        }
    }

    fn schema(&self) -> Schema {
        Schema::new("TaskMate provider for managing tasks")
            .with_attribute(
                "host",
                Attribute::optional_string(&format!(
                    "TaskMate API host URL. May also be set with TASKMATE_HOST. Defaults to {DEFAULT_HOST}"
                )),
            )
            .with_attribute(
                "token",
                Attribute::optional_string(
                    "API token for authentication, sent as X-API-Token. May also be set with TASKMATE_TOKEN.",
                )
                .sensitive(),
            )
    }

    fn configure(&self, config: &Object) -> Result<ProviderData, Diagnostics> {
        let resolved = ProviderConfig::resolve(config, self.env)?;
        debug!(host = %resolved.host, token = resolved.token.is_some(), "configuring TaskMate client");
        let client = TaskClient::new(&resolved.host, resolved.token.as_deref());
        Ok(Arc::new(client))
    }

    fn resources(&self) -> Vec<Box<dyn Resource>> {
        vec![Box::new(TaskResource::new())]
    }

    fn data_sources(&self) -> Vec<Box<dyn DataSource>> {
        vec![Box::new(TaskDataSource::new()), Box::new(TasksDataSource::new())]
    }
}
