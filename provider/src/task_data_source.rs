//! `taskmate_task` data source: one task looked up by id.

use std::sync::Arc;

use taskmate_core::TaskClient;
use tracing::debug;

use crate::diagnostics::Diagnostics;
use crate::model::{self, client_error, TaskModel};
use crate::resource::{DataSource, ProviderData};
use crate::schema::{Attribute, Schema};
use crate::value::Object;

/// Nested attribute set shared with the `taskmate_tasks` list.
pub(crate) fn computed_task_attributes() -> Vec<(&'static str, Attribute)> {
    vec![
        (model::TITLE, Attribute::computed_string("Task title")),
        (model::DESCRIPTION, Attribute::computed_string("Task description")),
        (model::DUE_DATE, Attribute::computed_string("Task due date")),
        (model::PRIORITY, Attribute::computed_string("Task priority")),
        (model::STATUS, Attribute::computed_string("Task status")),
        (model::CREATED_AT, Attribute::computed_string("Creation timestamp")),
        (model::UPDATED_AT, Attribute::computed_string("Last update timestamp")),
    ]
}

#[derive(Debug, Default)]
pub struct TaskDataSource {
    client: Option<Arc<TaskClient>>,
}

impl TaskDataSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataSource for TaskDataSource {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_task")
    }

    fn schema(&self) -> Schema {
        computed_task_attributes().into_iter().fold(
            Schema::new("TaskMate task data source")
                .with_attribute(model::ID, Attribute::required_string("Task identifier")),
            |schema, (name, attr)| schema.with_attribute(name, attr),
        )
    }

    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Diagnostics {
        model::configure_client(&mut self.client, provider_data, "Unexpected Data Source Configure Type")
    }

    fn read(&self, config: &Object) -> Result<Object, Diagnostics> {
        let configured = TaskModel::from_object(config)?;
        let id = configured.task_id()?;
        let client = model::require_client(&self.client)?;

        debug!(task_id = id, "reading task data source");
        let task = client.get_task(id).map_err(|e| client_error("read task", &e))?;

        let mut data = TaskModel::from_task(&task);
        data.id = configured.id;
        Ok(data.into_object())
    }
}
