//! `taskmate_tasks` data source: every task, in the order the API returns them.

use std::sync::Arc;

use taskmate_core::TaskClient;
use tracing::debug;

use crate::diagnostics::Diagnostics;
use crate::model::{self, client_error, TaskModel};
use crate::resource::{DataSource, ProviderData};
use crate::schema::{Attribute, Schema};
use crate::task_data_source::computed_task_attributes;
use crate::value::{Object, Value};

/// Fixed `id` of the list data source itself; not a task id.
pub const PLACEHOLDER_ID: &str = "tasks";

pub const TASKS: &str = "tasks";

#[derive(Debug, Default)]
pub struct TasksDataSource {
    client: Option<Arc<TaskClient>>,
}

impl TasksDataSource {
    pub fn new() -> Self {
        Self::default()
    }
}

impl DataSource for TasksDataSource {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_tasks")
    }

    fn schema(&self) -> Schema {
        let mut nested = vec![(model::ID, Attribute::computed_string("Task identifier"))];
        nested.extend(computed_task_attributes());
        Schema::new("TaskMate tasks data source - lists all tasks")
            .with_attribute(model::ID, Attribute::computed_string("Placeholder identifier"))
            .with_attribute(TASKS, Attribute::computed_list_nested("List of all tasks", nested))
    }

    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Diagnostics {
        model::configure_client(&mut self.client, provider_data, "Unexpected Data Source Configure Type")
    }

    fn read(&self, _config: &Object) -> Result<Object, Diagnostics> {
        let client = model::require_client(&self.client)?;

        let tasks = client.list_tasks().map_err(|e| client_error("list tasks", &e))?;
        debug!(count = tasks.len(), "listed tasks");

        let tasks = tasks
            .iter()
            .map(|task| Value::Object(TaskModel::from_task(task).into_object()))
            .collect();
        Ok(Object::from([
            (model::ID.to_string(), Value::string(PLACEHOLDER_ID)),
            (TASKS.to_string(), Value::List(tasks)),
        ]))
    }
}
