//! `taskmate_task`: a managed task.

use std::sync::Arc;

use taskmate_core::TaskClient;
use tracing::{debug, info};

use crate::diagnostics::Diagnostics;
use crate::model::{self, client_error, TaskModel};
use crate::resource::{import_state_passthrough_id, ProviderData, Resource};
use crate::schema::{Attribute, Schema};
use crate::value::{Object, Value};

const DESCRIPTION: &str = r#"TaskMate task resource

Manages a task in the TaskMate application.

## Example Usage

```hcl
resource "taskmate_task" "example" {
  title       = "Deploy application"
  description = "Deploy v2.0 to production"
  due_date    = "2024-12-31"
  priority    = "high"
  status      = "pending"
}
```

## Import

Tasks can be imported using their numeric ID:

```bash
terraform import taskmate_task.example 1
```
"#;

#[derive(Debug, Default)]
pub struct TaskResource {
    client: Option<Arc<TaskClient>>,
}

impl TaskResource {
    pub fn new() -> Self {
        Self::default()
    }

    fn client(&self) -> Result<&TaskClient, Diagnostics> {
        model::require_client(&self.client)
    }
}

impl Resource for TaskResource {
    fn type_name(&self, provider_type_name: &str) -> String {
        format!("{provider_type_name}_task")
    }

    fn schema(&self) -> Schema {
        Schema::new(DESCRIPTION)
            .with_attribute(
                model::ID,
                Attribute::computed_string("Task identifier").use_state_for_unknown(),
            )
            .with_attribute(model::TITLE, Attribute::required_string("Task title"))
            .with_attribute(model::DESCRIPTION, Attribute::optional_string("Task description"))
            .with_attribute(model::DUE_DATE, Attribute::optional_string("Task due date (YYYY-MM-DD)"))
            .with_attribute(
                model::PRIORITY,
                Attribute::optional_computed_string("Task priority (low, medium, high)"),
            )
            .with_attribute(
                model::STATUS,
                Attribute::optional_computed_string("Task status (pending, completed)"),
            )
            .with_attribute(model::CREATED_AT, Attribute::computed_string("Creation timestamp"))
            .with_attribute(model::UPDATED_AT, Attribute::computed_string("Last update timestamp"))
    }

    fn configure(&mut self, provider_data: Option<&ProviderData>) -> Diagnostics {
        model::configure_client(&mut self.client, provider_data, "Unexpected Resource Configure Type")
    }

    fn create(&self, plan: &Object) -> Result<Object, Diagnostics> {
        let mut data = TaskModel::from_object(plan)?;
        let client = self.client()?;

        debug!(title = %data.title.value_string(), "creating task");
        let task = client
            .create_task(&data.create_input())
            .map_err(|e| client_error("create task", &e))?;

        data.id = Value::string(task.id.to_string());
        data.refresh(&task);
        info!(task_id = task.id, "created task");
        Ok(data.into_object())
    }

    fn read(&self, state: &Object) -> Result<Object, Diagnostics> {
        let mut data = TaskModel::from_object(state)?;
        let id = data.task_id()?;
        let client = self.client()?;

        debug!(task_id = id, "reading task");
        let task = client.get_task(id).map_err(|e| client_error("read task", &e))?;

        data.refresh(&task);
        Ok(data.into_object())
    }

    fn update(&self, plan: &Object, state: &Object) -> Result<Object, Diagnostics> {
        let prior = TaskModel::from_object(state)?;
        let mut data = TaskModel::from_object(plan)?;
        let id = prior.task_id()?;
        let client = self.client()?;

        debug!(task_id = id, "updating task");
        let task = client
            .update_task(id, &data.update_input())
            .map_err(|e| client_error("update task", &e))?;

        data.id = prior.id;
        data.refresh(&task);
        info!(task_id = id, "updated task");
        Ok(data.into_object())
    }

    fn delete(&self, state: &Object) -> Result<(), Diagnostics> {
        let data = TaskModel::from_object(state)?;
        let id = data.task_id()?;
        let client = self.client()?;

        debug!(task_id = id, "deleting task");
        client.delete_task(id).map_err(|e| client_error("delete task", &e))?;
        info!(task_id = id, "deleted task");
        Ok(())
    }

    fn import_state(&self, id: &str) -> Result<Object, Diagnostics> {
        debug!(import_id = id, "importing task");
        Ok(import_state_passthrough_id(&self.schema(), model::ID, id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{configured, Scripted, TASK_JSON};
    use crate::value::object;
    use taskmate_core::HttpMethod;

    fn resource(transport: &Arc<Scripted>) -> TaskResource {
        let mut resource = TaskResource::new();
        let diags = resource.configure(Some(&configured(transport.clone())));
        assert!(diags.is_empty());
        resource
    }

    fn state() -> Object {
        object([
            ("id", Value::from("12")),
            ("title", Value::from("Deploy")),
            ("description", Value::Null),
            ("due_date", Value::from("2024-12-31")),
            ("priority", Value::from("high")),
            ("status", Value::from("pending")),
            ("created_at", Value::from("2024-06-01T10:00:00Z")),
            ("updated_at", Value::from("2024-06-01T10:00:00Z")),
        ])
    }

    #[test]
    fn schema_matches_computedness_contract() {
        let schema = TaskResource::new().schema();
        assert!(schema.attribute("id").unwrap().is_read_only());
        assert!(schema.attribute("id").unwrap().use_state_for_unknown);
        assert!(schema.attribute("title").unwrap().required);
        let description = schema.attribute("description").unwrap();
        assert!(description.optional && !description.computed);
        let due_date = schema.attribute("due_date").unwrap();
        assert!(due_date.optional && !due_date.computed);
        for name in ["priority", "status"] {
            let attr = schema.attribute(name).unwrap();
            assert!(attr.optional && attr.computed, "{name}");
        }
        assert!(schema.attribute("created_at").unwrap().is_read_only());
        assert!(schema.attribute("updated_at").unwrap().is_read_only());
    }

    #[test]
    fn type_name_appends_task() {
        assert_eq!(TaskResource::new().type_name("taskmate"), "taskmate_task");
    }

    #[test]
    fn create_populates_server_fields() {
        let transport = Scripted::new(vec![(201, TASK_JSON)]);
        let plan = object([
            ("id", Value::Unknown),
            ("title", Value::from("Deploy")),
            ("description", Value::Null),
            ("due_date", Value::from("2024-12-31")),
            ("priority", Value::from("high")),
            ("status", Value::Unknown),
            ("created_at", Value::Unknown),
            ("updated_at", Value::Unknown),
        ]);

        let state = resource(&transport).create(&plan).unwrap();
        assert_eq!(state["id"], Value::string("12"));
        assert_eq!(state["status"], Value::string("pending"));
        assert!(state["description"].is_null());
        assert_eq!(state["created_at"], Value::string("2024-06-01T10:00:00Z"));

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Post);
        let body: serde_json::Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["priority"], "high");
        assert_eq!(body["description"], "");
    }

    #[test]
    fn create_failure_reports_client_error() {
        let transport = Scripted::new(vec![(500, "boom")]);
        let plan = object([("title", "Deploy")]);
        let diags = resource(&transport).create(&plan).unwrap_err();
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Client Error");
        assert_eq!(diag.detail, "Unable to create task, got error: API error: boom (status: 500)");
    }

    #[test]
    fn read_refreshes_everything_but_id() {
        let transport = Scripted::new(vec![(200, TASK_JSON)]);
        let mut stale = state();
        stale.insert("title".to_string(), Value::from("Old title"));

        let state = resource(&transport).read(&stale).unwrap();
        assert_eq!(state["id"], Value::string("12"));
        assert_eq!(state["title"], Value::string("Deploy"));
        assert_eq!(transport.requests()[0].url, "http://api.test/api/v1/tasks/12");
    }

    #[test]
    fn read_not_found_is_an_error_not_a_removal() {
        let transport = Scripted::new(vec![(404, "")]);
        let diags = resource(&transport).read(&state()).unwrap_err();
        let diag = diags.iter().next().unwrap();
        assert_eq!(diag.summary, "Client Error");
        assert_eq!(diag.detail, "Unable to read task, got error: task with ID 12 not found");
    }

    #[test]
    fn malformed_id_fails_without_a_request() {
        let transport = Scripted::new(vec![]);
        let mut bad = state();
        bad.insert("id".to_string(), Value::from("twelve"));

        let resource = resource(&transport);
        for diags in [
            resource.read(&bad).unwrap_err(),
            resource.update(&bad, &bad).unwrap_err(),
            resource.delete(&bad).map(|_| Object::new()).unwrap_err(),
        ] {
            assert_eq!(diags.iter().next().unwrap().summary, "Parse Error");
        }
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn update_sends_status_and_keeps_state_id() {
        let completed = TASK_JSON.replace("pending", "completed");
        let transport = Scripted::new(vec![(200, completed.as_str())]);
        let mut plan = state();
        plan.insert("status".to_string(), Value::from("completed"));
        plan.insert("updated_at".to_string(), Value::Unknown);

        let new_state = resource(&transport).update(&plan, &state()).unwrap();
        assert_eq!(new_state["id"], Value::string("12"));
        assert_eq!(new_state["status"], Value::string("completed"));

        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Put);
        let body: serde_json::Value = serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body["status"], "completed");
    }

    #[test]
    fn delete_calls_api() {
        let transport = Scripted::new(vec![(204, "")]);
        resource(&transport).delete(&state()).unwrap();
        let requests = transport.requests();
        assert_eq!(requests[0].method, HttpMethod::Delete);
        assert_eq!(requests[0].url, "http://api.test/api/v1/tasks/12");
    }

    #[test]
    fn import_seeds_id_only() {
        let state = TaskResource::new().import_state("7").unwrap();
        assert_eq!(state["id"], Value::string("7"));
        assert_eq!(state.len(), 8);
        assert!(state["title"].is_null());
    }

    #[test]
    fn unconfigured_resource_reports_missing_client() {
        let diags = TaskResource::new().read(&state()).unwrap_err();
        assert_eq!(diags.iter().next().unwrap().summary, "Unconfigured TaskMate Client");
    }
}
