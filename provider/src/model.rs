//! Field-level translation between attribute sets and API types, shared by
//! the task resource and both task data sources.

use std::sync::Arc;

use taskmate_core::{format_timestamp, ApiError, CreateTask, Task, TaskClient, UpdateTask};

use crate::diagnostics::Diagnostics;
use crate::resource::ProviderData;
use crate::value::{Object, Value};

pub const ID: &str = "id";
pub const TITLE: &str = "title";
pub const DESCRIPTION: &str = "description";
pub const DUE_DATE: &str = "due_date";
pub const PRIORITY: &str = "priority";
pub const STATUS: &str = "status";
pub const CREATED_AT: &str = "created_at";
pub const UPDATED_AT: &str = "updated_at";

/// One task as an attribute set. Every field is a string value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskModel {
    pub id: Value,
    pub title: Value,
    pub description: Value,
    pub due_date: Value,
    pub priority: Value,
    pub status: Value,
    pub created_at: Value,
    pub updated_at: Value,
}

impl TaskModel {
    pub fn from_object(obj: &Object) -> Result<Self, Diagnostics> {
        let mut diags = Diagnostics::new();
        let mut field = |name: &str| -> Value {
            match obj.get(name) {
                None => Value::Null,
                Some(v) if matches!(v, Value::Null | Value::Unknown | Value::String(_)) => v.clone(),
                Some(other) => {
                    diags.add_attribute_error(
                        name,
                        "Invalid Attribute Type",
                        format!("Expected a string value for \"{name}\", got {}.", other.kind()),
                    );
                    Value::Null
                }
            }
        };
        let model = Self {
            id: field(ID),
            title: field(TITLE),
            description: field(DESCRIPTION),
            due_date: field(DUE_DATE),
            priority: field(PRIORITY),
            status: field(STATUS),
            created_at: field(CREATED_AT),
            updated_at: field(UPDATED_AT),
        };
        diags.into_result(model)
    }

    pub fn into_object(self) -> Object {
        Object::from([
            (ID.to_string(), self.id),
            (TITLE.to_string(), self.title),
            (DESCRIPTION.to_string(), self.description),
            (DUE_DATE.to_string(), self.due_date),
            (PRIORITY.to_string(), self.priority),
            (STATUS.to_string(), self.status),
            (CREATED_AT.to_string(), self.created_at),
            (UPDATED_AT.to_string(), self.updated_at),
        ])
    }

    /// Fully populated model, as the data sources report it.
    pub fn from_task(task: &Task) -> Self {
        let mut model = Self {
            id: Value::string(task.id.to_string()),
            ..Self::default()
        };
        model.refresh(task);
        model.description = Value::string(&task.description);
        model.due_date = Value::string(&task.due_date);
        model
    }

    /// Overwrite every attribute except `id` from a server response.
    ///
    /// `description` and `due_date` have no server default: an empty value
    /// from the server leaves a null attribute null.
    pub fn refresh(&mut self, task: &Task) {
        self.title = Value::string(&task.title);
        self.description = keep_null_if_empty(&self.description, &task.description);
        self.due_date = keep_null_if_empty(&self.due_date, &task.due_date);
        self.priority = Value::string(&task.priority);
        self.status = Value::string(&task.status);
        self.created_at = Value::string(format_timestamp(&task.created_at));
        self.updated_at = Value::string(format_timestamp(&task.updated_at));
    }

    pub fn task_id(&self) -> Result<i64, Diagnostics> {
        parse_task_id(&self.id.value_string())
    }

    pub fn create_input(&self) -> CreateTask {
        CreateTask {
            title: self.title.value_string(),
            description: self.description.value_string(),
            due_date: self.due_date.value_string(),
            priority: self.priority.value_string(),
        }
    }

    pub fn update_input(&self) -> UpdateTask {
        UpdateTask {
            title: self.title.value_string(),
            description: self.description.value_string(),
            due_date: self.due_date.value_string(),
            priority: self.priority.value_string(),
            status: self.status.value_string(),
        }
    }
}

fn keep_null_if_empty(current: &Value, server: &str) -> Value {
    if server.is_empty() && current.is_null() {
        Value::Null
    } else {
        Value::string(server)
    }
}

/// Parse a stored id string. Fails locally; no request is made.
pub fn parse_task_id(raw: &str) -> Result<i64, Diagnostics> {
    raw.trim().parse::<i64>().map_err(|e| {
        let mut diags = Diagnostics::new();
        diags.add_attribute_error(ID, "Parse Error", format!("Unable to parse task ID {raw:?}: {e}"));
        diags
    })
}

/// `action` reads like "create task" or "list tasks".
pub fn client_error(action: &str, err: &ApiError) -> Diagnostics {
    Diagnostics::error("Client Error", format!("Unable to {action}, got error: {err}"))
}

/// Extract the shared client from provider data. `Ok(None)` when the
/// provider has not been configured yet.
pub fn client_from_provider_data(
    provider_data: Option<&ProviderData>,
    summary: &str,
) -> Result<Option<Arc<TaskClient>>, Diagnostics> {
    let Some(data) = provider_data else {
        return Ok(None);
    };
    Arc::clone(data).downcast::<TaskClient>().map(Some).map_err(|_| {
        Diagnostics::error(
            summary,
            "Expected a TaskClient as provider data. Please report this issue to the provider developers.",
        )
    })
}

/// Store the shared client in `slot`, leaving it untouched when the provider
/// is not configured yet.
pub fn configure_client(
    slot: &mut Option<Arc<TaskClient>>,
    provider_data: Option<&ProviderData>,
    summary: &str,
) -> Diagnostics {
    match client_from_provider_data(provider_data, summary) {
        Ok(Some(client)) => {
            *slot = Some(client);
            Diagnostics::new()
        }
        Ok(None) => Diagnostics::new(),
        Err(diags) => diags,
    }
}

pub fn require_client(client: &Option<Arc<TaskClient>>) -> Result<&TaskClient, Diagnostics> {
    client.as_deref().ok_or_else(|| {
        Diagnostics::error(
            "Unconfigured TaskMate Client",
            "Expected a configured TaskMate client. Configure the provider before using its resources and data sources.",
        )
    })
}
