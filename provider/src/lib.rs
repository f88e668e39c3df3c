//! TaskMate provider: maps `taskmate_task` resources and the `taskmate_task`
//! and `taskmate_tasks` data sources onto the TaskMate REST API.
//!
//! # Overview
//! The host drives the provider through `ProviderServer`. Configuration builds
//! one `TaskClient` that every resource and data source shares read-only.
//! Each callback translates attribute sets to client calls and back, and
//! turns client errors into diagnostics.
//!
//! # Design
//! - Attribute sets are `Object`s of `Value`s (null, unknown, or known).
//! - Callbacks return `Result<_, Diagnostics>`; nothing is retried and a
//!   failed callback leaves state untouched.
//! - Reading a task the API reports as missing is an error, not a removal
//!   from state.

pub mod config;
pub mod diagnostics;
pub mod model;
pub mod provider;
pub mod resource;
pub mod schema;
pub mod server;
pub mod task_data_source;
pub mod task_resource;
pub mod tasks_data_source;
pub mod value;

#[cfg(test)]
mod testing;

pub use config::ProviderConfig;
pub use diagnostics::{Diagnostic, Diagnostics, Severity};
pub use provider::TaskMateProvider;
pub use resource::{DataSource, Provider, ProviderData, ProviderMetadata, Resource};
pub use schema::{Attribute, AttributeType, Schema};
pub use server::{ProviderSchema, ProviderServer};
pub use task_data_source::TaskDataSource;
pub use task_resource::TaskResource;
pub use tasks_data_source::TasksDataSource;
pub use value::{object, Object, Value};
