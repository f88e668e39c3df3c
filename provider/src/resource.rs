//! Callback contracts between the host and provider-defined types.
//!
//! Every callback receives the attribute sets it needs (plan/config for the
//! desired side, state for the current side) and returns either the new
//! attribute set or the diagnostics that halted it.

use std::any::Any;
use std::sync::Arc;

use crate::diagnostics::Diagnostics;
use crate::schema::Schema;
use crate::value::{Object, Value};

/// Value produced by `Provider::configure` and handed to every resource and
/// data source. Shared read-only for the rest of the provider's life.
pub type ProviderData = Arc<dyn Any + Send + Sync>;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderMetadata {
    pub type_name: String,
    pub version: String,
}

pub trait Provider: Send + Sync {
    fn metadata(&self) -> ProviderMetadata;

    fn schema(&self) -> Schema;

    fn configure(&self, config: &Object) -> Result<ProviderData, Diagnostics>;

    fn resources(&self) -> Vec<Box<dyn Resource>>;

    fn data_sources(&self) -> Vec<Box<dyn DataSource>>;
}

/// A managed entity with a full create/read/update/delete/import lifecycle.
pub trait Resource: Send + Sync {
    fn type_name(&self, provider_type_name: &str) -> String;

    fn schema(&self) -> Schema;

    /// Called once after provider configuration. `None` means the provider
    /// has not been configured yet (e.g. during validation).
    fn configure(&mut self, _provider_data: Option<&ProviderData>) -> Diagnostics {
        Diagnostics::new()
    }

    fn create(&self, plan: &Object) -> Result<Object, Diagnostics>;

    fn read(&self, state: &Object) -> Result<Object, Diagnostics>;

    fn update(&self, plan: &Object, state: &Object) -> Result<Object, Diagnostics>;

    /// On success the host drops the instance from state.
    fn delete(&self, state: &Object) -> Result<(), Diagnostics>;

    /// Seed state for an externally created entity. The host follows up with
    /// `read` to fill in the rest.
    fn import_state(&self, _id: &str) -> Result<Object, Diagnostics> {
        Err(Diagnostics::error(
            "Resource Import Not Implemented",
            "This resource does not support import. Please contact the provider developer for additional information.",
        ))
    }
}

/// A read-only query against existing entities.
pub trait DataSource: Send + Sync {
    fn type_name(&self, provider_type_name: &str) -> String;

    fn schema(&self) -> Schema;

    fn configure(&mut self, _provider_data: Option<&ProviderData>) -> Diagnostics {
        Diagnostics::new()
    }

    fn read(&self, config: &Object) -> Result<Object, Diagnostics>;
}

/// State holding only the import identifier under `attribute`; every other
/// attribute is null.
pub fn import_state_passthrough_id(schema: &Schema, attribute: &str, id: &str) -> Object {
    let mut state = schema.null_object();
    state.insert(attribute.to_string(), Value::string(id));
    state
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Attribute;

    #[test]
    fn passthrough_sets_only_the_id() {
        let schema = Schema::new("t")
            .with_attribute("id", Attribute::computed_string("id"))
            .with_attribute("title", Attribute::required_string("title"));
        let state = import_state_passthrough_id(&schema, "id", "42");
        assert_eq!(state["id"], Value::string("42"));
        assert!(state["title"].is_null());
    }
}
