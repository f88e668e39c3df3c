//! Host-facing dispatcher.
//!
//! # Design
//! `ProviderServer` mirrors the RPC surface the host drives: schema, provider
//! configuration, validation, plan, apply, read, import, and data source
//! reads. It routes each call to the resource or data source registered
//! under the requested type name. After `configure_provider` every method
//! takes `&self`, so the host may drive independent instances concurrently.

use std::collections::BTreeMap;

use tracing::{debug, info_span, warn};

use crate::diagnostics::Diagnostics;
use crate::resource::{DataSource, Provider, Resource};
use crate::schema::Schema;
use crate::value::Object;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderSchema {
    pub provider: Schema,
    pub resources: BTreeMap<String, Schema>,
    pub data_sources: BTreeMap<String, Schema>,
}

pub struct ProviderServer {
    provider: Box<dyn Provider>,
    resources: BTreeMap<String, Box<dyn Resource>>,
    data_sources: BTreeMap<String, Box<dyn DataSource>>,
}

impl ProviderServer {
    pub fn new(provider: impl Provider + 'static) -> Self {
        let type_name = provider.metadata().type_name;
        let resources = provider
            .resources()
            .into_iter()
            .map(|r| (r.type_name(&type_name), r))
            .collect();
        let data_sources = provider
            .data_sources()
            .into_iter()
            .map(|d| (d.type_name(&type_name), d))
            .collect();
        Self {
            provider: Box::new(provider),
            resources,
            data_sources,
        }
    }

    pub fn provider_schema(&self) -> ProviderSchema {
        ProviderSchema {
            provider: self.provider.schema(),
            resources: self
                .resources
                .iter()
                .map(|(name, r)| (name.clone(), r.schema()))
                .collect(),
            data_sources: self
                .data_sources
                .iter()
                .map(|(name, d)| (name.clone(), d.schema()))
                .collect(),
        }
    }

    /// Build the shared client and hand it to every resource and data source.
    pub fn configure_provider(&mut self, config: &Object) -> Diagnostics {
        let _span = info_span!("configure_provider").entered();

        let mut diags = self.provider.schema().validate_config(config);
        if diags.has_error() {
            return diags;
        }
        let data = match self.provider.configure(config) {
            Ok(data) => data,
            Err(errors) => {
                diags.extend(errors);
                return diags;
            }
        };
        for resource in self.resources.values_mut() {
            diags.extend(resource.configure(Some(&data)));
        }
        for data_source in self.data_sources.values_mut() {
            diags.extend(data_source.configure(Some(&data)));
        }
        diags
    }

    fn resource(&self, type_name: &str) -> Result<&dyn Resource, Diagnostics> {
        self.resources.get(type_name).map(|r| r.as_ref()).ok_or_else(|| {
            Diagnostics::error(
                "Resource Type Not Found",
                format!("The provider does not serve a resource of type \"{type_name}\"."),
            )
        })
    }

    fn data_source(&self, type_name: &str) -> Result<&dyn DataSource, Diagnostics> {
        self.data_sources.get(type_name).map(|d| d.as_ref()).ok_or_else(|| {
            Diagnostics::error(
                "Data Source Type Not Found",
                format!("The provider does not serve a data source of type \"{type_name}\"."),
            )
        })
    }

    pub fn validate_resource_config(&self, type_name: &str, config: &Object) -> Diagnostics {
        match self.resource(type_name) {
            Ok(resource) => resource.schema().validate_config(config),
            Err(diags) => diags,
        }
    }

    pub fn validate_data_source_config(&self, type_name: &str, config: &Object) -> Diagnostics {
        match self.data_source(type_name) {
            Ok(data_source) => data_source.schema().validate_config(config),
            Err(diags) => diags,
        }
    }

    /// Planned state for a resource instance. `config == None` plans its
    /// destruction.
    pub fn plan_resource_change(
        &self,
        type_name: &str,
        prior: Option<&Object>,
        config: Option<&Object>,
    ) -> Result<Option<Object>, Diagnostics> {
        let _span = info_span!("plan_resource_change", resource = type_name).entered();
        let resource = self.resource(type_name)?;
        let Some(config) = config else {
            return Ok(None);
        };
        let schema = resource.schema();
        schema.validate_config(config).into_result(())?;
        Ok(Some(schema.plan(prior, config)))
    }

    /// Apply a planned change: create when there is no prior state, delete
    /// when there is no planned state, update otherwise.
    pub fn apply_resource_change(
        &self,
        type_name: &str,
        prior: Option<&Object>,
        planned: Option<&Object>,
    ) -> Result<Option<Object>, Diagnostics> {
        let _span = info_span!("apply_resource_change", resource = type_name).entered();
        let resource = self.resource(type_name)?;
        let result = match (prior, planned) {
            (None, None) => Ok(None),
            (None, Some(planned)) => resource.create(planned).map(Some),
            (Some(prior), Some(planned)) => resource.update(planned, prior).map(Some),
            (Some(prior), None) => resource.delete(prior).map(|()| None),
        };
        if let Err(diags) = &result {
            warn!(%diags, "apply failed");
        }
        result
    }

    pub fn read_resource(&self, type_name: &str, state: &Object) -> Result<Object, Diagnostics> {
        let _span = info_span!("read_resource", resource = type_name).entered();
        self.resource(type_name)?.read(state)
    }

    /// Import state for `id`. The host reads the result back through
    /// `read_resource` before persisting it.
    pub fn import_resource_state(&self, type_name: &str, id: &str) -> Result<Object, Diagnostics> {
        let _span = info_span!("import_resource_state", resource = type_name).entered();
        debug!(import_id = id, "import requested");
        self.resource(type_name)?.import_state(id)
    }

    pub fn read_data_source(&self, type_name: &str, config: &Object) -> Result<Object, Diagnostics> {
        let _span = info_span!("read_data_source", data_source = type_name).entered();
        let data_source = self.data_source(type_name)?;
        data_source.schema().validate_config(config).into_result(())?;
        data_source.read(config)
    }
}
