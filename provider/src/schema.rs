//! Schema declarations and the two schema-driven host steps the provider
//! relies on: configuration validation and plan computation.
//!
//! # Design
//! An attribute is exactly one of required, optional, computed, or optional
//! and computed. Computed attributes left null in configuration are filled
//! from prior state, and become unknown whenever the instance is being
//! created or changed, unless they carry `use_state_for_unknown` and prior
//! state holds a known value.

use std::collections::BTreeMap;

use crate::diagnostics::Diagnostics;
use crate::value::{Object, Value};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeType {
    String,
    /// A list of objects sharing the nested attribute set.
    ListNested(BTreeMap<String, Attribute>),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    pub ty: AttributeType,
    pub description: String,
    pub required: bool,
    pub optional: bool,
    pub computed: bool,
    pub sensitive: bool,
    pub use_state_for_unknown: bool,
}

impl Attribute {
    fn string(description: &str, required: bool, optional: bool, computed: bool) -> Self {
        Self {
            ty: AttributeType::String,
            description: description.to_string(),
            required,
            optional,
            computed,
            sensitive: false,
            use_state_for_unknown: false,
        }
    }

    pub fn required_string(description: &str) -> Self {
        Self::string(description, true, false, false)
    }

    pub fn optional_string(description: &str) -> Self {
        Self::string(description, false, true, false)
    }

    pub fn computed_string(description: &str) -> Self {
        Self::string(description, false, false, true)
    }

    /// User-settable, server-defaulted when omitted.
    pub fn optional_computed_string(description: &str) -> Self {
        Self::string(description, false, true, true)
    }

    pub fn computed_list_nested<'a>(
        description: &str,
        attributes: impl IntoIterator<Item = (&'a str, Attribute)>,
    ) -> Self {
        Self {
            ty: AttributeType::ListNested(
                attributes
                    .into_iter()
                    .map(|(name, attr)| (name.to_string(), attr))
                    .collect(),
            ),
            description: description.to_string(),
            required: false,
            optional: false,
            computed: true,
            sensitive: false,
            use_state_for_unknown: false,
        }
    }

    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// Keep the prior state value in plans instead of marking it unknown.
    pub fn use_state_for_unknown(mut self) -> Self {
        self.use_state_for_unknown = true;
        self
    }

    /// Computed and not settable from configuration.
    pub fn is_read_only(&self) -> bool {
        self.computed && !self.optional && !self.required
    }

    fn accepts(&self, value: &Value) -> bool {
        match (&self.ty, value) {
            (_, Value::Null | Value::Unknown) => true,
            (AttributeType::String, Value::String(_)) => true,
            (AttributeType::ListNested(_), Value::List(items)) => {
                items.iter().all(|item| matches!(item, Value::Object(_)))
            }
            _ => false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Schema {
    pub description: String,
    pub attributes: BTreeMap<String, Attribute>,
}

impl Schema {
    pub fn new(description: &str) -> Self {
        Self {
            description: description.to_string(),
            attributes: BTreeMap::new(),
        }
    }

    pub fn with_attribute(mut self, name: &str, attribute: Attribute) -> Self {
        self.attributes.insert(name.to_string(), attribute);
        self
    }

    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.get(name)
    }

    /// Every attribute set to null.
    pub fn null_object(&self) -> Object {
        self.attributes
            .keys()
            .map(|name| (name.clone(), Value::Null))
            .collect()
    }

    pub fn validate_config(&self, config: &Object) -> Diagnostics {
        let mut diags = Diagnostics::new();

        for (name, value) in config {
            match self.attributes.get(name) {
                None => diags.add_attribute_error(
                    name.as_str(),
                    "Unsupported Attribute",
                    format!("An argument named \"{name}\" is not expected here."),
                ),
                Some(attr) if !attr.accepts(value) => diags.add_attribute_error(
                    name.as_str(),
                    "Invalid Attribute Type",
                    format!("Attribute \"{name}\" does not accept a {} value.", value.kind()),
                ),
                Some(_) => {}
            }
        }

        for (name, attr) in &self.attributes {
            let value = config.get(name).unwrap_or(&Value::Null);
            if attr.required && value.is_null() {
                diags.add_attribute_error(
                    name.as_str(),
                    "Missing Required Attribute",
                    format!("The argument \"{name}\" is required, but no definition was found."),
                );
            }
            if attr.is_read_only() && !value.is_null() {
                diags.add_attribute_error(
                    name.as_str(),
                    "Invalid Configuration for Read-Only Attribute",
                    format!(
                        "Cannot set value for \"{name}\" as the provider has marked it as read-only. \
                         Remove the configuration line setting the value."
                    ),
                );
            }
        }

        diags
    }

    /// Planned new state for an instance, given its prior state (`None` on
    /// create) and its configuration.
    pub fn plan(&self, prior: Option<&Object>, config: &Object) -> Object {
        let prior_value = |name: &str| -> Value {
            prior
                .and_then(|p| p.get(name))
                .cloned()
                .unwrap_or_default()
        };

        let mut planned: Object = self
            .attributes
            .iter()
            .map(|(name, attr)| {
                let configured = config.get(name).cloned().unwrap_or_default();
                let value = if configured.is_null() && attr.computed {
                    prior_value(name)
                } else {
                    configured
                };
                (name.clone(), value)
            })
            .collect();

        let changed = match prior {
            None => true,
            Some(_) => self
                .attributes
                .keys()
                .any(|name| planned.get(name) != Some(&prior_value(name))),
        };
        if !changed {
            return planned;
        }

        for (name, attr) in &self.attributes {
            let configured_null = config.get(name).map_or(true, Value::is_null);
            if !attr.computed || !configured_null {
                continue;
            }
            if attr.use_state_for_unknown && prior_value(name).is_known() {
                continue;
            }
            planned.insert(name.clone(), Value::Unknown);
        }
        planned
    }
}
