//! Provider configuration: explicit value, then environment, then default.

use std::fmt;

use crate::diagnostics::Diagnostics;
use crate::value::{Object, Value};

pub const DEFAULT_HOST: &str = "http://localhost:8080";
pub const HOST_ENV: &str = "TASKMATE_HOST";
pub const TOKEN_ENV: &str = "TASKMATE_TOKEN";

/// Environment lookup used while resolving configuration.
pub type EnvLookup = fn(&str) -> Option<String>;

pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Resolved settings for the shared API client.
#[derive(Clone, PartialEq, Eq)]
pub struct ProviderConfig {
    pub host: String,
    pub token: Option<String>,
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("host", &self.host)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            token: None,
        }
    }
}

impl ProviderConfig {
    pub fn resolve(config: &Object, env: EnvLookup) -> Result<Self, Diagnostics> {
        let host = config.get("host").unwrap_or(&Value::Null);
        let token = config.get("token").unwrap_or(&Value::Null);

        let mut diags = Diagnostics::new();
        if host.is_unknown() {
            diags.add_attribute_error(
                "host",
                "Unknown TaskMate API Host",
                format!(
                    "The provider cannot create the TaskMate API client as there is an unknown \
                     configuration value for the TaskMate API host. Either apply the source of the \
                     value first, set the value statically in the configuration, or use the \
                     {HOST_ENV} environment variable."
                ),
            );
        }
        if token.is_unknown() {
            diags.add_attribute_error(
                "token",
                "Unknown TaskMate API Token",
                format!(
                    "The provider cannot create the TaskMate API client as there is an unknown \
                     configuration value for the TaskMate API token. Either apply the source of the \
                     value first, set the value statically in the configuration, or use the \
                     {TOKEN_ENV} environment variable."
                ),
            );
        }
        if diags.has_error() {
            return Err(diags);
        }

        let host = non_empty(host.value_string())
            .or_else(|| env(HOST_ENV).and_then(non_empty))
            .unwrap_or_else(|| DEFAULT_HOST.to_string());
        let token = non_empty(token.value_string()).or_else(|| env(TOKEN_ENV).and_then(non_empty));

        Ok(Self { host, token })
    }
}

fn non_empty(s: String) -> Option<String> {
    if s.is_empty() {
        None
    } else {
        Some(s)
    }
}
