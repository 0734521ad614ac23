//! Configuration model for config-declared tools
//!
//! Every tool this server exposes is described entirely by configuration:
//! an HTTP request template, static headers and authentication, an input
//! schema, and a declarative mapping of the JSON response into text.
//! The configuration is loaded once at startup into an immutable value and
//! passed by reference into the engine; there is no global config state.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;
use thiserror::Error;

/// Top-level configuration file structure.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolsConfig {
    /// Server identity reported to the tool host
    pub server_name: String,
    pub server_version: String,
    /// Ordered list of tool definitions
    #[serde(default)]
    pub tools: Vec<ToolDefinition>,
}

/// A single config-declared tool.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ToolDefinition {
    /// Unique tool name used for registration and dispatch
    pub name: String,
    /// Human-readable description shown to the caller
    pub description: String,
    pub request: RequestSpec,
    /// Static headers applied to every request, in declaration order
    #[serde(default)]
    pub headers: Vec<HeaderSpec>,
    /// Optional authentication, applied after static headers (wins on conflict)
    #[serde(default)]
    pub authentication: Option<AuthSpec>,
    #[serde(default)]
    pub input_schema: InputSchema,
    /// Ordered mapping tree describing response extraction
    #[serde(default)]
    pub output_mapping: Vec<OutputMapping>,
}

/// HTTP request template: method plus a `{var}`-style URL template.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RequestSpec {
    pub method: String,
    pub url: String,
}

impl RequestSpec {
    /// Normalized method name for comparisons.
    pub fn method_uppercase(&self) -> String {
        self.method.to_uppercase()
    }

    /// Body-bearing methods serialize the argument set as a JSON body;
    /// everything else carries arguments in the URL only.
    pub fn has_body(&self) -> bool {
        matches!(self.method_uppercase().as_str(), "POST" | "PUT")
    }
}

/// One static header entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeaderSpec {
    pub name: String,
    pub value: String,
}

/// Authentication descriptor.
///
/// `bearer` becomes `Authorization: Bearer <token>`; `header` sets an
/// arbitrary named header. Both are applied after the static header list,
/// so a conflicting auth header wins.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AuthSpec {
    Bearer { token: String },
    Header { name: String, value: String },
}

/// Input schema for a tool: parameter name -> type and optional default.
///
/// This is the JSON-schema-shaped document handed to the tool host at
/// registration. The engine itself only consumes the declared defaults;
/// argument validation is the host's concern.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct InputSchema {
    #[serde(rename = "type", default = "default_schema_type")]
    pub schema_type: String,
    #[serde(default)]
    pub properties: BTreeMap<String, ParameterSpec>,
    #[serde(default)]
    pub required: Vec<String>,
}

impl Default for InputSchema {
    fn default() -> Self {
        Self {
            schema_type: default_schema_type(),
            properties: BTreeMap::new(),
            required: Vec::new(),
        }
    }
}

impl InputSchema {
    /// JSON document form for host registration.
    pub fn document(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Null)
    }
}

fn default_schema_type() -> String {
    "object".to_string()
}

/// One declared parameter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ParameterSpec {
    #[serde(rename = "type")]
    pub param_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Filled in for any parameter the caller did not supply
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// One node of the response mapping tree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OutputMapping {
    /// Path expression resolved against the current context
    pub key: String,
    /// Human-readable label prefixed to the extracted value
    pub label: String,
    pub kind: MappingKind,
    /// Maximum array items to render; 0 means unlimited
    #[serde(default)]
    pub limit: usize,
    /// Child mappings evaluated per array item; ignored for primitives
    #[serde(default)]
    pub children: Vec<OutputMapping>,
}

/// Mapping node kind.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MappingKind {
    Primitive,
    Array,
}

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file: {0}")]
    FileRead(#[from] std::io::Error),
    #[error("failed to parse config JSON: {0}")]
    JsonParse(#[from] serde_json::Error),
    #[error("duplicate tool name: {0}")]
    DuplicateTool(String),
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

const SUPPORTED_METHODS: &[&str] = &["GET", "POST", "PUT", "DELETE", "HEAD", "OPTIONS", "PATCH"];

impl ToolsConfig {
    /// Load and validate configuration from a JSON file.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config: ToolsConfig = serde_json::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate tool names and request templates.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen = std::collections::HashSet::new();
        for tool in &self.tools {
            if tool.name.is_empty() {
                return Err(ConfigError::InvalidConfig(
                    "tool name must not be empty".to_string(),
                ));
            }
            if !seen.insert(tool.name.as_str()) {
                return Err(ConfigError::DuplicateTool(tool.name.clone()));
            }
            let method = tool.request.method_uppercase();
            if !SUPPORTED_METHODS.contains(&method.as_str()) {
                return Err(ConfigError::InvalidConfig(format!(
                    "tool '{}' uses unsupported method '{}'",
                    tool.name, tool.request.method
                )));
            }
            if tool.request.url.is_empty() {
                return Err(ConfigError::InvalidConfig(format!(
                    "tool '{}' has an empty URL template",
                    tool.name
                )));
            }
        }
        Ok(())
    }

    /// Look up a tool definition by name.
    pub fn tool(&self, name: &str) -> Option<&ToolDefinition> {
        self.tools.iter().find(|t| t.name == name)
    }
}
