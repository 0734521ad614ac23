//! Tool host seam and in-process registry
//!
//! The engine does not speak any host protocol itself; it hands the host a
//! registration (name, description, input schema document) and a handler.
//! One generic handler type serves every config-declared tool by holding a
//! shared reference to its `ToolDefinition`, instead of minting a closure
//! per config entry. `ToolRegistry` is the in-process host used by the CLI
//! and the tests.

use crate::config::{ToolDefinition, ToolsConfig};
use crate::engine::{ToolEngine, FRAGMENT_SEPARATOR};
use crate::error::{ToolCallError, ToolCallResult};
use crate::tool_span;
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::Instrument;

/// Registration metadata handed to the tool host.
#[derive(Debug, Clone)]
pub struct ToolRegistration {
    pub name: String,
    pub description: String,
    /// JSON-schema-shaped document describing the tool's parameters
    pub input_schema: Value,
}

impl ToolRegistration {
    pub fn from_definition(definition: &ToolDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            description: definition.description.clone(),
            input_schema: definition.input_schema.document(),
        }
    }
}

/// Invocable side of a registered tool.
#[async_trait]
pub trait ToolHandler: Send + Sync {
    /// Run the tool with caller-supplied arguments, returning its textual
    /// result or the failure for this invocation.
    async fn call(&self, args: Map<String, Value>) -> ToolCallResult<String>;
}

/// Registration interface a tool host exposes to the engine.
pub trait ToolHost {
    fn register(&mut self, registration: ToolRegistration, handler: Arc<dyn ToolHandler>);
}

/// The single handler type behind every config-declared tool.
pub struct GenericToolHandler {
    definition: Arc<ToolDefinition>,
    engine: Arc<ToolEngine>,
}

impl GenericToolHandler {
    pub fn new(definition: Arc<ToolDefinition>, engine: Arc<ToolEngine>) -> Self {
        Self { definition, engine }
    }
}

#[async_trait]
impl ToolHandler for GenericToolHandler {
    async fn call(&self, args: Map<String, Value>) -> ToolCallResult<String> {
        let span = tool_span!(tool_name = %self.definition.name);
        async {
            let fragments = self.engine.execute(&self.definition, args).await?;
            Ok(fragments.join(FRAGMENT_SEPARATOR))
        }
        .instrument(span)
        .await
    }
}

/// Register every tool in `config` with `host`, all sharing one engine.
pub fn register_tools(host: &mut dyn ToolHost, config: &ToolsConfig, engine: Arc<ToolEngine>) {
    for definition in &config.tools {
        let registration = ToolRegistration::from_definition(definition);
        let handler = GenericToolHandler::new(Arc::new(definition.clone()), engine.clone());
        host.register(registration, Arc::new(handler));
    }
}

struct RegisteredTool {
    registration: ToolRegistration,
    handler: Arc<dyn ToolHandler>,
}

/// In-process tool host keeping tools in registration order.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<RegisteredTool>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry with every tool from `config` registered.
    pub fn from_config(config: &ToolsConfig, engine: Arc<ToolEngine>) -> Self {
        let mut registry = Self::new();
        register_tools(&mut registry, config, engine);
        registry
    }

    /// Invoke a registered tool by name.
    pub async fn call(&self, name: &str, args: Map<String, Value>) -> ToolCallResult<String> {
        let tool = self
            .tools
            .iter()
            .find(|t| t.registration.name == name)
            .ok_or_else(|| ToolCallError::UnknownTool(name.to_string()))?;
        tool.handler.call(args).await
    }

    /// Registration metadata for one tool.
    pub fn describe(&self, name: &str) -> Option<&ToolRegistration> {
        self.tools
            .iter()
            .map(|t| &t.registration)
            .find(|r| r.name == name)
    }

    /// All registrations, in registration order.
    pub fn list(&self) -> Vec<&ToolRegistration> {
        self.tools.iter().map(|t| &t.registration).collect()
    }
}

impl ToolHost for ToolRegistry {
    fn register(&mut self, registration: ToolRegistration, handler: Arc<dyn ToolHandler>) {
        self.tools.push(RegisteredTool {
            registration,
            handler,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct StaticHandler(String);

    #[async_trait]
    impl ToolHandler for StaticHandler {
        async fn call(&self, _args: Map<String, Value>) -> ToolCallResult<String> {
            Ok(self.0.clone())
        }
    }

    fn registration(name: &str) -> ToolRegistration {
        ToolRegistration {
            name: name.to_string(),
            description: format!("{name} tool"),
            input_schema: json!({ "type": "object" }),
        }
    }

    #[tokio::test]
    async fn test_registry_dispatches_by_name() {
        let mut registry = ToolRegistry::new();
        registry.register(registration("a"), Arc::new(StaticHandler("A".to_string())));
        registry.register(registration("b"), Arc::new(StaticHandler("B".to_string())));

        assert_eq!(registry.call("a", Map::new()).await.unwrap(), "A");
        assert_eq!(registry.call("b", Map::new()).await.unwrap(), "B");
    }

    #[tokio::test]
    async fn test_unknown_tool_is_an_error() {
        let registry = ToolRegistry::new();
        let result = registry.call("missing", Map::new()).await;
        assert!(matches!(result, Err(ToolCallError::UnknownTool(name)) if name == "missing"));
    }

    #[test]
    fn test_list_preserves_registration_order() {
        let mut registry = ToolRegistry::new();
        for name in ["one", "two", "three"] {
            registry.register(registration(name), Arc::new(StaticHandler(String::new())));
        }

        let names: Vec<&str> = registry.list().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["one", "two", "three"]);
    }

    #[test]
    fn test_describe_returns_schema_document() {
        let mut registry = ToolRegistry::new();
        registry.register(registration("a"), Arc::new(StaticHandler(String::new())));

        let described = registry.describe("a").unwrap();
        assert_eq!(described.description, "a tool");
        assert_eq!(described.input_schema["type"], "object");
        assert!(registry.describe("zzz").is_none());
    }

    #[test]
    fn test_register_tools_covers_every_definition() {
        let config: ToolsConfig = serde_json::from_value(json!({
            "server_name": "s",
            "server_version": "0",
            "tools": [
                {
                    "name": "first",
                    "description": "First",
                    "request": { "method": "GET", "url": "https://example.com/1" }
                },
                {
                    "name": "second",
                    "description": "Second",
                    "request": { "method": "POST", "url": "https://example.com/2" }
                }
            ]
        }))
        .unwrap();

        let registry = ToolRegistry::from_config(&config, Arc::new(ToolEngine::new()));
        assert_eq!(registry.list().len(), 2);
        assert!(registry.describe("first").is_some());
        assert!(registry.describe("second").is_some());
    }
}
