//! Toolbridge - config-declared HTTP tools for agent-protocol hosts
//!
//! Every tool this crate exposes is declared entirely in configuration:
//! an HTTP method, a parameterized URL, static headers and authentication,
//! an input schema, and a declarative mapping describing how to extract
//! and format fields from the JSON response. No tool is hand-coded.
//!
//! # Overview
//!
//! - Configuration model and loading ([`config`])
//! - The generic execution engine: URL template expansion, request
//!   building and dispatch, and recursive response extraction ([`engine`])
//! - The registration seam toward a tool host, plus an in-process
//!   registry ([`host`])
//!
//! # Quick Start
//!
//! ```no_run
//! use std::sync::Arc;
//! use toolbridge::config::ToolsConfig;
//! use toolbridge::engine::ToolEngine;
//! use toolbridge::host::ToolRegistry;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ToolsConfig::load_from_file(std::path::Path::new("tools.json"))?;
//! let registry = ToolRegistry::from_config(&config, Arc::new(ToolEngine::new()));
//!
//! let mut args = serde_json::Map::new();
//! args.insert("query".to_string(), serde_json::json!("rust"));
//! let text = registry.call("web_search", args).await?;
//! println!("{text}");
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod host;
pub mod observability;

pub use config::{ConfigError, ToolDefinition, ToolsConfig};
pub use engine::{ToolEngine, FRAGMENT_SEPARATOR};
pub use error::{ToolCallError, ToolCallResult};
pub use host::{GenericToolHandler, ToolHandler, ToolHost, ToolRegistration, ToolRegistry};
