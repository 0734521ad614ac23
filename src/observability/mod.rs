//! Observability for the tool server
//!
//! Structured logging setup plus the span macro used around tool calls.

pub mod logging;

pub use logging::{init_default_logging, init_logging, LogFormat};

pub use logging::tool_span;
