//! Error types for tool invocation
//!
//! Every failure is scoped to a single tool call; there is no process-level
//! error path in the engine. Extraction misses (a mapping key that does not
//! resolve) are deliberately not errors and never appear here.

use crate::engine::template::TemplateError;
use thiserror::Error;

/// Failure of one tool invocation, surfaced to the tool host.
#[derive(Debug, Error)]
pub enum ToolCallError {
    /// Invalid URL template or unresolvable referenced variable.
    /// Fails the call before any network activity.
    #[error("url template error: {0}")]
    Template(#[from] TemplateError),

    /// Request construction or network failure; nothing is retried.
    #[error("http request failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The expanded URL is not a valid absolute URL.
    #[error("invalid request url '{url}': {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Non-success HTTP status; carries the raw body as diagnostic context.
    #[error("request failed with status {status}: {body}")]
    RemoteStatus { status: u16, body: String },

    /// Response body is not valid JSON.
    #[error("failed to decode json response: {0}")]
    Decode(#[source] serde_json::Error),

    /// A configured header name or value that is not legal HTTP.
    #[error("invalid header '{0}'")]
    InvalidHeader(String),

    /// Method name the engine cannot build a request for. Config
    /// validation rejects these up front; this covers hand-built
    /// definitions.
    #[error("unsupported http method: {0}")]
    UnsupportedMethod(String),

    /// Dispatch to a tool name the registry does not know.
    #[error("unknown tool: {0}")]
    UnknownTool(String),
}

/// Result type for tool invocations
pub type ToolCallResult<T> = Result<T, ToolCallError>;
