//! Generic tool execution engine
//!
//! One engine instance serves every config-declared tool: it expands the
//! URL template, builds and sends the HTTP request, decodes the JSON
//! response, and extracts text fragments through the output mapping tree.
//! The engine holds no per-tool state; a `ToolDefinition` is borrowed
//! read-only for the duration of a call and all mutable state is created
//! fresh per invocation, so concurrent calls need no synchronization.

pub mod mapping;
pub mod path;
pub mod template;

use crate::config::{AuthSpec, ToolDefinition};
use crate::error::{ToolCallError, ToolCallResult};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, AUTHORIZATION};
use serde_json::{Map, Value};
use tracing::{debug, info, warn};
use url::Url;

/// Separator between top-level result fragments.
pub const FRAGMENT_SEPARATOR: &str = "|";

/// Stateless executor for config-declared tools.
pub struct ToolEngine {
    client: reqwest::Client,
}

impl Default for ToolEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolEngine {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }

    /// Build an engine around a preconfigured client (proxies, TLS, etc.).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Execute one tool call: a linear sequence with no retries.
    ///
    /// Returns the ordered result fragments; callers join them with
    /// [`FRAGMENT_SEPARATOR`] for the textual result.
    pub async fn execute(
        &self,
        definition: &ToolDefinition,
        mut args: Map<String, Value>,
    ) -> ToolCallResult<Vec<String>> {
        apply_defaults(definition, &mut args);
        info!(tool = %definition.name, arguments = %serde_json::Value::Object(args.clone()), "tool called");

        let method = definition.request.method_uppercase();
        let expanded = template::expand(&definition.request.url, &args, &method)?;
        debug!(tool = %definition.name, url = %expanded, "expanded url template");

        let url = Url::parse(&expanded).map_err(|source| ToolCallError::InvalidUrl {
            url: expanded.clone(),
            source,
        })?;

        let mut request = self.request_for_method(&method, url)?;

        if definition.request.has_body() {
            let body = Value::Object(args.clone());
            debug!(method = %method, url = %expanded, body = %body, "sending http request");
            request = request.json(&body);
        } else {
            debug!(method = %method, url = %expanded, "sending http request");
        }

        request = request.headers(build_headers(definition)?);

        let response = request.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;
        debug!(status, body = %body, "received http response");

        if status != 200 {
            warn!(tool = %definition.name, status, "remote call failed");
            return Err(ToolCallError::RemoteStatus { status, body });
        }

        let decoded: Value = serde_json::from_str(&body).map_err(ToolCallError::Decode)?;
        Ok(mapping::evaluate(&decoded, &definition.output_mapping))
    }

    fn request_for_method(&self, method: &str, url: Url) -> ToolCallResult<reqwest::RequestBuilder> {
        let builder = match method {
            "GET" => self.client.get(url),
            "POST" => self.client.post(url),
            "PUT" => self.client.put(url),
            "DELETE" => self.client.delete(url),
            "HEAD" => self.client.head(url),
            "PATCH" => self.client.patch(url),
            "OPTIONS" => self.client.request(reqwest::Method::OPTIONS, url),
            other => return Err(ToolCallError::UnsupportedMethod(other.to_string())),
        };
        Ok(builder)
    }
}

/// Assemble static headers, then authentication. Insert semantics make
/// the auth header win when both declare the same name.
fn build_headers(definition: &ToolDefinition) -> ToolCallResult<HeaderMap> {
    let mut headers = HeaderMap::new();

    for header in &definition.headers {
        headers.insert(parse_header_name(&header.name)?, parse_header_value(&header.name, &header.value)?);
    }

    match &definition.authentication {
        Some(AuthSpec::Bearer { token }) => {
            let value = parse_header_value("Authorization", &format!("Bearer {token}"))?;
            headers.insert(AUTHORIZATION, value);
        }
        Some(AuthSpec::Header { name, value }) => {
            headers.insert(parse_header_name(name)?, parse_header_value(name, value)?);
        }
        None => {}
    }

    Ok(headers)
}

fn parse_header_name(name: &str) -> ToolCallResult<HeaderName> {
    HeaderName::from_bytes(name.as_bytes())
        .map_err(|_| ToolCallError::InvalidHeader(name.to_string()))
}

fn parse_header_value(name: &str, value: &str) -> ToolCallResult<HeaderValue> {
    HeaderValue::from_str(value).map_err(|_| ToolCallError::InvalidHeader(name.to_string()))
}

/// Insert schema-declared defaults for parameters the caller omitted.
fn apply_defaults(definition: &ToolDefinition, args: &mut Map<String, Value>) {
    for (name, parameter) in &definition.input_schema.properties {
        if args.contains_key(name) {
            continue;
        }
        if let Some(default) = &parameter.default {
            args.insert(name.clone(), default.clone());
        }
    }
}
