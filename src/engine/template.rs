//! URL template expansion
//!
//! Tool URLs are written with simple `{var}` expressions
//! (`https://api.example.com/search?q={query}`). Expansion substitutes the
//! caller's argument values, percent-encoding each value when the request
//! carries no body (GET and friends) and substituting raw when the method
//! is body-bearing, since those values travel in the JSON body as well.
//!
//! Template syntax errors and references to variables the argument set
//! does not contain both fail the call before any network activity.

use serde_json::{Map, Value};
use thiserror::Error;

use crate::engine::mapping::display_value;

/// Template parse or expansion failure.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TemplateError {
    #[error("unclosed '{{' at offset {0}")]
    UnclosedExpression(usize),
    #[error("unexpected '}}' at offset {0}")]
    UnexpectedClose(usize),
    #[error("empty variable expression at offset {0}")]
    EmptyExpression(usize),
    #[error("invalid variable name '{0}'")]
    InvalidVariable(String),
    #[error("no value for template variable '{0}'")]
    MissingVariable(String),
}

#[derive(Debug, Clone, PartialEq)]
enum Part {
    Literal(String),
    Variable(String),
}

/// A parsed URL template.
#[derive(Debug, Clone, PartialEq)]
pub struct UrlTemplate {
    parts: Vec<Part>,
}

impl UrlTemplate {
    /// Parse a template string into literal and variable parts.
    pub fn parse(template: &str) -> Result<Self, TemplateError> {
        let mut parts = Vec::new();
        let mut literal = String::new();
        let mut chars = template.char_indices();

        while let Some((offset, ch)) = chars.next() {
            match ch {
                '{' => {
                    if !literal.is_empty() {
                        parts.push(Part::Literal(std::mem::take(&mut literal)));
                    }
                    let mut name = String::new();
                    let mut closed = false;
                    for (_, inner) in chars.by_ref() {
                        if inner == '}' {
                            closed = true;
                            break;
                        }
                        name.push(inner);
                    }
                    if !closed {
                        return Err(TemplateError::UnclosedExpression(offset));
                    }
                    if name.is_empty() {
                        return Err(TemplateError::EmptyExpression(offset));
                    }
                    if !name
                        .chars()
                        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '.')
                    {
                        return Err(TemplateError::InvalidVariable(name));
                    }
                    parts.push(Part::Variable(name));
                }
                '}' => return Err(TemplateError::UnexpectedClose(offset)),
                _ => literal.push(ch),
            }
        }

        if !literal.is_empty() {
            parts.push(Part::Literal(literal));
        }
        Ok(Self { parts })
    }

    /// Substitute argument values into the template.
    ///
    /// Arguments the template never references are fine; a referenced
    /// variable with no value is a [`TemplateError::MissingVariable`].
    pub fn expand(
        &self,
        args: &Map<String, Value>,
        encode_values: bool,
    ) -> Result<String, TemplateError> {
        let mut result = String::new();
        for part in &self.parts {
            match part {
                Part::Literal(text) => result.push_str(text),
                Part::Variable(name) => {
                    let value = args
                        .get(name)
                        .ok_or_else(|| TemplateError::MissingVariable(name.clone()))?;
                    let rendered = display_value(value);
                    if encode_values {
                        result.push_str(&urlencoding::encode(&rendered));
                    } else {
                        result.push_str(&rendered);
                    }
                }
            }
        }
        Ok(result)
    }
}

/// Expand `template` with `args`, choosing the encoding policy from the
/// HTTP method: body-bearing methods substitute raw values, everything
/// else percent-encodes them as query-string components.
pub fn expand(
    template: &str,
    args: &Map<String, Value>,
    method: &str,
) -> Result<String, TemplateError> {
    let body_bearing = matches!(method.to_uppercase().as_str(), "POST" | "PUT");
    UrlTemplate::parse(template)?.expand(args, !body_bearing)
}
