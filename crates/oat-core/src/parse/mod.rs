pub mod components;
pub mod deref;
pub mod media_type;
pub mod operation;
pub mod parameter;
pub mod request_body;
pub mod response;
pub mod schema;
pub mod security;
pub mod server;
pub mod spec;

use serde_json::Value;

use crate::error::ParseError;
use deref::RefResolver;
use spec::OpenApiDocument;

/// Parse an OpenAPI document from YAML.
pub fn from_yaml(input: &str) -> Result<OpenApiDocument, ParseError> {
    let value: Value = serde_yaml_ng::from_str(input)?;
    from_value(value)
}

/// Parse an OpenAPI document from JSON.
pub fn from_json(input: &str) -> Result<OpenApiDocument, ParseError> {
    let value: Value = serde_json::from_str(input)?;
    from_value(value)
}

/// Build a typed document from an untyped tree, inlining every local `$ref`
/// under `paths` first.
pub fn from_value(value: Value) -> Result<OpenApiDocument, ParseError> {
    validate_version(&value)?;
    let resolved = RefResolver::new(&value).resolve_document()?;
    let doc: OpenApiDocument = serde_json::from_value(resolved)?;
    log::debug!(
        "parsed OpenAPI {} document with {} paths",
        doc.openapi,
        doc.paths.len()
    );
    Ok(doc)
}

fn validate_version(value: &Value) -> Result<(), ParseError> {
    match value.get("openapi") {
        Some(Value::String(version)) if version.starts_with("3.") => Ok(()),
        Some(Value::String(version)) => Err(ParseError::UnsupportedVersion(version.clone())),
        Some(other) => Err(ParseError::UnsupportedVersion(other.to_string())),
        None => match value.get("swagger") {
            Some(version) => Err(ParseError::UnsupportedVersion(format!(
                "swagger {}",
                version.as_str().unwrap_or_default()
            ))),
            None => Err(ParseError::MissingField("openapi".to_string())),
        },
    }
}
