use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::server::ServerInfo;
use crate::parse::parameter::ParameterLocation;
use crate::parse::schema::Schema;

/// The compiled output: every tool sorted by name, plus the server block.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ToolSet {
    pub server: ServerInfo,
    pub tools: Vec<Tool>,
}

impl ToolSet {
    pub fn tool(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.tools.iter().map(|t| t.name.as_str())
    }
}

/// A callable action derived from one OpenAPI operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Tool {
    pub name: String,
    pub description: String,
    /// Sorted by name.
    pub args: Vec<Argument>,
    pub request_template: RequestTemplate,
    pub response_template: ResponseTemplate,
}

impl Tool {
    pub fn arg(&self, name: &str) -> Option<&Argument> {
        self.args.iter().find(|a| a.name == name)
    }
}

/// Where an argument is placed in the outgoing request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArgPosition {
    Query,
    Path,
    Header,
    Cookie,
    Body,
}

impl From<ParameterLocation> for ArgPosition {
    fn from(location: ParameterLocation) -> Self {
        match location {
            ParameterLocation::Query => ArgPosition::Query,
            ParameterLocation::Path => ArgPosition::Path,
            ParameterLocation::Header => ArgPosition::Header,
            ParameterLocation::Cookie => ArgPosition::Cookie,
        }
    }
}

/// A tool argument. `arg_type` is empty when the source schema is untyped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Argument {
    pub name: String,
    pub description: String,
    #[serde(rename = "type")]
    pub arg_type: String,
    pub required: bool,
    pub position: ArgPosition,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<ArgItems>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, ArgProperty>>,
}

/// Element hint for array-typed arguments.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArgItems {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub item_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_items: Option<u64>,

    /// Object item properties, copied as declared.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, Schema>>,
}

/// One level of an object-typed argument's shape.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ArgProperty {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub prop_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(rename = "default", default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<Value>,

    #[serde(rename = "enum", default, skip_serializing_if = "Vec::is_empty")]
    pub enum_values: Vec<Value>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<IndexMap<String, ArgProperty>>,
}

/// HTTP call shape for invoking a tool.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RequestTemplate {
    pub url: String,
    pub method: String,
    pub headers: Vec<Header>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub security: Option<SecurityRef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Header {
    pub key: String,
    pub value: String,
}

/// Names the security scheme a tool call authenticates with.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecurityRef {
    pub id: String,
}

/// Field documentation prepended before the raw response at call time.
/// Serializes as `{}` when there is no usable success response.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResponseTemplate {
    #[serde(
        rename = "prependBody",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub prepend_body: Option<String>,
}

impl ResponseTemplate {
    pub fn is_empty(&self) -> bool {
        self.prepend_body.is_none()
    }
}
