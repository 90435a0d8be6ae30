use serde::{Deserialize, Serialize};

/// Server block emitted alongside the tools.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerInfo {
    pub name: String,
    /// Sorted by `id`.
    #[serde(default)]
    pub security_schemes: Vec<SecuritySchemeInfo>,
}

/// One `components.securitySchemes` entry, keyed by its scheme name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SecuritySchemeInfo {
    pub id: String,

    #[serde(rename = "type")]
    pub scheme_type: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scheme: Option<String>,

    #[serde(rename = "in", default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}
