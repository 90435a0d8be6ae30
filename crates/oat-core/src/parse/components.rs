use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::security::SecurityScheme;

/// Reusable definitions. Only security schemes are read after dereferencing;
/// everything else has already been inlined into `paths`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Components {
    #[serde(
        rename = "securitySchemes",
        default,
        skip_serializing_if = "IndexMap::is_empty"
    )]
    pub security_schemes: IndexMap<String, SecurityScheme>,
}
