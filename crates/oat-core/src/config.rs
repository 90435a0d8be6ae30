use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// Top-level project configuration loaded from `.oat.yaml`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OatConfig {
    pub input: String,
    /// Where to write the tool set. Stdout when unset.
    pub output: Option<String>,
    pub format: OutputFormat,
    pub server_name: String,
    pub pretty: bool,
}

impl Default for OatConfig {
    fn default() -> Self {
        Self {
            input: "openapi.yaml".to_string(),
            output: None,
            format: OutputFormat::Json,
            server_name: DEFAULT_SERVER_NAME.to_string(),
            pretty: true,
        }
    }
}

/// Serialization format of the compiled tool set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Json,
    Yaml,
}

/// Default config file name.
pub const CONFIG_FILE_NAME: &str = ".oat.yaml";

/// Server name used when neither the config nor the CLI sets one.
pub const DEFAULT_SERVER_NAME: &str = "openapi-server";

/// Load config from a YAML file. Returns `None` if the file doesn't exist.
pub fn load_config(path: &Path) -> Result<Option<OatConfig>, ConfigError> {
    if !path.exists() {
        return Ok(None);
    }
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.display().to_string(),
        source,
    })?;
    let config: OatConfig =
        serde_yaml_ng::from_str(&content).map_err(|source| ConfigError::Yaml {
            path: path.display().to_string(),
            source,
        })?;
    Ok(Some(config))
}

/// Generate the default config file content.
pub fn default_config_content() -> &'static str {
    r#"# oat configuration
input: openapi.yaml
# output: tools.json        # omit to write to stdout
format: json                # json | yaml
server_name: openapi-server
pretty: true
"#
}
