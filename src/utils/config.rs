use crate::utils::errors::{GridlySyncError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_CONFIG_FILE: &str = "gridly.toml";
pub const DEFAULT_BASE_URL: &str = "https://api.gridly.com";
pub const DEFAULT_MAX_RECORDS_PER_REQUEST: usize = 1000;
pub const DEFAULT_DELETE_BATCH_SIZE: usize = 1000;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub export: ExportOptions,
    pub delete: DeleteConfig,
    /// Engine culture code to Gridly code, merged over the built-in table.
    pub cultures: BTreeMap<String, String>,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub base_url: String,
    pub api_key: String,
    pub view_id: String,
    pub timeout_seconds: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportOptions {
    pub include_target_translations: bool,
    pub use_combined_namespace_id: bool,
    pub also_export_namespace_column: bool,
    /// `"path"` sends the namespace as the row path, anything else names a cell column.
    pub namespace_column_id: String,
    pub source_language_column_id_prefix: String,
    pub target_language_column_id_prefix: String,
    pub export_context: bool,
    pub context_column_id: String,
    pub export_metadata: bool,
    pub metadata_mapping: BTreeMap<String, MetadataColumn>,
    pub target_cultures: Vec<String>,
    pub export_max_records_per_request: usize,
    pub sync_records: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MetadataColumn {
    pub name: String,
    #[serde(default)]
    pub data_type: ColumnDataType,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ColumnDataType {
    #[default]
    String,
    Number,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DeleteConfig {
    pub max_records_per_request: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: String::new(),
            view_id: String::new(),
            timeout_seconds: 120,
        }
    }
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            include_target_translations: false,
            use_combined_namespace_id: true,
            also_export_namespace_column: true,
            namespace_column_id: "path".to_string(),
            source_language_column_id_prefix: "src_".to_string(),
            target_language_column_id_prefix: "tg_".to_string(),
            export_context: false,
            context_column_id: "context".to_string(),
            export_metadata: false,
            metadata_mapping: BTreeMap::new(),
            target_cultures: Vec::new(),
            export_max_records_per_request: DEFAULT_MAX_RECORDS_PER_REQUEST,
            sync_records: true,
        }
    }
}

impl ExportOptions {
    pub fn export_namespace(&self) -> bool {
        !self.use_combined_namespace_id || self.also_export_namespace_column
    }

    pub fn use_path_as_namespace(&self) -> bool {
        self.namespace_column_id == "path"
    }
}

impl Default for DeleteConfig {
    fn default() -> Self {
        Self {
            max_records_per_request: DEFAULT_DELETE_BATCH_SIZE,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

impl ApiConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl AppConfig {
    pub fn load_from_file(path: &str) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| GridlySyncError::ConfigError(format!("{}: {}", path, e)))?;
        toml::from_str(&content).map_err(|e| GridlySyncError::ConfigError(e.to_string()))
    }

    /// Loads `path`, or `gridly.toml` when no path is given and that file
    /// exists. Environment overrides are applied on top.
    pub fn load(path: Option<&str>) -> Result<Self> {
        let config = match path {
            Some(p) => Self::load_from_file(p)?,
            None if Path::new(DEFAULT_CONFIG_FILE).exists() => {
                Self::load_from_file(DEFAULT_CONFIG_FILE)?
            }
            None => Self::default(),
        };
        Ok(config.with_env_overrides())
    }

    /// `GRIDLY_API_KEY` and `GRIDLY_VIEW_ID` take precedence over the file.
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(key) = std::env::var("GRIDLY_API_KEY") {
            if !key.is_empty() {
                self.api.api_key = key;
            }
        }
        if let Ok(view) = std::env::var("GRIDLY_VIEW_ID") {
            if !view.is_empty() {
                self.api.view_id = view;
            }
        }
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.api.api_key.trim().is_empty() {
            return Err(GridlySyncError::ConfigError("api.api_key is not set".to_string()));
        }
        if self.api.view_id.trim().is_empty() {
            return Err(GridlySyncError::ConfigError("api.view_id is not set".to_string()));
        }
        if self.export.export_max_records_per_request == 0 {
            return Err(GridlySyncError::ConfigError(
                "export.export_max_records_per_request must be greater than zero".to_string(),
            ));
        }
        if self.delete.max_records_per_request == 0 {
            return Err(GridlySyncError::ConfigError(
                "delete.max_records_per_request must be greater than zero".to_string(),
            ));
        }
        Ok(())
    }
}
