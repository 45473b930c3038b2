use crate::error::{AuditError, Result};
use crate::model::{OptionSet, PageTemplate};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";

/// Environment variable that overrides the configuration directory.
pub const CONFIG_DIR_ENV: &str = "AUDITDOC_CONFIG_DIR";

/// Configuration for auditdoc, stored in `<config dir>/config.json`
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct AuditdocConfig {
    /// Header, meta fields, colors and columns used for new documents
    #[serde(default)]
    pub template: PageTemplate,

    /// Which responses a question accepts
    #[serde(default)]
    pub option_set: OptionSet,
}

impl AuditdocConfig {
    /// Load config from the given directory, or return defaults if not found
    pub fn load<P: AsRef<Path>>(config_dir: P) -> Result<Self> {
        let config_path = config_dir.as_ref().join(CONFIG_FILENAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(&config_path).map_err(AuditError::Io)?;
        let config: AuditdocConfig =
            serde_json::from_str(&content).map_err(AuditError::Serialization)?;
        Ok(config)
    }

    /// Save config to the given directory
    pub fn save<P: AsRef<Path>>(&self, config_dir: P) -> Result<()> {
        let config_dir = config_dir.as_ref();

        if !config_dir.exists() {
            fs::create_dir_all(config_dir).map_err(AuditError::Io)?;
        }

        let config_path = config_dir.join(CONFIG_FILENAME);
        let content = serde_json::to_string_pretty(self).map_err(AuditError::Serialization)?;
        fs::write(config_path, content).map_err(AuditError::Io)?;
        Ok(())
    }
}

/// Resolve the configuration directory: explicit path, then
/// [`CONFIG_DIR_ENV`], then the platform config dir.
pub fn config_dir(explicit: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = explicit {
        return Ok(dir.to_path_buf());
    }
    if let Some(dir) = std::env::var_os(CONFIG_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "auditdoc", "auditdoc")
        .map(|dirs| dirs.config_dir().to_path_buf())
        .ok_or_else(|| AuditError::Config("Could not determine config dir".into()))
}
