//! Project configuration (`authz-sync.toml`).
//!
//! Relative paths in a config file are resolved against the directory that
//! holds the file.

use std::collections::BTreeMap;
use std::time::Duration;

use serde::Deserialize;

use authz_codegen::{OutputSpec, TemplateRegistry};
use authz_fs::{ConfigStore, NormalizedPath, RobustnessConfig};

use crate::Result;

/// File looked up in the working directory when no config is given.
pub const CONFIG_FILE_NAME: &str = "authz-sync.toml";

/// Schema path used when neither the config nor the command line names one.
pub const DEFAULT_SCHEMA: &str = "schema.zed";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SyncConfig {
    pub schema: Option<String>,
    pub template_dir: Option<String>,
    pub auto_fix: bool,
    pub require_review: bool,
    pub colorized_diff: bool,
    /// How long an auto-fix write waits for the output's lock.
    pub lock_timeout_ms: u64,
    /// Flush auto-fix writes to disk before replacing the output.
    pub fsync: bool,
    pub outputs: Vec<OutputEntry>,
    /// Extension (without dot) → template id.
    pub template_defaults: BTreeMap<String, String>,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            schema: None,
            template_dir: None,
            auto_fix: false,
            require_review: false,
            colorized_diff: true,
            lock_timeout_ms: 2000,
            fsync: true,
            outputs: Vec::new(),
            template_defaults: BTreeMap::new(),
        }
    }
}

/// One `[[outputs]]` table.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputEntry {
    pub path: String,
    #[serde(default)]
    pub template: Option<String>,
}

impl SyncConfig {
    /// Load a config file; the format follows the extension.
    pub fn load(path: &NormalizedPath) -> Result<Self> {
        let config: Self = ConfigStore::new().load(path)?;
        tracing::debug!(config = %path, outputs = config.outputs.len(), "Loaded configuration");
        Ok(config)
    }

    /// `dir/authz-sync.toml`, if it exists.
    pub fn find(dir: &NormalizedPath) -> Option<NormalizedPath> {
        let candidate = dir.join(CONFIG_FILE_NAME);
        candidate.is_file().then_some(candidate)
    }

    pub fn schema_path(&self, base: &NormalizedPath) -> NormalizedPath {
        base.join(self.schema.as_deref().unwrap_or(DEFAULT_SCHEMA))
    }

    pub fn template_dir(&self, base: &NormalizedPath) -> Option<NormalizedPath> {
        self.template_dir.as_deref().map(|dir| base.join(dir))
    }

    pub fn output_specs(&self, base: &NormalizedPath) -> Vec<OutputSpec> {
        self.outputs
            .iter()
            .map(|entry| OutputSpec {
                path: base.join(&entry.path),
                template: entry.template.clone(),
            })
            .collect()
    }

    pub fn robustness(&self) -> RobustnessConfig {
        RobustnessConfig {
            lock_timeout: Duration::from_millis(self.lock_timeout_ms),
            fsync: self.fsync,
        }
    }

    /// Built-ins, then `template_dir`, then the extension defaults.
    pub fn build_registry(&self, base: &NormalizedPath) -> Result<TemplateRegistry> {
        let mut registry = TemplateRegistry::with_builtins();
        if let Some(dir) = self.template_dir(base) {
            registry.load_dir(&dir)?;
        }
        for (extension, template) in &self.template_defaults {
            if !registry.contains(template) {
                tracing::warn!(extension = %extension, template = %template, "Default template is not registered");
            }
            registry.set_default(extension, template.clone());
        }
        Ok(registry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_empty() {
        let config: SyncConfig = toml::from_str("").unwrap();
        assert_eq!(config, SyncConfig::default());
        assert!(config.colorized_diff);
        assert_eq!(config.robustness(), RobustnessConfig::default());
        assert_eq!(
            config.schema_path(&NormalizedPath::new("proj")).as_str(),
            "proj/schema.zed"
        );
    }
}
