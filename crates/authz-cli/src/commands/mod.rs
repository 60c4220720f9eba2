//! Command implementations for authz-sync
//!
//! Each submodule implements one command. Settings shared between them are
//! resolved here: command-line values win over the config file, which wins
//! over built-in defaults.

pub mod check;
pub mod render;
pub mod templates;

pub use check::run_check;
pub use render::run_render;
pub use templates::run_templates;

use std::path::Path;

use authz_codegen::TemplateRegistry;
use authz_core::{OutputSpec, SyncConfig};
use authz_fs::{NormalizedPath, RobustnessConfig};

use crate::cli::{CheckArgs, ProjectArgs};
use crate::error::Result;

/// Effective settings for one invocation.
#[derive(Debug)]
pub struct Settings {
    pub schema: NormalizedPath,
    pub registry: TemplateRegistry,
    pub outputs: Vec<OutputSpec>,
    pub auto_fix: bool,
    pub require_review: bool,
    pub colorized_diff: bool,
    pub robustness: RobustnessConfig,
}

impl Settings {
    /// Resolve the project settings, without any check flags.
    pub fn resolve(cwd: &Path, project: &ProjectArgs) -> Result<Self> {
        Self::resolve_with(cwd, project, &CheckArgs::default())
    }

    pub fn resolve_with(cwd: &Path, project: &ProjectArgs, check: &CheckArgs) -> Result<Self> {
        let (mut config, base) = load_config(cwd, project)?;

        if let Some(schema) = &project.schema {
            config.schema = Some(absolute(cwd, schema));
        }
        if let Some(dir) = &project.template_dir {
            config.template_dir = Some(absolute(cwd, dir));
        }

        let outputs = if check.outputs.is_empty() {
            config.output_specs(&base)
        } else {
            check
                .outputs
                .iter()
                .map(|spec| OutputSpec {
                    path: NormalizedPath::new(cwd).join(spec.path.as_str()),
                    template: spec.template.clone(),
                })
                .collect()
        };

        let registry = config.build_registry(&base)?;
        tracing::debug!(
            schema = %config.schema_path(&base),
            templates = registry.len(),
            outputs = outputs.len(),
            "Resolved settings"
        );

        Ok(Self {
            schema: config.schema_path(&base),
            registry,
            outputs,
            auto_fix: check.auto_fix || config.auto_fix,
            require_review: check.require_review || config.require_review,
            colorized_diff: check.colorized_diff.unwrap_or(config.colorized_diff),
            robustness: config.robustness(),
        })
    }
}

/// Load the explicit config, or `authz-sync.toml` in `cwd`, or defaults.
///
/// Returns the config and the directory its relative paths resolve against.
fn load_config(cwd: &Path, project: &ProjectArgs) -> Result<(SyncConfig, NormalizedPath)> {
    let explicit = project
        .config
        .as_ref()
        .map(|path| NormalizedPath::new(cwd.join(path)));

    let path = match explicit {
        Some(path) if !path.is_file() => {
            return Err(authz_core::Error::ConfigNotFound {
                path: path.to_native(),
            }
            .into());
        }
        Some(path) => Some(path),
        None => SyncConfig::find(&NormalizedPath::new(cwd)),
    };

    match path {
        Some(path) => {
            let config = SyncConfig::load(&path)?;
            let base = path.parent().unwrap_or_else(|| NormalizedPath::new(cwd));
            Ok((config, base))
        }
        None => Ok((SyncConfig::default(), NormalizedPath::new(cwd))),
    }
}

fn absolute(cwd: &Path, path: &Path) -> String {
    NormalizedPath::new(cwd.join(path)).as_str().to_string()
}
