//! Template registry: which templates exist, and which one an output uses.

use std::collections::BTreeMap;
use std::path::PathBuf;

use authz_fs::{NormalizedPath, io};

use crate::builtins;
use crate::error::{ResolutionError, Result};
use crate::output::OutputSpec;

/// Registered name of a template, e.g. `default_types.ts.jinja`.
pub type TemplateId = String;

/// File extension of loadable user templates.
pub const TEMPLATE_EXTENSION: &str = "jinja";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateOrigin {
    Builtin,
    File(PathBuf),
}

/// A registered template and its source text.
#[derive(Debug, Clone)]
pub struct TemplateSource {
    pub id: TemplateId,
    pub origin: TemplateOrigin,
    pub source: String,
}

/// Every template available for one run, plus the per-extension defaults.
///
/// Filled once at startup, then only read.
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<TemplateId, TemplateSource>,
    defaults: BTreeMap<String, TemplateId>,
}

impl TemplateRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a registry holding the built-in templates and their defaults.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for (id, source) in builtins::builtin_templates() {
            registry.register(id, TemplateOrigin::Builtin, source);
        }
        for (extension, id) in builtins::builtin_defaults() {
            registry.set_default(extension, id);
        }
        registry
    }

    /// Register a template, returning the one it replaced.
    pub fn register(
        &mut self,
        id: impl Into<TemplateId>,
        origin: TemplateOrigin,
        source: impl Into<String>,
    ) -> Option<TemplateSource> {
        let id = id.into();
        let replaced = self.templates.insert(
            id.clone(),
            TemplateSource {
                id: id.clone(),
                origin,
                source: source.into(),
            },
        );
        if let Some(previous) = &replaced {
            tracing::debug!(template = %id, previous = ?previous.origin, "Template replaced");
        }
        replaced
    }

    /// Register every `*.jinja` file in `dir` under its file name.
    ///
    /// A file named like a built-in replaces it. Returns how many templates
    /// were loaded.
    pub fn load_dir(&mut self, dir: &NormalizedPath) -> Result<usize> {
        let mut loaded = 0;
        for path in io::list_files(dir)? {
            if path.extension().as_deref() != Some(TEMPLATE_EXTENSION) {
                continue;
            }
            let Some(id) = path.file_name().map(str::to_string) else {
                continue;
            };
            let source = io::read_text(&path)?;
            let replaced = self.register(id.clone(), TemplateOrigin::File(path.to_native()), source);
            if matches!(replaced, Some(TemplateSource { origin: TemplateOrigin::Builtin, .. })) {
                tracing::warn!(template = %id, path = %path, "User template overrides built-in");
            }
            loaded += 1;
        }
        tracing::debug!(dir = %dir, loaded, "Loaded user templates");
        Ok(loaded)
    }

    /// Use `id` for outputs with `extension` (without the dot).
    pub fn set_default(&mut self, extension: &str, id: impl Into<TemplateId>) {
        self.defaults
            .insert(extension.trim_start_matches('.').to_ascii_lowercase(), id.into());
    }

    /// Pick the template for `spec`.
    ///
    /// An explicit template is returned verbatim, registered or not; rendering
    /// reports unknown ids.
    pub fn resolve(&self, spec: &OutputSpec) -> std::result::Result<TemplateId, ResolutionError> {
        if let Some(id) = &spec.template {
            return Ok(id.clone());
        }

        let extension = spec.path.extension();
        if let Some(id) = extension.as_deref().and_then(|ext| self.defaults.get(ext)) {
            return Ok(id.clone());
        }
        Err(ResolutionError::NoDefaultForExtension {
            path: spec.path.to_string(),
            extension,
        })
    }

    /// Get a template by id.
    pub fn get(&self, id: &str) -> Option<&TemplateSource> {
        self.templates.get(id)
    }

    /// Check if a template is registered.
    pub fn contains(&self, id: &str) -> bool {
        self.templates.contains_key(id)
    }

    /// Get the number of registered templates.
    pub fn len(&self) -> usize {
        self.templates.len()
    }

    /// Check if the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }

    /// All templates, sorted by id.
    pub fn list(&self) -> impl Iterator<Item = &TemplateSource> {
        self.templates.values()
    }

    /// All `(extension, template id)` defaults, sorted by extension.
    pub fn defaults(&self) -> impl Iterator<Item = (&str, &str)> {
        self.defaults.iter().map(|(ext, id)| (ext.as_str(), id.as_str()))
    }
}
