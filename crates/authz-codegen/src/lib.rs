//! Template registry and renderer for authz-schema-sync
//!
//! A [`TemplateRegistry`] is built once per run from the built-in templates
//! plus any user templates, then resolves each [`OutputSpec`] to a template
//! id. [`TemplateRenderer`] turns a [`SchemaModel`](authz_schema::SchemaModel)
//! and a template id into output text.

pub mod builtins;
pub mod error;
pub mod naming;
pub mod output;
pub mod registry;
pub mod renderer;

pub use builtins::{BANNER, BANNER_MARKER};
pub use error::{Error, RenderError, ResolutionError, Result};
pub use output::OutputSpec;
pub use registry::{TemplateId, TemplateOrigin, TemplateRegistry, TemplateSource};
pub use renderer::TemplateRenderer;
