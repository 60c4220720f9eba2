//! The render command

use std::path::Path;

use authz_codegen::TemplateRenderer;

use super::Settings;
use crate::cli::ProjectArgs;
use crate::error::Result;

/// Render one template against the schema and print it to stdout.
pub fn run_render(cwd: &Path, project: &ProjectArgs, template: &str) -> Result<()> {
    let settings = Settings::resolve(cwd, project)?;
    let model = authz_core::load_model(&settings.schema)?;

    let rendered = TemplateRenderer::new(&settings.registry)
        .render(&model, template)
        .map_err(authz_codegen::Error::from)?;
    print!("{rendered}");
    Ok(())
}
