//! The templates command

use std::path::Path;

use colored::Colorize;

use authz_codegen::TemplateOrigin;

use super::Settings;
use crate::cli::ProjectArgs;
use crate::error::Result;

/// List every registered template and the default for each extension.
pub fn run_templates(cwd: &Path, project: &ProjectArgs) -> Result<()> {
    let settings = Settings::resolve(cwd, project)?;
    let registry = &settings.registry;

    println!("{} ({})", "Templates".bold(), registry.len());
    for template in registry.list() {
        let origin = match &template.origin {
            TemplateOrigin::Builtin => "built-in".to_string(),
            TemplateOrigin::File(path) => path.display().to_string(),
        };
        println!("   {} {}", template.id.cyan(), origin.dimmed());
    }

    println!();
    println!("{}", "Extension defaults".bold());
    for (extension, id) in registry.defaults() {
        let marker = if registry.contains(id) {
            String::new()
        } else {
            format!(" {}", "(not registered)".yellow())
        };
        println!("   .{:<6} {}{}", extension, id.cyan(), marker);
    }

    Ok(())
}
