//! Model + template id → output text.

use minijinja::{Environment, UndefinedBehavior, context};

use authz_schema::SchemaModel;

use crate::builtins::{BANNER, BANNER_MARKER, BANNER_SEARCH_LINES};
use crate::error::RenderError;
use crate::naming;
use crate::registry::TemplateRegistry;

/// Renders templates from a [`TemplateRegistry`].
///
/// Each render compiles only the requested template in a fresh environment,
/// so a broken template affects only the outputs that use it. Templates see
/// the model, the banner lines and the case filters in [`naming`]. Output
/// depends on nothing else.
pub struct TemplateRenderer<'r> {
    registry: &'r TemplateRegistry,
}

impl<'r> TemplateRenderer<'r> {
    pub fn new(registry: &'r TemplateRegistry) -> Self {
        Self { registry }
    }

    pub fn render(&self, model: &SchemaModel, template_id: &str) -> Result<String, RenderError> {
        let template = self
            .registry
            .get(template_id)
            .ok_or_else(|| RenderError::TemplateNotFound {
                template: template_id.to_string(),
            })?;

        let mut env = environment();
        env.add_template(&template.id, &template.source)
            .map_err(|e| RenderError::syntax(template_id, &e))?;
        let compiled = env
            .get_template(&template.id)
            .map_err(|e| RenderError::syntax(template_id, &e))?;

        let rendered = compiled
            .render(context! {
                resource_types => &model.resource_types,
                banner => BANNER,
            })
            .map_err(|e| RenderError::evaluation(template_id, &e))?;

        if !has_banner(&rendered) {
            return Err(RenderError::MissingBanner {
                template: template_id.to_string(),
            });
        }

        tracing::debug!(template = template_id, bytes = rendered.len(), "Rendered template");
        Ok(rendered)
    }
}

fn environment<'s>() -> Environment<'s> {
    let mut env = Environment::new();
    env.set_trim_blocks(true);
    env.set_lstrip_blocks(true);
    env.set_keep_trailing_newline(true);
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    naming::register_filters(&mut env);
    env
}

fn has_banner(rendered: &str) -> bool {
    rendered
        .lines()
        .take(BANNER_SEARCH_LINES)
        .any(|line| line.contains(BANNER_MARKER))
}
