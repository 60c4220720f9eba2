//! Error types for authz-codegen

/// Result type for authz-codegen operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in authz-codegen operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Fs(#[from] authz_fs::Error),

    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    #[error(transparent)]
    Render(#[from] RenderError),
}

/// No template could be chosen for an output.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ResolutionError {
    #[error("No default template for {path} ({}); name one explicitly as PATH:TEMPLATE", describe_extension(.extension))]
    NoDefaultForExtension {
        path: String,
        extension: Option<String>,
    },
}

fn describe_extension(extension: &Option<String>) -> String {
    match extension {
        Some(ext) => format!("extension `.{ext}`"),
        None => "no file extension".to_string(),
    }
}

/// Rendering a template failed.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RenderError {
    #[error("Template not found: {template}")]
    TemplateNotFound { template: String },

    #[error("Syntax error in template {template}{}: {detail}", describe_line(.line))]
    TemplateSyntaxError {
        template: String,
        line: Option<usize>,
        detail: String,
    },

    #[error("Template {template} failed to render{}: {detail}", describe_line(.line))]
    Evaluation {
        template: String,
        line: Option<usize>,
        detail: String,
    },

    #[error("Template {template} does not start with the generated-code banner")]
    MissingBanner { template: String },
}

fn describe_line(line: &Option<usize>) -> String {
    line.map(|l| format!(" at line {l}")).unwrap_or_default()
}

impl RenderError {
    pub(crate) fn syntax(template: &str, err: &minijinja::Error) -> Self {
        Self::TemplateSyntaxError {
            template: template.to_string(),
            line: err.line(),
            detail: detail(err),
        }
    }

    pub(crate) fn evaluation(template: &str, err: &minijinja::Error) -> Self {
        Self::Evaluation {
            template: template.to_string(),
            line: err.line(),
            detail: detail(err),
        }
    }
}

fn detail(err: &minijinja::Error) -> String {
    match err.detail() {
        Some(detail) => format!("{}: {detail}", err.kind()),
        None => err.kind().to_string(),
    }
}
