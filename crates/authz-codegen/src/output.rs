//! Output specifications.

use std::fmt;
use std::str::FromStr;

use authz_fs::NormalizedPath;

use crate::registry::{TEMPLATE_EXTENSION, TemplateId};

/// One generated file to keep in sync, and optionally the template for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSpec {
    pub path: NormalizedPath,
    pub template: Option<TemplateId>,
}

impl OutputSpec {
    pub fn new(path: impl Into<NormalizedPath>) -> Self {
        Self {
            path: path.into(),
            template: None,
        }
    }

    pub fn with_template(mut self, template: impl Into<TemplateId>) -> Self {
        self.template = Some(template.into());
        self
    }
}

/// Parses `PATH` or `PATH:TEMPLATE`.
///
/// The split happens at the last `:` only when what follows it is a plain
/// `*.jinja` file name, so `C:\out\types.py` and `gen/a:b.ts` stay paths.
impl FromStr for OutputSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err("output path must not be empty".to_string());
        }

        if let Some((path, template)) = s.rsplit_once(':')
            && !path.is_empty()
            && !template.is_empty()
            && !template.contains(['/', '\\'])
            && NormalizedPath::new(template).extension().as_deref() == Some(TEMPLATE_EXTENSION)
        {
            return Ok(Self::new(path).with_template(template));
        }
        Ok(Self::new(s))
    }
}

impl fmt::Display for OutputSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.template {
            Some(template) => write!(f, "{}:{template}", self.path),
            None => write!(f, "{}", self.path),
        }
    }
}
