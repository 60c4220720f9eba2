//! Templates shipped with the tool.

/// First banner line; its presence is checked on every render.
pub const BANNER_MARKER: &str = "GENERATED CODE - DO NOT EDIT MANUALLY";

/// Lines every built-in template writes at the top of its output.
pub const BANNER: &[&str] = &[
    BANNER_MARKER,
    "Regenerate from the authorization schema with `authz-sync --auto-fix`.",
];

/// How many leading lines of rendered output may hold the banner.
pub const BANNER_SEARCH_LINES: usize = 5;

pub const PYTHON_TEMPLATE_ID: &str = "default_types.py.jinja";
pub const TYPESCRIPT_TEMPLATE_ID: &str = "default_types.ts.jinja";

/// `(id, source)` of every built-in template.
pub fn builtin_templates() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            PYTHON_TEMPLATE_ID,
            include_str!("../templates/default_types.py.jinja"),
        ),
        (
            TYPESCRIPT_TEMPLATE_ID,
            include_str!("../templates/default_types.ts.jinja"),
        ),
    ]
}

/// `(extension, template id)` defaults used when an output names no template.
pub fn builtin_defaults() -> Vec<(&'static str, &'static str)> {
    vec![
        ("py", PYTHON_TEMPLATE_ID),
        ("pyi", PYTHON_TEMPLATE_ID),
        ("ts", TYPESCRIPT_TEMPLATE_ID),
        ("mts", TYPESCRIPT_TEMPLATE_ID),
        ("cts", TYPESCRIPT_TEMPLATE_ID),
    ]
}
