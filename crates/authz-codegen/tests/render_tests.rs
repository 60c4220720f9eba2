//! Rendering the built-in and user templates.

use assert_fs::TempDir;
use assert_fs::prelude::*;
use authz_codegen::builtins::{PYTHON_TEMPLATE_ID, TYPESCRIPT_TEMPLATE_ID};
use authz_codegen::{
    BANNER_MARKER, OutputSpec, RenderError, TemplateOrigin, TemplateRegistry, TemplateRenderer,
};
use authz_fs::NormalizedPath;
use authz_schema::{SchemaModel, parse_schema};
use authz_test_utils::schemas;
use pretty_assertions::assert_eq;

fn render(schema: &str, template: &str) -> String {
    let registry = TemplateRegistry::with_builtins();
    let model = parse_schema(schema).unwrap();
    TemplateRenderer::new(&registry).render(&model, template).unwrap()
}

fn render_with(template_source: &str) -> Result<String, RenderError> {
    let mut registry = TemplateRegistry::new();
    registry.register("custom.jinja", TemplateOrigin::Builtin, template_source);
    let model = parse_schema(schemas::SCENARIO).unwrap();
    TemplateRenderer::new(&registry).render(&model, "custom.jinja")
}

#[test]
fn test_scenario_typescript() {
    let output = render(schemas::SCENARIO, TYPESCRIPT_TEMPLATE_ID);

    assert!(output.contains("export type ResourceType = \"user\" | \"org\";\n"));
    assert!(output.contains("export type UserPermission = never;\n"));
    assert!(output.contains("export type OrgPermission = \"administrate\";\n"));
    assert!(output.contains("  | { resource: \"org\"; permission: OrgPermission }\n"));
    assert_eq!(output.matches("\"administrate\"").count(), 1);
    assert!(output.contains("export type ResourceId = string | number;"));
}

#[test]
fn test_scenario_python() {
    let output = render(schemas::SCENARIO, PYTHON_TEMPLATE_ID);

    assert!(output.contains("ResourceType = Literal[\n    \"user\",\n    \"org\",\n]\n"));
    assert!(output.contains("UserPermission = NoReturn\n"));
    assert!(output.contains("OrgPermission = Literal[\"administrate\"]\n"));
    assert!(output.contains("OrgRelation = Literal[\"admin\"]\n"));
    assert!(output.contains("    \"admin\": (\"user\",),\n"));
    assert!(output.contains("ResourceId = int | str\n"));
    assert!(output.contains(
        "class Org(Resource[OrgPermission]):\n    permission_type = OrgPermission\n"
    ));
    assert!(output.contains("        super().__init__(id, \"org\")\n"));
}

#[test]
fn test_request_builders_carry_subject_relation_and_context() {
    let python = render(schemas::ORGANIZATION, PYTHON_TEMPLATE_ID);
    assert!(python.contains("Context = dict[str, Any] | None\n"));
    assert!(python.contains("    action: str\n"));
    assert!(python.contains("    subject_relation: str | None = None\n    context: Context = None\n"));
    assert!(python.contains(
        "self, subject: Resource[Any], *, subject_relation: str | None = None"
    ));
    assert!(python.contains("def can(self, permission: P, context: Context = None) -> CheckRequest:"));
    assert!(python.contains("            subject_relation=self._subject_relation,\n"));

    let typescript = render(schemas::ORGANIZATION, TYPESCRIPT_TEMPLATE_ID);
    assert!(typescript.contains("  subjectRelation?: string;\n  context?: CheckContext;\n"));
    assert!(typescript.contains("checkThat(subject: Resource, options: CheckThatOptions = {})"));
    assert!(typescript.contains(
        "can(permission: PermissionFor<T>, context?: CheckContext): CheckRequest<T>"
    ));
}

#[test]
fn test_outputs_start_with_banner() {
    for template in [PYTHON_TEMPLATE_ID, TYPESCRIPT_TEMPLATE_ID] {
        let output = render(schemas::SCENARIO, template);
        let first_line = output.lines().next().unwrap();
        assert!(first_line.ends_with(BANNER_MARKER), "{template}: {first_line}");
        assert!(output.ends_with('\n'));
    }
}

#[test]
fn test_union_subjects_rendered() {
    let ts = render(schemas::ORGANIZATION, TYPESCRIPT_TEMPLATE_ID);
    assert!(ts.contains("    \"member\": [\"user\", \"group#member\"],\n"));

    let py = render(schemas::ORGANIZATION, PYTHON_TEMPLATE_ID);
    assert!(py.contains("    \"member\": (\"user\", \"group#member\"),\n"));
    assert!(py.contains("class TableView(Resource[TableViewPermission]):"));
    assert!(py.contains("super().__init__(id, \"table_view\")"));
}

#[test]
fn test_order_follows_declaration() {
    let ts = render(schemas::ORGANIZATION, TYPESCRIPT_TEMPLATE_ID);
    let positions: Vec<usize> = ["UserPermission =", "GroupPermission =", "OrganizationPermission =", "TableViewPermission ="]
        .iter()
        .map(|needle| ts.find(needle).unwrap())
        .collect();
    assert!(positions.windows(2).all(|w| w[0] < w[1]));
    assert!(ts.contains("export type TableViewPermission = \"view\" | \"edit\";\n"));
}

#[test]
fn test_empty_model_renders_valid_placeholders() {
    let registry = TemplateRegistry::with_builtins();
    let renderer = TemplateRenderer::new(&registry);
    let model = SchemaModel::default();

    let ts = renderer.render(&model, TYPESCRIPT_TEMPLATE_ID).unwrap();
    assert!(ts.contains("export type ResourceType = never;\n"));
    assert!(ts.contains("export type ResourcePermission = never;\n"));

    let py = renderer.render(&model, PYTHON_TEMPLATE_ID).unwrap();
    assert!(py.contains("ResourceType = NoReturn\n"));
}

#[test]
fn test_rendering_is_deterministic() {
    for template in [PYTHON_TEMPLATE_ID, TYPESCRIPT_TEMPLATE_ID] {
        assert_eq!(
            render(schemas::ORGANIZATION, template),
            render(schemas::ORGANIZATION, template)
        );
    }
}

#[test]
fn test_template_not_found() {
    let registry = TemplateRegistry::with_builtins();
    let model = parse_schema(schemas::SCENARIO).unwrap();
    let err = TemplateRenderer::new(&registry)
        .render(&model, "missing.jinja")
        .unwrap_err();
    assert_eq!(
        err,
        RenderError::TemplateNotFound {
            template: "missing.jinja".to_string()
        }
    );
}

#[test]
fn test_template_syntax_error() {
    let err = render_with("// {{ banner[0] }}\n{% for t in resource_types %}\n{{ t.name }}\n").unwrap_err();
    match err {
        RenderError::TemplateSyntaxError { template, .. } => assert_eq!(template, "custom.jinja"),
        other => panic!("expected syntax error, got {other:?}"),
    }
}

#[test]
fn test_undefined_variable_is_an_error() {
    let err = render_with("// {{ banner[0] }}\n{{ schema_version }}\n").unwrap_err();
    assert!(matches!(err, RenderError::Evaluation { .. }), "{err:?}");
}

#[test]
fn test_missing_banner_rejected() {
    let err = render_with("export {};\n").unwrap_err();
    assert_eq!(
        err,
        RenderError::MissingBanner {
            template: "custom.jinja".to_string()
        }
    );
}

#[test]
fn test_case_filters_available() {
    let output = render_with(
        "// {{ banner[0] }}\n{% for t in resource_types %}{{ t.name | screaming_snake_case }}:{{ t.name | kebab_case }} {% endfor %}\n",
    )
    .unwrap();
    assert!(output.contains("USER:user ORG:org "));
}

#[test]
fn test_user_templates_override_builtins() {
    let dir = TempDir::new().unwrap();
    dir.child("default_types.ts.jinja")
        .write_str("// {{ banner[0] }}\n// custom\n")
        .unwrap();
    dir.child("extra.py.jinja")
        .write_str("# {{ banner[0] }}\n")
        .unwrap();
    dir.child("README.md").write_str("not a template").unwrap();

    let mut registry = TemplateRegistry::with_builtins();
    let loaded = registry.load_dir(&NormalizedPath::new(dir.path())).unwrap();
    assert_eq!(loaded, 2);
    assert!(registry.contains("extra.py.jinja"));
    assert!(!registry.contains("README.md"));
    assert!(matches!(
        registry.get(TYPESCRIPT_TEMPLATE_ID).unwrap().origin,
        TemplateOrigin::File(_)
    ));

    let template = registry
        .resolve(&OutputSpec::new("types.ts"))
        .unwrap();
    let model = parse_schema(schemas::SCENARIO).unwrap();
    let output = TemplateRenderer::new(&registry).render(&model, &template).unwrap();
    assert_eq!(output, format!("// {BANNER_MARKER}\n// custom\n"));
}

#[test]
fn test_load_dir_missing_directory_fails() {
    let dir = TempDir::new().unwrap();
    let mut registry = TemplateRegistry::new();
    let err = registry
        .load_dir(&NormalizedPath::new(dir.path().join("nope")))
        .unwrap_err();
    assert!(err.to_string().contains("nope"));
}
