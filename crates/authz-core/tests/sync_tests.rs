//! End-to-end synchronization runs against temporary projects.

use authz_codegen::builtins::TYPESCRIPT_TEMPLATE_ID;
use authz_codegen::{OutputSpec, TemplateRegistry, TemplateRenderer};
use authz_core::{
    Error, OutputError, SyncEngine, SyncOptions, SyncReport, SyncVerdict, load_model,
};
use authz_fs::NormalizedPath;
use authz_fs::checksum::compute_content_checksum;
use authz_git::TrackingState;
use authz_test_utils::git::{real_git_repo, track_file};
use authz_test_utils::project::TestProject;
use authz_test_utils::schemas;
use pretty_assertions::assert_eq;

fn spec(project: &TestProject, relative: &str) -> OutputSpec {
    relative_spec(project, relative, None)
}

fn relative_spec(project: &TestProject, relative: &str, template: Option<&str>) -> OutputSpec {
    OutputSpec {
        path: NormalizedPath::new(project.path(relative)),
        template: template.map(str::to_string),
    }
}

fn run(project: &TestProject, specs: &[OutputSpec], options: SyncOptions) -> SyncReport {
    let model = load_model(&NormalizedPath::new(project.path("schema.zed"))).unwrap();
    let registry = TemplateRegistry::with_builtins();
    SyncEngine::new(&model, &registry, options)
        .with_git_discovery(project.root())
        .run(specs)
}

fn expected_typescript(schema: &str) -> String {
    let model = authz_schema::parse_schema(schema).unwrap();
    let registry = TemplateRegistry::with_builtins();
    TemplateRenderer::new(&registry)
        .render(&model, TYPESCRIPT_TEMPLATE_ID)
        .unwrap()
}

fn auto_fix() -> SyncOptions {
    SyncOptions {
        auto_fix: true,
        ..Default::default()
    }
}

#[test]
fn test_missing_output_without_fix() {
    let project = TestProject::with_schema(schemas::SCENARIO);
    let report = run(&project, &[spec(&project, "gen/types.ts")], SyncOptions::default());

    assert!(!report.is_success());
    assert_eq!(report.outputs[0].verdict(), Some(SyncVerdict::Missing));
    project.assert_file_not_exists("gen/types.ts");
}

#[test]
fn test_created_output_still_fails_then_passes() {
    let project = TestProject::with_schema(schemas::SCENARIO);
    let specs = [spec(&project, "gen/types.ts")];

    let first = run(&project, &specs, auto_fix());
    assert!(!first.is_success());
    let evaluation = first.outputs[0].result.as_ref().unwrap();
    assert_eq!(evaluation.verdict, SyncVerdict::Created);
    assert!(evaluation.fixed);
    assert_eq!(project.read("gen/types.ts"), expected_typescript(schemas::SCENARIO));

    let second = run(&project, &specs, auto_fix());
    assert!(second.is_success());
    assert_eq!(second.outputs[0].verdict(), Some(SyncVerdict::InSync));
}

#[test]
fn test_auto_fix_is_idempotent() {
    let project = TestProject::with_schema(schemas::ORGANIZATION);
    project.write("types.ts", "stale\n");
    let specs = [spec(&project, "types.ts")];

    let first = run(&project, &specs, auto_fix());
    assert_eq!(first.outputs[0].verdict(), Some(SyncVerdict::OutOfSync));
    let after_fix = project.read("types.ts");
    let modified = project.modified("types.ts");

    let second = run(&project, &specs, auto_fix());
    let evaluation = second.outputs[0].result.as_ref().unwrap();
    assert_eq!(evaluation.verdict, SyncVerdict::InSync);
    assert!(!evaluation.fixed);
    assert_eq!(project.read("types.ts"), after_fix);
    assert_eq!(project.modified("types.ts"), modified);
}

#[test]
fn test_out_of_sync_without_fix_reports_diff() {
    let project = TestProject::with_schema(schemas::SCENARIO);
    project.write("types.ts", "stale\n");
    let output = spec(&project, "types.ts");

    let report = run(&project, std::slice::from_ref(&output), SyncOptions::default());
    assert!(!report.is_success());

    let evaluation = report.outputs[0].result.as_ref().unwrap();
    assert_eq!(evaluation.verdict, SyncVerdict::OutOfSync);
    assert!(!evaluation.fixed);
    let diff = evaluation.diff.as_deref().unwrap();
    assert!(diff.starts_with(&format!(
        "--- {}\n+++ {} (generated)\n",
        output.path, output.path
    )));
    assert!(diff.contains("-stale\n"));
    let stats = evaluation.diff_stats.unwrap();
    assert_eq!(stats.deletions, 1);
    assert_eq!(
        stats.insertions,
        expected_typescript(schemas::SCENARIO).lines().count()
    );
    assert_eq!(project.read("types.ts"), "stale\n");
}

#[test]
fn test_out_of_sync_fixed_passes() {
    let project = TestProject::with_schema(schemas::SCENARIO);
    project.write("types.ts", "stale\n");

    let report = run(&project, &[spec(&project, "types.ts")], auto_fix());
    assert!(report.is_success());
    let evaluation = report.outputs[0].result.as_ref().unwrap();
    assert!(evaluation.fixed);
    assert!(evaluation.passed);
    assert_eq!(project.read("types.ts"), expected_typescript(schemas::SCENARIO));
}

#[test]
fn test_require_review_fails_fixed_output() {
    let project = TestProject::with_schema(schemas::SCENARIO);
    project.write("types.ts", "stale\n");
    let options = SyncOptions {
        auto_fix: true,
        require_review: true,
        ..Default::default()
    };

    let report = run(&project, &[spec(&project, "types.ts")], options);
    assert!(!report.is_success());
    let evaluation = report.outputs[0].result.as_ref().unwrap();
    assert!(evaluation.fixed);
    assert!(!evaluation.passed);
    assert_eq!(project.read("types.ts"), expected_typescript(schemas::SCENARIO));
}

#[test]
fn test_failures_are_isolated_per_output() {
    let project = TestProject::with_schema(schemas::SCENARIO);
    project.write("ok.ts", &expected_typescript(schemas::SCENARIO));
    project.write("blocker", "a file, not a directory");

    let specs = [
        spec(&project, "types.go"),
        relative_spec(&project, "custom.ts", Some("nope.jinja")),
        spec(&project, "blocker/out.ts"),
        spec(&project, "ok.ts"),
        spec(&project, "new.py"),
    ];
    let report = run(&project, &specs, auto_fix());

    assert_eq!(report.outputs.len(), 5);
    assert!(matches!(
        report.outputs[0].result,
        Err(OutputError::Resolution(_))
    ));
    assert_eq!(report.outputs[0].template, None);
    assert!(matches!(report.outputs[1].result, Err(OutputError::Render(_))));
    assert_eq!(report.outputs[1].template.as_deref(), Some("nope.jinja"));
    assert!(matches!(report.outputs[2].result, Err(OutputError::Sync(_))));
    assert_eq!(report.outputs[3].verdict(), Some(SyncVerdict::InSync));
    assert_eq!(report.outputs[4].verdict(), Some(SyncVerdict::Created));

    assert!(!report.is_success());
    assert_eq!(report.error_count(), 3);
    assert_eq!(report.failures().count(), 4);
    project.assert_file_exists("new.py");
}

#[test]
fn test_rendered_checksum_matches_written_content() {
    let project = TestProject::with_schema(schemas::SCENARIO);
    let report = run(&project, &[spec(&project, "types.py")], auto_fix());

    let evaluation = report.outputs[0].result.as_ref().unwrap();
    assert_eq!(
        evaluation.rendered_checksum,
        compute_content_checksum(&project.read("types.py"))
    );
}

#[test]
fn test_tracking_state_without_repository() {
    let project = TestProject::with_schema(schemas::SCENARIO);
    let report = run(&project, &[spec(&project, "types.ts")], auto_fix());
    assert_eq!(
        report.outputs[0].result.as_ref().unwrap().tracking,
        TrackingState::NoRepository
    );
}

#[test]
fn test_tracking_state_in_repository() {
    let project = TestProject::with_schema(schemas::SCENARIO);
    let repo = real_git_repo(project.root());
    let specs = [spec(&project, "types.ts")];

    let missing = run(&project, &specs, SyncOptions::default());
    let evaluation = missing.outputs[0].result.as_ref().unwrap();
    assert_eq!(evaluation.verdict, SyncVerdict::Missing);
    assert_eq!(evaluation.tracking, TrackingState::Absent);

    let created = run(&project, &specs, auto_fix());
    assert_eq!(
        created.outputs[0].result.as_ref().unwrap().tracking,
        TrackingState::Untracked
    );

    track_file(&repo, "types.ts");
    let checked = run(&project, &specs, SyncOptions::default());
    let evaluation = checked.outputs[0].result.as_ref().unwrap();
    assert_eq!(evaluation.verdict, SyncVerdict::InSync);
    assert_eq!(evaluation.tracking, TrackingState::Tracked);
}

#[test]
fn test_every_output_renders_from_one_model() {
    let project = TestProject::with_schema(schemas::ORGANIZATION);
    let specs = [spec(&project, "a/types.ts"), spec(&project, "b/types.py")];
    let report = run(&project, &specs, auto_fix());

    assert_eq!(report.count(SyncVerdict::Created), 2);
    project.assert_file_contains("a/types.ts", "\"table_view\"");
    project.assert_file_contains("b/types.py", "class TableView(Resource[TableViewPermission]):");
}

#[test]
fn test_load_model_missing_schema() {
    let project = TestProject::new();
    let err = load_model(&NormalizedPath::new(project.path("schema.zed"))).unwrap_err();
    assert!(matches!(err, Error::SchemaNotFound { .. }));
}

#[test]
fn test_load_model_reports_file_and_position() {
    let project = TestProject::with_schema("definition user {\n    relation owner user\n}\n");
    let err = load_model(&NormalizedPath::new(project.path("schema.zed"))).unwrap_err();
    let message = err.to_string();
    assert!(matches!(err, Error::Schema { .. }));
    assert!(message.contains("schema.zed"));
    assert!(message.contains("line 2, column 20"));
}
