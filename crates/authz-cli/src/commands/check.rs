//! The check command (the default)

use std::path::Path;

use colored::Colorize;
use serde_json::json;

use authz_core::{OutputReport, SyncEngine, SyncOptions, SyncReport, SyncVerdict};
use authz_fs::NormalizedPath;
use authz_git::TrackingState;

use super::Settings;
use crate::cli::{CheckArgs, ProjectArgs};
use crate::error::Result;

/// Run the check command.
///
/// Returns whether every output passed.
pub fn run_check(cwd: &Path, project: &ProjectArgs, args: &CheckArgs) -> Result<bool> {
    let settings = Settings::resolve_with(cwd, project, args)?;
    if settings.outputs.is_empty() {
        return Err(authz_core::Error::NoOutputs.into());
    }

    let model = authz_core::load_model(&settings.schema)?;
    let options = SyncOptions {
        auto_fix: settings.auto_fix,
        require_review: settings.require_review,
        robustness: settings.robustness,
    };
    let engine = SyncEngine::new(&model, &settings.registry, options).with_git_discovery(cwd);
    let report = engine.run(&settings.outputs);

    if args.json {
        print_json(cwd, &settings, &report)?;
    } else {
        print_human(cwd, &settings, &report);
    }

    Ok(report.is_success())
}

fn print_human(cwd: &Path, settings: &Settings, report: &SyncReport) {
    println!(
        "{} Checking {} output(s) against {}",
        "=>".blue().bold(),
        report.outputs.len(),
        display_path(cwd, &settings.schema).cyan()
    );

    for output in &report.outputs {
        print_output(cwd, settings, output);
    }

    println!();
    let summary = format!(
        "{} in sync, {} out of sync, {} missing, {} created, {} error(s)",
        report.count(SyncVerdict::InSync),
        report.count(SyncVerdict::OutOfSync),
        report.count(SyncVerdict::Missing),
        report.count(SyncVerdict::Created),
        report.error_count(),
    );
    if report.is_success() {
        println!("{} {}", "OK".green().bold(), summary);
    } else {
        println!("{} {}", "FAILED".red().bold(), summary);
    }
}

fn print_output(cwd: &Path, settings: &Settings, output: &OutputReport) {
    let path = display_path(cwd, &output.path);
    let template = output.template.as_deref().unwrap_or("-");

    let evaluation = match &output.result {
        Ok(evaluation) => evaluation,
        Err(e) => {
            println!("{} {}: {}", "ERROR".red().bold(), path.cyan(), e);
            return;
        }
    };

    match evaluation.verdict {
        SyncVerdict::InSync => {
            println!("{} {} ({})", "OK".green().bold(), path.cyan(), template.dimmed());
        }
        SyncVerdict::Missing => {
            println!("{} {} ({})", "MISSING".yellow().bold(), path.cyan(), template.dimmed());
            if evaluation.tracking == TrackingState::Tracked {
                println!("   The file is tracked by git but was deleted from disk.");
            }
            println!("   Run with {} to create it.", "--auto-fix".cyan());
        }
        SyncVerdict::Created => {
            println!("{} {} ({})", "CREATED".yellow().bold(), path.cyan(), template.dimmed());
            println!("   {}", review_hint(evaluation.tracking));
        }
        SyncVerdict::OutOfSync => {
            let label = if evaluation.fixed {
                "FIXED".yellow().bold()
            } else {
                "OUT OF SYNC".red().bold()
            };
            match evaluation.diff_stats {
                Some(stats) => println!(
                    "{} {} ({}) {} {}",
                    label,
                    path.cyan(),
                    template.dimmed(),
                    format!("+{}", stats.insertions).green(),
                    format!("-{}", stats.deletions).red()
                ),
                None => println!("{} {} ({})", label, path.cyan(), template.dimmed()),
            }
            if let Some(diff) = &evaluation.diff {
                print_diff(diff, settings.colorized_diff);
            }
            if !evaluation.fixed {
                println!("   Run with {} to regenerate it.", "--auto-fix".cyan());
            } else if !evaluation.passed {
                println!("   Review the changes above and commit them.");
            }
        }
    }
}

fn review_hint(tracking: TrackingState) -> String {
    match tracking {
        TrackingState::Ignored => {
            "The new file is ignored by git; it will not be committed.".to_string()
        }
        TrackingState::NoRepository => "Review the new file.".to_string(),
        state => format!("Review the new file ({state}) and commit it."),
    }
}

fn print_diff(diff: &str, colorized: bool) {
    for line in diff.lines() {
        if !colorized {
            println!("{line}");
        } else if line.starts_with("+++") || line.starts_with("---") {
            println!("{}", line.bold());
        } else if line.starts_with('+') {
            println!("{}", line.green());
        } else if line.starts_with('-') {
            println!("{}", line.red());
        } else if line.starts_with("@@") {
            println!("{}", line.cyan());
        } else {
            println!("{line}");
        }
    }
}

fn print_json(cwd: &Path, settings: &Settings, report: &SyncReport) -> Result<()> {
    let outputs: Vec<_> = report
        .outputs
        .iter()
        .map(|output| {
            let path = display_path(cwd, &output.path);
            match &output.result {
                Ok(evaluation) => json!({
                    "path": path,
                    "template": output.template,
                    "verdict": evaluation.verdict,
                    "fixed": evaluation.fixed,
                    "passed": evaluation.passed,
                    "tracking": evaluation.tracking,
                    "checksum": evaluation.rendered_checksum,
                    "diff": evaluation.diff,
                    "diff_stats": evaluation.diff_stats,
                }),
                Err(e) => json!({
                    "path": path,
                    "template": output.template,
                    "passed": false,
                    "error": e.to_string(),
                }),
            }
        })
        .collect();

    let document = json!({
        "success": report.is_success(),
        "schema": display_path(cwd, &settings.schema),
        "outputs": outputs,
    });
    println!("{}", serde_json::to_string_pretty(&document)?);
    Ok(())
}

/// Show paths under the working directory relative to it.
fn display_path(cwd: &Path, path: &NormalizedPath) -> String {
    let native = path.to_native();
    match native.strip_prefix(cwd) {
        Ok(relative) if !relative.as_os_str().is_empty() => {
            NormalizedPath::new(relative).as_str().to_string()
        }
        _ => path.as_str().to_string(),
    }
}
