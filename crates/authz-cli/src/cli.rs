//! CLI argument parsing using clap derive

use std::path::PathBuf;

use clap::builder::BoolishValueParser;
use clap::{Args, Parser, Subcommand};

use authz_core::OutputSpec;

/// Keep generated authorization types in sync with the schema
///
/// Without a subcommand, runs `check`.
#[derive(Parser, Debug)]
#[command(name = "authz-sync")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub project: ProjectArgs,

    #[command(flatten)]
    pub check: CheckArgs,

    /// The command to run
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Where the schema, templates and config live
#[derive(Args, Debug, Clone, Default)]
pub struct ProjectArgs {
    /// Config file (default: ./authz-sync.toml if present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Schema file (overrides the config file)
    #[arg(long, global = true, value_name = "FILE")]
    pub schema: Option<PathBuf>,

    /// Directory of additional `*.jinja` templates
    #[arg(long, global = true, value_name = "DIR")]
    pub template_dir: Option<PathBuf>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct CheckArgs {
    /// Outputs to check; replaces the configured list
    #[arg(long, num_args = 1.., value_name = "PATH[:TEMPLATE]")]
    pub outputs: Vec<OutputSpec>,

    /// Write missing or out-of-sync outputs
    #[arg(long)]
    pub auto_fix: bool,

    /// Fail even when every out-of-sync output was fixed
    #[arg(long)]
    pub require_review: bool,

    /// Color the diff of out-of-sync outputs
    #[arg(
        long,
        value_name = "BOOL",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = BoolishValueParser::new()
    )]
    pub colorized_diff: Option<bool>,

    /// Output the report as JSON for scripting
    #[arg(long)]
    pub json: bool,
}

/// Available commands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Check generated outputs against the schema (default)
    Check(CheckArgs),

    /// List registered templates and the default for each extension
    Templates,

    /// Render one template to stdout
    Render {
        /// Template id, e.g. default_types.ts.jinja
        #[arg(short, long)]
        template: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn bare_invocation_is_a_check() {
        let cli = Cli::try_parse_from(["authz-sync", "--outputs", "a.ts", "b.py:x.jinja", "--auto-fix"]).unwrap();
        assert!(cli.command.is_none());
        assert!(cli.check.auto_fix);
        assert_eq!(cli.check.outputs.len(), 2);
        assert_eq!(cli.check.outputs[1].template.as_deref(), Some("x.jinja"));
    }

    #[test]
    fn colorized_diff_accepts_python_style_booleans() {
        let cli = Cli::try_parse_from(["authz-sync", "--colorized-diff=False"]).unwrap();
        assert_eq!(cli.check.colorized_diff, Some(false));

        let cli = Cli::try_parse_from(["authz-sync", "--colorized-diff"]).unwrap();
        assert_eq!(cli.check.colorized_diff, Some(true));

        let cli = Cli::try_parse_from(["authz-sync"]).unwrap();
        assert_eq!(cli.check.colorized_diff, None);
    }

    #[test]
    fn render_requires_template() {
        assert!(Cli::try_parse_from(["authz-sync", "render"]).is_err());
        let cli = Cli::try_parse_from(["authz-sync", "render", "-t", "x.jinja", "--schema", "s.zed"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Render { ref template }) if template == "x.jinja"));
        assert_eq!(cli.project.schema, Some(PathBuf::from("s.zed")));
    }
}
