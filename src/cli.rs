//! Command-line interface definition.
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::classify::Level;
use crate::config::Settings;

/// Top-level CLI entry point.
#[derive(Parser, Debug)]
#[command(
    name = "applyconfig",
    about = "Apply a directory of OpenShift manifests and templates with oc",
    version
)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output (`APPLYCONFIG_LOG` takes precedence when set)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply every selected manifest and template in a directory
    Apply(ApplyOpts),
    /// Generate shell completions
    Completions(CompletionsOpts),
    /// Print version information
    Version,
}

/// Options for the `apply` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct ApplyOpts {
    /// Directory with config to apply
    #[arg(long = "config-dir", value_name = "DIR")]
    pub config_dir: PathBuf,

    /// Username to impersonate while applying the config
    #[arg(long = "as", value_name = "USER")]
    pub user: Option<String>,

    /// Select which config to apply
    #[arg(long, value_enum)]
    pub level: Option<Level>,

    /// Cluster context to use while applying the config
    #[arg(long)]
    pub context: Option<String>,

    /// Validate with the server without persisting changes
    #[arg(short = 'd', long)]
    pub dry_run: bool,

    /// Settings file (defaults to `.applyconfig.toml` in the config directory)
    #[arg(long, value_name = "FILE")]
    pub settings: Option<PathBuf>,
}

impl ApplyOpts {
    /// Settings given on the command line; these win over the settings file.
    #[must_use]
    pub fn overrides(&self) -> Settings {
        Settings {
            user: self.user.clone(),
            level: self.level,
            context: self.context.clone(),
        }
    }
}

/// Options for the `completions` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct CompletionsOpts {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[cfg(test)]
#[allow(
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::indexing_slicing,
    clippy::panic
)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    fn apply_opts(args: &[&str]) -> ApplyOpts {
        let cli = Cli::parse_from(args);
        match cli.command {
            Command::Apply(opts) => opts,
            other => panic!("expected apply, got {other:?}"),
        }
    }

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_apply_minimal() {
        let opts = apply_opts(&["applyconfig", "apply", "--config-dir", "conf"]);
        assert_eq!(opts.config_dir, PathBuf::from("conf"));
        assert_eq!(opts.user, None);
        assert_eq!(opts.level, None);
        assert!(!opts.dry_run);
    }

    #[test]
    fn parse_apply_all_flags() {
        let opts = apply_opts(&[
            "applyconfig",
            "apply",
            "--config-dir",
            "conf",
            "--as",
            "joe",
            "--level",
            "all",
            "--context",
            "build01",
            "--dry-run",
            "--settings",
            "s.toml",
        ]);
        assert_eq!(opts.user.as_deref(), Some("joe"));
        assert_eq!(opts.level, Some(Level::All));
        assert_eq!(opts.context.as_deref(), Some("build01"));
        assert!(opts.dry_run);
        assert_eq!(opts.settings, Some(PathBuf::from("s.toml")));
    }

    #[test]
    fn parse_dry_run_short() {
        let opts = apply_opts(&["applyconfig", "apply", "--config-dir", "conf", "-d"]);
        assert!(opts.dry_run);
    }

    #[test]
    fn config_dir_is_required() {
        assert!(Cli::try_parse_from(["applyconfig", "apply"]).is_err());
    }

    #[test]
    fn invalid_level_is_rejected() {
        let result = Cli::try_parse_from([
            "applyconfig",
            "apply",
            "--config-dir",
            "conf",
            "--level",
            "root",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn overrides_carry_flags() {
        let opts = apply_opts(&[
            "applyconfig",
            "apply",
            "--config-dir",
            "conf",
            "--as",
            "joe",
            "--level",
            "admin",
        ]);
        let overrides = opts.overrides();
        assert_eq!(overrides.user.as_deref(), Some("joe"));
        assert_eq!(overrides.level, Some(Level::Admin));
        assert_eq!(overrides.context, None);
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["applyconfig", "-v", "version"]);
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn parse_completions() {
        let cli = Cli::parse_from(["applyconfig", "completions", "bash"]);
        assert!(matches!(
            cli.command,
            Command::Completions(CompletionsOpts {
                shell: clap_complete::Shell::Bash
            })
        ));
    }
}
