//! CLI argument parsing for agentsync.
//!
//! Uses clap derive macros for declarative argument definitions.
//! This module defines the command structure; actual implementations
//! are in the `commands` module.
//!
//! Path flags are optional: when omitted, the value comes from the settings
//! file (`.agentsync.yaml`) or its defaults.

use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

/// Agentsync: keep OpenCode agent documents, the agent catalog and the model
/// mapping in sync, and export Copilot agent documents from them.
#[derive(Parser, Debug)]
#[command(name = "agentsync")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Settings file (default: .agentsync.yaml when present).
    #[arg(long, global = true, value_name = "PATH")]
    pub settings: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands for agentsync.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Apply the model mapping to the catalog and agent documents.
    ///
    /// Rewrites the model column of AGENTS.md, the `model` field of every
    /// mapped agent document, and the `model` field of every command
    /// document bound to a mapped agent.
    SyncModels(SyncModelsArgs),

    /// Export source agent documents as Copilot `.agent.md` documents.
    ///
    /// Resolves `@agent` references into an `agents:` list and rewrites the
    /// positional input placeholder. Orchestrators also get a `-solo`
    /// fallback variant.
    Export(ExportArgs),

    /// Validate a JSON document against a JSON schema subset.
    ValidateSchema(ValidateSchemaArgs),
}

/// Arguments for the `sync-models` command.
#[derive(Parser, Debug, Default)]
pub struct SyncModelsArgs {
    /// Model mapping JSON.
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Agent catalog markdown.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// OpenCode root containing `agents/` and `commands/`.
    #[arg(long, value_name = "DIR")]
    pub opencode_root: Option<PathBuf>,

    /// Report changes without writing any file.
    #[arg(long)]
    pub dry_run: bool,

    /// Fail when a mapped model is not listed in `supported_models`.
    #[arg(long, alias = "strict-supported")]
    pub strict: bool,
}

/// Arguments for the `export` command.
#[derive(Parser, Debug, Default)]
pub struct ExportArgs {
    /// Directory of source agent documents.
    #[arg(long, value_name = "DIR")]
    pub source_agents: Option<PathBuf>,

    /// Directory receiving the generated documents.
    #[arg(long, value_name = "DIR")]
    pub target_dir: PathBuf,

    /// Agent catalog markdown used for consistency checks.
    #[arg(long, value_name = "PATH")]
    pub catalog: Option<PathBuf>,

    /// List the files that would be generated without writing them.
    #[arg(long)]
    pub dry_run: bool,

    /// Treat consistency findings as errors.
    #[arg(long)]
    pub strict: bool,

    /// Generate `-solo` variants for orchestrators.
    #[arg(long, overrides_with = "no_emit_fallback")]
    pub emit_fallback: bool,

    /// Do not generate `-solo` variants.
    #[arg(long, overrides_with = "emit_fallback")]
    pub no_emit_fallback: bool,
}

impl ExportArgs {
    /// Explicit fallback choice, if either flag was given.
    pub fn fallback_override(&self) -> Option<bool> {
        if self.no_emit_fallback {
            Some(false)
        } else if self.emit_fallback {
            Some(true)
        } else {
            None
        }
    }
}

/// Arguments for the `validate-schema` command.
#[derive(Parser, Debug)]
pub struct ValidateSchemaArgs {
    /// JSON schema file.
    #[arg(long, value_name = "PATH")]
    pub schema: PathBuf,

    /// JSON document to validate.
    #[arg(long, value_name = "PATH")]
    pub input: PathBuf,
}

impl Cli {
    /// Parse command-line arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_sync_models_defaults() {
        let cli = Cli::try_parse_from(["agentsync", "sync-models"]).unwrap();
        assert_eq!(cli.verbose, 0);
        assert!(cli.settings.is_none());
        if let Command::SyncModels(args) = cli.command {
            assert!(args.config.is_none());
            assert!(args.catalog.is_none());
            assert!(args.opencode_root.is_none());
            assert!(!args.dry_run);
            assert!(!args.strict);
        } else {
            panic!("Expected SyncModels command");
        }
    }

    #[test]
    fn parse_sync_models_full() {
        let cli = Cli::try_parse_from([
            "agentsync",
            "-vv",
            "sync-models",
            "--config",
            "models.json",
            "--catalog",
            "docs/AGENTS.md",
            "--opencode-root",
            "oc",
            "--dry-run",
            "--strict-supported",
        ])
        .unwrap();
        assert_eq!(cli.verbose, 2);
        if let Command::SyncModels(args) = cli.command {
            assert_eq!(args.config, Some(PathBuf::from("models.json")));
            assert_eq!(args.catalog, Some(PathBuf::from("docs/AGENTS.md")));
            assert_eq!(args.opencode_root, Some(PathBuf::from("oc")));
            assert!(args.dry_run);
            assert!(args.strict);
        } else {
            panic!("Expected SyncModels command");
        }
    }

    #[test]
    fn parse_export_requires_target_dir() {
        assert!(Cli::try_parse_from(["agentsync", "export"]).is_err());
    }

    #[test]
    fn parse_export() {
        let cli = Cli::try_parse_from([
            "agentsync",
            "export",
            "--target-dir",
            "out",
            "--strict",
            "--settings",
            "custom.yaml",
        ])
        .unwrap();
        assert_eq!(cli.settings, Some(PathBuf::from("custom.yaml")));
        if let Command::Export(args) = cli.command {
            assert_eq!(args.target_dir, PathBuf::from("out"));
            assert!(args.source_agents.is_none());
            assert!(args.strict);
            assert!(!args.dry_run);
            assert_eq!(args.fallback_override(), None);
        } else {
            panic!("Expected Export command");
        }
    }

    #[test]
    fn export_fallback_flags_last_one_wins() {
        let cli = Cli::try_parse_from([
            "agentsync",
            "export",
            "--target-dir",
            "out",
            "--emit-fallback",
            "--no-emit-fallback",
        ])
        .unwrap();
        if let Command::Export(args) = cli.command {
            assert_eq!(args.fallback_override(), Some(false));
        } else {
            panic!("Expected Export command");
        }

        let cli = Cli::try_parse_from([
            "agentsync",
            "export",
            "--target-dir",
            "out",
            "--no-emit-fallback",
            "--emit-fallback",
        ])
        .unwrap();
        if let Command::Export(args) = cli.command {
            assert_eq!(args.fallback_override(), Some(true));
        } else {
            panic!("Expected Export command");
        }
    }

    #[test]
    fn parse_validate_schema() {
        let cli = Cli::try_parse_from([
            "agentsync",
            "validate-schema",
            "--schema",
            "s.json",
            "--input",
            "i.json",
        ])
        .unwrap();
        if let Command::ValidateSchema(args) = cli.command {
            assert_eq!(args.schema, PathBuf::from("s.json"));
            assert_eq!(args.input, PathBuf::from("i.json"));
        } else {
            panic!("Expected ValidateSchema command");
        }
    }

    #[test]
    fn validate_schema_requires_both_paths() {
        assert!(Cli::try_parse_from(["agentsync", "validate-schema", "--schema", "s.json"]).is_err());
    }
}
