//! Implementation of the `agentsync sync-models` command.
//!
//! Applies the model mapping to three places:
//! - the model column of the agent catalog
//! - the `model` field of every `agents/<name>.md` whose stem is mapped
//! - the `model` field of every `commands/*.md` bound to a mapped agent
//!   through its `agent` field
//!
//! Everything is computed first; files are only written once the whole run
//! is known to be free of fatal errors.

use crate::catalog;
use crate::cli::SyncModelsArgs;
use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::frontmatter::{self, set_field};
use crate::fs::{WritePlan, display_path, list_documents, read_text};
use crate::mapping::ModelMapping;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

const MODEL_KEY: &str = "model";
const AGENT_KEY: &str = "agent";
const MISSING: &str = "<missing>";

/// One changed model value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelChange {
    /// What changed: a catalog row (`path:agent`) or a document path.
    pub item: String,
    /// Previous value, `None` when the field did not exist.
    pub old_model: Option<String>,
    pub new_model: String,
}

/// Everything a sync run would do.
#[derive(Debug, Default)]
pub struct SyncOutcome {
    pub catalog_changes: Vec<ModelChange>,
    pub agent_changes: Vec<ModelChange>,
    pub command_changes: Vec<ModelChange>,
    /// Deduplicated and sorted.
    pub warnings: Vec<String>,
    pub plan: WritePlan,
}

/// Resolved inputs of a sync run.
#[derive(Debug, Clone)]
pub struct SyncPaths {
    pub config: PathBuf,
    pub catalog: PathBuf,
    pub opencode_root: PathBuf,
    pub document_glob: String,
}

impl SyncPaths {
    /// CLI flags first, then settings.
    pub fn resolve(args: &SyncModelsArgs, settings: &Config) -> Self {
        Self {
            config: args
                .config
                .clone()
                .unwrap_or_else(|| PathBuf::from(&settings.model_config)),
            catalog: args
                .catalog
                .clone()
                .unwrap_or_else(|| PathBuf::from(&settings.catalog)),
            opencode_root: args
                .opencode_root
                .clone()
                .unwrap_or_else(|| PathBuf::from(&settings.opencode_root)),
            document_glob: settings.document_glob.clone(),
        }
    }
}

/// Run `agentsync sync-models`.
pub fn cmd_sync_models(args: SyncModelsArgs, settings: &Config) -> Result<()> {
    let paths = SyncPaths::resolve(&args, settings);
    let outcome = plan_sync(&paths, args.strict)?;

    print_changes(
        &format!("{} rows updated", display_path(&paths.catalog)),
        &outcome.catalog_changes,
    );
    print_changes(
        &format!(
            "{} frontmatter updated",
            display_path(&paths.opencode_root.join("agents"))
        ),
        &outcome.agent_changes,
    );
    print_changes(
        &format!(
            "{} frontmatter updated",
            display_path(&paths.opencode_root.join("commands"))
        ),
        &outcome.command_changes,
    );

    if !outcome.warnings.is_empty() {
        println!("Warnings:");
        for warning in &outcome.warnings {
            println!("- {}", warning);
        }
    }

    if args.dry_run {
        println!("Dry-run mode: no files written.");
        return Ok(());
    }

    outcome.plan.commit()?;
    println!("Write complete.");
    Ok(())
}

/// Compute every change of a sync run without writing anything.
///
/// Fails on an unusable mapping, an unreadable catalog or document, or, with
/// `strict`, on mapped models outside `supported_models`.
pub fn plan_sync(paths: &SyncPaths, strict: bool) -> Result<SyncOutcome> {
    let mapping = ModelMapping::load(&paths.config)?;
    let mut warnings = Vec::new();

    let policy = mapping.policy_findings();
    if strict && !policy.unsupported.is_empty() {
        return Err(SyncError::ValidationError(policy.unsupported));
    }
    warnings.extend(policy.unsupported);
    warnings.extend(policy.discouraged);

    let mut outcome = SyncOutcome::default();

    let catalog_source = read_text(&paths.catalog)?;
    let reconciliation = catalog::reconcile(&catalog_source, &mapping.agent_models);
    warnings.extend(reconciliation.warnings);
    let catalog_label = display_path(&paths.catalog);
    outcome.catalog_changes = reconciliation
        .changed
        .into_iter()
        .map(|row| ModelChange {
            item: format!("{}:{}", catalog_label, row.agent),
            old_model: Some(row.old_model),
            new_model: row.new_model,
        })
        .collect();
    if !outcome.catalog_changes.is_empty() {
        outcome.plan.push(&paths.catalog, reconciliation.content);
    }

    let agents_dir = paths.opencode_root.join("agents");
    if let Some(documents) = documents_in(&agents_dir, &paths.document_glob, &mut warnings)? {
        for path in documents {
            let stem = path
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let Some(target) = mapping.model_for(&stem) else {
                warnings.push(format!(
                    "No model mapping for opencode agent file: {}",
                    display_path(&path)
                ));
                continue;
            };
            let source = read_text(&path)?;
            apply_model(&path, &source, target, &mut outcome, &mut warnings, false);
        }
    }

    let commands_dir = paths.opencode_root.join("commands");
    if let Some(documents) = documents_in(&commands_dir, &paths.document_glob, &mut warnings)? {
        for path in documents {
            let source = read_text(&path)?;
            let document = match frontmatter::parse(&source) {
                Ok(document) => document,
                Err(err) => {
                    warnings.push(format!("{}: {}", display_path(&path), err));
                    continue;
                }
            };
            let Some(agent) = document.block.locate(AGENT_KEY).map(|field| field.value().trim())
            else {
                warnings.push(format!(
                    "{}: Missing frontmatter '{}'",
                    display_path(&path),
                    AGENT_KEY
                ));
                continue;
            };
            let Some(target) = mapping.model_for(agent) else {
                warnings.push(format!(
                    "{}: Agent '{}' not found in config mapping",
                    display_path(&path),
                    agent
                ));
                continue;
            };
            apply_model(&path, &source, target, &mut outcome, &mut warnings, true);
        }
    }

    let unique: BTreeSet<String> = warnings.into_iter().collect();
    outcome.warnings = unique.into_iter().collect();

    tracing::info!(
        catalog = outcome.catalog_changes.len(),
        agents = outcome.agent_changes.len(),
        commands = outcome.command_changes.len(),
        pending = outcome.plan.len(),
        "sync planned"
    );
    Ok(outcome)
}

/// Matching documents in `dir`, or `None` (with a warning) if it is missing.
fn documents_in(
    dir: &Path,
    pattern: &str,
    warnings: &mut Vec<String>,
) -> Result<Option<Vec<PathBuf>>> {
    if !dir.is_dir() {
        warnings.push(format!("Directory not found: {}", display_path(dir)));
        return Ok(None);
    }
    let documents = list_documents(dir, pattern)?;
    tracing::debug!(dir = %dir.display(), documents = documents.len(), "scanning documents");
    Ok(Some(documents))
}

fn apply_model(
    path: &Path,
    source: &str,
    target: &str,
    outcome: &mut SyncOutcome,
    warnings: &mut Vec<String>,
    is_command: bool,
) {
    let update = match set_field(source, MODEL_KEY, target) {
        Ok(update) => update,
        Err(err) => {
            warnings.push(format!("{}: {}", display_path(path), err));
            return;
        }
    };
    if !update.changed {
        return;
    }

    let change = ModelChange {
        item: display_path(path),
        old_model: update.previous,
        new_model: target.to_string(),
    };
    if is_command {
        outcome.command_changes.push(change);
    } else {
        outcome.agent_changes.push(change);
    }
    outcome.plan.push(path, update.content);
}

fn print_changes(title: &str, changes: &[ModelChange]) {
    println!("{}: {}", title, changes.len());
    for change in changes {
        println!(
            "- {}: {} -> {}",
            change.item,
            change.old_model.as_deref().unwrap_or(MISSING),
            change.new_model
        );
    }
}
