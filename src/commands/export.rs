//! Implementation of the `agentsync export` command.
//!
//! Loads every source agent, resolves its `@agent` references, and renders
//! one Copilot document per agent (plus a `-solo` variant per orchestrator).
//! Consistency findings are warnings unless `--strict` is given, in which
//! case any of them fails the run before anything is written.

use crate::agent::{AgentDefinition, load_agents};
use crate::catalog;
use crate::cli::ExportArgs;
use crate::config::Config;
use crate::error::{Result, SyncError};
use crate::fs::{WritePlan, display_path, read_text};
use crate::references;
use crate::transform::{self, INPUT_PLACEHOLDER};
use std::collections::{BTreeMap, BTreeSet, HashSet};
use std::path::{Path, PathBuf};

/// Resolved inputs of an export run.
#[derive(Debug, Clone)]
pub struct ExportOptions {
    pub source_agents: PathBuf,
    pub target_dir: PathBuf,
    pub catalog: PathBuf,
    pub emit_fallback: bool,
    pub document_glob: String,
    pub known_keys: BTreeSet<String>,
}

impl ExportOptions {
    /// CLI flags first, then settings.
    pub fn resolve(args: &ExportArgs, settings: &Config) -> Self {
        Self {
            source_agents: args
                .source_agents
                .clone()
                .unwrap_or_else(|| PathBuf::from(&settings.source_agents)),
            target_dir: args.target_dir.clone(),
            catalog: args
                .catalog
                .clone()
                .unwrap_or_else(|| PathBuf::from(&settings.catalog)),
            emit_fallback: args.fallback_override().unwrap_or(settings.emit_fallback),
            document_glob: settings.document_glob.clone(),
            known_keys: settings.known_keys(),
        }
    }
}

/// Everything an export run would do.
#[derive(Debug, Default)]
pub struct ExportOutcome {
    pub plan: WritePlan,
    /// Consistency findings, in discovery order.
    pub findings: Vec<String>,
}

/// Run `agentsync export`.
pub fn cmd_export(args: ExportArgs, settings: &Config) -> Result<()> {
    let options = ExportOptions::resolve(&args, settings);
    let outcome = plan_export(&options)?;

    if !outcome.findings.is_empty() {
        if args.strict {
            return Err(SyncError::ValidationError(outcome.findings));
        }
        eprintln!("Warnings:");
        for finding in &outcome.findings {
            eprintln!("- {}", finding);
        }
    }

    let target = display_path(&options.target_dir);
    if args.dry_run {
        println!(
            "Dry run: would generate {} files into {}",
            outcome.plan.len(),
            target
        );
        for path in outcome.plan.paths() {
            println!("- {}", display_path(path));
        }
        return Ok(());
    }

    let written = outcome.plan.commit()?;
    println!("Generated {} files into {}", written, target);
    Ok(())
}

/// Compute every generated document and consistency finding.
///
/// Fails on a missing source directory, any structurally invalid source
/// document, an unreadable catalog, or a target path that is not a directory.
pub fn plan_export(options: &ExportOptions) -> Result<ExportOutcome> {
    if !options.source_agents.is_dir() {
        return Err(SyncError::IoError(format!(
            "Source directory not found: {}",
            display_path(&options.source_agents)
        )));
    }
    if options.target_dir.exists() && !options.target_dir.is_dir() {
        return Err(SyncError::IoError(format!(
            "Target path exists and is not a directory: {}",
            display_path(&options.target_dir)
        )));
    }

    let agents = load_agents(&options.source_agents, &options.document_glob)?;
    let known: HashSet<String> = agents.iter().map(|agent| agent.name.clone()).collect();

    let mut outcome = ExportOutcome::default();
    outcome
        .findings
        .extend(catalog_divergence(&options.catalog, &known)?);
    outcome.findings.extend(duplicate_names(&agents));

    for agent in &agents {
        outcome.findings.extend(header_findings(agent, &options.known_keys));

        let resolution = references::extract(&agent.body, &known);
        if !resolution.is_fully_resolved() {
            outcome.findings.push(format!(
                "{}: unresolved @agent reference(s): {}",
                display_path(&agent.path),
                resolution.unresolved.join(", ")
            ));
        }
        tracing::debug!(
            agent = %agent.name,
            dependencies = ?resolution.resolved,
            "resolved references"
        );

        for document in transform::export_variants(agent, &resolution, options.emit_fallback) {
            let path = options.target_dir.join(document.file_name());
            if document.has_placeholder() {
                outcome.findings.push(format!(
                    "{}: output still contains '{}'",
                    display_path(&path),
                    INPUT_PLACEHOLDER
                ));
            }
            outcome.plan.push(path, document.content);
        }
    }

    tracing::info!(
        agents = agents.len(),
        documents = outcome.plan.len(),
        findings = outcome.findings.len(),
        "export planned"
    );
    Ok(outcome)
}

/// Names listed in the catalog but not in the sources, and the reverse.
///
/// An absent or empty catalog is not compared.
fn catalog_divergence(catalog_path: &Path, known: &HashSet<String>) -> Result<Vec<String>> {
    if !catalog_path.exists() {
        return Ok(Vec::new());
    }
    let listed = catalog::catalog_agents(&read_text(catalog_path)?);
    if listed.is_empty() {
        return Ok(Vec::new());
    }

    let sources: BTreeSet<&str> = known.iter().map(String::as_str).collect();
    let missing_in_source: Vec<&str> = listed
        .iter()
        .map(String::as_str)
        .filter(|name| !sources.contains(name))
        .collect();
    let missing_in_catalog: Vec<&str> = sources
        .iter()
        .copied()
        .filter(|name| !listed.contains(*name))
        .collect();

    let label = display_path(catalog_path);
    let mut findings = Vec::new();
    if !missing_in_source.is_empty() {
        findings.push(format!(
            "Agents listed in {} but missing in source: {}",
            label,
            missing_in_source.join(", ")
        ));
    }
    if !missing_in_catalog.is_empty() {
        findings.push(format!(
            "Agents present in source but missing in {}: {}",
            label,
            missing_in_catalog.join(", ")
        ));
    }
    Ok(findings)
}

/// Names declared by more than one source document.
fn duplicate_names(agents: &[AgentDefinition]) -> Vec<String> {
    let mut by_name: BTreeMap<&str, Vec<String>> = BTreeMap::new();
    for agent in agents {
        by_name
            .entry(agent.name.as_str())
            .or_default()
            .push(display_path(&agent.path));
    }
    by_name
        .into_iter()
        .filter(|(_, paths)| paths.len() > 1)
        .map(|(name, paths)| format!("duplicate agent name {} in {}", name, paths.join(", ")))
        .collect()
}

fn header_findings(agent: &AgentDefinition, known_keys: &BTreeSet<String>) -> Vec<String> {
    let path = display_path(&agent.path);
    let mut findings = Vec::new();

    let unknown = agent.unknown_keys(known_keys);
    if !unknown.is_empty() {
        findings.push(format!(
            "{}: unknown frontmatter key(s): {}",
            path,
            unknown.join(", ")
        ));
    }
    for invalid in agent.invalid_values() {
        findings.push(format!("{}: {}", path, invalid));
    }

    findings
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::exit_codes;
    use tempfile::TempDir;

    const ORCHESTRATOR: &str = "---
name: orchestrator-release
description: Coordinates a release
mode: primary
---
Parse $ARGUMENTS, then hand off to @planner and @executor-*.
";

    const PLANNER: &str = "---
name: planner
description: Plans work
mode: subagent
---
Plan it.
";

    const CATALOG: &str = "| Agent | Role | Model | Mode | Notes |
|---|---|---|---|---|
| orchestrator-release | Lead | gpt-5 | primary | - |
| planner | Plan | gpt-5 | subagent | - |
";

    struct Fixture {
        temp: TempDir,
    }

    impl Fixture {
        fn new() -> Self {
            let temp = TempDir::new().unwrap();
            std::fs::create_dir_all(temp.path().join("agents")).unwrap();
            std::fs::write(temp.path().join("AGENTS.md"), CATALOG).unwrap();
            let fx = Self { temp };
            fx.agent("orchestrator-release.md", ORCHESTRATOR);
            fx.agent("planner.md", PLANNER);
            fx
        }

        fn agent(&self, file: &str, content: &str) {
            std::fs::write(self.temp.path().join("agents").join(file), content).unwrap();
        }

        fn options(&self) -> ExportOptions {
            let settings = Config::default();
            ExportOptions {
                source_agents: self.temp.path().join("agents"),
                target_dir: self.temp.path().join("out"),
                catalog: self.temp.path().join("AGENTS.md"),
                emit_fallback: true,
                document_glob: settings.document_glob.clone(),
                known_keys: settings.known_keys(),
            }
        }

        fn args(&self, strict: bool, dry_run: bool) -> ExportArgs {
            ExportArgs {
                source_agents: Some(self.temp.path().join("agents")),
                target_dir: self.temp.path().join("out"),
                catalog: Some(self.temp.path().join("AGENTS.md")),
                dry_run,
                strict,
                ..ExportArgs::default()
            }
        }

        fn out(&self) -> PathBuf {
            self.temp.path().join("out")
        }
    }

    fn file_names(plan: &WritePlan) -> Vec<String> {
        plan.paths()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect()
    }

    #[test]
    fn plans_regular_and_solo_documents() {
        let fx = Fixture::new();
        let outcome = plan_export(&fx.options()).unwrap();

        assert!(outcome.findings.is_empty(), "{:?}", outcome.findings);
        assert_eq!(
            file_names(&outcome.plan),
            vec![
                "orchestrator-release.agent.md",
                "orchestrator-release-solo.agent.md",
                "planner.agent.md",
            ]
        );

        let main = &outcome.plan.writes()[0].content;
        assert!(main.contains("agents:\n  - planner\n  - executor-core\n  - executor-advanced\n"));
        assert!(main.contains("Parse raw_input"));
        assert!(!fx.out().exists(), "planning must not write");
    }

    #[test]
    fn fallback_can_be_disabled() {
        let fx = Fixture::new();
        let options = ExportOptions {
            emit_fallback: false,
            ..fx.options()
        };
        let outcome = plan_export(&options).unwrap();
        assert_eq!(
            file_names(&outcome.plan),
            vec!["orchestrator-release.agent.md", "planner.agent.md"]
        );
    }

    #[test]
    fn collects_every_consistency_finding() {
        let fx = Fixture::new();
        fx.agent(
            "reviewer.md",
            "---\nname: reviewer\ndescription: Reviews\ncolor: blue\nhidden: maybe\n---\nAsk @ghost and @helper-*.\n",
        );

        let outcome = plan_export(&fx.options()).unwrap();
        let findings = outcome.findings.join("\n");
        assert!(!findings.contains("but missing in source"));
        assert!(findings.contains("Agents present in source but missing in"));
        assert!(findings.contains(": reviewer"));
        assert!(findings.contains("reviewer.md: unknown frontmatter key(s): color"));
        assert!(findings.contains("reviewer.md: invalid value for 'hidden': maybe"));
        assert!(findings.contains("reviewer.md: unresolved @agent reference(s): ghost, helper-*"));
        assert_eq!(outcome.plan.len(), 4);
    }

    #[test]
    fn catalog_entries_without_source_are_reported() {
        let fx = Fixture::new();
        std::fs::remove_file(fx.temp.path().join("agents/planner.md")).unwrap();

        let outcome = plan_export(&fx.options()).unwrap();
        assert!(
            outcome
                .findings
                .iter()
                .any(|f| f.contains("but missing in source: planner"))
        );
        assert!(
            outcome
                .findings
                .iter()
                .any(|f| f.contains("unresolved @agent reference(s): planner"))
        );
    }

    #[test]
    fn missing_catalog_skips_divergence_check() {
        let fx = Fixture::new();
        std::fs::remove_file(fx.temp.path().join("AGENTS.md")).unwrap();
        fx.agent("extra.md", "---\nname: extra\ndescription: Extra\n---\n");

        let outcome = plan_export(&fx.options()).unwrap();
        assert!(outcome.findings.is_empty());
    }

    #[test]
    fn duplicate_names_are_reported() {
        let fx = Fixture::new();
        fx.agent(
            "planner-copy.md",
            "---\nname: planner\ndescription: Plans again\n---\n",
        );

        let outcome = plan_export(&fx.options()).unwrap();
        let duplicate = outcome
            .findings
            .iter()
            .find(|f| f.starts_with("duplicate agent name planner in "))
            .expect("duplicate finding");
        assert!(duplicate.contains("planner.md"));
        assert!(duplicate.contains("planner-copy.md"));

        let err = cmd_export(fx.args(true, false), &Config::default()).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
        assert!(!fx.out().exists());
    }

    #[test]
    fn strict_findings_block_every_write() {
        let fx = Fixture::new();
        fx.agent(
            "reviewer.md",
            "---\nname: reviewer\ndescription: Reviews\n---\nAsk @ghost.\n",
        );

        let err = cmd_export(fx.args(true, false), &Config::default()).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::VALIDATION_FAILURE);
        assert!(err.to_string().starts_with("Validation failed:\n- "));
        assert!(!fx.out().exists());
    }

    #[test]
    fn lenient_run_writes_despite_findings() {
        let fx = Fixture::new();
        fx.agent(
            "reviewer.md",
            "---\nname: reviewer\ndescription: Reviews\n---\nAsk @ghost.\n",
        );

        cmd_export(fx.args(false, false), &Config::default()).unwrap();
        assert!(fx.out().join("reviewer.agent.md").exists());
        assert!(fx.out().join("orchestrator-release-solo.agent.md").exists());
    }

    #[test]
    fn structural_error_anywhere_means_zero_writes() {
        let fx = Fixture::new();
        fx.agent("broken.md", "---\nname: broken\n---\n");
        fx.agent("headless.md", "just text\n");

        let err = cmd_export(fx.args(false, false), &Config::default()).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::FATAL_ERROR);
        let message = err.to_string();
        assert!(message.contains("broken.md: missing required frontmatter key 'description'"));
        assert!(message.contains("headless.md: missing frontmatter block"));
        assert!(!fx.out().exists());
    }

    #[test]
    fn target_that_is_a_file_is_fatal() {
        let fx = Fixture::new();
        std::fs::write(fx.out(), "not a dir").unwrap();

        let err = plan_export(&fx.options()).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::FATAL_ERROR);
        assert!(err.to_string().contains("not a directory"));
    }

    #[test]
    fn missing_source_directory_is_fatal() {
        let fx = Fixture::new();
        let options = ExportOptions {
            source_agents: fx.temp.path().join("nope"),
            ..fx.options()
        };
        let err = plan_export(&options).unwrap_err();
        assert_eq!(err.exit_code(), exit_codes::FATAL_ERROR);
        assert!(err.to_string().starts_with("Source directory not found:"));
    }

    #[test]
    fn dry_run_writes_nothing() {
        let fx = Fixture::new();
        cmd_export(fx.args(true, true), &Config::default()).unwrap();
        assert!(!fx.out().exists());
    }

    #[test]
    fn commit_writes_into_new_target_dir() {
        let fx = Fixture::new();
        cmd_export(fx.args(true, false), &Config::default()).unwrap();

        let planner = std::fs::read_to_string(fx.out().join("planner.agent.md")).unwrap();
        assert_eq!(
            planner,
            "---\nname: \"planner\"\ndescription: \"Plans work\"\n---\n\nPlan it.\n"
        );
    }

    #[test]
    fn settings_supply_defaults_and_extra_keys() {
        let settings = Config {
            source_agents: "src/agents".to_string(),
            emit_fallback: false,
            extra_known_keys: vec!["color".to_string()],
            ..Config::default()
        };
        let args = ExportArgs {
            target_dir: PathBuf::from("out"),
            ..ExportArgs::default()
        };
        let options = ExportOptions::resolve(&args, &settings);
        assert_eq!(options.source_agents, PathBuf::from("src/agents"));
        assert_eq!(options.catalog, PathBuf::from("AGENTS.md"));
        assert!(!options.emit_fallback);
        assert!(options.known_keys.contains("color"));

        let args = ExportArgs {
            target_dir: PathBuf::from("out"),
            emit_fallback: true,
            ..ExportArgs::default()
        };
        assert!(ExportOptions::resolve(&args, &settings).emit_fallback);
    }
}
