//! Text blocks injected into exported orchestrator documents.

use super::{ORCHESTRATOR_PREFIX, PARAMETER_NAME, RUN_COMMAND_PREFIX};

/// The slash command that invokes an orchestrator: `orchestrator-release`
/// becomes `/run-release`.
pub fn command_token(agent_name: &str) -> String {
    let suffix = agent_name
        .strip_prefix(ORCHESTRATOR_PREFIX)
        .unwrap_or(agent_name);
    format!("{}{}", RUN_COMMAND_PREFIX, suffix)
}

/// Explains how to obtain the input without the positional placeholder.
pub fn input_adapter(agent_name: &str) -> String {
    let command = command_token(agent_name);
    format!(
        "## Copilot Input Adapter\n\n\
         Copilot custom agents do not provide the OpenCode positional input variable.\n\
         Use the user's latest message as `{param}`.\n\
         If `{param}` starts with `{command}`, remove that first token before parsing flags.\n\
         Then apply the existing flag parsing protocol unchanged.\n",
        param = PARAMETER_NAME,
        command = command,
    )
}

/// Instructs inline execution when subagents are unavailable.
pub fn solo_adapter() -> &'static str {
    "## Copilot Fallback Mode (No Subagents)\n\n\
     If subagents are unavailable in this environment, execute all stage responsibilities inline.\n\
     Preserve stage order, output contracts, and quality gates.\n\
     Do not expand scope; if blocked, report blockers explicitly.\n"
}
