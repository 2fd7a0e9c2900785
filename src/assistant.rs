use std::path::Path;

use crate::branch;
use crate::config::Config;
use crate::error::{Result, WtxError};
use crate::proc;

/// Derive a raw branch-name candidate for the task. Prefers a name
/// proposed by the configured assistant command; always falls back to a
/// deterministic slug of the task text, so the caller never blocks on an
/// unreliable external tool.
pub fn generate_branch_name(cfg: &Config, task: &str, assistant: &str) -> String {
    if let Some(ai) = cfg.llm.commands.get(assistant) {
        if proc::command_exists(assistant) && !ai.branch_name_args_template.is_empty() {
            let prompt = cfg.llm.branch_name_prompt_template.replace("{task}", task);
            let args = proc::render_template(
                &ai.branch_name_args_template,
                &[("{prompt}", prompt.as_str()), ("{task}", task)],
            );
            let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
            if let Ok(output) = proc::run_capture(None, assistant, &arg_refs) {
                let candidate = branch::extract_candidate(&output);
                if !candidate.is_empty() {
                    return candidate;
                }
            }
        }
    }
    branch::fallback_slug(task)
}

/// Run the assistant on the task inside the worktree, with the terminal
/// attached. A missing binary is reported and skipped; an empty argument
/// template is a configuration defect and fails.
pub fn run_task(cfg: &Config, assistant: &str, worktree: &Path, task: &str) -> Result<()> {
    let ai = cfg
        .llm
        .commands
        .get(assistant)
        .ok_or_else(|| WtxError::MissingAssistantConfig(assistant.to_string()))?;
    if !proc::command_exists(assistant) {
        println!("{assistant} not found. Skip auto-run.");
        return Ok(());
    }
    let args = proc::render_template(&ai.task_run_args_template, &[("{task}", task)]);
    if args.is_empty() {
        return Err(WtxError::EmptyTaskTemplate(assistant.to_string()));
    }
    let arg_refs: Vec<&str> = args.iter().map(String::as_str).collect();
    proc::run_stream(Some(worktree), assistant, &arg_refs)
}
