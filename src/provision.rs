use std::fs;
use std::path::{Path, PathBuf};

use crate::assistant;
use crate::branch;
use crate::config::Config;
use crate::error::{Result, WtxError};
use crate::git;
use crate::proc;

/// A validated request to provision one worktree.
#[derive(Debug, Clone)]
pub struct WorktreeRequest {
    pub task: String,
    pub base: String,
    pub assistant: String,
    pub run_task: bool,
}

/// One step of the post-create pipeline. Copies and hooks collapse into
/// a single ordered action list so both are driven by configuration.
#[derive(Debug, Clone)]
enum ProvisionAction {
    Copy {
        from: String,
        to: String,
    },
    Run {
        name: String,
        cwd: String,
        command: Vec<String>,
        skip_if_missing: bool,
    },
}

fn build_actions(cfg: &Config) -> Vec<ProvisionAction> {
    let mut actions = Vec::new();
    for item in &cfg.copy_files {
        let from = item.from.trim();
        if from.is_empty() {
            continue;
        }
        let to = item.to.trim();
        actions.push(ProvisionAction::Copy {
            from: from.to_string(),
            to: if to.is_empty() { from.to_string() } else { to.to_string() },
        });
    }
    for hook in &cfg.post_create_hooks {
        if hook.command.is_empty() {
            continue;
        }
        let name = hook.name.trim();
        actions.push(ProvisionAction::Run {
            name: if name.is_empty() {
                hook.command.join(" ")
            } else {
                name.to_string()
            },
            cwd: hook.cwd.trim().to_string(),
            command: hook.command.clone(),
            skip_if_missing: hook.skip_if_missing,
        });
    }
    actions
}

/// Create, publish, and provision a worktree for the request. Each step
/// commits before the next runs; a failure is fatal and already-made
/// side effects (branches, pushes, copies) are not rolled back.
pub fn create(cfg: &Config, request: &WorktreeRequest, cwd: &Path) -> Result<PathBuf> {
    proc::require_command("git")?;
    if !git::is_inside_work_tree(cwd) {
        return Err(WtxError::NotInGitRepo);
    }
    let repo_root = git::repo_root(cwd)?;

    let raw = assistant::generate_branch_name(cfg, &request.task, &request.assistant);
    let branch = branch::sanitize(&raw);
    if branch.is_empty() {
        return Err(WtxError::EmptyBranchName);
    }

    let worktrees_dir = repo_root.join(&cfg.worktrees_dir);
    let target = worktrees_dir.join(branch.replace('/', "__"));

    git::fetch_prune(&repo_root, "origin", &request.base)?;
    fs::create_dir_all(&worktrees_dir)?;

    if git::remote_branch_exists(&repo_root, "origin", &branch) {
        git::worktree_add_checkout(&repo_root, &target, &format!("origin/{branch}"))?;
        git::switch_or_create(&target, &branch)?;
    } else {
        git::worktree_add_new_branch(
            &repo_root,
            &target,
            &branch,
            &format!("origin/{}", request.base),
        )?;
    }

    let _ = git::unset_upstream(&target);
    git::push_set_upstream(&target, "origin", &branch)?;

    run_actions(cfg, &repo_root, &target)?;

    println!("Worktree created at: {}", target.display());
    println!("Branch: {} (base: origin/{})", branch, request.base);
    println!("Upstream: origin/{branch}");

    if request.run_task {
        println!("Running {} with task prompt...", request.assistant);
        assistant::run_task(cfg, &request.assistant, &target, &request.task)?;
    }
    Ok(target)
}

fn run_actions(cfg: &Config, repo_root: &Path, target: &Path) -> Result<()> {
    println!("Copying configured files...");
    let actions = build_actions(cfg);
    let mut announced_hooks = false;

    for action in &actions {
        match action {
            ProvisionAction::Copy { from, to } => {
                let src = repo_root.join(from);
                let dst = target.join(to);
                if !src.exists() {
                    println!("Not found: {from} (skipped)");
                    continue;
                }
                if let Some(parent) = dst.parent() {
                    fs::create_dir_all(parent)?;
                }
                fs::copy(&src, &dst)?;
                println!("Copied: {from} -> {to}");
            }
            ProvisionAction::Run {
                name,
                cwd,
                command,
                skip_if_missing,
            } => {
                if !announced_hooks {
                    println!("Running post-create hooks...");
                    announced_hooks = true;
                }
                let hook_dir = if cwd.is_empty() {
                    target.to_path_buf()
                } else {
                    target.join(cwd)
                };
                if !hook_dir.is_dir() {
                    if *skip_if_missing {
                        println!("Hook skipped (missing dir): {} [{}]", name, hook_dir.display());
                        continue;
                    }
                    return Err(WtxError::HookDirMissing(hook_dir));
                }
                println!("Hook: {name}");
                let arg_refs: Vec<&str> = command[1..].iter().map(String::as_str).collect();
                proc::run_stream(Some(&hook_dir), &command[0], &arg_refs)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
#[path = "provision_tests.rs"]
mod tests;
