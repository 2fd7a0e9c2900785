use std::path::Path;

use crate::config::Config;
use crate::error::Result;
use crate::git;
use crate::proc;

/// What one cleanup pass did: branches removed (worktree + branch) and
/// branches kept because they are not merged yet.
#[derive(Debug, Default)]
pub struct CleanReport {
    pub removed: Vec<String>,
    pub kept: Vec<String>,
}

/// Remove every worktree whose branch is fully merged into the main
/// branch, deleting the branch afterwards. The first listed worktree is
/// the primary one; it provides the ancestry-check context and is never
/// a removal candidate. Entries are processed strictly in listing order
/// and a removal failure aborts the rest of the pass.
pub fn clean(cfg: &Config, cwd: &Path) -> Result<CleanReport> {
    proc::require_command("git")?;

    let entries = git::list_worktrees(cwd)?;
    let mut report = CleanReport::default();
    if entries.is_empty() {
        println!("No worktrees found.");
        return Ok(report);
    }

    let primary = entries[0].path.clone();
    println!("Checking for merged worktrees...");
    for entry in &entries[1..] {
        let branch = entry.branch.trim_start_matches("refs/heads/");
        if branch.is_empty() || branch == cfg.main_branch {
            continue;
        }

        if !git::is_ancestor(&primary, branch, &cfg.main_branch) {
            println!("Branch '{branch}' is not merged yet. Keeping worktree.");
            report.kept.push(branch.to_string());
            continue;
        }

        println!(
            "Branch '{}' is merged. Removing worktree at '{}'...",
            branch,
            entry.path.display()
        );
        git::remove_worktree(&primary, &entry.path)?;
        git::delete_branch(&primary, branch)?;
        println!("Removed worktree and branch: {branch}");
        report.removed.push(branch.to_string());
    }
    println!("Done cleaning merged worktrees.");
    Ok(report)
}

#[cfg(test)]
#[path = "cleanup_tests.rs"]
mod tests;
