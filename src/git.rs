use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{Result, WtxError};
use crate::proc;

/// One entry from the porcelain worktree listing. `branch` keeps the full
/// ref (`refs/heads/...`) and is empty for detached worktrees.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorktreeEntry {
    pub path: PathBuf,
    pub branch: String,
}

fn run_git(dir: &Path, args: &[&str]) -> Result<String> {
    let output = Command::new("git").current_dir(dir).args(args).output()?;
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    if output.status.success() {
        Ok(text)
    } else {
        Err(WtxError::Git {
            command: args.join(" "),
            output: text.trim().to_string(),
        })
    }
}

fn run_git_quiet(dir: &Path, args: &[&str]) -> Result<()> {
    proc::run_quiet(Some(dir), "git", args).map_err(|_| WtxError::Git {
        command: args.join(" "),
        output: "exited with non-zero status".to_string(),
    })
}

fn run_git_stream(dir: &Path, args: &[&str]) -> Result<()> {
    proc::run_stream(Some(dir), "git", args).map_err(|_| WtxError::Git {
        command: args.join(" "),
        output: "exited with non-zero status".to_string(),
    })
}

pub fn is_inside_work_tree(dir: &Path) -> bool {
    run_git(dir, &["rev-parse", "--is-inside-work-tree"]).is_ok()
}

pub fn repo_root(dir: &Path) -> Result<PathBuf> {
    let out = run_git(dir, &["rev-parse", "--show-toplevel"])?;
    Ok(PathBuf::from(out.trim()))
}

/// Fetch one branch from the remote, pruning stale remote refs.
pub fn fetch_prune(dir: &Path, remote: &str, branch: &str) -> Result<()> {
    run_git_stream(dir, &["fetch", remote, branch, "--prune"])
}

pub fn remote_branch_exists(dir: &Path, remote: &str, branch: &str) -> bool {
    run_git(dir, &["ls-remote", "--exit-code", "--heads", remote, branch]).is_ok()
}

/// Check out an existing remote ref into a new worktree at `target`.
pub fn worktree_add_checkout(dir: &Path, target: &Path, remote_ref: &str) -> Result<()> {
    run_git_stream(
        dir,
        &["worktree", "add", "--checkout", &target.to_string_lossy(), remote_ref],
    )
}

/// Create `branch` in the worktree, or switch to it if it already exists.
/// Two-step policy: only the plain switch's failure propagates.
pub fn switch_or_create(worktree: &Path, branch: &str) -> Result<()> {
    if run_git_quiet(worktree, &["switch", "-c", branch]).is_ok() {
        return Ok(());
    }
    run_git_stream(worktree, &["switch", branch])
}

/// Create a new branch and its worktree in one step from `base_ref`.
pub fn worktree_add_new_branch(dir: &Path, target: &Path, branch: &str, base_ref: &str) -> Result<()> {
    run_git_stream(
        dir,
        &["worktree", "add", "-b", branch, &target.to_string_lossy(), base_ref],
    )
}

/// Drop inherited upstream tracking. Best-effort: the caller ignores the
/// result, a fresh branch has no upstream to unset.
pub fn unset_upstream(worktree: &Path) -> Result<()> {
    run_git_quiet(worktree, &["branch", "--unset-upstream"])
}

pub fn push_set_upstream(worktree: &Path, remote: &str, branch: &str) -> Result<()> {
    let refspec = format!("{branch}:{branch}");
    run_git_stream(worktree, &["push", "-u", remote, &refspec])
}

/// List all worktrees of the repository containing `dir`.
///
/// Ordering contract: entries come back in git's own listing order, and
/// the first entry is always the primary worktree. The cleanup pass
/// relies on this to pick its ancestry-check context.
pub fn list_worktrees(dir: &Path) -> Result<Vec<WorktreeEntry>> {
    let raw = run_git(dir, &["worktree", "list", "--porcelain"])?;
    Ok(parse_worktree_list(&raw))
}

/// Parse `git worktree list --porcelain` output: paragraphs separated by
/// blank lines, `worktree ` and `branch ` attribute lines.
pub fn parse_worktree_list(raw: &str) -> Vec<WorktreeEntry> {
    let mut entries = Vec::new();
    let mut path = String::new();
    let mut branch = String::new();

    for line in raw.lines() {
        if line.is_empty() {
            if !path.is_empty() {
                entries.push(WorktreeEntry {
                    path: PathBuf::from(&path),
                    branch: branch.clone(),
                });
            }
            path.clear();
            branch.clear();
            continue;
        }
        if let Some(rest) = line.strip_prefix("worktree ") {
            path = rest.to_string();
        } else if let Some(rest) = line.strip_prefix("branch ") {
            branch = rest.to_string();
        }
    }
    if !path.is_empty() {
        entries.push(WorktreeEntry {
            path: PathBuf::from(path),
            branch,
        });
    }
    entries
}

/// True when `branch` is fully contained in `main_branch`'s history.
/// Runs in `dir` (the primary worktree) so every local ref is visible.
pub fn is_ancestor(dir: &Path, branch: &str, main_branch: &str) -> bool {
    run_git(dir, &["merge-base", "--is-ancestor", branch, main_branch]).is_ok()
}

pub fn remove_worktree(dir: &Path, target: &Path) -> Result<()> {
    run_git_stream(dir, &["worktree", "remove", &target.to_string_lossy(), "--force"])
}

/// Delete a local branch. Two-step policy: soft delete first, force
/// delete on failure; only the forced failure propagates.
pub fn delete_branch(dir: &Path, branch: &str) -> Result<()> {
    if run_git_quiet(dir, &["branch", "-d", branch]).is_ok() {
        return Ok(());
    }
    run_git_stream(dir, &["branch", "-D", branch])
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
