use clap::{Parser, Subcommand};
use std::env;
use std::path::Path;

use wtx::config::{self, Config};
use wtx::error::{Result, WtxError};
use wtx::{cleanup, prompt, provision, WorktreeRequest};

#[derive(Parser)]
#[command(
    name = "wtx",
    version,
    about = "Automate git worktrees for AI coding-agent tasks"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a worktree for a task and run the assistant in it
    Start {
        /// Task description (prompted for when omitted)
        task: Option<String>,
        /// Base branch to branch off (defaults to the configured base)
        base: Option<String>,
        /// Assistant to use (must be in the configured allowed set)
        assistant: Option<String>,
    },
    /// Create a worktree for a task (assistant defaults to the configured one)
    #[command(aliases = ["nw", "new-worktree"])]
    New {
        task: Option<String>,
        base: Option<String>,
        assistant: Option<String>,
        /// Provision only; do not run the assistant afterwards
        #[arg(long)]
        no_run: bool,
    },
    /// Remove worktrees whose branches are merged into the main branch
    Clean,
    /// Print the version
    Version,
}

fn main() {
    if let Err(err) = run() {
        eprintln!("ERROR: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    if let Commands::Version = cli.command {
        println!("{}", env!("CARGO_PKG_VERSION"));
        return Ok(());
    }

    let cfg = Config::load(&config::resolve_config_path())?;
    let cwd = env::current_dir()?;

    match cli.command {
        Commands::Start { task, base, assistant } => run_start(&cfg, &cwd, task, base, assistant),
        Commands::New {
            task,
            base,
            assistant,
            no_run,
        } => run_new(&cfg, &cwd, task, base, assistant, !no_run),
        Commands::Clean => cleanup::clean(&cfg, &cwd).map(|_| ()),
        Commands::Version => unreachable!("handled before config load"),
    }
}

/// `start` always runs the assistant and insists on an explicit,
/// validated assistant selection. A single argument that names an
/// allowed assistant is treated as the selection, not the task.
fn run_start(
    cfg: &Config,
    cwd: &Path,
    task: Option<String>,
    base: Option<String>,
    assistant: Option<String>,
) -> Result<()> {
    let mut task = task;
    let mut base = base;
    let mut assistant = assistant;

    let lone_assistant = match (&task, &base, &assistant) {
        (Some(first), None, None) => cfg.normalize_assistant(first),
        _ => None,
    };
    if let Some(id) = lone_assistant {
        assistant = Some(id);
        task = None;
    }

    let task = match task {
        Some(t) if !t.trim().is_empty() => t,
        Some(_) => return Err(WtxError::EmptyTask),
        None => {
            let t = prompt::required_text("Task description")?;
            if base.is_none() {
                base = Some(prompt::text_with_default(
                    "Base branch",
                    &cfg.default_base_branch,
                )?);
            }
            t
        }
    };

    let base = match base {
        Some(b) if !b.trim().is_empty() => b,
        _ => cfg.default_base_branch.clone(),
    };

    let assistant = match assistant.as_deref().and_then(|a| cfg.normalize_assistant(a)) {
        Some(id) => id,
        None if assistant.is_some() => {
            return Err(WtxError::InvalidAssistant(cfg.llm.allowed.join(", ")));
        }
        None => prompt::select_assistant(&cfg.llm.allowed, None)?,
    };

    let request = WorktreeRequest {
        task,
        base,
        assistant,
        run_task: true,
    };
    provision::create(cfg, &request, cwd).map(|_| ())
}

/// `new` fills gaps from configuration and only prompts when no task was
/// given at all.
fn run_new(
    cfg: &Config,
    cwd: &Path,
    task: Option<String>,
    base: Option<String>,
    assistant: Option<String>,
    run_task: bool,
) -> Result<()> {
    let mut base = base.unwrap_or_default();
    let mut assistant = assistant.unwrap_or_else(|| cfg.llm.default.clone());

    let task = match task {
        Some(t) if !t.trim().is_empty() => t,
        _ => {
            let t = prompt::required_text("Task description")?;
            base = prompt::text_with_default("Base branch", &cfg.default_base_branch)?;
            assistant = prompt::select_assistant(&cfg.llm.allowed, Some(&cfg.llm.default))?;
            t
        }
    };

    if base.trim().is_empty() {
        base = cfg.default_base_branch.clone();
    }
    let assistant = cfg
        .normalize_assistant(&assistant)
        .ok_or_else(|| WtxError::InvalidAssistant(cfg.llm.allowed.join(", ")))?;

    let request = WorktreeRequest {
        task,
        base,
        assistant,
        run_task,
    };
    provision::create(cfg, &request, cwd).map(|_| ())
}
