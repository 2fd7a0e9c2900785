use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WtxError {
    #[error("required command not found: {0}")]
    MissingTool(String),

    #[error("not inside a git repository")]
    NotInGitRepo,

    #[error("no description provided")]
    EmptyTask,

    #[error("empty branch name after sanitize")]
    EmptyBranchName,

    #[error("git {command} failed: {output}")]
    Git { command: String, output: String },

    #[error("command failed: {0}")]
    CommandFailed(String),

    #[error("hook directory not found: {0}")]
    HookDirMissing(PathBuf),

    #[error("invalid AI selection (expected one of: {0})")]
    InvalidAssistant(String),

    #[error("missing LLM command config for: {0}")]
    MissingAssistantConfig(String),

    #[error("empty taskRunArgsTemplate for {0}")]
    EmptyTaskTemplate(String),

    #[error("config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("prompt error: {0}")]
    Prompt(#[from] dialoguer::Error),
}

pub type Result<T> = std::result::Result<T, WtxError>;
