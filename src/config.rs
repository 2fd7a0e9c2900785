use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, WtxError};

const CONFIG_ENV_VAR: &str = "WTX_CONFIG_PATH";
const CONFIG_FILE: &str = "config.json";
const CONFIG_HOME: &str = ".wtx/config.json";

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub main_branch: String,
    pub default_base_branch: String,
    pub worktrees_dir: String,
    pub copy_files: Vec<CopyFileConfig>,
    pub post_create_hooks: Vec<HookConfig>,
    pub llm: LlmConfig,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct CopyFileConfig {
    pub from: String,
    pub to: String,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HookConfig {
    pub name: String,
    pub cwd: String,
    pub command: Vec<String>,
    pub skip_if_missing: bool,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmConfig {
    pub default: String,
    pub allowed: Vec<String>,
    pub branch_name_prompt_template: String,
    pub commands: HashMap<String, LlmCommandConfig>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct LlmCommandConfig {
    pub branch_name_args_template: Vec<String>,
    pub task_run_args_template: Vec<String>,
}

impl Config {
    /// Load the configuration file, applying fallback defaults for
    /// fields that are blank in the file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            WtxError::Config(format!("cannot read {}: {}", path.display(), e))
        })?;
        let mut cfg: Config = serde_json::from_str(&contents)?;

        if cfg.default_base_branch.trim().is_empty() {
            cfg.default_base_branch = "develop".to_string();
        }
        if cfg.main_branch.trim().is_empty() {
            cfg.main_branch = cfg.default_base_branch.clone();
        }
        if cfg.worktrees_dir.trim().is_empty() {
            cfg.worktrees_dir = ".worktrees".to_string();
        }
        if cfg.llm.default.trim().is_empty() {
            cfg.llm.default = "codex".to_string();
        }
        Ok(cfg)
    }

    pub fn is_allowed_assistant(&self, id: &str) -> bool {
        self.llm.allowed.iter().any(|a| a.eq_ignore_ascii_case(id))
    }

    /// Lowercase and validate an assistant id against the allowed set.
    /// Returns `None` for blank or unknown ids.
    pub fn normalize_assistant(&self, id: &str) -> Option<String> {
        let v = id.trim().to_lowercase();
        if !v.is_empty() && self.is_allowed_assistant(&v) {
            Some(v)
        } else {
            None
        }
    }
}

/// Resolve the configuration file path: `WTX_CONFIG_PATH` wins, then
/// `./config.json`, then `./.wtx/config.json`, then a `config.json` next
/// to the executable. Falls back to `.wtx/config.json` so the load error
/// names a sensible location.
pub fn resolve_config_path() -> PathBuf {
    if let Ok(v) = env::var(CONFIG_ENV_VAR) {
        if !v.trim().is_empty() {
            return PathBuf::from(v);
        }
    }
    if Path::new(CONFIG_FILE).exists() {
        return PathBuf::from(CONFIG_FILE);
    }
    if Path::new(CONFIG_HOME).exists() {
        return PathBuf::from(CONFIG_HOME);
    }
    if let Ok(exe) = env::current_exe() {
        if let Some(dir) = exe.parent() {
            let p = dir.join(CONFIG_FILE);
            if p.exists() {
                return p;
            }
        }
    }
    PathBuf::from(CONFIG_HOME)
}
