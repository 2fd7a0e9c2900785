use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Result, WtxError};

/// True when `name` resolves to an executable on PATH.
pub fn command_exists(name: &str) -> bool {
    which::which(name).is_ok()
}

pub fn require_command(name: &str) -> Result<()> {
    if command_exists(name) {
        Ok(())
    } else {
        Err(WtxError::MissingTool(name.to_string()))
    }
}

/// Run a command capturing combined stdout+stderr. Returns the captured
/// text; non-zero exit yields an error that still carries the output.
pub fn run_capture(dir: Option<&Path>, name: &str, args: &[&str]) -> Result<String> {
    let mut cmd = Command::new(name);
    cmd.args(args);
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    let output = cmd.output()?;
    let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
    text.push_str(&String::from_utf8_lossy(&output.stderr));
    if output.status.success() {
        Ok(text)
    } else {
        Err(WtxError::CommandFailed(format!(
            "{} {}: {}",
            name,
            args.join(" "),
            text.trim()
        )))
    }
}

/// Run a command with stdin/stdout/stderr inherited from the terminal.
/// Used for anything interactive or whose progress the user should see.
pub fn run_stream(dir: Option<&Path>, name: &str, args: &[&str]) -> Result<()> {
    let mut cmd = Command::new(name);
    cmd.args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    let status = cmd.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(WtxError::CommandFailed(format!("{} {}", name, args.join(" "))))
    }
}

/// Run a command discarding all output; only the exit status matters.
pub fn run_quiet(dir: Option<&Path>, name: &str, args: &[&str]) -> Result<()> {
    let mut cmd = Command::new(name);
    cmd.args(args).stdout(Stdio::null()).stderr(Stdio::null());
    if let Some(dir) = dir {
        cmd.current_dir(dir);
    }
    let status = cmd.status()?;
    if status.success() {
        Ok(())
    } else {
        Err(WtxError::CommandFailed(format!("{} {}", name, args.join(" "))))
    }
}

/// Substitute `{placeholder}` variables verbatim into an argument template.
pub fn render_template(template: &[String], vars: &[(&str, &str)]) -> Vec<String> {
    template
        .iter()
        .map(|arg| {
            let mut rendered = arg.clone();
            for (key, value) in vars {
                rendered = rendered.replace(key, value);
            }
            rendered
        })
        .collect()
}
