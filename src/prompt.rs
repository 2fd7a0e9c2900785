use dialoguer::{Input, Select};

use crate::error::{Result, WtxError};

/// Ask for a non-empty line of text.
pub fn required_text(label: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(label)
        .validate_with(|input: &String| {
            if input.trim().is_empty() {
                Err("a value is required")
            } else {
                Ok(())
            }
        })
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Ask for a line of text, falling back to `default` on empty input.
pub fn text_with_default(label: &str, default: &str) -> Result<String> {
    let value: String = Input::new()
        .with_prompt(label)
        .default(default.to_string())
        .interact_text()?;
    Ok(value.trim().to_string())
}

/// Pick an assistant from the allowed set.
pub fn select_assistant(allowed: &[String], default: Option<&str>) -> Result<String> {
    if allowed.is_empty() {
        return Err(WtxError::InvalidAssistant("<none configured>".to_string()));
    }
    let initial = default
        .and_then(|d| allowed.iter().position(|a| a.eq_ignore_ascii_case(d)))
        .unwrap_or(0);
    let index = Select::new()
        .with_prompt("Select an AI assistant")
        .items(allowed)
        .default(initial)
        .interact()?;
    Ok(allowed[index].to_lowercase())
}
