//! User confirmation prompts for destructive operations

use dialoguer::Confirm;

use crate::error::{OgoError, Result};

/// Ask the user to confirm an action
///
/// `yes` skips the prompt. Batch mode never prompts, so without `yes` the
/// action is refused.
pub fn confirm_action(prompt: &str, yes: bool, batch: bool) -> Result<bool> {
    if yes {
        return Ok(true);
    }
    if batch {
        return Err(OgoError::Config(
            "refusing to prompt in batch mode, pass --yes to confirm".to_string(),
        ));
    }

    Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| OgoError::Io(e.to_string()))
}
