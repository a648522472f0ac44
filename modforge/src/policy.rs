//! Overwrite policy
//!
//! Decides whether an existing artifact may be replaced. With `force` the
//! answer is always yes and nothing is asked; otherwise the question goes to
//! an injected [`Confirm`] capability.

use std::io;

use crate::error::{ModforgeError, Result};

/// Blocking yes/no confirmation
pub trait Confirm {
    /// Ask `prompt` and wait for an answer
    ///
    /// # Errors
    ///
    /// Returns an error if no answer can be obtained (closed terminal, etc.).
    fn confirm(&mut self, prompt: &str) -> io::Result<bool>;
}

/// Confirmation that always declines
///
/// For non-interactive runs without `force`: existing files are kept.
#[derive(Debug, Clone, Copy, Default)]
pub struct DeclineAll;

impl Confirm for DeclineAll {
    fn confirm(&mut self, _prompt: &str) -> io::Result<bool> {
        Ok(false)
    }
}

/// Forced or interactive overwrite decision
pub struct OverwritePolicy<'a> {
    force: bool,
    confirm: &'a mut dyn Confirm,
}

impl std::fmt::Debug for OverwritePolicy<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OverwritePolicy")
            .field("force", &self.force)
            .finish_non_exhaustive()
    }
}

impl<'a> OverwritePolicy<'a> {
    /// Create a policy
    pub fn new(force: bool, confirm: &'a mut dyn Confirm) -> Self {
        Self { force, confirm }
    }

    /// Whether the existing artifact described by `description` may be replaced
    ///
    /// Call exactly once per conflicting artifact.
    ///
    /// # Errors
    ///
    /// Returns [`ModforgeError::Prompt`] if the confirmation capability fails.
    pub fn should_overwrite(&mut self, description: &str) -> Result<bool> {
        if self.force {
            tracing::debug!(description, "overwrite forced");
            return Ok(true);
        }

        let prompt = overwrite_prompt(description);
        let answer = self
            .confirm
            .confirm(&prompt)
            .map_err(|source| ModforgeError::Prompt { source })?;
        tracing::debug!(description, answer, "overwrite confirmation");
        Ok(answer)
    }
}

/// The question shown for an existing artifact
#[must_use]
pub fn overwrite_prompt(description: &str) -> String {
    format!("The {description} already exists. Do you want to replace it?")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::ScriptedConfirm;

    #[test]
    fn test_force_never_prompts() {
        let mut confirm = ScriptedConfirm::new([]);
        let mut policy = OverwritePolicy::new(true, &mut confirm);

        assert!(policy.should_overwrite("OrderController").unwrap());
        assert!(confirm.prompts().is_empty());
    }

    #[test]
    fn test_interactive_delegates_with_prompt_text() {
        let mut confirm = ScriptedConfirm::new([false]);
        let mut policy = OverwritePolicy::new(false, &mut confirm);

        assert!(!policy.should_overwrite("OrderController").unwrap());
        assert_eq!(
            confirm.prompts(),
            ["The OrderController already exists. Do you want to replace it?"]
        );
    }

    #[test]
    fn test_prompt_failure_is_reported() {
        let mut confirm = ScriptedConfirm::new([]);
        let mut policy = OverwritePolicy::new(false, &mut confirm);

        let err = policy.should_overwrite("OrderController").unwrap_err();
        assert!(matches!(err, ModforgeError::Prompt { .. }));
    }

    #[test]
    fn test_decline_all() {
        let mut decline = DeclineAll;
        let mut policy = OverwritePolicy::new(false, &mut decline);
        assert!(!policy.should_overwrite("Order").unwrap());
    }
}
