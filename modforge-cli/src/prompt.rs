//! Interactive overwrite confirmation

use std::io;

use dialoguer::{theme::ColorfulTheme, Confirm as ConfirmPrompt};
use indicatif::ProgressBar;
use modforge::policy::Confirm;

/// Terminal confirmation that hides the progress bar while asking
#[derive(Debug, Clone)]
pub struct DialoguerConfirm {
    progress: ProgressBar,
}

impl DialoguerConfirm {
    /// Prompt on the terminal, suspending `progress` while waiting
    pub const fn new(progress: ProgressBar) -> Self {
        Self { progress }
    }
}

impl Confirm for DialoguerConfirm {
    fn confirm(&mut self, prompt: &str) -> io::Result<bool> {
        self.progress.suspend(|| {
            ConfirmPrompt::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .default(false)
                .interact()
                .map_err(|e| io::Error::other(e.to_string()))
        })
    }
}
