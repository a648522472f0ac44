//! CLI command implementations

pub mod make;
pub mod publish;

pub use make::MakeCommand;
pub use publish::PublishCommand;

use std::path::{Path, PathBuf};
use std::process::ExitCode;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use modforge::{GenerationReport, ModforgeConfig};

/// Project root and its loaded configuration
#[derive(Debug, Clone)]
pub struct Workspace {
    /// Directory every output path is resolved under
    pub root: PathBuf,
    /// Effective configuration
    pub config: ModforgeConfig,
}

impl Workspace {
    /// Resolve the project root and load its configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory is unavailable or the
    /// configuration cannot be loaded.
    pub fn resolve(root: Option<PathBuf>, config_file: Option<&Path>) -> Result<Self> {
        let root = match root {
            Some(root) => root,
            None => std::env::current_dir().context("Failed to get current directory")?,
        };

        let config = match config_file {
            Some(path) => ModforgeConfig::load_from(path)
                .with_context(|| format!("Failed to load configuration from {}", path.display()))?,
            None => ModforgeConfig::load_for_project(&root)
                .with_context(|| format!("Failed to load configuration for {}", root.display()))?,
        };
        tracing::debug!(root = %root.display(), "workspace resolved");

        Ok(Self { root, config })
    }
}

/// Progress bar advancing once per processed item
///
/// # Errors
///
/// Returns an error if the progress template is invalid.
pub fn progress_bar(len: usize) -> Result<ProgressBar> {
    let progress = ProgressBar::new(u64::try_from(len).unwrap_or(u64::MAX));
    progress.set_style(
        ProgressStyle::with_template("{spinner:.green} [{bar:30.cyan/blue}] {pos}/{len} {msg}")
            .context("Failed to set progress style")?
            .progress_chars("=> "),
    );
    Ok(progress)
}

/// Process exit status for a finished run
#[must_use]
pub fn exit_code(report: &GenerationReport) -> ExitCode {
    if report.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
