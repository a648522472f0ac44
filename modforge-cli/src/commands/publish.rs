//! `modforge publish`: copy the bundled stubs and a default configuration into the project

use std::process::ExitCode;

use anyhow::{Context, Result};
use console::style;
use modforge::fs::LocalFs;
use modforge::policy::{Confirm, DeclineAll};
use modforge::publish::publish;
use modforge::stubs::StubCatalog;
use modforge::GenerationReport;

use super::{exit_code, Workspace};
use crate::prompt::DialoguerConfirm;
use crate::summary;

/// Arguments of `modforge publish`
#[derive(Debug, Clone, Copy)]
pub struct PublishCommand {
    force: bool,
}

impl PublishCommand {
    /// Create the command
    pub const fn new(force: bool) -> Self {
        Self { force }
    }

    /// Run the command and print the report
    ///
    /// # Errors
    ///
    /// Returns an error if the default configuration cannot be rendered.
    pub fn execute(&self, workspace: &Workspace) -> Result<ExitCode> {
        println!(
            "\n{} {}",
            style("Publishing stubs to").cyan().bold(),
            style(workspace.config.published_stubs_dir(&workspace.root).display()).green()
        );

        let report = if self.force || console::user_attended() {
            self.run(workspace, &mut DialoguerConfirm::new(indicatif::ProgressBar::hidden()))?
        } else {
            tracing::warn!("no terminal attached; existing files will be kept");
            self.run(workspace, &mut DeclineAll)?
        };

        println!();
        summary::print_artifacts(&report);
        if report.is_success() {
            println!(
                "\n{} Edit the stubs and {} to customize generated modules",
                style("✨").green().bold(),
                style(modforge::config::CONFIG_FILE_NAME).yellow()
            );
        }

        Ok(exit_code(&report))
    }

    /// Publish into `workspace`
    ///
    /// # Errors
    ///
    /// Returns an error if the default configuration cannot be rendered.
    pub fn run(&self, workspace: &Workspace, confirm: &mut dyn Confirm) -> Result<GenerationReport> {
        publish(
            &LocalFs,
            &workspace.config,
            &workspace.root,
            &StubCatalog::bundled(),
            self.force,
            confirm,
        )
        .context("Failed to publish stubs")
    }
}
