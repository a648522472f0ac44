//! `modforge make`: generate a CRUD module
//!
//! # Example
//!
//! ```bash
//! modforge make Billing/Invoice --api
//! ```

use std::collections::BTreeSet;
use std::process::ExitCode;

use anyhow::Result;
use console::style;
use indicatif::ProgressBar;
use modforge::fs::LocalFs;
use modforge::policy::{Confirm, DeclineAll};
use modforge::{GenerateOptions, GenerationReport, Generator, NamingTable, SkipFlag};

use super::{exit_code, progress_bar, Workspace};
use crate::prompt::DialoguerConfirm;
use crate::summary;

/// Arguments of `modforge make`
#[derive(Debug, Clone)]
pub struct MakeCommand {
    name: String,
    force: bool,
    no_migration: bool,
    api: bool,
}

impl MakeCommand {
    /// Create the command
    pub const fn new(name: String, force: bool, no_migration: bool, api: bool) -> Self {
        Self {
            name,
            force,
            no_migration,
            api,
        }
    }

    /// Generator options for these flags
    #[must_use]
    pub fn options(&self) -> GenerateOptions {
        GenerateOptions {
            force: self.force,
            api: self.api,
            skip: if self.no_migration {
                [SkipFlag::NoMigration].into()
            } else {
                BTreeSet::new()
            },
        }
    }

    /// Run the command and print the report
    ///
    /// # Errors
    ///
    /// Returns an error if the module name is invalid. Artifact failures are
    /// reported through the exit code.
    pub fn execute(&self, workspace: &Workspace) -> Result<ExitCode> {
        let naming = NamingTable::derive(&self.name)?;

        println!(
            "\n{} {} {}",
            style("Generating CRUD module").cyan().bold(),
            style(&naming.module_name).green().bold(),
            style("...").cyan().bold()
        );

        let generator = Generator::new(&LocalFs, &workspace.config, workspace.root.clone());
        let progress = progress_bar(generator.manifest().len())?;

        let report = if self.force || console::user_attended() {
            let mut confirm = DialoguerConfirm::new(progress.clone());
            self.run(&generator, &naming, &mut confirm, &progress)
        } else {
            tracing::warn!("no terminal attached; existing files will be kept");
            self.run(&generator, &naming, &mut DeclineAll, &progress)
        };
        progress.finish_and_clear();

        self.print_summary(&naming, &report);
        Ok(exit_code(&report))
    }

    /// Generate the module, advancing `progress` once per manifest entry
    pub fn run(
        &self,
        generator: &Generator<'_>,
        naming: &NamingTable,
        confirm: &mut dyn Confirm,
        progress: &ProgressBar,
    ) -> GenerationReport {
        generator.generate_with(naming, &self.options(), confirm, |component, _| {
            progress.set_message(component.key);
            progress.inc(1);
        })
    }

    fn print_summary(&self, naming: &NamingTable, report: &GenerationReport) {
        println!();
        summary::print_artifacts(report);

        if !report.is_success() {
            println!(
                "\n{} {} artifact(s) could not be generated",
                style("✗").red().bold(),
                report.failures().count()
            );
            return;
        }

        println!(
            "\n{} Successfully created {} CRUD module!",
            style("✨").green().bold(),
            style(&naming.module_name).green().bold()
        );

        println!("\n{}", style("Next steps:").cyan().bold());
        for step in summary::next_steps(self.no_migration) {
            println!("  • {step}");
        }

        println!("\n{}", style("Example route:").cyan().bold());
        println!("  {}", style(summary::route_example(naming)).yellow());
    }
}
