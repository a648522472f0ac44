//! modforge CLI tool

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use modforge_cli_lib::{Cli, Commands, MakeCommand, PublishCommand, Workspace};

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();
    modforge::observability::init(cli.verbose);

    let workspace = Workspace::resolve(cli.root, cli.config.as_deref())?;

    match cli.command {
        Commands::Make {
            name,
            force,
            no_migration,
            api,
        } => MakeCommand::new(name, force, no_migration, api).execute(&workspace),
        Commands::Publish { force } => PublishCommand::new(force).execute(&workspace),
    }
}
