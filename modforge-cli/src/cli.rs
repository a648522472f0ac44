//! Command-line arguments

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Parsed command line
#[derive(Debug, Parser)]
#[command(name = "modforge")]
#[command(version)]
#[command(about = "Generate CRUD modules from a single module name", long_about = None)]
pub struct Cli {
    /// Project root (defaults to the current directory)
    #[arg(long, global = true)]
    pub root: Option<PathBuf>,

    /// Configuration file (defaults to `<root>/modforge.toml`)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Generate a complete CRUD module
    Make {
        /// Module name, optionally namespaced (e.g. `Order`, `Billing/Invoice`)
        name: String,
        /// Overwrite existing files without confirmation
        #[arg(long)]
        force: bool,
        /// Skip migration generation
        #[arg(long)]
        no_migration: bool,
        /// Generate an API-focused controller
        #[arg(long)]
        api: bool,
    },
    /// Publish the bundled stubs and a default modforge.toml for customization
    Publish {
        /// Overwrite existing files without confirmation
        #[arg(long)]
        force: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_is_well_formed() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_make_flags() {
        let cli = Cli::try_parse_from([
            "modforge",
            "make",
            "Billing/Invoice",
            "--force",
            "--no-migration",
            "--api",
        ])
        .unwrap();

        match cli.command {
            Commands::Make {
                name,
                force,
                no_migration,
                api,
            } => {
                assert_eq!(name, "Billing/Invoice");
                assert!(force && no_migration && api);
            }
            Commands::Publish { .. } => panic!("expected make"),
        }
    }

    #[test]
    fn test_global_options_after_subcommand() {
        let cli = Cli::try_parse_from(["modforge", "publish", "--root", "/tmp/app", "-v"]).unwrap();
        assert_eq!(cli.root, Some(PathBuf::from("/tmp/app")));
        assert!(cli.verbose);
    }

    #[test]
    fn test_make_requires_name() {
        assert!(Cli::try_parse_from(["modforge", "make"]).is_err());
    }
}
