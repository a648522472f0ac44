//! modforge CLI library

pub mod cli;
pub mod commands;
pub mod prompt;
pub mod summary;

pub use cli::{Cli, Commands};
pub use commands::{MakeCommand, PublishCommand, Workspace};
