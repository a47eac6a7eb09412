//! CLI argument parsing module.

mod args;
mod commands;
mod shell;

pub use args::Cli;
pub use commands::execute;
