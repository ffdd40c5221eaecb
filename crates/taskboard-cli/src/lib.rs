//! Taskboard CLI - command-line front end
//!
//! Thin layer over the entity model, storage and reports: parse arguments,
//! resolve references, apply one mutation, save, print.

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod app;
pub mod cli;
pub mod resolve;

use std::io::Write;

use anyhow::Result;
use taskboard_storage::{StorageConfig, StorageManager};

pub use app::App;
pub use cli::{Cli, Command};
pub use resolve::ResolveError;

/// Resolve storage config: `--data-file` / env, then `--config`, then defaults
///
/// # Errors
/// Returns an error if the config file cannot be read or parsed
pub fn storage_config(cli: &Cli) -> Result<StorageConfig> {
    let config = match &cli.config {
        Some(path) => StorageConfig::load(path)?,
        None => StorageConfig::default(),
    };
    Ok(match &cli.data_file {
        Some(path) => config.with_data_file(path),
        None => config,
    })
}

/// Run parsed command line, writing output to `out`
///
/// # Errors
/// Returns the first failure of config loading or the command itself
pub fn run<W: Write>(cli: Cli, out: W) -> Result<()> {
    let config = storage_config(&cli)?;
    tracing::debug!(data_file = %config.data_file.display(), "using document");
    let storage = StorageManager::from_config(&config);
    let mut app = App::new(storage, out).with_project(cli.project);
    app.dispatch(cli.command)
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
