//! API Facade for the application.
//!
//! Glues together context creation and command execution.

use std::path::{Path, PathBuf};

use crate::adapters::{DialoguerPrompt, FilesystemScaffoldStore};
use crate::app::commands::{migrate, new};
use crate::app::{AppContext, config};

pub use crate::app::commands::migrate::{MigrateOptions, MigrateOutcome};
pub use crate::app::commands::new::{NewOptions, NewOutcome};
pub use crate::domain::AppError;

/// Create an `AppContext` rooted at `path`, loading configuration from it.
fn create_context(
    path: PathBuf,
    config_path: Option<&Path>,
) -> Result<AppContext<FilesystemScaffoldStore>, AppError> {
    let store = FilesystemScaffoldStore::new(path);
    let config = config::load_config(config_path, &store)?;
    Ok(AppContext::new(store, config))
}

/// Convert a template into a stack, app and test in the current directory.
pub fn migrate(options: MigrateOptions, config_path: Option<&Path>) -> Result<MigrateOutcome, AppError> {
    migrate_at(std::env::current_dir()?, options, config_path)
}

/// Convert a template, resolving relative paths against `path`.
pub fn migrate_at(
    path: impl Into<PathBuf>,
    options: MigrateOptions,
    config_path: Option<&Path>,
) -> Result<MigrateOutcome, AppError> {
    let ctx = create_context(path.into(), config_path)?;
    migrate::execute(&ctx, options)
}

/// Author a new stack, prompting for parameters on the terminal.
pub fn new_stack(options: NewOptions, config_path: Option<&Path>) -> Result<NewOutcome, AppError> {
    let ctx = create_context(std::env::current_dir()?, config_path)?;
    new::execute(&ctx, &DialoguerPrompt, options)
}
