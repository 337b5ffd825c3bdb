//! Generator configuration loading.

use std::path::Path;

use crate::domain::config::{self, GeneratorConfig};
use crate::domain::AppError;
use crate::ports::ScaffoldStore;

/// Load generator configuration.
///
/// An explicit path must exist. Without one, `cdkgen.toml` in the store root
/// is used when present, and defaults otherwise.
pub fn load_config<S: ScaffoldStore + ?Sized>(
    explicit: Option<&Path>,
    store: &S,
) -> Result<GeneratorConfig, AppError> {
    let path = match explicit {
        Some(path) => {
            if !store.exists(path) {
                return Err(AppError::PathNotFound(path.to_path_buf()));
            }
            path.to_path_buf()
        }
        None => {
            let default = config::paths::config(Path::new(""));
            if !store.exists(&default) {
                tracing::debug!("no {} found, using defaults", config::paths::CONFIG_FILE);
                return Ok(GeneratorConfig::default());
            }
            default
        }
    };

    let content = store.read_file(&path)?;
    let parsed = config::parse_config_content(&content)?;
    tracing::debug!(path = %path.display(), "loaded configuration");
    Ok(parsed)
}
