//! Pure parse/validate for generator configuration (`cdkgen.toml`).

use crate::domain::{AppError, GeneratorConfig};

/// Parse and validate generator configuration from TOML content.
pub fn parse_config_content(content: &str) -> Result<GeneratorConfig, AppError> {
    let config: GeneratorConfig = toml::from_str(content)?;
    config.validate()?;
    Ok(config)
}
