//! Generator configuration domain models.

use serde::Deserialize;

use crate::domain::AppError;

/// Configuration loaded from `cdkgen.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Formatting of emitted files.
    #[serde(default)]
    pub output: OutputConfig,
    /// Module paths the generated code imports from.
    #[serde(default)]
    pub libraries: LibraryConfig,
}

impl GeneratorConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        self.output.validate()?;
        self.libraries.validate()?;
        Ok(())
    }
}

/// Formatting of emitted files.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputConfig {
    /// Spaces per indentation level.
    #[serde(default = "default_indent")]
    pub indent: usize,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self { indent: default_indent() }
    }
}

impl OutputConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        if !(1..=8).contains(&self.indent) {
            return Err(AppError::config_error(format!(
                "output.indent must be between 1 and 8, got {}",
                self.indent
            )));
        }
        Ok(())
    }
}

/// Module paths the generated code imports from.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibraryConfig {
    /// CDK core module (`App`, `Fn`, `Lazy`, `CfnOutput`).
    #[serde(default = "default_cdk_core")]
    pub cdk_core: String,
    /// CDK assertion module used by the generated snapshot test.
    #[serde(default = "default_cdk_assert")]
    pub cdk_assert: String,
    /// Guardian constructs module (`GuStack`, parameters).
    #[serde(default = "default_guardian_core")]
    pub guardian_core: String,
    /// Prefix of per-service CDK modules, e.g. `@aws-cdk/aws-` + `s3`.
    #[serde(default = "default_aws_module_prefix")]
    pub aws_module_prefix: String,
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            cdk_core: default_cdk_core(),
            cdk_assert: default_cdk_assert(),
            guardian_core: default_guardian_core(),
            aws_module_prefix: default_aws_module_prefix(),
        }
    }
}

impl LibraryConfig {
    pub fn validate(&self) -> Result<(), AppError> {
        let fields = [
            ("libraries.cdk_core", &self.cdk_core),
            ("libraries.cdk_assert", &self.cdk_assert),
            ("libraries.guardian_core", &self.guardian_core),
            ("libraries.aws_module_prefix", &self.aws_module_prefix),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(AppError::config_error(format!("{name} must not be empty")));
            }
        }
        Ok(())
    }

    /// Module that exports the CDK classes for one AWS service.
    pub fn service_module(&self, service: &str) -> String {
        format!("{}{}", self.aws_module_prefix, service)
    }
}

fn default_indent() -> usize {
    2
}

fn default_cdk_core() -> String {
    "@aws-cdk/core".to_string()
}

fn default_cdk_assert() -> String {
    "@aws-cdk/assert".to_string()
}

fn default_guardian_core() -> String {
    "@guardian/cdk/lib/constructs/core".to_string()
}

fn default_aws_module_prefix() -> String {
    "@aws-cdk/aws-".to_string()
}
