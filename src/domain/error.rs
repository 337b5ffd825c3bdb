use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Library-wide error type for cdkgen operations.
#[derive(Debug, Error)]
pub enum AppError {
    /// Underlying I/O failure.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// Configuration or environment issue.
    #[error("{0}")]
    Configuration(String),

    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The template cannot be decoded into the expected section shape.
    #[error("Malformed template ({context}): {reason}")]
    MalformedDocument { context: String, reason: String },

    /// An intrinsic expression names a parameter or resource that is not declared.
    #[error("'{owner}' references '{target}', which is not a declared parameter or resource")]
    UnresolvedReference { owner: String, target: String },

    /// Resources reference each other in a loop.
    #[error("Circular reference between resources: {cycle}")]
    ReferenceCycle { cycle: String },

    /// A generated file could not be persisted.
    #[error("Failed to write {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },

    /// A destination path exists when it must not.
    #[error("{} already exists", .0.display())]
    PathExists(PathBuf),

    /// A required input path is missing.
    #[error("{} does not exist", .0.display())]
    PathNotFound(PathBuf),

    /// Interactive prompt failed for a reason other than cancellation.
    #[error("Prompt failed: {0}")]
    Prompt(String),
}

impl AppError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        AppError::Configuration(message.into())
    }

    pub(crate) fn malformed<C: Into<String>, R: Into<String>>(context: C, reason: R) -> Self {
        AppError::MalformedDocument { context: context.into(), reason: reason.into() }
    }

    pub(crate) fn unresolved<O: Into<String>, T: Into<String>>(owner: O, target: T) -> Self {
        AppError::UnresolvedReference { owner: owner.into(), target: target.into() }
    }

    /// Provide an `io::ErrorKind`-like view for callers mapping errors to exit behaviour.
    pub fn kind(&self) -> io::ErrorKind {
        match self {
            AppError::Io(err) => err.kind(),
            AppError::Configuration(_)
            | AppError::TomlParse(_)
            | AppError::MalformedDocument { .. }
            | AppError::UnresolvedReference { .. }
            | AppError::ReferenceCycle { .. } => io::ErrorKind::InvalidInput,
            AppError::PathNotFound(_) => io::ErrorKind::NotFound,
            AppError::PathExists(_) => io::ErrorKind::AlreadyExists,
            AppError::Write { .. } | AppError::Prompt(_) => io::ErrorKind::Other,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unresolved_reference_names_owner_and_target() {
        let err = AppError::unresolved("MyBucket", "doesNotExist");
        let message = err.to_string();
        assert!(message.contains("MyBucket"));
        assert!(message.contains("doesNotExist"));
        assert_eq!(err.kind(), io::ErrorKind::InvalidInput);
    }

    #[test]
    fn path_exists_maps_to_already_exists() {
        let err = AppError::PathExists(PathBuf::from("lib/my-stack.ts"));
        assert_eq!(err.to_string(), "lib/my-stack.ts already exists");
        assert_eq!(err.kind(), io::ErrorKind::AlreadyExists);
    }
}
