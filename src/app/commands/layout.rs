//! Name and destination checks shared by `migrate` and `new`.

use std::path::Path;

use crate::domain::naming::{is_identifier, is_reserved_word, to_class_name};
use crate::domain::{AppError, ScaffoldPaths};
use crate::ports::ScaffoldStore;

/// Upper-camel class name for `stack`, rejected when it is not a usable TypeScript class name.
pub fn stack_class_name(stack: &str) -> Result<String, AppError> {
    let class = to_class_name(stack);
    if !is_identifier(&class) || is_reserved_word(&class) {
        return Err(AppError::config_error(format!(
            "Stack name '{stack}' does not give a valid class name (got '{class}')"
        )));
    }
    Ok(class)
}

/// The CDK directory must exist and none of the target files may.
pub fn validate<S: ScaffoldStore + ?Sized>(
    store: &S,
    cdk_dir: &Path,
    paths: &ScaffoldPaths,
) -> Result<(), AppError> {
    if !store.is_dir(cdk_dir) {
        return Err(AppError::PathNotFound(cdk_dir.to_path_buf()));
    }
    for path in paths.all() {
        let target = cdk_dir.join(path);
        if store.exists(&target) {
            return Err(AppError::PathExists(target));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::MemoryScaffoldStore;

    #[test]
    fn stack_names_become_class_names() {
        assert_eq!(stack_class_name("my-service").unwrap(), "MyService");
        assert_eq!(stack_class_name("api_v2").unwrap(), "ApiV2");
    }

    #[test]
    fn stack_name_must_give_an_identifier() {
        for stack in ["123-api", "", "--"] {
            let err = stack_class_name(stack).unwrap_err();
            assert!(matches!(err, AppError::Configuration(_)), "{stack}");
        }
    }

    #[test]
    fn missing_cdk_dir() {
        let store = MemoryScaffoldStore::new();
        let paths = ScaffoldPaths::new("App", "Stack", false);
        let err = validate(&store, Path::new("cdk"), &paths).unwrap_err();
        assert!(matches!(err, AppError::PathNotFound(ref p) if p == Path::new("cdk")));
    }

    #[test]
    fn existing_target_is_named() {
        let store = MemoryScaffoldStore::new();
        store.insert("cdk/lib/stack.test.ts", "");
        let paths = ScaffoldPaths::new("App", "Stack", false);

        let err = validate(&store, Path::new("cdk"), &paths).unwrap_err();

        assert!(matches!(err, AppError::PathExists(ref p) if p == Path::new("cdk/lib/stack.test.ts")));
    }

    #[test]
    fn multi_app_checks_nested_paths() {
        let store = MemoryScaffoldStore::new();
        store.add_dir("cdk");
        store.insert("cdk/lib/stack.ts", "");
        let paths = ScaffoldPaths::new("App", "Stack", true);

        assert!(validate(&store, Path::new("cdk"), &paths).is_ok());
    }
}
