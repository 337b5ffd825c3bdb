//! `cdkgen migrate`: convert an existing template into a stack.

use std::path::{Path, PathBuf};

use crate::app::AppContext;
use crate::app::commands::layout;
use crate::domain::mapping::MappingWarning;
use crate::domain::template::{self, DocumentFormat};
use crate::domain::{AppError, Provenance, ScaffoldPaths, StackScaffold};
use crate::ports::ScaffoldStore;

#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// Template to convert.
    pub template: PathBuf,
    /// CDK directory to write into.
    pub output: PathBuf,
    /// Stack class name; defaults to the template file stem.
    pub stack: Option<String>,
    /// App name; defaults to the stack name.
    pub app: Option<String>,
    pub multi_app: bool,
}

#[derive(Debug, Clone)]
pub struct MigrateOutcome {
    pub stack_name: String,
    pub app_name: String,
    pub written: Vec<PathBuf>,
    pub warnings: Vec<MappingWarning>,
}

pub fn execute<S: ScaffoldStore>(
    ctx: &AppContext<S>,
    options: MigrateOptions,
) -> Result<MigrateOutcome, AppError> {
    let store = ctx.store();
    if !store.exists(&options.template) {
        return Err(AppError::PathNotFound(options.template));
    }

    let stack_name = layout::stack_class_name(&match options.stack {
        Some(stack) => stack,
        None => file_stem(&options.template)?,
    })?;
    let app_name = options.app.unwrap_or_else(|| stack_name.clone());
    layout::validate(
        store,
        &options.output,
        &ScaffoldPaths::new(&app_name, &stack_name, options.multi_app),
    )?;

    let raw = store.read_file(&options.template)?;
    let template = template::parse(&raw, DocumentFormat::from_path(&options.template))?;

    let scaffold = StackScaffold {
        stack_name,
        app_name,
        template,
        provenance: Provenance::Migrated { template: file_name(&options.template) },
        multi_app: options.multi_app,
    };

    let generated = scaffold.generate(ctx.config())?;
    let written = generated.save(&options.output, store)?;

    Ok(MigrateOutcome {
        stack_name: scaffold.stack_name,
        app_name: scaffold.app_name,
        written,
        warnings: generated.warnings,
    })
}

fn file_stem(path: &Path) -> Result<String, AppError> {
    path.file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .ok_or_else(|| AppError::config_error(format!("Cannot derive a stack name from {}", path.display())))
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::GeneratorConfig;
    use crate::testing::MemoryScaffoldStore;

    fn context(store: MemoryScaffoldStore) -> AppContext<MemoryScaffoldStore> {
        store.add_dir("cdk");
        AppContext::new(store, GeneratorConfig::default())
    }

    fn options(template: &str) -> MigrateOptions {
        MigrateOptions {
            template: PathBuf::from(template),
            output: PathBuf::from("cdk"),
            stack: None,
            app: None,
            multi_app: false,
        }
    }

    #[test]
    fn stack_name_defaults_to_template_stem() {
        let store = MemoryScaffoldStore::new();
        store.insert("my-service.yaml", "Resources:\n  Topic:\n    Type: AWS::SNS::Topic\n");
        let ctx = context(store.clone());

        let outcome = execute(&ctx, options("my-service.yaml")).unwrap();

        assert_eq!(outcome.stack_name, "MyService");
        assert_eq!(outcome.app_name, "MyService");
        assert_eq!(
            store.paths(),
            [
                PathBuf::from("cdk/bin/my-service.ts"),
                PathBuf::from("cdk/lib/my-service.test.ts"),
                PathBuf::from("cdk/lib/my-service.ts"),
                PathBuf::from("my-service.yaml"),
            ]
        );
        let stack = store.read(Path::new("cdk/lib/my-service.ts")).unwrap();
        assert!(stack.starts_with("// This file was autogenerated from my-service.yaml using cdkgen\n"));
        assert!(stack.contains("const topic = new CfnTopic(this, \"Topic\", {});"));
    }

    #[test]
    fn unresolved_reference_writes_nothing() {
        let store = MemoryScaffoldStore::new();
        store.insert(
            "t.json",
            r#"{"Resources": {"B": {"Type": "AWS::S3::Bucket", "Properties": {"BucketName": {"Ref": "Nope"}}}}}"#,
        );
        let ctx = context(store.clone());

        let err = execute(&ctx, options("t.json")).unwrap_err();

        assert!(matches!(err, AppError::UnresolvedReference { ref owner, ref target } if owner == "B" && target == "Nope"));
        assert_eq!(store.paths(), [PathBuf::from("t.json")]);
    }

    #[test]
    fn missing_template() {
        let ctx = context(MemoryScaffoldStore::new());
        let err = execute(&ctx, options("absent.yaml")).unwrap_err();
        assert!(matches!(err, AppError::PathNotFound(_)));
    }

    #[test]
    fn existing_target_is_refused_before_writing() {
        let store = MemoryScaffoldStore::new();
        store.insert("stack.json", r#"{"Resources": {}}"#);
        store.insert("cdk/lib/stack.test.ts", "// keep");
        let ctx = context(store.clone());

        let err = execute(&ctx, options("stack.json")).unwrap_err();

        assert!(matches!(err, AppError::PathExists(_)));
        assert!(store.read(Path::new("cdk/bin/stack.ts")).is_none());
    }

    #[test]
    fn explicit_names_and_multi_app() {
        let store = MemoryScaffoldStore::new();
        store.insert("template.json", r#"{"Resources": {}}"#);
        let ctx = context(store.clone());

        let outcome = execute(
            &ctx,
            MigrateOptions {
                stack: Some("api-stack".into()),
                app: Some("Billing".into()),
                multi_app: true,
                ..options("template.json")
            },
        )
        .unwrap();

        assert_eq!(outcome.stack_name, "ApiStack");
        assert!(store.read(Path::new("cdk/lib/billing/api-stack.ts")).is_some());
        assert!(
            store
                .read(Path::new("cdk/bin/billing.ts"))
                .unwrap()
                .contains("import { ApiStack } from \"../lib/billing/api-stack\";")
        );
    }
}
