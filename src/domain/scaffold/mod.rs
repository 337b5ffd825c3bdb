//! Composes the mapper and the emitter into the app, stack and test files.

mod builders;

use std::path::{Path, PathBuf};

pub use builders::{build_app, build_stack, build_test};

use crate::domain::AppError;
use crate::domain::code_maker::{CodeMaker, EmittedFile};
use crate::domain::config::{GeneratorConfig, LibraryConfig};
use crate::domain::imports::ImportRegistry;
use crate::domain::mapping::{MappingWarning, map};
use crate::domain::naming::to_file_safe_name;
use crate::domain::template::Template;
use crate::ports::ScaffoldStore;

const TOOL: &str = "cdkgen";
const STARTING_POINT: &str =
    "// It is a starting point for migration to CDK *only*. Please check the output carefully before deploying";

/// Where the generated code came from. Only the header comments differ.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Provenance {
    /// Converted from the named template file.
    Migrated { template: String },
    /// Authored from scratch.
    New,
}

/// Destination paths, relative to the CDK directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldPaths {
    pub app: PathBuf,
    pub stack: PathBuf,
    pub test: PathBuf,
}

impl ScaffoldPaths {
    /// `bin/<app>.ts`, `lib/[<app>/]<stack>.ts` and the matching `.test.ts`.
    pub fn new(app_name: &str, stack_name: &str, multi_app: bool) -> Self {
        let app = to_file_safe_name(app_name);
        let stack = to_file_safe_name(stack_name);
        let lib = if multi_app { Path::new("lib").join(&app) } else { PathBuf::from("lib") };
        Self {
            app: Path::new("bin").join(format!("{app}.ts")),
            stack: lib.join(format!("{stack}.ts")),
            test: lib.join(format!("{stack}.test.ts")),
        }
    }

    pub fn all(&self) -> [&Path; 3] {
        [&self.app, &self.stack, &self.test]
    }
}

/// Everything needed to generate one stack with its app and test.
#[derive(Debug, Clone)]
pub struct StackScaffold {
    /// Class name of the stack.
    pub stack_name: String,
    pub app_name: String,
    pub template: Template,
    pub provenance: Provenance,
    pub multi_app: bool,
}

/// Generated files and the non-fatal mapping findings.
#[derive(Debug, Clone)]
pub struct GeneratedScaffold {
    pub files: Vec<EmittedFile>,
    pub warnings: Vec<MappingWarning>,
}

impl GeneratedScaffold {
    /// Persist every file under `directory`, in app, stack, test order.
    ///
    /// Stops at the first failure; files written before it stay on disk.
    pub fn save<S: ScaffoldStore + ?Sized>(
        &self,
        directory: &Path,
        store: &S,
    ) -> Result<Vec<PathBuf>, AppError> {
        self.files.iter().map(|file| file.save(directory, store)).collect()
    }
}

impl StackScaffold {
    pub fn paths(&self) -> ScaffoldPaths {
        ScaffoldPaths::new(&self.app_name, &self.stack_name, self.multi_app)
    }

    /// Map the template and emit the three files. Nothing is written.
    pub fn generate(&self, config: &GeneratorConfig) -> Result<GeneratedScaffold, AppError> {
        let libraries = &config.libraries;
        let stack = map(&self.template, stack_imports(libraries), libraries)?;
        let paths = self.paths();

        let mut code = CodeMaker::new(config.output.indent);

        code.open_file(&paths.app);
        build_app(
            &mut code,
            &self.app_name,
            std::slice::from_ref(&self.stack_name),
            &app_imports(libraries, &self.stack_name, &self.stack_module()),
            &self.app_comment(&paths),
        );
        code.close_file(&paths.app);

        code.open_file(&paths.stack);
        build_stack(&mut code, &self.stack_name, &stack, &self.comment());
        code.close_file(&paths.stack);

        code.open_file(&paths.test);
        build_test(
            &mut code,
            &self.stack_name,
            &self.app_name,
            &test_imports(libraries, &self.stack_name),
            &self.comment(),
        );
        code.close_file(&paths.test);

        tracing::debug!(stack = %self.stack_name, app = %self.app_name, "generated scaffold");
        Ok(GeneratedScaffold { files: code.into_files(), warnings: stack.warnings })
    }

    /// Module specifier of the stack as seen from the app file.
    fn stack_module(&self) -> String {
        let stack = to_file_safe_name(&self.stack_name);
        if self.multi_app {
            format!("../lib/{}/{stack}", to_file_safe_name(&self.app_name))
        } else {
            format!("../lib/{stack}")
        }
    }

    fn comment(&self) -> Vec<String> {
        match &self.provenance {
            Provenance::Migrated { template } => vec![
                format!("// This file was autogenerated from {template} using {TOOL}"),
                STARTING_POINT.to_string(),
            ],
            Provenance::New => vec![format!("// This file was autogenerated using {TOOL}")],
        }
    }

    fn app_comment(&self, paths: &ScaffoldPaths) -> Vec<String> {
        match &self.provenance {
            Provenance::Migrated { .. } => self.comment(),
            Provenance::New => {
                let stack_file = paths
                    .stack
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_default();
                vec![
                    format!("// This file was autogenerated when creating {stack_file} using {TOOL}"),
                    STARTING_POINT.to_string(),
                ]
            }
        }
    }
}

/// `source-map-support/register`, `App` and the stack class.
pub fn app_imports(libraries: &LibraryConfig, stack_name: &str, stack_module: &str) -> ImportRegistry {
    let mut imports = ImportRegistry::new();
    imports.add_side_effect("source-map-support/register");
    imports.add(&libraries.cdk_core, ["App"]);
    imports.add(stack_module, [stack_name]);
    imports
}

/// `App` and `GuStackProps` as types, `GuStack` as a value.
pub fn stack_imports(libraries: &LibraryConfig) -> ImportRegistry {
    let mut imports = ImportRegistry::new();
    imports.add_types(&libraries.cdk_core, ["App"]);
    imports.add_types(&libraries.guardian_core, ["GuStackProps"]);
    imports.add(&libraries.guardian_core, ["GuStack"]);
    imports
}

/// The jest matchers, `SynthUtils`, `App` and the stack class.
pub fn test_imports(libraries: &LibraryConfig, stack_name: &str) -> ImportRegistry {
    let mut imports = ImportRegistry::new();
    imports.add_side_effect(&format!("{}/jest", libraries.cdk_assert));
    imports.add(&libraries.cdk_assert, ["SynthUtils"]);
    imports.add(&libraries.cdk_core, ["App"]);
    imports.add(&format!("./{}", to_file_safe_name(stack_name)), [stack_name]);
    imports
}
