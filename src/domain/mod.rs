pub mod code_maker;
pub mod config;
pub mod error;
pub mod imports;
pub mod mapping;
pub mod naming;
pub mod scaffold;
pub mod template;

pub use code_maker::{CodeMaker, EmittedFile};
pub use config::{GeneratorConfig, LibraryConfig, OutputConfig};
pub use error::AppError;
pub use imports::ImportRegistry;
pub use scaffold::{GeneratedScaffold, Provenance, ScaffoldPaths, StackScaffold};
pub use template::{DocumentFormat, Template};
