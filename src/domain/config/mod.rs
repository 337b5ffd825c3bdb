pub mod generator;
pub mod parse;
pub mod paths;

pub use generator::{GeneratorConfig, LibraryConfig, OutputConfig};
pub use parse::parse_config_content;
