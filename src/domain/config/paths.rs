use std::path::{Path, PathBuf};

/// Name of the optional configuration file looked up in the working directory.
pub const CONFIG_FILE: &str = "cdkgen.toml";

/// `<root>/cdkgen.toml`
pub fn config(root: &Path) -> PathBuf {
    root.join(CONFIG_FILE)
}
