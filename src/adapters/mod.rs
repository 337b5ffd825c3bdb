mod dialoguer_prompt;
mod filesystem_store;

pub use dialoguer_prompt::DialoguerPrompt;
pub use filesystem_store::FilesystemScaffoldStore;
