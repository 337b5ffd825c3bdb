mod parameter_prompt;
mod scaffold_store;

pub use parameter_prompt::ParameterPrompt;
pub use scaffold_store::ScaffoldStore;
