mod memory_store;
mod scripted_prompt;

pub use memory_store::MemoryScaffoldStore;
pub use scripted_prompt::ScriptedPrompt;
