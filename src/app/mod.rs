pub mod api;
pub mod cli;
pub mod commands;
mod config;
mod context;

pub use context::AppContext;
