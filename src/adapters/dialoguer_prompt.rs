use std::io::ErrorKind;

use dialoguer::{Error as DialoguerError, Input};

use crate::domain::AppError;
use crate::ports::ParameterPrompt;

/// Terminal prompt backed by `dialoguer`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DialoguerPrompt;

impl ParameterPrompt for DialoguerPrompt {
    fn ask(&self, question: &str, default: Option<&str>) -> Result<Option<String>, AppError> {
        let mut input = Input::<String>::new().with_prompt(question).allow_empty(true);
        if let Some(default) = default {
            input = input.default(default.to_string());
        }
        match input.interact_text() {
            Ok(value) => Ok(Some(value)),
            Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
            Err(err) => Err(AppError::Prompt(format!("Failed to read answer: {}", err))),
        }
    }
}
