use std::cell::RefCell;
use std::collections::VecDeque;

use crate::domain::AppError;
use crate::ports::ParameterPrompt;

/// Prompt that replays canned answers; `None` answers (or running out) cancel.
#[derive(Debug, Default)]
pub struct ScriptedPrompt {
    answers: RefCell<VecDeque<Option<String>>>,
    asked: RefCell<Vec<(String, Option<String>)>>,
}

impl ScriptedPrompt {
    pub fn new<'a>(answers: impl IntoIterator<Item = Option<&'a str>>) -> Self {
        Self {
            answers: RefCell::new(answers.into_iter().map(|a| a.map(str::to_string)).collect()),
            asked: RefCell::default(),
        }
    }

    /// Questions asked so far, with their defaults.
    pub fn asked(&self) -> Vec<(String, Option<String>)> {
        self.asked.borrow().clone()
    }
}

impl ParameterPrompt for ScriptedPrompt {
    fn ask(&self, question: &str, default: Option<&str>) -> Result<Option<String>, AppError> {
        self.asked.borrow_mut().push((question.to_string(), default.map(str::to_string)));
        Ok(self.answers.borrow_mut().pop_front().flatten())
    }
}
