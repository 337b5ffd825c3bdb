use crate::domain::AppError;

/// Port for asking the operator a free-text question.
pub trait ParameterPrompt {
    /// Ask `question`, pre-filling `default` when given.
    ///
    /// Returns `Ok(None)` when the operator cancels the prompt.
    fn ask(&self, question: &str, default: Option<&str>) -> Result<Option<String>, AppError>;
}
