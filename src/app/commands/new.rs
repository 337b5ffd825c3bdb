//! `cdkgen new`: author a fresh stack from prompted parameters.

use std::path::PathBuf;

use crate::app::AppContext;
use crate::app::commands::layout;
use crate::domain::template::{ParameterSpec, Template};
use crate::domain::{AppError, Provenance, ScaffoldPaths, StackScaffold};
use crate::ports::{ParameterPrompt, ScaffoldStore};

const NAME_QUESTION: &str = "Enter the name of the parameter (or hit enter to finish)";
const TYPE_QUESTION: &str = "Enter the parameter type";
const DEFAULT_TYPE: &str = "string";

#[derive(Debug, Clone)]
pub struct NewOptions {
    /// CDK directory to write into.
    pub output: PathBuf,
    pub app: String,
    pub stack: String,
    pub multi_app: bool,
}

#[derive(Debug, Clone)]
pub struct NewOutcome {
    pub stack_name: String,
    pub parameters: Vec<String>,
    pub written: Vec<PathBuf>,
}

pub fn execute<S: ScaffoldStore, P: ParameterPrompt + ?Sized>(
    ctx: &AppContext<S>,
    prompt: &P,
    options: NewOptions,
) -> Result<NewOutcome, AppError> {
    let stack_name = layout::stack_class_name(&options.stack)?;
    layout::validate(
        ctx.store(),
        &options.output,
        &ScaffoldPaths::new(&options.app, &stack_name, options.multi_app),
    )?;

    let parameters = collect_parameters(prompt)?;
    let names: Vec<String> = parameters.iter().map(|p| p.name.clone()).collect();

    let scaffold = StackScaffold {
        stack_name,
        app_name: options.app,
        template: Template::with_parameters(parameters),
        provenance: Provenance::New,
        multi_app: options.multi_app,
    };
    let generated = scaffold.generate(ctx.config())?;
    let written = generated.save(&options.output, ctx.store())?;

    Ok(NewOutcome { stack_name: scaffold.stack_name, parameters: names, written })
}

/// Ask for parameters until a blank name. Cancelling keeps the parameters
/// confirmed so far; re-entering a name replaces its type.
pub fn collect_parameters<P: ParameterPrompt + ?Sized>(
    prompt: &P,
) -> Result<Vec<ParameterSpec>, AppError> {
    let mut parameters: Vec<ParameterSpec> = Vec::new();
    loop {
        let name = match prompt.ask(NAME_QUESTION, None)? {
            Some(name) if !name.trim().is_empty() => name.trim().to_string(),
            _ => break,
        };
        let Some(declared_type) = prompt.ask(TYPE_QUESTION, Some(DEFAULT_TYPE))? else {
            break;
        };
        let declared_type = match declared_type.trim() {
            "" => DEFAULT_TYPE.to_string(),
            other => other.to_string(),
        };

        match parameters.iter_mut().find(|p| p.name == name) {
            Some(existing) => existing.declared_type = declared_type,
            None => parameters.push(ParameterSpec::new(name, declared_type)),
        }
    }
    tracing::debug!(count = parameters.len(), "collected parameters");
    Ok(parameters)
}
