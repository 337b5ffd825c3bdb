//! Writers for the three generated files.

use crate::domain::code_maker::CodeMaker;
use crate::domain::imports::ImportRegistry;
use crate::domain::mapping::MappedStack;
use crate::domain::naming::{string_literal, to_file_safe_name};

/// Comment header (if any) followed by a blank line.
fn header(code: &mut CodeMaker, comment: &[String]) {
    if comment.is_empty() {
        return;
    }
    for line in comment {
        code.line(line);
    }
    code.blank();
}

/// The app entrypoint: one `App` and one instance per stack.
pub fn build_app(
    code: &mut CodeMaker,
    app_name: &str,
    stacks: &[String],
    imports: &ImportRegistry,
    comment: &[String],
) {
    header(code, comment);
    imports.render(code);
    code.line("const app = new App();");
    let app = string_literal(&to_file_safe_name(app_name));
    for stack in stacks {
        code.line(format!("new {stack}(app, {}, {{ app: {app} }});", string_literal(stack)));
    }
}

/// The stack class. Imports come from `stack.imports`, which already hold
/// the defaults plus everything the mapped statements use.
pub fn build_stack(code: &mut CodeMaker, stack_name: &str, stack: &MappedStack, comment: &[String]) {
    header(code, comment);
    stack.imports.render(code);

    code.open_block(format!("export class {stack_name} extends GuStack"));
    code.open_block("constructor(scope: App, id: string, props: GuStackProps)");
    code.line("super(scope, id, props);");

    if !stack.parameters.is_empty() {
        code.blank();
        code.open_block("const parameters =");
        for statement in &stack.parameters {
            statement.write(code);
        }
        code.close_block_with("};");
    }

    for group in [&stack.resources, &stack.dependencies, &stack.outputs] {
        if group.is_empty() {
            continue;
        }
        code.blank();
        for statement in group {
            statement.write(code);
        }
    }

    code.close_block();
    code.close_block();
}

/// The snapshot test for one stack.
pub fn build_test(
    code: &mut CodeMaker,
    stack_name: &str,
    app_name: &str,
    imports: &ImportRegistry,
    comment: &[String],
) {
    header(code, comment);
    imports.render(code);
    code.open_block(format!("describe(\"The {stack_name} stack\", () =>"));
    code.open_block("it(\"matches the snapshot\", () =>");
    code.line("const app = new App();");
    code.line(format!(
        "const stack = new {stack_name}(app, {}, {{ app: {} }});",
        string_literal(&to_file_safe_name(stack_name)),
        string_literal(&to_file_safe_name(app_name))
    ));
    code.line("expect(SynthUtils.toCloudFormation(stack)).toMatchSnapshot();");
    code.close_block_with("});");
    code.close_block_with("});");
}
