use super::expression::TsExpr;
use crate::domain::code_maker::CodeMaker;
use crate::domain::naming::{object_key, string_literal};

/// One unit of generated stack-constructor code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EmitStatement {
    /// An entry of the `parameters` object.
    Parameter { name: String, construct: String, props: TsExpr },
    Resource { logical_name: String, identifier: String, construct: String, props: TsExpr },
    /// A resource type with no construct mapping.
    Placeholder { logical_name: String, resource_type: String },
    Dependency { identifier: String, dependency: String },
    Output { name: String, props: TsExpr },
}

impl EmitStatement {
    pub fn write(&self, code: &mut CodeMaker) {
        match self {
            EmitStatement::Parameter { name, construct, props } => {
                let prefix = format!(
                    "{}: new {construct}(this, {}, ",
                    object_key(name),
                    string_literal(name)
                );
                props.write(code, &prefix, "),");
            }
            EmitStatement::Resource { logical_name, identifier, construct, props } => {
                let prefix = format!(
                    "const {identifier} = new {construct}(this, {}, ",
                    string_literal(logical_name)
                );
                props.write(code, &prefix, ");");
            }
            EmitStatement::Placeholder { logical_name, resource_type } => {
                code.line(format!(
                    "// TODO: \"{logical_name}\" has unsupported type \"{resource_type}\" and must be migrated by hand"
                ));
            }
            EmitStatement::Dependency { identifier, dependency } => {
                code.line(format!("{identifier}.addDependsOn({dependency});"));
            }
            EmitStatement::Output { name, props } => {
                let prefix = format!("new CfnOutput(this, {}, ", string_literal(name));
                props.write(code, &prefix, ");");
            }
        }
    }
}
