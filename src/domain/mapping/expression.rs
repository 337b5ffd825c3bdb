//! TypeScript expressions as nested values, written through a [`CodeMaker`].

use crate::domain::code_maker::CodeMaker;
use crate::domain::naming::{object_key, string_literal};

/// A TypeScript expression.
///
/// Objects and arrays are written one entry per line; everything else is a
/// single line of source text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TsExpr {
    Raw(String),
    /// Ordered `key: value` entries; keys are final TypeScript property names.
    Object(Vec<(String, TsExpr)>),
    Array(Vec<TsExpr>),
}

impl TsExpr {
    pub fn raw(source: impl Into<String>) -> Self {
        TsExpr::Raw(source.into())
    }

    /// A string literal.
    pub fn string(value: &str) -> Self {
        TsExpr::Raw(string_literal(value))
    }

    pub fn empty_object() -> Self {
        TsExpr::Object(Vec::new())
    }

    /// Single-line form, used for intrinsic arguments.
    pub fn inline(&self) -> String {
        match self {
            TsExpr::Raw(source) => source.clone(),
            TsExpr::Object(entries) if entries.is_empty() => "{}".to_string(),
            TsExpr::Object(entries) => {
                let body: Vec<String> = entries
                    .iter()
                    .map(|(key, value)| format!("{}: {}", object_key(key), value.inline()))
                    .collect();
                format!("{{ {} }}", body.join(", "))
            }
            TsExpr::Array(items) => {
                let body: Vec<String> = items.iter().map(TsExpr::inline).collect();
                format!("[{}]", body.join(", "))
            }
        }
    }

    /// Write `prefix`, the expression, then `suffix`, across as many lines as needed.
    ///
    /// `prefix` is typically `key: ` or `const x = new Y(this, "Y", `; `suffix`
    /// closes the surrounding construct (`,` or `);`).
    pub fn write(&self, code: &mut CodeMaker, prefix: &str, suffix: &str) {
        match self {
            TsExpr::Raw(source) => code.line(format!("{prefix}{source}{suffix}")),
            TsExpr::Object(entries) if entries.is_empty() => code.line(format!("{prefix}{{}}{suffix}")),
            TsExpr::Array(items) if items.is_empty() => code.line(format!("{prefix}[]{suffix}")),
            TsExpr::Object(entries) => {
                code.indent(format!("{prefix}{{"));
                for (key, value) in entries {
                    value.write(code, &format!("{}: ", object_key(key)), ",");
                }
                code.unindent(format!("}}{suffix}"));
            }
            TsExpr::Array(items) => {
                code.indent(format!("{prefix}["));
                for item in items {
                    item.write(code, "", ",");
                }
                code.unindent(format!("]{suffix}"));
            }
        }
    }
}
