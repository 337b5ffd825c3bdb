//! Property values and intrinsic expressions → TypeScript expressions.

use std::collections::HashMap;

use super::expression::TsExpr;
use super::warnings::MappingWarning;
use crate::domain::config::LibraryConfig;
use crate::domain::imports::ImportRegistry;
use crate::domain::naming::{string_literal, to_attribute_member, to_property_name};
use crate::domain::template::{Intrinsic, PropertyValue, PseudoParameter, SubPart};

/// A resource as seen from expressions that read it.
#[derive(Debug, Clone)]
pub(crate) struct ResourceSymbol {
    /// Constructor local, `None` when the resource type is unsupported.
    pub identifier: Option<String>,
    /// Declaration index.
    pub position: usize,
}

/// Names an expression may read.
#[derive(Debug, Default)]
pub(crate) struct Symbols {
    /// Parameter name → value accessor expression.
    pub parameters: HashMap<String, String>,
    pub resources: HashMap<String, ResourceSymbol>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum KeyStyle {
    /// CloudFormation property names → CDK property names.
    Camel,
    /// Free-form JSON documents keep their keys.
    Verbatim,
}

impl KeyStyle {
    fn apply(self, key: &str) -> String {
        match self {
            KeyStyle::Camel => to_property_name(key),
            KeyStyle::Verbatim => key.to_string(),
        }
    }
}

/// Resolves expressions for one owner (resource or output) at a fixed
/// position in declaration order.
pub(crate) struct Resolver<'a> {
    pub symbols: &'a Symbols,
    pub libraries: &'a LibraryConfig,
    pub owner: &'a str,
    /// Resources at or after this index are not yet constructed.
    pub position: usize,
    pub imports: &'a mut ImportRegistry,
    pub warnings: &'a mut Vec<MappingWarning>,
}

impl Resolver<'_> {
    /// Resource properties as a props object.
    ///
    /// `verbatim` holds dotted property paths (`Environment.Variables`)
    /// whose values are free-form maps; keys below them are emitted unchanged.
    /// Lists do not add a path segment.
    pub(crate) fn properties(
        &mut self,
        properties: &[(String, PropertyValue)],
        verbatim: &[&str],
    ) -> TsExpr {
        let mut path = Vec::new();
        self.property_entries(properties, verbatim, &mut path)
    }

    fn property_entries<'v>(
        &mut self,
        entries: &'v [(String, PropertyValue)],
        verbatim: &[&str],
        path: &mut Vec<&'v str>,
    ) -> TsExpr {
        let mut props = Vec::with_capacity(entries.len());
        for (name, value) in entries {
            path.push(name);
            let expr = self.property(value, verbatim, path);
            path.pop();
            props.push((to_property_name(name), expr));
        }
        TsExpr::Object(props)
    }

    fn property<'v>(
        &mut self,
        value: &'v PropertyValue,
        verbatim: &[&str],
        path: &mut Vec<&'v str>,
    ) -> TsExpr {
        if verbatim.contains(&path.join(".").as_str()) {
            return self.value(value, KeyStyle::Verbatim);
        }
        match value {
            PropertyValue::Mapping(entries) if !is_passthrough(entries) => {
                self.property_entries(entries, verbatim, path)
            }
            PropertyValue::Sequence(items) => TsExpr::Array(
                items.iter().map(|item| self.property(item, verbatim, path)).collect(),
            ),
            other => self.value(other, KeyStyle::Camel),
        }
    }

    pub(crate) fn value(&mut self, value: &PropertyValue, keys: KeyStyle) -> TsExpr {
        match value {
            PropertyValue::Null => TsExpr::raw("undefined"),
            PropertyValue::Bool(b) => TsExpr::raw(b.to_string()),
            PropertyValue::Number(n) => TsExpr::raw(n.clone()),
            PropertyValue::String(s) => TsExpr::string(s),
            PropertyValue::Sequence(items) => {
                TsExpr::Array(items.iter().map(|item| self.value(item, keys)).collect())
            }
            PropertyValue::Mapping(entries) => {
                if is_passthrough(entries) {
                    let warning = MappingWarning::UnsupportedIntrinsic {
                        owner: self.owner.to_string(),
                        function: entries[0].0.clone(),
                    };
                    tracing::warn!("{warning}");
                    self.warnings.push(warning);
                    return self.object(entries, KeyStyle::Verbatim);
                }
                self.object(entries, keys)
            }
            PropertyValue::Intrinsic(intrinsic) => TsExpr::Raw(self.intrinsic(intrinsic)),
        }
    }

    fn object(&mut self, entries: &[(String, PropertyValue)], keys: KeyStyle) -> TsExpr {
        TsExpr::Object(
            entries.iter().map(|(key, value)| (keys.apply(key), self.value(value, keys))).collect(),
        )
    }

    fn inline(&mut self, value: &PropertyValue) -> String {
        self.value(value, KeyStyle::Camel).inline()
    }

    fn intrinsic(&mut self, intrinsic: &Intrinsic) -> String {
        match intrinsic {
            Intrinsic::Reference(target) => self.reference(target),
            Intrinsic::Pseudo(pseudo) => pseudo_expression(*pseudo).to_string(),
            Intrinsic::Attribute { target, attribute } => self.attribute(target, attribute),
            Intrinsic::Join { delimiter, parts } => {
                let parts = self.inline(parts);
                self.fn_call("join", &[string_literal(delimiter), parts])
            }
            Intrinsic::Substitute { parts, variables } => self.substitute(parts, variables),
            Intrinsic::Select { index, list } => {
                let args = [self.inline(index), self.inline(list)];
                self.fn_call("select", &args)
            }
            Intrinsic::Split { delimiter, source } => {
                let source = self.inline(source);
                self.fn_call("split", &[string_literal(delimiter), source])
            }
            Intrinsic::ImportValue(value) => {
                let arg = self.inline(value);
                self.fn_call("importValue", &[arg])
            }
            Intrinsic::Base64(value) => {
                let arg = self.inline(value);
                self.fn_call("base64", &[arg])
            }
            Intrinsic::GetAzs(region) => match region {
                PropertyValue::Null => self.fn_call("getAzs", &[]),
                PropertyValue::String(s) if s.is_empty() => self.fn_call("getAzs", &[]),
                other => {
                    let arg = self.inline(other);
                    self.fn_call("getAzs", &[arg])
                }
            },
        }
    }

    fn reference(&mut self, target: &str) -> String {
        let symbols = self.symbols;
        if let Some(accessor) = symbols.parameters.get(target) {
            return accessor.clone();
        }
        match symbols.resources.get(target) {
            Some(symbol) => match &symbol.identifier {
                Some(identifier) => self.read(symbol.position, identifier, "ref"),
                None => self.fn_call("ref", &[string_literal(target)]),
            },
            // References are checked at parse time; keep the name readable if one slips through.
            None => self.fn_call("ref", &[string_literal(target)]),
        }
    }

    fn attribute(&mut self, target: &str, attribute: &str) -> String {
        let symbols = self.symbols;
        match symbols.resources.get(target) {
            Some(ResourceSymbol { identifier: Some(identifier), position }) => {
                self.read(*position, identifier, &to_attribute_member(attribute))
            }
            _ => {
                let call =
                    self.fn_call("getAtt", &[string_literal(target), string_literal(attribute)]);
                format!("{call}.toString()")
            }
        }
    }

    /// `identifier.member`, deferred with `Lazy` when the target is declared later.
    fn read(&mut self, position: usize, identifier: &str, member: &str) -> String {
        if position < self.position {
            format!("{identifier}.{member}")
        } else {
            self.imports.add(&self.libraries.cdk_core, ["Lazy"]);
            format!("Lazy.string({{ produce: () => {identifier}.{member} }})")
        }
    }

    fn fn_call(&mut self, function: &str, args: &[String]) -> String {
        self.imports.add(&self.libraries.cdk_core, ["Fn"]);
        format!("Fn.{function}({})", args.join(", "))
    }

    fn substitute(&mut self, parts: &[SubPart], variables: &[(String, PropertyValue)]) -> String {
        if parts.iter().all(|part| matches!(part, SubPart::Text(_))) {
            let text: String = parts
                .iter()
                .filter_map(|part| match part {
                    SubPart::Text(text) => Some(text.as_str()),
                    _ => None,
                })
                .collect();
            return string_literal(&text);
        }

        let mut literal = String::from("`");
        for part in parts {
            let interpolated = match part {
                SubPart::Text(text) => {
                    literal.push_str(&escape_template_text(text));
                    continue;
                }
                SubPart::Variable(name) => match variables.iter().find(|(n, _)| n == name) {
                    Some((_, value)) => self.inline(value),
                    None => self.reference(name),
                },
                SubPart::Name(target) => self.reference(target),
                SubPart::Attribute { target, attribute } => self.attribute(target, attribute),
                SubPart::Pseudo(pseudo) => pseudo_expression(*pseudo).to_string(),
            };
            literal.push_str("${");
            literal.push_str(&interpolated);
            literal.push('}');
        }
        literal.push('`');
        literal
    }
}

fn pseudo_expression(pseudo: PseudoParameter) -> &'static str {
    match pseudo {
        PseudoParameter::AccountId => "this.account",
        PseudoParameter::NotificationArns => "this.notificationArns",
        PseudoParameter::NoValue => "undefined",
        PseudoParameter::Partition => "this.partition",
        PseudoParameter::Region => "this.region",
        PseudoParameter::StackId => "this.stackId",
        PseudoParameter::StackName => "this.stackName",
        PseudoParameter::UrlSuffix => "this.urlSuffix",
    }
}

/// A single `Fn::*` key: an intrinsic with no TypeScript equivalent.
fn is_passthrough(entries: &[(String, PropertyValue)]) -> bool {
    matches!(entries, [(key, _)] if key.starts_with("Fn::"))
}

fn escape_template_text(text: &str) -> String {
    text.replace('\\', "\\\\").replace('`', "\\`").replace("${", "\\${")
}
