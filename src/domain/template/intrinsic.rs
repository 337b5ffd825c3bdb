//! Decoding raw document values into property values and intrinsic expressions.

use serde_yaml::Value;
use serde_yaml::value::TaggedValue;

use super::model::{Intrinsic, PropertyValue, PseudoParameter, SubPart};
use crate::domain::AppError;

/// Nesting limit for property structures.
pub const MAX_DEPTH: usize = 64;

/// Decode a raw value found under `context` (a logical name) into a [`PropertyValue`].
pub fn decode(value: &Value, context: &str) -> Result<PropertyValue, AppError> {
    decode_at(value, context, 0)
}

fn decode_at(value: &Value, context: &str, depth: usize) -> Result<PropertyValue, AppError> {
    if depth > MAX_DEPTH {
        return Err(AppError::malformed(
            context,
            format!("properties nest deeper than {MAX_DEPTH} levels"),
        ));
    }
    match value {
        Value::Null => Ok(PropertyValue::Null),
        Value::Bool(b) => Ok(PropertyValue::Bool(*b)),
        Value::Number(n) if !n.is_finite() => {
            Err(AppError::malformed(context, format!("number {n} has no finite value")))
        }
        Value::Number(n) => Ok(PropertyValue::Number(n.to_string())),
        Value::String(s) => Ok(PropertyValue::String(s.clone())),
        Value::Sequence(items) => items
            .iter()
            .map(|item| decode_at(item, context, depth + 1))
            .collect::<Result<Vec<_>, _>>()
            .map(PropertyValue::Sequence),
        Value::Mapping(mapping) => {
            if mapping.len() == 1
                && let Some((Value::String(key), arg)) = mapping.iter().next()
                && let Some(decoded) = decode_function(key, arg, context, depth)?
            {
                return Ok(decoded);
            }
            let mut entries = Vec::with_capacity(mapping.len());
            for (key, value) in mapping {
                entries.push((key_string(key, context)?, decode_at(value, context, depth + 1)?));
            }
            Ok(PropertyValue::Mapping(entries))
        }
        Value::Tagged(tagged) => decode_tagged(tagged, context, depth),
    }
}

/// Short-form YAML tags (`!Ref`, `!GetAtt`, ...) map onto their long-form names.
fn decode_tagged(tagged: &TaggedValue, context: &str, depth: usize) -> Result<PropertyValue, AppError> {
    let tag = tagged.tag.to_string();
    let tag = tag.trim_start_matches('!');
    let function = if tag == "Ref" { tag.to_string() } else { format!("Fn::{tag}") };
    match decode_function(&function, &tagged.value, context, depth)? {
        Some(decoded) => Ok(decoded),
        None => Ok(PropertyValue::Mapping(vec![(
            function,
            decode_at(&tagged.value, context, depth + 1)?,
        )])),
    }
}

/// Decode a single-key mapping `{ name: arg }`; `None` when `name` is not a supported function.
fn decode_function(
    name: &str,
    arg: &Value,
    context: &str,
    depth: usize,
) -> Result<Option<PropertyValue>, AppError> {
    let next = depth + 1;
    let intrinsic = match name {
        "Ref" => {
            let target = expect_str(arg, context, name)?;
            match PseudoParameter::from_name(target) {
                Some(pseudo) => Intrinsic::Pseudo(pseudo),
                None => Intrinsic::Reference(target.to_string()),
            }
        }
        "Fn::GetAtt" => {
            let (target, attribute) = match arg {
                Value::String(s) => s.split_once('.').ok_or_else(|| {
                    AppError::malformed(context, format!("Fn::GetAtt '{s}' must be 'Name.Attribute'"))
                })?,
                Value::Sequence(items) if items.len() == 2 => {
                    (expect_str(&items[0], context, name)?, expect_str(&items[1], context, name)?)
                }
                _ => {
                    return Err(AppError::malformed(
                        context,
                        "Fn::GetAtt expects [Name, Attribute] or 'Name.Attribute'",
                    ));
                }
            };
            Intrinsic::Attribute { target: target.to_string(), attribute: attribute.to_string() }
        }
        "Fn::Join" => {
            let [delimiter, parts] = expect_pair(arg, context, name)?;
            Intrinsic::Join {
                delimiter: expect_str(delimiter, context, name)?.to_string(),
                parts: decode_at(parts, context, next)?,
            }
        }
        "Fn::Sub" => {
            let (template, variables) = match arg {
                Value::String(s) => (s.as_str(), Vec::new()),
                Value::Sequence(items) if items.len() == 2 => {
                    let template = expect_str(&items[0], context, name)?;
                    let Value::Mapping(vars) = &items[1] else {
                        return Err(AppError::malformed(
                            context,
                            "Fn::Sub variables must be a mapping",
                        ));
                    };
                    let mut variables = Vec::with_capacity(vars.len());
                    for (key, value) in vars {
                        variables.push((key_string(key, context)?, decode_at(value, context, next)?));
                    }
                    (template, variables)
                }
                _ => {
                    return Err(AppError::malformed(
                        context,
                        "Fn::Sub expects a string or [String, {Variables}]",
                    ));
                }
            };
            let bound: Vec<&str> = variables.iter().map(|(k, _)| k.as_str()).collect();
            Intrinsic::Substitute { parts: parse_sub_template(template, &bound), variables }
        }
        "Fn::Select" => {
            let [index, list] = expect_pair(arg, context, name)?;
            Intrinsic::Select { index: decode_at(index, context, next)?, list: decode_at(list, context, next)? }
        }
        "Fn::Split" => {
            let [delimiter, source] = expect_pair(arg, context, name)?;
            Intrinsic::Split {
                delimiter: expect_str(delimiter, context, name)?.to_string(),
                source: decode_at(source, context, next)?,
            }
        }
        "Fn::ImportValue" => Intrinsic::ImportValue(decode_at(arg, context, next)?),
        "Fn::Base64" => Intrinsic::Base64(decode_at(arg, context, next)?),
        "Fn::GetAZs" => Intrinsic::GetAzs(decode_at(arg, context, next)?),
        _ => return Ok(None),
    };
    Ok(Some(PropertyValue::intrinsic(intrinsic)))
}

/// Split an `Fn::Sub` template into text and placeholders.
///
/// `${!Literal}` stays literal text (`${Literal}`); an unterminated `${` is text.
pub fn parse_sub_template(template: &str, variables: &[&str]) -> Vec<SubPart> {
    let mut parts = Vec::new();
    let mut text = String::new();
    let mut rest = template;

    while let Some(start) = rest.find("${") {
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else { break };
        text.push_str(&rest[..start]);
        let inner = &after[..end];
        rest = &after[end + 1..];

        if let Some(literal) = inner.strip_prefix('!') {
            text.push_str("${");
            text.push_str(literal);
            text.push('}');
            continue;
        }
        if !text.is_empty() {
            parts.push(SubPart::Text(std::mem::take(&mut text)));
        }
        parts.push(classify_placeholder(inner.trim(), variables));
    }
    text.push_str(rest);
    if !text.is_empty() {
        parts.push(SubPart::Text(text));
    }
    parts
}

fn classify_placeholder(name: &str, variables: &[&str]) -> SubPart {
    if variables.contains(&name) {
        return SubPart::Variable(name.to_string());
    }
    if let Some(pseudo) = PseudoParameter::from_name(name) {
        return SubPart::Pseudo(pseudo);
    }
    match name.split_once('.') {
        Some((target, attribute)) => {
            SubPart::Attribute { target: target.to_string(), attribute: attribute.to_string() }
        }
        None => SubPart::Name(name.to_string()),
    }
}

pub(super) fn key_string(key: &Value, context: &str) -> Result<String, AppError> {
    match key {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        Value::Bool(b) => Ok(b.to_string()),
        _ => Err(AppError::malformed(context, "mapping keys must be scalars")),
    }
}

fn expect_str<'a>(value: &'a Value, context: &str, function: &str) -> Result<&'a str, AppError> {
    value
        .as_str()
        .ok_or_else(|| AppError::malformed(context, format!("{function} expects a string argument")))
}

fn expect_pair<'a>(value: &'a Value, context: &str, function: &str) -> Result<[&'a Value; 2], AppError> {
    match value {
        Value::Sequence(items) if items.len() == 2 => Ok([&items[0], &items[1]]),
        _ => Err(AppError::malformed(context, format!("{function} expects a two-element list"))),
    }
}
