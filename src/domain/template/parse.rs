//! Raw document → [`Template`].

use std::path::Path;

use serde_yaml::{Mapping, Value};

use super::intrinsic::{decode, key_string};
use super::model::{OutputSpec, ParameterSpec, PropertyValue, ResourceSpec, Template};
use super::references::check_references;
use crate::domain::AppError;

/// Parameter attributes carried through as constructor props, in addition to
/// `Type`, `Description`, `Default` and `AllowedValues`.
const PARAMETER_CONSTRAINTS: [&str; 7] = [
    "AllowedPattern",
    "ConstraintDescription",
    "MaxLength",
    "MaxValue",
    "MinLength",
    "MinValue",
    "NoEcho",
];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// `.json` files are JSON; anything else is read as YAML.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("json") => DocumentFormat::Json,
            _ => DocumentFormat::Yaml,
        }
    }
}

/// Parse a template document.
///
/// Fails with [`AppError::MalformedDocument`] when the document does not have
/// the expected section shape and with [`AppError::UnresolvedReference`] when an
/// expression names an undeclared parameter or resource.
pub fn parse(raw: &str, format: DocumentFormat) -> Result<Template, AppError> {
    let document: Value = match format {
        DocumentFormat::Json => serde_json::from_str(raw)
            .map_err(|e| AppError::malformed("document", e.to_string()))?,
        DocumentFormat::Yaml => serde_yaml::from_str(raw)
            .map_err(|e| AppError::malformed("document", e.to_string()))?,
    };
    let Value::Mapping(root) = document else {
        return Err(AppError::malformed("document", "top level must be a mapping"));
    };

    let mut template = Template::default();
    if let Some(section) = section(&root, "Parameters")? {
        for (name, body) in section {
            let name = key_string(name, "Parameters")?;
            template.parameters.push(parse_parameter(name, body)?);
        }
    }
    if let Some(section) = section(&root, "Resources")? {
        for (name, body) in section {
            let name = key_string(name, "Resources")?;
            template.resources.push(parse_resource(name, body)?);
        }
    }
    if let Some(section) = section(&root, "Outputs")? {
        for (name, body) in section {
            let name = key_string(name, "Outputs")?;
            template.outputs.push(parse_output(name, body)?);
        }
    }
    if let Some(section) = section(&root, "Conditions")? {
        for (name, body) in section {
            let name = key_string(name, "Conditions")?;
            let value = decode(body, &name)?;
            template.conditions.push((name, value));
        }
    }

    if let Some(resource) =
        template.resources.iter().find(|r| template.parameter(&r.logical_name).is_some())
    {
        return Err(AppError::malformed(
            &resource.logical_name,
            "declared as both a parameter and a resource",
        ));
    }

    check_references(&template)?;

    tracing::debug!(
        parameters = template.parameters.len(),
        resources = template.resources.len(),
        outputs = template.outputs.len(),
        conditions = template.conditions.len(),
        "parsed template"
    );
    Ok(template)
}

fn section<'a>(root: &'a Mapping, name: &str) -> Result<Option<&'a Mapping>, AppError> {
    match root.get(name) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::Mapping(mapping)) => Ok(Some(mapping)),
        Some(_) => Err(AppError::malformed(name, "section must be a mapping")),
    }
}

fn entry<'a>(body: &'a Value, name: &str) -> Result<&'a Mapping, AppError> {
    body.as_mapping().ok_or_else(|| AppError::malformed(name, "declaration must be a mapping"))
}

fn optional_string(body: &Mapping, key: &str, name: &str) -> Result<Option<String>, AppError> {
    match body.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(AppError::malformed(name, format!("{key} must be a string"))),
    }
}

fn required_type(body: &Mapping, name: &str) -> Result<String, AppError> {
    optional_string(body, "Type", name)?
        .ok_or_else(|| AppError::malformed(name, "missing string 'Type'"))
}

fn parse_parameter(name: String, body: &Value) -> Result<ParameterSpec, AppError> {
    let body = entry(body, &name)?;
    let mut parameter = ParameterSpec::new(&name, required_type(body, &name)?);
    parameter.description = optional_string(body, "Description", &name)?;
    parameter.default = body.get("Default").map(|v| decode(v, &name)).transpose()?;
    parameter.allowed_values = match body.get("AllowedValues") {
        None => None,
        Some(Value::Sequence(items)) => {
            Some(items.iter().map(|v| decode(v, &name)).collect::<Result<_, _>>()?)
        }
        Some(_) => return Err(AppError::malformed(&name, "AllowedValues must be a list")),
    };
    for (key, value) in body {
        let key = key_string(key, &name)?;
        if PARAMETER_CONSTRAINTS.contains(&key.as_str()) {
            let value = decode(value, &name)?;
            parameter.constraints.push((key, value));
        }
    }
    Ok(parameter)
}

fn parse_resource(name: String, body: &Value) -> Result<ResourceSpec, AppError> {
    let body = entry(body, &name)?;
    let mut resource = ResourceSpec::new(&name, required_type(body, &name)?);
    match body.get("Properties") {
        None | Some(Value::Null) => {}
        Some(Value::Mapping(properties)) => {
            for (key, value) in properties {
                resource.properties.push((key_string(key, &name)?, decode(value, &name)?));
            }
        }
        Some(_) => return Err(AppError::malformed(&name, "Properties must be a mapping")),
    }
    resource.depends_on = match body.get("DependsOn") {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(target)) => vec![target.clone()],
        Some(Value::Sequence(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| AppError::malformed(&name, "DependsOn entries must be strings"))
            })
            .collect::<Result<_, _>>()?,
        Some(_) => return Err(AppError::malformed(&name, "DependsOn must be a string or list")),
    };
    resource.condition = optional_string(body, "Condition", &name)?;
    Ok(resource)
}

fn parse_output(name: String, body: &Value) -> Result<OutputSpec, AppError> {
    let body = entry(body, &name)?;
    let value = body
        .get("Value")
        .map(|v| decode(v, &name))
        .transpose()?
        .ok_or_else(|| AppError::malformed(&name, "missing 'Value'"))?;
    let export_name = match body.get("Export") {
        None | Some(Value::Null) => None,
        Some(Value::Mapping(export)) => export.get("Name").map(|v| decode(v, &name)).transpose()?,
        Some(_) => return Err(AppError::malformed(&name, "Export must be a mapping")),
    };
    Ok(OutputSpec {
        description: optional_string(body, "Description", &name)?,
        condition: optional_string(body, "Condition", &name)?,
        name,
        value,
        export_name,
    })
}
