//! Resource mapping: [`Template`] → ordered constructor statements plus imports.

mod catalog;
mod cycles;
mod expression;
mod identifiers;
mod resolve;
mod statement;
mod warnings;

pub use catalog::{ResourceKind, lookup};
pub use expression::TsExpr;
pub use statement::EmitStatement;
pub use warnings::MappingWarning;

use crate::domain::AppError;
use crate::domain::config::LibraryConfig;
use crate::domain::imports::ImportRegistry;
use crate::domain::naming::{is_identifier, string_literal, to_property_name};
use crate::domain::template::{OutputSpec, ParameterSpec, ResourceSpec, Template};
use identifiers::IdentifierAllocator;
use resolve::{KeyStyle, Resolver, ResourceSymbol, Symbols};

/// Everything the stack builder needs to write the constructor body.
#[derive(Debug, Clone, PartialEq)]
pub struct MappedStack {
    pub parameters: Vec<EmitStatement>,
    /// Resources and placeholders, in declaration order.
    pub resources: Vec<EmitStatement>,
    pub dependencies: Vec<EmitStatement>,
    pub outputs: Vec<EmitStatement>,
    pub imports: ImportRegistry,
    pub warnings: Vec<MappingWarning>,
}

/// Map every parameter, resource and output of `template` in one
/// left-to-right pass, adding the symbols they need to `imports`.
pub fn map(
    template: &Template,
    imports: ImportRegistry,
    libraries: &LibraryConfig,
) -> Result<MappedStack, AppError> {
    cycles::check_cycles(template)?;

    let symbols = symbols(template);
    let mut mapped = MappedStack {
        parameters: Vec::new(),
        resources: Vec::new(),
        dependencies: Vec::new(),
        outputs: Vec::new(),
        imports,
        warnings: Vec::new(),
    };

    for parameter in &template.parameters {
        let statement = map_parameter(parameter, &symbols, libraries, &mut mapped);
        mapped.parameters.push(statement);
    }

    for (position, resource) in template.resources.iter().enumerate() {
        let statement = map_resource(resource, position, &symbols, libraries, &mut mapped);
        mapped.resources.push(statement);
    }

    for resource in &template.resources {
        map_dependencies(resource, &symbols, &mut mapped);
    }

    if !template.outputs.is_empty() {
        mapped.imports.add(&libraries.cdk_core, ["CfnOutput"]);
    }
    for output in &template.outputs {
        let statement =
            map_output(output, template.resources.len(), &symbols, libraries, &mut mapped);
        mapped.outputs.push(statement);
    }

    tracing::debug!(
        parameters = mapped.parameters.len(),
        resources = mapped.resources.len(),
        outputs = mapped.outputs.len(),
        warnings = mapped.warnings.len(),
        "mapped template"
    );
    Ok(mapped)
}

fn symbols(template: &Template) -> Symbols {
    let mut symbols = Symbols::default();
    for parameter in &template.parameters {
        symbols.parameters.insert(parameter.name.clone(), parameter_accessor(parameter));
    }

    let mut identifiers = IdentifierAllocator::default();
    for (position, resource) in template.resources.iter().enumerate() {
        let identifier =
            lookup(&resource.resource_type).map(|_| identifiers.allocate(&resource.logical_name));
        symbols
            .resources
            .insert(resource.logical_name.clone(), ResourceSymbol { identifier, position });
    }
    symbols
}

/// `parameters.<Name>.<accessor>` for the parameter's declared type.
fn parameter_accessor(parameter: &ParameterSpec) -> String {
    let declared = parameter.declared_type.as_str();
    let accessor = if declared.eq_ignore_ascii_case("Number") {
        "valueAsNumber"
    } else if declared.starts_with("List<") || declared.eq_ignore_ascii_case("CommaDelimitedList") {
        "valueAsList"
    } else {
        "valueAsString"
    };

    if is_identifier(&parameter.name) {
        format!("parameters.{}.{accessor}", parameter.name)
    } else {
        format!("parameters[{}].{accessor}", string_literal(&parameter.name))
    }
}

fn map_parameter(
    parameter: &ParameterSpec,
    symbols: &Symbols,
    libraries: &LibraryConfig,
    mapped: &mut MappedStack,
) -> EmitStatement {
    let string_typed = parameter.declared_type.eq_ignore_ascii_case("String");
    let construct = if string_typed { "GuStringParameter" } else { "GuParameter" };
    mapped.imports.add(&libraries.guardian_core, [construct]);

    let mut resolver = Resolver {
        symbols,
        libraries,
        owner: &parameter.name,
        position: 0,
        imports: &mut mapped.imports,
        warnings: &mut mapped.warnings,
    };

    let mut props = Vec::new();
    if !string_typed {
        props.push(("type".to_string(), TsExpr::string(&parameter.declared_type)));
    }
    if let Some(description) = &parameter.description {
        props.push(("description".to_string(), TsExpr::string(description)));
    }
    if let Some(default) = &parameter.default {
        props.push(("default".to_string(), resolver.value(default, KeyStyle::Camel)));
    }
    if let Some(allowed) = &parameter.allowed_values {
        let values = allowed.iter().map(|v| resolver.value(v, KeyStyle::Camel)).collect();
        props.push(("allowedValues".to_string(), TsExpr::Array(values)));
    }
    for (name, value) in &parameter.constraints {
        props.push((to_property_name(name), resolver.value(value, KeyStyle::Camel)));
    }

    EmitStatement::Parameter {
        name: parameter.name.clone(),
        construct: construct.to_string(),
        props: TsExpr::Object(props),
    }
}

fn map_resource(
    resource: &ResourceSpec,
    position: usize,
    symbols: &Symbols,
    libraries: &LibraryConfig,
    mapped: &mut MappedStack,
) -> EmitStatement {
    if let Some(condition) = &resource.condition {
        warn(
            mapped,
            MappingWarning::ConditionNotMigrated {
                owner: resource.logical_name.clone(),
                condition: condition.clone(),
            },
        );
    }

    let (kind, identifier) = match (
        lookup(&resource.resource_type),
        symbols.resources.get(&resource.logical_name).and_then(|s| s.identifier.clone()),
    ) {
        (Some(kind), Some(identifier)) => (kind, identifier),
        _ => {
            warn(
                mapped,
                MappingWarning::UnsupportedResourceType {
                    logical_name: resource.logical_name.clone(),
                    resource_type: resource.resource_type.clone(),
                },
            );
            return EmitStatement::Placeholder {
                logical_name: resource.logical_name.clone(),
                resource_type: resource.resource_type.clone(),
            };
        }
    };

    let module = libraries.service_module(kind.service);
    match kind.alias {
        Some(alias) => mapped.imports.add_aliased(&module, kind.class, alias),
        None => mapped.imports.add(&module, [kind.class]),
    }
    let mut resolver = Resolver {
        symbols,
        libraries,
        owner: &resource.logical_name,
        position,
        imports: &mut mapped.imports,
        warnings: &mut mapped.warnings,
    };
    let props = resolver.properties(&resource.properties, kind.verbatim);

    EmitStatement::Resource {
        logical_name: resource.logical_name.clone(),
        identifier,
        construct: kind.local_name().to_string(),
        props,
    }
}

fn map_dependencies(resource: &ResourceSpec, symbols: &Symbols, mapped: &mut MappedStack) {
    let identifier_of =
        |name: &str| symbols.resources.get(name).and_then(|s| s.identifier.clone());

    for dependency in &resource.depends_on {
        match (identifier_of(&resource.logical_name), identifier_of(dependency)) {
            (Some(identifier), Some(dependency)) => {
                mapped.dependencies.push(EmitStatement::Dependency { identifier, dependency });
            }
            _ => warn(
                mapped,
                MappingWarning::DependencySkipped {
                    logical_name: resource.logical_name.clone(),
                    dependency: dependency.clone(),
                },
            ),
        }
    }
}

fn map_output(
    output: &OutputSpec,
    position: usize,
    symbols: &Symbols,
    libraries: &LibraryConfig,
    mapped: &mut MappedStack,
) -> EmitStatement {
    if let Some(condition) = &output.condition {
        warn(
            mapped,
            MappingWarning::ConditionNotMigrated {
                owner: output.name.clone(),
                condition: condition.clone(),
            },
        );
    }

    let mut resolver = Resolver {
        symbols,
        libraries,
        owner: &output.name,
        position,
        imports: &mut mapped.imports,
        warnings: &mut mapped.warnings,
    };

    let mut props = vec![("value".to_string(), resolver.value(&output.value, KeyStyle::Camel))];
    if let Some(description) = &output.description {
        props.push(("description".to_string(), TsExpr::string(description)));
    }
    if let Some(export_name) = &output.export_name {
        props.push(("exportName".to_string(), resolver.value(export_name, KeyStyle::Camel)));
    }

    EmitStatement::Output { name: output.name.clone(), props: TsExpr::Object(props) }
}

fn warn(mapped: &mut MappedStack, warning: MappingWarning) {
    tracing::warn!("{warning}");
    mapped.warnings.push(warning);
}
