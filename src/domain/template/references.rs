//! Name resolution for intrinsic expressions.

use super::model::Template;
use crate::domain::AppError;

/// Ensure every expression in `template` names a declared parameter or resource.
///
/// Only the immediate target is checked; reference cycles are detected later,
/// when resources are mapped.
pub(crate) fn check_references(template: &Template) -> Result<(), AppError> {
    for resource in &template.resources {
        for (_, value) in &resource.properties {
            for site in value.reference_sites() {
                resolve(template, &resource.logical_name, site.target, site.requires_resource)?;
            }
        }
        for target in &resource.depends_on {
            resolve(template, &resource.logical_name, target, true)?;
        }
    }
    for output in &template.outputs {
        let values = std::iter::once(&output.value).chain(output.export_name.as_ref());
        for value in values {
            for site in value.reference_sites() {
                resolve(template, &output.name, site.target, site.requires_resource)?;
            }
        }
    }
    Ok(())
}

fn resolve(
    template: &Template,
    owner: &str,
    target: &str,
    requires_resource: bool,
) -> Result<(), AppError> {
    let found = if requires_resource {
        template.resource(target).is_some()
    } else {
        template.declares(target)
    };
    if found { Ok(()) } else { Err(AppError::unresolved(owner, target)) }
}
