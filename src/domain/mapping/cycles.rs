//! Reference cycle detection over the resource graph.

use crate::domain::AppError;
use crate::domain::template::Template;

#[derive(Clone, Copy, PartialEq, Eq)]
enum Mark {
    Unvisited,
    InProgress,
    Done,
}

/// Fail with `ReferenceCycle` when resources reach themselves through
/// `Ref`, `Fn::GetAtt`, `Fn::Sub` placeholders or `DependsOn`.
///
/// Resources are visited in declaration order, so the reported cycle is stable.
pub(crate) fn check_cycles(template: &Template) -> Result<(), AppError> {
    let edges = edges(template);
    let mut marks = vec![Mark::Unvisited; edges.len()];
    let mut path = Vec::new();

    for start in 0..edges.len() {
        if marks[start] == Mark::Unvisited {
            visit(start, &edges, &mut marks, &mut path, template)?;
        }
    }
    Ok(())
}

/// Outgoing resource indices per resource, deduplicated in first-seen order.
fn edges(template: &Template) -> Vec<Vec<usize>> {
    template
        .resources
        .iter()
        .map(|resource| {
            let referenced = resource
                .properties
                .iter()
                .flat_map(|(_, value)| value.reference_sites())
                .map(|site| site.target)
                .chain(resource.depends_on.iter().map(String::as_str));

            let mut targets = Vec::new();
            for target in referenced {
                if let Some(index) = template.resource_index(target)
                    && !targets.contains(&index)
                {
                    targets.push(index);
                }
            }
            targets
        })
        .collect()
}

fn visit(
    node: usize,
    edges: &[Vec<usize>],
    marks: &mut [Mark],
    path: &mut Vec<usize>,
    template: &Template,
) -> Result<(), AppError> {
    marks[node] = Mark::InProgress;
    path.push(node);

    for &next in &edges[node] {
        match marks[next] {
            Mark::Done => {}
            Mark::InProgress => return Err(cycle_error(next, path, template)),
            Mark::Unvisited => visit(next, edges, marks, path, template)?,
        }
    }

    path.pop();
    marks[node] = Mark::Done;
    Ok(())
}

fn cycle_error(repeated: usize, path: &[usize], template: &Template) -> AppError {
    let start = path.iter().position(|&n| n == repeated).unwrap_or(0);
    let names: Vec<&str> = path[start..]
        .iter()
        .chain(std::iter::once(&repeated))
        .map(|&n| template.resources[n].logical_name.as_str())
        .collect();
    AppError::ReferenceCycle { cycle: names.join(" -> ") }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::template::{Intrinsic, PropertyValue, ResourceSpec};

    fn reference(target: &str) -> PropertyValue {
        PropertyValue::intrinsic(Intrinsic::Reference(target.into()))
    }

    fn cycle_of(template: &Template) -> String {
        match check_cycles(template) {
            Err(AppError::ReferenceCycle { cycle }) => cycle,
            other => panic!("expected a cycle, got {other:?}"),
        }
    }

    #[test]
    fn acyclic_forward_references_pass() {
        let template = Template {
            resources: vec![
                ResourceSpec::new("Alarm", "AWS::CloudWatch::Alarm")
                    .with_property("Topic", reference("Topic")),
                ResourceSpec::new("Topic", "AWS::SNS::Topic"),
            ],
            ..Template::default()
        };
        assert!(check_cycles(&template).is_ok());
    }

    #[test]
    fn two_resource_cycle_is_named() {
        let template = Template {
            resources: vec![
                ResourceSpec::new("A", "AWS::SNS::Topic").with_property("X", reference("B")),
                ResourceSpec::new("B", "AWS::SNS::Topic").with_property(
                    "Y",
                    PropertyValue::intrinsic(Intrinsic::Attribute {
                        target: "A".into(),
                        attribute: "Arn".into(),
                    }),
                ),
            ],
            ..Template::default()
        };
        assert_eq!(cycle_of(&template), "A -> B -> A");
    }

    #[test]
    fn self_reference_is_a_cycle() {
        let template = Template {
            resources: vec![
                ResourceSpec::new("Queue", "AWS::SQS::Queue").with_property("Q", reference("Queue")),
            ],
            ..Template::default()
        };
        assert_eq!(cycle_of(&template), "Queue -> Queue");
    }

    #[test]
    fn depends_on_participates() {
        let mut first = ResourceSpec::new("First", "AWS::S3::Bucket");
        first.depends_on.push("Second".into());
        let second = ResourceSpec::new("Second", "AWS::S3::Bucket").with_property("P", reference("First"));

        let template = Template { resources: vec![first, second], ..Template::default() };
        assert_eq!(cycle_of(&template), "First -> Second -> First");
    }
}
