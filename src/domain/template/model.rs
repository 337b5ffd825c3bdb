//! Parsed template model.

/// A property value: literal scalar, nested structure, or intrinsic expression.
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyValue {
    Null,
    Bool(bool),
    /// Number in its source spelling.
    Number(String),
    String(String),
    Sequence(Vec<PropertyValue>),
    /// Ordered key/value pairs.
    Mapping(Vec<(String, PropertyValue)>),
    Intrinsic(Box<Intrinsic>),
}

impl PropertyValue {
    pub fn string(value: impl Into<String>) -> Self {
        PropertyValue::String(value.into())
    }

    pub fn intrinsic(intrinsic: Intrinsic) -> Self {
        PropertyValue::Intrinsic(Box::new(intrinsic))
    }

    /// Every name this value reads, in source order.
    pub fn reference_sites(&self) -> Vec<ReferenceSite<'_>> {
        let mut sites = Vec::new();
        self.collect_sites(&mut sites);
        sites
    }

    fn collect_sites<'a>(&'a self, sites: &mut Vec<ReferenceSite<'a>>) {
        match self {
            PropertyValue::Null
            | PropertyValue::Bool(_)
            | PropertyValue::Number(_)
            | PropertyValue::String(_) => {}
            PropertyValue::Sequence(items) => {
                for item in items {
                    item.collect_sites(sites);
                }
            }
            PropertyValue::Mapping(entries) => {
                for (_, value) in entries {
                    value.collect_sites(sites);
                }
            }
            PropertyValue::Intrinsic(intrinsic) => intrinsic.collect_sites(sites),
        }
    }
}

/// A point where an expression reads a declared name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceSite<'a> {
    pub target: &'a str,
    /// Attribute reads require the target to be a resource.
    pub requires_resource: bool,
}

/// Intrinsic function applications.
#[derive(Debug, Clone, PartialEq)]
pub enum Intrinsic {
    /// `Ref` to a parameter or resource.
    Reference(String),
    /// `Ref` to a pseudo parameter such as `AWS::Region`.
    Pseudo(PseudoParameter),
    /// `Fn::GetAtt`.
    Attribute { target: String, attribute: String },
    /// `Fn::Join`; `parts` is usually a sequence.
    Join { delimiter: String, parts: PropertyValue },
    /// `Fn::Sub`, with the template string already split into parts.
    Substitute { parts: Vec<SubPart>, variables: Vec<(String, PropertyValue)> },
    /// `Fn::Select`.
    Select { index: PropertyValue, list: PropertyValue },
    /// `Fn::Split`.
    Split { delimiter: String, source: PropertyValue },
    /// `Fn::ImportValue`.
    ImportValue(PropertyValue),
    /// `Fn::Base64`.
    Base64(PropertyValue),
    /// `Fn::GetAZs`.
    GetAzs(PropertyValue),
}

impl Intrinsic {
    fn collect_sites<'a>(&'a self, sites: &mut Vec<ReferenceSite<'a>>) {
        match self {
            Intrinsic::Reference(target) => {
                sites.push(ReferenceSite { target, requires_resource: false })
            }
            Intrinsic::Pseudo(_) => {}
            Intrinsic::Attribute { target, .. } => {
                sites.push(ReferenceSite { target, requires_resource: true })
            }
            Intrinsic::Join { parts, .. } => parts.collect_sites(sites),
            Intrinsic::Substitute { parts, variables } => {
                for (_, value) in variables {
                    value.collect_sites(sites);
                }
                for part in parts {
                    match part {
                        SubPart::Name(target) => {
                            sites.push(ReferenceSite { target, requires_resource: false })
                        }
                        SubPart::Attribute { target, .. } => {
                            sites.push(ReferenceSite { target, requires_resource: true })
                        }
                        SubPart::Text(_) | SubPart::Variable(_) | SubPart::Pseudo(_) => {}
                    }
                }
            }
            Intrinsic::Select { index, list } => {
                index.collect_sites(sites);
                list.collect_sites(sites);
            }
            Intrinsic::Split { source, .. } => source.collect_sites(sites),
            Intrinsic::ImportValue(value) | Intrinsic::Base64(value) | Intrinsic::GetAzs(value) => {
                value.collect_sites(sites)
            }
        }
    }
}

/// One segment of an `Fn::Sub` template string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubPart {
    Text(String),
    /// `${Name}` bound by the substitution's own variable map.
    Variable(String),
    /// `${Name}` naming a parameter or resource.
    Name(String),
    /// `${Name.Attr}`.
    Attribute { target: String, attribute: String },
    /// `${AWS::Region}` and friends.
    Pseudo(PseudoParameter),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PseudoParameter {
    AccountId,
    NotificationArns,
    NoValue,
    Partition,
    Region,
    StackId,
    StackName,
    UrlSuffix,
}

impl PseudoParameter {
    pub const ALL: [PseudoParameter; 8] = [
        PseudoParameter::AccountId,
        PseudoParameter::NotificationArns,
        PseudoParameter::NoValue,
        PseudoParameter::Partition,
        PseudoParameter::Region,
        PseudoParameter::StackId,
        PseudoParameter::StackName,
        PseudoParameter::UrlSuffix,
    ];

    pub fn name(self) -> &'static str {
        match self {
            PseudoParameter::AccountId => "AWS::AccountId",
            PseudoParameter::NotificationArns => "AWS::NotificationARNs",
            PseudoParameter::NoValue => "AWS::NoValue",
            PseudoParameter::Partition => "AWS::Partition",
            PseudoParameter::Region => "AWS::Region",
            PseudoParameter::StackId => "AWS::StackId",
            PseudoParameter::StackName => "AWS::StackName",
            PseudoParameter::UrlSuffix => "AWS::URLSuffix",
        }
    }

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|pseudo| pseudo.name() == name)
    }
}

/// A declared template parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSpec {
    pub name: String,
    /// Free-form type such as `String`, `Number` or `List<AWS::EC2::Subnet::Id>`.
    pub declared_type: String,
    pub description: Option<String>,
    pub default: Option<PropertyValue>,
    pub allowed_values: Option<Vec<PropertyValue>>,
    /// Remaining constraint attributes (`AllowedPattern`, `MinLength`, `NoEcho`, ...) in source order.
    pub constraints: Vec<(String, PropertyValue)>,
}

impl ParameterSpec {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            declared_type: declared_type.into(),
            description: None,
            default: None,
            allowed_values: None,
            constraints: Vec::new(),
        }
    }
}

/// A declared resource.
#[derive(Debug, Clone, PartialEq)]
pub struct ResourceSpec {
    pub logical_name: String,
    /// Namespaced type identifier, e.g. `AWS::S3::Bucket`.
    pub resource_type: String,
    pub properties: Vec<(String, PropertyValue)>,
    pub depends_on: Vec<String>,
    pub condition: Option<String>,
}

impl ResourceSpec {
    pub fn new(logical_name: impl Into<String>, resource_type: impl Into<String>) -> Self {
        Self {
            logical_name: logical_name.into(),
            resource_type: resource_type.into(),
            properties: Vec::new(),
            depends_on: Vec::new(),
            condition: None,
        }
    }

    pub fn with_property(mut self, name: impl Into<String>, value: PropertyValue) -> Self {
        self.properties.push((name.into(), value));
        self
    }
}

/// A declared stack output.
#[derive(Debug, Clone, PartialEq)]
pub struct OutputSpec {
    pub name: String,
    pub value: PropertyValue,
    pub description: Option<String>,
    pub export_name: Option<PropertyValue>,
    pub condition: Option<String>,
}

/// The parsed declarative document.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub parameters: Vec<ParameterSpec>,
    /// Declaration order is emission order.
    pub resources: Vec<ResourceSpec>,
    pub outputs: Vec<OutputSpec>,
    pub conditions: Vec<(String, PropertyValue)>,
}

impl Template {
    pub fn with_parameters(parameters: Vec<ParameterSpec>) -> Self {
        Self { parameters, ..Self::default() }
    }

    pub fn parameter(&self, name: &str) -> Option<&ParameterSpec> {
        self.parameters.iter().find(|p| p.name == name)
    }

    pub fn resource(&self, name: &str) -> Option<&ResourceSpec> {
        self.resources.iter().find(|r| r.logical_name == name)
    }

    /// Position of a resource in declaration order.
    pub fn resource_index(&self, name: &str) -> Option<usize> {
        self.resources.iter().position(|r| r.logical_name == name)
    }

    /// Whether `name` is a declared parameter or resource.
    pub fn declares(&self, name: &str) -> bool {
        self.parameter(name).is_some() || self.resource(name).is_some()
    }
}
