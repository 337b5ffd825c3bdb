use thiserror::Error;

/// Non-fatal findings from mapping. The generated code is still emitted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MappingWarning {
    #[error("Resource '{logical_name}' has unsupported type '{resource_type}'; left a TODO placeholder")]
    UnsupportedResourceType { logical_name: String, resource_type: String },

    #[error("'{owner}' uses unsupported intrinsic '{function}'; passed through unchanged")]
    UnsupportedIntrinsic { owner: String, function: String },

    #[error("'{owner}' is conditional on '{condition}'; the condition was not migrated")]
    ConditionNotMigrated { owner: String, condition: String },

    #[error("DependsOn from '{logical_name}' to '{dependency}' skipped: unsupported resource")]
    DependencySkipped { logical_name: String, dependency: String },
}
