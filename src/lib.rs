//! cdkgen: convert CloudFormation templates into Guardian-flavoured CDK stacks.

pub mod adapters;
pub mod app;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod testing;

pub use app::api::{
    MigrateOptions, MigrateOutcome, NewOptions, NewOutcome, migrate, migrate_at, new_stack,
};
pub use domain::AppError;
pub use domain::mapping::MappingWarning;
