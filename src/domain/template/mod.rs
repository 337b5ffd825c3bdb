//! Template parsing: raw JSON/YAML document → structured [`Template`].

mod intrinsic;
mod model;
mod parse;
mod references;

pub use intrinsic::{MAX_DEPTH, parse_sub_template};
pub use model::{
    Intrinsic, OutputSpec, ParameterSpec, PropertyValue, PseudoParameter, ReferenceSite,
    ResourceSpec, SubPart, Template,
};
pub use parse::{DocumentFormat, parse};
