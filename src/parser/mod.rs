//! Parser layer
//! - error.rs: ParseError
//! - types.rs: Descriptor types (BuildpackDescriptor, DependencyConstraint)
//! - buildpack_toml.rs: buildpack.toml parser

pub mod buildpack_toml;
pub mod error;
pub mod types;

pub use buildpack_toml::BuildpackTomlParser;
pub use error::ParseError;
pub use types::{BuildpackDescriptor, DependencyConstraint, DescriptorDependency};
