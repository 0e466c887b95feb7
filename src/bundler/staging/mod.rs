//! Staging tree assembly and platform dependency bundling.
//!
//! - [`assemble`] builds the staging directory from the asset layout
//! - [`bundle_dependencies`] adds the platform's shared libraries
//! - [`entry_filter`] turns a filter policy into a walk predicate

mod assembler;
mod dependencies;
mod filter;

pub use assembler::{StagingRoot, assemble, staging_path};
pub use dependencies::bundle_dependencies;
pub use filter::entry_filter;
