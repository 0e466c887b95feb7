//! Release orchestration and the build step.
//!
//! The [`Bundler`] drives one release:
//! 1. Checks that no earlier output is in the way
//! 2. Builds the game with the platform's flags ([`toolchain`])
//! 3. Assembles the staging tree and bundles shared libraries
//! 4. Archives, cleans up and checksums the result
//!
//! # Module Organization
//!
//! - [`checksum`] - SHA256 checksum calculation for archives
//! - [`orchestrator`] - Main [`Bundler`] struct and pipeline states
//! - [`toolchain`] - Build toolchain invocation

pub mod checksum;
mod orchestrator;
pub mod toolchain;

pub use orchestrator::{Bundler, PipelineState, Stage};
pub use toolchain::BuiltExecutable;
