//! Generation of the kintone PHP client from the vendored OpenAPI spec.
//!
//! The heavy lifting is done by openapi-generator; this crate finds the
//! newest spec snapshot, runs the generator into a staging directory and moves
//! the result into place. See [`Orchestrator`] for the workflow.

pub mod config;
pub mod error;
pub mod files;
pub mod generator;
pub mod orchestrator;
pub mod spec;
pub mod tooling;

pub use config::{GenerationRequest, GeneratorPaths};
pub use error::{GenerateError, Result};
pub use orchestrator::{GenerationReport, Orchestrator, Progress, Stage};
pub use spec::{SpecLocation, SpecVersion};
pub use tooling::Toolchain;
