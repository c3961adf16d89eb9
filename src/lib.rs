//! Generate ERD source and Markdown data dictionaries from a model registry.
//!
//! The pipeline is: load a [`registry::Registry`], collect
//! [`model::ModelDescriptor`]s with a [`model::Collector`], then render with
//! [`erd::render`] or [`dictionary::render`].

pub mod dictionary;
pub mod erd;
pub mod error;
pub mod json_schema;
pub mod model;
pub mod registry;

pub use error::{Error, Result};
