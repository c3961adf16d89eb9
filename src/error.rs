//! Error types shared by the collector and the formatters.

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading a registry, collecting models or writing output.
///
/// Every variant is fatal: generation is all-or-nothing, so callers surface
/// the message and exit without writing anything.
#[derive(Error, Debug)]
pub enum Error {
    /// An application label passed via `--apps` is not in the registry
    #[error("unknown app '{label}'. Known apps: {}", known.join(", "))]
    UnknownApp { label: String, known: Vec<String> },

    /// A field kind has no entry in the storage-type table
    #[error("unsupported field type '{kind}' on {app}.{model}.{field}")]
    UnsupportedFieldType {
        app: String,
        model: String,
        field: String,
        kind: String,
    },

    /// The requested ERD dialect does not exist
    #[error("unknown dialect '{0}'. Valid options: {names}", names = crate::erd::Dialect::names())]
    UnsupportedDialect(String),

    /// The output destination could not be written
    #[error("failed to write output to '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The registry document could not be read or parsed
    #[error("failed to load registry '{path}': {details}")]
    Registry { path: PathBuf, details: String },

    /// Two application entries share a label
    #[error("duplicate app label '{label}'")]
    DuplicateApp { label: String },

    /// Two models in one application share a name
    #[error("duplicate model '{model}' in app '{app}'")]
    DuplicateModel { app: String, model: String },

    /// A relation points at a model that exists nowhere in the registry
    #[error("{app}.{model}.{field} references unknown model '{target}'")]
    DanglingRelation {
        app: String,
        model: String,
        field: String,
        target: String,
    },

    /// A relational field kind was declared without a target
    #[error("{app}.{model}.{field} is a {kind} but has no 'to' target")]
    MissingRelationTarget {
        app: String,
        model: String,
        field: String,
        kind: String,
    },

    /// An `--exclude` glob pattern failed to compile
    #[error("invalid exclude pattern '{pattern}': {details}")]
    InvalidPattern { pattern: String, details: String },
}

pub type Result<T> = std::result::Result<T, Error>;
