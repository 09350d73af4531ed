//! Error handling for splicegen.
//! Defines the crate-wide error type and the result alias used throughout.

use std::io;
use thiserror::Error;

use crate::substitute::MarkerError;

/// Errors that can occur while loading models, generating code or splicing templates.
///
/// Classification gaps and unsupported print formats are never reported here:
/// generators skip them locally and keep going.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    IoError(#[from] io::Error),

    /// A structure or config model could not be read or has the wrong shape.
    #[error("Failed to load model '{path}': {reason}.")]
    ModelError { path: String, reason: String },

    /// Represents errors that occur during configuration parsing or processing
    #[error("Configuration error: {0}.")]
    ConfigError(String),

    /// Represents errors in processing ignore patterns
    #[error("Ignore pattern error: {0}.")]
    IgnoreError(String),

    /// A generator requested on the command line or in the config is not registered.
    #[error("Unknown generator '{name}' (available: {available}).")]
    UnknownGenerator { name: String, available: String },

    /// A template could not be spliced; the template is left untouched.
    #[error("Template '{template}': {source}.")]
    MarkerError {
        template: String,
        #[source]
        source: MarkerError,
    },

    /// The source directory does not exist.
    #[error("Source directory '{source_dir}' does not exist.")]
    SourceDirectoryNotFound { source_dir: String },

    /// One or more templates failed; the others were still processed.
    #[error("{count} template(s) failed to generate.")]
    TemplatesFailed { count: usize },

    /// `--check` found outputs that differ from what would be generated.
    #[error("{count} generated file(s) are out of date.")]
    StaleOutputs { count: usize },

    /// Directory traversal failed.
    #[error("Failed to walk '{path}': {reason}.")]
    WalkError { path: String, reason: String },
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
