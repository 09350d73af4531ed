//! splicegen generates repetitive C routines from a structure model and a
//! config model, and splices them into template files at marked lines.
//! It provides the model types, the code generators and the substitution
//! engine, plus the pieces the command-line tool is wired from.

/// Command-line interface module for splicegen
pub mod cli;

/// Project configuration handling
/// Supports JSON and YAML formats (splicegen.json, splicegen.yml, splicegen.yaml)
pub mod config;

/// Common constants
pub mod constants;

/// Statement builder shared by the generators
pub mod emit;

/// Error types and handling for splicegen
pub mod error;

/// Code generators and the generator registry
pub mod generator;

/// Exclusion patterns for template discovery
/// Processes .splicegenignore files
pub mod ignore;

/// Key paths used to address leaves of the models
pub mod keypath;

/// Loading of the JSON model documents
pub mod loader;

/// Structure and config models and the type classifier
pub mod model;

/// Template discovery and per-file splicing
pub mod processor;

/// Marker parsing and insertion of generated code
pub mod substitute;
