//! Command-line interface implementation for splicegen.
//! Provides argument parsing and help text formatting using clap.

use clap::Parser;
use std::path::PathBuf;

/// Command-line arguments structure for splicegen.
#[derive(Parser, Debug)]
#[command(
    author,
    version,
    about = "splicegen: generate C boilerplate from structure and config models",
    long_about = None
)]
pub struct Args {
    /// Directory holding the models and the `*.template.*` files
    #[arg(value_name = "SOURCE_DIR", default_value = ".")]
    pub source_dir: PathBuf,

    /// Structure model file [default: SOURCE_DIR/structure.model.json]
    #[arg(long, value_name = "FILE")]
    pub structure: Option<PathBuf>,

    /// Config model file [default: SOURCE_DIR/config.model.json]
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Run only the named generator (can be repeated)
    #[arg(short, long = "generator", value_name = "NAME")]
    pub generators: Vec<String>,

    /// Do not write anything, fail if a generated file is out of date
    #[arg(long)]
    pub check: bool,

    /// Enable verbose logging output
    #[arg(short, long)]
    pub verbose: bool,
}

/// Parses command line arguments and returns the Args structure.
///
/// # Exits
/// * With clap's default error handling on invalid arguments
pub fn get_args() -> Args {
    Args::parse()
}
