//! splicegen's main application entry point and orchestration logic.
//! Handles command-line argument parsing, model loading, and drives the
//! generators and the template processor.

use splicegen::{
    cli::{get_args, Args},
    config::load_config,
    constants::IGNORE_FILE,
    error::{default_error_handler, Error, Result},
    generator::{run_all, select},
    ignore::parse_ignore_file,
    loader::{load_config_model, load_structure_model},
    processor::{ensure_source_dir, Processor},
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Trace
        } else {
            log::LevelFilter::Off
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Loads the project configuration and both models
/// 2. Runs the selected generators once
/// 3. Builds the ignore patterns and discovers templates
/// 4. Splices the generated code into every template and writes the outputs
fn run(args: Args) -> Result<()> {
    let source_dir = ensure_source_dir(&args.source_dir)?;
    let config = load_config(&source_dir)?;

    let structure =
        load_structure_model(config.structure_path(&source_dir, args.structure.as_deref()))?;
    let config_model = load_config_model(config.config_path(&source_dir, args.config.as_deref()))?;

    let names = if args.generators.is_empty() { &config.generators } else { &args.generators };
    let generators = select(names)?;
    let artifacts = run_all(&generators, &structure, &config_model);

    let ignored_patterns = parse_ignore_file(source_dir.join(IGNORE_FILE), &config.exclude)?;
    let processor = Processor::new(&source_dir, &artifacts, &ignored_patterns);

    let templates = processor.discover()?;
    let summary = processor.run(&templates, args.check);

    for result in &summary.processed {
        println!("{}: '{}'", result.action.describe(args.check), result.target.display());
    }
    for (template, e) in &summary.failures {
        eprintln!("{}: {e}", template.display());
    }

    if !summary.failures.is_empty() {
        return Err(Error::TemplatesFailed { count: summary.failures.len() });
    }
    if summary.stale > 0 {
        return Err(Error::StaleOutputs { count: summary.stale });
    }

    println!(
        "Processed {} template(s) in {} with {} generator(s).",
        templates.len(),
        source_dir.display(),
        artifacts.len()
    );
    Ok(())
}
