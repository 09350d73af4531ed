//! Code generators and their registry.
//!
//! A generator turns the models into one block of code and names the marker
//! the block belongs under. Generators keep no state between runs.

use crate::error::{Error, Result};
use crate::model::{ConfigModel, StructureModel};

pub mod bson;
pub mod config_print;

pub use bson::BsonGenerator;
pub use config_print::ConfigPrintGenerator;

/// Output of one generator run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Artifact {
    /// Name of the generator that produced the code
    pub generator: &'static str,
    /// Marker the code is inserted under
    pub marker: &'static str,
    /// Generated code
    pub code: String,
}

/// Trait implemented by every code generator.
pub trait Generator {
    /// Name used to select the generator from the command line.
    fn name(&self) -> &'static str;

    /// Marker the generated block belongs under.
    fn marker(&self) -> &'static str;

    /// Generates code for the given models.
    ///
    /// # Arguments
    /// * `structure` - Structure model, read only
    /// * `config` - Config model, read only
    ///
    /// # Returns
    /// * `Artifact` - The generated block and its marker
    fn generate(&self, structure: &StructureModel, config: &ConfigModel) -> Artifact;
}

/// Every generator available to a run.
pub fn generators() -> Vec<Box<dyn Generator>> {
    vec![Box::new(BsonGenerator), Box::new(ConfigPrintGenerator)]
}

/// Returns the registered generators, restricted to `names` when it is not empty.
///
/// # Errors
/// * `Error::UnknownGenerator` if a name does not match any registered generator
pub fn select(names: &[String]) -> Result<Vec<Box<dyn Generator>>> {
    let registered = generators();
    if names.is_empty() {
        return Ok(registered);
    }

    if let Some(unknown) =
        names.iter().find(|name| !registered.iter().any(|g| g.name() == name.as_str()))
    {
        return Err(Error::UnknownGenerator {
            name: unknown.clone(),
            available: registered.iter().map(|g| g.name()).collect::<Vec<_>>().join(", "),
        });
    }

    Ok(registered
        .into_iter()
        .filter(|g| names.iter().any(|name| name == g.name()))
        .collect())
}

/// Runs every generator once against the models.
pub fn run_all(
    generators: &[Box<dyn Generator>],
    structure: &StructureModel,
    config: &ConfigModel,
) -> Vec<Artifact> {
    generators
        .iter()
        .map(|generator| {
            log::debug!("Running generator '{}'", generator.name());
            generator.generate(structure, config)
        })
        .collect()
}
