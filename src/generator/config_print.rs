//! Config printer generator.
//!
//! Emits one `printf` per primitive config value and a `printStringsArray`
//! call per array of strings, labelled with the dotted key path.

use std::fmt;

use crate::emit::{CodeBuilder, LineEnding};
use crate::generator::{Artifact, Generator};
use crate::keypath::KeyPath;
use crate::model::{Classify, ConfigModel, Kind, Primitive, StructureModel};

/// Marker the config printer is inserted under.
pub const MARKER: &str = "{{GENERATE_CONFIG_PRINT}}";

/// Name of the pointer to the loaded configuration.
const CONFIG_ROOT: &str = "config";

/// One generated statement. Paths are already rendered access expressions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    /// Prints `path:<TAB>value`.
    Value { path: String, placeholder: &'static str },
    /// Prints only the label of an array.
    Label { path: String },
    /// Prints an array of strings through the runtime helper.
    StringArray { path: String },
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::Value { path, placeholder } => {
                write!(f, "printf(\"{path}:\\t{placeholder}\\n\", {path});")
            }
            Statement::Label { path } => write!(f, "printf(\"{path}: \");"),
            Statement::StringArray { path } => {
                write!(f, "printStringsArray({path}, {path}_count);")
            }
        }
    }
}

/// `printf` placeholder for a primitive value.
pub fn placeholder(kind: Primitive) -> &'static str {
    match kind {
        Primitive::Text => "%s",
        Primitive::Int | Primitive::Long => "%d",
        Primitive::Double => "%f",
    }
}

/// Generator of the `{{GENERATE_CONFIG_PRINT}}` block.
#[derive(Debug, Default, Clone, Copy)]
pub struct ConfigPrintGenerator;

impl ConfigPrintGenerator {
    /// Builds the statement list for a config model.
    pub fn build(&self, config: &ConfigModel) -> CodeBuilder<Statement> {
        let mut out = CodeBuilder::new();
        if let ConfigModel::Object(fields) = config {
            walk(fields, &KeyPath::new(), &mut out);
        }
        out
    }
}

fn walk(
    fields: &indexmap::IndexMap<String, ConfigModel>,
    path: &KeyPath,
    out: &mut CodeBuilder<Statement>,
) {
    for (key, value) in fields {
        let path = path.field(key);
        match value.kind() {
            Kind::Object => {
                if let ConfigModel::Object(children) = value {
                    walk(children, &path, out);
                }
            }
            Kind::Array => push_array(value.element_kind(), &path, out),
            Kind::Primitive(kind) => out.push(
                1,
                Statement::Value { path: path.access(CONFIG_ROOT), placeholder: placeholder(kind) },
            ),
            Kind::Unknown => {}
        }
    }
}

fn push_array(element: Kind, path: &KeyPath, out: &mut CodeBuilder<Statement>) {
    match element {
        Kind::Primitive(Primitive::Text) => {
            let path = path.access(CONFIG_ROOT);
            out.push(1, Statement::Label { path: path.clone() });
            out.push(1, Statement::StringArray { path });
        }
        // No print format exists for numeric arrays yet.
        Kind::Primitive(_) => {
            log::debug!("No print format for numeric array '{}'", path.access(CONFIG_ROOT))
        }
        Kind::Object | Kind::Array | Kind::Unknown => {}
    }
}

impl Generator for ConfigPrintGenerator {
    fn name(&self) -> &'static str {
        "config-print"
    }

    fn marker(&self) -> &'static str {
        MARKER
    }

    fn generate(&self, _structure: &StructureModel, config: &ConfigModel) -> Artifact {
        Artifact {
            generator: self.name(),
            marker: MARKER,
            code: self.build(config).render(LineEnding::Separated),
        }
    }
}
