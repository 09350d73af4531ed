//! BSON serializer generator.
//!
//! Emits libbson calls that build a document mirroring the structure model.
//! Nested documents and arrays are built in a scratch buffer `children` with
//! one slot per nesting level, so the buffer is sized by the maximum depth.

use std::fmt;

use crate::emit::{CodeBuilder, LineEnding};
use crate::generator::{Artifact, Generator};
use crate::keypath::KeyPath;
use crate::model::{ConfigModel, Primitive, StructureModel};

/// Marker the BSON serializer is inserted under.
pub const MARKER: &str = "{{GENERATE_BSON}}";

/// Name of the pointer to the record being serialized.
const DATA_ROOT: &str = "data";

/// A BSON container a statement writes into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Container {
    /// The output document itself.
    Root,
    /// A slot of the `children` scratch buffer.
    Slot(usize),
}

impl Container {
    /// Container used at the given nesting depth.
    pub fn at_depth(depth: usize) -> Self {
        match depth {
            0 => Container::Root,
            d => Container::Slot(d - 1),
        }
    }
}

impl fmt::Display for Container {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Container::Root => write!(f, "*bson_document"),
            Container::Slot(index) => write!(f, "&children[{index}]"),
        }
    }
}

/// One generated statement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    NewDocument,
    AllocChildren { slots: usize },
    Append { kind: Primitive, container: Container, key: String, value: String },
    BeginDocument { parent: Container, key: String, child: Container },
    EndDocument { parent: Container, child: Container },
    BeginArray { parent: Container, key: String, child: Container },
    EndArray { parent: Container, child: Container },
    Destroy { child: Container },
    Loop { counter: String, count: String },
    OpenBlock,
    CloseBlock,
}

fn append_macro(kind: Primitive) -> &'static str {
    match kind {
        Primitive::Int => "BSON_APPEND_INT32",
        Primitive::Long => "BSON_APPEND_INT64",
        Primitive::Double => "BSON_APPEND_DOUBLE",
        Primitive::Text => "BSON_APPEND_UTF8",
    }
}

impl fmt::Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Statement::NewDocument => write!(f, "*bson_document = bson_new();"),
            Statement::AllocChildren { slots } => {
                write!(f, "bson_t *children = (bson_t*)malloc(sizeof(bson_t) * {slots});")
            }
            Statement::Append { kind, container, key, value } => {
                write!(f, "{}({container}, \"{key}\", {value});", append_macro(*kind))
            }
            Statement::BeginDocument { parent, key, child } => {
                write!(f, "BSON_APPEND_DOCUMENT_BEGIN({parent}, \"{key}\", {child});")
            }
            Statement::EndDocument { parent, child } => {
                write!(f, "bson_append_document_end({parent}, {child});")
            }
            Statement::BeginArray { parent, key, child } => {
                write!(f, "BSON_APPEND_ARRAY_BEGIN({parent}, \"{key}\", {child});")
            }
            Statement::EndArray { parent, child } => {
                write!(f, "bson_append_array_end({parent}, {child});")
            }
            Statement::Destroy { child } => write!(f, "bson_destroy({child});"),
            Statement::Loop { counter, count } => {
                write!(f, "for (int {counter} = 0; {counter} < ({count}); {counter}++)")
            }
            Statement::OpenBlock => write!(f, "{{"),
            Statement::CloseBlock => write!(f, "}}"),
        }
    }
}

/// Loop counter name for the given array nesting level: `i`, `j`, `k`, `k0`, `k1`, ...
pub fn loop_counter(level: usize) -> String {
    match level {
        0 => "i".to_string(),
        1 => "j".to_string(),
        2 => "k".to_string(),
        n => format!("k{}", n - 3),
    }
}

/// Number of scratch slots needed below the root document: the deepest chain
/// of nested documents and arrays under any root field.
pub fn max_depth(root: &StructureModel) -> usize {
    match root {
        StructureModel::Object(fields) => fields.values().map(nesting).max().unwrap_or(0),
        other => nesting(other),
    }
}

fn nesting(node: &StructureModel) -> usize {
    match node {
        StructureModel::Array(element) => 1 + nesting(element),
        StructureModel::Object(fields) => 1 + fields.values().map(nesting).max().unwrap_or(0),
        StructureModel::Primitive(_) | StructureModel::Unknown(_) => 0,
    }
}

/// Emission context threaded through the walk.
#[derive(Debug, Clone, Default)]
struct Scope {
    depth: usize,
    loops: usize,
    indent: usize,
    path: KeyPath,
}

impl Scope {
    fn container(&self) -> Container {
        Container::at_depth(self.depth)
    }

    fn field(&self, name: &str) -> Scope {
        Scope { path: self.path.field(name), ..self.clone() }
    }

    fn nested(&self) -> Scope {
        Scope { depth: self.depth + 1, ..self.clone() }
    }

    fn loop_body(&self, counter: &str) -> Scope {
        Scope {
            loops: self.loops + 1,
            indent: self.indent + 1,
            path: self.path.index(counter),
            ..self.clone()
        }
    }
}

/// Generator of the `{{GENERATE_BSON}}` block.
#[derive(Debug, Default, Clone, Copy)]
pub struct BsonGenerator;

impl BsonGenerator {
    /// Builds the statement list for a structure model.
    pub fn build(&self, structure: &StructureModel) -> CodeBuilder<Statement> {
        let mut out = CodeBuilder::new();
        out.push(0, Statement::NewDocument);
        out.push(0, Statement::AllocChildren { slots: max_depth(structure) });

        if let Some(fields) = structure.fields() {
            let root = Scope::default();
            for (name, child) in fields {
                walk(child, &root.field(name), &mut out);
            }
        }
        out
    }
}

fn walk(node: &StructureModel, scope: &Scope, out: &mut CodeBuilder<Statement>) {
    match node {
        StructureModel::Primitive(kind) => out.push(
            scope.indent,
            Statement::Append {
                kind: *kind,
                container: scope.container(),
                key: scope.path.container_key().to_string(),
                value: scope.path.access(DATA_ROOT),
            },
        ),
        StructureModel::Object(fields) => walk_object(fields, scope, out),
        StructureModel::Array(element) => walk_array(element, scope, out),
        StructureModel::Unknown(tag) => log::debug!("Skipping '{}' of unknown type {}", scope.path, tag),
    }
}

fn walk_object(
    fields: &indexmap::IndexMap<String, StructureModel>,
    scope: &Scope,
    out: &mut CodeBuilder<Statement>,
) {
    let parent = scope.container();
    let inner = scope.nested();
    let child = inner.container();

    out.push(
        scope.indent,
        Statement::BeginDocument { parent, key: scope.path.container_key().to_string(), child },
    );
    for (name, value) in fields {
        walk(value, &inner.field(name), out);
    }
    out.push(scope.indent, Statement::EndDocument { parent, child });
    out.push(scope.indent, Statement::Destroy { child });
}

fn walk_array(element: &StructureModel, scope: &Scope, out: &mut CodeBuilder<Statement>) {
    let parent = scope.container();
    let inner = scope.nested();
    let child = inner.container();
    let counter = loop_counter(scope.loops);

    out.push(
        scope.indent,
        Statement::BeginArray { parent, key: scope.path.container_key().to_string(), child },
    );
    out.push(
        scope.indent,
        Statement::Loop {
            counter: counter.clone(),
            count: format!("{}_count", scope.path.access(DATA_ROOT)),
        },
    );
    out.push(scope.indent, Statement::OpenBlock);
    walk(element, &inner.loop_body(&counter), out);
    out.push(scope.indent, Statement::CloseBlock);
    out.push(scope.indent, Statement::EndArray { parent, child });
    out.push(scope.indent, Statement::Destroy { child });
}

impl Generator for BsonGenerator {
    fn name(&self) -> &'static str {
        "bson"
    }

    fn marker(&self) -> &'static str {
        MARKER
    }

    fn generate(&self, structure: &StructureModel, _config: &ConfigModel) -> Artifact {
        Artifact {
            generator: self.name(),
            marker: MARKER,
            code: self.build(structure).render(LineEnding::Terminated),
        }
    }
}
