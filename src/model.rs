//! In-memory structure and config models.
//!
//! Both documents are converted once from JSON into closed tagged variants, so
//! generators never inspect raw JSON at emission time. The [`Classify`] trait is
//! the type classifier shared by every generator.

use indexmap::IndexMap;
use log::warn;
use serde_json::Value;

/// Primitive kinds a leaf can have.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Primitive {
    /// Signed 32-bit integer, `"int"` in a structure model
    Int,
    /// Signed 64-bit integer, `"long"` in a structure model
    Long,
    /// Double precision float, `"double"` in a structure model
    Double,
    /// NUL-terminated string, `"char*"` in a structure model
    Text,
}

impl Primitive {
    /// Parses a structure type tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "int" => Some(Primitive::Int),
            "long" => Some(Primitive::Long),
            "double" => Some(Primitive::Double),
            "char*" => Some(Primitive::Text),
            _ => None,
        }
    }
}

/// Result of classifying a model node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Kind {
    Primitive(Primitive),
    Object,
    Array,
    /// Terminal classification. Generators skip such nodes.
    Unknown,
}

/// Type classifier contract.
pub trait Classify {
    /// Returns the kind of this node. Never fails.
    fn kind(&self) -> Kind;
}

/// A node of the structure (schema) tree.
#[derive(Debug, Clone, PartialEq)]
pub enum StructureModel {
    Primitive(Primitive),
    Object(IndexMap<String, StructureModel>),
    /// Homogeneous array, described by its representative element.
    Array(Box<StructureModel>),
    /// Anything the classifier does not recognize, kept with its original text.
    Unknown(String),
}

impl StructureModel {
    /// Converts a JSON schema value into a structure node.
    ///
    /// Only the first element of an array is kept. Elements after it are
    /// ignored without checking that they agree with the first one.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(tag) => match Primitive::from_tag(tag) {
                Some(primitive) => StructureModel::Primitive(primitive),
                None => StructureModel::Unknown(tag.clone()),
            },
            Value::Object(map) => StructureModel::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), StructureModel::from_value(child)))
                    .collect(),
            ),
            Value::Array(items) => match items.first() {
                Some(first) => {
                    if items.len() > 1 {
                        warn!(
                            "Array schema has {} elements, only the first one is used",
                            items.len()
                        );
                    }
                    StructureModel::Array(Box::new(StructureModel::from_value(first)))
                }
                None => StructureModel::Unknown(value.to_string()),
            },
            other => StructureModel::Unknown(other.to_string()),
        }
    }

    /// Returns the fields of an object node.
    pub fn fields(&self) -> Option<&IndexMap<String, StructureModel>> {
        match self {
            StructureModel::Object(fields) => Some(fields),
            _ => None,
        }
    }
}

impl Classify for StructureModel {
    fn kind(&self) -> Kind {
        match self {
            StructureModel::Primitive(primitive) => Kind::Primitive(*primitive),
            StructureModel::Object(_) => Kind::Object,
            StructureModel::Array(_) => Kind::Array,
            StructureModel::Unknown(_) => Kind::Unknown,
        }
    }
}

/// A node of the config (value) tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigModel {
    Text(String),
    Int(i64),
    Double(f64),
    Object(IndexMap<String, ConfigModel>),
    /// Non-empty sequence of values.
    Array(Vec<ConfigModel>),
    Unknown,
}

impl ConfigModel {
    /// An empty config, used when a generator has no values to work with.
    pub fn empty() -> Self {
        ConfigModel::Object(IndexMap::new())
    }

    /// Converts a JSON value into a config node.
    pub fn from_value(value: &Value) -> Self {
        match value {
            Value::String(s) => ConfigModel::Text(s.clone()),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    ConfigModel::Int(i)
                } else if let Some(f) = n.as_f64() {
                    if f.fract() == 0.0 && f >= i64::MIN as f64 && f <= i64::MAX as f64 {
                        ConfigModel::Int(f as i64)
                    } else {
                        ConfigModel::Double(f)
                    }
                } else {
                    ConfigModel::Unknown
                }
            }
            Value::Object(map) => ConfigModel::Object(
                map.iter()
                    .map(|(key, child)| (key.clone(), ConfigModel::from_value(child)))
                    .collect(),
            ),
            Value::Array(items) if !items.is_empty() => {
                ConfigModel::Array(items.iter().map(ConfigModel::from_value).collect())
            }
            _ => ConfigModel::Unknown,
        }
    }

    /// Kind of the elements of an array node, taken from its first element.
    pub fn element_kind(&self) -> Kind {
        match self {
            ConfigModel::Array(items) => items.first().map_or(Kind::Unknown, Classify::kind),
            _ => Kind::Unknown,
        }
    }
}

impl Classify for ConfigModel {
    fn kind(&self) -> Kind {
        match self {
            ConfigModel::Text(_) => Kind::Primitive(Primitive::Text),
            ConfigModel::Int(_) => Kind::Primitive(Primitive::Int),
            ConfigModel::Double(_) => Kind::Primitive(Primitive::Double),
            ConfigModel::Object(_) => Kind::Object,
            ConfigModel::Array(_) => Kind::Array,
            ConfigModel::Unknown => Kind::Unknown,
        }
    }
}
