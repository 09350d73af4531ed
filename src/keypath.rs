//! Key paths: the accesses needed to reach a leaf from the root record.

use std::fmt;

/// One step of a key path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Access to a named field of an object.
    Field(String),
    /// Access to an array element through a loop counter.
    Index(String),
}

/// An immutable key path.
///
/// Descending returns a new path, so the caller's path is untouched once the
/// recursive call returns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyPath {
    segments: Vec<Segment>,
}

impl KeyPath {
    pub fn new() -> Self {
        Self::default()
    }

    /// Path extended with an object field access.
    pub fn field(&self, name: &str) -> Self {
        self.with(Segment::Field(name.to_string()))
    }

    /// Path extended with an array element access through `counter`.
    pub fn index(&self, counter: &str) -> Self {
        self.with(Segment::Index(counter.to_string()))
    }

    fn with(&self, segment: Segment) -> Self {
        let mut segments = self.segments.clone();
        segments.push(segment);
        Self { segments }
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    /// Key under which the current value is stored in its container:
    /// the field name, or `0` for an array element.
    pub fn container_key(&self) -> &str {
        match self.segments.last() {
            Some(Segment::Field(name)) => name,
            Some(Segment::Index(_)) | None => "0",
        }
    }

    /// Renders the access expression starting from a pointer named `root`,
    /// e.g. `data->items[i].name`.
    pub fn access(&self, root: &str) -> String {
        let mut out = String::from(root);
        for (position, segment) in self.segments.iter().enumerate() {
            match segment {
                Segment::Field(name) if position == 0 => {
                    out.push_str("->");
                    out.push_str(name);
                }
                Segment::Field(name) => {
                    out.push('.');
                    out.push_str(name);
                }
                Segment::Index(counter) => {
                    out.push('[');
                    out.push_str(counter);
                    out.push(']');
                }
            }
        }
        out
    }
}

impl fmt::Display for KeyPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for segment in &self.segments {
            match segment {
                Segment::Field(name) => write!(f, ".{name}")?,
                Segment::Index(counter) => write!(f, "[{counter}]")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_access_linearization() {
        let path = KeyPath::new().field("a").field("b").index("i");
        assert_eq!(path.access("data"), "data->a.b[i]");
        assert_eq!(path.to_string(), ".a.b[i]");
    }

    #[test]
    fn test_descend_leaves_parent_untouched() {
        let parent = KeyPath::new().field("items");
        let child = parent.index("i").field("name");
        assert_eq!(parent.len(), 1);
        assert_eq!(child.len(), 3);
        assert_eq!(child.access("data"), "data->items[i].name");
    }

    #[test]
    fn test_container_key() {
        let path = KeyPath::new().field("items");
        assert_eq!(path.container_key(), "items");
        assert_eq!(path.index("j").container_key(), "0");
    }
}
