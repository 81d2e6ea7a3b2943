//! Schema model: the ordered list of record kinds
//!
//! Schema order decides both the order of generated declarations and the
//! order of sections in the blob. The blob carries no kind tags, so the
//! encoder and every reader must iterate the same schema.

mod kind;
pub mod names;

pub use kind::{FIELD_SIZE, KindDescriptor};

use crate::error::{Error, Result};
use std::collections::HashSet;
use std::path::Path;

/// Ordered, immutable list of kind descriptors
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    kinds: Vec<KindDescriptor>,
}

impl Schema {
    /// Build a schema, rejecting malformed or conflicting descriptors
    pub fn new(kinds: Vec<KindDescriptor>) -> Result<Self> {
        validate(&kinds)?;
        Ok(Self { kinds })
    }

    /// The built-in map schema: trees as `(x, y)` points
    pub fn map_default() -> Self {
        Self {
            kinds: vec![KindDescriptor::new("tree", "trees", ["x", "y"])],
        }
    }

    /// Parse a schema from a JSON array of descriptors
    pub fn from_json_str(json: &str) -> Result<Self> {
        let kinds: Vec<KindDescriptor> = serde_json::from_str(json)?;
        Self::new(kinds)
    }

    /// Load a schema configuration file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_json_str(&json)
    }

    pub fn kinds(&self) -> &[KindDescriptor] {
        &self.kinds
    }

    pub fn iter(&self) -> std::slice::Iter<'_, KindDescriptor> {
        self.kinds.iter()
    }

    pub fn len(&self) -> usize {
        self.kinds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.kinds.is_empty()
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a KindDescriptor;
    type IntoIter = std::slice::Iter<'a, KindDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.kinds.iter()
    }
}

fn validate(kinds: &[KindDescriptor]) -> Result<()> {
    let mut type_names = HashSet::new();
    let mut members = HashSet::new();

    for kind in kinds {
        if !names::is_identifier(&kind.name) {
            return Err(Error::InvalidSchema(format!(
                "kind name {:?} is not an identifier",
                kind.name
            )));
        }
        if !names::is_identifier(&kind.json_key) {
            return Err(Error::InvalidSchema(format!(
                "json key {:?} of kind '{}' is not an identifier",
                kind.json_key, kind.name
            )));
        }
        if kind.field_names.is_empty() {
            return Err(Error::InvalidSchema(format!(
                "kind '{}' has no fields",
                kind.name
            )));
        }
        if kind.field_count != kind.field_names.len() {
            return Err(Error::InvalidSchema(format!(
                "kind '{}' declares {} fields but names {}",
                kind.name,
                kind.field_count,
                kind.field_names.len()
            )));
        }

        let mut fields = HashSet::new();
        for field in &kind.field_names {
            if !names::is_identifier(field) {
                return Err(Error::InvalidSchema(format!(
                    "field {:?} of kind '{}' is not an identifier",
                    field, kind.name
                )));
            }
            if !fields.insert(field.as_str()) {
                return Err(Error::InvalidSchema(format!(
                    "duplicate field '{}' in kind '{}'",
                    field, kind.name
                )));
            }
        }

        let type_name = names::type_name(kind);
        if !type_names.insert(type_name.clone()) {
            return Err(Error::InvalidSchema(format!(
                "kind '{}' generates duplicate type {}",
                kind.name, type_name
            )));
        }

        // Array and count members share the container's namespace.
        for member in [
            names::array_member(kind).to_string(),
            names::count_member(kind),
        ] {
            if !members.insert(member.clone()) {
                return Err(Error::InvalidSchema(format!(
                    "kind '{}' generates duplicate container member {}",
                    kind.name, member
                )));
            }
        }
    }

    Ok(())
}
