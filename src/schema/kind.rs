//! Record kind descriptors

use serde::{Deserialize, Serialize};

/// Size in bytes of a single record field (always `f32`)
pub const FIELD_SIZE: usize = 4;

/// Describes one fixed-layout record kind
///
/// Field order fixes both the generated struct layout and the on-disk
/// layout of each record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KindDescriptor {
    pub name: String,
    #[serde(alias = "inJson")]
    pub json_key: String,
    #[serde(alias = "floats")]
    pub field_count: usize,
    #[serde(alias = "fields")]
    pub field_names: Vec<String>,
}

impl KindDescriptor {
    pub fn new<S: Into<String>>(
        name: impl Into<String>,
        json_key: impl Into<String>,
        field_names: impl IntoIterator<Item = S>,
    ) -> Self {
        let field_names: Vec<String> = field_names.into_iter().map(Into::into).collect();
        Self {
            name: name.into(),
            json_key: json_key.into(),
            field_count: field_names.len(),
            field_names,
        }
    }

    /// Size of one encoded record in bytes
    pub fn record_size(&self) -> usize {
        self.field_count * FIELD_SIZE
    }
}
