//! Source document decoding
//!
//! Turns a parsed JSON document into typed, already validated records for
//! every kind in a schema. Content checks all happen here, so the encoder
//! only ever sees well-formed records.

use crate::error::{Error, Result};
use crate::schema::{KindDescriptor, Schema};
use serde_json::{Map, Value};
use std::path::Path;

/// Validated records of one kind, row-major
///
/// Only produced by [`Document::decode`], so `values` always holds a whole
/// number of records and `field_count` is never zero.
#[derive(Debug, Clone, PartialEq)]
pub struct KindRecords {
    json_key: String,
    field_count: usize,
    values: Vec<f32>,
}

impl KindRecords {
    pub fn json_key(&self) -> &str {
        &self.json_key
    }

    pub fn field_count(&self) -> usize {
        self.field_count
    }

    /// Field values of every record, back to back
    pub fn values(&self) -> &[f32] {
        &self.values
    }

    /// Number of records
    pub fn count(&self) -> u32 {
        // Bounded to u32 during decoding.
        (self.values.len() / self.field_count) as u32
    }

    /// Iterate over records as field slices
    pub fn records(&self) -> std::slice::ChunksExact<'_, f32> {
        self.values.chunks_exact(self.field_count)
    }
}

/// A source document decoded against a schema, sections in schema order
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    sections: Vec<KindRecords>,
}

impl Document {
    /// Validate `value` against `schema` and extract every kind's records
    pub fn decode(schema: &Schema, value: &Value) -> Result<Self> {
        let object = value.as_object().ok_or_else(|| {
            Error::mismatch("<document>", "top-level json value is not an object")
        })?;

        let sections = schema
            .iter()
            .map(|kind| decode_kind(kind, object))
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { sections })
    }

    pub fn from_str(schema: &Schema, json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::decode(schema, &value)
    }

    pub fn from_path(schema: &Schema, path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        Self::from_str(schema, &json)
    }

    pub fn sections(&self) -> &[KindRecords] {
        &self.sections
    }

    /// Records of the kind stored under `json_key`
    pub fn get(&self, json_key: &str) -> Option<&KindRecords> {
        self.sections.iter().find(|s| s.json_key == json_key)
    }
}

fn decode_kind(kind: &KindDescriptor, object: &Map<String, Value>) -> Result<KindRecords> {
    let items = match object.get(&kind.json_key) {
        Some(Value::Array(items)) => items,
        Some(_) => {
            return Err(Error::mismatch(&kind.json_key, "value is not an array"));
        }
        None => return Err(Error::mismatch(&kind.json_key, "key missing from document")),
    };

    if u32::try_from(items.len()).is_err() {
        return Err(Error::mismatch(
            &kind.json_key,
            format!("{} records exceed the u32 section count", items.len()),
        ));
    }

    let mut values = Vec::with_capacity(items.len() * kind.field_count);
    for (index, item) in items.iter().enumerate() {
        match item {
            Value::Array(numbers) => {
                if numbers.len() != kind.field_count {
                    return Err(Error::mismatch(
                        &kind.json_key,
                        format!(
                            "record {} has {} values, expected {}",
                            index,
                            numbers.len(),
                            kind.field_count
                        ),
                    ));
                }
                for (field, number) in kind.field_names.iter().zip(numbers) {
                    values.push(to_f32(kind, index, field, number)?);
                }
            }
            Value::Object(fields) => {
                for field in &kind.field_names {
                    let number = fields.get(field).ok_or_else(|| {
                        Error::mismatch(
                            &kind.json_key,
                            format!("record {} is missing field '{}'", index, field),
                        )
                    })?;
                    values.push(to_f32(kind, index, field, number)?);
                }
            }
            _ => {
                return Err(Error::mismatch(
                    &kind.json_key,
                    format!("record {} is neither an array nor an object", index),
                ));
            }
        }
    }

    log::debug!("decoded {} '{}' records", items.len(), kind.json_key);

    // Schema validation guarantees at least one field.
    Ok(KindRecords {
        json_key: kind.json_key.clone(),
        field_count: kind.field_count,
        values,
    })
}

fn to_f32(kind: &KindDescriptor, index: usize, field: &str, value: &Value) -> Result<f32> {
    let wide = value.as_f64().ok_or_else(|| {
        Error::mismatch(
            &kind.json_key,
            format!("record {} field '{}' is not a number", index, field),
        )
    })?;

    let narrow = wide as f32;
    if wide.is_finite() && narrow.is_infinite() {
        return Err(Error::mismatch(
            &kind.json_key,
            format!("record {} field '{}' overflows f32: {}", index, field, wide),
        ));
    }
    Ok(narrow)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn two_kinds() -> Schema {
        Schema::new(vec![
            KindDescriptor::new("tree", "trees", ["x", "y"]),
            KindDescriptor::new("rock", "rocks", ["x", "y", "r"]),
        ])
        .unwrap()
    }

    fn reason(result: Result<Document>) -> String {
        match result {
            Err(Error::SchemaMismatch { reason, .. }) => reason,
            other => panic!("expected SchemaMismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_decodes_arrays_in_schema_order() {
        let doc = Document::decode(
            &two_kinds(),
            &json!({ "rocks": [[1, 2, 3]], "trees": [[1.5, -2.0], [0.0, 3.25]] }),
        )
        .unwrap();

        assert_eq!(doc.sections()[0].json_key(), "trees");
        assert_eq!(doc.sections()[0].count(), 2);
        assert_eq!(doc.sections()[0].values(), &[1.5, -2.0, 0.0, 3.25]);
        assert_eq!(doc.sections()[1].json_key(), "rocks");
        assert_eq!(doc.sections()[1].values(), &[1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_decodes_objects_by_field_name() {
        let doc = Document::decode(
            &Schema::map_default(),
            &json!({ "trees": [{ "y": 2.0, "x": 1.0, "label": "oak" }] }),
        )
        .unwrap();
        let trees = doc.get("trees").unwrap();
        assert_eq!(trees.records().next().unwrap(), &[1.0, 2.0]);
    }

    #[test]
    fn test_ignores_unknown_keys() {
        let doc = Document::decode(
            &Schema::map_default(),
            &json!({ "trees": [], "rivers": [[1, 2, 3, 4]] }),
        )
        .unwrap();
        assert_eq!(doc.sections().len(), 1);
        assert_eq!(doc.sections()[0].count(), 0);
    }

    #[test]
    fn test_missing_key() {
        let msg = reason(Document::decode(&two_kinds(), &json!({ "trees": [] })));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_not_an_array() {
        let msg = reason(Document::decode(
            &Schema::map_default(),
            &json!({ "trees": { "x": 1 } }),
        ));
        assert!(msg.contains("not an array"));
    }

    #[test]
    fn test_top_level_not_object() {
        reason(Document::decode(&Schema::map_default(), &json!([[1, 2]])));
    }

    #[test]
    fn test_wrong_arity() {
        let schema = Schema::map_default();
        let msg = reason(Document::decode(&schema, &json!({ "trees": [[1, 2], [3]] })));
        assert!(msg.contains("record 1 has 1 values"));
        reason(Document::decode(&schema, &json!({ "trees": [[1, 2, 3]] })));
        reason(Document::decode(&schema, &json!({ "trees": [{ "x": 1 }] })));
    }

    #[test]
    fn test_non_numeric_values() {
        let schema = Schema::map_default();
        let msg = reason(Document::decode(&schema, &json!({ "trees": [[1, "2"]] })));
        assert!(msg.contains("field 'y'"));
        reason(Document::decode(&schema, &json!({ "trees": [[true, 2]] })));
        reason(Document::decode(&schema, &json!({ "trees": [[null, 2]] })));
        reason(Document::decode(&schema, &json!({ "trees": [7] })));
    }

    #[test]
    fn test_f32_overflow() {
        let msg = reason(Document::decode(
            &Schema::map_default(),
            &json!({ "trees": [[1e39, 0]] }),
        ));
        assert!(msg.contains("overflows"));
    }

    #[test]
    fn test_rounds_to_nearest_f32() {
        let doc = Document::decode(&Schema::map_default(), &json!({ "trees": [[0.1, 1e-50]] }))
            .unwrap();
        assert_eq!(doc.sections()[0].values()[0].to_bits(), 0.1f32.to_bits());
        assert_eq!(doc.sections()[0].values()[1], 0.0);
    }

    #[test]
    fn test_from_str_reports_syntax_errors() {
        assert!(matches!(
            Document::from_str(&Schema::map_default(), "{\"trees\": [[1, 2]"),
            Err(Error::Json(_))
        ));
    }
}
