//! Blob encoder
//!
//! Layout, once per kind in schema order:
//!
//! ```text
//! u32      record_count            big-endian
//! record_count x f32 x field_count native byte order
//! ```
//!
//! There is no header, magic or padding. Only the counts are byte-order
//! normalized; float payloads are written as the encoding machine stores them.

mod section;

pub use section::write_section;

use crate::document::Document;
use crate::error::{Error, Result};
use crate::schema::Schema;
use serde_json::Value;
use std::io::Write;
use std::path::Path;

/// Write the sections of `doc` to a writer, in schema order
pub fn write<W: Write>(writer: &mut W, schema: &Schema, doc: &Document) -> Result<()> {
    if doc.sections().len() != schema.len() {
        return Err(Error::mismatch(
            "<document>",
            format!(
                "document has {} sections, schema has {} kinds",
                doc.sections().len(),
                schema.len()
            ),
        ));
    }

    for (kind, records) in schema.iter().zip(doc.sections()) {
        if kind.json_key != records.json_key() || kind.field_count != records.field_count() {
            return Err(Error::mismatch(
                &kind.json_key,
                format!(
                    "document section '{}' was decoded with another schema",
                    records.json_key()
                ),
            ));
        }
        write_section(writer, records)?;
        log::debug!("encoded {} '{}' records", records.count(), kind.json_key);
    }

    Ok(())
}

/// Exact encoded size of `doc` in bytes
pub fn encoded_size(doc: &Document) -> usize {
    doc.sections()
        .iter()
        .map(|s| 4 + s.values().len() * crate::schema::FIELD_SIZE)
        .sum()
}

/// Encode a decoded document into a complete blob
pub fn to_bytes(schema: &Schema, doc: &Document) -> Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(encoded_size(doc));
    write(&mut buf, schema, doc)?;
    Ok(buf)
}

/// Validate a JSON document and encode it
pub fn encode_json(schema: &Schema, value: &Value) -> Result<Vec<u8>> {
    let doc = Document::decode(schema, value)?;
    to_bytes(schema, &doc)
}

/// Write a finished blob to `path` in a single write, creating parent
/// directories as needed
pub fn write_blob(path: impl AsRef<Path>, bytes: &[u8]) -> Result<()> {
    let path = path.as_ref();
    crate::create_parent_dir(path)?;
    std::fs::write(path, bytes).map_err(|e| Error::io(path, e))?;
    log::info!("wrote {} byte blob to {}", bytes.len(), path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::KindDescriptor;
    use serde_json::json;

    #[test]
    fn test_tree_scenario() {
        let bytes = encode_json(
            &Schema::map_default(),
            &json!({ "trees": [[1.5, -2.0], [0.0, 3.25]] }),
        )
        .unwrap();

        let mut expected = vec![0x00, 0x00, 0x00, 0x02];
        for v in [1.5f32, -2.0, 0.0, 3.25] {
            expected.extend_from_slice(&v.to_ne_bytes());
        }
        assert_eq!(bytes.len(), 20);
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_sections_follow_schema_order() {
        let schema = Schema::new(vec![
            KindDescriptor::new("a", "alist", ["v"]),
            KindDescriptor::new("b", "blist", ["v"]),
        ])
        .unwrap();
        let bytes = encode_json(&schema, &json!({ "blist": [[2.0], [3.0]], "alist": [[1.0]] }))
            .unwrap();

        let mut expected = vec![0, 0, 0, 1];
        expected.extend_from_slice(&1.0f32.to_ne_bytes());
        expected.extend_from_slice(&[0, 0, 0, 2]);
        expected.extend_from_slice(&2.0f32.to_ne_bytes());
        expected.extend_from_slice(&3.0f32.to_ne_bytes());
        assert_eq!(bytes, expected);
    }

    #[test]
    fn test_size_matches_formula() {
        let schema = Schema::new(vec![
            KindDescriptor::new("tree", "trees", ["x", "y"]),
            KindDescriptor::new("rock", "rocks", ["x", "y", "r"]),
        ])
        .unwrap();
        let doc = Document::decode(
            &schema,
            &json!({ "trees": [[0, 0], [1, 1], [2, 2]], "rocks": [] }),
        )
        .unwrap();
        let bytes = to_bytes(&schema, &doc).unwrap();
        assert_eq!(bytes.len(), (4 + 3 * 2 * 4) + 4);
        assert_eq!(bytes.len(), encoded_size(&doc));
    }

    #[test]
    fn test_mismatch_produces_no_blob() {
        let result = encode_json(&Schema::map_default(), &json!({ "rocks": [] }));
        assert!(matches!(result, Err(Error::SchemaMismatch { .. })));
    }

    #[test]
    fn test_rejects_document_from_other_schema() {
        let other = Schema::new(vec![KindDescriptor::new("rock", "rocks", ["x", "y"])]).unwrap();
        let doc = Document::decode(&other, &json!({ "rocks": [] })).unwrap();
        let result = to_bytes(&Schema::map_default(), &doc);
        assert!(matches!(result, Err(Error::SchemaMismatch { .. })));
    }

    #[test]
    fn test_write_blob_creates_parent() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("build").join("map.bytes");
        write_blob(&path, &[0, 0, 0, 0]).unwrap();
        assert_eq!(std::fs::read(&path).unwrap(), [0, 0, 0, 0]);
    }
}
