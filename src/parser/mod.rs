//! Blob reader
//!
//! The same read algorithm the generated C routine performs, for checking
//! blobs from Rust: per kind in schema order, a big-endian `u32` count then
//! `count` native-order records. Parsing returns views into the original
//! byte buffer.

mod section;
mod take;

pub use section::{Section, SectionView, parse_section};
pub use take::ByteCursor;

use crate::error::{Error, Result};
use crate::schema::Schema;
use std::path::Path;

/// Parsed blob - references data in the underlying buffer (zero-copy)
#[derive(Debug, Clone)]
pub struct MapDataView<'a> {
    sections: Vec<SectionView<'a>>,
}

impl<'a> MapDataView<'a> {
    /// Sections in schema order
    pub fn sections(&self) -> &[SectionView<'a>] {
        &self.sections
    }

    /// Section for the kind stored under `json_key`
    pub fn section(&self, json_key: &str) -> Option<&SectionView<'a>> {
        self.sections.iter().find(|s| s.kind().json_key == json_key)
    }

    /// Convert to owned MapData
    pub fn to_owned(&self) -> MapData {
        MapData {
            sections: self.sections.iter().map(SectionView::to_owned).collect(),
        }
    }
}

/// Owned parse result
#[derive(Debug, Clone, PartialEq)]
pub struct MapData {
    pub sections: Vec<Section>,
}

impl MapData {
    pub fn section(&self, json_key: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.json_key() == json_key)
    }
}

/// Parse a blob against `schema`
///
/// Any short read aborts the whole parse; no partial result is returned.
pub fn parse<'a>(schema: &'a Schema, bytes: &'a [u8]) -> Result<MapDataView<'a>> {
    let mut cursor = ByteCursor::new(bytes);
    let mut sections = Vec::with_capacity(schema.len());

    for kind in schema {
        let section = parse_section(&mut cursor, kind)?;
        log::debug!("parsed {} '{}' records", section.count(), kind.json_key);
        sections.push(section);
    }

    if cursor.remaining() > 0 {
        log::warn!(
            "ignoring {} trailing bytes after the last section",
            cursor.remaining()
        );
    }

    Ok(MapDataView { sections })
}

/// Read and parse a blob file
pub fn parse_file(schema: &Schema, path: impl AsRef<Path>) -> Result<MapData> {
    let path = path.as_ref();
    let bytes = std::fs::read(path).map_err(|e| Error::io(path, e))?;
    Ok(parse(schema, &bytes)?.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::KindDescriptor;
    use crate::writer;
    use serde_json::json;

    fn two_kinds() -> Schema {
        Schema::new(vec![
            KindDescriptor::new("tree", "trees", ["x", "y"]),
            KindDescriptor::new("rock", "rocks", ["x", "y", "r"]),
        ])
        .unwrap()
    }

    #[test]
    fn test_roundtrip_two_kinds() {
        let schema = two_kinds();
        let bytes = writer::encode_json(
            &schema,
            &json!({ "rocks": [[1, 2, 0.5]], "trees": [[1.5, -2.0], [0.0, 3.25]] }),
        )
        .unwrap();

        let parsed = parse(&schema, &bytes).unwrap();
        assert_eq!(parsed.sections().len(), 2);

        let trees = parsed.section("trees").unwrap();
        assert_eq!(trees.count(), 2);
        assert_eq!(trees.record(1), Some(vec![0.0, 3.25]));

        let rocks = parsed.section("rocks").unwrap();
        assert_eq!(rocks.count(), 1);
        assert_eq!(rocks.record(0), Some(vec![1.0, 2.0, 0.5]));
    }

    #[test]
    fn test_missing_second_header() {
        let schema = two_kinds();
        let mut bytes = 0u32.to_be_bytes().to_vec();
        bytes.extend_from_slice(&[0, 0]);

        match parse(&schema, &bytes) {
            Err(Error::TruncatedInput { kind, .. }) => assert_eq!(kind, "rocks"),
            other => panic!("expected TruncatedInput, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_input() {
        assert!(matches!(
            parse(&Schema::map_default(), &[]),
            Err(Error::TruncatedInput { .. })
        ));
    }

    #[test]
    fn test_trailing_bytes_ignored() {
        let schema = Schema::map_default();
        let bytes = [0, 0, 0, 0, 0xAA];
        let parsed = parse(&schema, &bytes).unwrap();
        assert_eq!(parsed.sections()[0].count(), 0);
    }

    #[test]
    fn test_owned_matches_view() {
        let schema = Schema::map_default();
        let bytes = writer::encode_json(&schema, &json!({ "trees": [[1, 2], [3, 4]] })).unwrap();
        let owned = parse(&schema, &bytes).unwrap().to_owned();

        let trees = owned.section("trees").unwrap();
        assert_eq!(trees.count(), 2);
        assert_eq!(trees.values(), &[1.0, 2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_parse_file_reports_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_file(&Schema::map_default(), dir.path().join("nope.bytes"));
        assert!(matches!(result, Err(Error::Io { .. })));
    }
}
