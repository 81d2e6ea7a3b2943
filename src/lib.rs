//! mapflat - Schema-driven flat binary map data
//!
//! Packs arrays of fixed-layout float records from a JSON map document into
//! a compact blob, and emits the C declarations and parser needed to read
//! that blob back. Both outputs are driven by the same [`Schema`]; the blob
//! carries no tags, so a reader has to know the schema it was written with.
//!
//! # Format
//!
//! - One section per kind, in schema order
//! - Each section: `u32` record count (big-endian), then the records
//! - Each record: its fields as `f32`, in the encoding machine's byte order
//!
//! Float payloads are not byte-order normalized: producer and consumer must
//! share endianness and float representation.
//!
//! # Example
//!
//! ```rust
//! use mapflat::{Schema, emitter, parse, writer};
//! use serde_json::json;
//!
//! let schema = Schema::map_default();
//! let map = json!({ "trees": [[1.5, -2.0], [0.0, 3.25]] });
//!
//! let blob = writer::encode_json(&schema, &map).unwrap();
//! assert_eq!(blob.len(), 20);
//!
//! let parsed = parse(&schema, &blob).unwrap();
//! assert_eq!(parsed.section("trees").unwrap().count(), 2);
//!
//! let header = emitter::emit(&schema);
//! assert!(header.contains("MapData_Tree *trees;"));
//! ```

pub mod document;
pub mod emitter;
pub mod error;
pub mod parser;
pub mod schema;
pub mod writer;

// Re-export common types at crate root
pub use document::{Document, KindRecords};
pub use error::{Error, Result};
pub use parser::{MapData, MapDataView, Section, SectionView, parse, parse_file};
pub use schema::{KindDescriptor, Schema};

use std::path::Path;

pub(crate) fn create_parent_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => {
            std::fs::create_dir_all(dir).map_err(|e| Error::io(dir, e))
        }
        _ => Ok(()),
    }
}
