//! Section parsing

use super::take::ByteCursor;
use crate::error::{Error, Result};
use crate::schema::{FIELD_SIZE, KindDescriptor};
use byteorder::{BigEndian, ByteOrder, NativeEndian};

/// Owned section (for inspection and comparisons)
#[derive(Debug, Clone, PartialEq)]
pub struct Section {
    json_key: String,
    field_count: usize,
    values: Vec<f32>,
}

impl Section {
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

    pub fn count(&self) -> usize {
        self.values.len() / self.field_count
    }

    pub fn records(&self) -> std::slice::ChunksExact<'_, f32> {
        self.values.chunks_exact(self.field_count)
    }
}

/// View into one section of a blob (zero-copy)
///
/// Only built by [`parse_section`], which rejects descriptors without
/// fields, so `data` always holds exactly `count` whole records.
#[derive(Debug, Clone, Copy)]
pub struct SectionView<'a> {
    kind: &'a KindDescriptor,
    count: u32,
    data: &'a [u8],
}

impl<'a> SectionView<'a> {
    pub fn kind(&self) -> &'a KindDescriptor {
        self.kind
    }

    /// Number of records
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Raw record bytes, native byte order
    pub fn data(&self) -> &'a [u8] {
        self.data
    }

    /// Decode record `index`, or `None` past the end
    pub fn record(&self, index: usize) -> Option<Vec<f32>> {
        let size = self.kind.record_size();
        let start = index.checked_mul(size)?;
        let end = start.checked_add(size)?;
        let bytes = self.data.get(start..end)?;
        Some(decode_floats(bytes))
    }

    /// Iterate over decoded records
    pub fn records(&self) -> impl Iterator<Item = Vec<f32>> + 'a {
        self.data
            .chunks_exact(self.kind.record_size())
            .map(decode_floats)
    }

    /// Convert to owned Section
    pub fn to_owned(&self) -> Section {
        Section {
            json_key: self.kind.json_key.clone(),
            field_count: self.kind.field_count,
            values: decode_floats(self.data),
        }
    }
}

fn decode_floats(bytes: &[u8]) -> Vec<f32> {
    bytes
        .chunks_exact(FIELD_SIZE)
        .map(NativeEndian::read_f32)
        .collect()
}

/// Parse one section for `kind` at the cursor
pub fn parse_section<'a>(
    cursor: &mut ByteCursor<'a>,
    kind: &'a KindDescriptor,
) -> Result<SectionView<'a>> {
    if kind.field_count == 0 || kind.field_count != kind.field_names.len() {
        return Err(Error::InvalidSchema(format!(
            "kind '{}' declares {} fields and names {}",
            kind.name,
            kind.field_count,
            kind.field_names.len()
        )));
    }

    let count = BigEndian::read_u32(cursor.take(4, &kind.json_key)?);

    let needed = count as u64 * kind.record_size() as u64;
    if needed > cursor.remaining() as u64 {
        return Err(Error::TruncatedInput {
            kind: kind.json_key.clone(),
            needed,
            available: cursor.remaining() as u64,
        });
    }
    let data = cursor.take(needed as usize, &kind.json_key)?;

    Ok(SectionView { kind, count, data })
}
