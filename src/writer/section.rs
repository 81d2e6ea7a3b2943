//! Section serialization

use crate::document::KindRecords;
use byteorder::{BigEndian, NativeEndian, WriteBytesExt};
use std::io::{self, Write};

/// Write one section: big-endian record count, then every field as a
/// native-order `f32`
pub fn write_section<W: Write>(writer: &mut W, records: &KindRecords) -> io::Result<()> {
    writer.write_u32::<BigEndian>(records.count())?;
    for value in records.values() {
        writer.write_f32::<NativeEndian>(*value)?;
    }
    Ok(())
}
