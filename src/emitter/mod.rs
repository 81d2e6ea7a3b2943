//! C header emitter
//!
//! Produces the type and parser definitions a C consumer needs to read a
//! blob written with the same schema. Emission is a pure function of the
//! schema; it never looks at a document or a blob.

mod routines;
mod types;

pub use routines::{write_free_fn, write_parse_fn};
pub use types::{write_container_type, write_record_type};

use crate::error::{Error, Result};
use crate::schema::Schema;
use std::fmt::{self, Write};
use std::path::Path;

/// Include guard of the generated header
pub const INCLUDE_GUARD: &str = "MAPFLAT_MAP_DATA_H";

/// Write the complete header to a formatter
pub fn emit_to<W: Write>(out: &mut W, schema: &Schema) -> fmt::Result {
    writeln!(out, "#ifndef {}", INCLUDE_GUARD)?;
    writeln!(out, "#define {}", INCLUDE_GUARD)?;
    writeln!(out)?;
    writeln!(out, "#include <arpa/inet.h>")?;
    writeln!(out, "#include <stdint.h>")?;
    writeln!(out, "#include <stdio.h>")?;
    writeln!(out, "#include <stdlib.h>")?;

    for kind in schema {
        writeln!(out)?;
        write_record_type(out, kind)?;
    }

    writeln!(out)?;
    write_container_type(out, schema)?;
    writeln!(out)?;
    write_parse_fn(out, schema)?;
    writeln!(out)?;
    write_free_fn(out, schema)?;
    writeln!(out)?;
    writeln!(out, "#endif")
}

/// Render the complete header
pub fn emit(schema: &Schema) -> String {
    let mut out = String::new();
    // Formatting into a String never fails.
    let _ = emit_to(&mut out, schema);
    out
}

/// Emit the header for `schema` to `path`, replacing any previous file
pub fn write_definitions(path: impl AsRef<Path>, schema: &Schema) -> Result<()> {
    let path = path.as_ref();
    let text = emit(schema);
    crate::create_parent_dir(path)?;
    std::fs::write(path, &text).map_err(|e| Error::io(path, e))?;
    log::info!(
        "wrote definitions for {} kinds to {}",
        schema.len(),
        path.display()
    );
    Ok(())
}
