//! Generated parse and release routines

use crate::schema::Schema;
use crate::schema::names::{self, CONTAINER_TYPE, FREE_FN, PARSE_FN};
use std::fmt::{self, Write};

/// Reader for the blob layout: per kind, a network-order count followed by
/// the records copied straight into freshly allocated storage. A short read
/// or failed allocation exits the process.
pub fn write_parse_fn<W: Write>(out: &mut W, schema: &Schema) -> fmt::Result {
    writeln!(out, "static {} {}(FILE *f) {{", CONTAINER_TYPE, PARSE_FN)?;
    writeln!(out, "    {} md = {{0}};", CONTAINER_TYPE)?;
    writeln!(out, "    uint32_t sec_len = 0;")?;

    for kind in schema {
        let data_type = names::type_name(kind);
        let array = names::array_member(kind);
        let count = names::count_member(kind);

        writeln!(out)?;
        writeln!(
            out,
            "    if (fread(&sec_len, sizeof(uint32_t), 1, f) < 1)"
        )?;
        writeln!(
            out,
            "        fprintf(stderr, \"couldn't get map data section length for {}\\n\"), exit(1);",
            array
        )?;
        writeln!(out, "    sec_len = md.{} = ntohl(sec_len);", count)?;
        writeln!(out, "    md.{} = calloc(sec_len, sizeof({}));", array, data_type)?;
        writeln!(out, "    if (!md.{} && sec_len)", array)?;
        writeln!(
            out,
            "        fprintf(stderr, \"couldn't allocate map data for {}\\n\"), exit(1);",
            array
        )?;
        writeln!(
            out,
            "    if (fread(md.{}, sizeof({}), sec_len, f) < sec_len)",
            array, data_type
        )?;
        writeln!(
            out,
            "        fprintf(stderr, \"less map data than section length for {}\\n\"), exit(1);",
            array
        )?;
    }

    writeln!(out)?;
    writeln!(out, "    return md;")?;
    writeln!(out, "}}")
}

/// Release every array owned by the container
pub fn write_free_fn<W: Write>(out: &mut W, schema: &Schema) -> fmt::Result {
    writeln!(out, "static void {}({} *md) {{", FREE_FN, CONTAINER_TYPE)?;
    for kind in schema {
        let array = names::array_member(kind);
        writeln!(out, "    free(md->{});", array)?;
        writeln!(out, "    md->{} = NULL;", array)?;
        writeln!(out, "    md->{} = 0;", names::count_member(kind))?;
    }
    writeln!(out, "}}")
}
