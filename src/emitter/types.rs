//! Record and container type declarations

use crate::schema::names::{self, CONTAINER_TYPE};
use crate::schema::{KindDescriptor, Schema};
use std::fmt::{self, Write};

/// `typedef struct { float <field>; ... } MapData_<Name>;`
pub fn write_record_type<W: Write>(out: &mut W, kind: &KindDescriptor) -> fmt::Result {
    writeln!(out, "typedef struct {{")?;
    for field in &kind.field_names {
        writeln!(out, "    float {};", field)?;
    }
    writeln!(out, "}} {};", names::type_name(kind))
}

/// Container with an owning pointer and a count per kind
pub fn write_container_type<W: Write>(out: &mut W, schema: &Schema) -> fmt::Result {
    writeln!(out, "typedef struct {{")?;
    for kind in schema {
        writeln!(
            out,
            "    {} *{};",
            names::type_name(kind),
            names::array_member(kind)
        )?;
        writeln!(out, "    uint32_t {};", names::count_member(kind))?;
    }
    writeln!(out, "}} {};", CONTAINER_TYPE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_members_in_field_order() {
        let kind = KindDescriptor::new("rock", "rocks", ["y", "x", "radius"]);
        let mut out = String::new();
        write_record_type(&mut out, &kind).unwrap();
        assert_eq!(
            out,
            "typedef struct {\n    float y;\n    float x;\n    float radius;\n} MapData_Rock;\n"
        );
    }

    #[test]
    fn test_container_pairs_pointer_and_count() {
        let schema = Schema::new(vec![
            KindDescriptor::new("tree", "trees", ["x", "y"]),
            KindDescriptor::new("rock", "rocks", ["x"]),
        ])
        .unwrap();
        let mut out = String::new();
        write_container_type(&mut out, &schema).unwrap();
        assert_eq!(
            out,
            "typedef struct {\n\
             \x20   MapData_Tree *trees;\n\
             \x20   uint32_t ntrees;\n\
             \x20   MapData_Rock *rocks;\n\
             \x20   uint32_t nrocks;\n\
             } MapData;\n"
        );
    }
}
