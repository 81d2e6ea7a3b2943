//! Naming convention shared by the header emitter and the blob codec
//!
//! The generated header and the blob are only linked through these names and
//! the schema order, so everything that needs a generated identifier goes
//! through here.

use super::KindDescriptor;

/// Name of the aggregate container type
pub const CONTAINER_TYPE: &str = "MapData";

/// Prefix of every generated record type
pub const TYPE_PREFIX: &str = "MapData_";

/// Name of the generated parser routine
pub const PARSE_FN: &str = "parse_map_data";

/// Name of the generated release routine
pub const FREE_FN: &str = "free_map_data";

/// Generated record type name, e.g. `tree` -> `MapData_Tree`
pub fn type_name(kind: &KindDescriptor) -> String {
    format!("{}{}", TYPE_PREFIX, capitalize(&kind.name))
}

/// Container member holding the record array
pub fn array_member(kind: &KindDescriptor) -> &str {
    &kind.json_key
}

/// Container member holding the record count
pub fn count_member(kind: &KindDescriptor) -> String {
    format!("n{}", kind.json_key)
}

/// Upper-case the first character, lower-case the rest
pub fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

/// C keywords, which can't name a member or type
pub const C_KEYWORDS: &[&str] = &[
    "_Alignas", "_Alignof", "_Atomic", "_Bool", "_Complex", "_Generic", "_Imaginary",
    "_Noreturn", "_Static_assert", "_Thread_local", "alignas", "alignof", "auto", "bool",
    "break", "case", "char", "const", "constexpr", "continue", "default", "do", "double",
    "else", "enum", "extern", "false", "float", "for", "goto", "if", "inline", "int", "long",
    "nullptr", "register", "restrict", "return", "short", "signed", "sizeof", "static",
    "static_assert", "struct", "switch", "thread_local", "true", "typedef", "typeof",
    "typeof_unqual", "union", "unsigned", "void", "volatile", "while",
];

/// Whether `s` is usable as a C identifier: `[A-Za-z_][A-Za-z0-9_]*` and
/// not a keyword
pub fn is_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_') && !C_KEYWORDS.contains(&s)
}
