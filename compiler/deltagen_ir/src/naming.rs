//! Naming rules for generated members.
//!
//! A property's member name is used for its lazy slot and its accessor
//! method. The rule: lower-case exactly the first character of the raw
//! identifier, nothing else. `Name` becomes `name`, `ALLCAPS` becomes
//! `aLLCAPS`, `_underscore` stays `_underscore`.
//!
//! Rust adds two constraints on top: the result must still be a usable
//! identifier (keywords turn into raw identifiers), and tuple-struct
//! indices get a leading underscore.

/// Members the generator defines on every delta type.
///
/// A property whose member name lands here is moved aside with
/// [`unreserved_member`].
pub const RESERVED_MEMBERS: &[&str] = &[
    "new",
    "previous",
    "current",
    "has_any_deltas",
    "all_deltas",
    "root_deltas",
    "deltas",
    "has_delta_in",
];

const KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "crate",
    "do", "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "self", "Self", "static", "struct", "super", "trait", "true", "try", "type",
    "typeof", "unsafe", "unsized", "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be written as raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Check whether `name` is a Rust keyword (strict or reserved).
pub fn is_keyword(name: &str) -> bool {
    KEYWORDS.contains(&name)
}

/// Lower-case the first character, leaving the rest untouched.
pub fn lower_first(raw: &str) -> String {
    let mut chars = raw.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Derive the slot/accessor identifier for a field.
///
/// `raw` is the field identifier as written (including any `r#` prefix),
/// or the decimal index of a tuple field.
pub fn member_name(raw: &str) -> String {
    if let Some(rest) = raw.strip_prefix("r#") {
        return usable_identifier(lower_first(rest));
    }
    if raw.starts_with(|c: char| c.is_ascii_digit()) {
        return format!("_{raw}");
    }
    usable_identifier(lower_first(raw))
}

/// The member to use instead when `member` is reserved: `current` → `current_`.
pub fn unreserved_member(member: &str) -> Option<String> {
    let bare = member.strip_prefix("r#").unwrap_or(member);
    RESERVED_MEMBERS.contains(&bare).then(|| format!("{bare}_"))
}

/// The path segment a property contributes to change paths.
///
/// This is the field name as a user would read it: no `r#`.
pub fn path_segment(raw: &str) -> String {
    raw.strip_prefix("r#").unwrap_or(raw).to_string()
}

/// Module-file key for a module path: `crate::models::user` → `models__user`.
///
/// The crate root maps to `crate`.
pub fn module_key(module_path: &str) -> String {
    let segments: Vec<&str> = module_path
        .split("::")
        .filter(|s| !s.is_empty() && *s != "crate")
        .collect();
    if segments.is_empty() {
        "crate".to_string()
    } else {
        segments.join("__")
    }
}

fn usable_identifier(name: String) -> String {
    if NON_RAW_KEYWORDS.contains(&name.as_str()) {
        format!("{name}_")
    } else if is_keyword(&name) {
        format!("r#{name}")
    } else {
        name
    }
}
