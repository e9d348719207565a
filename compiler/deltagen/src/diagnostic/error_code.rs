use std::fmt;

/// Error codes for generator diagnostics.
///
/// Format: D#### in pipeline order:
/// - D0001: source collection
/// - D0002-D0007: descriptor building
/// - D0008-D0009: graph assembly
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum ErrorCode {
    /// Source file does not parse as Rust
    D0001,
    /// Marker on an enum or union
    D0002,
    /// Marker on a type with generic or lifetime parameters
    D0003,
    /// Marker or field argument ignored (warning)
    D0004,
    /// Type reference climbs above the crate root
    D0005,
    /// Two properties map to the same member name
    D0006,
    /// Property accessor renamed to avoid a generated member (warning)
    D0007,
    /// Two candidates share one identity
    D0008,
    /// Two tracked types share one generated name
    D0009,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::D0001 => "D0001",
            ErrorCode::D0002 => "D0002",
            ErrorCode::D0003 => "D0003",
            ErrorCode::D0004 => "D0004",
            ErrorCode::D0005 => "D0005",
            ErrorCode::D0006 => "D0006",
            ErrorCode::D0007 => "D0007",
            ErrorCode::D0008 => "D0008",
            ErrorCode::D0009 => "D0009",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
