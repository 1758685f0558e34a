//! Line classification by leading characters.

/// Marker in column 0 of a class header.
pub const CLASS_MARKER: char = 'C';
pub const COMMENT_MARKER: char = '#';
pub const INDENT: char = '\t';

/// What a raw line is, before the hierarchy mode picks its record type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Empty or comment; no state change.
    Skip,
    ClassHeader,
    VendorHeader,
    /// One leading tab: subclass or product.
    SingleIndent,
    /// Two leading tabs (or a lone tab): programming interface or subsystem.
    DoubleIndent,
}

pub fn classify(line: &str) -> LineKind {
    let mut chars = line.chars();
    match chars.next() {
        None | Some(COMMENT_MARKER) => LineKind::Skip,
        Some(CLASS_MARKER) => LineKind::ClassHeader,
        Some(INDENT) => match chars.next() {
            Some(c) if c != INDENT => LineKind::SingleIndent,
            _ => LineKind::DoubleIndent,
        },
        Some(_) => LineKind::VendorHeader,
    }
}
