//! Fixed-column layout of `pci.ids` lines.
//!
//! Every line shape pads its hex ids to a constant width and starts the name
//! at a constant column. Columns count characters, not bytes, so a name with
//! multi-byte characters never shifts the fields in front of it.
//!
//! ```text
//! C 02  Network controller              class
//! 0a89  BREA Technologies Inc           vendor
//! \t00  Ethernet controller             subclass
//! \t0002  PCI to MCA Bridge             product
//! \t\t00  UHCI                          programming interface
//! \t\t0e11 4091  Smart Array 6i         subsystem
//! ```

use std::fmt;

use crate::error::{ParseError, Result};

/// The six record-bearing line shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
    Class,
    Vendor,
    Subclass,
    Product,
    ProgrammingInterface,
    Subsystem,
}

/// A hex id at a fixed column span.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HexField {
    pub name: &'static str,
    pub start: usize,
    pub width: usize,
}

impl HexField {
    const fn new(name: &'static str, start: usize, width: usize) -> Self {
        Self { name, start, width }
    }

    pub const fn end(&self) -> usize {
        self.start + self.width
    }
}

/// Column layout of one line shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    pub fields: &'static [HexField],
    /// First column of the name; the name runs to end of line.
    pub name_column: usize,
}

const CLASS: Layout = Layout {
    fields: &[HexField::new("class id", 2, 2)],
    name_column: 6,
};

const VENDOR: Layout = Layout {
    fields: &[HexField::new("vendor id", 0, 4)],
    name_column: 6,
};

const SUBCLASS: Layout = Layout {
    fields: &[HexField::new("subclass id", 1, 2)],
    name_column: 5,
};

const PRODUCT: Layout = Layout {
    fields: &[HexField::new("product id", 1, 4)],
    name_column: 7,
};

const PROGRAMMING_INTERFACE: Layout = Layout {
    fields: &[HexField::new("programming interface id", 2, 2)],
    name_column: 6,
};

const SUBSYSTEM: Layout = Layout {
    fields: &[
        HexField::new("subsystem vendor id", 2, 4),
        HexField::new("subsystem id", 7, 4),
    ],
    name_column: 13,
};

impl Shape {
    pub const ALL: [Shape; 6] = [
        Shape::Class,
        Shape::Vendor,
        Shape::Subclass,
        Shape::Product,
        Shape::ProgrammingInterface,
        Shape::Subsystem,
    ];

    pub const fn layout(self) -> &'static Layout {
        match self {
            Shape::Class => &CLASS,
            Shape::Vendor => &VENDOR,
            Shape::Subclass => &SUBCLASS,
            Shape::Product => &PRODUCT,
            Shape::ProgrammingInterface => &PROGRAMMING_INTERFACE,
            Shape::Subsystem => &SUBSYSTEM,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Shape::Class => "class",
            Shape::Vendor => "vendor",
            Shape::Subclass => "subclass",
            Shape::Product => "product",
            Shape::ProgrammingInterface => "programming interface",
            Shape::Subsystem => "subsystem",
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Hex ids and name of one line, split according to its shape's layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Fields<'a> {
    ids: [u16; 2],
    pub name: &'a str,
}

impl Fields<'_> {
    /// The `index`-th hex field as a 16-bit value.
    pub fn wide(&self, index: usize) -> u16 {
        self.ids[index]
    }

    /// The `index`-th hex field of a two-digit span.
    pub fn byte(&self, index: usize) -> u8 {
        // Two hex digits never exceed 0xff.
        self.ids[index] as u8
    }
}

/// Split `line` into the hex fields and name of `shape`.
///
/// `line_no` is only used to label errors.
pub fn extract(shape: Shape, line_no: usize, line: &str) -> Result<Fields<'_>> {
    let layout = shape.layout();
    let actual = line.chars().count();
    if actual < layout.name_column {
        return Err(ParseError::TruncatedLine {
            line_no,
            shape,
            required: layout.name_column,
            actual,
            line: line.to_string(),
        });
    }

    let mut ids = [0u16; 2];
    for (slot, field) in ids.iter_mut().zip(layout.fields) {
        let text = column_slice(line, field.start, field.end());
        *slot = parse_hex(text, field).ok_or_else(|| ParseError::MalformedHexField {
            line_no,
            field: field.name,
            width: field.width,
            text: text.to_string(),
            line: line.to_string(),
        })?;
    }

    let name = column_slice(line, layout.name_column, actual);
    Ok(Fields { ids, name })
}

/// Slice `line` between two character columns. Both columns must be within
/// the line's character count.
fn column_slice(line: &str, start: usize, end: usize) -> &str {
    let from = byte_offset(line, start);
    let to = byte_offset(line, end);
    &line[from..to]
}

fn byte_offset(line: &str, column: usize) -> usize {
    line.char_indices()
        .map(|(i, _)| i)
        .nth(column)
        .unwrap_or(line.len())
}

/// Exactly `field.width` ASCII hex digits; no sign, no prefix, no padding.
fn parse_hex(text: &str, field: &HexField) -> Option<u16> {
    if text.len() != field.width || !text.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }
    u16::from_str_radix(text, 16).ok()
}
