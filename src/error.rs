use std::path::PathBuf;

use thiserror::Error;

use crate::columns::Shape;

/// Fatal conditions raised while loading or parsing a `pci.ids` database.
///
/// There is no recovery: the first error aborts the pass and no mappings are
/// returned.
#[derive(Error, Debug)]
pub enum ParseError {
    #[error("line {line_no}: {field} field {text:?} is not {width}-digit hex: {line:?}")]
    MalformedHexField {
        /// 1-indexed line number
        line_no: usize,
        field: &'static str,
        width: usize,
        text: String,
        line: String,
    },

    #[error("line {line_no}: {shape} line needs at least {required} characters, found {actual}: {line:?}")]
    TruncatedLine {
        line_no: usize,
        shape: Shape,
        required: usize,
        actual: usize,
        line: String,
    },

    #[error("failed to read {}", path.display())]
    UnreadableInput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ParseError {
    /// Line number the error points at, if it came from a specific line.
    pub fn line_no(&self) -> Option<usize> {
        match self {
            ParseError::MalformedHexField { line_no, .. }
            | ParseError::TruncatedLine { line_no, .. } => Some(*line_no),
            ParseError::UnreadableInput { .. } => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ParseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_hex_display_names_line_and_field() {
        let err = ParseError::MalformedHexField {
            line_no: 7,
            field: "class id",
            width: 2,
            text: "ZZ".to_string(),
            line: "C ZZ  Bad".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "line 7: class id field \"ZZ\" is not 2-digit hex: \"C ZZ  Bad\""
        );
        assert_eq!(err.line_no(), Some(7));
    }

    #[test]
    fn truncated_display() {
        let err = ParseError::TruncatedLine {
            line_no: 3,
            shape: Shape::Product,
            required: 7,
            actual: 5,
            line: "\t0002".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "line 3: product line needs at least 7 characters, found 5: \"\\t0002\""
        );
    }

    #[test]
    fn unreadable_input_has_no_line() {
        let err = ParseError::UnreadableInput {
            path: PathBuf::from("/nonexistent/pci.ids"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert_eq!(err.line_no(), None);
        assert_eq!(err.to_string(), "failed to read /nonexistent/pci.ids");
    }
}
