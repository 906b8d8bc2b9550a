//! Error types for config source handling
//!
//! Provides error handling for:
//! - Parse operations (text → syntax tree)
//! - Edit operations (splicing offsets into the original text)
//! - Patch operations (both of the above plus table serialization)

use std::ops::Range;

/// Errors while parsing a config source file
#[derive(Debug, Clone, thiserror::Error)]
pub enum ParseError {
    /// The grammar could not be loaded into the parser
    #[error("parser initialization failed: {0}")]
    LanguageInit(String),

    /// The parser produced no tree
    #[error("parse failed")]
    ParseFailed,

    /// The source does not parse cleanly
    #[error("syntax error at {line}:{column} near `{snippet}`")]
    Syntax {
        line: usize,
        column: usize,
        snippet: String,
    },
}

impl ParseError {
    /// Create syntax error; `line` and `column` are 1-based
    pub fn syntax(line: usize, column: usize, snippet: impl Into<String>) -> Self {
        Self::Syntax {
            line,
            column,
            snippet: snippet.into(),
        }
    }
}

/// Errors while applying text edits
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EditError {
    /// Two edits touch the same bytes
    #[error("overlapping edits: {first:?} and {second:?}")]
    Overlap {
        first: Range<usize>,
        second: Range<usize>,
    },

    /// Edit reaches past the end of the text
    #[error("edit {range:?} out of bounds for text of {len} bytes")]
    OutOfBounds { range: Range<usize>, len: usize },

    /// Edit boundary falls inside a UTF-8 sequence
    #[error("edit boundary {0} is not a char boundary")]
    NotCharBoundary(usize),
}

/// Errors while patching a config source file
#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("edit error: {0}")]
    Edit(#[from] EditError),

    #[error("serialize error: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Result type alias for patch operations
pub type PatchResult<T> = Result<T, PatchError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_error_display() {
        let err = ParseError::syntax(3, 14, "export default {");
        assert_eq!(err.to_string(), "syntax error at 3:14 near `export default {`");
    }

    #[test]
    fn edit_error_display() {
        let err = EditError::Overlap {
            first: 0..4,
            second: 2..6,
        };
        assert_eq!(err.to_string(), "overlapping edits: 0..4 and 2..6");
    }

    #[test]
    fn error_conversions() {
        let patch_err: PatchError = ParseError::ParseFailed.into();
        assert!(matches!(patch_err, PatchError::Parse(_)));

        let patch_err: PatchError = EditError::NotCharBoundary(1).into();
        assert!(matches!(patch_err, PatchError::Edit(_)));
    }
}
