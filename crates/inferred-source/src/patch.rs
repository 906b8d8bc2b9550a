//! Property patching
//!
//! Points one property of the default-exported config object at a computed
//! expression. An existing string-literal value is replaced in place; when the
//! property is missing it is inserted right after the object's opening brace.

use crate::edit::{splice, SourceEdit};
use crate::error::PatchResult;
use crate::parse::{ParsedSource, SourceLanguage};
use crate::query::Selector;
use std::ops::Range;

/// A property that should read from an expression instead of a literal
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PropertyPatch {
    /// Property name, e.g. `serverBuildPath`
    pub field: String,
    /// Expression used as the property value
    pub expression: String,
}

impl PropertyPatch {
    #[inline]
    #[must_use]
    pub fn new(field: impl Into<String>, expression: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            expression: expression.into(),
        }
    }
}

/// What [`patch_property`] did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PatchOutcome {
    /// An existing string literal was replaced
    Replaced { text: String, span: Range<usize> },
    /// A new property was inserted after the object's opening brace
    Inserted { text: String, at: usize },
    /// No default-exported object literal; the field needs a manual fix
    Unmigratable,
}

impl PatchOutcome {
    /// Patched text, or `None` when nothing could be patched
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Replaced { text, .. } | Self::Inserted { text, .. } => Some(text),
            Self::Unmigratable => None,
        }
    }

    /// Patched text, or `original` when nothing could be patched
    #[must_use]
    pub fn into_text_or(self, original: &str) -> String {
        match self {
            Self::Replaced { text, .. } | Self::Inserted { text, .. } => text,
            Self::Unmigratable => original.to_string(),
        }
    }
}

/// Patch `patch.field` in the default export of `text`
///
/// # Errors
/// Returns `PatchError::Parse` when `text` is not valid source. A missing
/// export object is not an error; it yields [`PatchOutcome::Unmigratable`].
pub fn patch_property(
    text: &str,
    language: SourceLanguage,
    patch: &PropertyPatch,
) -> PatchResult<PatchOutcome> {
    let parsed = ParsedSource::parse(text, language)?;

    if let Some(literal) = parsed.find(Selector::StringProperty(&patch.field)) {
        let span = literal.byte_range();
        tracing::debug!(field = %patch.field, ?span, "replacing string literal");
        let text = splice(text, SourceEdit::replace(span.clone(), patch.expression.as_str()))?;
        return Ok(PatchOutcome::Replaced { text, span });
    }

    let Some(object) = parsed.find(Selector::DefaultExportObject) else {
        tracing::debug!(field = %patch.field, "no default-exported object literal");
        return Ok(PatchOutcome::Unmigratable);
    };

    let at = object.start_byte() + 1;
    tracing::debug!(field = %patch.field, at, "inserting property");
    let property = format!("{}: {},", patch.field, patch.expression);
    let text = splice(text, SourceEdit::insert(at, property))?;
    Ok(PatchOutcome::Inserted { text, at })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PatchError;
    use pretty_assertions::assert_eq;

    fn server_build_path() -> PropertyPatch {
        PropertyPatch::new("serverBuildPath", r#"options.outputPath + "/build/index.js""#)
    }

    #[test]
    fn replaces_existing_literal_only() {
        let text = "export default {\n  serverBuildPath: \"build/index.js\", // server\n};\n";

        let outcome = patch_property(text, SourceLanguage::TypeScript, &server_build_path()).unwrap();

        assert_eq!(
            outcome.text().unwrap(),
            "export default {\n  serverBuildPath: options.outputPath + \"/build/index.js\", // server\n};\n"
        );
        assert!(matches!(outcome, PatchOutcome::Replaced { span, .. } if span == (36..52)));
    }

    #[test]
    fn inserts_after_opening_brace() {
        let text = "export default {\n  ignoredRouteFiles: ['**/.*'],\n};\n";

        let outcome = patch_property(text, SourceLanguage::TypeScript, &server_build_path()).unwrap();

        assert_eq!(
            outcome.text().unwrap(),
            "export default {serverBuildPath: options.outputPath + \"/build/index.js\",\n  ignoredRouteFiles: ['**/.*'],\n};\n"
        );
        assert!(matches!(outcome, PatchOutcome::Inserted { at: 16, .. }));
    }

    #[test]
    fn inserts_into_empty_object() {
        let text = "export default {};";
        let outcome = patch_property(text, SourceLanguage::TypeScript, &server_build_path()).unwrap();
        assert_eq!(
            outcome.text().unwrap(),
            "export default {serverBuildPath: options.outputPath + \"/build/index.js\",};"
        );
    }

    #[test]
    fn missing_export_is_unmigratable() {
        let text = "const config = {};\nexport { config };\n";
        let outcome = patch_property(text, SourceLanguage::TypeScript, &server_build_path()).unwrap();

        assert_eq!(outcome, PatchOutcome::Unmigratable);
        assert_eq!(outcome.into_text_or(text), text);
    }

    #[test]
    fn invalid_source_is_fatal() {
        let err = patch_property("export default {", SourceLanguage::TypeScript, &server_build_path())
            .unwrap_err();
        assert!(matches!(err, PatchError::Parse(_)));
    }
}
