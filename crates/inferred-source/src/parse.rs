//! Config source parsing
//!
//! Full-fidelity tree-sitter parse of a JavaScript/TypeScript config file.
//! Comments are kept as `comment` nodes and every node carries byte offsets
//! into the original text, which is what the patcher splices against.

use crate::error::ParseError;
use std::path::Path;
use tree_sitter::{Node, Parser, Tree};

/// Grammar used for a config file
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SourceLanguage {
    /// `.js`, `.cjs`, `.mjs`, `.ts`, `.cts`, `.mts`
    TypeScript,
    /// `.jsx`, `.tsx`
    Tsx,
}

impl SourceLanguage {
    /// Get file extensions for this grammar
    #[inline]
    #[must_use]
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            SourceLanguage::TypeScript => &["js", "cjs", "mjs", "ts", "cts", "mts"],
            SourceLanguage::Tsx => &["jsx", "tsx"],
        }
    }

    /// Detect grammar from file extension
    #[inline]
    #[must_use]
    pub fn from_extension(ext: &str) -> Option<Self> {
        let ext = ext.trim_start_matches('.');
        [SourceLanguage::TypeScript, SourceLanguage::Tsx]
            .into_iter()
            .find(|lang| lang.extensions().contains(&ext))
    }

    /// Grammar for `path`, TypeScript when the extension is unknown
    #[must_use]
    pub fn for_path(path: impl AsRef<Path>) -> Self {
        path.as_ref()
            .extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
            .unwrap_or(SourceLanguage::TypeScript)
    }

    /// Get tree-sitter language
    #[inline]
    #[must_use]
    pub fn tree_sitter_language(&self) -> tree_sitter::Language {
        match self {
            SourceLanguage::TypeScript => tree_sitter_typescript::LANGUAGE_TYPESCRIPT.into(),
            SourceLanguage::Tsx => tree_sitter_typescript::LANGUAGE_TSX.into(),
        }
    }
}

/// The default export of a config file
#[derive(Debug, Clone, Copy)]
pub struct DefaultExport<'t> {
    /// Top-level statement holding the export
    pub statement: Node<'t>,
    /// Exported expression
    pub value: Node<'t>,
}

/// Parsed config source with its original text
#[derive(Debug)]
pub struct ParsedSource<'s> {
    text: &'s str,
    tree: Tree,
}

impl<'s> ParsedSource<'s> {
    /// Parse `text`
    ///
    /// # Errors
    /// Returns `ParseError::Syntax` with the position of the first error node
    /// when the text does not parse cleanly.
    pub fn parse(text: &'s str, language: SourceLanguage) -> Result<Self, ParseError> {
        let mut parser = Parser::new();
        parser
            .set_language(&language.tree_sitter_language())
            .map_err(|e| ParseError::LanguageInit(e.to_string()))?;

        let tree = parser.parse(text, None).ok_or(ParseError::ParseFailed)?;

        let root = tree.root_node();
        if root.has_error() {
            let bad = find_first(root, &|n| n.is_error() || n.is_missing()).unwrap_or(root);
            let position = bad.start_position();
            let snippet: String = text[bad.byte_range()]
                .lines()
                .next()
                .unwrap_or_default()
                .chars()
                .take(40)
                .collect();
            return Err(ParseError::syntax(position.row + 1, position.column + 1, snippet));
        }

        Ok(Self { text, tree })
    }

    /// Original text
    #[inline]
    #[must_use]
    pub fn text(&self) -> &'s str {
        self.text
    }

    /// Root `program` node
    #[inline]
    #[must_use]
    pub fn root(&self) -> Node<'_> {
        self.tree.root_node()
    }

    /// Source text of `node`
    #[inline]
    #[must_use]
    pub fn node_text(&self, node: Node<'_>) -> &'s str {
        &self.text[node.byte_range()]
    }

    /// Locate the default export
    ///
    /// Recognizes `export default <expr>`, `export = <expr>` and the CommonJS
    /// `module.exports = <expr>`. The first one at the top level wins.
    #[must_use]
    pub fn default_export(&self) -> Option<DefaultExport<'_>> {
        let root = self.root();
        let mut cursor = root.walk();
        let statements: Vec<_> = root.named_children(&mut cursor).collect();

        statements.into_iter().find_map(|statement| {
            let value = match statement.kind() {
                "export_statement" => self.export_value(statement),
                "expression_statement" => self.commonjs_export_value(statement),
                _ => None,
            }?;
            Some(DefaultExport { statement, value })
        })
    }

    /// Last top-level import statement
    #[must_use]
    pub fn last_import(&self) -> Option<Node<'_>> {
        let root = self.root();
        let mut cursor = root.walk();
        let imports: Vec<_> = root
            .named_children(&mut cursor)
            .filter(|n| n.kind() == "import_statement")
            .collect();
        imports.last().copied()
    }

    fn export_value<'t>(&self, statement: Node<'t>) -> Option<Node<'t>> {
        let mut cursor = statement.walk();
        let is_default = statement
            .children(&mut cursor)
            .any(|c| !c.is_named() && matches!(c.kind(), "default" | "="));
        if !is_default {
            return None;
        }

        statement.child_by_field_name("value").or_else(|| {
            let mut cursor = statement.walk();
            let values: Vec<_> = statement
                .named_children(&mut cursor)
                .filter(|c| c.kind() != "comment" && c.kind() != "decorator")
                .collect();
            values.first().copied()
        })
    }

    fn commonjs_export_value<'t>(&self, statement: Node<'t>) -> Option<Node<'t>> {
        let assignment = statement.named_child(0)?;
        if assignment.kind() != "assignment_expression" {
            return None;
        }
        let left = assignment.child_by_field_name("left")?;
        if self.node_text(left) != "module.exports" {
            return None;
        }
        assignment.child_by_field_name("right")
    }
}

/// First node, in pre-order, below and including `node` that satisfies `pred`
pub(crate) fn find_first<'t>(
    node: Node<'t>,
    pred: &dyn Fn(&Node<'t>) -> bool,
) -> Option<Node<'t>> {
    if pred(&node) {
        return Some(node);
    }
    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(|child| find_first(child, pred))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_from_extension() {
        assert_eq!(SourceLanguage::from_extension("js"), Some(SourceLanguage::TypeScript));
        assert_eq!(SourceLanguage::from_extension(".mjs"), Some(SourceLanguage::TypeScript));
        assert_eq!(SourceLanguage::from_extension("tsx"), Some(SourceLanguage::Tsx));
        assert_eq!(SourceLanguage::from_extension("json"), None);
    }

    #[test]
    fn language_for_path() {
        assert_eq!(
            SourceLanguage::for_path("apps/myapp/remix.config.cjs"),
            SourceLanguage::TypeScript
        );
        assert_eq!(SourceLanguage::for_path("app/root.jsx"), SourceLanguage::Tsx);
        assert_eq!(SourceLanguage::for_path("Makefile"), SourceLanguage::TypeScript);
    }

    #[test]
    fn parses_esm_default_export() {
        let text = "import a from 'a';\n\nexport default { b: 1 };\n";
        let parsed = ParsedSource::parse(text, SourceLanguage::TypeScript).unwrap();

        let export = parsed.default_export().unwrap();
        assert_eq!(export.value.kind(), "object");
        assert_eq!(parsed.node_text(export.value), "{ b: 1 }");
        assert_eq!(parsed.node_text(parsed.last_import().unwrap()), "import a from 'a';");
    }

    #[test]
    fn parses_commonjs_export() {
        let text = "module.exports = {\n  ignoredRouteFiles: ['**/.*'],\n};\n";
        let parsed = ParsedSource::parse(text, SourceLanguage::TypeScript).unwrap();

        let export = parsed.default_export().unwrap();
        assert_eq!(export.statement.kind(), "expression_statement");
        assert_eq!(export.value.kind(), "object");
    }

    #[test]
    fn named_exports_are_not_default() {
        let text = "export const config = { a: 1 };\n";
        let parsed = ParsedSource::parse(text, SourceLanguage::TypeScript).unwrap();
        assert!(parsed.default_export().is_none());
    }

    #[test]
    fn syntax_errors_are_reported_with_position() {
        let text = "export default {\n  a: ,\n};\n";
        let err = ParsedSource::parse(text, SourceLanguage::TypeScript).unwrap_err();
        match err {
            ParseError::Syntax { line, .. } => assert!(line >= 1),
            other => panic!("unexpected error: {other}"),
        }
    }
}
