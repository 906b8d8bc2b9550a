//! Shape selectors over a parsed config source
//!
//! A small fixed set of shape predicates, each answering "first node of
//! shape S within the default export". Search order is pre-order, so an
//! outer object wins over the objects nested inside it.

use crate::parse::{find_first, ParsedSource};
use tree_sitter::Node;

/// Shapes the patcher looks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selector<'a> {
    /// First object literal within the default export
    ///
    /// Matches `export default {…}` as well as the argument of
    /// `export default defineConfig({…})`.
    DefaultExportObject,

    /// String literal value of the first property named `.0` within the
    /// default export. Matches `name: "…"` and `"name": "…"`.
    StringProperty(&'a str),
}

impl ParsedSource<'_> {
    /// Find the first node matching `selector`
    ///
    /// For [`Selector::StringProperty`] the returned node is the string
    /// literal itself, quotes included, not the whole property.
    #[must_use]
    pub fn find(&self, selector: Selector<'_>) -> Option<Node<'_>> {
        let scope = self.default_export()?.value;
        match selector {
            Selector::DefaultExportObject => find_first(scope, &|n| n.kind() == "object"),
            Selector::StringProperty(name) => {
                let pair = find_first(scope, &|n| self.is_string_property(n, name))?;
                pair.child_by_field_name("value")
            }
        }
    }

    fn is_string_property(&self, node: &Node<'_>, name: &str) -> bool {
        if node.kind() != "pair" {
            return false;
        }
        let (Some(key), Some(value)) = (
            node.child_by_field_name("key"),
            node.child_by_field_name("value"),
        ) else {
            return false;
        };
        if value.kind() != "string" {
            return false;
        }

        match key.kind() {
            "property_identifier" => self.node_text(key) == name,
            "string" => unquote(self.node_text(key)) == name,
            _ => false,
        }
    }
}

fn unquote(literal: &str) -> &str {
    literal
        .strip_prefix(['"', '\''])
        .and_then(|s| s.strip_suffix(['"', '\'']))
        .unwrap_or(literal)
}
