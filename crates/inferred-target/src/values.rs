//! Values extracted from a target, keyed by configuration variant

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Table key holding the values extracted from the base options
pub const DEFAULT_VARIANT: &str = "default";

/// Project-relative values extracted from one variant
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigValues {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output_path: Option<String>,
}

impl ConfigValues {
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.output_path.is_none()
    }

    /// Overlay `other`; fields it sets win, fields it leaves unset are kept
    pub fn merge(&mut self, other: ConfigValues) {
        if other.output_path.is_some() {
            self.output_path = other.output_path;
        }
    }
}

/// Variant name → extracted values
///
/// Always holds a [`DEFAULT_VARIANT`] entry, first. The other keys follow
/// the order the variants were declared in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ConfigValueTable {
    entries: IndexMap<String, ConfigValues>,
}

impl Default for ConfigValueTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigValueTable {
    #[must_use]
    pub fn new() -> Self {
        let mut entries = IndexMap::new();
        entries.insert(DEFAULT_VARIANT.to_string(), ConfigValues::default());
        Self { entries }
    }

    /// Merge `values` into the entry for `variant`
    ///
    /// A variant named like an existing entry (including `default`) layers
    /// over it instead of replacing it.
    pub fn merge(&mut self, variant: &str, values: ConfigValues) {
        self.entry(variant).merge(values);
    }

    /// Values for `variant`, created empty if missing
    pub fn entry(&mut self, variant: &str) -> &mut ConfigValues {
        self.entries.entry(variant.to_string()).or_default()
    }

    #[must_use]
    pub fn get(&self, variant: &str) -> Option<&ConfigValues> {
        self.entries.get(variant)
    }

    /// Values extracted from the base options
    #[must_use]
    pub fn default_values(&self) -> &ConfigValues {
        // `new` inserts the default entry and nothing removes it
        &self.entries[DEFAULT_VARIANT]
    }

    /// Variant names, `default` first
    pub fn variants(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Never true: the default entry always exists
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Whether any variant carries an output path
    #[must_use]
    pub fn has_output_path(&self) -> bool {
        self.entries.values().any(|v| v.output_path.is_some())
    }

    /// Compact JSON, in table order
    ///
    /// # Errors
    /// Returns the serializer error; cannot happen for this shape in practice.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}
