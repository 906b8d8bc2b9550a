//! Declarative target configuration, as stored in project.json

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Project a target belongs to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectDetails {
    /// Project name, used to attribute log entries
    pub project_name: String,
    /// Project root, relative to the workspace root
    pub root: String,
}

impl ProjectDetails {
    #[inline]
    #[must_use]
    pub fn new(project_name: impl Into<String>, root: impl Into<String>) -> Self {
        Self {
            project_name: project_name.into(),
            root: root.into(),
        }
    }
}

/// One build/serve/test target of a project
///
/// Only the keys the migration touches are modelled; everything else
/// (`executor`, `dependsOn`, `cache`, …) is carried through in `extra`.
/// Absent keys stay absent when the target is written back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetConfiguration {
    /// Base options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<Map<String, Value>>,

    /// Named configuration variants, each a partial override of `options`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub configurations: Option<IndexMap<String, Map<String, Value>>>,

    /// Output path templates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outputs: Option<Vec<String>>,

    /// Variant used when none is requested
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_configuration: Option<String>,

    /// Keys this crate does not interpret
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TargetConfiguration {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// With base options
    #[must_use]
    pub fn with_options(mut self, options: Map<String, Value>) -> Self {
        self.options = Some(options);
        self
    }

    /// With one more configuration variant
    #[must_use]
    pub fn with_configuration(mut self, name: impl Into<String>, options: Map<String, Value>) -> Self {
        self.configurations
            .get_or_insert_with(IndexMap::new)
            .insert(name.into(), options);
        self
    }

    /// With output templates
    #[must_use]
    pub fn with_outputs<I, S>(mut self, outputs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.outputs = Some(outputs.into_iter().map(Into::into).collect());
        self
    }

    /// With default configuration
    #[must_use]
    pub fn with_default_configuration(mut self, name: impl Into<String>) -> Self {
        self.default_configuration = Some(name.into());
        self
    }

    /// Whether `field` is set in the base options or any variant
    #[must_use]
    pub fn declares_field(&self, field: &str) -> bool {
        self.options.as_ref().is_some_and(|o| o.contains_key(field))
            || self
                .configurations
                .as_ref()
                .is_some_and(|c| c.values().any(|o| o.contains_key(field)))
    }

    /// Drop an empty `configurations` mapping and a dangling
    /// `defaultConfiguration`
    ///
    /// A mapping with no variants at all is removed together with
    /// `defaultConfiguration`. A variant that is present but has become `{}`
    /// is kept, so the variant can still be requested by name.
    pub fn repair_configurations(&mut self) {
        if self.configurations.as_ref().is_some_and(IndexMap::is_empty) {
            self.configurations = None;
            self.default_configuration = None;
            return;
        }

        let dangling = match (&self.default_configuration, &self.configurations) {
            (Some(name), Some(configs)) => !configs.contains_key(name),
            (Some(_), None) => true,
            _ => false,
        };
        if dangling {
            self.default_configuration = None;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn roundtrips_unmodelled_keys() {
        let raw = json!({
            "executor": "@nx/remix:build",
            "dependsOn": ["^build"],
            "options": { "outputPath": "dist/apps/myapp" },
            "defaultConfiguration": "production",
            "configurations": { "production": {} }
        });

        let target: TargetConfiguration = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(target.extra["executor"], "@nx/remix:build");
        assert_eq!(target.default_configuration.as_deref(), Some("production"));
        assert_eq!(serde_json::to_value(&target).unwrap(), raw);
    }

    #[test]
    fn absent_keys_stay_absent() {
        let target = TargetConfiguration::new().with_options(Map::new());
        assert_eq!(serde_json::to_value(&target).unwrap(), json!({ "options": {} }));
    }

    #[test]
    fn repair_drops_empty_configurations() {
        let mut target: TargetConfiguration = serde_json::from_value(json!({
            "configurations": {},
            "defaultConfiguration": "dev"
        }))
        .unwrap();

        target.repair_configurations();
        assert!(target.configurations.is_none());
        assert!(target.default_configuration.is_none());
    }

    #[test]
    fn repair_keeps_emptied_variants() {
        let mut target = TargetConfiguration::new()
            .with_configuration("dev", Map::new())
            .with_default_configuration("dev");

        target.repair_configurations();
        assert_eq!(target.configurations.as_ref().map(IndexMap::len), Some(1));
        assert_eq!(target.default_configuration.as_deref(), Some("dev"));
    }

    #[test]
    fn repair_drops_dangling_default() {
        let mut target = TargetConfiguration::new()
            .with_configuration("dev", Map::new())
            .with_default_configuration("production");

        target.repair_configurations();
        assert!(target.default_configuration.is_none());
        assert!(target.configurations.as_ref().unwrap().contains_key("dev"));
    }

    #[test]
    fn declares_field_checks_variants() {
        let mut dev = Map::new();
        dev.insert("outputPath".into(), json!("dist/dev"));
        let target = TargetConfiguration::new().with_configuration("dev", dev);

        assert!(target.declares_field("outputPath"));
        assert!(!target.declares_field("generateLockfile"));
    }
}
