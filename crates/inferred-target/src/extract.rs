//! Option extraction
//!
//! Moves migratable fields out of a target's options and configuration
//! variants into a [`ConfigValueTable`], and records fields that have no
//! automated migration in the aggregated log.

use crate::path::to_project_relative_path;
use crate::target::{ProjectDetails, TargetConfiguration};
use crate::values::{ConfigValueTable, ConfigValues, DEFAULT_VARIANT};
use inferred_log::AggregatedLog;
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Moves one field's value into the extracted values
///
/// Receives the field value, the project root and the optional absolute
/// workspace root. An `Err` carries the reason the value could not be used.
pub type MigrateFn =
    fn(&Value, &str, Option<&Path>, &mut ConfigValues) -> Result<(), String>;

/// What happens to a recognized field
#[derive(Clone, Copy)]
pub enum FieldStrategy {
    /// Extracted into the table
    Migratable(MigrateFn),
    /// Dropped, with a remediation hint logged for the user
    Unsupported(&'static str),
}

impl std::fmt::Debug for FieldStrategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Migratable(_) => f.write_str("Migratable"),
            Self::Unsupported(hint) => f.debug_tuple("Unsupported").field(hint).finish(),
        }
    }
}

/// A recognized option field
#[derive(Debug, Clone, Copy)]
pub struct FieldRule {
    pub name: &'static str,
    pub strategy: FieldStrategy,
}

const DEPENDENCY_CHECKS_HINT: &str =
    "Use the `@nx/dependency-checks` ESLint rule to update your project's package.json.";

/// Fields of the `@nx/remix:build` executor
pub static REMIX_BUILD_FIELDS: &[FieldRule] = &[
    FieldRule {
        name: "outputPath",
        strategy: FieldStrategy::Migratable(migrate_output_path),
    },
    FieldRule {
        name: "includeDevDependenciesInPackageJson",
        strategy: FieldStrategy::Unsupported(DEPENDENCY_CHECKS_HINT),
    },
    FieldRule {
        name: "generatePackageJson",
        strategy: FieldStrategy::Unsupported(DEPENDENCY_CHECKS_HINT),
    },
    FieldRule {
        name: "generateLockfile",
        strategy: FieldStrategy::Unsupported(DEPENDENCY_CHECKS_HINT),
    },
];

fn migrate_output_path(
    value: &Value,
    project_root: &str,
    workspace_root: Option<&Path>,
    values: &mut ConfigValues,
) -> Result<(), String> {
    let path = value
        .as_str()
        .ok_or_else(|| format!("Expected a string path but found `{value}`."))?;
    values.output_path = Some(to_project_relative_path(path, project_root, workspace_root));
    Ok(())
}

/// Walks target options against a static field table
#[derive(Debug, Clone)]
pub struct OptionExtractor {
    fields: &'static [FieldRule],
    log: Arc<AggregatedLog>,
    source: String,
    target_name: String,
    workspace_root: Option<PathBuf>,
}

impl OptionExtractor {
    /// Extractor for `fields`, attributing log entries to `source`
    #[must_use]
    pub fn new(
        fields: &'static [FieldRule],
        log: Arc<AggregatedLog>,
        source: impl Into<String>,
    ) -> Self {
        Self {
            fields,
            log,
            source: source.into(),
            target_name: "Remix Config".to_string(),
            workspace_root: None,
        }
    }

    /// Extractor for the `@nx/remix:build` executor
    #[must_use]
    pub fn remix_build(log: Arc<AggregatedLog>) -> Self {
        Self::new(REMIX_BUILD_FIELDS, log, "@nx/remix:build")
    }

    /// Absolute workspace root, used to relativize absolute option paths
    #[must_use]
    pub fn with_workspace_root(mut self, root: impl Into<PathBuf>) -> Self {
        self.workspace_root = Some(root.into());
        self
    }

    /// Name of the destination used in log messages
    #[must_use]
    pub fn with_target_name(mut self, name: impl Into<String>) -> Self {
        self.target_name = name.into();
        self
    }

    /// Names of the fields this extractor can migrate
    pub fn migratable_fields(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.fields
            .iter()
            .filter(|f| matches!(f.strategy, FieldStrategy::Migratable(_)))
            .map(|f| f.name)
    }

    /// Extract recognized fields from one options map
    ///
    /// Recognized fields are removed from `options`; everything else is left
    /// as it was. `variant` only labels diagnostics.
    pub fn extract(
        &self,
        options: &mut Map<String, Value>,
        variant: &str,
        project: &ProjectDetails,
    ) -> ConfigValues {
        let mut values = ConfigValues::default();

        for rule in self.fields {
            let Some(value) = options.shift_remove(rule.name) else {
                continue;
            };

            match rule.strategy {
                FieldStrategy::Migratable(migrate) => {
                    let outcome = migrate(
                        &value,
                        &project.root,
                        self.workspace_root.as_deref(),
                        &mut values,
                    );
                    match outcome {
                        Ok(()) => tracing::debug!(
                            project = %project.project_name,
                            variant,
                            field = rule.name,
                            "extracted option"
                        ),
                        Err(reason) => self.record(
                            project,
                            format!(
                                "Unable to migrate `{}` to {}. {reason}",
                                rule.name, self.target_name
                            ),
                        ),
                    }
                }
                FieldStrategy::Unsupported(hint) => self.record(
                    project,
                    format!("Unable to migrate `{}` to {}. {hint}", rule.name, self.target_name),
                ),
            }
        }

        values
    }

    /// Extract from the base options and every configuration variant
    ///
    /// Returns the table with a `default` entry plus one entry per variant,
    /// and leaves `target` with the recognized fields removed and its
    /// configurations repaired.
    pub fn extract_target(
        &self,
        target: &mut TargetConfiguration,
        project: &ProjectDetails,
    ) -> ConfigValueTable {
        let mut table = ConfigValueTable::new();

        if let Some(options) = target.options.as_mut() {
            table.merge(DEFAULT_VARIANT, self.extract(options, DEFAULT_VARIANT, project));
        }

        if let Some(configurations) = target.configurations.as_mut() {
            for (variant, options) in configurations.iter_mut() {
                table.merge(variant, self.extract(options, variant, project));
            }
        }
        target.repair_configurations();

        table
    }

    fn record(&self, project: &ProjectDetails, message: String) {
        if self
            .log
            .add_log(project.project_name.as_str(), self.source.as_str(), message.as_str())
        {
            tracing::warn!(project = %project.project_name, "{message}");
        }
    }
}
