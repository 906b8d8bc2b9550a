//! Build post-target transformer
//!
//! Runs after a `@nx/remix:build` target has been replaced by the inferred
//! plugin's target. Options that the plugin reads from `remix.config.*` are
//! moved there; the remaining target is handed back for persistence.

use crate::config::MigrationConfig;
use crate::error::{MigrationError, MigrationResult};
use crate::tree::{join_path, FileTree};
use inferred_log::AggregatedLog;
use inferred_source::{
    inject_config_value_table, patch_property, InjectionTemplate, PatchOutcome, PropertyPatch,
    SourceLanguage,
};
use inferred_target::{
    prune_outputs_referencing, InferredOutputNormalizer, OptionExtractor, OutputNormalizer,
    ProjectDetails, TargetConfiguration, REMIX_BUILD_FIELDS,
};
use std::sync::Arc;

/// Config properties derived from the migrated `outputPath`, in patch order
fn output_path_patches(options_identifier: &str) -> Vec<PropertyPatch> {
    vec![
        PropertyPatch::new(
            "serverBuildPath",
            format!(r#"{options_identifier}.outputPath + "/build/index.js""#),
        ),
        PropertyPatch::new(
            "assetsBuildDirectory",
            format!(r#"{options_identifier}.outputPath + "/public/build""#),
        ),
    ]
}

/// Moves build options out of `project.json` into the Remix config file
pub struct BuildPostTargetTransformer {
    config: MigrationConfig,
    log: Arc<AggregatedLog>,
    extractor: OptionExtractor,
    normalizer: Box<dyn OutputNormalizer + Send + Sync>,
    template: InjectionTemplate,
    patches: Vec<PropertyPatch>,
}

impl std::fmt::Debug for BuildPostTargetTransformer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BuildPostTargetTransformer")
            .field("config", &self.config)
            .field("patches", &self.patches)
            .finish_non_exhaustive()
    }
}

impl BuildPostTargetTransformer {
    /// Transformer with the default configuration
    #[must_use]
    pub fn new(log: Arc<AggregatedLog>) -> Self {
        Self::with_config(MigrationConfig::default(), log)
    }

    #[must_use]
    pub fn with_config(config: MigrationConfig, log: Arc<AggregatedLog>) -> Self {
        let mut extractor =
            OptionExtractor::new(REMIX_BUILD_FIELDS, Arc::clone(&log), config.executor_name.as_str());
        if let Some(root) = &config.workspace_root {
            extractor = extractor.with_workspace_root(root.clone());
        }
        let template = config.injection_template();
        let patches = output_path_patches(&template.options_identifier);

        Self {
            config,
            log,
            extractor,
            normalizer: Box::new(InferredOutputNormalizer),
            template,
            patches,
        }
    }

    /// Replace the output normalizer
    #[must_use]
    pub fn with_output_normalizer(
        mut self,
        normalizer: impl OutputNormalizer + Send + Sync + 'static,
    ) -> Self {
        self.normalizer = Box::new(normalizer);
        self
    }

    #[inline]
    #[must_use]
    pub fn config(&self) -> &MigrationConfig {
        &self.config
    }

    /// Shared log receiving unmigratable concerns
    #[inline]
    #[must_use]
    pub fn log(&self) -> &Arc<AggregatedLog> {
        &self.log
    }

    /// First configured config file present under the project root
    pub fn config_file_path(&self, tree: &dyn FileTree, project: &ProjectDetails) -> Option<String> {
        self.config
            .config_file_names
            .iter()
            .map(|name| join_path(&project.root, name))
            .find(|path| tree.exists(path))
    }

    /// Migrate one project's build target
    ///
    /// Recognized options are removed from `target` and every configuration
    /// variant, the Remix config file is rewritten to read them from an
    /// injected lookup table, and the pruned target is returned.
    ///
    /// # Errors
    /// Returns `MigrationError::ConfigFileNotFound` before touching anything
    /// when the project has no Remix config, `MigrationError::Patch` when the
    /// config does not parse, and `MigrationError::Tree` on IO failure. The
    /// config file is only written when the whole rewrite succeeded.
    pub fn transform(
        &self,
        mut target: TargetConfiguration,
        tree: &mut dyn FileTree,
        project: &ProjectDetails,
        inferred: &TargetConfiguration,
    ) -> MigrationResult<TargetConfiguration> {
        let not_found = || MigrationError::ConfigFileNotFound {
            project: project.project_name.clone(),
            root: project.root.clone(),
        };
        let config_path = self.config_file_path(tree, project).ok_or_else(not_found)?;
        tracing::debug!(project = %project.project_name, path = %config_path, "found Remix config");

        let table = self.extractor.extract_target(&mut target, project);

        if let Some(outputs) = target.outputs.as_mut() {
            let fields: Vec<&str> = self.extractor.migratable_fields().collect();
            let pruned = prune_outputs_referencing(outputs, &fields);
            if pruned > 0 {
                tracing::debug!(project = %project.project_name, pruned, "pruned outputs");
            }
        }
        self.normalizer.normalize(&mut target, inferred, project);

        let original = tree.read(&config_path)?.ok_or_else(not_found)?;
        let language = SourceLanguage::for_path(&config_path);
        let mut text = original.clone();

        if table.has_output_path() {
            for patch in &self.patches {
                let outcome = patch_property(&text, language, patch)
                    .map_err(|e| MigrationError::patch(config_path.as_str(), e))?;
                match outcome {
                    PatchOutcome::Replaced { text: patched, span } => {
                        tracing::debug!(field = %patch.field, ?span, "replaced config property");
                        text = patched;
                    }
                    PatchOutcome::Inserted { text: patched, at } => {
                        tracing::debug!(field = %patch.field, at, "inserted config property");
                        text = patched;
                    }
                    PatchOutcome::Unmigratable => self.record_unmigratable(project, &patch.field),
                }
            }
        } else {
            tracing::debug!(project = %project.project_name, "no outputPath to wire into config");
        }

        text = inject_config_value_table(&text, language, &table, &self.template)
            .map_err(|e| MigrationError::patch(config_path.as_str(), e))?;

        if text != original {
            tree.write(&config_path, &text)?;
        }

        tracing::info!(
            project = %project.project_name,
            path = %config_path,
            variants = table.len(),
            "migrated build target"
        );
        Ok(target)
    }

    fn record_unmigratable(&self, project: &ProjectDetails, field: &str) {
        let message = format!(
            "Unable to update Remix Config to set `{field}` to custom `outputPath` found in project.json. Please update this manually."
        );
        if self.log.add_log(
            project.project_name.as_str(),
            self.config.executor_name.as_str(),
            message.as_str(),
        ) {
            tracing::warn!(project = %project.project_name, "{message}");
        }
    }
}
