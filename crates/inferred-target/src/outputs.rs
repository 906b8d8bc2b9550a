//! Output template pruning and normalization

use crate::target::{ProjectDetails, TargetConfiguration};

/// Remove outputs that interpolate any of `fields` from the options
///
/// An output such as `{options.outputPath}` no longer resolves once
/// `outputPath` has been moved out of the target. Returns the number of
/// outputs removed.
pub fn prune_outputs_referencing(outputs: &mut Vec<String>, fields: &[&str]) -> usize {
    let before = outputs.len();
    outputs.retain(|output| {
        !fields
            .iter()
            .any(|field| output.contains(&format!("options.{field}")))
    });
    before - outputs.len()
}

/// Final bookkeeping of a migrated target's outputs
pub trait OutputNormalizer {
    /// Normalize `target.outputs` against the outputs of the inferred target
    fn normalize(
        &self,
        target: &mut TargetConfiguration,
        inferred: &TargetConfiguration,
        project: &ProjectDetails,
    );
}

/// Drops outputs the inferred target already declares
///
/// Templates are compared after `{projectRoot}` and `{workspaceRoot}`
/// interpolation. When nothing is left the `outputs` key is removed, so the
/// inferred outputs apply unchanged.
#[derive(Debug, Clone, Copy, Default)]
pub struct InferredOutputNormalizer;

impl OutputNormalizer for InferredOutputNormalizer {
    fn normalize(
        &self,
        target: &mut TargetConfiguration,
        inferred: &TargetConfiguration,
        project: &ProjectDetails,
    ) {
        let Some(outputs) = target.outputs.as_mut() else {
            return;
        };

        let inferred_outputs: Vec<String> = inferred
            .outputs
            .iter()
            .flatten()
            .map(|o| interpolate(o, &project.root))
            .collect();

        outputs.retain(|o| !inferred_outputs.contains(&interpolate(o, &project.root)));
        if outputs.is_empty() {
            target.outputs = None;
        }
    }
}

fn interpolate(template: &str, project_root: &str) -> String {
    let replaced = template.replace("{projectRoot}", project_root);
    replaced
        .strip_prefix("{workspaceRoot}/")
        .map(str::to_string)
        .unwrap_or(replaced)
        .trim_end_matches('/')
        .to_string()
}
