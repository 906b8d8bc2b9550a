//! Batch migration over many projects

use crate::error::MigrationResult;
use crate::transformer::BuildPostTargetTransformer;
use crate::tree::FileTree;
use inferred_log::{AggregatedLog, LogSink};
use inferred_target::{ProjectDetails, TargetConfiguration};
use std::sync::Arc;

/// One project's build target and the inferred target replacing it
#[derive(Debug, Clone)]
pub struct ProjectTarget {
    pub project: ProjectDetails,
    pub target: TargetConfiguration,
    pub inferred: TargetConfiguration,
}

impl ProjectTarget {
    #[must_use]
    pub fn new(project: ProjectDetails, target: TargetConfiguration) -> Self {
        Self {
            project,
            target,
            inferred: TargetConfiguration::new(),
        }
    }

    /// With the inferred target's configuration
    #[must_use]
    pub fn with_inferred(mut self, inferred: TargetConfiguration) -> Self {
        self.inferred = inferred;
        self
    }
}

/// Result of migrating one project
#[derive(Debug)]
pub struct ProjectOutcome {
    pub project: ProjectDetails,
    pub result: MigrationResult<TargetConfiguration>,
}

/// Deferred flush of the aggregated log
///
/// Consumed on use, so the report is emitted at most once per run.
#[must_use = "migration warnings are only reported when flushed"]
pub struct FlushLogs {
    log: Arc<AggregatedLog>,
    sink: Arc<dyn LogSink>,
}

impl std::fmt::Debug for FlushLogs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FlushLogs")
            .field("pending", &self.log.len())
            .finish_non_exhaustive()
    }
}

impl FlushLogs {
    pub fn new(log: Arc<AggregatedLog>, sink: Arc<dyn LogSink>) -> Self {
        Self { log, sink }
    }

    /// Entries waiting to be flushed
    #[must_use]
    pub fn pending(&self) -> usize {
        self.log.len()
    }

    /// Emit the report; returns the number of entries flushed
    pub fn flush(self) -> usize {
        self.log.flush(self.sink.as_ref())
    }

    /// As a plain callback
    pub fn into_callback(self) -> impl FnOnce() -> usize {
        move || self.flush()
    }
}

/// Outcomes of a batch plus the deferred log flush
#[derive(Debug)]
pub struct MigrationRun {
    pub outcomes: Vec<ProjectOutcome>,
    pub flush: FlushLogs,
}

impl MigrationRun {
    /// Number of projects that migrated without a fatal error
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }
}

/// Migrate every project in `projects`
///
/// A fatal error for one project is kept in its outcome and the remaining
/// projects still run. Non-fatal concerns accumulate in the transformer's
/// log until the returned [`FlushLogs`] is invoked.
pub fn migrate_projects<I>(
    transformer: &BuildPostTargetTransformer,
    tree: &mut dyn FileTree,
    projects: I,
    sink: Arc<dyn LogSink>,
) -> MigrationRun
where
    I: IntoIterator<Item = ProjectTarget>,
{
    let outcomes: Vec<ProjectOutcome> = projects
        .into_iter()
        .map(|p| {
            let result = transformer.transform(p.target, &mut *tree, &p.project, &p.inferred);
            if let Err(e) = &result {
                tracing::warn!(project = %p.project.project_name, error = %e, "migration failed");
            }
            ProjectOutcome {
                project: p.project,
                result,
            }
        })
        .collect();

    tracing::info!(
        projects = outcomes.len(),
        failed = outcomes.iter().filter(|o| o.result.is_err()).count(),
        "migration batch finished"
    );

    MigrationRun {
        outcomes,
        flush: FlushLogs::new(Arc::clone(transformer.log()), sink),
    }
}
