//! Aggregated migration log
//!
//! Process-lifetime collector for the non-fatal warnings a migration run
//! produces. Entries are appended per project while targets are migrated and
//! flushed once, as a single grouped report, at the end of the run.
//!
//! # Example
//!
//! ```rust
//! use inferred_log::{AggregatedLog, CollectingSink, MigrationLogEntry};
//!
//! let log = AggregatedLog::new();
//! log.add(MigrationLogEntry::new("myapp", "@nx/remix:build", "Unable to migrate `generateLockfile`"));
//!
//! let sink = CollectingSink::default();
//! log.flush(&sink);
//! assert_eq!(sink.reports().len(), 1);
//! assert!(log.is_empty());
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

use indexmap::IndexMap;
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::fmt::Write as _;

/// One non-fatal migration concern for one project
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MigrationLogEntry {
    /// Project the concern was found in
    pub project: String,
    /// Executor (or other source) the concern belongs to
    pub source: String,
    /// Human-readable message, usually with a remediation hint
    pub message: String,
}

impl MigrationLogEntry {
    #[inline]
    #[must_use]
    pub fn new(
        project: impl Into<String>,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            source: source.into(),
            message: message.into(),
        }
    }
}

/// Destination for a flushed report
pub trait LogSink: Send + Sync {
    /// Receive the rendered report. Never called with an empty report.
    fn emit(&self, report: &str);
}

/// Emits the report as a single `tracing` warning
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl LogSink for TracingSink {
    fn emit(&self, report: &str) {
        tracing::warn!("{report}");
    }
}

/// Keeps every emitted report in memory
#[derive(Debug, Default)]
pub struct CollectingSink {
    reports: Mutex<Vec<String>>,
}

impl CollectingSink {
    /// Reports emitted so far, oldest first
    #[must_use]
    pub fn reports(&self) -> Vec<String> {
        self.reports.lock().clone()
    }
}

impl LogSink for CollectingSink {
    fn emit(&self, report: &str) {
        self.reports.lock().push(report.to_string());
    }
}

/// Append-only, de-duplicating collector of migration warnings
///
/// Appends are atomic per entry, so one log can be shared (behind an `Arc`)
/// by every project migration of a run. Adding an entry identical to one
/// already recorded is a no-op.
#[derive(Debug, Default)]
pub struct AggregatedLog {
    inner: Mutex<Vec<MigrationLogEntry>>,
}

impl AggregatedLog {
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an entry. Returns `false` when it was already present.
    pub fn add(&self, entry: MigrationLogEntry) -> bool {
        let mut guard = self.inner.lock();
        if guard.contains(&entry) {
            return false;
        }
        tracing::debug!(
            project = %entry.project,
            source = %entry.source,
            "recorded migration warning: {}",
            entry.message
        );
        guard.push(entry);
        true
    }

    /// Convenience for [`AggregatedLog::add`]
    pub fn add_log(
        &self,
        project: impl Into<String>,
        source: impl Into<String>,
        message: impl Into<String>,
    ) -> bool {
        self.add(MigrationLogEntry::new(project, source, message))
    }

    /// Snapshot of the recorded entries in insertion order
    #[must_use]
    pub fn entries(&self) -> Vec<MigrationLogEntry> {
        self.inner.lock().clone()
    }

    /// Entries recorded for one project
    #[must_use]
    pub fn entries_for(&self, project: &str) -> Vec<MigrationLogEntry> {
        self.inner
            .lock()
            .iter()
            .filter(|e| e.project == project)
            .cloned()
            .collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Render the grouped report without draining the log
    ///
    /// Entries are grouped by source, then by message; each message lists the
    /// affected projects. All groups keep first-insertion order.
    #[must_use]
    pub fn render(&self) -> String {
        render_entries(&self.inner.lock())
    }

    /// Drain the log and hand the report to `sink`
    ///
    /// Returns the number of entries flushed. A second flush without new
    /// entries emits nothing.
    pub fn flush(&self, sink: &dyn LogSink) -> usize {
        let drained = std::mem::take(&mut *self.inner.lock());
        if drained.is_empty() {
            return 0;
        }
        sink.emit(&render_entries(&drained));
        drained.len()
    }
}

fn render_entries(entries: &[MigrationLogEntry]) -> String {
    let mut grouped: IndexMap<&str, IndexMap<&str, Vec<&str>>> = IndexMap::new();
    for entry in entries {
        grouped
            .entry(entry.source.as_str())
            .or_default()
            .entry(entry.message.as_str())
            .or_default()
            .push(entry.project.as_str());
    }

    let mut report = String::new();
    for (source, messages) in grouped {
        let _ = writeln!(report, "Encountered the following while migrating '{source}':");
        for (message, projects) in messages {
            let _ = writeln!(report, " • {message}");
            let _ = writeln!(report, "   Affected Projects");
            for project in projects {
                let _ = writeln!(report, "     {project}");
            }
        }
    }
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const SOURCE: &str = "@nx/remix:build";

    #[test]
    fn duplicate_entries_are_ignored() {
        let log = AggregatedLog::new();
        assert!(log.add_log("app", SOURCE, "cannot migrate"));
        assert!(!log.add_log("app", SOURCE, "cannot migrate"));
        assert!(log.add_log("other", SOURCE, "cannot migrate"));
        assert_eq!(log.len(), 2);
    }

    #[test]
    fn entries_keep_insertion_order() {
        let log = AggregatedLog::new();
        log.add_log("b", SOURCE, "second");
        log.add_log("a", SOURCE, "first");

        let messages: Vec<_> = log.entries().into_iter().map(|e| e.message).collect();
        assert_eq!(messages, vec!["second", "first"]);
        assert_eq!(log.entries_for("a").len(), 1);
    }

    #[test]
    fn render_groups_projects_by_message() {
        let log = AggregatedLog::new();
        log.add_log("app1", SOURCE, "fix A by hand");
        log.add_log("app2", SOURCE, "fix A by hand");
        log.add_log("app1", SOURCE, "fix B by hand");

        let expected = "\
Encountered the following while migrating '@nx/remix:build':
 • fix A by hand
   Affected Projects
     app1
     app2
 • fix B by hand
   Affected Projects
     app1
";
        assert_eq!(log.render(), expected);
    }

    #[test]
    fn flush_drains_once() {
        let log = AggregatedLog::new();
        log.add_log("app", SOURCE, "warning");

        let sink = CollectingSink::default();
        assert_eq!(log.flush(&sink), 1);
        assert_eq!(log.flush(&sink), 0);
        assert_eq!(sink.reports().len(), 1);
        assert!(sink.reports()[0].contains("warning"));
    }

    #[test]
    fn empty_log_renders_nothing() {
        let log = AggregatedLog::new();
        assert_eq!(log.render(), "");
        let sink = CollectingSink::default();
        assert_eq!(log.flush(&sink), 0);
        assert!(sink.reports().is_empty());
    }
}
