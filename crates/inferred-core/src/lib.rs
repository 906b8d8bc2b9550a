//! Remix build target migration to the inferred plugin
//!
//! Glue between the declarative side ([`inferred_target`]) and the config
//! source side ([`inferred_source`]). For each project the
//! [`BuildPostTargetTransformer`]:
//!
//! 1. locates `remix.config.{js,cjs,mjs}` under the project root
//! 2. extracts migratable options from the target and its configurations
//! 3. prunes outputs that referenced the removed options
//! 4. rewrites the config file to read the values from an injected table
//! 5. returns the pruned target
//!
//! Warnings that do not stop a migration are collected in a shared
//! [`AggregatedLog`](inferred_log::AggregatedLog) and reported once per run
//! through [`FlushLogs`].
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use inferred_core::{BuildPostTargetTransformer, MemoryTree};
//! use inferred_log::AggregatedLog;
//! use inferred_target::{ProjectDetails, TargetConfiguration};
//!
//! let mut tree = MemoryTree::new()
//!     .with_file("apps/myapp/remix.config.js", "export default {\n  ignoredRouteFiles: ['**/.*'],\n};\n");
//! let target: TargetConfiguration = serde_json::from_value(serde_json::json!({
//!     "options": { "outputPath": "dist/apps/myapp" }
//! })).unwrap();
//!
//! let transformer = BuildPostTargetTransformer::new(Arc::new(AggregatedLog::new()));
//! let project = ProjectDetails::new("myapp", "apps/myapp");
//! let pruned = transformer
//!     .transform(target, &mut tree, &project, &TargetConfiguration::new())
//!     .unwrap();
//!
//! assert_eq!(serde_json::to_value(&pruned).unwrap(), serde_json::json!({ "options": {} }));
//! assert!(tree.get("apps/myapp/remix.config.js").unwrap().contains("const configValues"));
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod batch;
pub mod config;
pub mod error;
pub mod transformer;
pub mod tree;

pub use batch::{migrate_projects, FlushLogs, MigrationRun, ProjectOutcome, ProjectTarget};
pub use config::MigrationConfig;
pub use error::{ConfigError, MigrationError, MigrationResult, TreeError};
pub use transformer::BuildPostTargetTransformer;
pub use tree::{join_path, FileTree, FsTree, MemoryTree};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
