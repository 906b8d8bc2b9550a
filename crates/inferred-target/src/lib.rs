//! Target configuration model and option extraction
//!
//! Everything that happens to the declarative side of a migration lives here:
//!
//! - [`TargetConfiguration`]: a project.json target (options, configuration
//!   variants, outputs)
//! - [`ConfigValueTable`]: the per-variant values pulled out of a target
//! - [`OptionExtractor`]: walks options and variants, moves migratable fields
//!   into the table and records the ones that cannot be migrated
//! - [`outputs`]: pruning and normalization of declared outputs
//! - [`path`]: workspace-relative to project-relative path conversion
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use inferred_log::AggregatedLog;
//! use inferred_target::{OptionExtractor, ProjectDetails, TargetConfiguration};
//!
//! let mut target: TargetConfiguration = serde_json::from_value(serde_json::json!({
//!     "options": { "outputPath": "dist/apps/myapp" }
//! })).unwrap();
//!
//! let extractor = OptionExtractor::remix_build(Arc::new(AggregatedLog::new()));
//! let project = ProjectDetails::new("myapp", "apps/myapp");
//! let table = extractor.extract_target(&mut target, &project);
//!
//! assert_eq!(table.to_json().unwrap(), r#"{"default":{"outputPath":"../../dist/apps/myapp"}}"#);
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

pub mod extract;
pub mod outputs;
pub mod path;
mod target;
mod values;

pub use extract::{FieldRule, FieldStrategy, MigrateFn, OptionExtractor, REMIX_BUILD_FIELDS};
pub use outputs::{prune_outputs_referencing, InferredOutputNormalizer, OutputNormalizer};
pub use path::to_project_relative_path;
pub use target::{ProjectDetails, TargetConfiguration};
pub use values::{ConfigValueTable, ConfigValues, DEFAULT_VARIANT};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
