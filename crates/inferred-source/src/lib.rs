//! Config source patching
//!
//! Rewrites a framework config file (`remix.config.js` and friends) without
//! disturbing anything outside the spans it edits.
//!
//! # Core Operations
//!
//! - **Parse**: full-fidelity tree-sitter parse, comments included
//! - **Select**: find the default export's object literal or a string-valued
//!   property inside it
//! - **Patch**: replace that literal, or insert the property, by splicing
//!   byte offsets into the original text
//! - **Inject**: emit the per-configuration value table ahead of the export
//!
//! # Architecture
//!
//! ```text
//! text → ParsedSource → Selector → SourceEdit → EditSet::apply → text'
//! ```
//!
//! # Example
//!
//! ```rust
//! use inferred_source::{patch_property, PropertyPatch, SourceLanguage};
//!
//! let text = "export default {\n  serverBuildPath: \"build/index.js\",\n};\n";
//! let patch = PropertyPatch::new("serverBuildPath", "options.outputPath + \"/build/index.js\"");
//! let outcome = patch_property(text, SourceLanguage::TypeScript, &patch).unwrap();
//!
//! assert_eq!(
//!     outcome.text().unwrap(),
//!     "export default {\n  serverBuildPath: options.outputPath + \"/build/index.js\",\n};\n"
//! );
//! ```

#![warn(unreachable_pub)]
#![allow(missing_docs)]

// Core modules
pub mod edit;
pub mod error;
pub mod inject;
pub mod parse;
pub mod patch;
pub mod query;

// Re-exports for convenience
pub use edit::{splice, EditSet, SourceEdit};
pub use error::{EditError, ParseError, PatchError, PatchResult};
pub use inject::{inject_config_value_table, InjectionTemplate};
pub use parse::{DefaultExport, ParsedSource, SourceLanguage};
pub use patch::{patch_property, PatchOutcome, PropertyPatch};
pub use query::Selector;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
