//! Config value table injection
//!
//! Emits the migrated per-configuration values as a literal object, a
//! selector reading the active configuration from the environment, and the
//! merged `options` object the patched properties read from.

use crate::edit::{splice, SourceEdit};
use crate::error::PatchResult;
use crate::parse::{ParsedSource, SourceLanguage};
use serde::{Deserialize, Serialize};
use tree_sitter::Node;

/// Names used in the generated block
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InjectionTemplate {
    /// Generator credited in the leading comment
    pub generator_name: String,
    /// Environment variable naming the active configuration
    pub env_var: String,
    /// Identifier of the table literal
    pub table_identifier: String,
    /// Identifier of the active configuration name
    pub selector_identifier: String,
    /// Identifier of the merged options object
    pub options_identifier: String,
}

impl Default for InjectionTemplate {
    fn default() -> Self {
        Self {
            generator_name: "@nx/remix:convert-to-inferred".to_string(),
            env_var: "NX_TASK_TARGET_CONFIGURATION".to_string(),
            table_identifier: "configValues".to_string(),
            selector_identifier: "nxConfiguration".to_string(),
            options_identifier: "options".to_string(),
        }
    }
}

impl InjectionTemplate {
    /// With generator name
    #[must_use]
    pub fn with_generator_name(mut self, name: impl Into<String>) -> Self {
        self.generator_name = name.into();
        self
    }

    /// With environment variable
    #[must_use]
    pub fn with_env_var(mut self, var: impl Into<String>) -> Self {
        self.env_var = var.into();
        self
    }

    /// Render the block for an already serialized table
    ///
    /// The block ends with a blank line.
    #[must_use]
    pub fn render(&self, table_json: &str) -> String {
        let Self {
            generator_name,
            env_var,
            table_identifier: table,
            selector_identifier: selector,
            options_identifier: options,
        } = self;

        format!(
            "// These options were migrated by {generator_name} from the project.json file.\n\
             const {table} = {table_json};\n\
             \n\
             // Determine the correct configValue to use based on the configuration\n\
             const {selector} = process.env.{env_var} ?? 'default';\n\
             \n\
             const {options} = {{\n\
             \x20 ...{table}.default,\n\
             \x20 ...({table}[{selector}] ?? {{}})\n\
             }};\n\
             \n"
        )
    }
}

/// Insert the value table block into `text`
///
/// The block goes directly before the default export, ahead of any comment
/// attached to it (such as a JSDoc `@type` annotation). Without a default
/// export it follows the last top-level import, or opens the file.
/// Running this twice injects the block twice.
///
/// # Errors
/// Returns `PatchError::Parse` for invalid source and
/// `PatchError::Serialize` if `table` cannot be serialized.
pub fn inject_config_value_table<T: Serialize + ?Sized>(
    text: &str,
    language: SourceLanguage,
    table: &T,
    template: &InjectionTemplate,
) -> PatchResult<String> {
    let table_json = serde_json::to_string(table)?;
    let block = template.render(&table_json);
    let parsed = ParsedSource::parse(text, language)?;

    let edit = if let Some(export) = parsed.default_export() {
        let at = attached_comments_start(&parsed, export.statement);
        tracing::debug!(at, "injecting config values before default export");
        SourceEdit::insert(at, block)
    } else if let Some(import) = parsed.last_import() {
        tracing::debug!("injecting config values after last import");
        SourceEdit::insert(import.end_byte(), format!("\n\n{}", block.trim_end()))
    } else {
        tracing::debug!("injecting config values at start of file");
        SourceEdit::insert(0, block)
    };

    Ok(splice(text, edit)?)
}

/// Start of the comment run directly above `statement`
///
/// A comment is attached when only whitespace without a blank line
/// separates it from what follows.
fn attached_comments_start(parsed: &ParsedSource<'_>, statement: Node<'_>) -> usize {
    let text = parsed.text();
    let mut start = statement.start_byte();
    let mut current = statement;

    while let Some(previous) = current.prev_sibling() {
        if previous.kind() != "comment" {
            break;
        }
        let gap = &text[previous.end_byte()..start];
        if !gap.trim().is_empty() || gap.matches('\n').count() > 1 {
            break;
        }
        start = previous.start_byte();
        current = previous;
    }
    start
}
