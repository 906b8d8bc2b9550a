//! Testing utilities for the inferred migration workspace
//!
//! Shared fixtures, target builders and tracing setup.

#![allow(missing_docs)]

use inferred_target::{ProjectDetails, TargetConfiguration};
use serde_json::Value;
use std::sync::Once;

/// Remix config as generated for a new ESM application
pub const REMIX_CONFIG: &str = r#"import { createWatchPaths } from '@nx/remix';
import { dirname } from 'path';
import { fileURLToPath } from 'url';

const __dirname = dirname(fileURLToPath(import.meta.url));

/**
 * @type {import('@remix-run/dev').AppConfig}
 */
export default {
  ignoredRouteFiles: ['**/.*'],
  // appDirectory: "app",
  // assetsBuildDirectory: "public/build",
  // serverBuildPath: "build/index.js",
  // publicPath: "/build/",
  watchPaths: () => createWatchPaths(__dirname),
};"#;

/// Remix config with both build paths set explicitly
pub const REMIX_CONFIG_WITH_PATHS: &str = r#"import { createWatchPaths } from '@nx/remix';

/**
 * @type {import('@remix-run/dev').AppConfig}
 */
export default {
  ignoredRouteFiles: ['**/.*'],
  assetsBuildDirectory: "public/build", // served by express
  serverBuildPath: 'build/index.js',
  watchPaths: () => createWatchPaths(__dirname),
};
"#;

/// CommonJS Remix config
pub const REMIX_CONFIG_CJS: &str = r#"const { createWatchPaths } = require('@nx/remix');

/**
 * @type {import('@remix-run/dev').AppConfig}
 */
module.exports = {
  ignoredRouteFiles: ['**/.*'],
  watchPaths: () => createWatchPaths(__dirname),
};
"#;

/// Remix config without a default export
pub const REMIX_CONFIG_NAMED_EXPORT: &str = r#"import { createWatchPaths } from '@nx/remix';

export const config = {
  ignoredRouteFiles: ['**/.*'],
};
"#;

/// Remix config that does not parse
pub const REMIX_CONFIG_BROKEN: &str = "export default {\n  ignoredRouteFiles: [,\n";

/// Project used by most tests
#[must_use]
pub fn myapp() -> ProjectDetails {
    ProjectDetails::new("myapp", "apps/myapp")
}

/// Build a target from a JSON literal
///
/// # Panics
/// Panics if `value` is not a valid target.
#[must_use]
pub fn target_from_json(value: Value) -> TargetConfiguration {
    serde_json::from_value(value).expect("valid target configuration")
}

/// Serialize a target for comparison against a JSON literal
///
/// # Panics
/// Panics if serialization fails.
#[must_use]
pub fn target_to_json(target: &TargetConfiguration) -> Value {
    serde_json::to_value(target).expect("serializable target configuration")
}

/// Install a test subscriber once; honours `RUST_LOG`
pub fn init_tracing() {
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
