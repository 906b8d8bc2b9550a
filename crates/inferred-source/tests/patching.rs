use inferred_source::{
    inject_config_value_table, patch_property, InjectionTemplate, PatchError, PatchOutcome,
    PropertyPatch, SourceLanguage,
};
use inferred_test_utils::{
    REMIX_CONFIG, REMIX_CONFIG_BROKEN, REMIX_CONFIG_CJS, REMIX_CONFIG_NAMED_EXPORT,
    REMIX_CONFIG_WITH_PATHS,
};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn server_build_path() -> PropertyPatch {
    PropertyPatch::new("serverBuildPath", r#"options.outputPath + "/build/index.js""#)
}

fn assets_build_directory() -> PropertyPatch {
    PropertyPatch::new("assetsBuildDirectory", r#"options.outputPath + "/public/build""#)
}

fn patch_both(text: &str) -> String {
    let text = patch_property(text, SourceLanguage::TypeScript, &server_build_path())
        .unwrap()
        .into_text_or(text);
    patch_property(&text, SourceLanguage::TypeScript, &assets_build_directory())
        .unwrap()
        .into_text_or(&text)
}

#[test]
fn missing_properties_are_inserted_after_brace() {
    let out = patch_both(REMIX_CONFIG);

    let export_line = out.lines().find(|l| l.starts_with("export default")).unwrap();
    assert_eq!(
        export_line,
        r#"export default {assetsBuildDirectory: options.outputPath + "/public/build",serverBuildPath: options.outputPath + "/build/index.js","#
    );

    // commented-out defaults are left alone
    assert!(out.contains(r#"  // serverBuildPath: "build/index.js","#));
    assert!(out.contains(r#"  // assetsBuildDirectory: "public/build","#));
}

#[test]
fn existing_literals_are_replaced_in_place() {
    let out = patch_both(REMIX_CONFIG_WITH_PATHS);

    let expected = REMIX_CONFIG_WITH_PATHS
        .replace(r#""public/build""#, r#"options.outputPath + "/public/build""#)
        .replace("'build/index.js'", r#"options.outputPath + "/build/index.js""#);
    assert_eq!(out, expected);
}

#[test]
fn only_touched_lines_differ() {
    let out = patch_both(REMIX_CONFIG_WITH_PATHS);

    let changed: Vec<_> = REMIX_CONFIG_WITH_PATHS
        .lines()
        .zip(out.lines())
        .filter(|(before, after)| before != after)
        .map(|(before, _)| before.trim())
        .collect();
    assert_eq!(
        changed,
        vec![
            r#"assetsBuildDirectory: "public/build", // served by express"#,
            "serverBuildPath: 'build/index.js',",
        ]
    );
    assert_eq!(REMIX_CONFIG_WITH_PATHS.lines().count(), out.lines().count());
}

#[test]
fn commonjs_config_is_patched() {
    let out = patch_both(REMIX_CONFIG_CJS);
    assert!(out.contains(
        r#"module.exports = {assetsBuildDirectory: options.outputPath + "/public/build",serverBuildPath: options.outputPath + "/build/index.js","#
    ));
}

#[test]
fn config_without_default_export_is_unmigratable() {
    let outcome =
        patch_property(REMIX_CONFIG_NAMED_EXPORT, SourceLanguage::TypeScript, &server_build_path())
            .unwrap();
    assert_eq!(outcome, PatchOutcome::Unmigratable);
}

#[test]
fn broken_config_is_a_parse_error() {
    let err = patch_property(REMIX_CONFIG_BROKEN, SourceLanguage::TypeScript, &server_build_path())
        .unwrap_err();
    assert!(matches!(err, PatchError::Parse(_)));
}

#[test]
fn table_lands_between_code_and_export_annotation() {
    let patched = patch_both(REMIX_CONFIG);
    let out = inject_config_value_table(
        &patched,
        SourceLanguage::TypeScript,
        &serde_json::json!({ "default": { "outputPath": "../../dist/apps/myapp" } }),
        &InjectionTemplate::default(),
    )
    .unwrap();

    let expected = r#"import { createWatchPaths } from '@nx/remix';
import { dirname } from 'path';
import { fileURLToPath } from 'url';

const __dirname = dirname(fileURLToPath(import.meta.url));

// These options were migrated by @nx/remix:convert-to-inferred from the project.json file.
const configValues = {"default":{"outputPath":"../../dist/apps/myapp"}};

// Determine the correct configValue to use based on the configuration
const nxConfiguration = process.env.NX_TASK_TARGET_CONFIGURATION ?? 'default';

const options = {
  ...configValues.default,
  ...(configValues[nxConfiguration] ?? {})
};

/**
 * @type {import('@remix-run/dev').AppConfig}
 */
export default {assetsBuildDirectory: options.outputPath + "/public/build",serverBuildPath: options.outputPath + "/build/index.js",
  ignoredRouteFiles: ['**/.*'],
  // appDirectory: "app",
  // assetsBuildDirectory: "public/build",
  // serverBuildPath: "build/index.js",
  // publicPath: "/build/",
  watchPaths: () => createWatchPaths(__dirname),
};"#;
    assert_eq!(out, expected);
}

proptest! {
    #[test]
    fn prop_patch_is_byte_stable_outside_literal(
        header in proptest::collection::vec("// [a-z ]{0,20}", 0..5),
        before in proptest::collection::vec("[a-z]{1,8}", 0..4),
        after in proptest::collection::vec("[a-z]{1,8}", 0..4),
        literal in "[a-z/.]{1,16}",
    ) {
        let mut text = header.join("\n");
        text.push_str("\nexport default {\n");
        for (i, key) in before.iter().enumerate() {
            text.push_str(&format!("  {key}{i}: 1, // note\n"));
        }
        let prefix_len = text.len() + "  serverBuildPath: ".len();
        text.push_str(&format!("  serverBuildPath: \"{literal}\",\n"));
        let suffix_start = text.len() - ",\n".len();
        for (i, key) in after.iter().enumerate() {
            text.push_str(&format!("  /* {key} */ {key}{i}: '{key}',\n"));
        }
        text.push_str("};\n");

        let patch = server_build_path();
        let out = patch_property(&text, SourceLanguage::TypeScript, &patch)
            .unwrap()
            .into_text_or(&text);

        prop_assert_eq!(&out[..prefix_len], &text[..prefix_len]);
        prop_assert_eq!(&out[prefix_len..prefix_len + patch.expression.len()], patch.expression.as_str());
        prop_assert_eq!(&out[prefix_len + patch.expression.len()..], &text[suffix_start..]);
    }
}
