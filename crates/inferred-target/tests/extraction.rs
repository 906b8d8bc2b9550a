use inferred_log::AggregatedLog;
use inferred_target::{OptionExtractor, ProjectDetails, TargetConfiguration};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde_json::{json, Map, Value};
use std::sync::Arc;

fn target(value: Value) -> TargetConfiguration {
    serde_json::from_value(value).unwrap()
}

#[test]
fn variant_entries_hold_only_their_overrides() {
    let log = Arc::new(AggregatedLog::new());
    let extractor = OptionExtractor::remix_build(log);
    let mut t = target(json!({
        "options": { "outputPath": "dist/apps/site", "sourceMap": true },
        "configurations": {
            "production": { "sourceMap": false },
            "staging": { "outputPath": "dist/staging/site" }
        }
    }));

    let table = extractor.extract_target(&mut t, &ProjectDetails::new("site", "apps/site"));

    assert_eq!(
        table.to_json().unwrap(),
        r#"{"default":{"outputPath":"../../dist/apps/site"},"production":{},"staging":{"outputPath":"../../dist/staging/site"}}"#
    );
    assert_eq!(
        serde_json::to_value(&t).unwrap(),
        json!({
            "options": { "sourceMap": true },
            "configurations": { "production": { "sourceMap": false }, "staging": {} }
        })
    );
}

#[test]
fn root_project_paths_get_dot_prefix() {
    let extractor = OptionExtractor::remix_build(Arc::new(AggregatedLog::new()));
    let mut t = target(json!({ "options": { "outputPath": "dist/site" } }));

    let table = extractor.extract_target(&mut t, &ProjectDetails::new("site", "."));

    assert_eq!(
        table.default_values().output_path.as_deref(),
        Some("./dist/site")
    );
}

#[test]
fn wrong_value_type_is_logged_not_fatal() {
    let log = Arc::new(AggregatedLog::new());
    let extractor = OptionExtractor::remix_build(Arc::clone(&log));
    let mut t = target(json!({ "options": { "outputPath": 42 } }));

    let table = extractor.extract_target(&mut t, &ProjectDetails::new("site", "apps/site"));

    assert!(!table.has_output_path());
    assert!(!t.declares_field("outputPath"));
    assert_eq!(
        log.entries()[0].message,
        "Unable to migrate `outputPath` to Remix Config. Expected a string path but found `42`."
    );
}

proptest! {
    #[test]
    fn prop_unsupported_field_logged_once_per_project(
        variant_count in 0usize..6,
        field in prop::sample::select(vec![
            "includeDevDependenciesInPackageJson",
            "generatePackageJson",
            "generateLockfile",
        ]),
    ) {
        let log = Arc::new(AggregatedLog::new());
        let extractor = OptionExtractor::remix_build(Arc::clone(&log));

        let mut options = Map::new();
        options.insert(field.to_string(), json!(true));
        let configurations: Map<String, Value> = (0..variant_count)
            .map(|i| {
                let mut overrides = Map::new();
                overrides.insert(field.to_string(), json!(i % 2 == 0));
                (format!("v{i}"), Value::Object(overrides))
            })
            .collect();
        let mut raw = json!({ "options": options });
        if variant_count > 0 {
            raw["configurations"] = Value::Object(configurations);
        }
        let mut t = target(raw);

        let table = extractor.extract_target(&mut t, &ProjectDetails::new("site", "apps/site"));

        prop_assert_eq!(log.len(), 1);
        prop_assert_eq!(table.len(), variant_count + 1);
        prop_assert!(!t.declares_field(field));
    }
}
