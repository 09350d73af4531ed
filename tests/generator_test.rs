use serde_json::json;
use splicegen::generator::bson::{max_depth, Statement};
use splicegen::generator::{generators, run_all, BsonGenerator, ConfigPrintGenerator, Generator};
use splicegen::model::{ConfigModel, StructureModel};
use splicegen::substitute::{substitute, MarkerError};

fn structure(value: serde_json::Value) -> StructureModel {
    StructureModel::from_value(&value)
}

#[test]
fn test_single_field_has_no_nesting() {
    let model = structure(json!({"id": "int"}));
    assert_eq!(max_depth(&model), 0);

    let artifact = BsonGenerator.generate(&model, &ConfigModel::empty());
    assert_eq!(artifact.marker, "{{GENERATE_BSON}}");
    assert_eq!(artifact.code.matches("BSON_APPEND_INT32").count(), 1);
    assert!(!artifact.code.contains("_BEGIN"));
    assert!(!artifact.code.contains("_end"));
}

#[test]
fn test_array_of_objects_loops_over_count() {
    let built = BsonGenerator.build(&structure(json!({"items": [{"name": "char*"}]})));
    let statements: Vec<&Statement> = built.statements().iter().map(|e| &e.statement).collect();

    assert!(matches!(statements[2], Statement::BeginArray { key, .. } if key == "items"));
    assert!(matches!(
        statements[3],
        Statement::Loop { counter, count } if counter == "i" && count == "data->items_count"
    ));
    assert!(matches!(statements[5], Statement::BeginDocument { .. }));
    assert!(matches!(
        statements[6],
        Statement::Append { key, value, .. } if key == "name" && value == "data->items[i].name"
    ));
    assert!(matches!(statements[7], Statement::EndDocument { .. }));
}

#[test]
fn test_config_printer_follows_key_order() {
    let config = ConfigModel::from_value(&json!({"mqtt": {"host": "localhost", "port": 1883}}));
    let code = ConfigPrintGenerator.generate(&structure(json!({})), &config).code;
    let lines: Vec<&str> = code.lines().collect();

    assert_eq!(lines.len(), 2);
    assert!(lines[0].contains("config->mqtt.host") && lines[0].contains("%s"));
    assert!(lines[1].contains("config->mqtt.port") && lines[1].contains("%d"));
}

#[test]
fn test_missing_marker_is_reported() {
    let model = structure(json!({"id": "int"}));
    let artifacts = run_all(&generators(), &model, &ConfigModel::empty());
    let template = "// {{GENERATE_CONFIG_PRINT}}\n";

    assert_eq!(
        substitute(template, &artifacts),
        Err(MarkerError::Missing {
            marker: "{{GENERATE_BSON}}".to_string(),
            generator: "bson".to_string()
        })
    );
}

#[test]
fn test_regeneration_is_byte_identical() {
    let model = structure(json!({"a": {"b": [{"c": "double"}]}, "d": "char*"}));
    let config = ConfigModel::from_value(&json!({"x": {"y": "z"}, "n": 3}));
    let template = "a\n// {{GENERATE_BSON}}\nb\n// {{GENERATE_CONFIG_PRINT}}\nc\n";

    let first = substitute(template, &run_all(&generators(), &model, &config)).unwrap();
    let second = substitute(template, &run_all(&generators(), &model, &config)).unwrap();
    assert_eq!(first, second);
}
