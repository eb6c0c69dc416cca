use std::fs;
use std::io::Write;

use nsfetch_import::{
    bulk_records, ConflictPolicy, CsvSource, FieldMap, RowSource, RowTransformer,
    TransformOptions, ValueMap,
};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

fn init_logger() {
    let _ = env_logger::builder().is_test(true).try_init();
}

#[test]
fn test_csv_import_pipeline() {
    init_logger();

    let dir = tempfile::tempdir().expect("tempdir must be created");
    let csv_path = dir.path().join("customers.csv");
    let mut file = fs::File::create(&csv_path).expect("csv file must be created");
    writeln!(file, "Customer Name,Status,Ship To.City,Subsidiary ID").unwrap();
    writeln!(file, "Acme,A,NYC,1").unwrap();
    writeln!(file, "Globex,I,Springfield,2").unwrap();
    drop(file);

    let map_path = dir.path().join("map.json");
    fs::write(
        &map_path,
        r#"{"Customer Name": "companyName", "Subsidiary ID": "subsidiary.id"}"#,
    )
    .unwrap();
    let value_map_path = dir.path().join("values.json");
    fs::write(
        &value_map_path,
        r#"{"Status": {"A": "_active", "I": "_inactive"}}"#,
    )
    .unwrap();

    let rows = CsvSource::new(fs::read(&csv_path).unwrap())
        .rows()
        .expect("csv must parse");
    let transformer = RowTransformer::new()
        .with_field_map(FieldMap::from_slice(&fs::read(&map_path).unwrap()).unwrap())
        .with_value_map(ValueMap::from_slice(&fs::read(&value_map_path).unwrap()).unwrap())
        .with_options(TransformOptions {
            nested_headers: true,
            on_conflict: ConflictPolicy::Reject,
        });

    let payloads: Vec<Value> = transformer
        .transform_all(&rows)
        .expect("rows must transform")
        .into_iter()
        .map(Value::Object)
        .collect();

    assert_eq!(
        payloads,
        vec![
            json!({
                "companyName": "Acme",
                "status": "_active",
                "shipTo": {"city": "NYC"},
                "subsidiary": {"id": "1"},
            }),
            json!({
                "companyName": "Globex",
                "status": "_inactive",
                "shipTo": {"city": "Springfield"},
                "subsidiary": {"id": "2"},
            }),
        ]
    );
}

#[test]
fn test_csv_import_row_count() {
    init_logger();

    let mut content = String::from("Name,Email\n");
    for i in 0..25 {
        content.push_str(&format!("Customer {i},c{i}@example.com\n"));
    }

    let rows = CsvSource::new(content).rows().unwrap();
    let payloads = RowTransformer::new().transform_all(&rows).unwrap();

    assert_eq!(payloads.len(), 25);
    assert_eq!(payloads[24]["name"], "Customer 24");
    assert_eq!(payloads[24]["email"], "c24@example.com");
}

#[test]
fn test_bulk_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("bulk.json");
    fs::write(&path, r#"{"companyName": "Acme", "subsidiary": {"id": "1"}}"#).unwrap();

    let records = bulk_records(&fs::read(&path).unwrap()).unwrap();

    assert_eq!(
        records,
        vec![json!({"companyName": "Acme", "subsidiary": {"id": "1"}})]
    );
}
