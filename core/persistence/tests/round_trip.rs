//! File-level tests: parser round-trip, BOM invariance, save/load.

use engine::{coerce, Dataset, ParseOptions, Value};
use persistence::{
    dataset_to_text, read_chart_spec, load_dataset, load_view_options, read_dataset,
    save_dataset, save_export, save_view_options, PersistenceError,
};
use pivot_engine::{BarMode, ExportTable, SortMode, ViewOptions};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

fn plain_text() -> impl Strategy<Value = Value> {
    "[a-zA-Z][a-zA-Z ]{0,7}"
        .prop_filter("text that coerces to itself", |s| {
            coerce(s) == Value::text(s.as_str()) && s.trim() == s
        })
        .prop_map(Value::text)
}

fn cell() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Boolean),
        (-1.0e9f64..1.0e9).prop_map(Value::Number),
        (-5000i32..5000).prop_map(|n| Value::Number(f64::from(n))),
        plain_text(),
    ]
}

fn dataset() -> impl Strategy<Value = Dataset> {
    (1usize..5).prop_flat_map(|width| {
        proptest::collection::vec(proptest::collection::vec(cell(), width), 0..12).prop_map(
            move |rows| {
                let names = (0..width).map(|i| format!("f{}", i)).collect();
                Dataset::new(names, rows)
            },
        )
    })
}

proptest! {
    #[test]
    fn serialize_then_parse_is_identity(ds in dataset()) {
        for delimiter in [',', '\t'] {
            let text = dataset_to_text(&ds, delimiter);
            let back = Dataset::from_text_with(&text, ParseOptions { delimiter });
            prop_assert_eq!(&back, &ds);
        }
    }

    #[test]
    fn byte_order_mark_is_invisible(ds in dataset()) {
        let text = dataset_to_text(&ds, ',');
        let with_bom = format!("\u{FEFF}{}", text);
        prop_assert_eq!(Dataset::from_text(&with_bom), Dataset::from_text(&text));
    }
}

#[test]
fn load_dataset_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "\u{FEFF}cat,amt\r\nA,1\r\n\"B, Inc\",2\r\n").unwrap();
    let ds = load_dataset(file.path(), ParseOptions::default()).unwrap();
    assert_eq!(ds.len(), 2);
    assert_eq!(ds.get(&ds.rows()[1], "cat"), &Value::text("B, Inc"));
}

#[test]
fn non_utf8_input_is_rejected() {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(&[0x61, 0x0a, 0xff, 0xfe, 0x0a]).unwrap();
    let err = load_dataset(file.path(), ParseOptions::default()).unwrap_err();
    assert!(matches!(err, PersistenceError::InvalidFormat(_)));
}

#[test]
fn read_dataset_from_reader() {
    let ds = read_dataset("a;b\n1;2\n".as_bytes(), ParseOptions { delimiter: ';' }).unwrap();
    assert_eq!(ds.get(&ds.rows()[0], "b"), &Value::Number(2.0));
}

#[test]
fn missing_file_is_io_error() {
    let dir = tempdir().unwrap();
    let err = load_dataset(&dir.path().join("nope.csv"), ParseOptions::default()).unwrap_err();
    assert!(matches!(err, PersistenceError::Io(_)));
}

#[test]
fn saved_files_read_back() {
    let dir = tempdir().unwrap();

    let ds = Dataset::from_text("cat,amt\nA,1\nB,\n");
    let data_path = dir.path().join("data.csv");
    save_dataset(&ds, &data_path, ',').unwrap();
    assert_eq!(load_dataset(&data_path, ParseOptions::default()).unwrap(), ds);

    let table = ExportTable {
        columns: vec!["cat".into(), "value".into()],
        rows: vec![vec![Value::text("A"), Value::Number(10.0)]],
    };
    let export_path = dir.path().join("chart_data.csv");
    save_export(&table, &export_path, ',').unwrap();
    assert_eq!(
        std::fs::read_to_string(&export_path).unwrap(),
        "\"cat\",\"value\"\n\"A\",\"10\""
    );

    let options = ViewOptions::new(SortMode::Value, BarMode::Stack);
    let options_path = dir.path().join("view.json");
    save_view_options(&options, &options_path).unwrap();
    assert_eq!(load_view_options(&options_path).unwrap(), options);
}

#[test]
fn chart_spec_from_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, r#"{{"chartType":"line","mappings":{{"x":"cat","yOp":"count"}}}}"#).unwrap();
    let spec = read_chart_spec(file.path()).unwrap();
    assert_eq!(spec.x_field().unwrap(), "cat");
}
