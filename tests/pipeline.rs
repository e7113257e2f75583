use std::io::Write;
use std::sync::Arc;

use arrow::array::{
    ArrayRef, Date32Array, DictionaryArray, Float64Array, Int32Array, StringArray, UInt64Array,
};
use arrow::datatypes::{DataType, Field, Int32Type, Schema};
use arrow::record_batch::RecordBatch;
use parquet::arrow::ArrowWriter;
use tempfile::{Builder, NamedTempFile};

use repo_dash::data::aggregate::CategoryCount;
use repo_dash::data::error::{Notice, RangeGap, SchemaError};
use repo_dash::data::filter::{FilterParams, LanguageSelection, StarRange};
use repo_dash::data::loader::load_file;
use repo_dash::data::model::CellValue;
use repo_dash::data::resolve::MissingValuePolicy;
use repo_dash::data::session::Session;

const HEADER: &str =
    "repositories, stars_count ,forks_count,issues_count,pull_requests,contributors,language\n";

fn parquet_file(columns: Vec<(&str, ArrayRef)>) -> NamedTempFile {
    let batch = RecordBatch::try_from_iter(columns).unwrap();
    let tmp = Builder::new().suffix(".parquet").tempfile().unwrap();
    let file = std::fs::File::create(tmp.path()).unwrap();
    let mut writer = ArrowWriter::try_new(file, batch.schema(), None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();
    tmp
}

fn csv_file(body: &str) -> NamedTempFile {
    let mut tmp = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(tmp, "{HEADER}{body}").unwrap();
    tmp
}

fn three_repos() -> Session {
    let tmp = csv_file("a,5,1,0,0,1,Go\nb,10,2,0,0,1,Go\nc,0,0,0,0,1,Rust\n");
    Session::new(load_file(tmp.path()).unwrap())
}

fn counts(pairs: &[(&str, usize)]) -> Vec<CategoryCount> {
    pairs
        .iter()
        .map(|&(lang, count)| CategoryCount {
            value: CellValue::from(lang),
            count,
        })
        .collect()
}

#[test]
fn go_between_five_and_ten() {
    let session = three_repos();
    assert!(session.missing_columns().is_empty());

    let params = FilterParams {
        language: LanguageSelection::Only("Go".into()),
        stars: StarRange::new(5, 10),
    };
    let dashboard = session.run(MissingValuePolicy::Drop, &params);

    let names: Vec<String> = dashboard
        .view
        .column("repositories")
        .map(|v| v.to_string())
        .collect();
    assert_eq!(names, vec!["a", "b"]);

    let top: Vec<(String, Option<i64>)> = dashboard
        .top
        .into_iter()
        .map(|r| (r.repository, r.stars))
        .collect();
    assert_eq!(
        top,
        vec![("b".to_string(), Some(10)), ("a".to_string(), Some(5))]
    );
    assert_eq!(dashboard.languages, counts(&[("Go", 2)]));
    assert!(dashboard.notices.is_empty());
}

#[test]
fn all_languages_full_range_with_fill_default() {
    let session = three_repos();
    let options = session.options(MissingValuePolicy::FillDefault);
    assert_eq!(options.bounds, StarRange::new(0, 10));
    assert_eq!(options.languages, vec!["Go", "Rust"]);

    let dashboard = session.run(MissingValuePolicy::FillDefault, &options.widest());
    assert_eq!(dashboard.view.len(), 3);
    assert_eq!(dashboard.languages, counts(&[("Go", 2), ("Rust", 1)]));
    assert_eq!(
        dashboard.headline(),
        "Showing 3 repositories with stars between 0 and 10"
    );
}

#[test]
fn everything_dropped_falls_back_to_empty_results() {
    let tmp = csv_file("a,,1,0,0,1,Go\nb,10,,0,0,1,Go\nc,3,0,0,0,1,\n");
    let session = Session::new(load_file(tmp.path()).unwrap());

    let options = session.options(MissingValuePolicy::Drop);
    assert_eq!(options.bounds, StarRange::new(0, 0));

    let dashboard = session.run(MissingValuePolicy::Drop, &options.widest());
    assert!(dashboard.view.is_empty());
    assert!(dashboard.top.is_empty());
    assert!(dashboard.languages.is_empty());
    assert!(dashboard.stats.iter().all(|s| s.count == 0));
    assert_eq!(
        dashboard.notices,
        vec![Notice::UndefinedRange(RangeGap::EmptyTable)]
    );
}

#[test]
fn fill_default_fills_language_and_counts_every_row() {
    let tmp = csv_file("a,,1,,0,1,Go\nb,10,,0,0,1,Go\nc,3,0,0,0,1,\n");
    let session = Session::new(load_file(tmp.path()).unwrap());
    let options = session.options(MissingValuePolicy::FillDefault);
    assert_eq!(options.languages, vec!["Go", "Unknown"]);

    let dashboard = session.run(MissingValuePolicy::FillDefault, &options.widest());
    assert_eq!(dashboard.view.len(), 3);
    let total: usize = dashboard.languages.iter().map(|c| c.count).sum();
    assert_eq!(total, 3);

    // Issue counts are not part of the fill policy.
    let issues = dashboard.stats.iter().find(|s| s.column == "issues_count").unwrap();
    assert_eq!(issues.count, 2);
}

#[test]
fn incomplete_schema_is_reported_once_and_pipeline_continues() {
    let mut tmp = Builder::new().suffix(".csv").tempfile().unwrap();
    write!(tmp, "repositories,stars_count,language\na,4,Go\nb,9,Rust\n").unwrap();
    let session = Session::new(load_file(tmp.path()).unwrap());

    let missing = [
        "forks_count",
        "issues_count",
        "pull_requests",
        "contributors",
    ];
    assert_eq!(session.missing_columns(), missing);

    let dashboard = session.run(MissingValuePolicy::Drop, &session.options(MissingValuePolicy::Drop).widest());
    assert_eq!(dashboard.view.len(), 2);
    assert_eq!(
        dashboard.notices,
        vec![Notice::SchemaIncomplete(
            missing.iter().map(|s| s.to_string()).collect()
        )]
    );
    assert_eq!(
        dashboard.notices[0].to_string(),
        "Missing required columns: forks_count, issues_count, pull_requests, contributors"
    );
}

#[test]
fn json_records_load_with_nulls() {
    let mut tmp = Builder::new().suffix(".json").tempfile().unwrap();
    write!(
        tmp,
        r#"[
            {{"repositories": "a", "stars_count": 7, "forks_count": 2.0, "language": "Go"}},
            {{"repositories": "b", "stars_count": null, "language": "Rust"}}
        ]"#
    )
    .unwrap();
    let table = load_file(tmp.path()).unwrap();
    assert_eq!(table.len(), 2);
    assert_eq!(table.rows[0].get("forks_count"), &CellValue::Integer(2));
    assert_eq!(table.rows[1].get("forks_count"), &CellValue::Null);
    assert!(table.rows[1].get("stars_count").is_null());
}

#[test]
fn parquet_columns_are_trimmed_and_typed() {
    let schema = Arc::new(Schema::new(vec![
        Field::new(" repositories", DataType::Utf8, false),
        Field::new("stars_count", DataType::Float64, true),
        Field::new("language ", DataType::Utf8, true),
        Field::new("contributors", DataType::Int32, false),
    ]));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            Arc::new(StringArray::from(vec!["a", "b"])),
            Arc::new(Float64Array::from(vec![Some(3.0), None])),
            Arc::new(StringArray::from(vec![Some("Go"), None])),
            Arc::new(Int32Array::from(vec![4, 1])),
        ],
    )
    .unwrap();

    let tmp = Builder::new().suffix(".parquet").tempfile().unwrap();
    let mut writer = ArrowWriter::try_new(std::fs::File::create(tmp.path()).unwrap(), schema, None).unwrap();
    writer.write(&batch).unwrap();
    writer.close().unwrap();

    let table = load_file(tmp.path()).unwrap();
    assert_eq!(
        table.column_names,
        vec!["repositories", "stars_count", "language", "contributors"]
    );
    assert_eq!(table.rows[0].get("stars_count"), &CellValue::Integer(3));
    assert_eq!(table.rows[0].get("contributors"), &CellValue::Integer(4));
    assert_eq!(table.rows[1].get("language"), &CellValue::Null);

    let filled = Session::new(table).run(
        MissingValuePolicy::FillDefault,
        &FilterParams {
            language: LanguageSelection::Only("Unknown".into()),
            stars: StarRange::new(0, 3),
        },
    );
    assert_eq!(filled.view.len(), 1);
}

#[test]
fn parquet_unsigned_counts_and_categorical_languages_load() {
    let languages: DictionaryArray<Int32Type> = vec!["Go", "Rust", "Go"].into_iter().collect();
    let tmp = parquet_file(vec![
        ("repositories", Arc::new(StringArray::from(vec!["a", "007", "c"])) as ArrayRef),
        ("stars_count", Arc::new(UInt64Array::from(vec![42, 7, 0])) as ArrayRef),
        ("language", Arc::new(languages) as ArrayRef),
    ]);

    let table = load_file(tmp.path()).unwrap();
    assert_eq!(table.rows[0].get("stars_count"), &CellValue::Integer(42));
    assert_eq!(table.rows[1].get("repositories"), &CellValue::from("007"));
    let langs: Vec<_> = table.column("language").cloned().collect();
    assert_eq!(
        langs,
        vec![CellValue::from("Go"), CellValue::from("Rust"), CellValue::from("Go")]
    );
}

#[test]
fn parquet_unsigned_count_beyond_i64_is_out_of_range() {
    let tmp = parquet_file(vec![(
        "stars_count",
        Arc::new(UInt64Array::from(vec![u64::MAX])) as ArrayRef,
    )]);
    let err = load_file(tmp.path()).unwrap_err();
    assert_eq!(
        err.downcast_ref::<SchemaError>(),
        Some(&SchemaError::OutOfRange {
            column: "stars_count".into(),
            row: 0,
            value: u64::MAX.to_string(),
        })
    );
}

#[test]
fn parquet_unsupported_type_names_the_column() {
    let tmp = parquet_file(vec![
        ("repositories", Arc::new(StringArray::from(vec!["a"])) as ArrayRef),
        ("created_at", Arc::new(Date32Array::from(vec![19000])) as ArrayRef),
    ]);
    let err = load_file(tmp.path()).unwrap_err();
    match err.downcast_ref::<SchemaError>() {
        Some(SchemaError::UnsupportedType { column, data_type }) => {
            assert_eq!(column, "created_at");
            assert_eq!(data_type, "Date32");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}
