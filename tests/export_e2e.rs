// tests/export_e2e.rs
use std::fs;

use review_scrape::config::options::{ExportFormat, ExportOptions, RecordKind};
use review_scrape::data::{EntityRecord, Record, ReviewRecord};
use review_scrape::file::export_records;
use review_scrape::store;

fn sample() -> Vec<Record> {
    vec![
        Record::Entity(EntityRecord { id: "d1".into(), about: None, address: Some("1 Main St, Town".into()) }),
        Record::Review(ReviewRecord {
            id: "d1".into(),
            date: "May 3, 2023".into(),
            rating: "bubble_50".into(),
            title: "Say \"wow\"".into(),
            review: "Great\tfood, friendly staff".into(),
        }),
    ]
}

#[test]
fn csv_export_quotes_and_keeps_user_extension() {
    let tmp = tempfile::tempdir().unwrap();
    let mut export = ExportOptions { format: ExportFormat::Csv, ..Default::default() };
    export.set_path(tmp.path().join("nested").join("hello.txt").to_str().unwrap());

    let written = export_records(&export, &sample()).unwrap();
    assert!(written.ends_with("hello.txt"));

    let text = fs::read_to_string(&written).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,date,rating,title,review"));
    assert_eq!(
        lines.next(),
        Some("d1,\"May 3, 2023\",bubble_50,\"Say \"\"wow\"\"\",\"Great\tfood, friendly staff\"")
    );
    assert_eq!(lines.next(), None);
}

#[test]
fn tsv_entities_without_headers() {
    let tmp = tempfile::tempdir().unwrap();
    let export = ExportOptions {
        format: ExportFormat::Tsv,
        records: RecordKind::Entities,
        include_headers: false,
        out_path: Some(tmp.path().to_path_buf()),
        ..Default::default()
    };

    let written = export_records(&export, &sample()).unwrap();
    assert!(written.ends_with("reviews.tsv"));
    assert_eq!(fs::read_to_string(&written).unwrap(), "d1\t\t1 Main St, Town\n");
}

#[test]
fn jsonl_export_reads_back_unchanged() {
    let tmp = tempfile::tempdir().unwrap();
    let export = ExportOptions {
        format: ExportFormat::Jsonl,
        out_path: Some(tmp.path().join("copy.jsonl")),
        ..Default::default()
    };

    let written = export_records(&export, &sample()).unwrap();
    let text = fs::read_to_string(&written).unwrap();
    assert_eq!(text.lines().count(), 2);
    assert!(!text.lines().next().unwrap().contains("about"));
    assert_eq!(store::load_records(&written).unwrap(), sample());
}
