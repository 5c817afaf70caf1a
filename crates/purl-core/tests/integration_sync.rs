//! Integration test: import, sync, verify and UTM against a scratch directory.

use purl_core::config::PurlConfig;
use purl_core::page::render_page;
use purl_core::sync::{self, RowOutcome, TableUpdate};
use purl_core::table::RedirectTable;
use purl_core::{import, utm, verify};
use std::fs;
use tempfile::tempdir;

fn config_in(dir: &std::path::Path) -> PurlConfig {
    let mut cfg = PurlConfig {
        table_path: dir.join("data").join("redirects.csv"),
        output_dir: dir.join("site"),
        ..PurlConfig::default()
    };
    cfg.utm.output_path = dir.join("data").join("redirects.updated.csv");
    cfg
}

#[test]
fn single_row_scenario_then_unchanged() {
    let dir = tempdir().unwrap();
    let cfg = config_in(dir.path());
    fs::create_dir_all(cfg.table_path.parent().unwrap()).unwrap();
    fs::write(&cfg.table_path, "URL,File\nhttps://a.example,\n").unwrap();

    let first = sync::run(&cfg.sync_config()).unwrap();
    assert_eq!(first.created(), 1);
    assert_eq!(first.table, TableUpdate::Rewritten { assigned: 1 });

    let table = RedirectTable::load(&cfg.table_path).unwrap();
    let name = table.file_name(0).expect("name assigned").to_string();
    assert_eq!(
        fs::read_to_string(cfg.output_dir.join(&name)).unwrap(),
        render_page("https://a.example", &cfg.html_lang)
    );

    let second = sync::run(&cfg.sync_config()).unwrap();
    assert_eq!(second.unchanged(), 1);
    assert!(second.is_noop());
}

#[test]
fn import_sync_verify_pipeline() {
    let dir = tempdir().unwrap();
    let cfg = config_in(dir.path());
    let source = dir.path().join("export.csv");
    fs::write(
        &source,
        "Bridge;https://a.example/bridge\nHarbour;https://a.example/harbour\nBridge again;https://a.example/bridge\n",
    )
    .unwrap();

    let imported = import::run(&source, 1, &cfg.table_path).unwrap();
    assert_eq!(imported.added, 2);
    assert_eq!(imported.skipped_duplicates, 1);

    let report = sync::run(&cfg.sync_config()).unwrap();
    assert_eq!(report.created(), 2);
    let names: Vec<&str> = report.assigned().map(|(_, n)| n).collect();
    assert_eq!(names.len(), 2);
    let mut dedup = names.clone();
    dedup.sort();
    dedup.dedup();
    assert_eq!(dedup.len(), 2, "generated names must be unique");

    let check = verify::run(&cfg).unwrap();
    assert_eq!(check.checked, 2);
    assert!(check.is_clean());

    fs::remove_file(cfg.output_dir.join(names[0])).unwrap();
    let check = verify::run(&cfg).unwrap();
    assert_eq!(check.issues.len(), 1);
}

#[test]
fn utm_output_feeds_sync() {
    let dir = tempdir().unwrap();
    let mut cfg = config_in(dir.path());
    fs::create_dir_all(cfg.table_path.parent().unwrap()).unwrap();
    fs::write(&cfg.table_path, "URL,File\nhttps://a.example/x,x.html\n").unwrap();

    // Rewrite in place, then sync picks up the new target.
    cfg.utm.output_path = cfg.table_path.clone();
    let report = utm::run(&cfg.table_path, &cfg.utm).unwrap();
    assert_eq!(report.changed, 1);

    let synced = sync::run(&cfg.sync_config()).unwrap();
    match &synced.rows[0].outcome {
        RowOutcome::Written { file_name, .. } => assert_eq!(file_name, "x.html"),
        other => panic!("unexpected outcome {:?}", other),
    }
    let page = fs::read_to_string(cfg.output_dir.join("x.html")).unwrap();
    assert!(page.contains("https://a.example/x?utm_source=qr&utm_campaign=default"));
}
