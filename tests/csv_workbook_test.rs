//! Integration tests for the CSV workbook adapter and consolidation

use rvanon::adapters::csv_workbook::{read_sheet, write_sheet};
use rvanon::adapters::{discover_exports, read_workbook, write_workbook};
use rvanon::core::consolidate;
use rvanon::domain::{Row, Sheet, Table, Workbook};
use std::fs;
use tempfile::TempDir;

#[test]
fn test_quoted_fields_survive_write_and_read() {
    let temp = TempDir::new().unwrap();
    let path = temp.path().join("vInfo.csv");

    let mut table = Table::with_headers(["VM", "Annotation", "DNS Servers"]);
    table.push_row(Row::new(vec![
        Some("web01".to_string()),
        Some("line one\nline \"two\"".to_string()),
        Some("10.1.1.1, 10.1.1.2".to_string()),
    ]));
    table.push_row(Row::new(vec![Some("web02".to_string()), None, None]));

    write_sheet(&path, &table).unwrap();
    let reread = read_sheet(&path).unwrap();

    assert_eq!(reread, table);
}

#[test]
fn test_workbook_round_trip_keeps_sheet_order() {
    let temp = TempDir::new().unwrap();
    let mut workbook = Workbook::new();
    for name in ["vCluster", "vHost", "vInfo"] {
        let mut table = Table::with_headers(["Name"]);
        table.push_row(Row::from_values([format!("{name}-row")]));
        workbook.push_sheet(Sheet::new(name, table));
    }

    write_workbook(&temp.path().join("out"), &workbook).unwrap();
    let reread = read_workbook(&temp.path().join("out")).unwrap();

    assert_eq!(reread, workbook);
}

#[test]
fn test_rvtools_prefix_is_dropped_when_reading() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("RVTools_tabvInfo.csv"), "VM\nweb01\n").unwrap();
    fs::write(temp.path().join("RVTools_tabvHost.csv"), "Host\nesx01\n").unwrap();

    let workbook = read_workbook(temp.path()).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["vHost", "vInfo"]);

    write_workbook(&temp.path().join("out"), &workbook).unwrap();
    assert!(temp.path().join("out/vInfo.csv").exists());
    assert!(!temp.path().join("out/RVTools_tabvInfo.csv").exists());
}

#[test]
fn test_discovery_then_consolidation() {
    let temp = TempDir::new().unwrap();
    let site_a = temp.path().join("site-a");
    let site_b = temp.path().join("site-b");
    fs::create_dir_all(&site_a).unwrap();
    fs::create_dir_all(&site_b).unwrap();
    fs::write(site_a.join("RVTools_tabvInfo.csv"), "VM,Host\nweb01,esx01\n").unwrap();
    fs::write(
        site_b.join("RVTools_tabvInfo.csv"),
        "VM,Cluster\napp01,cl-b\napp02,cl-b\n",
    )
    .unwrap();
    fs::write(site_b.join("RVTools_tabvHost.csv"), "Host\nesx09\n").unwrap();

    let exports = discover_exports(temp.path()).unwrap();
    assert_eq!(exports, vec![site_a.clone(), site_b.clone()]);

    let inputs = exports
        .iter()
        .map(|path| {
            let label = path.file_name().unwrap().to_string_lossy().into_owned();
            (label, read_workbook(path).unwrap())
        })
        .collect();
    let (merged, summary) = consolidate(inputs);

    assert_eq!(summary.inputs, vec!["site-a", "site-b"]);
    assert_eq!(summary.total_rows(), 4);
    assert_eq!(merged.sheet_names(), vec!["vInfo", "vHost"]);

    let vinfo = &merged.sheet("vInfo").unwrap().table;
    assert_eq!(vinfo.headers, vec!["VM", "Host", "Cluster"]);
    assert_eq!(vinfo.value(0, "Cluster"), None);
    assert_eq!(vinfo.value(1, "Cluster"), Some("cl-b"));
    assert_eq!(vinfo.value(1, "Host"), None);
    assert_eq!(vinfo.rows[0].source.as_deref(), Some("site-a"));
    assert_eq!(vinfo.rows[2].source.as_deref(), Some("site-b"));

    let out = temp.path().join("combined");
    write_workbook(&out, &merged).unwrap();
    let text = fs::read_to_string(out.join("vInfo.csv")).unwrap();
    assert_eq!(text.lines().next(), Some("VM,Host,Cluster"));
    assert_eq!(text.lines().nth(1), Some("web01,esx01,"));
}

#[test]
fn test_discovery_finds_nothing_in_unrelated_directory() {
    let temp = TempDir::new().unwrap();
    fs::write(temp.path().join("notes.csv"), "a,b\n1,2\n").unwrap();

    assert!(discover_exports(temp.path()).unwrap().is_empty());
}
