//! CSV workbook reader/writer
//!
//! A workbook on disk is a directory with one CSV file per sheet. RVTools
//! names its per-tab exports `RVTools_tab<sheet>.csv`; the prefix is dropped
//! when reading and never written back.

use crate::anonymization::classifier::normalize_sheet_name;
use crate::domain::{Cell, Result, Row, RvanonError, Sheet, Table, Workbook};
use csv::{ReaderBuilder, WriterBuilder};
use std::fs;
use std::path::{Path, PathBuf};

/// Sheets whose presence marks a directory as an RVTools export
pub const MARKER_SHEETS: [&str; 3] = ["vInfo", "vHost", "vCluster"];

const UTF8_BOM: char = '\u{feff}';

/// Sheet name for a CSV path (`RVTools_tabvInfo.csv` -> `vInfo`)
pub fn sheet_name_from_path(path: &Path) -> Option<String> {
    let stem = path.file_stem()?.to_str()?;
    let name = normalize_sheet_name(stem);
    if name.is_empty() {
        None
    } else {
        Some(name.to_string())
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .is_some_and(|n| n.starts_with('~') || n.starts_with('.'))
}

fn is_csv(path: &Path) -> bool {
    path.is_file()
        && !is_hidden(path)
        && path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("csv"))
}

/// CSV files of a workbook directory, sorted by file name
fn sheet_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if is_csv(&path) {
            files.push(path);
        }
    }
    files.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(files)
}

/// Read one CSV file into a table
///
/// Invalid UTF-8 is decoded lossily. Empty fields become null cells and rows
/// shorter than the header are padded with nulls.
pub fn read_sheet(path: &Path) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)
        .map_err(|e| RvanonError::Table(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut records = reader.byte_records();

    let headers: Vec<String> = match records.next() {
        Some(record) => record?
            .iter()
            .enumerate()
            .map(|(idx, field)| {
                let header = String::from_utf8_lossy(field);
                if idx == 0 {
                    header.trim_start_matches(UTF8_BOM).to_string()
                } else {
                    header.into_owned()
                }
            })
            .collect(),
        None => return Ok(Table::default()),
    };

    let mut table = Table::new(headers, Vec::new());
    for record in records {
        let record = record.map_err(|e| {
            RvanonError::Table(format!("Failed to parse {}: {}", path.display(), e))
        })?;
        let mut cells: Vec<Cell> = record
            .iter()
            .map(|field| {
                if field.is_empty() {
                    None
                } else {
                    Some(String::from_utf8_lossy(field).into_owned())
                }
            })
            .collect();
        if cells.len() < table.headers.len() {
            cells.resize(table.headers.len(), None);
        }
        table.push_row(Row::new(cells));
    }

    Ok(table)
}

/// Read a workbook directory
///
/// # Errors
///
/// Fails when the directory cannot be read or holds no CSV files.
pub fn read_workbook(dir: &Path) -> Result<Workbook> {
    if !dir.is_dir() {
        return Err(RvanonError::Io(format!(
            "Workbook directory not found: {}",
            dir.display()
        )));
    }

    let files = sheet_files(dir)?;
    if files.is_empty() {
        return Err(RvanonError::Table(format!(
            "No CSV sheets found in {}",
            dir.display()
        )));
    }

    let mut workbook = Workbook::new();
    for path in files {
        let Some(name) = sheet_name_from_path(&path) else {
            tracing::warn!(path = %path.display(), "Skipping file with unusable sheet name");
            continue;
        };
        let table = read_sheet(&path)?;
        tracing::debug!(sheet = %name, rows = table.row_count(), "Sheet read");
        workbook.push_sheet(Sheet::new(name, table));
    }

    Ok(workbook)
}

/// Write one table as CSV; null cells become empty fields
pub fn write_sheet(path: &Path, table: &Table) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .flexible(true)
        .from_path(path)
        .map_err(|e| RvanonError::Io(format!("Failed to create {}: {}", path.display(), e)))?;

    if !table.headers.is_empty() {
        writer.write_record(&table.headers)?;
    }
    for row in &table.rows {
        writer.write_record(row.cells.iter().map(|c| c.as_deref().unwrap_or("")))?;
    }
    writer.flush()?;
    Ok(())
}

/// Write a workbook as `<sheet>.csv` files, creating `dir` if needed
pub fn write_workbook(dir: &Path, workbook: &Workbook) -> Result<()> {
    fs::create_dir_all(dir).map_err(|e| {
        RvanonError::Io(format!("Failed to create output directory {}: {}", dir.display(), e))
    })?;

    for sheet in &workbook.sheets {
        let path = dir.join(format!("{}.csv", sheet.name));
        write_sheet(&path, &sheet.table)?;
    }

    tracing::info!(
        path = %dir.display(),
        sheets = workbook.sheets.len(),
        rows = workbook.total_rows(),
        "Workbook written"
    );
    Ok(())
}

fn is_export(dir: &Path) -> Result<bool> {
    Ok(sheet_files(dir)?.iter().any(|path| {
        sheet_name_from_path(path)
            .is_some_and(|name| MARKER_SHEETS.iter().any(|m| m.eq_ignore_ascii_case(&name)))
    }))
}

/// Find RVTools exports in `dir` and its immediate sub-directories
pub fn discover_exports(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut found = Vec::new();

    if is_export(dir)? {
        found.push(dir.to_path_buf());
    }

    let mut children = Vec::new();
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() && !is_hidden(&path) {
            children.push(path);
        }
    }
    children.sort();

    for child in children {
        if is_export(&child)? {
            found.push(child);
        }
    }

    tracing::debug!(dir = %dir.display(), exports = found.len(), "Export discovery finished");
    Ok(found)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_sheet_name_from_path() {
        assert_eq!(
            sheet_name_from_path(Path::new("x/RVTools_tabvInfo.csv")),
            Some("vInfo".to_string())
        );
        assert_eq!(sheet_name_from_path(Path::new("vHost.csv")), Some("vHost".to_string()));
        assert_eq!(sheet_name_from_path(Path::new("RVTools_tab.csv")), None);
    }

    #[test]
    fn test_read_pads_short_rows_and_maps_empty_to_null() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vInfo.csv");
        fs::write(&path, "\u{feff}VM,VM ID,Host\nweb01,,esx01\nweb02\n").unwrap();

        let table = read_sheet(&path).unwrap();
        assert_eq!(table.headers, vec!["VM", "VM ID", "Host"]);
        assert_eq!(table.rows[0].cells[1], None);
        assert_eq!(table.rows[1].cells, vec![Some("web02".to_string()), None, None]);
    }

    #[test]
    fn test_read_empty_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("vEmpty.csv");
        fs::write(&path, "").unwrap();

        let table = read_sheet(&path).unwrap();
        assert!(table.headers.is_empty());
        assert!(table.is_empty());
    }

    #[test]
    fn test_hidden_and_lock_files_are_ignored() {
        let dir = tempdir().unwrap();
        fs::write(dir.path().join("vInfo.csv"), "VM\nweb01\n").unwrap();
        fs::write(dir.path().join("~lock.vInfo.csv"), "junk").unwrap();
        fs::write(dir.path().join(".hidden.csv"), "junk").unwrap();
        fs::write(dir.path().join("notes.txt"), "junk").unwrap();

        let workbook = read_workbook(dir.path()).unwrap();
        assert_eq!(workbook.sheet_names(), vec!["vInfo"]);
    }

    #[test]
    fn test_read_workbook_errors() {
        let dir = tempdir().unwrap();
        assert!(matches!(read_workbook(dir.path()), Err(RvanonError::Table(_))));
        assert!(matches!(
            read_workbook(&dir.path().join("missing")),
            Err(RvanonError::Io(_))
        ));
    }

    #[test]
    fn test_discover_exports() {
        let dir = tempdir().unwrap();
        let site_a = dir.path().join("siteA");
        let site_b = dir.path().join("siteB");
        let other = dir.path().join("other");
        for d in [&site_a, &site_b, &other] {
            fs::create_dir(d).unwrap();
        }
        fs::write(site_a.join("RVTools_tabvInfo.csv"), "VM\n").unwrap();
        fs::write(site_b.join("vHost.csv"), "Host\n").unwrap();
        fs::write(other.join("vLicense.csv"), "Name\n").unwrap();

        let found = discover_exports(dir.path()).unwrap();
        assert_eq!(found, vec![site_a, site_b]);
    }
}
