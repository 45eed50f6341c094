// Append-only log sheets
//
// A sheet is a named table that only grows. `CsvSheet` keeps one CSV file
// per sheet inside the log directory; `MemorySheet` keeps rows in memory.

use std::fs::{self, OpenOptions};
use std::path::{Path, PathBuf};

use super::error::ReceiverError;

/// First row of every sheet
pub const LOG_HEADER: [&str; 5] = ["ts_iso", "event", "variant", "userId", "meta"];

pub trait LogSheet: Send {
    fn name(&self) -> &str;

    /// Number of rows written so far, header included
    fn last_row(&self) -> Result<usize, ReceiverError>;

    fn append_row(&mut self, row: &[String]) -> Result<(), ReceiverError>;
}

/// Append `row`, writing the header first if the sheet is empty
pub fn append_log_row(sheet: &mut dyn LogSheet, row: &[String]) -> Result<(), ReceiverError> {
    if sheet.last_row()? == 0 {
        let header: Vec<String> = LOG_HEADER.iter().map(|h| h.to_string()).collect();
        sheet.append_row(&header)?;
        tracing::info!("Wrote header row to sheet '{}'", sheet.name());
    }
    sheet.append_row(row)
}

/// Sheet stored as `<dir>/<name>.csv`
#[derive(Debug)]
pub struct CsvSheet {
    name: String,
    path: PathBuf,
    rows: usize,
}

impl CsvSheet {
    /// Open the named sheet, creating the directory and an empty file if needed
    pub fn open(dir: &Path, name: &str) -> Result<Self, ReceiverError> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{}.csv", name));

        if !path.exists() {
            tracing::info!("Creating sheet '{}' at {}", name, path.display());
        }
        OpenOptions::new().create(true).append(true).open(&path)?;

        let rows = count_rows(&path)?;
        tracing::debug!("Sheet '{}' has {} rows", name, rows);

        Ok(Self {
            name: name.to_string(),
            path,
            rows,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn count_rows(path: &Path) -> Result<usize, ReceiverError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut rows = 0;
    for record in reader.records() {
        record?;
        rows += 1;
    }
    Ok(rows)
}

impl LogSheet for CsvSheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn last_row(&self) -> Result<usize, ReceiverError> {
        Ok(self.rows)
    }

    fn append_row(&mut self, row: &[String]) -> Result<(), ReceiverError> {
        let file = OpenOptions::new().append(true).open(&self.path)?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(row)?;
        writer.flush()?;
        self.rows += 1;
        Ok(())
    }
}

/// Sheet kept in memory
#[derive(Debug, Default)]
pub struct MemorySheet {
    name: String,
    rows: Vec<Vec<String>>,
}

impl MemorySheet {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            rows: Vec::new(),
        }
    }

    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }
}

impl LogSheet for MemorySheet {
    fn name(&self) -> &str {
        &self.name
    }

    fn last_row(&self) -> Result<usize, ReceiverError> {
        Ok(self.rows.len())
    }

    fn append_row(&mut self, row: &[String]) -> Result<(), ReceiverError> {
        self.rows.push(row.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    fn read_rows(path: &Path) -> Vec<Vec<String>> {
        csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_path(path)
            .unwrap()
            .records()
            .map(|r| r.unwrap().iter().map(String::from).collect())
            .collect()
    }

    #[test]
    fn test_header_written_once() {
        let mut sheet = MemorySheet::new("logs");
        append_log_row(&mut sheet, &row(&["t1", "a", "", "", ""])).unwrap();
        append_log_row(&mut sheet, &row(&["t2", "b", "", "", ""])).unwrap();

        assert_eq!(sheet.rows().len(), 3);
        assert_eq!(sheet.rows()[0], row(&LOG_HEADER));
        assert_eq!(sheet.rows()[1][1], "a");
        assert_eq!(sheet.rows()[2][1], "b");
    }

    #[test]
    fn test_open_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let sheet = CsvSheet::open(&dir.path().join("nested"), "logs").unwrap();
        assert!(sheet.path().exists());
        assert_eq!(sheet.last_row().unwrap(), 0);
        assert_eq!(sheet.name(), "logs");
    }

    #[test]
    fn test_csv_sheet_appends_and_reopens() {
        let dir = tempfile::tempdir().unwrap();
        {
            let mut sheet = CsvSheet::open(dir.path(), "logs").unwrap();
            append_log_row(&mut sheet, &row(&["t1", "cta_click", "B", "u1", "x"])).unwrap();
        }

        let mut sheet = CsvSheet::open(dir.path(), "logs").unwrap();
        assert_eq!(sheet.last_row().unwrap(), 2);
        append_log_row(&mut sheet, &row(&["t2", "view", "A", "u2", ""])).unwrap();

        let rows = read_rows(sheet.path());
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0], row(&LOG_HEADER));
        assert_eq!(rows[2], row(&["t2", "view", "A", "u2", ""]));
    }

    #[test]
    fn test_csv_sheet_quotes_awkward_values() {
        let dir = tempfile::tempdir().unwrap();
        let mut sheet = CsvSheet::open(dir.path(), "logs").unwrap();
        let meta = "{\"a\":1,\"b\":\"two, three\"}\nsecond line";
        append_log_row(&mut sheet, &row(&["t1", "e", "v", "u", meta])).unwrap();

        let rows = read_rows(sheet.path());
        assert_eq!(rows[1][4], meta);
        assert_eq!(sheet.last_row().unwrap(), 2);
    }
}
